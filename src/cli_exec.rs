use anyhow::{Context, Result};

use orgchart::builder::BuildOptions;
use orgchart::config::OrgChartConfig;
use orgchart::model::{EmployeeId, EmployeeNode};
use orgchart::remote::HttpSubtreeFetcher;
use orgchart::session::OrgChartSession;

use crate::Commands;

type HttpSession = OrgChartSession<HttpSubtreeFetcher>;

fn open_session(cfg: &OrgChartConfig, concurrency: Option<usize>) -> Result<HttpSession> {
    let fetcher = HttpSubtreeFetcher::new(&cfg.base_url, cfg.token.clone(), cfg.request_timeout())?;
    let options = BuildOptions::with_concurrency_limit(concurrency.unwrap_or(cfg.concurrency_limit));
    Ok(OrgChartSession::new(fetcher, options))
}

pub(crate) async fn handle_command(cfg: OrgChartConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Tree {
            id,
            full,
            concurrency,
            json,
        } => {
            let id = id
                .map(EmployeeId)
                .or(cfg.root_employee_id)
                .context("no employee id given and no `root_employee_id` configured")?;
            handle_tree_command(&cfg, id, full, concurrency, json).await
        }
        Commands::Show { id, root, json } => {
            let root = root.map(EmployeeId).or(cfg.root_employee_id);
            handle_show_command(&cfg, EmployeeId(id), root, json).await
        }
        Commands::Search { query, ids, json } => {
            let ids = if ids.is_empty() {
                cfg.preload_ids.clone()
            } else {
                ids.into_iter().map(EmployeeId).collect()
            };
            handle_search_command(&cfg, &query, &ids, json).await
        }
    }
}

async fn handle_tree_command(
    cfg: &OrgChartConfig,
    id: EmployeeId,
    full: bool,
    concurrency: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut session = open_session(cfg, concurrency)?;
    let loaded = if full {
        session.load_full_org_chart(id).await
    } else {
        session.load_org_chart(id).await
    };
    loaded.with_context(|| format!("load org chart for {}", id))?;

    let root = session.state().root().context("no chart loaded")?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(root).context("serialize tree json")?
        );
    } else {
        print!("{}", render_tree(root));
    }
    Ok(())
}

async fn handle_show_command(
    cfg: &OrgChartConfig,
    id: EmployeeId,
    root: Option<EmployeeId>,
    json: bool,
) -> Result<()> {
    let mut session = open_session(cfg, None)?;
    let root = root.unwrap_or(id);
    session
        .load_full_org_chart(root)
        .await
        .with_context(|| format!("load org chart for {}", root))?;
    session.state_mut().select(Some(id));

    let state = session.state();
    let emp = state
        .selected_employee()
        .with_context(|| format!("employee {} not found under {}", id, root))?;
    let chart = state.chart().context("no chart loaded")?;
    let chain = chart.chain_of_command(id);
    let reports = chart.children_of(id);

    if json {
        let out = serde_json::json!({
            "employee": emp.shallow(),
            "reports": reports.iter().map(|n| n.shallow()).collect::<Vec<_>>(),
            "chain_of_command": chain.iter().map(|n| n.shallow()).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize employee json")?
        );
        return Ok(());
    }

    println!("id: {}", emp.id);
    println!("name: {}", emp.name);
    if let Some(title) = &emp.title {
        println!("title: {}", title);
    }
    if let Some(rel) = &emp.relationship {
        println!("relationship: {}", rel);
    }
    if let Some(pic) = &emp.picture {
        println!("picture: {}", pic);
    }
    println!(
        "reports: direct={} indirect={}",
        emp.direct_reports_count, emp.indirect_reports_count
    );
    if chain.is_empty() {
        println!("managers: (none)");
    } else {
        let names = chain
            .iter()
            .map(|n| format!("{} ({})", n.name, n.id))
            .collect::<Vec<_>>();
        println!("managers: {}", names.join(" -> "));
    }
    for child in &reports {
        println!("  - {} ({})", child.name, child.id);
    }
    Ok(())
}

async fn handle_search_command(
    cfg: &OrgChartConfig,
    query: &str,
    ids: &[EmployeeId],
    json: bool,
) -> Result<()> {
    let mut session = open_session(cfg, None)?;
    let merged = session.preload_directory(ids).await;
    if merged == 0 && !ids.is_empty() {
        eprintln!("warning: no employees could be preloaded");
    }
    session.state_mut().set_search(query);

    let hits = session.state().search_results();
    if json {
        let hits = hits.iter().map(|n| n.shallow()).collect::<Vec<_>>();
        println!(
            "{}",
            serde_json::to_string_pretty(&hits).context("serialize search json")?
        );
    } else if hits.is_empty() {
        println!("No employees found");
    } else {
        for n in hits {
            println!("{} {}", n.id, n.name);
        }
    }
    Ok(())
}

/// Indented text rendering, one employee per line, in sibling order.
pub(crate) fn render_tree(root: &EmployeeNode) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!(
            "{} ({}) [{}/{}]",
            node.name, node.id, node.direct_reports_count, node.indirect_reports_count
        ));
        if let Some(rel) = &node.relationship {
            out.push_str(&format!(" {}", rel));
        }
        out.push('\n');
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/cli_exec/render_tests.rs"]
mod tests;
