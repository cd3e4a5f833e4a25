use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::middleware;
use axum::routing::get;
use clap::Parser;

use super::AppState;
use super::fixtures::load_fixture;
use super::handlers::{healthz, people_chart, require_bearer};

#[derive(Parser)]
#[command(name = "orgchart-server")]
#[command(about = "People-chart API stand-in (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// JSON fixture: one payload tree or an array of them
    #[arg(long)]
    fixture: PathBuf,

    /// Levels of children inlined per response
    #[arg(long, default_value_t = 1)]
    depth: usize,

    /// Employee ids that answer with HTTP 500
    #[arg(long, value_delimiter = ',')]
    fail_ids: Vec<i64>,

    /// Accepted bearer token
    #[arg(long, default_value = "dev")]
    token: String,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    orgchart::logging::init("info")?;

    let employees = load_fixture(&args.fixture)?;
    tracing::info!(employees = employees.len(), depth = args.depth, "fixture loaded");

    let state = Arc::new(AppState {
        token: args.token.clone(),
        depth: args.depth,
        employees,
        failing: args.fail_ids.iter().copied().collect::<HashSet<_>>(),
    });

    let authed = Router::new()
        .route("/relationship/people_chart/:id", get(people_chart))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));
    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(authed)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, "orgchart-server listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
