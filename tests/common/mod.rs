use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde_json::{Value, json};

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[derive(Default)]
pub struct ServerOptions {
    pub depth: Option<usize>,
    pub fail_ids: Vec<i64>,
}

pub fn spawn_server(fixture: &Value, opts: ServerOptions) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;

    let token = "dev".to_string();

    let fixture_path = data_dir.path().join("fixture.json");
    std::fs::write(&fixture_path, serde_json::to_vec(fixture)?).context("write fixture")?;
    let addr_file = data_dir.path().join("addr.txt");

    let mut args = vec![
        "--addr".to_string(),
        "127.0.0.1:0".to_string(),
        "--addr-file".to_string(),
        addr_file.to_string_lossy().to_string(),
        "--fixture".to_string(),
        fixture_path.to_string_lossy().to_string(),
        "--token".to_string(),
        token.clone(),
    ];
    if let Some(depth) = opts.depth {
        args.push("--depth".to_string());
        args.push(depth.to_string());
    }
    if !opts.fail_ids.is_empty() {
        args.push("--fail-ids".to_string());
        args.push(
            opts.fail_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    let child = Command::new(env!("CARGO_BIN_EXE_orgchart-server"))
        .args(&args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn orgchart-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

#[allow(dead_code)]
pub fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    Ok(rt.block_on(fut))
}

/// Root 22 with 30 expanded inline (31, 32) and 29 referenced with an empty
/// `children` array; a second tree expands 29 into 40 and 41.
#[allow(dead_code)]
pub fn org_fixture() -> Value {
    json!([
        {
            "employee_id": 22, "target": "Dana Root", "pic": null,
            "direct_reports": 2, "indirect_reports": 4,
            "children": [
                { "employee_id": 30, "target": "Omar Lead", "pic": "https://img/30.png",
                  "relationship_id": "manager", "direct_reports": 2, "indirect_reports": 0,
                  "children": [
                    { "employee_id": 31, "target": "Ana One", "pic": null,
                      "direct_reports": 0, "indirect_reports": 0 },
                    { "employee_id": 32, "target": "Ben Two", "pic": null,
                      "direct_reports": 0, "indirect_reports": 0 }
                  ]
                },
                { "employee_id": 29, "target": "Zoe Lead", "pic": null,
                  "direct_reports": 2, "indirect_reports": 0, "children": [] }
            ]
        },
        {
            "employee_id": 29, "target": "Zoe Lead", "pic": null,
            "direct_reports": 2, "indirect_reports": 0,
            "children": [
                { "employee_id": 40, "target": "Cy Three", "pic": null,
                  "direct_reports": 0, "indirect_reports": 0, "children": [] },
                { "employee_id": 41, "target": "Di Four", "pic": null,
                  "direct_reports": 0, "indirect_reports": 0, "children": [] }
            ]
        }
    ])
}
