use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use orgchart::config::OrgChartConfig;

mod cli_exec;

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Browse an organizational hierarchy from the people-chart API", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the bearer token
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hierarchy under an employee
    Tree {
        /// Root employee id (defaults to `root_employee_id` from the config)
        id: Option<i64>,
        /// Fetch every level instead of the single slice the server returns
        #[arg(long)]
        full: bool,
        /// Maximum concurrent fetches for --full
        #[arg(long)]
        concurrency: Option<usize>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one employee's details and chain of command
    Show {
        id: i64,
        /// Chart root to resolve managers against (defaults to the config root, then `id`)
        #[arg(long)]
        root: Option<i64>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Search preloaded employees by name
    Search {
        query: String,
        /// Employees to preload (defaults to `preload_ids` from the config)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    orgchart::logging::init("warn")?;

    let mut cfg = OrgChartConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        cfg.base_url = url;
    }
    if let Some(token) = cli.token {
        cfg.token = Some(token);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(cli_exec::handle_command(cfg, cli.command))
}
