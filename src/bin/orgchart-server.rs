use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

#[path = "orgchart_server/fixtures.rs"]
mod fixtures;
use self::fixtures::*;
#[path = "orgchart_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "orgchart_server/handlers.rs"]
mod handlers;
use self::handlers::*;
#[path = "orgchart_server/runtime.rs"]
mod runtime;

struct AppState {
    token: String,

    /// Levels of children returned below the requested employee.
    depth: usize,

    employees: HashMap<i64, Value>,

    /// Ids that answer with a 500 to exercise degraded builds.
    failing: HashSet<i64>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
