use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_CONCURRENCY_LIMIT;
use crate::model::EmployeeId;

pub const ENV_BASE_URL: &str = "ORG_CHART_BASE_URL";
pub const ENV_TOKEN: &str = "ORG_CHART_TOKEN";
pub const ENV_PRELOAD_IDS: &str = "ORG_CHART_PRELOAD_IDS";

pub const DEFAULT_BASE_URL: &str = "https://worksync.global/api";
pub const DEFAULT_PRELOAD_IDS: &[i64] = &[18, 21, 22, 23, 25, 29, 30];
pub const DEFAULT_ROOT_EMPLOYEE_ID: i64 = 22;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgChartConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token. Usually supplied through `ORG_CHART_TOKEN` rather than
    /// written to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,

    /// Per-request timeout applied by the HTTP fetcher.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Employees fetched up front to populate the search directory.
    #[serde(default = "default_preload_ids")]
    pub preload_ids: Vec<EmployeeId>,

    /// Chart root when a command names none. `null` disables the fallback.
    #[serde(default = "default_root_employee_id")]
    pub root_employee_id: Option<EmployeeId>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_concurrency_limit() -> usize {
    DEFAULT_CONCURRENCY_LIMIT
}

fn default_preload_ids() -> Vec<EmployeeId> {
    DEFAULT_PRELOAD_IDS.iter().copied().map(EmployeeId).collect()
}

fn default_root_employee_id() -> Option<EmployeeId> {
    Some(EmployeeId(DEFAULT_ROOT_EMPLOYEE_ID))
}

/// Comma-separated ids; entries that are not integers are skipped.
pub fn parse_id_list(raw: &str) -> Vec<EmployeeId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .map(EmployeeId)
        .collect()
}

impl Default for OrgChartConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            concurrency_limit: default_concurrency_limit(),
            request_timeout_secs: None,
            preload_ids: default_preload_ids(),
            root_employee_id: default_root_employee_id(),
        }
    }
}

impl OrgChartConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse config {}", path.display()))
    }

    /// Config file (if any) with environment overrides applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token);
        }
        if let Some(ids) = lookup(ENV_PRELOAD_IDS).filter(|v| !v.trim().is_empty()) {
            self.preload_ids = parse_id_list(&ids);
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[path = "tests/config/config_tests.rs"]
mod tests;
