use std::collections::{BTreeMap, HashSet};

use crate::error::LoadResult;
use crate::index::OrgChart;
use crate::model::{EmployeeId, EmployeeNode};

/// Everything the UI reads. Mutated only through the transition methods.
///
/// The chart is replaced wholesale on each successful load and left alone on
/// failure. Directory entries accumulate across preloads and are never
/// cleared.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    chart: Option<OrgChart>,
    directory: BTreeMap<EmployeeId, EmployeeNode>,
    expanded: HashSet<EmployeeId>,
    selected_id: Option<EmployeeId>,
    search: String,
    loading: bool,
    error: Option<String>,
    loading_progress: u8,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
        self.loading_progress = 0;
    }

    pub fn complete_load(&mut self, result: LoadResult<EmployeeNode>) {
        self.loading = false;
        match result {
            Ok(root) => {
                self.expanded.insert(root.id);
                self.chart = Some(OrgChart::new(root));
                self.error = None;
                self.loading_progress = 100;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn select(&mut self, id: Option<EmployeeId>) {
        self.selected_id = id;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_loading_progress(&mut self, percent: u8) {
        self.loading_progress = percent.min(100);
    }

    /// Flip a node's expanded flag and return the new value.
    pub fn toggle_expand(&mut self, id: EmployeeId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn merge_directory(&mut self, nodes: impl IntoIterator<Item = EmployeeNode>) {
        for node in nodes {
            self.directory.insert(node.id, node);
        }
    }

    pub fn chart(&self) -> Option<&OrgChart> {
        self.chart.as_ref()
    }

    pub fn root(&self) -> Option<&EmployeeNode> {
        self.chart.as_ref().map(OrgChart::root)
    }

    pub fn directory(&self) -> &BTreeMap<EmployeeId, EmployeeNode> {
        &self.directory
    }

    pub fn is_expanded(&self, id: EmployeeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn selected_id(&self) -> Option<EmployeeId> {
        self.selected_id
    }

    /// The selected employee as found in the current chart.
    pub fn selected_employee(&self) -> Option<&EmployeeNode> {
        let id = self.selected_id?;
        self.chart.as_ref()?.get(id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading_progress(&self) -> u8 {
        self.loading_progress
    }

    /// Directory entries whose name contains the search text, ignoring case.
    /// Blank searches match nothing.
    pub fn search_results(&self) -> Vec<&EmployeeNode> {
        if self.search.trim().is_empty() {
            return Vec::new();
        }
        let query = self.search.to_lowercase();
        self.directory
            .values()
            .filter(|node| node.name.to_lowercase().contains(&query))
            .collect()
    }
}
