//! Load orchestration on top of [`SessionState`].

use futures_util::stream::{self, StreamExt};

use crate::builder::{BuildOptions, build_full_tree};
use crate::cycles::remove_circular_references;
use crate::error::{LoadError, LoadResult};
use crate::model::{EmployeeId, EmployeeNode};
use crate::remote::SubtreeFetcher;
use crate::sanitize::sanitize;

mod state;
pub use self::state::SessionState;

/// Fetch one payload and run it through sanitization and cycle removal,
/// without expanding missing subtrees.
pub async fn fetch_sanitized<F: SubtreeFetcher>(
    fetcher: &F,
    id: EmployeeId,
) -> LoadResult<EmployeeNode> {
    let raw = fetcher.fetch_subtree(id).await?;
    let node = sanitize(raw.as_value()).ok_or(LoadError::InvalidPayload { id })?;
    Ok(remove_circular_references(node))
}

pub struct OrgChartSession<F> {
    fetcher: F,
    options: BuildOptions,
    state: SessionState,
}

impl<F: SubtreeFetcher> OrgChartSession<F> {
    pub fn new(fetcher: F, options: BuildOptions) -> Self {
        Self {
            fetcher,
            options,
            state: SessionState::new(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Load the single slice the server returns for `id`.
    pub async fn load_org_chart(&mut self, id: EmployeeId) -> LoadResult<()> {
        tracing::info!(%id, "loading org chart");
        self.state.begin_load();
        let result = fetch_sanitized(&self.fetcher, id).await;
        self.finish(id, result)
    }

    /// Load the fully expanded hierarchy for `id`, mirroring build progress
    /// into the state.
    pub async fn load_full_org_chart(&mut self, id: EmployeeId) -> LoadResult<()> {
        tracing::info!(%id, "loading full org chart");
        let state = &mut self.state;
        state.begin_load();
        let result = build_full_tree(&self.fetcher, id, &self.options, |progress| {
            state.set_loading_progress(progress.percent());
        })
        .await;
        self.finish(id, result)
    }

    fn finish(&mut self, id: EmployeeId, result: LoadResult<EmployeeNode>) -> LoadResult<()> {
        let outcome = match &result {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(%id, error = %err, "org chart load failed");
                Err(err.clone())
            }
        };
        self.state.complete_load(result);
        outcome
    }

    /// Fetch `ids` for the search directory. Failed entries are skipped and
    /// the call itself never fails; returns how many entries were merged.
    pub async fn preload_directory(&mut self, ids: &[EmployeeId]) -> usize {
        let limit = self.options.concurrency_limit.max(1);
        let fetcher = &self.fetcher;
        let results: Vec<(EmployeeId, LoadResult<EmployeeNode>)> = stream::iter(ids.iter().copied())
            .map(|id| async move { (id, fetch_sanitized(fetcher, id).await) })
            .buffered(limit)
            .collect()
            .await;

        let mut loaded = Vec::new();
        for (id, result) in results {
            match result {
                Ok(node) => loaded.push(node),
                Err(err) => tracing::warn!(%id, error = %err, "preload failed (continuing)"),
            }
        }
        if loaded.is_empty() && !ids.is_empty() {
            tracing::warn!(requested = ids.len(), "all preload requests failed");
        }

        let merged = loaded.len();
        self.state.merge_directory(loaded);
        merged
    }
}

#[cfg(test)]
#[path = "tests/session/session_tests.rs"]
mod tests;
