//! Fully expanded hierarchy builds.
//!
//! The upstream API returns variable-depth slices per call. Inline children
//! are reused as-is; children that arrive without their own children get one
//! fetch each, admitted through a [`ConcurrencyLimiter`]. All fetches are
//! multiplexed on the calling task; tree walking between them is synchronous.

use std::collections::HashSet;

use futures_util::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;

use crate::cycles::remove_circular_references;
use crate::error::{LoadError, LoadResult, TransportError};
use crate::model::{EmployeeId, EmployeeNode, RawNode, TreeArena, children_of, inline_children_of};
use crate::remote::SubtreeFetcher;
use crate::sanitize::sanitize_shallow;

mod limiter;
mod progress;
pub use self::limiter::{ConcurrencyLimiter, DEFAULT_CONCURRENCY_LIMIT};
pub use self::progress::BuildProgress;

#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub concurrency_limit: usize,

    /// Shared limiter. When set, `concurrency_limit` is ignored and this
    /// build competes for permits with every other holder of the limiter.
    pub limiter: Option<ConcurrencyLimiter>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            limiter: None,
        }
    }
}

impl BuildOptions {
    pub fn with_concurrency_limit(limit: usize) -> Self {
        Self {
            concurrency_limit: limit,
            limiter: None,
        }
    }

    pub fn with_limiter(limiter: ConcurrencyLimiter) -> Self {
        Self {
            concurrency_limit: limiter.limit(),
            limiter: Some(limiter),
        }
    }
}

/// A child whose subtree still has to be fetched. Its arena slot already
/// holds the shallow reference node, which stays if the fetch fails.
#[derive(Debug)]
struct FetchJob {
    slot: usize,
    id: EmployeeId,
    path: HashSet<EmployeeId>,
}

struct Expansion<P> {
    arena: TreeArena,
    progress: BuildProgress,
    on_progress: P,
}

impl<P: FnMut(BuildProgress)> Expansion<P> {
    fn report(&mut self) {
        (self.on_progress)(self.progress);
    }

    /// Attach the children of `raw` under `slot`, descending through inline
    /// children and returning the fetches that are still needed.
    fn expand(&mut self, slot: usize, raw: &Value, path: HashSet<EmployeeId>) -> Vec<FetchJob> {
        let mut jobs = Vec::new();
        let mut stack: Vec<(usize, &Value, HashSet<EmployeeId>)> = vec![(slot, raw, path)];

        while let Some((parent, value, path)) = stack.pop() {
            let Some(children) = children_of(value) else {
                continue;
            };
            for child in children {
                let Some(node) = sanitize_shallow(child) else {
                    tracing::debug!(parent = %self.arena.node(parent).id, "dropping invalid child reference");
                    continue;
                };
                let id = node.id;
                let idx = self.arena.push_child(parent, node);

                if path.contains(&id) {
                    tracing::debug!(%id, "cycle in people chart; keeping shallow node");
                    continue;
                }
                let mut child_path = path.clone();
                child_path.insert(id);

                if inline_children_of(child).is_some() {
                    stack.push((idx, child, child_path));
                } else {
                    self.progress.total += 1;
                    jobs.push(FetchJob {
                        slot: idx,
                        id,
                        path: child_path,
                    });
                }
            }
        }

        jobs
    }

    /// Apply a settled fetch, then report once with the fetches it
    /// uncovered already counted. Failures and unusable payloads leave the
    /// shallow reference node in place.
    fn settle(&mut self, job: FetchJob, result: Result<RawNode, TransportError>) -> Vec<FetchJob> {
        self.progress.completed += 1;
        let jobs = self.apply(job, result);
        self.report();
        jobs
    }

    fn apply(&mut self, job: FetchJob, result: Result<RawNode, TransportError>) -> Vec<FetchJob> {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(id = %job.id, error = %err, "subtree fetch failed; keeping shallow node");
                return Vec::new();
            }
        };
        let Some(node) = sanitize_shallow(raw.as_value()) else {
            tracing::warn!(id = %job.id, "fetched subtree failed validation; keeping shallow node");
            return Vec::new();
        };

        // The server may answer with a different employee than requested.
        let mut path = job.path;
        path.insert(node.id);
        self.arena.replace(job.slot, node);
        self.expand(job.slot, raw.as_value(), path)
    }
}

async fn run_job<F: SubtreeFetcher>(
    fetcher: &F,
    limiter: &ConcurrencyLimiter,
    job: FetchJob,
) -> (FetchJob, Result<RawNode, TransportError>) {
    let _permit = limiter.admit().await;
    let result = fetcher.fetch_subtree(job.id).await;
    (job, result)
}

/// Build the fully expanded hierarchy rooted at `root_id`.
///
/// Only the root fetch and root validation can fail the build; descendants
/// degrade to shallow nodes. `on_progress` sees `completed` never decrease;
/// `completed == total` is reached only when nothing is left in flight, and
/// the last call always has it.
pub async fn build_full_tree<F, P>(
    fetcher: &F,
    root_id: EmployeeId,
    options: &BuildOptions,
    on_progress: P,
) -> LoadResult<EmployeeNode>
where
    F: SubtreeFetcher,
    P: FnMut(BuildProgress),
{
    let limiter = options
        .limiter
        .clone()
        .unwrap_or_else(|| ConcurrencyLimiter::new(options.concurrency_limit));

    tracing::info!(%root_id, limit = limiter.limit(), "building full people chart");

    // The root is the entry point and bypasses the limiter.
    let root_result = fetcher.fetch_subtree(root_id).await;
    let root_raw = root_result?;
    let root = sanitize_shallow(root_raw.as_value()).ok_or(LoadError::InvalidPayload { id: root_id })?;

    let mut build = Expansion {
        progress: BuildProgress {
            completed: 1,
            total: 1,
        },
        arena: TreeArena::with_root(root),
        on_progress,
    };

    let root_path: HashSet<EmployeeId> = [root_id, build.arena.node(TreeArena::ROOT).id]
        .into_iter()
        .collect();
    let mut in_flight = FuturesUnordered::new();
    for job in build.expand(TreeArena::ROOT, root_raw.as_value(), root_path) {
        in_flight.push(run_job(fetcher, &limiter, job));
    }
    drop(root_raw);
    // First report only once the first level of fetches is counted.
    build.report();

    while let Some((job, result)) = in_flight.next().await {
        for next in build.settle(job, result) {
            in_flight.push(run_job(fetcher, &limiter, next));
        }
    }

    build.report();
    let Expansion {
        arena, progress, ..
    } = build;
    let nodes = arena.len();
    let tree = remove_circular_references(arena.into_tree());
    tracing::info!(
        %root_id,
        nodes,
        requests = progress.total,
        "people chart build complete"
    );
    Ok(tree)
}

#[cfg(test)]
#[path = "tests/builder/builder_tests.rs"]
mod tests;
