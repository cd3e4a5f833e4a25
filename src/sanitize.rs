//! Validation and sanitization of people-chart payloads.
//!
//! This is the only gate between decoded JSON and [`EmployeeNode`]: nothing
//! downstream re-checks field types. Invalid nodes are rejected (`None`);
//! invalid children are dropped from their parent instead of failing it.

use serde_json::Value;

use crate::model::{EmployeeId, EmployeeNode, TreeArena, children_of};

mod coerce;
pub use self::coerce::{coerce_count, coerce_id, coerce_optional_string};
use self::coerce::{is_falsy, stringify_scalar};

/// Display name used when a payload carries no usable name.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

// Wire names come first; canonical names let already-mapped nodes through.
const ID_KEYS: &[&str] = &["employee_id", "id"];
const NAME_KEYS: &[&str] = &["target", "name"];
const PICTURE_KEYS: &[&str] = &["pic", "picture"];
const RELATIONSHIP_KEYS: &[&str] = &["relationship_id", "relationship"];
const TITLE_KEYS: &[&str] = &["title"];
const DIRECT_KEYS: &[&str] = &["direct_reports", "directReportsCount"];
const INDIRECT_KEYS: &[&str] = &["indirect_reports", "indirectReportsCount"];

fn field<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

pub(crate) fn node_id(raw: &Value) -> Option<EmployeeId> {
    if !raw.is_object() {
        return None;
    }
    coerce_id(field(raw, ID_KEYS))
}

fn node_name(raw: &Value) -> Option<String> {
    let name = match field(raw, NAME_KEYS) {
        Some(v) if !is_falsy(v) => {
            stringify_scalar(v).unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string())
        }
        _ => UNKNOWN_EMPLOYEE.to_string(),
    };
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Sanitize one node's own fields. `children` is left empty.
pub fn sanitize_shallow(raw: &Value) -> Option<EmployeeNode> {
    let id = node_id(raw)?;
    let name = node_name(raw)?;

    Some(EmployeeNode {
        id,
        name,
        title: coerce_optional_string(field(raw, TITLE_KEYS)).map(|t| t.trim().to_string()),
        relationship: coerce_optional_string(field(raw, RELATIONSHIP_KEYS)),
        picture: coerce_optional_string(field(raw, PICTURE_KEYS)),
        direct_reports_count: coerce_count(field(raw, DIRECT_KEYS)),
        indirect_reports_count: coerce_count(field(raw, INDIRECT_KEYS)),
        children: Vec::new(),
    })
}

/// Sanitize a whole payload tree. Returns `None` only when the root itself is
/// unusable.
pub fn sanitize(raw: &Value) -> Option<EmployeeNode> {
    let root = sanitize_shallow(raw)?;
    let mut arena = TreeArena::with_root(root);
    let mut stack: Vec<(usize, &Value)> = vec![(TreeArena::ROOT, raw)];

    while let Some((slot, value)) = stack.pop() {
        let Some(children) = children_of(value) else {
            continue;
        };
        for child in children {
            match sanitize_shallow(child) {
                Some(node) => {
                    let idx = arena.push_child(slot, node);
                    stack.push((idx, child));
                }
                None => {
                    tracing::debug!(parent = %arena.node(slot).id, "dropping invalid child payload");
                }
            }
        }
    }

    Some(arena.into_tree())
}

/// Whether a payload would survive [`sanitize`].
pub fn validate_org_chart_data(raw: &Value) -> bool {
    sanitize_shallow(raw).is_some()
}

#[cfg(test)]
#[path = "tests/sanitize/sanitize_tests.rs"]
mod tests;
