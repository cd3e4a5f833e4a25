//! Fixture loading for the development server.
//!
//! A fixture file holds one payload tree or an array of them. Every node in
//! every tree becomes fetchable by id. A node that appears several times is
//! served from its first occurrence that carries children, so a later tree
//! can expand an employee that an earlier tree only referenced.

use std::path::Path as FsPath;

use anyhow::{Context, Result};

use super::*;

const ID_KEYS: &[&str] = &["employee_id", "id"];

fn payload_id(v: &Value) -> Option<i64> {
    ID_KEYS.iter().find_map(|k| v.get(*k)?.as_i64())
}

fn has_children(v: &Value) -> bool {
    v.get("children")
        .and_then(Value::as_array)
        .is_some_and(|c| !c.is_empty())
}

pub(super) fn index_fixture(doc: &Value) -> HashMap<i64, Value> {
    let roots: Vec<&Value> = match doc {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut out: HashMap<i64, Value> = HashMap::new();
    let mut stack: Vec<&Value> = roots.into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if let Some(id) = payload_id(node) {
            let replace = match out.get(&id) {
                None => true,
                Some(existing) => !has_children(existing) && has_children(node),
            };
            if replace {
                out.insert(id, node.clone());
            }
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            stack.extend(children.iter().rev());
        }
    }
    out
}

pub(super) fn load_fixture(path: &FsPath) -> Result<HashMap<i64, Value>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read fixture {}", path.display()))?;
    let doc: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse fixture {}", path.display()))?;
    Ok(index_fixture(&doc))
}

/// Copy of `node` with at most `depth` levels of children. Nodes at the cut
/// keep an empty `children` array, the way the upstream API signals "fetch me
/// separately".
pub(super) fn truncate(node: &Value, depth: usize) -> Value {
    let mut out = node.clone();
    let mut stack: Vec<(&mut Value, usize)> = vec![(&mut out, 0)];
    while let Some((v, level)) = stack.pop() {
        let Some(children) = v.get_mut("children").and_then(Value::as_array_mut) else {
            continue;
        };
        if level >= depth {
            children.clear();
            continue;
        }
        for child in children.iter_mut() {
            stack.push((child, level + 1));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/bin/orgchart_server/fixtures_tests.rs"]
mod tests;
