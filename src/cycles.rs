//! Path-local cycle removal.
//!
//! A node whose id already appears among its own ancestors keeps its fields
//! but loses its children. The same id in unrelated branches (dual
//! reporting) is left alone.

use std::collections::HashSet;

use crate::model::{EmployeeId, EmployeeNode, TreeArena};

pub fn remove_circular_references(node: EmployeeNode) -> EmployeeNode {
    remove_circular_references_from(node, &HashSet::new())
}

/// Like [`remove_circular_references`], treating `ancestors` as the ids
/// already on the path above `node`.
pub fn remove_circular_references_from(
    mut node: EmployeeNode,
    ancestors: &HashSet<EmployeeId>,
) -> EmployeeNode {
    if ancestors.contains(&node.id) {
        node.children.clear();
        return node;
    }

    let children = std::mem::take(&mut node.children);
    let mut path = ancestors.clone();
    path.insert(node.id);

    let mut arena = TreeArena::with_root(node);
    // Each frame owns the children of one arena slot plus the ancestor set
    // of that slot's path; descending copies the set.
    let mut stack: Vec<(usize, Vec<EmployeeNode>, HashSet<EmployeeId>)> =
        vec![(TreeArena::ROOT, children, path)];

    while let Some((parent, children, path)) = stack.pop() {
        for mut child in children {
            let grandchildren = std::mem::take(&mut child.children);
            let cyclic = path.contains(&child.id);
            let child_id = child.id;
            let idx = arena.push_child(parent, child);

            if cyclic {
                tracing::debug!(id = %child_id, "truncating cyclic subtree");
                continue;
            }
            if grandchildren.is_empty() {
                continue;
            }
            let mut next = path.clone();
            next.insert(child_id);
            stack.push((idx, grandchildren, next));
        }
    }

    arena.into_tree()
}

#[cfg(test)]
#[path = "tests/cycles/cycles_tests.rs"]
mod tests;
