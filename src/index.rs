//! Id lookups over a finished tree.

use std::collections::HashMap;

use crate::model::{EmployeeId, EmployeeNode};

/// One tree node in pre-order position. `node` is a field-only copy; its
/// reports are the slots in `children`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct IndexSlot {
    node: EmployeeNode,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Flat pre-order table of one tree plus `by_id` over it. Always built from
/// scratch; when an id occurs more than once (dual reporting) the later
/// occurrence in pre-order wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyIndex {
    slots: Vec<IndexSlot>,
    by_id: HashMap<EmployeeId, usize>,
}

impl HierarchyIndex {
    pub fn build(root: &EmployeeNode) -> Self {
        let mut slots: Vec<IndexSlot> = Vec::new();
        let mut by_id = HashMap::new();

        // Children are pushed in reverse so they pop in source order.
        let mut stack: Vec<(&EmployeeNode, Option<usize>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let idx = slots.len();
            if let Some(p) = parent {
                slots[p].children.push(idx);
            }
            slots.push(IndexSlot {
                node: node.shallow(),
                parent,
                children: Vec::with_capacity(node.children.len()),
            });
            by_id.insert(node.id, idx);
            stack.extend(node.children.iter().rev().map(|c| (c, Some(idx))));
        }

        Self { slots, by_id }
    }

    fn slot(&self, id: EmployeeId) -> Option<&IndexSlot> {
        self.by_id.get(&id).map(|idx| &self.slots[*idx])
    }

    /// Field-only record for `id`; see [`HierarchyIndex::children_of`] for
    /// its reports.
    pub fn node(&self, id: EmployeeId) -> Option<&EmployeeNode> {
        self.slot(id).map(|s| &s.node)
    }

    /// `None` for unknown ids, `Some(None)` for the root.
    pub fn parent_of(&self, id: EmployeeId) -> Option<Option<EmployeeId>> {
        let slot = self.slot(id)?;
        Some(slot.parent.map(|p| self.slots[p].node.id))
    }

    /// Direct reports of `id` in source order. Empty for unknown ids.
    pub fn children_of(&self, id: EmployeeId) -> Vec<&EmployeeNode> {
        self.slot(id)
            .map(|s| s.children.iter().map(|c| &self.slots[*c].node).collect())
            .unwrap_or_default()
    }

    /// Ancestors of `id`, nearest first. Parent slots always precede their
    /// children, so the walk ends at the root.
    pub fn ancestors_of(&self, id: EmployeeId) -> Vec<&EmployeeNode> {
        let mut out = Vec::new();
        let mut current = self.by_id.get(&id).and_then(|idx| self.slots[*idx].parent);
        while let Some(idx) = current {
            let slot = &self.slots[idx];
            out.push(&slot.node);
            current = slot.parent;
        }
        out
    }

    /// Distinct indexed ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// A loaded tree together with its index. The only way to change the tree is
/// to build a new `OrgChart`, which rebuilds the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrgChart {
    root: EmployeeNode,
    index: HierarchyIndex,
}

impl OrgChart {
    pub fn new(root: EmployeeNode) -> Self {
        let index = HierarchyIndex::build(&root);
        Self { root, index }
    }

    pub fn root(&self) -> &EmployeeNode {
        &self.root
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    /// The employee's own fields. Reports come from [`OrgChart::children_of`].
    pub fn get(&self, id: EmployeeId) -> Option<&EmployeeNode> {
        self.index.node(id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.index.node(id).is_some()
    }

    pub fn parent_of(&self, id: EmployeeId) -> Option<&EmployeeNode> {
        let parent = self.index.parent_of(id)??;
        self.get(parent)
    }

    pub fn children_of(&self, id: EmployeeId) -> Vec<&EmployeeNode> {
        self.index.children_of(id)
    }

    /// Managers of `id`, nearest first, ending at the root. Empty for the
    /// root and for unknown ids.
    pub fn chain_of_command(&self, id: EmployeeId) -> Vec<&EmployeeNode> {
        self.index.ancestors_of(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn into_root(self) -> EmployeeNode {
        self.root
    }
}

#[cfg(test)]
#[path = "tests/index/index_tests.rs"]
mod tests;
