//! Index arena used to assemble trees without call recursion.
//!
//! Slots are appended parent-first, so every child index is greater than its
//! parent's. Assembly walks the slots backwards and moves finished subtrees
//! into their parents, keeping sibling order equal to insertion order.

use super::EmployeeNode;

#[derive(Debug)]
struct Slot {
    node: EmployeeNode,
    children: Vec<usize>,
}

impl Slot {
    fn new(mut node: EmployeeNode) -> Self {
        node.children.clear();
        Self {
            node,
            children: Vec::new(),
        }
    }
}

/// Slot `ROOT` is the root; descendants live in `rest` at `index - 1`.
#[derive(Debug)]
pub(crate) struct TreeArena {
    root: Slot,
    rest: Vec<Slot>,
}

impl TreeArena {
    pub(crate) const ROOT: usize = 0;

    pub(crate) fn with_root(root: EmployeeNode) -> Self {
        Self {
            root: Slot::new(root),
            rest: Vec::new(),
        }
    }

    fn slot(&self, idx: usize) -> &Slot {
        if idx == Self::ROOT {
            &self.root
        } else {
            &self.rest[idx - 1]
        }
    }

    fn slot_mut(&mut self, idx: usize) -> &mut Slot {
        if idx == Self::ROOT {
            &mut self.root
        } else {
            &mut self.rest[idx - 1]
        }
    }

    pub(crate) fn push_child(&mut self, parent: usize, node: EmployeeNode) -> usize {
        self.rest.push(Slot::new(node));
        let idx = self.rest.len();
        self.slot_mut(parent).children.push(idx);
        idx
    }

    pub(crate) fn node(&self, idx: usize) -> &EmployeeNode {
        &self.slot(idx).node
    }

    /// Replace the fields of an existing slot, keeping its position and any
    /// children already attached.
    pub(crate) fn replace(&mut self, idx: usize, node: EmployeeNode) {
        let slot = self.slot_mut(idx);
        slot.node = node;
        slot.node.children.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.rest.len() + 1
    }

    pub(crate) fn into_tree(self) -> EmployeeNode {
        let TreeArena { root, mut rest } = self;

        let mut done: Vec<Option<EmployeeNode>> = Vec::new();
        done.resize_with(rest.len() + 1, || None);

        while let Some(slot) = rest.pop() {
            let idx = rest.len() + 1;
            done[idx] = Some(attach(slot, &mut done));
        }
        attach(root, &mut done)
    }
}

fn attach(slot: Slot, done: &mut [Option<EmployeeNode>]) -> EmployeeNode {
    let mut node = slot.node;
    node.children = slot
        .children
        .iter()
        .filter_map(|c| done[*c].take())
        .collect();
    node
}
