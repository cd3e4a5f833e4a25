use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Validated employee node. Only `crate::sanitize` builds these from
/// untrusted payloads; everything downstream trusts the field types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeNode {
    pub id: EmployeeId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub direct_reports_count: u64,
    #[serde(default)]
    pub indirect_reports_count: u64,

    #[serde(default)]
    pub children: Vec<EmployeeNode>,
}

impl EmployeeNode {
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: None,
            relationship: None,
            picture: None,
            direct_reports_count: 0,
            indirect_reports_count: 0,
            children: Vec::new(),
        }
    }

    /// Copy of this node with an empty `children` sequence.
    pub fn shallow(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            title: self.title.clone(),
            relationship: self.relationship.clone(),
            picture: self.picture.clone(),
            direct_reports_count: self.direct_reports_count,
            indirect_reports_count: self.indirect_reports_count,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Trees can be arbitrarily deep; the derived drop glue would recurse once per
// level.
impl Drop for EmployeeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// True when a card has nothing to show beyond a name: no name at all, or no
/// reports and no loaded children.
pub fn is_empty_employee(node: &EmployeeNode) -> bool {
    node.name.is_empty()
        || (node.direct_reports_count == 0
            && node.indirect_reports_count == 0
            && node.children.is_empty())
}
