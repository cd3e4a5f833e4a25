//! Untrusted wire payloads as returned by the people-chart endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EmployeeId;

/// One employee and whatever slice of its subtree the server chose to inline.
///
/// The value is kept as decoded JSON: the envelope has been checked, the node
/// itself has not. `crate::sanitize` is the only place that turns it into an
/// [`super::EmployeeNode`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawNode(pub Value);

impl RawNode {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Best-effort id, using the same coercion as sanitization.
    pub fn id(&self) -> Option<EmployeeId> {
        crate::sanitize::node_id(&self.0)
    }

    /// The raw `children` array, if present and an array.
    pub fn children(&self) -> Option<&[Value]> {
        children_of(&self.0)
    }

    /// Children that were expanded inline by the server. Absent and empty
    /// arrays both mean "fetch separately".
    pub fn inline_children(&self) -> Option<&[Value]> {
        inline_children_of(&self.0)
    }
}

pub(crate) fn children_of(value: &Value) -> Option<&[Value]> {
    value.get("children")?.as_array().map(Vec::as_slice)
}

pub(crate) fn inline_children_of(value: &Value) -> Option<&[Value]> {
    children_of(value).filter(|c| !c.is_empty())
}

/// `{ "status": "OK", "tree": RawNode }`
#[derive(Debug, Deserialize)]
pub(crate) struct PeopleChartEnvelope {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) tree: Option<Value>,
}

pub(crate) const STATUS_OK: &str = "OK";
