use crate::error::TransportError;
use crate::model::{EmployeeId, PeopleChartEnvelope, RawNode, STATUS_OK};

/// Decode a `{ "status": "OK", "tree": {...} }` body. Anything else is a
/// transport failure; the tree itself is not validated here.
pub fn decode_people_chart(id: EmployeeId, body: &[u8]) -> Result<RawNode, TransportError> {
    let envelope: PeopleChartEnvelope = serde_json::from_slice(body)
        .map_err(|err| TransportError::envelope(id, format!("parse body: {}", err)))?;

    match envelope.status.as_deref() {
        Some(STATUS_OK) => {}
        Some(other) => {
            return Err(TransportError::envelope(
                id,
                format!("unexpected status {:?}", other),
            ));
        }
        None => return Err(TransportError::envelope(id, "missing status")),
    }

    match envelope.tree {
        Some(tree) if tree.is_object() => Ok(RawNode::new(tree)),
        Some(_) => Err(TransportError::envelope(id, "tree is not an object")),
        None => Err(TransportError::envelope(id, "missing tree")),
    }
}

#[cfg(test)]
#[path = "../tests/remote/envelope_tests.rs"]
mod tests;
