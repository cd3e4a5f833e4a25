use super::*;
use serde_json::json;

fn body(v: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&v).expect("serialize")
}

#[test]
fn ok_envelope_yields_tree() {
    let raw = decode_people_chart(
        EmployeeId(22),
        &body(json!({ "status": "OK", "tree": { "employee_id": 22, "target": "a" } })),
    )
    .expect("decode");
    assert_eq!(raw.id(), Some(EmployeeId(22)));
    assert!(raw.inline_children().is_none());
}

#[test]
fn non_ok_status_is_a_transport_error() {
    let err = decode_people_chart(
        EmployeeId(1),
        &body(json!({ "status": "ERROR", "tree": { "employee_id": 1 } })),
    )
    .expect_err("should fail");
    assert!(matches!(err, TransportError::Envelope { .. }));
    assert!(err.to_string().contains("ERROR"));
}

#[test]
fn missing_tree_is_a_transport_error() {
    let err = decode_people_chart(EmployeeId(1), &body(json!({ "status": "OK" })))
        .expect_err("should fail");
    assert_eq!(err, TransportError::envelope(EmployeeId(1), "missing tree"));

    let err = decode_people_chart(EmployeeId(1), &body(json!({ "status": "OK", "tree": null })))
        .expect_err("should fail");
    assert_eq!(err, TransportError::envelope(EmployeeId(1), "missing tree"));
}

#[test]
fn non_json_body_is_a_transport_error() {
    let err = decode_people_chart(EmployeeId(3), b"<html>bad gateway</html>").expect_err("fail");
    assert!(matches!(err, TransportError::Envelope { id, .. } if id == EmployeeId(3)));
}

#[test]
fn tree_validation_is_left_to_sanitize() {
    // An invalid node still passes the envelope check.
    let raw = decode_people_chart(
        EmployeeId(4),
        &body(json!({ "status": "OK", "tree": { "employee_id": 0 } })),
    )
    .expect("envelope ok");
    assert_eq!(raw.id(), None);
}
