use super::*;
use serde_json::json;

fn ids(node: &EmployeeNode) -> Vec<i64> {
    node.children.iter().map(|c| c.id.get()).collect()
}

#[test]
fn sanitize_maps_wire_fields() {
    let raw = json!({
        "employee_id": 22,
        "target": "  Ada Lovelace ",
        "pic": "https://img/ada.png",
        "relationship_id": "manager",
        "direct_reports": 2,
        "indirect_reports": 7,
        "children": []
    });
    let node = sanitize(&raw).expect("valid node");
    assert_eq!(node.id, EmployeeId(22));
    assert_eq!(node.name, "Ada Lovelace");
    assert_eq!(node.picture.as_deref(), Some("https://img/ada.png"));
    assert_eq!(node.relationship.as_deref(), Some("manager"));
    assert_eq!(node.title, None);
    assert_eq!(node.direct_reports_count, 2);
    assert_eq!(node.indirect_reports_count, 7);
    assert!(node.children.is_empty());
}

#[test]
fn sanitize_accepts_canonical_field_names() {
    let raw = json!({
        "id": "31",
        "name": "Grace",
        "title": " CTO ",
        "picture": null,
        "directReportsCount": "3",
        "indirectReportsCount": null
    });
    let node = sanitize(&raw).expect("valid node");
    assert_eq!(node.id, EmployeeId(31));
    assert_eq!(node.title.as_deref(), Some("CTO"));
    assert_eq!(node.picture, None);
    assert_eq!(node.direct_reports_count, 3);
    assert_eq!(node.indirect_reports_count, 0);
}

#[test]
fn sanitize_rejects_unusable_ids() {
    for id in [json!(0), json!(null), json!("abc"), json!(1.5), json!({})] {
        let raw = json!({ "employee_id": id, "target": "x" });
        assert!(sanitize(&raw).is_none(), "id {id} should be rejected");
    }
    assert!(sanitize(&json!({ "target": "no id" })).is_none());
    assert!(sanitize(&json!("not an object")).is_none());
    assert!(sanitize(&json!(null)).is_none());
}

#[test]
fn sanitize_uses_placeholder_for_missing_name() {
    let node = sanitize(&json!({ "employee_id": 5 })).expect("valid node");
    assert_eq!(node.name, UNKNOWN_EMPLOYEE);

    let node = sanitize(&json!({ "employee_id": 5, "target": "" })).expect("valid node");
    assert_eq!(node.name, UNKNOWN_EMPLOYEE);
}

#[test]
fn sanitize_rejects_whitespace_only_name() {
    assert!(sanitize(&json!({ "employee_id": 5, "target": "   " })).is_none());
}

#[test]
fn counts_coerce_nan_and_negative_to_zero() {
    let raw = json!({
        "employee_id": 1,
        "target": "a",
        "direct_reports": "lots",
        "indirect_reports": -4
    });
    let node = sanitize(&raw).expect("valid node");
    assert_eq!(node.direct_reports_count, 0);
    assert_eq!(node.indirect_reports_count, 0);

    assert_eq!(coerce_count(Some(&json!(4.9))), 4);
    assert_eq!(coerce_count(Some(&json!(true))), 1);
    assert_eq!(coerce_count(None), 0);
}

#[test]
fn optional_strings_are_stringified() {
    let raw = json!({
        "employee_id": 1,
        "target": "a",
        "relationship_id": 42,
        "title": false,
        "pic": ""
    });
    let node = sanitize(&raw).expect("valid node");
    assert_eq!(node.relationship.as_deref(), Some("42"));
    assert_eq!(node.title, None);
    assert_eq!(node.picture, None);
}

#[test]
fn invalid_children_are_filtered_not_propagated() {
    let raw = json!({
        "employee_id": 1,
        "target": "root",
        "children": [
            { "employee_id": 2, "target": "keep" },
            { "employee_id": 0, "target": "bad id" },
            "garbage",
            { "employee_id": 3, "target": "   " },
            { "employee_id": 4, "target": "also keep", "children": [
                { "target": "no id" },
                { "employee_id": 5, "target": "grandchild" }
            ]}
        ]
    });
    let node = sanitize(&raw).expect("root survives");
    assert_eq!(ids(&node), vec![2, 4]);
    assert_eq!(ids(&node.children[1]), vec![5]);
}

#[test]
fn non_array_children_become_empty() {
    let raw = json!({ "employee_id": 1, "target": "a", "children": { "employee_id": 2 } });
    let node = sanitize(&raw).expect("valid node");
    assert!(node.children.is_empty());
}

#[test]
fn sibling_order_is_preserved() {
    let raw = json!({
        "employee_id": 1,
        "target": "root",
        "children": [
            { "employee_id": 9, "target": "b", "children": [
                { "employee_id": 11, "target": "x" },
                { "employee_id": 10, "target": "y" }
            ]},
            { "employee_id": 3, "target": "a" },
            { "employee_id": 7, "target": "c" }
        ]
    });
    let node = sanitize(&raw).expect("valid node");
    assert_eq!(ids(&node), vec![9, 3, 7]);
    assert_eq!(ids(&node.children[0]), vec![11, 10]);
}

#[test]
fn deep_payload_does_not_overflow_the_stack() {
    let mut raw = json!({ "employee_id": 100_000, "target": "leaf" });
    for id in (1..100_000).rev() {
        raw = json!({ "employee_id": id, "target": "n", "children": [raw] });
    }
    let node = sanitize(&raw).expect("valid node");
    assert_eq!(node.node_count(), 100_000);
    drop(node);
    dismantle(raw);
}

#[test]
fn deep_chart_can_be_replaced() {
    let mut node = EmployeeNode::new(EmployeeId(200_000), "leaf");
    for id in (1..200_000).rev() {
        let mut parent = EmployeeNode::new(EmployeeId(id), "n");
        parent.children.push(node);
        node = parent;
    }
    assert_eq!(node.node_count(), 200_000);
    node = EmployeeNode::new(EmployeeId(1), "fresh");
    assert!(node.is_leaf());
}

// `serde_json::Value` drops recursively; flatten the payload first.
fn dismantle(value: Value) {
    let mut stack = vec![value];
    while let Some(mut v) = stack.pop() {
        if let Some(Value::Array(children)) = v.as_object_mut().and_then(|m| m.remove("children")) {
            stack.extend(children);
        }
    }
}

#[test]
fn sanitizing_a_sanitized_tree_is_stable() {
    let raw = json!({
        "employee_id": 1,
        "target": " root ",
        "pic": "p",
        "direct_reports": 1,
        "children": [{ "employee_id": 2, "target": "child", "relationship_id": "dotted" }]
    });
    let once = sanitize(&raw).expect("valid node");
    let again = sanitize(&serde_json::to_value(&once).expect("serialize")).expect("valid node");
    assert_eq!(once, again);
}

#[test]
fn validate_org_chart_data_checks_root_only() {
    assert!(validate_org_chart_data(&json!({ "employee_id": 1, "target": "a" })));
    assert!(!validate_org_chart_data(&json!({ "employee_id": 0, "target": "a" })));
}
