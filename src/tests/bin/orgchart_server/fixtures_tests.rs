use super::*;
use serde_json::json;

fn sample() -> Value {
    json!({
        "employee_id": 1, "target": "Root",
        "children": [
            { "employee_id": 2, "target": "A", "children": [
                { "employee_id": 4, "target": "C", "children": [
                    { "employee_id": 5, "target": "D" }
                ]}
            ]},
            { "employee_id": 3, "target": "B" }
        ]
    })
}

#[test]
fn every_node_is_indexed() {
    let idx = index_fixture(&sample());
    let mut ids: Vec<i64> = idx.keys().copied().collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(idx[&4]["children"][0]["employee_id"], 5);
}

#[test]
fn later_tree_expands_an_earlier_reference() {
    let doc = json!([
        { "employee_id": 1, "target": "Root", "children": [ { "employee_id": 2, "target": "A" } ] },
        { "employee_id": 2, "target": "A", "children": [ { "employee_id": 1, "target": "Root" } ] }
    ]);
    let idx = index_fixture(&doc);
    assert_eq!(idx[&2]["children"][0]["employee_id"], 1);
    assert_eq!(idx[&1]["children"][0]["employee_id"], 2);
}

#[test]
fn truncate_cuts_below_depth() {
    let out = truncate(&sample(), 1);
    assert_eq!(out["children"][0]["employee_id"], 2);
    assert_eq!(out["children"][0]["children"], json!([]));
    // Nodes that never had children stay without the key.
    assert!(out["children"][1].get("children").is_none());

    let out = truncate(&sample(), 0);
    assert_eq!(out["children"], json!([]));

    let out = truncate(&sample(), 10);
    assert_eq!(out, sample());
}

#[test]
fn load_fixture_reads_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fixture.json");
    std::fs::write(&path, serde_json::to_vec(&sample())?)?;
    assert_eq!(load_fixture(&path)?.len(), 5);
    Ok(())
}
