use super::*;

#[test]
fn render_tree_indents_in_sibling_order() {
    let mut root = EmployeeNode::new(EmployeeId(1), "Root");
    root.direct_reports_count = 2;
    root.indirect_reports_count = 3;
    let mut b = EmployeeNode::new(EmployeeId(3), "B");
    b.relationship = Some("dotted".to_string());
    b.children.push(EmployeeNode::new(EmployeeId(4), "C"));
    root.children.push(EmployeeNode::new(EmployeeId(2), "A"));
    root.children.push(b);

    assert_eq!(
        render_tree(&root),
        "Root (1) [2/3]\n  A (2) [0/0]\n  B (3) [0/0] dotted\n    C (4) [0/0]\n"
    );
}
