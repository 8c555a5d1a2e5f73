use crate::parsing::ast::{Ast, Node};
use crate::parsing::rope::LineOffsets;

pub fn check(text: &str, ast: &Ast) {
    let offsets = LineOffsets::build(text);
    check_node(text, &offsets, &ast.root);
}

fn check_node(text: &str, offsets: &LineOffsets, node: &Node) {
    let n = text.len();
    assert!(
        node.range.start <= node.range.end && node.range.end <= n,
        "node range out of bounds: {:?} {:?} (len: {})",
        node.kind,
        node.range,
        n
    );
    assert!(!node.spans.is_empty(), "node without spans: {:?}", node.kind);
    for sp in &node.spans {
        let abs = sp.to_span(offsets);
        assert!(
            abs.end <= offsets.line_end(sp.line),
            "span crosses a line separator: {:?} in {:?}",
            sp,
            node.kind
        );
        assert!(
            text.is_char_boundary(abs.start) && text.is_char_boundary(abs.end),
            "span off a char boundary: {:?}",
            sp
        );
    }
    for child in &node.children {
        assert!(
            child.range.start >= node.range.start && child.range.end <= node.range.end,
            "child {:?} {:?} escapes parent {:?} {:?}",
            child.kind,
            child.range,
            node.kind,
            node.range
        );
        check_node(text, offsets, child);
    }
}
