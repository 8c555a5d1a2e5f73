use std::fmt::Write;

use crate::parsing::ast::{Ast, Node};
use crate::parsing::rope::{LineOffsets, preview};

#[derive(Debug)]
pub struct Snap {
    pub kind: String,
    pub spans: Vec<(usize, usize, usize)>,
    pub text: String,
    pub children: Vec<Snap>,
}

pub fn normalize(text: &str, ast: &Ast) -> Snap {
    let offsets = LineOffsets::build(text);
    snap_node(text, &offsets, &ast.root)
}

fn snap_node(text: &str, offsets: &LineOffsets, node: &Node) -> Snap {
    Snap {
        kind: format!("{:?}", node.kind),
        spans: node
            .spans
            .iter()
            .map(|s| (s.line, s.column, s.length))
            .collect(),
        text: node
            .first_span()
            .map(|s| preview(text, s.to_span(offsets), 40))
            .unwrap_or_default(),
        children: node
            .children
            .iter()
            .map(|c| snap_node(text, offsets, c))
            .collect(),
    }
}

/// One line per node: kind, `line:column+length` spans, first-span preview.
pub fn outline(text: &str, ast: &Ast) -> String {
    let mut out = String::new();
    write_snap(&mut out, &normalize(text, ast), 0);
    out
}

fn write_snap(out: &mut String, snap: &Snap, depth: usize) {
    let spans = snap
        .spans
        .iter()
        .map(|(l, c, n)| format!("{l}:{c}+{n}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        "{}{} [{}] {:?}",
        "  ".repeat(depth),
        snap.kind,
        spans,
        snap.text
    );
    for child in &snap.children {
        write_snap(out, child, depth + 1);
    }
}
