use super::rope::{LineOffsets, Span};

/// A parser-native position: one physical line's share of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub line: usize,
    /// Byte column relative to the line start.
    pub column: usize,
    pub length: usize,
}

impl SourceSpan {
    /// Absolute byte range of this span in the buffer `offsets` describes.
    pub fn to_span(self, offsets: &LineOffsets) -> Span {
        let start = offsets.line_column_to_offset(self.line, self.column);
        let end = offsets.line_column_to_offset(self.line, self.column + self.length);
        Span::new(start, end)
    }
}

/// The closed set of node kinds the projector understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading { level: u8 },
    BlockQuote,
    BulletList,
    OrderedList { start: u64 },
    ListItem,
    FencedCode { info: String },
    IndentedCode,
    ThematicBreak,
    HtmlBlock,
    Emphasis,
    Strong,
    Strikethrough,
    InlineCode,
    Link,
    Image,
    Text,
    SoftBreak,
    HardBreak,
    /// Anything the grammar produces that this dialect ignores.
    Other,
}

impl NodeKind {
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Paragraph
                | NodeKind::Heading { .. }
                | NodeKind::BlockQuote
                | NodeKind::BulletList
                | NodeKind::OrderedList { .. }
                | NodeKind::ListItem
                | NodeKind::FencedCode { .. }
                | NodeKind::IndentedCode
                | NodeKind::ThematicBreak
                | NodeKind::HtmlBlock
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, NodeKind::BulletList | NodeKind::OrderedList { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte range the grammar reported for the whole node.
    pub range: Span,
    /// One entry per physical line the node occupies, separators excluded.
    pub spans: Vec<SourceSpan>,
    pub children: Vec<Node>,
}

impl Node {
    /// Sum of the lengths of all source spans.
    pub fn total_len(&self) -> usize {
        self.spans.iter().map(|s| s.length).sum()
    }

    pub fn first_span(&self) -> Option<SourceSpan> {
        self.spans.first().copied()
    }

    pub fn last_span(&self) -> Option<SourceSpan> {
        self.spans.last().copied()
    }

    /// Depth-first walk over this node and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// A parsed message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub root: Node,
    /// Deepest nesting seen while building, root included.
    pub depth: usize,
}
