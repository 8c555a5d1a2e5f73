use crate::projection::StyleRange;

/// Who produced a style range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Added by a formatting pass; removed by the next one.
    Markdown,
    /// Owned by the caller, such as spell-check or mention highlighting.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedStyle {
    pub origin: Origin,
    pub style: StyleRange,
}

/// A caller-owned buffer with its style ranges, formatted in place by
/// [`Formatter::edit_in_place`](super::Formatter::edit_in_place).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    styles: Vec<TaggedStyle>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[TaggedStyle] {
        &self.styles
    }

    pub fn push(&mut self, origin: Origin, style: StyleRange) {
        self.styles.push(TaggedStyle { origin, style });
    }

    /// Drops every range a previous formatting pass added.
    pub fn clear_markdown(&mut self) {
        self.styles.retain(|t| t.origin != Origin::Markdown);
    }

    pub(crate) fn take_styles(&mut self) -> Vec<TaggedStyle> {
        std::mem::take(&mut self.styles)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn into_parts(self) -> (String, Vec<TaggedStyle>) {
        (self.text, self.styles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::Span;
    use crate::projection::StyleKind;

    #[test]
    fn clear_keeps_external_ranges() {
        let mut styled = StyledText::new("abc");
        styled.push(Origin::External, StyleRange::inline(StyleKind::Italic, Span::new(0, 1)));
        styled.push(Origin::Markdown, StyleRange::inline(StyleKind::Bold, Span::new(1, 2)));
        styled.clear_markdown();
        assert_eq!(styled.styles().len(), 1);
        assert_eq!(styled.styles()[0].origin, Origin::External);
    }
}
