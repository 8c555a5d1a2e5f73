//! Render-mode structural rewrite and delimiter removal.
//!
//! Each step reads one version of an [`EditBuffer`], applies its edits as a
//! single patch and reads positions back through tracked span handles, so
//! nothing computed against an earlier version is reused.

use std::collections::BTreeMap;

use crate::editing::buffer::{EditBuffer, SpanId};
use crate::editing::patch::{Patch, Splice};
use crate::parsing::rope::{LineOffsets, Span};
use crate::projection::{Projection, StyleKind, StyleRange};

use super::options::FormatOptions;

/// A projected construct whose spans live in an [`EditBuffer`].
#[derive(Debug)]
pub struct TrackedEntry {
    pub kind: StyleKind,
    pub inline: bool,
    pub span: SpanId,
    pub delimiters: Vec<SpanId>,
    pub separator: Option<SpanId>,
}

pub fn track_projection(buffer: &mut EditBuffer, projection: &Projection) -> Vec<TrackedEntry> {
    projection
        .entries
        .iter()
        .map(|e| TrackedEntry {
            kind: e.style.kind.clone(),
            inline: e.style.inline,
            span: buffer.track(e.style.span),
            delimiters: e.delimiters.iter().map(|d| buffer.track(*d)).collect(),
            separator: e.separator.map(|s| buffer.track(s)),
        })
        .collect()
}

/// Replaces list markers with glyphs and collapses blank lines around lists
/// and quotes.
///
/// Every position is read against one snapshot of the buffer and the edits
/// go in as a single patch. A blank line claimed by two neighbours is
/// removed once.
pub fn rewrite_blocks(
    buffer: &mut EditBuffer,
    entries: &mut [TrackedEntry],
    options: &FormatOptions,
) {
    let text = buffer.text();
    let offsets = LineOffsets::build(&text);
    let mut collapse = Collapse {
        text: &text,
        offsets: &offsets,
        claims: BTreeMap::new(),
    };
    let mut splices = Vec::new();
    let mut consumed = Vec::new();

    for entry in entries.iter_mut() {
        let Some(span) = buffer.get(entry.span) else {
            continue;
        };
        if entry.kind == StyleKind::Quote {
            if !options.quote_glyph.is_empty() {
                for id in entry.delimiters.drain(..) {
                    if let Some(sp) = buffer.get(id) {
                        splices.push(Splice::new(sp, options.quote_glyph.as_str()));
                    }
                    consumed.push(id);
                }
            }
            collapse.before(span);
            if let Some(sep) = entry.separator.take() {
                if let Some(sp) = buffer.get(sep) {
                    collapse.claim(offsets.line_of(sp.start) + 1, sp);
                }
                consumed.push(sep);
            }
            continue;
        }

        let glyph = match &entry.kind {
            StyleKind::ListItem { .. } => options.bullet.as_str(),
            StyleKind::OrderedListItem { label, .. } => label.as_str(),
            _ => continue,
        };
        if !entry.delimiters.is_empty() {
            let marker = entry.delimiters.remove(0);
            if let Some(sp) = buffer.get(marker) {
                splices.push(Splice::new(sp, glyph));
            }
            consumed.push(marker);
        }
        collapse.before(span);
        collapse.after(span);
    }

    log::trace!(
        "rewriting {} markers, collapsing {} blank lines",
        splices.len(),
        collapse.claims.len()
    );
    splices.extend(collapse.claims.into_values().map(Splice::delete));
    let patch = Patch::new(splices, buffer.len());
    buffer.apply(&patch);
    for id in consumed {
        buffer.untrack(id);
    }
}

/// Blank lines to drop, keyed by line index, each with the separator whose
/// deletion removes it.
struct Collapse<'a> {
    text: &'a str,
    offsets: &'a LineOffsets,
    claims: BTreeMap<usize, Span>,
}

impl Collapse<'_> {
    fn claim(&mut self, blank: usize, separator: Span) {
        self.claims.entry(blank).or_insert(separator);
    }

    /// A blank line directly above `span` loses its own separator.
    fn before(&mut self, span: Span) {
        let line = self.offsets.line_of(span.start);
        if line == 0 || !self.offsets.is_blank(self.text, line - 1) {
            return;
        }
        if let Some(above) = self.offsets.line(line - 1) {
            self.claim(line - 1, above.separator());
        }
    }

    /// A blank line directly below `span` goes with the separator ending it.
    fn after(&mut self, span: Span) {
        let line = self.offsets.line_of(span.end);
        if self.offsets.line_end(line) != span.end || !self.offsets.is_blank(self.text, line + 1) {
            return;
        }
        if let Some(last) = self.offsets.line(line) {
            self.claim(line + 1, last.separator());
        }
    }
}

/// Deletes every delimiter still tracked, separators included, in one patch.
pub fn strip_delimiters(buffer: &mut EditBuffer, entries: &mut [TrackedEntry]) {
    let mut spans = Vec::new();
    let mut ids = Vec::new();
    for entry in entries.iter_mut() {
        for id in entry.delimiters.drain(..).chain(entry.separator.take()) {
            spans.extend(buffer.get(id));
            ids.push(id);
        }
    }
    let patch = Patch::new(spans.into_iter().map(Splice::delete), buffer.len());
    buffer.apply(&patch);
    for id in ids {
        buffer.untrack(id);
    }
}

pub fn trim_trailing_separators(buffer: &mut EditBuffer) {
    if buffer.is_empty() {
        return;
    }
    let text = buffer.text();
    let kept = text.trim_end_matches(['\n', '\r']).len();
    if kept < text.len() {
        buffer.delete(Span::new(kept, text.len()));
    }
}

/// Content style ranges at their positions in the current version.
pub fn current_styles(buffer: &EditBuffer, entries: &[TrackedEntry]) -> Vec<StyleRange> {
    entries
        .iter()
        .filter_map(|e| {
            Some(StyleRange {
                kind: e.kind.clone(),
                span: buffer.get(e.span)?,
                inline: e.inline,
            })
        })
        .collect()
}
