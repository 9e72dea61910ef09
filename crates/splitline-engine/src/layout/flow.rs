use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PositionProbe;
use crate::dom::{Document, NodeId, NodeKind};
use crate::split::tokenize::{Token, tokenize};

/// Fixed metrics for [`InlineFlowLayout`]: every character has the same advance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowMetrics {
    pub char_width: f32,
    /// Width of one collapsed whitespace run
    pub space_width: f32,
    pub line_height: f32,
    /// Available width when the layout root has no `width: <n>px` style
    pub default_width: f32,
}

impl Default for FlowMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            space_width: 4.0,
            line_height: 16.0,
            default_width: 480.0,
        }
    }
}

/// A deterministic inline formatting context.
///
/// Text flows left to right. Whitespace runs collapse to one space and vanish at
/// line starts, words never break, and every child element is an atomic
/// inline-block that is laid out recursively and shrinks to fit its content,
/// never below its widest item.
/// An item that does not fit on a non-empty line starts a new line; a line is
/// as tall as its tallest item. Trailing whitespace inside an inline-block
/// keeps its advance, so a run of words re-wrapped into one box breaks where
/// the bare words did.
///
/// Offsets are relative to the layout root: the nearest ancestor that is not
/// `display: inline-block`. Geometry is cached per root and document revision.
#[derive(Debug, Clone, Default)]
pub struct InlineFlowLayout {
    metrics: FlowMetrics,
    cache: Option<LayoutCache>,
}

#[derive(Debug, Clone)]
struct LayoutCache {
    root: NodeId,
    revision: u64,
    tops: HashMap<NodeId, f32>,
}

struct BoxLayout {
    width: f32,
    height: f32,
    /// Tops of every descendant, relative to this box
    tops: Vec<(NodeId, f32)>,
}

struct LineCursor {
    available: f32,
    x: f32,
    y: f32,
    line_height: f32,
    max_x: f32,
    /// Widest atomic item, the box never shrinks below it
    widest: f32,
    line_started: bool,
    pending_space: bool,
}

impl LineCursor {
    fn new(available: f32) -> Self {
        Self {
            available,
            x: 0.0,
            y: 0.0,
            line_height: 0.0,
            max_x: 0.0,
            widest: 0.0,
            line_started: false,
            pending_space: false,
        }
    }

    fn whitespace(&mut self) {
        if self.line_started {
            self.pending_space = true;
        }
    }

    /// Place an atomic item and return its top
    fn place(&mut self, width: f32, height: f32, space_width: f32) -> f32 {
        let mut x = self.x;
        if std::mem::take(&mut self.pending_space) {
            x += space_width;
        }
        if self.line_started && x + width > self.available {
            self.y += self.line_height;
            self.line_height = 0.0;
            x = 0.0;
        }
        self.x = x + width;
        self.line_started = true;
        self.widest = self.widest.max(width);
        self.line_height = self.line_height.max(height);
        self.max_x = self.max_x.max(self.x);
        self.y
    }

    fn finish(self, space_width: f32) -> (f32, f32) {
        let trailing = if self.pending_space { space_width } else { 0.0 };
        let width = self
            .max_x
            .max(self.x + trailing)
            .min(self.available)
            .max(self.widest);
        (width, self.y + self.line_height)
    }
}

impl InlineFlowLayout {
    pub fn new(metrics: FlowMetrics) -> Self {
        Self {
            metrics,
            cache: None,
        }
    }

    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Nearest ancestor of `node` that establishes the line box width
    pub fn layout_root(doc: &Document, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = doc.parent(current) {
            if !is_inline_block(doc, parent) {
                return parent;
            }
            current = parent;
        }
        current
    }

    /// Line width available inside `root`
    pub fn available_width(&self, doc: &Document, root: NodeId) -> f32 {
        doc.style_property(root, "width")
            .and_then(|value| {
                value
                    .strip_suffix("px")
                    .unwrap_or(value)
                    .trim()
                    .parse::<f32>()
                    .ok()
            })
            .filter(|width| *width >= 0.0)
            .unwrap_or(self.metrics.default_width)
    }

    /// Total laid-out height of the content of `root`
    pub fn content_height(&self, doc: &Document, root: NodeId) -> f32 {
        self.layout_box(doc, root, self.available_width(doc, root))
            .height
    }

    fn layout_box(&self, doc: &Document, node: NodeId, available: f32) -> BoxLayout {
        let FlowMetrics {
            char_width,
            space_width,
            line_height,
            ..
        } = self.metrics;
        let mut cursor = LineCursor::new(available);
        let mut tops = Vec::new();

        for &child in doc.children(node) {
            match doc.kind(child) {
                NodeKind::Text(text) => {
                    let mut first_top = None;
                    for token in tokenize(text) {
                        match token {
                            Token::Whitespace(_) => cursor.whitespace(),
                            Token::Word(word) => {
                                let width = word.chars().count() as f32 * char_width;
                                let top = cursor.place(width, line_height, space_width);
                                first_top.get_or_insert(top);
                            }
                        }
                    }
                    tops.push((child, first_top.unwrap_or(cursor.y)));
                }
                NodeKind::Element(_) => {
                    let inner = self.layout_box(doc, child, available);
                    let top = cursor.place(inner.width, inner.height, space_width);
                    tops.push((child, top));
                    tops.extend(inner.tops.into_iter().map(|(id, y)| (id, y + top)));
                }
            }
        }

        let (width, height) = cursor.finish(space_width);
        BoxLayout {
            width,
            height,
            tops,
        }
    }
}

impl PositionProbe for InlineFlowLayout {
    fn offset_top(&mut self, doc: &Document, node: NodeId) -> f32 {
        let root = Self::layout_root(doc, node);
        if root == node {
            return 0.0;
        }

        let stale = self
            .cache
            .as_ref()
            .is_none_or(|cache| cache.root != root || cache.revision != doc.revision());
        if stale {
            let available = self.available_width(doc, root);
            let layout = self.layout_box(doc, root, available);
            log::trace!(
                "laid out root {:?} at width {available}: {} nodes, height {}",
                root,
                layout.tops.len(),
                layout.height
            );
            self.cache = Some(LayoutCache {
                root,
                revision: doc.revision(),
                tops: layout.tops.into_iter().collect(),
            });
        }

        self.cache
            .as_ref()
            .and_then(|cache| cache.tops.get(&node).copied())
            .unwrap_or(0.0)
    }
}

fn is_inline_block(doc: &Document, node: NodeId) -> bool {
    doc.style_property(node, "display")
        .is_some_and(|display| display.eq_ignore_ascii_case("inline-block"))
}
