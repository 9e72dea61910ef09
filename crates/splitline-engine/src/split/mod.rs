//! Text splitting pipeline.
//!
//! Splitting runs in two phases with a hard ordering between them:
//!
//! 1. **Wrap** ([`wrap`]): the container's text is tokenized on whitespace and
//!    every word and character is wrapped in a decorative inline-block `span`.
//!    The wrappers are attached to the container in one batch.
//! 2. **Group** ([`lines`]): once attached, the words have layout positions.
//!    Children sharing one vertical offset are collected into line wrappers.
//!
//! Phase 2 is skipped when phase 1 produced no words.
//!
//! ```
//! use splitline_engine::{Document, InlineFlowLayout, SplitOptions, split_text};
//!
//! let mut doc = Document::new();
//! let title = doc.create_element("h1");
//! doc.set_attribute(title, "id", "title");
//! doc.set_text_content(title, "Hi there");
//! let root = doc.root();
//! doc.append_child(root, title);
//!
//! let mut layout = InlineFlowLayout::default();
//! let split = split_text(&mut doc, "#title", &SplitOptions::default(), &mut layout).unwrap();
//!
//! assert_eq!(split.chars.len(), 7);
//! assert_eq!(split.words.len(), 2);
//! assert_eq!(split.lines.len(), 1);
//! assert_eq!(doc.attribute(title, "aria-label"), Some("Hi there"));
//! ```

pub mod lines;
pub mod options;
pub mod target;
pub mod tokenize;
pub mod wrap;

use log::debug;

use crate::dom::{Document, NodeId, SelectorError};
use crate::layout::PositionProbe;

pub use options::{SplitClasses, SplitOptions};
pub use target::Target;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("Element not found for selector: {0}")]
    TargetNotFound(String),
    #[error("Invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),
}

/// Handles to every wrapper created by [`split_text`], in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub chars: Vec<NodeId>,
    pub words: Vec<NodeId>,
    pub lines: Vec<NodeId>,
}

impl SplitResult {
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.words.is_empty() && self.lines.is_empty()
    }

    /// Word wrappers inside `line`, skipping the whitespace riding along
    pub fn line_words(&self, doc: &Document, line: NodeId) -> Vec<NodeId> {
        doc.children(line)
            .iter()
            .copied()
            .filter(|&child| doc.is_element(child))
            .collect()
    }
}

/// Split the text of `target` into character, word and line wrappers.
///
/// The target is resolved before anything is touched; resolution failure is
/// the only error. After that the container's children are replaced and its
/// `aria-label` is set to the original text. Empty or whitespace-only text is
/// not an error and yields empty lists.
///
/// `probe` is consulted only after the word wrappers are attached, once per
/// word.
pub fn split_text<P: PositionProbe>(
    doc: &mut Document,
    target: impl Into<Target>,
    options: &SplitOptions,
    mut probe: P,
) -> Result<SplitResult, SplitError> {
    let target = target.into();
    let container = target::resolve(doc, &target)?;
    debug!("splitting {target} (node {})", container.index());

    let wrapped = wrap::wrap_words(doc, container, &options.classes);
    if wrapped.words.is_empty() {
        return Ok(SplitResult {
            chars: wrapped.chars,
            words: wrapped.words,
            lines: Vec::new(),
        });
    }

    let groups = lines::line_groups(doc, container, &mut probe);
    let lines = lines::wrap_lines(doc, container, groups, options.classes.line_class());
    debug!("grouped {} words into {} lines", wrapped.words.len(), lines.len());

    Ok(SplitResult {
        chars: wrapped.chars,
        words: wrapped.words,
        lines,
    })
}
