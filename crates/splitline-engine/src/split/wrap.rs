use log::debug;

use crate::dom::{Document, NodeId};

use super::options::SplitClasses;
use super::tokenize::{Token, tokenize};

/// Character and word wrappers produced by [`wrap_words`], in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedText {
    pub chars: Vec<NodeId>,
    pub words: Vec<NodeId>,
}

/// Create a detached, decorative inline-block `span` carrying `class`
pub fn create_wrapper(doc: &mut Document, class: &str) -> NodeId {
    let span = doc.create_element("span");
    doc.set_attribute(span, "class", class);
    doc.set_attribute(span, "style", "display: inline-block");
    doc.set_attribute(span, "aria-hidden", "true");
    span
}

/// Replace the text of `container` with word wrappers holding character
/// wrappers, keeping whitespace runs as plain text between them.
///
/// The original text moves to the container's `aria-label`. The new children
/// are attached in one batch once everything is built.
pub fn wrap_words(doc: &mut Document, container: NodeId, classes: &SplitClasses) -> WrappedText {
    let original = doc.text_content(container);
    doc.set_attribute(container, "aria-label", &original);
    doc.set_text_content(container, "");

    let mut wrapped = WrappedText::default();
    let mut buffer = Vec::new();
    let tokens = tokenize(&original);
    for token in &tokens {
        match *token {
            Token::Whitespace(run) => buffer.push(doc.create_text(run)),
            Token::Word(word) => {
                let word_span = create_wrapper(doc, classes.word_class());
                let first_char = wrapped.chars.len();
                for ch in word.chars() {
                    let char_span = create_wrapper(doc, classes.char_class());
                    let mut utf8 = [0u8; 4];
                    doc.set_text_content(char_span, ch.encode_utf8(&mut utf8));
                    wrapped.chars.push(char_span);
                }
                doc.append_children(word_span, wrapped.chars[first_char..].iter().copied());
                buffer.push(word_span);
                wrapped.words.push(word_span);
            }
        }
    }

    debug!(
        "wrapped {} tokens into {} words and {} chars",
        tokens.len(),
        wrapped.words.len(),
        wrapped.chars.len()
    );
    doc.append_children(container, buffer);
    wrapped
}
