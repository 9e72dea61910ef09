use std::fmt;

use crate::dom::{Document, NodeId};

use super::SplitError;

/// What to split: a selector, an element, or the first element of a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Selector(String),
    Element(NodeId),
    Collection(Vec<NodeId>),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Selector(selector) => f.write_str(selector),
            Target::Element(id) => write!(f, "node #{}", id.index()),
            Target::Collection(ids) if ids.is_empty() => f.write_str("empty collection"),
            Target::Collection(ids) => write!(f, "collection of {} nodes", ids.len()),
        }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::Element(id)
    }
}

impl From<Vec<NodeId>> for Target {
    fn from(ids: Vec<NodeId>) -> Self {
        Target::Collection(ids)
    }
}

impl From<&[NodeId]> for Target {
    fn from(ids: &[NodeId]) -> Self {
        Target::Collection(ids.to_vec())
    }
}

/// Resolve `target` to a container element without touching the tree
pub fn resolve(doc: &Document, target: &Target) -> Result<NodeId, SplitError> {
    let found = match target {
        Target::Selector(selector) => doc.query_selector(selector)?,
        Target::Element(id) => usable_element(doc, *id),
        Target::Collection(ids) => ids.first().and_then(|&id| usable_element(doc, id)),
    };
    found.ok_or_else(|| SplitError::TargetNotFound(target.to_string()))
}

fn usable_element(doc: &Document, id: NodeId) -> Option<NodeId> {
    (doc.contains(id) && doc.is_element(id)).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::SelectorError;

    fn doc_with_title() -> (Document, NodeId) {
        let mut doc = Document::new();
        let h1 = doc.create_element("h1");
        doc.set_attribute(h1, "class", "title");
        let root = doc.root();
        doc.append_child(root, h1);
        (doc, h1)
    }

    #[test]
    fn test_resolves_selector() {
        let (doc, h1) = doc_with_title();
        assert_eq!(resolve(&doc, &".title".into()), Ok(h1));
    }

    #[test]
    fn test_resolves_direct_element() {
        let (doc, h1) = doc_with_title();
        assert_eq!(resolve(&doc, &h1.into()), Ok(h1));
    }

    #[test]
    fn test_collection_uses_first_element() {
        let (mut doc, h1) = doc_with_title();
        let other = doc.create_element("p");
        assert_eq!(resolve(&doc, &vec![h1, other].into()), Ok(h1));
    }

    #[test]
    fn test_missing_selector_is_not_found() {
        let (doc, _) = doc_with_title();
        let err = resolve(&doc, &"#nope".into()).unwrap_err();
        assert_eq!(err, SplitError::TargetNotFound("#nope".to_string()));
        assert_eq!(err.to_string(), "Element not found for selector: #nope");
    }

    #[test]
    fn test_empty_collection_is_not_found() {
        let (doc, _) = doc_with_title();
        let err = resolve(&doc, &Target::Collection(vec![])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Element not found for selector: empty collection"
        );
    }

    #[test]
    fn test_text_node_does_not_resolve() {
        let (mut doc, _) = doc_with_title();
        let text = doc.create_text("loose");
        assert!(matches!(
            resolve(&doc, &text.into()),
            Err(SplitError::TargetNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let (doc, _) = doc_with_title();
        assert_eq!(
            resolve(&doc, &"h1[x]".into()),
            Err(SplitError::InvalidSelector(SelectorError::UnexpectedChar {
                ch: '[',
                pos: 2
            }))
        );
    }
}
