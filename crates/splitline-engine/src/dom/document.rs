use super::selector::{Selector, SelectorError};

/// Handle to a node owned by a [`Document`].
///
/// Handles are arena indices: they stay valid for the lifetime of the document,
/// including after the node has been detached from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index, mostly useful for debugging output
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element payload: tag name plus attributes in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeSlot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A small mutable document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Moving a node (for
/// example re-parenting a word wrapper into a line wrapper) keeps its id, so
/// handles held by callers survive restructuring.
///
/// Every mutation bumps [`Document::revision`], which layout engines use to
/// invalidate cached geometry.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeSlot>,
    root: NodeId,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only a `root` element
    pub fn new() -> Self {
        let root_slot = NodeSlot {
            kind: NodeKind::Element(ElementData {
                tag: "root".to_string(),
                attributes: Vec::new(),
            }),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_slot],
            root: NodeId(0),
            revision: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Mutation counter, incremented on every structural or attribute change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `id` was allocated by this document
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData {
            tag: tag.to_string(),
            attributes: Vec::new(),
        }))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element(_))
    }

    /// Text of a text node, `None` for elements
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    /// Tag name of an element, `None` for text nodes
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element(data) => Some(&data.tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `node` is reachable from the document root
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    /// Append `child` as the last child of `parent`, moving it out of its
    /// current parent if it has one.
    ///
    /// # Panics
    /// Panics if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child);
        self.revision += 1;
    }

    /// Append several nodes in order with a single revision bump
    pub fn append_children(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self.attach(parent, child);
        }
        self.revision += 1;
    }

    /// Detach every current child of `parent` and attach `children` in their
    /// place, as one mutation.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) {
        let old = std::mem::take(&mut self.nodes[parent.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        for child in children {
            self.attach(parent, child);
        }
        self.revision += 1;
    }

    /// Detach `node` from its parent. Detached nodes keep their subtree.
    pub fn detach(&mut self, node: NodeId) {
        if self.unlink(node) {
            self.revision += 1;
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            !self.is_inclusive_ancestor(child, parent),
            "cannot append node {child:?} into its own subtree"
        );
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn unlink(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return false;
        };
        self.nodes[parent.0].children.retain(|&c| c != node);
        true
    }

    /// Concatenated text of `node` and all its descendants, in document order
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Replace the children of `node` with a single text node, or with nothing
    /// when `text` is empty. Setting text on a text node rewrites it in place.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let NodeKind::Text(existing) = &mut self.nodes[node.0].kind {
            *existing = text.to_string();
            self.revision += 1;
            return;
        }
        if text.is_empty() {
            self.replace_children(node, []);
        } else {
            let text_node = self.create_text(text);
            self.replace_children(node, [text_node]);
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Element(data) => data
                .attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Set an attribute on an element; ignored for text nodes
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let NodeKind::Element(data) = &mut self.nodes[node.0].kind else {
            return;
        };
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data
                .attributes
                .push((name.to_string(), value.to_string())),
        }
        self.revision += 1;
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let NodeKind::Element(data) = &mut self.nodes[node.0].kind {
            let before = data.attributes.len();
            data.attributes.retain(|(key, _)| key != name);
            if data.attributes.len() != before {
                self.revision += 1;
            }
        }
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.kind(node) {
            NodeKind::Element(data) => &data.attributes,
            NodeKind::Text(_) => &[],
        }
    }

    /// Whitespace-separated entries of the `class` attribute
    pub fn classes(&self, node: NodeId) -> impl Iterator<Item = &str> {
        self.attribute(node, "class")
            .unwrap_or_default()
            .split_whitespace()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).any(|c| c == class)
    }

    /// Value of one declaration in the inline `style` attribute.
    ///
    /// ```
    /// # use splitline_engine::dom::Document;
    /// let mut doc = Document::new();
    /// let div = doc.create_element("div");
    /// doc.set_attribute(div, "style", "display: inline-block; width: 40px");
    /// assert_eq!(doc.style_property(div, "width"), Some("40px"));
    /// ```
    pub fn style_property(&self, node: NodeId, property: &str) -> Option<&str> {
        self.attribute(node, "style")?
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(property))
            .map(|(_, value)| value.trim())
    }

    /// Pre-order iterator over the descendants of `node`, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(node).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// First element in document order (root included) matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.elements().find(|&id| selector.matches(self, id)))
    }

    /// Every element in document order matching `selector`
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .elements()
            .filter(|&id| selector.matches(self, id))
            .collect())
    }

    fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|&id| self.is_element(id))
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(next).iter().rev().copied());
        Some(next)
    }
}
