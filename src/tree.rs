//! The element tree the cleaner operates on.
//!
//! A [`Node`] is a cheap-to-clone handle over a shared tree cell. Every node
//! owns its children outright; the parent link is a [`Weak`] back reference
//! used for navigation only, so dropping a subtree root frees the subtree.
//! Text is a first-class child kind interleaved with element children in
//! document order (there is no lxml-style text/tail split).
//!
//! Handles make the "preserve embeddings by reference" contract literal: a
//! preserved subtree is moved into the cleaned tree by cloning its handle,
//! not its contents.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// What a node is: an element with a tag and ordered attributes, or a raw
/// text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element node. Attribute keys are unique; order is document order.
    Element {
        /// Lowercase tag name.
        tag: String,
        /// Ordered (name, value) pairs.
        attrs: Vec<(String, String)>,
    },
    /// A raw text fragment.
    Text(String),
}

struct NodeCell {
    kind: NodeKind,
    parent: Weak<RefCell<NodeCell>>,
    children: Vec<Node>,
}

/// A handle to a tree node. Cloning the handle does not clone the node.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeCell>>);

impl Node {
    /// Create a new element node with no attributes.
    #[must_use]
    pub fn element(tag: &str) -> Self {
        Self::element_with_attrs(tag, Vec::new())
    }

    /// Create a new element node with the given attributes.
    #[must_use]
    pub fn element_with_attrs(tag: &str, attrs: Vec<(String, String)>) -> Self {
        Node(Rc::new(RefCell::new(NodeCell {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attrs,
            },
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    /// Create a new text fragment node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Node(Rc::new(RefCell::new(NodeCell {
            kind: NodeKind::Text(content.into()),
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    // === Identity ===

    /// True if both handles refer to the same node.
    #[must_use]
    pub fn same_node(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // === Kind accessors ===

    /// True for element nodes.
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Element { .. })
    }

    /// True for text fragments.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Text(_))
    }

    /// A clone of this node's kind (without children).
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.0.borrow().kind.clone()
    }

    /// Tag name for element nodes, `None` for text.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// True if this is an element with the given tag name.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        match &self.0.borrow().kind {
            NodeKind::Element { tag: t, .. } => t == tag,
            NodeKind::Text(_) => false,
        }
    }

    /// Rename an element. No-op on text nodes.
    pub fn set_tag(&self, new_tag: &str) {
        if let NodeKind::Element { tag, .. } = &mut self.0.borrow_mut().kind {
            *tag = new_tag.to_ascii_lowercase();
        }
    }

    /// Content of a text fragment, `None` for elements.
    #[must_use]
    pub fn text_value(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Text(t) => Some(t.clone()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Replace the content of a text fragment. No-op on elements.
    pub fn set_text_value(&self, content: &str) {
        if let NodeKind::Text(t) = &mut self.0.borrow_mut().kind {
            *t = content.to_string();
        }
    }

    /// True for a text fragment containing only whitespace.
    #[must_use]
    pub fn is_whitespace_text(&self) -> bool {
        match &self.0.borrow().kind {
            NodeKind::Text(t) => t.trim().is_empty(),
            NodeKind::Element { .. } => false,
        }
    }

    // === Attributes ===

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// True if the attribute is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing in place if present (keeps order).
    pub fn set_attr(&self, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            if let Some(slot) = attrs.iter_mut().find(|(k, _)| k == name) {
                slot.1 = value.to_string();
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attr(&self, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            attrs.retain(|(k, _)| k != name);
        }
    }

    /// All attributes in document order.
    #[must_use]
    pub fn attrs(&self) -> Vec<(String, String)> {
        match &self.0.borrow().kind {
            NodeKind::Element { attrs, .. } => attrs.clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Drop all attributes.
    pub fn clear_attrs(&self) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            attrs.clear();
        }
    }

    // === Navigation ===

    /// Parent node, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Handles to the direct children, in document order.
    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// First child, if any.
    #[must_use]
    pub fn first_child(&self) -> Option<Node> {
        self.0.borrow().children.first().cloned()
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// True if `candidate` is this node or one of its ancestors.
    #[must_use]
    pub fn is_or_has_ancestor(&self, candidate: &Node) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if node.same_node(candidate) {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    // === Mutation ===

    /// Append a child, detaching it from any previous parent first.
    ///
    /// # Panics
    ///
    /// Panics if the append would create a cycle (appending a node into its
    /// own subtree). A cyclic tree is a caller precondition violation; we
    /// fail loudly at the mutation site rather than loop forever later.
    pub fn append(&self, child: &Node) {
        assert!(
            !self.is_or_has_ancestor(child),
            "tree cycle: cannot append a node into its own subtree"
        );
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Remove this node from its parent's child list. No-op on roots.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
            self.0.borrow_mut().parent = Weak::new();
        }
    }

    // === Traversal ===

    /// All descendant nodes (excluding this node) in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<Node> {
        fn walk(node: &Node, out: &mut Vec<Node>) {
            for child in node.children() {
                out.push(child.clone());
                walk(&child, out);
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Concatenated text of all descendant text fragments, in order.
    #[must_use]
    pub fn text_content(&self) -> String {
        fn collect(node: &Node, out: &mut String) {
            let cell = node.0.borrow();
            match &cell.kind {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Element { .. } => {
                    for child in &cell.children {
                        collect(child, out);
                    }
                }
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }

    /// True if the subtree contains any non-whitespace text.
    #[must_use]
    pub fn has_significant_text(&self) -> bool {
        !self.text_content().trim().is_empty()
    }

    /// A structurally identical copy with fresh cells throughout.
    #[must_use]
    pub fn deep_clone(&self) -> Node {
        let (kind, children) = {
            let cell = self.0.borrow();
            (cell.kind.clone(), cell.children.clone())
        };
        let copy = match kind {
            NodeKind::Text(t) => Node::text(t),
            NodeKind::Element { tag, attrs } => Node::element_with_attrs(&tag, attrs),
        };
        for child in children {
            copy.append(&child.deep_clone());
        }
        copy
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, attrs } => f
                .debug_struct("Node")
                .field("tag", tag)
                .field("attrs", &attrs.len())
                .field("children", &self.child_count())
                .finish(),
            NodeKind::Text(t) => f.debug_tuple("Text").field(t).finish(),
        }
    }
}
