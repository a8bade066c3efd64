#![deny(missing_docs)]

//! # Document Model
//!
//! An arena-backed tree of the deployment descriptor.
//!
//! - **reader**: Builds the arena from text using `quick-xml`.
//! - **query**: Path lookups (`servlet/servlet-name/text()`).
//! - **layout**: Indentation detection for inserted elements.
//!
//! Nodes are addressed by [`NodeId`] handles, so elements can be created
//! while a caller still holds handles obtained from an earlier query.

mod layout;
mod query;
mod reader;

use crate::error::AppResult;
use quick_xml::events::Event;

/// Opaque handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Element payload: tag name and attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Qualified tag name as written (`web-app`, `j2ee:servlet`).
    pub name: String,
    /// Attributes as `(key, unescaped value)` pairs.
    pub attributes: Vec<(String, String)>,
    /// Written as `<name/>` in the source.
    pub self_closing: bool,
}

impl ElementData {
    /// The tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The synthetic top of the arena. Holds the prolog, the root element and any trailer.
    Document,
    /// A named element.
    Element(ElementData),
    /// Character data, stored unescaped.
    Text {
        /// Unescaped value.
        value: String,
        /// Written as a `<![CDATA[...]]>` section.
        cdata: bool,
    },
    /// Declarations, doctypes, comments and processing instructions, kept verbatim.
    Markup(Event<'static>),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed deployment descriptor.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Parses descriptor text into a document.
    ///
    /// Fails with [`crate::AppError::Parse`] when the text is not well-formed.
    pub fn parse(text: &str) -> AppResult<Self> {
        reader::read_document(text)
    }

    /// Creates a document holding only an empty root element.
    pub fn with_root(name: &str) -> Self {
        let mut doc = Self::empty();
        let root = doc.alloc(
            NodeKind::Element(ElementData {
                name: name.to_string(),
                attributes: Vec::new(),
                self_closing: true,
            }),
            Some(Self::TOP),
        );
        doc.nodes[Self::TOP.0].children.push(root);
        doc.root = root;
        doc
    }

    const TOP: NodeId = NodeId(0);

    fn empty() -> Self {
        Document {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            root: Self::TOP,
        }
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// The synthetic document node (parent of the root element).
    pub fn top(&self) -> NodeId {
        Self::TOP
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The kind of a node.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// The parent of a node, `None` for the document node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All children of a node in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children only.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.element(*c).is_some())
    }

    /// The first element child with the given local name.
    pub fn child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id)
            .find(|c| self.local_name(*c) == Some(name))
    }

    /// Element payload, if the node is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Local (unprefixed) name of an element node.
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::local_name)
    }

    /// Value of a text node.
    pub fn text_value(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Concatenated direct text content of an element, `None` when it has no text children.
    pub fn text(&self, element: NodeId) -> Option<String> {
        let mut found = false;
        let mut out = String::new();
        for child in self.children(element) {
            if let Some(value) = self.text_value(*child) {
                found = true;
                out.push_str(value);
            }
        }
        found.then_some(out)
    }

    /// Appends a new element as the last child of `parent` and returns it.
    ///
    /// When the siblings are laid out one per line, the new element gets its
    /// own line at their indentation.
    pub fn create_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        let indent = layout::child_indent(self, parent);
        let closing = layout::closing_whitespace(self, parent);
        let newline = layout::line_break(self);
        let name = self.qualified_name_for(parent, name);

        let element = self.alloc(
            NodeKind::Element(ElementData {
                name,
                attributes: Vec::new(),
                self_closing: false,
            }),
            Some(parent),
        );

        let mut inserted = Vec::with_capacity(3);
        if let Some(indent) = &indent {
            inserted.push(self.alloc_whitespace(parent, format!("{}{}", newline, indent)));
        }
        inserted.push(element);

        match closing {
            Some(position) => {
                let children = &mut self.nodes[parent.0].children;
                for (offset, id) in inserted.into_iter().enumerate() {
                    children.insert(position + offset, id);
                }
            }
            None => {
                if indent.is_some() {
                    let outer = layout::indent_before(self, parent).unwrap_or_default();
                    inserted.push(self.alloc_whitespace(parent, format!("{}{}", newline, outer)));
                }
                self.nodes[parent.0].children.extend(inserted);
            }
        }

        element
    }

    /// Sets the text content of an element.
    ///
    /// The first text child receives the value and any further text children are
    /// emptied; an element without text gets a new text node.
    pub fn set_text(&mut self, element: NodeId, value: &str) {
        let texts: Vec<NodeId> = self
            .children(element)
            .iter()
            .copied()
            .filter(|c| self.text_value(*c).is_some())
            .collect();

        match texts.split_first() {
            Some((first, rest)) => {
                self.replace_text(*first, value);
                for other in rest {
                    self.replace_text(*other, "");
                }
            }
            None => {
                let text = self.alloc(
                    NodeKind::Text {
                        value: value.to_string(),
                        cdata: false,
                    },
                    Some(element),
                );
                self.nodes[element.0].children.push(text);
            }
        }
    }

    fn replace_text(&mut self, id: NodeId, new_value: &str) {
        if let NodeKind::Text { value, .. } = &mut self.nodes[id.0].kind {
            *value = new_value.to_string();
        }
    }

    fn alloc_whitespace(&mut self, parent: NodeId, value: String) -> NodeId {
        self.alloc(
            NodeKind::Text {
                value,
                cdata: false,
            },
            Some(parent),
        )
    }

    /// New children reuse the parent's namespace prefix (`j2ee:servlet` -> `j2ee:init-param`).
    fn qualified_name_for(&self, parent: NodeId, name: &str) -> String {
        match self.element(parent).and_then(|e| e.name.split_once(':')) {
            Some((prefix, _)) => format!("{}:{}", prefix, name),
            None => name.to_string(),
        }
    }

    /// Evaluates a path expression relative to `context`.
    ///
    /// Steps are `/`-separated element names, `*`, `.` or `text()`; a leading
    /// `//` searches descendants. Matches are returned in document order and a
    /// path that matches nothing yields an empty vector.
    pub fn query(&self, context: NodeId, path: &str) -> Vec<NodeId> {
        query::evaluate(self, context, path)
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    pub(crate) fn is_whitespace(&self, id: NodeId) -> bool {
        matches!(
            &self.nodes[id.0].kind,
            NodeKind::Text { value, cdata: false } if value.trim().is_empty()
        )
    }
}
