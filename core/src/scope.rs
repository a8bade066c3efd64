#![deny(missing_docs)]

//! # Scope Locator
//!
//! Finds the regions of a descriptor that need augmentation: the root
//! application scope (when a bootstrap listener is declared) and every
//! servlet backed by a dispatcher.

use crate::document::{Document, NodeId};
use crate::markers::{elements, Marker};
use serde::Serialize;

/// The two parameter element flavours. Same shape, different element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    /// `context-param`, directly under the root.
    Context,
    /// `init-param`, inside a servlet.
    Init,
}

impl ParamKind {
    /// Element name of a parameter of this kind.
    pub const fn element_name(self) -> &'static str {
        match self {
            ParamKind::Context => elements::CONTEXT_PARAM,
            ParamKind::Init => elements::INIT_PARAM,
        }
    }
}

/// A region of the descriptor that owns parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole application; parameters are `context-param` children of the root.
    Root {
        /// The root element.
        element: NodeId,
    },
    /// One servlet declaration; parameters are its `init-param` children.
    Component {
        /// The `servlet` element.
        element: NodeId,
        /// 1-based position among dispatcher servlets, for messages.
        ordinal: usize,
    },
}

impl Scope {
    /// The root scope of a document.
    pub fn root(doc: &Document) -> Self {
        Scope::Root {
            element: doc.root(),
        }
    }

    /// The element that owns the scope's parameters.
    pub fn element(&self) -> NodeId {
        match self {
            Scope::Root { element } | Scope::Component { element, .. } => *element,
        }
    }

    /// Which parameter elements this scope uses.
    pub fn param_kind(&self) -> ParamKind {
        match self {
            Scope::Root { .. } => ParamKind::Context,
            Scope::Component { .. } => ParamKind::Init,
        }
    }

    /// Declared `servlet-name`, trimmed. Always `None` for the root scope.
    pub fn name(&self, doc: &Document) -> Option<String> {
        match self {
            Scope::Root { .. } => None,
            Scope::Component { element, .. } => child_text(doc, *element, elements::SERVLET_NAME)
                .filter(|name| !name.is_empty()),
        }
    }

    /// Short human readable description used in logs and errors.
    pub fn label(&self, doc: &Document) -> String {
        match (self, self.name(doc)) {
            (Scope::Root { .. }, _) => "root context".to_string(),
            (Scope::Component { .. }, Some(name)) => format!("servlet '{}'", name),
            (Scope::Component { ordinal, .. }, None) => format!("servlet #{}", ordinal),
        }
    }
}

/// True if any `listener-class` under the root names a bootstrap listener.
pub fn has_bootstrap_listener(doc: &Document) -> bool {
    let path = format!("//{}/text()", elements::LISTENER_CLASS);
    doc.query(doc.root(), &path)
        .into_iter()
        .filter_map(|t| doc.text_value(t))
        .any(|class| Marker::BootstrapListener.matches(class))
}

/// Every servlet whose `servlet-class` names a dispatcher, in document order.
pub fn component_scopes(doc: &Document) -> Vec<Scope> {
    let path = format!("//{}", elements::SERVLET);
    doc.query(doc.root(), &path)
        .into_iter()
        .filter(|servlet| {
            child_text(doc, *servlet, elements::SERVLET_CLASS)
                .is_some_and(|class| Marker::DispatcherServlet.matches(&class))
        })
        .enumerate()
        .map(|(i, element)| Scope::Component {
            element,
            ordinal: i + 1,
        })
        .collect()
}

/// Trimmed text of the first child element called `name`.
pub(crate) fn child_text(doc: &Document, parent: NodeId, name: &str) -> Option<String> {
    doc.child_named(parent, name)
        .and_then(|child| doc.text(child))
        .map(|text| text.trim().to_string())
}
