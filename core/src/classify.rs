//! # Context Classifier
//!
//! Decides whether a scope configures its application context through
//! annotations or through XML files.

use crate::document::{Document, NodeId};
use crate::markers::{
    elements, ANNOTATION_ADDITIONAL_CONTEXT, CONTEXT_CLASS, CONTEXT_CLASS_ANNOTATION,
    XML_ADDITIONAL_CONTEXT,
};
use crate::scope::Scope;
use serde::Serialize;

/// How a scope builds its application context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextStyle {
    /// `contextClass` is the annotation config context.
    Annotation,
    /// Anything else, including no `contextClass` at all.
    Xml,
}

impl ContextStyle {
    /// The location token appended to `contextConfigLocation` for this style.
    pub const fn additional_location(self) -> &'static str {
        match self {
            ContextStyle::Annotation => ANNOTATION_ADDITIONAL_CONTEXT,
            ContextStyle::Xml => XML_ADDITIONAL_CONTEXT,
        }
    }
}

/// True iff the scope declares `contextClass` equal to the annotation context class.
///
/// Unlike parameter lookup during augmentation, both name and value are compared
/// exactly. Surrounding whitespace is not ignored, so a value wrapped onto its
/// own line does not count.
pub fn is_annotation_style(doc: &Document, scope: &Scope) -> bool {
    let kind = scope.param_kind().element_name();
    doc.child_elements(scope.element())
        .filter(|param| doc.local_name(*param) == Some(kind))
        .any(|param| {
            raw_text(doc, param, elements::PARAM_NAME).as_deref() == Some(CONTEXT_CLASS)
                && raw_text(doc, param, elements::PARAM_VALUE).as_deref()
                    == Some(CONTEXT_CLASS_ANNOTATION)
        })
}

fn raw_text(doc: &Document, parent: NodeId, name: &str) -> Option<String> {
    doc.child_named(parent, name).and_then(|child| doc.text(child))
}

/// Classifies a scope.
pub fn context_style(doc: &Document, scope: &Scope) -> ContextStyle {
    if is_annotation_style(doc, scope) {
        ContextStyle::Annotation
    } else {
        ContextStyle::Xml
    }
}
