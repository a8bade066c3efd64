#![deny(missing_docs)]

//! # Descriptor Report
//!
//! Read-only summary of what augmentation would act on.

use crate::augment::{find_parameter, tokenize, NameMatch};
use crate::classify::{context_style, ContextStyle};
use crate::document::Document;
use crate::error::AppResult;
use crate::markers::{elements, CONTEXT_CONFIG_LOCATION};
use crate::scope::{child_text, component_scopes, has_bootstrap_listener, Scope};
use serde::Serialize;

/// Summary of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorReport {
    /// Name of the root element, as written.
    pub root_element: String,
    /// Whether a bootstrap listener is declared.
    pub bootstrap_listener: bool,
    /// Context style of the root scope.
    pub root_style: ContextStyle,
    /// Current root `contextConfigLocation` tokens.
    pub root_config_locations: Vec<String>,
    /// Dispatcher servlets, in document order.
    pub components: Vec<ComponentReport>,
}

/// Summary of one dispatcher servlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReport {
    /// Declared `servlet-name`, if any.
    pub name: Option<String>,
    /// Declared `servlet-class`.
    pub class: String,
    /// Context style of the servlet.
    pub style: ContextStyle,
    /// Current `contextConfigLocation` tokens.
    pub config_locations: Vec<String>,
}

/// Builds a report for a parsed document.
pub fn inspect(doc: &Document, name_match: NameMatch) -> DescriptorReport {
    let root = Scope::root(doc);

    let components = component_scopes(doc)
        .iter()
        .map(|scope| ComponentReport {
            name: scope.name(doc),
            class: child_text(doc, scope.element(), elements::SERVLET_CLASS).unwrap_or_default(),
            style: context_style(doc, scope),
            config_locations: config_locations(doc, scope, name_match),
        })
        .collect();

    DescriptorReport {
        root_element: doc
            .element(doc.root())
            .map(|e| e.name.clone())
            .unwrap_or_default(),
        bootstrap_listener: has_bootstrap_listener(doc),
        root_style: context_style(doc, &root),
        root_config_locations: config_locations(doc, &root, name_match),
        components,
    }
}

/// Parses descriptor text and reports on it.
pub fn inspect_web_xml(source: &str, name_match: NameMatch) -> AppResult<DescriptorReport> {
    let doc = Document::parse(source)?;
    Ok(inspect(&doc, name_match))
}

fn config_locations(doc: &Document, scope: &Scope, name_match: NameMatch) -> Vec<String> {
    find_parameter(doc, scope, CONTEXT_CONFIG_LOCATION, name_match)
        .and_then(|param| doc.child_named(param, elements::PARAM_VALUE))
        .and_then(|value| doc.text(value))
        .map(|value| tokenize(&value))
        .unwrap_or_default()
}
