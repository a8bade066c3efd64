use crate::augment::common::{tokenize, NameMatch};
use crate::document::{Document, NodeId};
use crate::error::{AppError, AppResult};
use crate::markers::elements;
use crate::scope::{child_text, ParamKind, Scope};
use serde::Serialize;
use tracing::debug;

/// Value given to a parameter that has to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue<'a> {
    /// A fixed value.
    Literal(&'a str),
    /// `/WEB-INF/<servlet-name>-servlet.xml`, derived from the component scope.
    ///
    /// Resolving it for a scope without a `servlet-name` is a structural error.
    ComponentLocation,
}

impl DefaultValue<'_> {
    /// Produces the concrete default for `scope`.
    pub fn resolve(&self, doc: &Document, scope: &Scope) -> AppResult<String> {
        match self {
            DefaultValue::Literal(value) => Ok(value.to_string()),
            DefaultValue::ComponentLocation => scope
                .name(doc)
                .map(|name| format!("/WEB-INF/{}-servlet.xml", name))
                .ok_or_else(|| AppError::Structural {
                    node: elements::SERVLET_NAME.to_string(),
                    context: scope.label(doc),
                }),
        }
    }
}

/// One parameter to augment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterRequest<'a> {
    /// Parameter name looked for in `param-name`.
    pub name: &'a str,
    /// Value used when the parameter does not exist yet.
    pub default: DefaultValue<'a>,
    /// Token appended to the value.
    pub token: &'a str,
}

/// What happened to one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Augmentation {
    /// Scope label (`root context`, `servlet 'dispatcher'`).
    pub scope: String,
    /// Parameter element flavour.
    pub kind: ParamKind,
    /// `param-name` of the augmented parameter, as found or created.
    pub parameter: String,
    /// True if the parameter was created with its default value.
    pub created: bool,
    /// The appended token.
    pub appended: String,
    /// The resulting `param-value`.
    pub value: String,
}

/// Finds the first parameter of the scope whose `param-name` matches `name`.
///
/// Later matches are ignored.
pub fn find_parameter(
    doc: &Document,
    scope: &Scope,
    name: &str,
    name_match: NameMatch,
) -> Option<NodeId> {
    let kind = scope.param_kind().element_name();
    doc.child_elements(scope.element())
        .filter(|param| doc.local_name(*param) == Some(kind))
        .find(|param| {
            doc.child_named(*param, elements::PARAM_NAME)
                .and_then(|n| doc.text(n))
                .is_some_and(|candidate| name_match.matches(&candidate, name))
        })
}

/// Finds or creates a parameter and appends the request token to its value.
///
/// The value is split on commas, semicolons and whitespace, the token is
/// appended, and the tokens are joined back with single spaces. Existing
/// tokens keep their order; nothing is deduplicated.
pub fn augment_parameter(
    doc: &mut Document,
    scope: &Scope,
    request: &ParameterRequest<'_>,
    name_match: NameMatch,
) -> AppResult<Augmentation> {
    let (param, created) = match find_parameter(doc, scope, request.name, name_match) {
        Some(param) => (param, false),
        None => {
            let default = request.default.resolve(doc, scope)?;
            (create_parameter(doc, scope, request.name, &default), true)
        }
    };

    let value_node = match doc.child_named(param, elements::PARAM_VALUE) {
        Some(node) => node,
        None => doc.create_element(param, elements::PARAM_VALUE),
    };

    let mut tokens = tokenize(&doc.text(value_node).unwrap_or_default());
    tokens.push(request.token.to_string());
    let value = tokens.join(" ");
    doc.set_text(value_node, &value);

    let augmentation = Augmentation {
        scope: scope.label(doc),
        kind: scope.param_kind(),
        parameter: child_text(doc, param, elements::PARAM_NAME)
            .unwrap_or_else(|| request.name.to_string()),
        created,
        appended: request.token.to_string(),
        value,
    };
    debug!(
        scope = %augmentation.scope,
        parameter = %augmentation.parameter,
        created,
        token = request.token,
        "augmented parameter"
    );
    Ok(augmentation)
}

/// Appends `<kind><param-name>name</param-name><param-value>value</param-value></kind>` to the scope.
fn create_parameter(doc: &mut Document, scope: &Scope, name: &str, value: &str) -> NodeId {
    let param = doc.create_element(scope.element(), scope.param_kind().element_name());
    let name_node = doc.create_element(param, elements::PARAM_NAME);
    doc.set_text(name_node, name);
    let value_node = doc.create_element(param, elements::PARAM_VALUE);
    doc.set_text(value_node, value);
    param
}
