use crate::augment::common::NameMatch;
use crate::augment::params::{augment_parameter, Augmentation, DefaultValue, ParameterRequest};
use crate::classify::context_style;
use crate::document::Document;
use crate::error::AppResult;
use crate::markers::{
    CONTEXT_CONFIG_LOCATION, CONTEXT_INITIALIZER_ADDITIONAL, CONTEXT_INITIALIZER_CLASSES,
    DEFAULT_ROOT_CONTEXT,
};
use crate::scope::{component_scopes, has_bootstrap_listener, Scope};
use crate::serializer::serialize;
use tracing::{debug, info};

/// Knobs for a transformation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AugmentOptions {
    /// Parameter name matching policy.
    pub name_match: NameMatch,
    /// Augment the root context (still requires a bootstrap listener).
    pub root: bool,
    /// Augment dispatcher servlets.
    pub components: bool,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        AugmentOptions {
            name_match: NameMatch::default(),
            root: true,
            components: true,
        }
    }
}

/// Result of [`transform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    /// The rewritten descriptor.
    pub xml: String,
    /// Every parameter that was touched, root first.
    pub augmentations: Vec<Augmentation>,
}

/// Adds the config location and initializer tokens to one scope.
pub fn augment_scope(
    doc: &mut Document,
    scope: &Scope,
    options: &AugmentOptions,
) -> AppResult<Vec<Augmentation>> {
    let style = context_style(doc, scope);
    debug!(scope = %scope.label(doc), ?style, "augmenting scope");

    let default_location = match scope {
        Scope::Root { .. } => DefaultValue::Literal(DEFAULT_ROOT_CONTEXT),
        Scope::Component { .. } => DefaultValue::ComponentLocation,
    };

    let locations = ParameterRequest {
        name: CONTEXT_CONFIG_LOCATION,
        default: default_location,
        token: style.additional_location(),
    };
    let initializers = ParameterRequest {
        name: CONTEXT_INITIALIZER_CLASSES,
        default: DefaultValue::Literal(""),
        token: CONTEXT_INITIALIZER_ADDITIONAL,
    };

    Ok(vec![
        augment_parameter(doc, scope, &locations, options.name_match)?,
        augment_parameter(doc, scope, &initializers, options.name_match)?,
    ])
}

/// Augments the root scope if the descriptor declares a bootstrap listener.
///
/// Returns no records when there is nothing to do.
pub fn augment_root_context(
    doc: &mut Document,
    options: &AugmentOptions,
) -> AppResult<Vec<Augmentation>> {
    if !has_bootstrap_listener(doc) {
        debug!("no bootstrap listener, root context left alone");
        return Ok(Vec::new());
    }
    let scope = Scope::root(doc);
    augment_scope(doc, &scope, options)
}

/// Augments every dispatcher servlet, in document order.
pub fn augment_component_contexts(
    doc: &mut Document,
    options: &AugmentOptions,
) -> AppResult<Vec<Augmentation>> {
    let scopes = component_scopes(doc);
    debug!(count = scopes.len(), "dispatcher servlets located");

    let mut records = Vec::new();
    for scope in &scopes {
        records.extend(augment_scope(doc, scope, options)?);
    }
    Ok(records)
}

/// Parses, augments and serializes a descriptor.
pub fn transform(source: &str, options: &AugmentOptions) -> AppResult<Transformation> {
    let mut doc = Document::parse(source)?;
    let mut augmentations = Vec::new();

    if options.root {
        augmentations.extend(augment_root_context(&mut doc, options)?);
    }
    if options.components {
        augmentations.extend(augment_component_contexts(&mut doc, options)?);
    }

    let xml = serialize(&doc)?;
    info!(
        parameters = augmentations.len(),
        created = augmentations.iter().filter(|a| a.created).count(),
        "descriptor augmented"
    );
    Ok(Transformation { xml, augmentations })
}

/// Rewrites descriptor text with the default options.
pub fn modify_web_xml(source: &str) -> AppResult<String> {
    transform(source, &AugmentOptions::default()).map(|t| t.xml)
}
