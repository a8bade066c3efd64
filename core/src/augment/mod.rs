#![deny(missing_docs)]

//! # Parameter Augmentation
//!
//! Appends auto-reconfiguration tokens to context parameters.
//!
//! - **common**: Name matching and value tokenizing.
//! - **params**: The single-parameter algorithm (find or create, split, append, rejoin).
//! - **workflows**: Root and servlet recipes plus the text-in/text-out entry point.
//!
//! Augmentation is not idempotent: running it twice on one document appends
//! every token twice. Callers run it once per build.

pub(crate) mod common;

/// Single-parameter augmentation.
pub mod params;

/// High-level augmentation workflows.
pub mod workflows;

pub use common::{tokenize, NameMatch};
pub use params::{augment_parameter, find_parameter, Augmentation, DefaultValue, ParameterRequest};
pub use workflows::{
    augment_component_contexts, augment_root_context, augment_scope, modify_web_xml,
    transform, AugmentOptions, Transformation,
};
