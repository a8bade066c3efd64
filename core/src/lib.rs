#![deny(missing_docs)]

//! # Autoreconf Core
//!
//! Rewrites a Java web application deployment descriptor (`WEB-INF/web.xml`)
//! so that Spring application contexts pick up cloud auto-reconfiguration.
//!
//! The root context is augmented when a `ContextLoaderListener` is declared,
//! and every `DispatcherServlet` gets the same treatment in its own scope.
//! Existing configuration is never removed; tokens are only appended.
//!
//! ```no_run
//! let xml = std::fs::read_to_string("WEB-INF/web.xml")?;
//! let rewritten = autoreconf_core::modify_web_xml(&xml)?;
//! std::fs::write("WEB-INF/web.xml", rewritten)?;
//! # Ok::<(), autoreconf_core::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// Arena tree of the descriptor.
pub mod document;

/// Text rendering of a document.
pub mod serializer;

/// Fixed literals shared with the runtime agent.
pub mod markers;

/// Root and servlet scope discovery.
pub mod scope;

/// Annotation vs XML context detection.
pub mod classify;

/// Parameter augmentation logic.
pub mod augment;

/// Read-only descriptor summary.
pub mod report;

pub use augment::{
    augment_component_contexts, augment_parameter, augment_root_context, modify_web_xml,
    transform, AugmentOptions, Augmentation, NameMatch, Transformation,
};
pub use classify::{context_style, is_annotation_style, ContextStyle};
pub use document::{Document, NodeId, NodeKind};
pub use error::{AppError, AppResult};
pub use markers::Marker;
pub use report::{inspect, inspect_web_xml, ComponentReport, DescriptorReport};
pub use scope::{component_scopes, has_bootstrap_listener, ParamKind, Scope};
pub use serializer::serialize;
