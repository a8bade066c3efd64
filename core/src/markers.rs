//! # Fixed Literals
//!
//! Element names, parameter keys and class names shared with the runtime
//! agent that reads the augmented descriptor. These must not change.

/// `param-name` value that selects the application context implementation.
pub const CONTEXT_CLASS: &str = "contextClass";

/// Context implementation that marks a scope as annotation driven.
pub const CONTEXT_CLASS_ANNOTATION: &str =
    "org.springframework.web.context.support.AnnotationConfigWebApplicationContext";

/// Parameter listing the context configuration locations.
pub const CONTEXT_CONFIG_LOCATION: &str = "contextConfigLocation";

/// Parameter listing the context initializer classes.
pub const CONTEXT_INITIALIZER_CLASSES: &str = "contextInitializerClasses";

/// Location used by the root context when `contextConfigLocation` is absent.
pub const DEFAULT_ROOT_CONTEXT: &str = "/WEB-INF/applicationContext.xml";

/// Extra location appended to annotation driven contexts.
pub const ANNOTATION_ADDITIONAL_CONTEXT: &str =
    "org.cloudfoundry.reconfiguration.spring.web.CloudAppAnnotationConfigAutoReconfig";

/// Extra location appended to XML driven contexts.
pub const XML_ADDITIONAL_CONTEXT: &str =
    "classpath:META-INF/cloud/cloudfoundry-auto-reconfiguration-context.xml";

/// Initializer appended to every augmented scope.
pub const CONTEXT_INITIALIZER_ADDITIONAL: &str =
    "org.cloudfoundry.reconfiguration.spring.CloudApplicationContextInitializer";

/// Descriptor element names.
pub mod elements {
    /// Listener implementation class.
    pub const LISTENER_CLASS: &str = "listener-class";
    /// Component (servlet) declaration.
    pub const SERVLET: &str = "servlet";
    /// Component name.
    pub const SERVLET_NAME: &str = "servlet-name";
    /// Component implementation class.
    pub const SERVLET_CLASS: &str = "servlet-class";
    /// Root-level parameter.
    pub const CONTEXT_PARAM: &str = "context-param";
    /// Component-level parameter.
    pub const INIT_PARAM: &str = "init-param";
    /// Parameter name node.
    pub const PARAM_NAME: &str = "param-name";
    /// Parameter value node.
    pub const PARAM_VALUE: &str = "param-value";
}

/// Class-name fragments that trigger augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A root context bootstrap listener.
    BootstrapListener,
    /// A front-controller servlet.
    DispatcherServlet,
}

impl Marker {
    /// The fragment searched for in class names.
    pub const fn literal(self) -> &'static str {
        match self {
            Marker::BootstrapListener => "ContextLoaderListener",
            Marker::DispatcherServlet => "DispatcherServlet",
        }
    }

    /// True when `class_name` contains the marker.
    pub fn matches(self, class_name: &str) -> bool {
        class_name.contains(self.literal())
    }
}
