use autoreconf_core::markers::{
    ANNOTATION_ADDITIONAL_CONTEXT, CONTEXT_INITIALIZER_ADDITIONAL, DEFAULT_ROOT_CONTEXT,
    XML_ADDITIONAL_CONTEXT,
};
use autoreconf_core::{
    augment_component_contexts, augment_root_context, modify_web_xml, serialize, transform,
    AppError, AugmentOptions, Document, NameMatch,
};
use pretty_assertions::assert_eq;

const SPRING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<web-app xmlns="http://java.sun.com/xml/ns/javaee" version="2.5">

    <listener>
        <listener-class>org.springframework.web.context.ContextLoaderListener</listener-class>
    </listener>

    <servlet>
        <servlet-name>foo</servlet-name>
        <servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class>
        <load-on-startup>1</load-on-startup>
    </servlet>

</web-app>
"#;

const SPRING_XML_AUGMENTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<web-app xmlns="http://java.sun.com/xml/ns/javaee" version="2.5">

    <listener>
        <listener-class>org.springframework.web.context.ContextLoaderListener</listener-class>
    </listener>

    <servlet>
        <servlet-name>foo</servlet-name>
        <servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class>
        <load-on-startup>1</load-on-startup>
        <init-param>
            <param-name>contextConfigLocation</param-name>
            <param-value>/WEB-INF/foo-servlet.xml classpath:META-INF/cloud/cloudfoundry-auto-reconfiguration-context.xml</param-value>
        </init-param>
        <init-param>
            <param-name>contextInitializerClasses</param-name>
            <param-value>org.cloudfoundry.reconfiguration.spring.CloudApplicationContextInitializer</param-value>
        </init-param>
    </servlet>
    <context-param>
        <param-name>contextConfigLocation</param-name>
        <param-value>/WEB-INF/applicationContext.xml classpath:META-INF/cloud/cloudfoundry-auto-reconfiguration-context.xml</param-value>
    </context-param>
    <context-param>
        <param-name>contextInitializerClasses</param-name>
        <param-value>org.cloudfoundry.reconfiguration.spring.CloudApplicationContextInitializer</param-value>
    </context-param>

</web-app>
"#;

fn values_of(xml: &str, scope_path: &str, name: &str) -> Vec<String> {
    let doc = Document::parse(xml).unwrap();
    doc.query(doc.root(), scope_path)
        .into_iter()
        .filter(|param| {
            doc.child_named(*param, "param-name")
                .and_then(|n| doc.text(n))
                .is_some_and(|n| n.trim() == name)
        })
        .filter_map(|param| doc.child_named(param, "param-value"))
        .filter_map(|value| doc.text(value))
        .collect()
}

#[test]
fn test_full_descriptor_keeps_layout() {
    assert_eq!(modify_web_xml(SPRING_XML).unwrap(), SPRING_XML_AUGMENTED);
}

#[test]
fn test_root_default_location_created_once() {
    let xml = "<web-app><listener><listener-class>org.springframework.web.context.ContextLoaderListener</listener-class></listener></web-app>";
    let out = modify_web_xml(xml).unwrap();
    assert_eq!(
        values_of(&out, "context-param", "contextConfigLocation"),
        vec![format!("{} {}", DEFAULT_ROOT_CONTEXT, XML_ADDITIONAL_CONTEXT)]
    );
}

#[test]
fn test_root_existing_locations_keep_order() {
    let xml = r#"<web-app>
  <context-param>
    <param-name>contextConfigLocation</param-name>
    <param-value>
      /WEB-INF/spring/root.xml,
      /WEB-INF/spring/security.xml
    </param-value>
  </context-param>
  <listener><listener-class>org.springframework.web.context.ContextLoaderListener</listener-class></listener>
</web-app>"#;
    let out = modify_web_xml(xml).unwrap();
    assert_eq!(
        values_of(&out, "context-param", "contextConfigLocation"),
        vec![format!(
            "/WEB-INF/spring/root.xml /WEB-INF/spring/security.xml {}",
            XML_ADDITIONAL_CONTEXT
        )]
    );
}

#[test]
fn test_root_annotation_style_token() {
    let xml = r#"<web-app>
  <context-param>
    <param-name>contextClass</param-name>
    <param-value>org.springframework.web.context.support.AnnotationConfigWebApplicationContext</param-value>
  </context-param>
  <context-param>
    <param-name>contextConfigLocation</param-name>
    <param-value>com.example.RootConfig</param-value>
  </context-param>
  <listener><listener-class>org.springframework.web.context.ContextLoaderListener</listener-class></listener>
</web-app>"#;
    let out = modify_web_xml(xml).unwrap();
    assert_eq!(
        values_of(&out, "context-param", "contextConfigLocation"),
        vec![format!("com.example.RootConfig {}", ANNOTATION_ADDITIONAL_CONTEXT)]
    );
}

#[test]
fn test_component_named_foo() {
    let xml = "<web-app><servlet><servlet-name>foo</servlet-name><servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class></servlet></web-app>";
    let out = modify_web_xml(xml).unwrap();
    assert_eq!(
        values_of(&out, "servlet/init-param", "contextConfigLocation"),
        vec![format!("/WEB-INF/foo-servlet.xml {}", XML_ADDITIONAL_CONTEXT)]
    );
    // no listener, so the root scope is untouched
    assert!(values_of(&out, "context-param", "contextConfigLocation").is_empty());
}

#[test]
fn test_each_dispatcher_servlet_uses_its_own_name() {
    let xml = r#"<web-app>
  <servlet><servlet-name>api</servlet-name><servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class></servlet>
  <servlet><servlet-name>static</servlet-name><servlet-class>org.apache.catalina.servlets.DefaultServlet</servlet-class></servlet>
  <servlet><servlet-name>admin</servlet-name><servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class></servlet>
</web-app>"#;
    let out = transform(xml, &AugmentOptions::default()).unwrap();
    assert_eq!(
        values_of(&out.xml, "servlet/init-param", "contextConfigLocation"),
        vec![
            format!("/WEB-INF/api-servlet.xml {}", XML_ADDITIONAL_CONTEXT),
            format!("/WEB-INF/admin-servlet.xml {}", XML_ADDITIONAL_CONTEXT),
        ]
    );
    let scopes: Vec<&str> = out.augmentations.iter().map(|a| a.scope.as_str()).collect();
    assert_eq!(
        scopes,
        vec!["servlet 'api'", "servlet 'api'", "servlet 'admin'", "servlet 'admin'"]
    );
}

#[test]
fn test_initializer_appended_regardless_of_style() {
    let xml = r#"<web-app>
  <servlet>
    <servlet-name>api</servlet-name>
    <servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class>
    <init-param>
      <param-name>contextClass</param-name>
      <param-value>org.springframework.web.context.support.AnnotationConfigWebApplicationContext</param-value>
    </init-param>
    <init-param>
      <param-name>contextInitializerClasses</param-name>
      <param-value>com.example.FirstInitializer;com.example.SecondInitializer</param-value>
    </init-param>
  </servlet>
</web-app>"#;
    let out = modify_web_xml(xml).unwrap();
    assert_eq!(
        values_of(&out, "servlet/init-param", "contextInitializerClasses"),
        vec![format!(
            "com.example.FirstInitializer com.example.SecondInitializer {}",
            CONTEXT_INITIALIZER_ADDITIONAL
        )]
    );
    assert_eq!(
        values_of(&out, "servlet/init-param", "contextConfigLocation"),
        vec![format!("/WEB-INF/api-servlet.xml {}", ANNOTATION_ADDITIONAL_CONTEXT)]
    );
}

#[test]
fn test_unrelated_descriptor_is_unchanged() {
    let xml = r#"<?xml version="1.0"?>
<web-app>
  <listener><listener-class>com.example.StartupListener</listener-class></listener>
  <servlet>
    <servlet-name>jersey</servlet-name>
    <servlet-class>org.glassfish.jersey.servlet.ServletContainer</servlet-class>
  </servlet>
</web-app>
"#;
    let mut doc = Document::parse(xml).unwrap();
    let options = AugmentOptions::default();
    assert!(augment_root_context(&mut doc, &options).unwrap().is_empty());
    assert!(augment_component_contexts(&mut doc, &options).unwrap().is_empty());
    assert_eq!(serialize(&doc).unwrap(), xml);
}

#[test]
fn test_augmenting_twice_duplicates_tokens() {
    let once = modify_web_xml(SPRING_XML).unwrap();
    let twice = modify_web_xml(&once).unwrap();

    let root = values_of(&twice, "context-param", "contextConfigLocation");
    assert_eq!(
        root,
        vec![format!(
            "{} {} {}",
            DEFAULT_ROOT_CONTEXT, XML_ADDITIONAL_CONTEXT, XML_ADDITIONAL_CONTEXT
        )]
    );
    let initializers = values_of(&twice, "servlet/init-param", "contextInitializerClasses");
    assert_eq!(
        initializers,
        vec![format!(
            "{} {}",
            CONTEXT_INITIALIZER_ADDITIONAL, CONTEXT_INITIALIZER_ADDITIONAL
        )]
    );
    // still one parameter of each kind per scope
    assert_eq!(twice.matches("<context-param>").count(), 2);
    assert_eq!(twice.matches("<init-param>").count(), 2);
}

#[test]
fn test_round_trip_without_augmentation() {
    let doc = Document::parse(SPRING_XML).unwrap();
    assert_eq!(serialize(&doc).unwrap(), SPRING_XML);
}

#[test]
fn test_substring_match_policy() {
    let xml = r#"<web-app>
  <listener><listener-class>org.springframework.web.context.ContextLoaderListener</listener-class></listener>
  <context-param>
    <param-name>contextConfigLocationBackup</param-name>
    <param-value>/WEB-INF/old.xml</param-value>
  </context-param>
</web-app>"#;

    let tolerant = transform(xml, &AugmentOptions::default()).unwrap();
    assert_eq!(
        values_of(&tolerant.xml, "context-param", "contextConfigLocationBackup"),
        vec![format!("/WEB-INF/old.xml {}", XML_ADDITIONAL_CONTEXT)]
    );
    assert!(values_of(&tolerant.xml, "context-param", "contextConfigLocation").is_empty());

    let strict = AugmentOptions {
        name_match: NameMatch::Exact,
        ..AugmentOptions::default()
    };
    let exact = transform(xml, &strict).unwrap();
    assert_eq!(
        values_of(&exact.xml, "context-param", "contextConfigLocationBackup"),
        vec!["/WEB-INF/old.xml".to_string()]
    );
    assert_eq!(
        values_of(&exact.xml, "context-param", "contextConfigLocation"),
        vec![format!("{} {}", DEFAULT_ROOT_CONTEXT, XML_ADDITIONAL_CONTEXT)]
    );
}

#[test]
fn test_crlf_descriptor_keeps_line_endings() {
    let xml = SPRING_XML.replace('\n', "\r\n");
    let out = modify_web_xml(&xml).unwrap();
    assert_eq!(out, SPRING_XML_AUGMENTED.replace('\n', "\r\n"));
}

#[test]
fn test_doctype_entities_are_accepted() {
    let xml = r#"<!DOCTYPE web-app [<!ENTITY loader "org.springframework.web.context.ContextLoaderListener">]>
<web-app><listener><listener-class>&loader;</listener-class></listener></web-app>"#;
    let out = modify_web_xml(xml).unwrap();
    assert_eq!(
        values_of(&out, "context-param", "contextConfigLocation"),
        vec![format!("{} {}", DEFAULT_ROOT_CONTEXT, XML_ADDITIONAL_CONTEXT)]
    );
}

#[test]
fn test_malformed_descriptor_is_a_parse_error() {
    let err = modify_web_xml("<web-app><servlet></web-app>").unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}

#[test]
fn test_nameless_dispatcher_is_a_structural_error() {
    let xml = "<web-app><servlet><servlet-class>org.springframework.web.servlet.DispatcherServlet</servlet-class></servlet></web-app>";
    let err = modify_web_xml(xml).unwrap_err();
    assert_eq!(
        format!("{}", err),
        "Structural Error: missing <servlet-name> in servlet #1"
    );
}
