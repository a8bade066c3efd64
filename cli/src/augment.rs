#![deny(missing_docs)]

//! # Augment Command
//!
//! The build step: reads each descriptor, injects the auto-reconfiguration
//! parameters, and writes the result back.
//!
//! 1. **Resolve**: a descriptor file, or every `WEB-INF/web.xml` under an application directory.
//! 2. **Transform**: root context, then dispatcher servlets.
//! 3. **Persist**: in place, to `--output`, or to stdout.

use crate::descriptors;
use crate::error::{CliError, CliResult};
use autoreconf_core::{transform, AugmentOptions, NameMatch, Transformation};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameter name matching, as exposed on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `param-name` contains the parameter name.
    Contains,
    /// `param-name` equals the parameter name.
    Exact,
}

impl From<MatchMode> for NameMatch {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Contains => NameMatch::Contains,
            MatchMode::Exact => NameMatch::Exact,
        }
    }
}

/// Arguments for the augment command.
#[derive(clap::Args, Debug, Clone)]
pub struct AugmentArgs {
    /// Descriptor file, or an application directory containing `WEB-INF/web.xml`.
    pub path: PathBuf,

    /// Write the result here instead of rewriting the descriptor in place.
    #[clap(long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the result instead of writing a file.
    #[clap(long)]
    pub stdout: bool,

    /// How existing `param-name` values are matched.
    #[clap(long, value_enum, env = "AUTORECONF_MATCH_MODE", default_value_t = MatchMode::Contains)]
    pub match_mode: MatchMode,

    /// Leave the root context alone.
    #[clap(long)]
    pub skip_root: bool,

    /// Leave dispatcher servlets alone.
    #[clap(long)]
    pub skip_servlets: bool,
}

impl AugmentArgs {
    /// Core options for these arguments.
    pub fn options(&self) -> AugmentOptions {
        AugmentOptions {
            name_match: self.match_mode.into(),
            root: !self.skip_root,
            components: !self.skip_servlets,
        }
    }
}

/// Executes the augment command.
pub fn execute(args: &AugmentArgs) -> CliResult<()> {
    let targets = descriptors::resolve(&args.path)?;
    let redirected = args.output.is_some() || args.stdout;

    if redirected && args.path.is_dir() {
        return Err(CliError::General(
            "--output and --stdout need a descriptor file, not a directory".into(),
        ));
    }

    // Every descriptor is transformed before any is written.
    let options = args.options();
    let results = targets
        .iter()
        .map(|target| Ok((target, augment_file(target, &options)?)))
        .collect::<CliResult<Vec<_>>>()?;

    for (target, result) in &results {
        if args.stdout {
            print!("{}", result.xml);
            eprintln!("{}", summarize(target, result));
            continue;
        }

        let destination = args.output.as_deref().unwrap_or(target);
        write_descriptor(destination, &result.xml)?;
        println!("{}", summarize(destination, result));
    }

    Ok(())
}

/// Reads and transforms one descriptor.
pub fn augment_file(path: &Path, options: &AugmentOptions) -> CliResult<Transformation> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::General(format!("Failed to read {:?}: {}", path, e)))?;
    Ok(transform(&content, options)?)
}

fn write_descriptor(path: &Path, xml: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::General(format!("Failed to create output dir: {}", e)))?;
    }
    fs::write(path, xml)
        .map_err(|e| CliError::General(format!("Failed to write {:?}: {}", path, e)))
}

fn summarize(path: &Path, result: &Transformation) -> String {
    if result.augmentations.is_empty() {
        return format!("No auto-reconfiguration needed for {:?}", path);
    }
    let mut lines = vec![format!(
        "Augmented {} parameter(s) in {:?}:",
        result.augmentations.len(),
        path
    )];
    for a in &result.augmentations {
        lines.push(format!(
            "  {} {} += {}{}",
            a.scope,
            a.parameter,
            a.appended,
            if a.created { " (created)" } else { "" }
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WEB_XML: &str = r#"<web-app>
  <listener>
    <listener-class>org.springframework.web.context.ContextLoaderListener</listener-class>
  </listener>
</web-app>
"#;

    fn args(path: PathBuf) -> AugmentArgs {
        AugmentArgs {
            path,
            output: None,
            stdout: false,
            match_mode: MatchMode::Contains,
            skip_root: false,
            skip_servlets: false,
        }
    }

    #[test]
    fn test_execute_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("web.xml");
        fs::write(&path, WEB_XML).unwrap();

        execute(&args(path.clone())).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("<param-name>contextConfigLocation</param-name>"));
        assert!(contents.contains("CloudApplicationContextInitializer"));
    }

    #[test]
    fn test_execute_to_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("web.xml");
        let output = dir.path().join("out/web.xml");
        fs::write(&path, WEB_XML).unwrap();

        let mut a = args(path.clone());
        a.output = Some(output.clone());
        execute(&a).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), WEB_XML);
        assert!(fs::read_to_string(output)
            .unwrap()
            .contains("/WEB-INF/applicationContext.xml"));
    }

    #[test]
    fn test_execute_application_directory() {
        let dir = tempdir().unwrap();
        let web_inf = dir.path().join("WEB-INF");
        fs::create_dir_all(&web_inf).unwrap();
        fs::write(web_inf.join("web.xml"), WEB_XML).unwrap();

        execute(&args(dir.path().to_path_buf())).unwrap();

        let contents = fs::read_to_string(web_inf.join("web.xml")).unwrap();
        assert!(contents.contains("contextInitializerClasses"));
    }

    #[test]
    fn test_directory_rejects_output() {
        let dir = tempdir().unwrap();
        let web_inf = dir.path().join("WEB-INF");
        fs::create_dir_all(&web_inf).unwrap();
        fs::write(web_inf.join("web.xml"), WEB_XML).unwrap();

        let mut a = args(dir.path().to_path_buf());
        a.stdout = true;
        let err = execute(&a).unwrap_err();
        assert!(format!("{}", err).contains("need a descriptor file"));
    }

    #[test]
    fn test_skip_root_leaves_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("web.xml");
        fs::write(&path, WEB_XML).unwrap();

        let mut a = args(path.clone());
        a.skip_root = true;
        execute(&a).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), WEB_XML);
    }

    #[test]
    fn test_malformed_descriptor_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("web.xml");
        fs::write(&path, "<web-app>").unwrap();

        let err = execute(&args(path.clone())).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(fs::read_to_string(path).unwrap(), "<web-app>");
    }

    #[test]
    fn test_directory_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a/WEB-INF/web.xml");
        let bad = dir.path().join("b/WEB-INF/web.xml");
        fs::create_dir_all(good.parent().unwrap()).unwrap();
        fs::create_dir_all(bad.parent().unwrap()).unwrap();
        fs::write(&good, WEB_XML).unwrap();
        fs::write(&bad, "<web-app>").unwrap();

        let err = execute(&args(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(fs::read_to_string(good).unwrap(), WEB_XML);
        assert_eq!(fs::read_to_string(bad).unwrap(), "<web-app>");
    }

    #[test]
    fn test_match_mode_conversion() {
        assert_eq!(NameMatch::from(MatchMode::Exact), NameMatch::Exact);
        assert_eq!(NameMatch::from(MatchMode::Contains), NameMatch::Contains);
    }
}
