#![deny(missing_docs)]

//! # Inspect Command
//!
//! Prints what augmentation would act on, without touching the descriptor.

use crate::augment::MatchMode;
use crate::descriptors;
use crate::error::{CliError, CliResult};
use autoreconf_core::inspect_web_xml;
use std::fs;
use std::path::PathBuf;

/// Output format of the report.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the inspect command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Descriptor file, or an application directory containing `WEB-INF/web.xml`.
    pub path: PathBuf,

    /// Report format.
    #[clap(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    /// How existing `param-name` values are matched.
    #[clap(long, value_enum, env = "AUTORECONF_MATCH_MODE", default_value_t = MatchMode::Contains)]
    pub match_mode: MatchMode,
}

/// Executes the inspect command.
pub fn execute(args: &InspectArgs) -> CliResult<()> {
    for report in render(args)? {
        println!("{}", report);
    }
    Ok(())
}

/// Renders one report per resolved descriptor.
pub fn render(args: &InspectArgs) -> CliResult<Vec<String>> {
    let mut out = Vec::new();
    for path in descriptors::resolve(&args.path)? {
        let content = fs::read_to_string(&path)
            .map_err(|e| CliError::General(format!("Failed to read {:?}: {}", path, e)))?;
        let report = inspect_web_xml(&content, args.match_mode.into())?;

        let text = match args.format {
            ReportFormat::Json => serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::General(format!("Failed to render JSON: {}", e)))?,
            ReportFormat::Yaml => serde_yaml::to_string(&report)
                .map_err(|e| CliError::General(format!("Failed to render YAML: {}", e)))?,
        };
        out.push(text);
    }
    Ok(out)
}
