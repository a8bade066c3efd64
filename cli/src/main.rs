#![deny(missing_docs)]

//! # Autoreconf CLI
//!
//! Build-step tool that prepares Java web applications for cloud
//! auto-reconfiguration.
//!
//! Supported Commands:
//! - `augment`: Injects auto-reconfiguration parameters into `WEB-INF/web.xml`.
//! - `inspect`: Reports the scopes and context styles found in a descriptor.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod augment;
mod descriptors;
mod error;
mod inspect;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "web.xml auto-reconfiguration CLI")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inject auto-reconfiguration parameters into a deployment descriptor.
    Augment(augment::AugmentArgs),
    /// Report what augmentation would act on.
    Inspect(inspect::InspectArgs),
}

fn main() -> CliResult<()> {
    logging::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Augment(args) => augment::execute(args)?,
        Commands::Inspect(args) => inspect::execute(args)?,
    }

    Ok(())
}
