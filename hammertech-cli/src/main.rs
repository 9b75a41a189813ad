//! hammertech-cli - bulk create HammerTech users, projects and employer
//! profiles from an Excel workbook.

use anyhow::Result;
use clap::{Parser, Subcommand};

use hammertech_cli::api::ResourceKind;
use hammertech_cli::cli::commands::{
    TemplateCommands, UploadCommands, handle_columns_command, handle_regions_command,
    handle_template_command, handle_upload_command,
};

/// Bulk uploader for the HammerTech API
#[derive(Parser, Debug)]
#[command(name = "hammertech-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload rows from a workbook
    Upload(UploadCommands),

    /// Write a blank template workbook
    Template(TemplateCommands),

    /// Show the expected column order for an upload type
    Columns {
        #[arg(value_enum)]
        kind: ResourceKind,
    },

    /// List regions and their endpoints
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Upload(args) => handle_upload_command(args).await,
        Commands::Template(args) => handle_template_command(args).await,
        Commands::Columns { kind } => handle_columns_command(kind),
        Commands::Regions => handle_regions_command(),
    }
}
