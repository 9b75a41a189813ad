//! `upload` subcommand

mod handler;
mod render;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::api::{Region, ResourceKind};

pub use handler::handle_upload_command;

/// Create resources from the rows of an Excel sheet
#[derive(Args, Debug)]
pub struct UploadCommands {
    /// Excel workbook (.xlsx or .xlsm)
    pub file: PathBuf,

    /// What the rows describe
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: ResourceKind,

    /// Sheet to read (defaults to the template's sheet name)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// First data row, 1-based (default 2, skipping the header)
    #[arg(long)]
    pub start_row: Option<usize>,

    /// HammerTech region
    #[arg(short, long, value_enum)]
    pub region: Option<Region>,

    /// Login email (or HAMMERTECH_EMAIL)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Tenant (or HAMMERTECH_TENANT)
    #[arg(long)]
    pub tenant: Option<String>,

    /// Map the rows and print the payloads without logging in or sending
    #[arg(long)]
    pub dry: bool,

    /// Write the run result to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Format of the --output file
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// How much to print while running
    #[arg(long, value_enum, default_value = "normal")]
    pub style: DisplayStyle,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One log line per row followed by the totals
    Text,
    Json,
    JsonCompact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayStyle {
    /// Totals only
    Quiet,
    /// One line per row
    Normal,
    /// Also print each row before it is sent
    Verbose,
}
