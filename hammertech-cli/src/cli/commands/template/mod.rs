//! `template` subcommand

mod handler;

use std::path::PathBuf;

use clap::Args;

use crate::api::ResourceKind;

pub use handler::handle_template_command;

/// Write a blank workbook laid out for an upload type
#[derive(Args, Debug)]
pub struct TemplateCommands {
    /// Upload type the template is for
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// Where to write it (defaults to the standard template file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
