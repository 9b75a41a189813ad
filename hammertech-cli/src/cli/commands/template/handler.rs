//! Template command handler

use std::path::PathBuf;

use anyhow::{Result, bail};
use colored::*;

use super::TemplateCommands;
use crate::upload::{schema_for, write_template};

pub async fn handle_template_command(args: TemplateCommands) -> Result<()> {
    let schema = schema_for(args.kind);
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(schema.template_file));

    if path.exists() && !args.force {
        bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }

    write_template(schema, &path)?;

    println!(
        "{} template written to {} (sheet {})",
        args.kind,
        path.display().to_string().bright_green(),
        schema.sheet_name.cyan()
    );
    Ok(())
}
