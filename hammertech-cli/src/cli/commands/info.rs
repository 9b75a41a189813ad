//! `columns` and `regions` subcommands

use anyhow::Result;
use colored::*;

use crate::api::{Endpoints, Region, ResourceKind};
use crate::upload::schema_for;

/// Print the expected column order for an upload type
pub fn handle_columns_command(kind: ResourceKind) -> Result<()> {
    let schema = schema_for(kind);
    println!("{} expected columns (in order):", kind.to_string().bold());
    println!();
    for (i, column) in schema.columns.iter().enumerate() {
        if column.optional {
            println!("  {}. {} {}", i + 1, column.title, "(optional)".dimmed());
        } else {
            println!("  {}. {}", i + 1, column.title);
        }
    }
    println!();
    println!(
        "Default sheet: {}  Endpoint: /{}",
        schema.sheet_name.cyan(),
        kind.endpoint_path()
    );
    Ok(())
}

/// Print the known regions and their endpoints
pub fn handle_regions_command() -> Result<()> {
    for region in Region::ALL {
        let endpoints = Endpoints::for_region(region);
        println!(
            "{} ({})",
            region.slug().bright_green().bold(),
            region.display_name()
        );
        println!("  auth: {}", endpoints.auth_url);
        println!("  api:  {}", endpoints.api_base);
    }
    Ok(())
}
