//! Upload command handler

use std::fs;

use anyhow::{Context, Result, bail};
use colored::*;
use is_terminal::IsTerminal;
use log::info;

use super::render::TerminalRenderer;
use super::{DisplayStyle, OutputFormat, UploadCommands};
use crate::api::{AuthManager, Credentials, HammerTechClient, Region, build_http_client};
use crate::config::{self, Config, env_keys};
use crate::upload::{
    DEFAULT_START_ROW, RunMode, RunResult, UploadRequest, UploadRunner, schema_for,
};

/// Handle the upload command
pub async fn handle_upload_command(args: UploadCommands) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    if !args.file.exists() {
        bail!("Workbook does not exist: {}", args.file.display());
    }

    let schema = schema_for(args.kind);
    let sheet = args
        .sheet
        .clone()
        .or_else(|| config.sheet.clone())
        .unwrap_or_else(|| schema.sheet_name.to_string());

    let start_row = args
        .start_row
        .or(config.start_row)
        .unwrap_or(DEFAULT_START_ROW);
    if start_row == 0 {
        bail!("Start row is 1-based, got 0");
    }

    let region = config.resolve_region(args.region)?.unwrap_or_else(|| {
        info!("No region given, using {}", Region::NorthAmerica);
        Region::NorthAmerica
    });

    let mode = if args.dry {
        RunMode::DryRun
    } else {
        RunMode::Upload(gather_credentials(&args, &config, region)?)
    };

    let http = build_http_client(config.timeout())?;
    let authenticator = AuthManager::new(http.clone()).with_auth_host(config.auth_url.clone());
    let client = HammerTechClient::for_region(http, region, config.api_url.as_deref());

    if matches!(args.style, DisplayStyle::Verbose) {
        println!(
            "Target: {} {}",
            "POST".bold(),
            client.endpoints().resource_url(args.kind).cyan()
        );
        println!(
            "Reading sheet {} of {} from row {}",
            sheet.cyan(),
            args.file.display().to_string().cyan(),
            start_row
        );
    }

    let request = UploadRequest {
        kind: args.kind,
        workbook: args.file.clone(),
        sheet,
        start_row,
        mode,
    };

    let runner = UploadRunner::new(authenticator, client);
    let shown_region = (!args.dry).then_some(region);
    let mut renderer = TerminalRenderer::new(args.style, shown_region);

    let result = runner.run(&request, &mut renderer).await?;

    print_summary(&result);

    if let Some(output_path) = &args.output {
        let formatted = format_output(&result, &args.format)?;
        fs::write(output_path, formatted)
            .with_context(|| format!("Failed to write output to: {}", output_path.display()))?;
        println!(
            "Results saved to: {}",
            output_path.display().to_string().bright_green()
        );
    }

    Ok(())
}

/// Collect email, tenant and password; nothing is sent before all three are known
fn gather_credentials(args: &UploadCommands, config: &Config, region: Region) -> Result<Credentials> {
    let email = config::resolve(args.email.clone(), env_keys::EMAIL, config.email.as_ref());
    let tenant = config::resolve(args.tenant.clone(), env_keys::TENANT, config.tenant.as_ref());

    let mut missing = Vec::new();
    if email.is_none() {
        missing.push(format!("an email (--email or {})", env_keys::EMAIL));
    }
    if tenant.is_none() {
        missing.push(format!("a tenant (--tenant or {})", env_keys::TENANT));
    }
    if !missing.is_empty() {
        bail!("Please provide {}", missing.join(" and "));
    }

    let password = read_password()?;

    Ok(Credentials {
        email: email.unwrap_or_default(),
        password,
        tenant: tenant.unwrap_or_default(),
        region,
    })
}

/// Password from `HAMMERTECH_PASSWORD`, otherwise prompt on the terminal
fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(env_keys::PASSWORD) {
        if !password.is_empty() {
            return Ok(password);
        }
    }

    if !std::io::stdin().is_terminal() {
        bail!(
            "Please provide a password ({} or an interactive terminal)",
            env_keys::PASSWORD
        );
    }

    let password =
        rpassword::prompt_password("HammerTech password: ").context("Failed to read password")?;
    if password.is_empty() {
        bail!("Password cannot be empty");
    }
    Ok(password)
}

fn print_summary(result: &RunResult) {
    println!();
    if result.dry_run {
        println!("{}", "Dry run complete, nothing was sent.".bright_green().bold());
    } else {
        println!("{}", "Upload complete.".bright_green().bold());
    }
    println!("Total rows processed: {}", result.rows_processed.to_string().bold());
    println!("Successful: {}", result.succeeded.to_string().green());
    let failed = result.failed.to_string();
    if result.failed > 0 {
        println!("Failed: {}", failed.red().bold());
    } else {
        println!("Failed: {}", failed);
    }
}

/// Format the run result for the --output file
fn format_output(result: &RunResult, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to format JSON output")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(result).context("Failed to format JSON output")
        }
        OutputFormat::Text => {
            let mut text = result.log_lines().join("\n");
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&format!(
                "Total rows processed: {}\nSuccessful: {}\nFailed: {}\n",
                result.rows_processed, result.succeeded, result.failed
            ));
            Ok(text)
        }
    }
}
