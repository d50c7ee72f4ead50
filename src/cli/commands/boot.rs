use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use log::info;
use serde_json::Value;
use std::sync::Arc;

use officeui::config::Settings;
use officeui::persistence::FileStateStore;
use officeui::{transport, Application};

#[derive(Args)]
pub struct CallArgs {
    /// Registered control name, e.g. Ribbon
    pub service: String,
    /// Method to invoke, e.g. ribbonScroll
    pub method: String,
    /// JSON arguments for the method
    #[arg(long, default_value = "null")]
    pub args: String,
    /// Simulate a click on the page before the call
    #[arg(long)]
    pub click: bool,
}

fn build_application(settings: &Settings) -> Result<Application> {
    let transport = transport::for_root(&settings.resource_root)
        .with_context(|| format!("Invalid resource root '{}'", settings.resource_root))?;
    let state_path = settings.state_file_path()?;
    let store = FileStateStore::open(&state_path)
        .with_context(|| format!("Failed to open state file {:?}", state_path))?;

    Ok(Application::new(settings.shell_options(), transport, Arc::new(store)))
}

async fn boot(settings: &Settings) -> Result<Application> {
    info!(
        "Booting from {} under {}",
        settings.bootstrap_url, settings.resource_root
    );
    let mut app = build_application(settings)?;

    if let Err(e) = app.boot().await {
        eprintln!("{} {} ({})", "✗".red(), "Boot failed".red().bold(), app.phase());
        if let Some(message) = app.loading_message() {
            eprintln!("  loading screen stays on: {}", message.dimmed());
        }
        return Err(e).context("Boot sequence aborted");
    }
    Ok(app)
}

pub async fn boot_command(settings: &Settings) -> Result<()> {
    let mut app = boot(settings).await?;

    println!("{} {}", "✓".green(), app.title().unwrap_or("(untitled)").bold());
    if let Some(appearance) = app.appearance() {
        println!("  {:<10} {} ({})", "style".cyan(), appearance.style().name, appearance.style().stylesheet);
        println!("  {:<10} {} ({})", "theme".cyan(), appearance.theme().name, appearance.theme().stylesheet);
    }
    if let Some(definition) = app.definition() {
        println!("  {:<10} {}", "icons".cyan(), definition.icons.len());
    }
    println!("  {:<10} {}", "services".cyan(), app.registry().names().join(", "));

    for outcome in app.styles_loaded().await {
        if !outcome.is_loaded() {
            println!("  {} stylesheet {} did not load", "!".yellow(), outcome.url());
        }
    }
    Ok(())
}

pub async fn call_command(settings: &Settings, call: CallArgs) -> Result<()> {
    let args: Value = serde_json::from_str(&call.args)
        .with_context(|| format!("--args is not valid JSON: {}", call.args))?;
    let mut app = boot(settings).await?;

    if call.click {
        app.document_click();
    }

    let result = app
        .initialize_service_call(&call.service, &call.method, args)
        .with_context(|| format!("{}.{} failed", call.service, call.method))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
