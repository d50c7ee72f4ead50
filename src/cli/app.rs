use super::commands::{CallArgs, SettingsCommands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "officeui")]
#[command(about = "Boot and drive a configuration-driven ribbon shell")]
pub struct Cli {
    /// Directory or http(s):// base URL serving the configuration files
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// URL of the bootstrap document, relative to the root
    #[arg(long, global = true)]
    pub bootstrap: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the boot sequence and print a summary
    Boot,
    /// Boot, then invoke a method on a registered control
    Call(CallArgs),
    /// Show and change the stored settings
    Settings(SettingsCommands),
}
