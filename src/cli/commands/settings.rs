use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use officeui::config::{Settings, SETTING_NAMES};

#[derive(Args)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommands,
}

#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Show current settings
    Show,
    /// Get the value of a specific setting
    Get {
        /// Setting name
        name: String,
    },
    /// Set the value of a specific setting
    Set {
        /// Setting name
        name: String,
        /// Setting value
        value: String,
    },
    /// Reset a setting to its default value
    Reset {
        /// Setting name
        name: String,
    },
}

pub fn settings_command(command: SettingsCommands, mut settings: Settings) -> Result<()> {
    match command.command {
        SettingsSubcommands::Show => {
            println!("{}", "Settings".bold());
            for name in SETTING_NAMES {
                let value = settings.get(name)?;
                let shown = if value.is_empty() { "(default)".dimmed().to_string() } else { value };
                println!("  {:<14} {}", name.cyan(), shown);
            }
            println!("  {:<14} {}", "file".cyan(), Settings::get_config_path()?.display());
        }
        SettingsSubcommands::Get { name } => {
            println!("{}", settings.get(&name)?);
        }
        SettingsSubcommands::Set { name, value } => {
            settings.set(&name, &value)?;
            settings.save()?;
            println!("{} {} = {}", "✓".green(), name, value);
        }
        SettingsSubcommands::Reset { name } => {
            settings.reset(&name)?;
            settings.save()?;
            println!("{} {} reset to '{}'", "✓".green(), name, settings.get(&name)?);
        }
    }
    Ok(())
}
