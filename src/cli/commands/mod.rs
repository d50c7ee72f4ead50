pub mod boot;
pub mod settings;

pub use boot::{boot_command, call_command, CallArgs};
pub use settings::{settings_command, SettingsCommands};
