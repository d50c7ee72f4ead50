//! The bootstrap document: styles, themes, controls and the location of the
//! application definition.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{parse_document, require_fields, require_object};
use crate::error::{AppearanceKind, Result, ShellError};
use crate::transport::Transport;

pub const DEFAULT_BOOTSTRAP_URL: &str = "/Configuration/Application/OfficeUI.config.json";

const REQUIRED_FIELDS: &[&str] = &[
    "Styles",
    "DefaultStyle",
    "Themes",
    "DefaultTheme",
    "Configuration",
    "Controls",
    "LoadingMessage",
];

/// A named stylesheet, used for both styles and themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceEntry {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Stylesheet")]
    pub stylesheet: String,
}

/// One control declared by the bootstrap document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDescriptor {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Service")]
    pub service_identifier: String,
    #[serde(rename = "ConfigurationFile")]
    pub configuration_file_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BootstrapDocument {
    styles: Vec<AppearanceEntry>,
    default_style: String,
    themes: Vec<AppearanceEntry>,
    default_theme: String,
    configuration: Value,
    controls: Vec<ControlDescriptor>,
    loading_message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    pub source_url: String,
    pub styles: Vec<AppearanceEntry>,
    pub default_style: String,
    pub themes: Vec<AppearanceEntry>,
    pub default_theme: String,
    /// Opaque to the shell apart from the application definition location.
    pub configuration: Value,
    pub controls: Vec<ControlDescriptor>,
    pub loading_message: String,
    /// The style named by `default_style`.
    pub style: AppearanceEntry,
    /// The theme named by `default_theme`.
    pub theme: AppearanceEntry,
}

impl BootstrapConfig {
    /// Where the application definition lives: `Configuration` is either the
    /// URL itself or a list whose first string entry is the URL.
    pub fn app_definition_url(&self) -> Result<&str> {
        let url = match &self.configuration {
            Value::String(url) => Some(url.as_str()),
            Value::Array(items) => items.iter().find_map(Value::as_str),
            _ => None,
        };

        url.filter(|url| !url.is_empty())
            .ok_or_else(|| ShellError::MalformedDocument {
                url: self.source_url.clone(),
                reason: "'Configuration' does not name an application definition".to_string(),
            })
    }
}

/// Find the single entry called `id`. Zero or several matches are errors.
pub fn resolve_entry<'a>(
    kind: AppearanceKind,
    entries: &'a [AppearanceEntry],
    id: &str,
) -> Result<&'a AppearanceEntry> {
    let mut matches = entries.iter().filter(|entry| entry.name == id);

    match (matches.next(), matches.count()) {
        (None, _) => Err(ShellError::DefaultNotFound {
            kind,
            id: id.to_string(),
        }),
        (Some(entry), 0) => Ok(entry),
        (Some(_), rest) => Err(ShellError::AmbiguousDefault {
            kind,
            id: id.to_string(),
            matches: rest + 1,
        }),
    }
}

/// Turn a fetched bootstrap document into a validated configuration.
pub fn parse_bootstrap(url: &str, document: Value) -> Result<BootstrapConfig> {
    let object = require_object(url, &document)?;
    require_fields(url, object, REQUIRED_FIELDS)?;

    let document: BootstrapDocument = parse_document(url, document)?;
    let style = resolve_entry(AppearanceKind::Style, &document.styles, &document.default_style)?.clone();
    let theme = resolve_entry(AppearanceKind::Theme, &document.themes, &document.default_theme)?.clone();

    debug!(
        "Bootstrap {} declares {} styles, {} themes, {} controls",
        url,
        document.styles.len(),
        document.themes.len(),
        document.controls.len()
    );

    Ok(BootstrapConfig {
        source_url: url.to_string(),
        styles: document.styles,
        default_style: document.default_style,
        themes: document.themes,
        default_theme: document.default_theme,
        configuration: document.configuration,
        controls: document.controls,
        loading_message: document.loading_message,
        style,
        theme,
    })
}

pub async fn get_bootstrap_configuration(transport: &dyn Transport, url: &str) -> Result<BootstrapConfig> {
    info!("Loading bootstrap configuration from {}", url);
    let document = transport.fetch_json(url).await?;
    parse_bootstrap(url, document)
}
