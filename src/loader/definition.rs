//! The application definition: title and the icons the shell preloads.

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{deserialize_flag, parse_document, require_object};
use crate::error::Result;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppDefinition {
    pub title: String,
    #[serde(default)]
    pub icons: Vec<IconEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IconEntry {
    pub id: String,
    /// Resource URL of the image.
    #[serde(rename = "Icon")]
    pub resource_url: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub disabled: bool,
    #[serde(default)]
    pub legend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_items: Option<Vec<Value>>,
}

impl AppDefinition {
    pub fn icon_urls(&self) -> impl Iterator<Item = &str> {
        self.icons.iter().map(|icon| icon.resource_url.as_str())
    }
}

pub fn parse_app_definition(url: &str, document: Value) -> Result<AppDefinition> {
    require_object(url, &document)?;
    parse_document(url, document)
}

pub async fn get_app_definition(transport: &dyn Transport, url: &str) -> Result<AppDefinition> {
    info!("Loading application definition from {}", url);
    let document = transport.fetch_json(url).await?;
    parse_app_definition(url, document)
}
