//! Active style and theme selection

use serde::Serialize;

use crate::error::{AppearanceKind, Result};
use crate::loader::{resolve_entry, AppearanceEntry, BootstrapConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appearance {
    styles: Vec<AppearanceEntry>,
    themes: Vec<AppearanceEntry>,
    style: AppearanceEntry,
    theme: AppearanceEntry,
}

impl Appearance {
    /// Start from the defaults the bootstrap document resolved.
    pub fn from_bootstrap(config: &BootstrapConfig) -> Self {
        Self {
            styles: config.styles.clone(),
            themes: config.themes.clone(),
            style: config.style.clone(),
            theme: config.theme.clone(),
        }
    }

    pub fn style(&self) -> &AppearanceEntry {
        &self.style
    }

    pub fn theme(&self) -> &AppearanceEntry {
        &self.theme
    }

    pub fn styles(&self) -> &[AppearanceEntry] {
        &self.styles
    }

    pub fn themes(&self) -> &[AppearanceEntry] {
        &self.themes
    }

    /// Stylesheets to inject, style first.
    pub fn stylesheets(&self) -> Vec<String> {
        vec![self.style.stylesheet.clone(), self.theme.stylesheet.clone()]
    }

    /// Look up a style without selecting it.
    pub fn find(&self, kind: AppearanceKind, name: &str) -> Result<&AppearanceEntry> {
        match kind {
            AppearanceKind::Style => resolve_entry(kind, &self.styles, name),
            AppearanceKind::Theme => resolve_entry(kind, &self.themes, name),
        }
    }

    pub fn select(&mut self, kind: AppearanceKind, name: &str) -> Result<&AppearanceEntry> {
        let entry = self.find(kind, name)?.clone();
        let slot = match kind {
            AppearanceKind::Style => &mut self.style,
            AppearanceKind::Theme => &mut self.theme,
        };
        *slot = entry;
        Ok(&*slot)
    }
}
