//! Typed ribbon configuration
//!
//! The document looks like
//!
//! ```json
//! {
//!   "Configuration": [{ "PreserveSelectedRibbonTab": "True" }],
//!   "Tabs": [{ "Id": "App", "Groups": [] }, { "Id": "Home", "Groups": [...] }],
//!   "ContextualGroups": [{ "Id": "Picture", "Tabs": [...] }]
//! }
//! ```
//!
//! Tabs nest groups, groups nest areas, areas nest actions, and actions may
//! nest menu items (which are actions themselves).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{Result, ShellError};
use crate::loader::document::{deserialize_flag, parse_flag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tab {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub areas: Vec<Area>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Area {
    pub id: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A button, its icon, and any drop-down menu items under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Resource URL of the icon image.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub disabled: bool,
    #[serde(default)]
    pub menu_items: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContextualGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RibbonConfig {
    preserve_selected_tab: bool,
    /// `tabs[0]` is the application tab; there are always at least two.
    tabs: Vec<Tab>,
    contextual_groups: Vec<ContextualGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RibbonDocument {
    tabs: Vec<Tab>,
    contextual_groups: Vec<ContextualGroup>,
}

impl RibbonConfig {
    /// Check the tab count and id uniqueness every other method relies on.
    pub fn new(
        preserve_selected_tab: bool,
        tabs: Vec<Tab>,
        contextual_groups: Vec<ContextualGroup>,
    ) -> Result<Self> {
        if tabs.len() < 2 {
            return Err(ShellError::ribbon_invalid(format!(
                "at least 2 tabs are required, found {}",
                tabs.len()
            )));
        }

        let mut seen = HashSet::new();
        let all_tabs = tabs
            .iter()
            .chain(contextual_groups.iter().flat_map(|group| group.tabs.iter()));
        for tab in all_tabs {
            if !seen.insert(tab.id.as_str()) {
                return Err(ShellError::ribbon_invalid(format!("duplicate tab id '{}'", tab.id)));
            }
        }

        let mut groups = HashSet::new();
        for group in &contextual_groups {
            if !groups.insert(group.id.as_str()) {
                return Err(ShellError::ribbon_invalid(format!(
                    "duplicate contextual group id '{}'",
                    group.id
                )));
            }
        }

        Ok(Self {
            preserve_selected_tab,
            tabs,
            contextual_groups,
        })
    }

    pub fn preserve_selected_tab(&self) -> bool {
        self.preserve_selected_tab
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn contextual_groups(&self) -> &[ContextualGroup] {
        &self.contextual_groups
    }

    /// Every tab, contextual ones included, for in-place edits of their
    /// actions. Ids are not to be changed through this.
    pub(crate) fn tabs_mut(&mut self) -> impl Iterator<Item = &mut Tab> {
        self.tabs
            .iter_mut()
            .chain(self.contextual_groups.iter_mut().flat_map(|group| group.tabs.iter_mut()))
    }

    pub fn application_tab(&self) -> &Tab {
        &self.tabs[0]
    }

    /// The first selectable tab, used whenever no other tab applies.
    pub fn first_tab(&self) -> &Tab {
        &self.tabs[1]
    }

    /// Selectable tabs that are not in a contextual group.
    pub fn plain_tabs(&self) -> &[Tab] {
        &self.tabs[1..]
    }

    pub fn is_plain_tab(&self, tab_id: &str) -> bool {
        self.plain_tabs().iter().any(|tab| tab.id == tab_id)
    }

    pub fn contextual_group(&self, group_id: &str) -> Option<&ContextualGroup> {
        self.contextual_groups.iter().find(|group| group.id == group_id)
    }

    /// The contextual group a tab lives in, if any.
    pub fn group_of_tab(&self, tab_id: &str) -> Option<&ContextualGroup> {
        self.contextual_groups
            .iter()
            .find(|group| group.tabs.iter().any(|tab| tab.id == tab_id))
    }
}

/// Validate and type a fetched ribbon document.
pub fn parse_ribbon(document: Value) -> Result<RibbonConfig> {
    let object = document
        .as_object()
        .ok_or_else(|| ShellError::ribbon_invalid("the document is not an object"))?;

    for field in ["Configuration", "Tabs", "ContextualGroups"] {
        if object.get(field).is_none_or(Value::is_null) {
            return Err(ShellError::ribbon_invalid(format!("missing '{}'", field)));
        }
    }

    let preserve_selected_tab = object["Configuration"]
        .as_array()
        .and_then(|settings| settings.first())
        .and_then(|settings| settings.get("PreserveSelectedRibbonTab"))
        .and_then(|flag| match flag {
            Value::Bool(value) => Some(*value),
            Value::String(text) => parse_flag(text),
            _ => None,
        })
        .ok_or_else(|| {
            ShellError::ribbon_invalid("missing or invalid 'Configuration[0].PreserveSelectedRibbonTab'")
        })?;

    let document: RibbonDocument = serde_json::from_value(document)
        .map_err(|e| ShellError::ribbon_invalid(e.to_string()))?;

    RibbonConfig::new(preserve_selected_tab, document.tabs, document.contextual_groups)
}
