//! The ribbon state machine
//!
//! Owns the active tab, the set of active contextual groups and the
//! visibility state. All mutation goes through the transition methods below.

use chrono::Duration;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Action, RibbonConfig, Tab};
use super::visitor;
use crate::error::{Result, ShellError, TabRejection};
use crate::persistence::StateStore;

pub const SELECTED_TAB_KEY: &str = "OfficeUIRibbon_SelectedTab";

/// How long a remembered tab survives.
pub fn selected_tab_retention() -> Duration {
    Duration::days(365)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RibbonVisibility {
    /// Collapsed.
    Hidden,
    /// Temporarily expanded over the content after a tab was picked while
    /// collapsed.
    Visible,
    /// Pinned open.
    Showed,
    /// Pinned open, first paint.
    ShowedInitialized,
}

impl RibbonVisibility {
    pub fn is_showed(self) -> bool {
        matches!(self, RibbonVisibility::Showed | RibbonVisibility::ShowedInitialized)
    }
}

/// Tabs that may be activated right now, in scroll order.
pub struct EligibleTabs<'a> {
    tabs: Vec<&'a Tab>,
}

impl<'a> EligibleTabs<'a> {
    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == tab_id)
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.position(tab_id).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&'a Tab> {
        self.tabs.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.tabs.iter().map(|tab| tab.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonSnapshot {
    pub active_tab: String,
    pub active_contextual_groups: Vec<String>,
    pub visibility: RibbonVisibility,
}

pub struct RibbonStateMachine {
    config: RibbonConfig,
    active_tab: String,
    active_groups: BTreeSet<String>,
    visibility: RibbonVisibility,
    store: Arc<dyn StateStore>,
}

impl RibbonStateMachine {
    /// Seed the active tab from the store when the ribbon remembers its
    /// selection, otherwise (or when nothing usable is stored) use `tabs[1]`.
    pub fn new(config: RibbonConfig, store: Arc<dyn StateStore>) -> Self {
        let remembered = if config.preserve_selected_tab() {
            store
                .get(SELECTED_TAB_KEY)
                .filter(|tab_id| !tab_id.is_empty())
        } else {
            None
        };

        let active_tab = match remembered {
            Some(tab_id) if config.is_plain_tab(&tab_id) => tab_id,
            Some(tab_id) => {
                warn!("Remembered tab '{}' is no longer selectable", tab_id);
                config.first_tab().id.clone()
            }
            None => config.first_tab().id.clone(),
        };
        debug!("Ribbon starts on tab '{}'", active_tab);

        Self {
            config,
            active_tab,
            active_groups: BTreeSet::new(),
            visibility: RibbonVisibility::ShowedInitialized,
            store,
        }
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    pub fn visibility(&self) -> RibbonVisibility {
        self.visibility
    }

    pub fn active_contextual_groups(&self) -> impl Iterator<Item = &str> {
        self.active_groups.iter().map(String::as_str)
    }

    pub fn is_tab_active(&self, tab_id: &str) -> bool {
        self.active_tab == tab_id
    }

    pub fn is_contextual_group_active(&self, group_id: &str) -> bool {
        self.active_groups.contains(group_id)
    }

    pub fn snapshot(&self) -> RibbonSnapshot {
        RibbonSnapshot {
            active_tab: self.active_tab.clone(),
            active_contextual_groups: self.active_groups.iter().cloned().collect(),
            visibility: self.visibility,
        }
    }

    /// Plain tabs after the application tab, then the tabs of each active
    /// contextual group, in declaration order.
    pub fn eligible_tabs(&self) -> EligibleTabs<'_> {
        let contextual = self
            .config
            .contextual_groups()
            .iter()
            .filter(|group| self.active_groups.contains(&group.id))
            .flat_map(|group| group.tabs.iter());

        EligibleTabs {
            tabs: self.config.plain_tabs().iter().chain(contextual).collect(),
        }
    }

    fn rejection(&self, tab_id: &str) -> TabRejection {
        if self.config.application_tab().id == tab_id {
            TabRejection::ApplicationTab
        } else if self.config.group_of_tab(tab_id).is_some() {
            TabRejection::InactiveContextualGroup
        } else {
            TabRejection::Unknown
        }
    }

    /// `Showed`/`ShowedInitialized` collapse to `Hidden`; `Visible` gets
    /// pinned as `Showed`. A hidden ribbon stays hidden.
    pub fn toggle_visibility_state(&mut self) {
        self.visibility = match self.visibility {
            RibbonVisibility::Showed | RibbonVisibility::ShowedInitialized => RibbonVisibility::Hidden,
            RibbonVisibility::Visible => RibbonVisibility::Showed,
            RibbonVisibility::Hidden => RibbonVisibility::Hidden,
        };
        debug!("Ribbon visibility is now {:?}", self.visibility);
    }

    /// A click anywhere on the page closes a temporarily expanded ribbon.
    pub fn hide_on_document_click(&mut self) {
        if self.visibility == RibbonVisibility::Visible {
            self.visibility = RibbonVisibility::Hidden;
        }
    }

    /// Activate an eligible tab. A rejected tab leaves all state untouched.
    pub fn set_active_tab(&mut self, tab_id: &str) -> Result<()> {
        if !self.eligible_tabs().contains(tab_id) {
            return Err(ShellError::TabActivation {
                tab_id: tab_id.to_string(),
                reason: self.rejection(tab_id),
            });
        }

        if self.visibility == RibbonVisibility::Hidden {
            self.visibility = RibbonVisibility::Visible;
        }

        self.active_tab = tab_id.to_string();
        debug!("Active ribbon tab is now '{}'", tab_id);

        if self.config.preserve_selected_tab() && self.config.is_plain_tab(tab_id) {
            if let Err(e) = self.store.set(SELECTED_TAB_KEY, tab_id, selected_tab_retention()) {
                warn!("Could not remember selected tab '{}': {}", tab_id, e);
            }
        }
        Ok(())
    }

    pub fn activate_contextual_group(&mut self, group_id: &str) -> Result<()> {
        if self.config.contextual_group(group_id).is_none() {
            return Err(ShellError::ElementNotFound(group_id.to_string()));
        }
        if self.active_groups.insert(group_id.to_string()) {
            debug!("Contextual group '{}' activated", group_id);
        }
        Ok(())
    }

    /// Deactivating the group that holds the active tab moves back to the
    /// first plain tab before the group goes away.
    pub fn deactivate_contextual_group(&mut self, group_id: &str) -> Result<()> {
        let group = self
            .config
            .contextual_group(group_id)
            .ok_or_else(|| ShellError::ElementNotFound(group_id.to_string()))?;

        let holds_active_tab = group.tabs.iter().any(|tab| tab.id == self.active_tab);
        if holds_active_tab && self.active_groups.contains(group_id) {
            let first = self.config.first_tab().id.clone();
            self.set_active_tab(&first)?;
        }

        if self.active_groups.remove(group_id) {
            debug!("Contextual group '{}' deactivated", group_id);
        }
        Ok(())
    }

    /// Move one tab forward (`delta > 0`) or back (`delta < 0`) through the
    /// eligible tabs. Stops at either end. Returns whether the tab changed.
    pub fn ribbon_scroll(&mut self, delta: f64) -> Result<bool> {
        let target = {
            let eligible = self.eligible_tabs();
            let Some(current) = eligible.position(&self.active_tab) else {
                return Ok(false);
            };

            let next = if delta > 0.0 {
                current.checked_add(1).filter(|next| *next < eligible.len())
            } else if delta < 0.0 {
                current.checked_sub(1)
            } else {
                None
            };

            match next.and_then(|index| eligible.get(index)) {
                Some(tab) => tab.id.clone(),
                None => return Ok(false),
            }
        };

        self.set_active_tab(&target)?;
        Ok(true)
    }

    pub fn icon(&self, icon_id: &str) -> Option<&Action> {
        visitor::find_action(&self.config, icon_id)
    }

    pub fn enable_icon(&mut self, icon_id: &str) -> Result<()> {
        self.set_icon_disabled(icon_id, false)
    }

    pub fn disable_icon(&mut self, icon_id: &str) -> Result<()> {
        self.set_icon_disabled(icon_id, true)
    }

    fn set_icon_disabled(&mut self, icon_id: &str, disabled: bool) -> Result<()> {
        let action = visitor::find_action_mut(&mut self.config, icon_id)
            .ok_or_else(|| ShellError::ElementNotFound(icon_id.to_string()))?;
        action.disabled = disabled;
        Ok(())
    }
}
