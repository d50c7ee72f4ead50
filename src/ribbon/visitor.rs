//! Recursive traversal of the ribbon tree
//!
//! Replaces ad-hoc path queries over raw JSON: every walk goes through the
//! typed tree, so ids are compared, never interpolated.

use super::model::{Action, Area, ContextualGroup, Group, RibbonConfig, Tab};

pub trait RibbonVisitor<'a> {
    fn visit_tab(&mut self, _tab: &'a Tab) {}
    fn visit_action(&mut self, _action: &'a Action) {}
}

/// Visit plain tabs first, then the tabs of every contextual group, each in
/// declaration order. Actions are visited depth-first, parents before their
/// menu items.
pub fn walk_config<'a, V: RibbonVisitor<'a>>(visitor: &mut V, config: &'a RibbonConfig) {
    for tab in config.tabs() {
        walk_tab(visitor, tab);
    }
    for group in config.contextual_groups() {
        walk_contextual_group(visitor, group);
    }
}

pub fn walk_contextual_group<'a, V: RibbonVisitor<'a>>(visitor: &mut V, group: &'a ContextualGroup) {
    for tab in &group.tabs {
        walk_tab(visitor, tab);
    }
}

pub fn walk_tab<'a, V: RibbonVisitor<'a>>(visitor: &mut V, tab: &'a Tab) {
    visitor.visit_tab(tab);
    for group in &tab.groups {
        walk_group(visitor, group);
    }
}

fn walk_group<'a, V: RibbonVisitor<'a>>(visitor: &mut V, group: &'a Group) {
    for area in &group.areas {
        walk_area(visitor, area);
    }
}

fn walk_area<'a, V: RibbonVisitor<'a>>(visitor: &mut V, area: &'a Area) {
    for action in &area.actions {
        walk_action(visitor, action);
    }
}

fn walk_action<'a, V: RibbonVisitor<'a>>(visitor: &mut V, action: &'a Action) {
    visitor.visit_action(action);
    for item in &action.menu_items {
        walk_action(visitor, item);
    }
}

#[derive(Default)]
struct IconCollector<'a> {
    urls: Vec<&'a str>,
}

impl<'a> RibbonVisitor<'a> for IconCollector<'a> {
    fn visit_action(&mut self, action: &'a Action) {
        if let Some(icon) = action.icon.as_deref().filter(|icon| !icon.is_empty()) {
            self.urls.push(icon);
        }
    }
}

/// Every icon URL referenced anywhere in the ribbon, in traversal order.
pub fn icon_resources(config: &RibbonConfig) -> Vec<String> {
    let mut collector = IconCollector::default();
    walk_config(&mut collector, config);
    collector.urls.into_iter().map(str::to_string).collect()
}

pub fn find_action<'a>(config: &'a RibbonConfig, id: &str) -> Option<&'a Action> {
    struct Finder<'a, 'b> {
        id: &'b str,
        found: Option<&'a Action>,
    }

    impl<'a> RibbonVisitor<'a> for Finder<'a, '_> {
        fn visit_action(&mut self, action: &'a Action) {
            if self.found.is_none() && action.id == self.id {
                self.found = Some(action);
            }
        }
    }

    let mut finder = Finder { id, found: None };
    walk_config(&mut finder, config);
    finder.found
}

pub fn find_action_mut<'a>(config: &'a mut RibbonConfig, id: &str) -> Option<&'a mut Action> {
    config
        .tabs_mut()
        .flat_map(|tab| tab.groups.iter_mut())
        .flat_map(|group| group.areas.iter_mut())
        .flat_map(|area| area.actions.iter_mut())
        .find_map(|action| find_in_action_mut(action, id))
}

fn find_in_action_mut<'a>(action: &'a mut Action, id: &str) -> Option<&'a mut Action> {
    if action.id == id {
        return Some(action);
    }
    action
        .menu_items
        .iter_mut()
        .find_map(|item| find_in_action_mut(item, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ribbon::model::parse_ribbon;
    use serde_json::json;

    fn config() -> RibbonConfig {
        parse_ribbon(json!({
            "Configuration": [{ "PreserveSelectedRibbonTab": "False" }],
            "Tabs": [
                { "Id": "App" },
                { "Id": "Home", "Groups": [{ "Id": "G", "Areas": [{ "Id": "A", "Actions": [
                    { "Id": "cut", "Icon": "/img/cut.png" },
                    { "Id": "paste", "Icon": "/img/paste.png", "MenuItems": [
                        { "Id": "paste-text", "Icon": "/img/paste-text.png" },
                        { "Id": "paste-plain" }
                    ]}
                ]}]}]}
            ],
            "ContextualGroups": [{ "Id": "Picture", "Tabs": [
                { "Id": "Format", "Groups": [{ "Id": "G2", "Areas": [{ "Id": "A2", "Actions": [
                    { "Id": "crop", "Icon": "/img/crop.png" }
                ]}]}]}
            ]}]
        }))
        .unwrap()
    }

    #[test]
    fn test_icon_resources_cover_the_whole_tree() {
        assert_eq!(
            icon_resources(&config()),
            vec!["/img/cut.png", "/img/paste.png", "/img/paste-text.png", "/img/crop.png"]
        );
    }

    #[test]
    fn test_find_action_reaches_nested_menu_items() {
        let mut config = config();
        assert!(find_action(&config, "paste-plain").is_some());
        assert!(find_action(&config, "crop").is_some());
        assert!(find_action(&config, "nope").is_none());

        find_action_mut(&mut config, "paste-text").unwrap().disabled = true;
        assert!(find_action(&config, "paste-text").unwrap().disabled);
    }

    #[test]
    fn test_ids_are_matched_literally() {
        let config = config();
        assert!(find_action(&config, "paste*").is_none());
        assert!(find_action(&config, "").is_none());
    }
}
