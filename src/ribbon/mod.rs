//! The ribbon control
//!
//! [`RibbonService`] is the registry-facing wrapper: it fetches and validates
//! the ribbon document, preloads every icon, and then routes dispatch calls to
//! the [`RibbonStateMachine`].

pub mod model;
pub mod state;
pub mod visitor;

use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Result, ShellError};
use crate::loader::Preloader;
use crate::services::{LoadingScreen, Service, ServiceContext};

pub use model::{parse_ribbon, Action, Area, ContextualGroup, Group, RibbonConfig, Tab};
pub use state::{EligibleTabs, RibbonSnapshot, RibbonStateMachine, RibbonVisibility, SELECTED_TAB_KEY};

pub const RIBBON_SERVICE_IDENTIFIER: &str = "OfficeUIRibbonService";

const LOADING_MESSAGE: &str = "Loading the ribbon...";

pub struct RibbonService {
    context: ServiceContext,
    machine: Option<RibbonStateMachine>,
}

impl RibbonService {
    pub fn new(context: ServiceContext) -> Self {
        Self {
            context,
            machine: None,
        }
    }

    pub fn state(&self) -> Option<&RibbonStateMachine> {
        self.machine.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut RibbonStateMachine> {
        self.machine.as_mut()
    }

    fn machine_mut(&mut self) -> Result<&mut RibbonStateMachine> {
        self.machine
            .as_mut()
            .ok_or_else(|| ShellError::ServiceUninitialized(RIBBON_SERVICE_IDENTIFIER.to_string()))
    }
}

/// A mouse wheel event. Positive deltas scroll forward; `deltaY` wins when
/// both keys are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WheelEvent {
    delta: Option<f64>,
    delta_y: Option<f64>,
}

fn wheel_delta(method: &str, args: Value) -> Result<f64> {
    match args {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ShellError::invalid_arguments(method, "delta is not a number")),
        other => {
            let event: WheelEvent =
                serde_json::from_value(other).map_err(|e| ShellError::invalid_arguments(method, e))?;
            event
                .delta_y
                .or(event.delta)
                .ok_or_else(|| ShellError::invalid_arguments(method, "expected 'delta' or 'deltaY'"))
        }
    }
}

/// Accepts either a bare string or an object carrying `key`.
fn id_argument(method: &str, args: &Value, key: &str) -> Result<String> {
    args.as_str()
        .or_else(|| args.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| ShellError::invalid_arguments(method, format!("expected '{}'", key)))
}

#[async_trait]
impl Service for RibbonService {
    fn set_loading_message(&mut self, screen: &mut LoadingScreen) {
        screen.set_message(LOADING_MESSAGE);
    }

    async fn initialize(&mut self, config_url: &str) -> Result<()> {
        info!("Initializing ribbon from {}", config_url);
        let document = self.context.transport.fetch_json(config_url).await?;
        let config = parse_ribbon(document)?;

        let icons = visitor::icon_resources(&config);
        let machine = RibbonStateMachine::new(config, self.context.store.clone());

        Preloader::new(self.context.transport.clone())
            .load_all(icons)
            .await;

        info!("Ribbon ready on tab '{}'", machine.active_tab());
        self.machine = Some(machine);
        Ok(())
    }

    fn call(&mut self, method: &str, args: Value) -> Result<Value> {
        let machine = self.machine_mut()?;

        match method {
            "setActiveTab" => {
                let tab_id = id_argument(method, &args, "tabId")?;
                machine.set_active_tab(&tab_id)?;
            }
            "isTabActive" => {
                let tab_id = id_argument(method, &args, "tabId")?;
                return Ok(json!(machine.is_tab_active(&tab_id)));
            }
            "activeTab" => return Ok(json!(machine.active_tab())),
            "activateContextualGroup" => {
                let group_id = id_argument(method, &args, "groupId")?;
                machine.activate_contextual_group(&group_id)?;
            }
            "deactivateContextualGroup" => {
                let group_id = id_argument(method, &args, "groupId")?;
                machine.deactivate_contextual_group(&group_id)?;
            }
            "isContextualGroupActive" => {
                let group_id = id_argument(method, &args, "groupId")?;
                return Ok(json!(machine.is_contextual_group_active(&group_id)));
            }
            "ribbonScroll" => {
                machine.ribbon_scroll(wheel_delta(method, args)?)?;
            }
            "toggleVisibilityState" => machine.toggle_visibility_state(),
            "visibilityState" => return Ok(json!(machine.visibility())),
            "enableIcon" => {
                let icon_id = id_argument(method, &args, "iconId")?;
                machine.enable_icon(&icon_id)?;
            }
            "disableIcon" => {
                let icon_id = id_argument(method, &args, "iconId")?;
                machine.disable_icon(&icon_id)?;
            }
            "isIconDisabled" => {
                let icon_id = id_argument(method, &args, "iconId")?;
                let icon = machine
                    .icon(&icon_id)
                    .ok_or_else(|| ShellError::ElementNotFound(icon_id.clone()))?;
                return Ok(json!(icon.disabled));
            }
            _ => {
                return Err(ShellError::ServiceContractViolation {
                    service: RIBBON_SERVICE_IDENTIFIER.to_string(),
                    capability: method.to_string(),
                })
            }
        }

        serde_json::to_value(machine.snapshot()).map_err(|e| ShellError::invalid_arguments(method, e))
    }

    fn on_document_click(&mut self) {
        if let Some(machine) = self.machine.as_mut() {
            machine.hide_on_document_click();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStateStore, StateStore};
    use crate::transport::MemoryTransport;
    use std::sync::Arc;

    const URL: &str = "/Configuration/Ribbon/Ribbon.json";

    fn ribbon_document(tabs: Value) -> Value {
        json!({
            "Configuration": [{ "PreserveSelectedRibbonTab": "True" }],
            "Tabs": tabs,
            "ContextualGroups": []
        })
    }

    fn service(transport: MemoryTransport) -> (RibbonService, Arc<MemoryTransport>, Arc<MemoryStateStore>) {
        let transport = Arc::new(transport);
        let store = Arc::new(MemoryStateStore::new());
        let context = ServiceContext::new(transport.clone(), store.clone());
        (RibbonService::new(context), transport, store)
    }

    #[tokio::test]
    async fn test_initialize_preloads_icons() {
        let tabs = json!([
            { "Id": "App" },
            { "Id": "Home", "Groups": [{ "Id": "G", "Areas": [{ "Id": "A", "Actions": [
                { "Id": "cut", "Icon": "/img/cut.png" },
                { "Id": "copy", "Icon": "/img/copy.png" }
            ]}]}]}
        ]);
        let (mut ribbon, transport, _) = service(
            MemoryTransport::new()
                .with_document(URL, ribbon_document(tabs))
                .with_resources(["/img/cut.png", "/img/copy.png"]),
        );

        ribbon.initialize(URL).await.unwrap();
        assert_eq!(transport.resource_requests(), vec!["/img/cut.png", "/img/copy.png"]);
        assert!(ribbon.state().unwrap().is_tab_active("Home"));
    }

    #[tokio::test]
    async fn test_invalid_config_preloads_nothing() {
        let tabs = json!([{ "Id": "App", "Groups": [{ "Id": "G", "Areas": [{ "Id": "A", "Actions": [
            { "Id": "cut", "Icon": "/img/cut.png" }
        ]}]}]}]);
        let (mut ribbon, transport, _) = service(
            MemoryTransport::new()
                .with_document(URL, ribbon_document(tabs))
                .with_resource("/img/cut.png"),
        );

        let result = ribbon.initialize(URL).await;
        assert!(matches!(result, Err(ShellError::RibbonConfigInvalid { .. })));
        assert!(transport.resource_requests().is_empty());
        assert!(ribbon.state().is_none());
    }

    #[tokio::test]
    async fn test_calls_before_initialize_fail() {
        let (mut ribbon, _, _) = service(MemoryTransport::new());
        assert!(matches!(
            ribbon.call("activeTab", Value::Null),
            Err(ShellError::ServiceUninitialized(_))
        ));
        // A page click before initialization is harmless.
        ribbon.on_document_click();
    }

    #[tokio::test]
    async fn test_dispatch_surface() {
        let tabs = json!([{ "Id": "App" }, { "Id": "Home" }, { "Id": "Insert" }]);
        let (mut ribbon, _, store) =
            service(MemoryTransport::new().with_document(URL, ribbon_document(tabs)));
        ribbon.initialize(URL).await.unwrap();

        let snapshot = ribbon.call("ribbonScroll", json!({ "deltaY": 120 })).unwrap();
        assert_eq!(snapshot["activeTab"], "Insert");
        assert_eq!(store.get(SELECTED_TAB_KEY).as_deref(), Some("Insert"));

        assert_eq!(ribbon.call("isTabActive", json!("Insert")).unwrap(), json!(true));
        assert_eq!(ribbon.call("ribbonScroll", json!(-1)).unwrap()["activeTab"], "Home");

        ribbon.call("toggleVisibilityState", Value::Null).unwrap();
        assert_eq!(ribbon.call("visibilityState", Value::Null).unwrap(), json!("Hidden"));

        assert!(matches!(
            ribbon.call("setActiveTab", json!({})),
            Err(ShellError::InvalidArguments { .. })
        ));
        assert_eq!(
            ribbon.call("ribbonScroll", json!({ "delta": -1, "deltaY": 1 })).unwrap()["activeTab"],
            "Insert"
        );
        assert_eq!(
            ribbon.call("ribbonScroll", json!({ "delta": -1 })).unwrap()["activeTab"],
            "Home"
        );
        assert!(matches!(
            ribbon.call("ribbonScroll", json!({ "wheel": "up" })),
            Err(ShellError::InvalidArguments { .. })
        ));
        match ribbon.call("zoom", Value::Null) {
            Err(ShellError::ServiceContractViolation { capability, .. }) => assert_eq!(capability, "zoom"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
