//! Shared fixtures: an in-memory site with a bootstrap document, an
//! application definition and a ribbon.

#![allow(dead_code)]

use officeui::loader::DEFAULT_BOOTSTRAP_URL;
use officeui::persistence::MemoryStateStore;
use officeui::services::CollectingReporter;
use officeui::transport::MemoryTransport;
use officeui::{Application, ShellOptions};
use serde_json::{json, Value};
use std::sync::Arc;

pub const APP_URL: &str = "/Configuration/Application/Application.json";
pub const RIBBON_URL: &str = "/Configuration/Ribbon/Ribbon.json";

pub fn ribbon_control() -> Value {
    json!({
        "Name": "Ribbon",
        "Service": "OfficeUIRibbonService",
        "ConfigurationFile": RIBBON_URL
    })
}

pub fn bootstrap(default_style: &str, controls: Value) -> Value {
    json!({
        "Styles": [
            { "name": "Blue", "stylesheet": "/Resources/Css/Blue.css" },
            { "name": "Red", "stylesheet": "/Resources/Css/Red.css" }
        ],
        "DefaultStyle": default_style,
        "Themes": [
            { "name": "No Background", "stylesheet": "/Resources/Css/None.css" },
            { "name": "Circles", "stylesheet": "/Resources/Css/Circles.css" }
        ],
        "DefaultTheme": "No Background",
        "Configuration": [APP_URL],
        "Controls": controls,
        "LoadingMessage": "Loading OfficeUI..."
    })
}

pub fn app_definition() -> Value {
    json!({
        "Title": "OfficeUI",
        "Icons": [
            { "Id": "help", "Icon": "/Resources/Images/Help.png", "Legend": "Help" },
            { "Id": "user", "Icon": "/Resources/Images/User.png", "Legend": "Account" }
        ]
    })
}

pub fn ribbon(preserve: &str, tabs: Value) -> Value {
    json!({
        "Configuration": [{ "PreserveSelectedRibbonTab": preserve }],
        "Tabs": tabs,
        "ContextualGroups": [
            { "Id": "Picture", "Name": "Picture Tools", "Tabs": [{ "Id": "Format", "Groups": [] }] }
        ]
    })
}

pub fn standard_tabs() -> Value {
    json!([
        { "Id": "App", "Name": "Application" },
        { "Id": "Home", "Name": "Home", "Groups": [{ "Id": "Clipboard", "Areas": [{ "Id": "Paste", "Actions": [
            { "Id": "paste", "Icon": "/Resources/Images/Paste.png", "MenuItems": [
                { "Id": "pasteSpecial", "Icon": "/Resources/Images/PasteSpecial.png" }
            ]},
            { "Id": "cut", "Icon": "/Resources/Images/Cut.png", "Disabled": "True" }
        ]}]}]},
        { "Id": "Insert", "Name": "Insert" },
        { "Id": "View", "Name": "View" }
    ])
}

/// A site serving every document and resource the standard fixtures name.
pub fn site(controls: Value) -> MemoryTransport {
    MemoryTransport::new()
        .with_document(DEFAULT_BOOTSTRAP_URL, bootstrap("Blue", controls))
        .with_document(APP_URL, app_definition())
        .with_document(RIBBON_URL, ribbon("False", standard_tabs()))
        .with_resources([
            "/Resources/Css/Blue.css",
            "/Resources/Css/Red.css",
            "/Resources/Css/None.css",
            "/Resources/Css/Circles.css",
            "/Resources/Images/Help.png",
            "/Resources/Images/User.png",
            "/Resources/Images/Paste.png",
            "/Resources/Images/PasteSpecial.png",
            "/Resources/Images/Cut.png",
        ])
}

pub struct Harness {
    pub app: Application,
    pub transport: Arc<MemoryTransport>,
    pub store: Arc<MemoryStateStore>,
    pub reporter: Arc<CollectingReporter>,
}

pub fn harness(transport: MemoryTransport) -> Harness {
    harness_with_store(transport, MemoryStateStore::new())
}

pub fn harness_with_store(transport: MemoryTransport, store: MemoryStateStore) -> Harness {
    let transport = Arc::new(transport);
    let store = Arc::new(store);
    let reporter = Arc::new(CollectingReporter::new());
    let app = Application::new(ShellOptions::default(), transport.clone(), store.clone())
        .with_reporter(reporter.clone());

    Harness {
        app,
        transport,
        store,
        reporter,
    }
}
