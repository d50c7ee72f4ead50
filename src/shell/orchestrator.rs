//! The boot pipeline
//!
//! ```text
//! bootstrap document
//!   -> stylesheets (spawned, not awaited)
//!   -> application definition -> icons
//!   -> controls: register, set loading messages, initialize (one barrier)
//!   -> Ready
//! ```
//!
//! Any failing stage is reported once and leaves the application short of
//! `Ready` for good.

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::appearance::Appearance;
use crate::error::{AppearanceKind, Result, ShellError};
use crate::loader::{
    get_app_definition, get_bootstrap_configuration, AppDefinition, BootstrapConfig, LoadOutcome,
    Preloader, DEFAULT_BOOTSTRAP_URL,
};
use crate::persistence::StateStore;
use crate::services::{
    ErrorReporter, LoadingScreen, LogReporter, ServiceCatalog, ServiceContext, ServiceRegistry,
};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BootPhase {
    Booting,
    StylesLoading,
    ConfigLoading,
    ServicesInitializing,
    Ready,
    Failed,
}

impl BootPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            BootPhase::Booting => "booting",
            BootPhase::StylesLoading => "styles_loading",
            BootPhase::ConfigLoading => "config_loading",
            BootPhase::ServicesInitializing => "services_initializing",
            BootPhase::Ready => "ready",
            BootPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the orchestrator needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    pub bootstrap_url: String,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            bootstrap_url: DEFAULT_BOOTSTRAP_URL.to_string(),
        }
    }
}

pub struct Application {
    options: ShellOptions,
    context: ServiceContext,
    catalog: ServiceCatalog,
    registry: ServiceRegistry,
    reporter: Arc<dyn ErrorReporter>,
    loading: LoadingScreen,
    phase: BootPhase,
    bootstrap: Option<BootstrapConfig>,
    definition: Option<AppDefinition>,
    appearance: Option<Appearance>,
    styles: Option<JoinHandle<Vec<LoadOutcome>>>,
}

impl Application {
    pub fn new(options: ShellOptions, transport: Arc<dyn Transport>, store: Arc<dyn StateStore>) -> Self {
        Self {
            options,
            context: ServiceContext::new(transport, store),
            catalog: ServiceCatalog::standard(),
            registry: ServiceRegistry::new(),
            reporter: Arc::new(LogReporter),
            loading: LoadingScreen::new(),
            phase: BootPhase::Booting,
            bootstrap: None,
            definition: None,
            appearance: None,
            styles: None,
        }
    }

    pub fn with_catalog(mut self, catalog: ServiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == BootPhase::Ready
    }

    pub fn loading_message(&self) -> Option<&str> {
        self.loading.message()
    }

    pub fn bootstrap(&self) -> Option<&BootstrapConfig> {
        self.bootstrap.as_ref()
    }

    pub fn definition(&self) -> Option<&AppDefinition> {
        self.definition.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.definition.as_ref().map(|definition| definition.title.as_str())
    }

    pub fn appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref()
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Run the boot pipeline once. Booting a ready application does nothing;
    /// booting after a failure fails with `BootAborted`.
    pub async fn boot(&mut self) -> Result<()> {
        match self.phase {
            BootPhase::Ready => return Ok(()),
            BootPhase::Booting => {}
            _ => return Err(ShellError::BootAborted),
        }

        match self.run_pipeline().await {
            Ok(()) => {
                self.phase = BootPhase::Ready;
                info!(
                    "Application '{}' is ready with {} services",
                    self.title().unwrap_or_default(),
                    self.registry.len()
                );
                Ok(())
            }
            Err(e) => {
                self.reporter.report(self.phase.as_str(), &e);
                self.phase = BootPhase::Failed;
                Err(e)
            }
        }
    }

    async fn run_pipeline(&mut self) -> Result<()> {
        let transport = Arc::clone(&self.context.transport);
        let preloader = Preloader::new(Arc::clone(&transport));

        let bootstrap = get_bootstrap_configuration(transport.as_ref(), &self.options.bootstrap_url).await?;
        self.loading.set_message(bootstrap.loading_message.clone());

        self.phase = BootPhase::StylesLoading;
        let appearance = Appearance::from_bootstrap(&bootstrap);
        let stylesheets = appearance.stylesheets();
        let style_loader = preloader.clone();
        self.styles = Some(tokio::spawn(async move { style_loader.load_all(stylesheets).await }));
        self.appearance = Some(appearance);

        self.phase = BootPhase::ConfigLoading;
        let definition_url = bootstrap.app_definition_url()?.to_string();
        let controls = bootstrap.controls.clone();
        self.bootstrap = Some(bootstrap);

        let definition = get_app_definition(transport.as_ref(), &definition_url).await?;
        preloader.load_all(definition.icon_urls()).await;
        self.definition = Some(definition);

        self.phase = BootPhase::ServicesInitializing;
        for descriptor in &controls {
            let instance = self
                .catalog
                .create(&descriptor.service_identifier, &self.context)?;
            self.registry.register(descriptor, instance)?;
        }
        self.registry.initialize_all(&mut self.loading).await
    }

    /// Wait for the stylesheets issued at boot. Returns nothing if boot never
    /// got that far or the outcomes were already collected.
    pub async fn styles_loaded(&mut self) -> Vec<LoadOutcome> {
        let Some(handle) = self.styles.take() else {
            return Vec::new();
        };
        match handle.await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!("Stylesheet preloading did not finish: {}", e);
                Vec::new()
            }
        }
    }

    /// Invoke `method` on the control registered as `service`.
    pub fn initialize_service_call(&mut self, service: &str, method: &str, args: Value) -> Result<Value> {
        self.registry
            .dispatch(service, method, args)
            .inspect_err(|e| self.reporter.report("dispatch", e))
    }

    /// A click landed somewhere on the page.
    pub fn document_click(&mut self) {
        debug!("Document click");
        self.registry.notify_document_click();
    }

    pub async fn change_style(&mut self, name: &str) -> Result<String> {
        self.change_appearance(AppearanceKind::Style, name).await
    }

    pub async fn change_theme(&mut self, name: &str) -> Result<String> {
        self.change_appearance(AppearanceKind::Theme, name).await
    }

    /// Preload the named stylesheet, then make it the active one.
    async fn change_appearance(&mut self, kind: AppearanceKind, name: &str) -> Result<String> {
        let appearance = self
            .appearance
            .as_mut()
            .ok_or_else(|| ShellError::ServiceUninitialized("appearance".to_string()))?;
        let stylesheet = appearance.find(kind, name)?.stylesheet.clone();

        Preloader::new(Arc::clone(&self.context.transport))
            .load(stylesheet.clone())
            .await;
        appearance.select(kind, name)?;

        info!("Switched {} to '{}'", kind, name);
        Ok(stylesheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStateStore;
    use crate::services::CollectingReporter;
    use crate::transport::MemoryTransport;
    use serde_json::json;

    fn bootstrap(controls: Value) -> Value {
        json!({
            "Styles": [
                { "name": "Blue", "stylesheet": "/css/blue.css" },
                { "name": "Green", "stylesheet": "/css/green.css" }
            ],
            "DefaultStyle": "Blue",
            "Themes": [{ "name": "None", "stylesheet": "/css/none.css" }],
            "DefaultTheme": "None",
            "Configuration": "/app.json",
            "Controls": controls,
            "LoadingMessage": "Please wait"
        })
    }

    fn application(transport: MemoryTransport) -> (Application, Arc<MemoryTransport>, Arc<CollectingReporter>) {
        let transport = Arc::new(transport);
        let reporter = Arc::new(CollectingReporter::new());
        let app = Application::new(
            ShellOptions::default(),
            transport.clone(),
            Arc::new(MemoryStateStore::new()),
        )
        .with_reporter(reporter.clone());
        (app, transport, reporter)
    }

    fn site() -> MemoryTransport {
        MemoryTransport::new()
            .with_document(DEFAULT_BOOTSTRAP_URL, bootstrap(json!([])))
            .with_document(
                "/app.json",
                json!({ "Title": "Demo", "Icons": [{ "Id": "i", "Icon": "/img/i.png", "Legend": "I" }] }),
            )
            .with_resources(["/css/blue.css", "/css/none.css", "/css/green.css", "/img/i.png"])
    }

    #[tokio::test]
    async fn test_boot_without_controls_reaches_ready() {
        let (mut app, transport, reporter) = application(site());

        app.boot().await.unwrap();
        assert!(app.is_ready());
        assert_eq!(app.title(), Some("Demo"));
        assert_eq!(app.loading_message(), Some("Please wait"));
        assert_eq!(transport.resource_loads("/img/i.png"), 1);
        assert!(reporter.reports().is_empty());

        let styles = app.styles_loaded().await;
        assert_eq!(styles.len(), 2);
        assert!(styles.iter().all(LoadOutcome::is_loaded));
    }

    #[tokio::test]
    async fn test_ready_is_terminal() {
        let (mut app, transport, _) = application(site());
        app.boot().await.unwrap();
        app.boot().await.unwrap();

        assert!(app.is_ready());
        assert_eq!(transport.document_fetches(DEFAULT_BOOTSTRAP_URL), 1);
    }

    #[tokio::test]
    async fn test_missing_definition_aborts_and_reports() {
        let transport = MemoryTransport::new()
            .with_document(DEFAULT_BOOTSTRAP_URL, bootstrap(json!([])))
            .with_resources(["/css/blue.css", "/css/none.css"]);
        let (mut app, _, reporter) = application(transport);

        let result = app.boot().await;
        assert!(matches!(result, Err(ShellError::Transport { .. })));
        assert_eq!(app.phase(), BootPhase::Failed);
        assert!(app.bootstrap().is_some());
        assert!(app.definition().is_none());

        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "config_loading");

        assert_eq!(app.boot().await, Err(ShellError::BootAborted));
    }

    #[tokio::test]
    async fn test_unknown_service_identifier_aborts() {
        let controls = json!([{ "Name": "Grid", "Service": "OfficeUIGridService", "ConfigurationFile": "/grid.json" }]);
        let transport = site().with_document(DEFAULT_BOOTSTRAP_URL, bootstrap(controls));
        let (mut app, _, reporter) = application(transport);

        assert_eq!(
            app.boot().await,
            Err(ShellError::ServiceNotFound("OfficeUIGridService".to_string()))
        );
        assert!(!app.is_ready());
        assert_eq!(reporter.reports()[0].0, "services_initializing");
    }

    #[tokio::test]
    async fn test_change_theme_preloads_and_switches() {
        let (mut app, transport, _) = application(site());
        app.boot().await.unwrap();

        let stylesheet = app.change_style("Green").await.unwrap();
        assert_eq!(stylesheet, "/css/green.css");
        assert_eq!(transport.resource_loads("/css/green.css"), 1);
        assert_eq!(app.appearance().unwrap().style().name, "Green");

        assert!(app.change_theme("Stars").await.is_err());
        assert_eq!(app.appearance().unwrap().theme().name, "None");
    }

    #[tokio::test]
    async fn test_dispatch_failures_are_reported() {
        let (mut app, _, reporter) = application(site());
        app.boot().await.unwrap();

        let result = app.initialize_service_call("Ribbon", "ribbonScroll", json!({ "delta": 1 }));
        assert_eq!(result, Err(ShellError::ServiceNotFound("Ribbon".to_string())));
        assert_eq!(reporter.reports()[0].0, "dispatch");
    }
}
