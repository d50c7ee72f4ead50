//! Pluggable controls ("services") and the registry that owns them
//!
//! A control is anything implementing [`Service`]. The bootstrap document
//! names controls by a service identifier; the [`ServiceCatalog`] turns that
//! identifier into an instance and the [`ServiceRegistry`] owns the instances
//! for the rest of the page's life.

pub mod catalog;
pub mod registry;
pub mod reporter;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::persistence::StateStore;
use crate::transport::Transport;

pub use catalog::{ServiceCatalog, ServiceFactory};
pub use registry::{ServiceEntry, ServiceRegistry};
pub use reporter::{CollectingReporter, ErrorReporter, LogReporter};

/// The contract every control satisfies.
#[async_trait]
pub trait Service: Send {
    /// Publish what the loading screen should show while this control starts.
    fn set_loading_message(&mut self, screen: &mut LoadingScreen);

    /// Fetch the control's configuration and get it ready for use.
    async fn initialize(&mut self, config_url: &str) -> Result<()>;

    /// Invoke a named operation. Unknown methods fail with
    /// `ServiceContractViolation`.
    fn call(&mut self, method: &str, args: Value) -> Result<Value>;

    /// A click landed somewhere on the page.
    fn on_document_click(&mut self) {}
}

/// Shared collaborators handed to control factories.
#[derive(Clone)]
pub struct ServiceContext {
    pub transport: Arc<dyn Transport>,
    pub store: Arc<dyn StateStore>,
}

impl ServiceContext {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn StateStore>) -> Self {
        Self { transport, store }
    }
}

/// The message slot read by the loading screen presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingScreen {
    message: Option<String>,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
