use log::{debug, error, info};
use serde_json::Value;

use super::{LoadingScreen, Service};
use crate::error::{Result, ShellError};
use crate::loader::{batch, ControlDescriptor};

/// A registered control and the configuration file it initializes from.
pub struct ServiceEntry {
    pub name: String,
    pub service_identifier: String,
    pub configuration_file_url: String,
    instance: Box<dyn Service>,
}

impl ServiceEntry {
    pub fn instance(&self) -> &dyn Service {
        self.instance.as_ref()
    }
}

/// Owns every control instance, in declaration order. Names are unique.
#[derive(Default)]
pub struct ServiceRegistry {
    entries: Vec<ServiceEntry>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: &ControlDescriptor, instance: Box<dyn Service>) -> Result<()> {
        if self.contains(&descriptor.name) {
            return Err(ShellError::DuplicateServiceName(descriptor.name.clone()));
        }

        debug!(
            "Registering service '{}' ({})",
            descriptor.name, descriptor.service_identifier
        );
        self.entries.push(ServiceEntry {
            name: descriptor.name.clone(),
            service_identifier: descriptor.service_identifier.clone(),
            configuration_file_url: descriptor.configuration_file_url.clone(),
            instance,
        });
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&ServiceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ShellError::ServiceNotFound(name.to_string()))
    }

    fn resolve_mut(&mut self, name: &str) -> Result<&mut ServiceEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ShellError::ServiceNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set each control's loading message, in declaration order, then run every
    /// `initialize` concurrently behind one barrier.
    pub async fn initialize_all(&mut self, screen: &mut LoadingScreen) -> Result<()> {
        let mut pending = Vec::with_capacity(self.entries.len());

        for entry in self.entries.iter_mut() {
            let ServiceEntry {
                name,
                configuration_file_url,
                instance,
                ..
            } = entry;

            instance.set_loading_message(screen);
            pending.push(async move {
                instance
                    .initialize(configuration_file_url)
                    .await
                    .inspect_err(|e| error!("Service '{}' failed to initialize: {}", name, e))
            });
        }

        info!("Initializing {} services", pending.len());
        batch::try_wait_all(pending).await?;
        Ok(())
    }

    /// Invoke `method` on the control registered as `name`.
    pub fn dispatch(&mut self, name: &str, method: &str, args: Value) -> Result<Value> {
        let entry = self.resolve_mut(name)?;
        debug!("Dispatching {}.{}", name, method);
        entry.instance.call(method, args)
    }

    /// Forward a page-wide click to every control.
    pub fn notify_document_click(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.instance.on_document_click();
        }
    }
}
