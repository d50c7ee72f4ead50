use std::collections::HashMap;

use super::{Service, ServiceContext};
use crate::error::{Result, ShellError};
use crate::ribbon::{RibbonService, RIBBON_SERVICE_IDENTIFIER};

pub type ServiceFactory = Box<dyn Fn(&ServiceContext) -> Box<dyn Service> + Send + Sync>;

/// Factories for every control the shell knows how to build, keyed by the
/// service identifier used in the bootstrap document. New controls are added
/// with [`ServiceCatalog::register`].
#[derive(Default)]
pub struct ServiceCatalog {
    factories: HashMap<String, ServiceFactory>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog with the built-in controls.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(RIBBON_SERVICE_IDENTIFIER, |context| {
            Box::new(RibbonService::new(context.clone()))
        });
        catalog
    }

    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn(&ServiceContext) -> Box<dyn Service> + Send + Sync + 'static,
    {
        self.factories.insert(identifier.into(), Box::new(factory));
    }

    pub fn create(&self, identifier: &str, context: &ServiceContext) -> Result<Box<dyn Service>> {
        self.factories
            .get(identifier)
            .map(|factory| factory(context))
            .ok_or_else(|| ShellError::ServiceNotFound(identifier.to_string()))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }
}
