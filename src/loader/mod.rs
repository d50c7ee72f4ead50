//! Configuration loading and resource preloading
//!
//! Provides the bootstrap and application-definition loaders, the single
//! resource preloader and the batch barrier that fans loads back in.

pub mod batch;
pub mod bootstrap;
pub mod definition;
pub mod document;
pub mod preloader;

pub use batch::{try_wait_all, wait_all};
pub use bootstrap::{
    get_bootstrap_configuration, parse_bootstrap, resolve_entry, AppearanceEntry, BootstrapConfig,
    ControlDescriptor, DEFAULT_BOOTSTRAP_URL,
};
pub use definition::{get_app_definition, parse_app_definition, AppDefinition, IconEntry};
pub use preloader::{LoadOutcome, LoadSignal, Preloader};
