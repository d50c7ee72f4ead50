//! A configuration-driven ribbon shell.
//!
//! The shell loads a bootstrap document, preloads its stylesheets and icons,
//! builds the controls it declares and initializes them behind a single
//! barrier before declaring itself ready. The ribbon control is the built-in
//! control with the richest state.

pub mod config;
pub mod error;
pub mod loader;
pub mod persistence;
pub mod ribbon;
pub mod services;
pub mod shell;
pub mod transport;

pub use error::{Result, ShellError};
pub use shell::{Application, BootPhase, ShellOptions};
