//! Error types for the shell
//!
//! Every failure the boot pipeline, the service registry or a control can
//! raise is one variant of [`ShellError`]. Errors are raised where they are
//! detected and are never retried.

use std::fmt;
use thiserror::Error;

/// Which kind of appearance entry a default refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceKind {
    Style,
    Theme,
}

impl fmt::Display for AppearanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppearanceKind::Style => write!(f, "style"),
            AppearanceKind::Theme => write!(f, "theme"),
        }
    }
}

/// Why a tab could not be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRejection {
    /// No tab with that id exists anywhere in the ribbon.
    Unknown,
    /// The id names the reserved application tab (`tabs[0]`).
    ApplicationTab,
    /// The tab lives in a contextual group that is not active.
    InactiveContextualGroup,
}

impl fmt::Display for TabRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabRejection::Unknown => write!(f, "no such tab"),
            TabRejection::ApplicationTab => write!(f, "the application tab cannot be selected"),
            TabRejection::InactiveContextualGroup => {
                write!(f, "the tab belongs to an inactive contextual group")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShellError {
    // === Transport ===
    /// A document or resource could not be fetched.
    #[error("failed to fetch {url}: {reason}")]
    Transport { url: String, reason: String },

    // === Document structure ===
    /// The fetched document was empty or not a JSON object.
    #[error("configuration document {url} is missing or empty")]
    ConfigMissing { url: String },

    /// A required top-level field is absent.
    #[error("configuration document {url} has no '{field}' field")]
    FieldMissing { url: String, field: String },

    /// The document has every field but does not match the expected shape.
    #[error("configuration document {url} is malformed: {reason}")]
    MalformedDocument { url: String, reason: String },

    #[error("invalid ribbon configuration: {reason}")]
    RibbonConfigInvalid { reason: String },

    // === Style / theme resolution ===
    #[error("default {kind} '{id}' does not match any declared {kind}")]
    DefaultNotFound { kind: AppearanceKind, id: String },

    #[error("default {kind} '{id}' matches {matches} declared entries")]
    AmbiguousDefault {
        kind: AppearanceKind,
        id: String,
        matches: usize,
    },

    // === Service registry ===
    #[error("a service named '{0}' is already registered")]
    DuplicateServiceName(String),

    #[error("no service named '{0}' is registered")]
    ServiceNotFound(String),

    /// The control does not expose the requested capability.
    #[error("service '{service}' does not provide '{capability}'")]
    ServiceContractViolation { service: String, capability: String },

    #[error("service '{0}' has not been initialized")]
    ServiceUninitialized(String),

    #[error("invalid arguments for '{method}': {reason}")]
    InvalidArguments { method: String, reason: String },

    // === Ribbon ===
    #[error("cannot activate tab '{tab_id}': {reason}")]
    TabActivation { tab_id: String, reason: TabRejection },

    #[error("element '{0}' not found")]
    ElementNotFound(String),

    // === Host ===
    #[error("state store error: {reason}")]
    Persistence { reason: String },

    /// Boot was requested again after a failed boot.
    #[error("the boot sequence already failed")]
    BootAborted,
}

pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    pub fn transport(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        ShellError::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn ribbon_invalid(reason: impl Into<String>) -> Self {
        ShellError::RibbonConfigInvalid {
            reason: reason.into(),
        }
    }

    pub fn invalid_arguments(method: &str, reason: impl fmt::Display) -> Self {
        ShellError::InvalidArguments {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-friendly name used in structured log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ShellError::Transport { .. } => "TransportError",
            ShellError::ConfigMissing { .. } => "ConfigMissing",
            ShellError::FieldMissing { .. } => "FieldMissing",
            ShellError::MalformedDocument { .. } => "MalformedDocument",
            ShellError::RibbonConfigInvalid { .. } => "RibbonConfigInvalid",
            ShellError::DefaultNotFound { .. } => "DefaultNotFound",
            ShellError::AmbiguousDefault { .. } => "AmbiguousDefault",
            ShellError::DuplicateServiceName(_) => "DuplicateServiceName",
            ShellError::ServiceNotFound(_) => "ServiceNotFound",
            ShellError::ServiceContractViolation { .. } => "ServiceContractViolation",
            ShellError::ServiceUninitialized(_) => "ServiceUninitialized",
            ShellError::InvalidArguments { .. } => "InvalidArguments",
            ShellError::TabActivation { .. } => "TabActivationError",
            ShellError::ElementNotFound(_) => "ElementNotFound",
            ShellError::Persistence { .. } => "Persistence",
            ShellError::BootAborted => "BootAborted",
        }
    }
}
