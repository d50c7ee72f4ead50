//! The error-reporting collaborator
//!
//! Failures that abort a boot stage are handed to an [`ErrorReporter`]. The
//! default reporter writes one structured log line per failure.

use log::error;
use serde_json::json;
use std::sync::Mutex;

use crate::error::ShellError;

pub trait ErrorReporter: Send + Sync {
    fn report(&self, stage: &str, error: &ShellError);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, stage: &str, error: &ShellError) {
        let log_data = json!({
            "event": "stage_failed",
            "stage": stage,
            "kind": error.kind(),
            "error": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        error!("Shell failure: {}", log_data);
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: Mutex<Vec<(String, ShellError)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, ShellError)> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, stage: &str, error: &ShellError) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push((stage.to_string(), error.clone()));
        }
    }
}
