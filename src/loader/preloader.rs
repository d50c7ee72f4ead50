//! Single-resource preloading
//!
//! A [`LoadSignal`] completes exactly once, when the underlying load has
//! finished. Failed loads complete the signal too, with
//! [`LoadOutcome::Failed`]; a signal never yields an error and never waits
//! forever on a load the transport has already rejected.

use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, warn};
use std::sync::Arc;

use super::batch;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(String),
    Failed { url: String, reason: String },
}

impl LoadOutcome {
    pub fn url(&self) -> &str {
        match self {
            LoadOutcome::Loaded(url) => url,
            LoadOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

pub type LoadSignal = BoxFuture<'static, LoadOutcome>;

/// Loads images and stylesheets through a [`Transport`]. There is no caching:
/// two signals for the same URL perform two fetches.
#[derive(Clone)]
pub struct Preloader {
    transport: Arc<dyn Transport>,
}

impl Preloader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn load(&self, url: impl Into<String>) -> LoadSignal {
        let transport = Arc::clone(&self.transport);
        let url = url.into();

        async move {
            match transport.load_resource(&url).await {
                Ok(()) => {
                    debug!("Preloaded {}", url);
                    LoadOutcome::Loaded(url)
                }
                Err(e) => {
                    warn!("Failed to preload {}: {}", url, e);
                    LoadOutcome::Failed {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
        }
        .boxed()
    }

    /// Preload every URL and wait until all of them have completed.
    pub async fn load_all<I, S>(&self, urls: I) -> Vec<LoadOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let signals: Vec<LoadSignal> = urls.into_iter().map(|url| self.load(url)).collect();
        let count = signals.len();
        let outcomes = batch::wait_all(signals).await;

        let failed = outcomes.iter().filter(|o| !o.is_loaded()).count();
        if failed > 0 {
            warn!("Preloaded {} resources, {} failed", count, failed);
        } else {
            debug!("Preloaded {} resources", count);
        }
        outcomes
    }
}
