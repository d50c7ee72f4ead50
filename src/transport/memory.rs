use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::Transport;
use crate::error::{Result, ShellError};

/// A request seen by a [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Document(String),
    Resource(String),
}

/// In-memory transport. Unknown URLs fail with a transport error; every
/// request is recorded so callers can inspect what was fetched and how often.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    documents: HashMap<String, Value>,
    resources: HashSet<String>,
    requests: Mutex<Vec<Request>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.documents.insert(url.into(), document);
        self
    }

    pub fn with_resource(mut self, url: impl Into<String>) -> Self {
        self.resources.insert(url.into());
        self
    }

    pub fn with_resources<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources.extend(urls.into_iter().map(Into::into));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Every resource URL requested so far, in request order.
    pub fn resource_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                Request::Resource(url) => Some(url),
                Request::Document(_) => None,
            })
            .collect()
    }

    pub fn resource_loads(&self, url: &str) -> usize {
        self.resource_requests()
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }

    pub fn document_fetches(&self, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| matches!(request, Request::Document(u) if u == url))
            .count()
    }

    fn record(&self, request: Request) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        self.record(Request::Document(url.to_string()));
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| ShellError::transport(url, "not found"))
    }

    async fn load_resource(&self, url: &str) -> Result<()> {
        self.record(Request::Resource(url.to_string()));
        if self.resources.contains(url) {
            Ok(())
        } else {
            Err(ShellError::transport(url, "not found"))
        }
    }
}
