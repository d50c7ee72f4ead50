//! Fetching documents and resources
//!
//! The shell never talks to the network or the file system directly. It asks a
//! [`Transport`] to fetch a JSON document or to load a resource (image or
//! stylesheet) and only cares whether that succeeded.

pub mod file;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use file::FileTransport;
pub use http::HttpTransport;
pub use memory::{MemoryTransport, Request};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the document at `url` and parse it as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value>;

    /// Load the resource at `url`, discarding its content.
    async fn load_resource(&self, url: &str) -> Result<()>;
}

/// Pick a transport for a resource root: `http(s)://` roots go over HTTP,
/// anything else is treated as a directory.
pub fn for_root(root: &str) -> Result<std::sync::Arc<dyn Transport>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(std::sync::Arc::new(HttpTransport::new(root)?))
    } else {
        Ok(std::sync::Arc::new(FileTransport::new(root)))
    }
}
