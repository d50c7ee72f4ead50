use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};

use super::Transport;
use crate::error::{Result, ShellError};

/// Serves documents and resources from a directory tree. A URL such as
/// `/Configuration/Ribbon.json` maps to `<root>/Configuration/Ribbon.json`.
#[derive(Debug, Clone)]
pub struct FileTransport {
    root: PathBuf,
}

impl FileTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map `url` under the root. URLs that would climb out of it are refused.
    pub fn resolve(&self, url: &str) -> Result<PathBuf> {
        let relative = url.split(['?', '#']).next().unwrap_or(url);
        let relative = Path::new(relative.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ShellError::transport(url, "path leaves the resource root"));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let path = self.resolve(url)?;
        debug!("Reading document {:?}", path);

        let content = tokio::fs::read(&path)
            .await
            .map_err(|e| ShellError::transport(url, e))?;
        serde_json::from_slice(&content).map_err(|e| ShellError::transport(url, e))
    }

    async fn load_resource(&self, url: &str) -> Result<()> {
        let path = self.resolve(url)?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| ShellError::transport(url, e))?;

        if metadata.is_file() {
            Ok(())
        } else {
            Err(ShellError::transport(url, "not a file"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_strips_leading_slash_and_query() {
        let transport = FileTransport::new("/srv/site");
        assert_eq!(
            transport.resolve("/Resources/Images/paste.png?v=2").unwrap(),
            PathBuf::from("/srv/site/Resources/Images/paste.png")
        );
    }

    #[tokio::test]
    async fn test_parent_segments_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FileTransport::new(dir.path().join("site"));

        for url in ["/../../etc/passwd", "/Configuration/../../secret.json", "/a/.."] {
            assert!(
                matches!(transport.resolve(url), Err(ShellError::Transport { .. })),
                "{} was accepted",
                url
            );
        }

        std::fs::write(dir.path().join("secret.json"), "{}").unwrap();
        let result = transport.fetch_json("/../secret.json").await;
        assert!(matches!(result, Err(ShellError::Transport { .. })));
        assert!(transport.resolve("/./Configuration/App.json").is_ok());
    }

    #[tokio::test]
    async fn test_fetch_json_reads_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Configuration")).unwrap();
        std::fs::write(
            dir.path().join("Configuration/App.json"),
            json!({ "Title": "Demo" }).to_string(),
        )
        .unwrap();

        let transport = FileTransport::new(dir.path());
        let document = transport.fetch_json("/Configuration/App.json").await.unwrap();
        assert_eq!(document["Title"], "Demo");

        let missing = transport.fetch_json("/Configuration/Nope.json").await;
        assert!(matches!(missing, Err(ShellError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_directories_are_not_resources() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FileTransport::new(dir.path());
        assert!(transport.load_resource("/").await.is_err());
    }
}
