use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Configuration for the documentation resolver and its sources.
///
/// `local_roots` are tried in order ahead of the remote origin, which is
/// only consulted when a base URL is configured. The defaults mirror the
/// development layout of the docs repository checked out next to the
/// consuming project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub local_roots: Vec<PathBuf>,
    pub remote_base_url: Option<Url>,
    pub cache_dir: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            local_roots: vec![
                PathBuf::from("../docs-repository/packages"),
                PathBuf::from("../../packages/docs-repository/packages"),
            ],
            remote_base_url: None,
            cache_dir: std::env::temp_dir().join("odocs").join("cache"),
            timeout_secs: 30,
            user_agent: concat!("odocs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
