use anyhow::Result;
use odocs_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Server configuration: built-in defaults, overridden by an optional
/// `odocs.toml` in the working directory, overridden by `ODOCS_*`
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub client: ClientSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub name: String,
    pub version: String,
    pub bind_address: String,
    pub port: u16,
}

/// The resolver's client section, with the server's own defaults
/// (cache under the user's home directory instead of a temp dir).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub local_roots: Vec<PathBuf>,
    pub remote_base_url: Option<Url>,
    pub cache_dir: PathBuf,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "odocs".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 2803,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        let defaults = ClientConfig::default();
        Self {
            local_roots: defaults.local_roots,
            remote_base_url: None,
            cache_dir: default_cache_dir(),
            timeout_secs: defaults.timeout_secs,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `~/.odocs/cache`, falling back to the system temp dir when the home
/// directory cannot be determined.
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".odocs")
        .join("cache")
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = match std::fs::read_to_string("odocs.toml") {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(e.into()),
        };

        config.load_from_env()?;
        Ok(config)
    }

    fn load_from_env(&mut self) -> Result<()> {
        if let Ok(bind_address) = env::var("ODOCS_BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
        if let Ok(port) = env::var("ODOCS_PORT") {
            self.server.port = port.parse()?;
        }
        if let Ok(roots) = env::var("ODOCS_LOCAL_ROOTS") {
            self.client.local_roots = env::split_paths(&roots).collect();
        }
        if let Ok(base_url) = env::var("ODOCS_REMOTE_BASE_URL") {
            self.client.remote_base_url = Some(Url::parse(&base_url)?);
        }
        if let Ok(cache_dir) = env::var("ODOCS_CACHE_DIR") {
            self.client.cache_dir = PathBuf::from(cache_dir);
        }
        if let Ok(timeout) = env::var("ODOCS_CLIENT_TIMEOUT") {
            self.client.timeout_secs = timeout.parse()?;
        }
        if let Ok(level) = env::var("ODOCS_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// The resolver configuration this server config describes
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            local_roots: self.client.local_roots.clone(),
            remote_base_url: self.client.remote_base_url.clone(),
            cache_dir: self.client.cache_dir.clone(),
            timeout_secs: self.client.timeout_secs,
            user_agent: format!("{}/{}", self.server.name, self.server.version),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.name.is_empty() {
            return Err(anyhow::anyhow!("Server name cannot be empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port must be greater than 0"));
        }
        if self.client.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Client timeout must be greater than 0"));
        }
        if self.client.local_roots.is_empty() && self.client.remote_base_url.is_none() {
            return Err(anyhow::anyhow!(
                "No documentation sources configured: set local_roots or remote_base_url"
            ));
        }
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}",
                    self.logging.level
                ))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 2803);
        assert!(config.client.cache_dir.ends_with(".odocs/cache"));
    }

    #[test]
    fn test_toml_partial_override() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 4000

            [client]
            local_roots = ["/srv/docs"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.client.local_roots, vec![PathBuf::from("/srv/docs")]);
        // Untouched sections keep their defaults.
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_no_sources() {
        let mut config = Config::default();
        config.client.local_roots.clear();
        config.client.remote_base_url = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_carries_user_agent() {
        let config = Config::default();
        let client = config.client_config();
        assert!(client.user_agent.starts_with("odocs/"));
    }
}
