use dracin_source_manager::SourceManagerConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PATH: &str = "./config.toml";

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourceManagerConfig,
    #[serde(default)]
    pub cache: crate::service::cache::CacheConfig,
    #[serde(default)]
    pub session: crate::session::SessionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, serde::Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: IpAddr,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> IpAddr {
        IpAddr::from(Ipv4Addr::new(127, 0, 0, 1))
    }

    fn default_port() -> u16 {
        3000
    }

    /// Values that parse take precedence, the others are ignored.
    fn overridden(mut self, host: Option<String>, port: Option<String>) -> Self {
        if let Some(host) = host.and_then(|value| value.parse().ok()) {
            self.host = host;
        }
        if let Some(port) = port.and_then(|value| value.parse().ok()) {
            self.port = port;
        }
        self
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

impl Config {
    /// Reads the file named by `CONFIG_FILE`, then applies `HOST` and `PORT`.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::from_env_file()?;
        config.server = config
            .server
            .overridden(std::env::var("HOST").ok(), std::env::var("PORT").ok());
        Ok(config)
    }

    fn from_env_file() -> Result<Self, String> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_path(PathBuf::from(path)),
            Err(_) => {
                let path = PathBuf::from(DEFAULT_PATH);
                if path.exists() {
                    Self::from_path(path)
                } else {
                    tracing::debug!("no configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: PathBuf) -> Result<Self, String> {
        std::fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|inner| Self::from_str(inner.as_str()))
    }

    pub fn from_str(inner: &str) -> Result<Self, String> {
        toml::from_str(inner).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ServerConfig};

    #[test]
    fn should_parse_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.ttl, 300);
        assert_eq!(config.session.debounce_ms, 300);
        assert_eq!(config.server.address().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn should_override_server_address() {
        let config = Config::from_str("[server]\nhost = \"0.0.0.0\"\nport = 8000").unwrap();
        assert_eq!(config.server.address().to_string(), "0.0.0.0:8000");

        let server = config.server.overridden(None, Some("9000".into()));
        assert_eq!(server.address().to_string(), "0.0.0.0:9000");

        let server = ServerConfig::default().overridden(Some("not an ip".into()), Some("x".into()));
        assert_eq!(server.address().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn should_parse_full_config() {
        let config = Config::from_str(
            r#"
[sources.melolo]
base_url = "http://gateway.local"

[sources.reelshort]
timeout = 2

[cache]
capacity = 10
ttl = 5

[session]
debounce_ms = 150
"#,
        )
        .unwrap();
        assert_eq!(config.sources.melolo.base_url, "http://gateway.local");
        assert_eq!(config.sources.reelshort.timeout, 2);
        assert_eq!(config.cache.capacity, 10);
        assert_eq!(config.cache.ttl, 5);
        assert_eq!(config.session.debounce_ms, 150);
    }

    #[test]
    fn should_fail_with_invalid_config() {
        assert!(Config::from_str("[cache]\ncapacity = \"many\"").is_err());
    }

    #[test]
    fn should_fail_with_missing_file() {
        assert!(Config::from_path("/nonexistent/dracin.toml".into()).is_err());
    }
}
