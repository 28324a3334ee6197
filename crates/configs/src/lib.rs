use std::{io::ErrorKind, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Fail the originating request when the backing file cannot be written.
    #[serde(default = "default_strict_writes")]
    pub strict_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), strict_writes: default_strict_writes() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3001 }
fn default_data_file() -> PathBuf { PathBuf::from("data/items.json") }
fn default_strict_writes() -> bool { true }
fn default_log_format() -> String { "compact".into() }

impl AppConfig {
    /// Config file first (`CONFIG_PATH`, default `config.toml`); only when
    /// that file does not exist, environment variables and defaults.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// A file that exists but cannot be read, parsed or validated is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Self>(&content).with_context(|| format!("parse {path}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(anyhow::Error::new(e).context(format!("read {path}"))),
        };
        cfg.normalize_and_validate().with_context(|| format!("validate config from {path}"))?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(file) = std::env::var("ITEMS_DATA_FILE") {
            cfg.storage.data_file = PathBuf::from(file);
        }
        if let Some(strict) = std::env::var("STRICT_WRITES").ok().and_then(|v| parse_bool(&v)) {
            cfg.storage.strict_writes = strict;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            cfg.logging.format = format;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.logging.normalize()?;
        Ok(())
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) -> Result<()> {
        let format = self.format.trim().to_ascii_lowercase();
        if format != "compact" && format != "json" {
            return Err(anyhow!("logging.format must be `compact` or `json`, got `{}`", self.format));
        }
        self.format = format;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() -> Result<()> {
        let mut cfg: AppConfig = toml::from_str("")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:3001");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from("data/items.json"));
        assert!(cfg.storage.strict_writes);
        assert_eq!(cfg.logging.format, "compact");
        Ok(())
    }

    #[test]
    fn file_values_are_read() -> Result<()> {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 8088
worker_threads = 0

[storage]
data_file = "/tmp/items/store.json"
strict_writes = false

[logging]
format = "JSON"
"#,
        )?;
        let cfg = AppConfig::load_or_env_from(path.to_string_lossy().as_ref())?;
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8088");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from("/tmp/items/store.json"));
        assert!(!cfg.storage.strict_writes);
        assert_eq!(cfg.logging.format, "json");
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.data_file = PathBuf::new();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.logging.format = "xml".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_host_falls_back() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        Ok(())
    }

    fn tmp_config(body: &str) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, body)?;
        Ok(path)
    }

    #[test]
    fn existing_invalid_file_is_an_error() -> Result<()> {
        let path = tmp_config("[server]\nport = 0\n\n[storage]\ndata_file = \"/srv/custom/items.json\"\n")?;
        let res = AppConfig::load_or_env_from(path.to_string_lossy().as_ref());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());

        let path = tmp_config("[server\nport = ")?;
        let res = AppConfig::load_or_env_from(path.to_string_lossy().as_ref());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
        Ok(())
    }

    #[test]
    fn missing_file_falls_back_to_env() -> Result<()> {
        let path = std::env::temp_dir().join(format!("configs_missing_{}.toml", uuid::Uuid::new_v4()));
        let cfg = AppConfig::load_or_env_from(path.to_string_lossy().as_ref())?;
        assert!(cfg.server.port > 0);
        assert!(!cfg.storage.data_file.as_os_str().is_empty());
        Ok(())
    }

    #[test]
    fn bool_parsing() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
