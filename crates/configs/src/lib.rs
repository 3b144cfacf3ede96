use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Which key-value backend holds the user table.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(anyhow!("unknown storage.backend `{other}` (expected memory|file)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_table_path")]
    pub path: PathBuf,
    #[serde(default = "default_op_timeout")]
    pub op_timeout_ms: u64,
}

fn default_table_path() -> PathBuf {
    PathBuf::from("data/users.json")
}

fn default_op_timeout() -> u64 {
    5_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_table_path(),
            op_timeout_ms: default_op_timeout(),
        }
    }
}

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at [`config_path`] if present, otherwise built from environment variables.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// Only a missing file falls back to the environment; a file that cannot be
    /// read or parsed is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `STORAGE_BACKEND`,
    /// `STORAGE_PATH`, `STORAGE_TIMEOUT_MS`; unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(backend) = std::env::var("STORAGE_BACKEND").ok().and_then(|b| b.parse().ok()) {
            cfg.storage.backend = backend;
        }
        if let Ok(path) = std::env::var("STORAGE_PATH") {
            cfg.storage.path = PathBuf::from(path);
        }
        if let Some(ms) = std::env::var("STORAGE_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()) {
            cfg.storage.op_timeout_ms = ms;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(anyhow!("storage.path is empty; the file backend needs a table path"));
        }
        if self.op_timeout_ms == 0 {
            return Err(anyhow!("storage.op_timeout_ms must be a positive number of milliseconds"));
        }
        Ok(())
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let mut cfg = load_from_str("")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.path, PathBuf::from("data/users.json"));
        assert_eq!(cfg.storage.op_timeout(), Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn parses_full_document() -> Result<()> {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            backend = "memory"
            op_timeout_ms = 250
            "#,
        )?;
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.storage.op_timeout_ms, 250);
        Ok(())
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(load_from_str("[storage]\nbackend = \"dynamo\"\n").is_err());
        assert!("dynamo".parse::<StorageBackend>().is_err());
        assert_eq!(" Memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.op_timeout_ms = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.path = PathBuf::new();
        assert!(cfg.normalize_and_validate().is_err());
        cfg.storage.backend = StorageBackend::Memory;
        assert!(cfg.normalize_and_validate().is_ok());
    }

    #[test]
    fn normalize_fills_blank_host_and_threads() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        Ok(())
    }

    fn scratch_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "configs_{}_{:?}.toml",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::write(&path, contents).expect("write scratch config");
        path
    }

    #[test]
    fn invalid_file_is_not_replaced_by_env() {
        let path = scratch_config("[storage]\nbackend = \"dynamo\"\n");
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("config file"));
    }

    #[test]
    fn file_values_are_validated() {
        let path = scratch_config("[server]\nhost = \"127.0.0.1\"\nport = 0\n");
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_env() -> Result<()> {
        let missing = std::env::temp_dir().join("configs_does_not_exist.toml");
        let cfg = AppConfig::load_or_env_from(missing.to_str().unwrap())?;
        assert!(cfg.server.worker_threads.is_some());
        Ok(())
    }

    #[test]
    fn config_path_env_points_at_bad_file() {
        let path = scratch_config("[storage]\nbackend = \"dynamo\"\n");
        std::env::set_var("CONFIG_PATH", &path);
        let res = AppConfig::load_or_env();
        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }
}
