use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_GERENCIAMENTO_URL: &str = "http://gerenciamento:5000";
pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 3;

/// Per-binary fallbacks used when neither `config.toml` nor the environment says otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    pub name: &'static str,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub peer: PeerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: 0, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// JSON database file; empty means `data/<service>.json`.
    #[serde(default)]
    pub db_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeerConfig {
    #[serde(default = "default_gerenciamento_url")]
    pub gerenciamento_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self { gerenciamento_url: default_gerenciamento_url(), timeout_secs: default_timeout_secs() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_gerenciamento_url() -> String { DEFAULT_GERENCIAMENTO_URL.into() }
fn default_timeout_secs() -> u64 { DEFAULT_PEER_TIMEOUT_SECS }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (if any) -> environment overrides -> service defaults -> validation.
    pub fn load_for(defaults: ServiceDefaults) -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) => {
                info!(service = defaults.name, error = %e, "no usable config file, using defaults");
                AppConfig::default()
            }
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate(defaults)?;
        Ok(cfg)
    }

    /// Apply environment overrides through a lookup function so tests need not touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => warn!(value = %port, error = %e, "ignoring invalid SERVER_PORT"),
            }
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS") {
            match w.parse::<usize>() {
                Ok(n) => self.server.worker_threads = Some(n),
                Err(e) => warn!(value = %w, error = %e, "ignoring invalid TOKIO_WORKER_THREADS"),
            }
        }
        if let Some(file) = lookup("DB_FILE") {
            self.storage.db_file = file;
        }
        if let Some(url) = lookup("GERENCIAMENTO_URL") {
            self.peer.gerenciamento_url = url;
        }
        if let Some(t) = lookup("PEER_TIMEOUT_SECS") {
            match t.parse::<u64>() {
                Ok(secs) => self.peer.timeout_secs = secs,
                Err(e) => warn!(value = %t, error = %e, "ignoring invalid PEER_TIMEOUT_SECS"),
            }
        }
    }

    pub fn normalize_and_validate(&mut self, defaults: ServiceDefaults) -> Result<()> {
        self.server.normalize(defaults)?;
        self.storage.normalize(defaults);
        self.peer.normalize()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self, defaults: ServiceDefaults) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            self.port = defaults.port;
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
    fn normalize(&mut self, defaults: ServiceDefaults) {
        if self.db_file.trim().is_empty() {
            self.db_file = format!("data/{}.json", defaults.name);
        }
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.db_file)
    }
}

impl PeerConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.gerenciamento_url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            self.gerenciamento_url = default_gerenciamento_url();
        } else {
            self.gerenciamento_url = trimmed;
        }
        let lower = self.gerenciamento_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("peer.gerenciamento_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("peer.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const RESERVAS: ServiceDefaults = ServiceDefaults { name: "reservas", port: 5001 };

    #[test]
    fn empty_file_falls_back_to_service_defaults() -> Result<()> {
        let mut cfg = parse("")?;
        cfg.normalize_and_validate(RESERVAS)?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5001);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.db_file, "data/reservas.json");
        assert_eq!(cfg.peer.gerenciamento_url, DEFAULT_GERENCIAMENTO_URL);
        assert_eq!(cfg.peer.timeout(), Duration::from_secs(3));
        Ok(())
    }

    #[test]
    fn file_values_are_kept() -> Result<()> {
        let mut cfg = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 7000

            [storage]
            db_file = "/var/lib/escola/reservas.json"

            [peer]
            gerenciamento_url = "http://localhost:5000/"
            timeout_secs = 1
            "#,
        )?;
        cfg.normalize_and_validate(RESERVAS)?;
        assert_eq!(cfg.bind_addr(), "127.0.0.1:7000");
        assert_eq!(cfg.storage.path(), PathBuf::from("/var/lib/escola/reservas.json"));
        // 末尾斜杠会被去掉，拼接路径时不会出现 //
        assert_eq!(cfg.peer.gerenciamento_url, "http://localhost:5000");
        assert_eq!(cfg.peer.timeout_secs, 1);
        Ok(())
    }

    #[test]
    fn env_overrides_file() -> Result<()> {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "9001"),
            ("DB_FILE", "other.json"),
            ("GERENCIAMENTO_URL", "http://127.0.0.1:5555"),
            ("PEER_TIMEOUT_SECS", "not-a-number"),
        ]);
        let mut cfg = parse("[server]\nport = 7000\n")?;
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        cfg.normalize_and_validate(RESERVAS)?;
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.storage.db_file, "other.json");
        assert_eq!(cfg.peer.gerenciamento_url, "http://127.0.0.1:5555");
        assert_eq!(cfg.peer.timeout_secs, DEFAULT_PEER_TIMEOUT_SECS);
        Ok(())
    }

    #[test]
    fn invalid_worker_threads_keeps_file_value() -> Result<()> {
        let mut cfg = parse("[server]\nworker_threads = 2\n")?;
        cfg.apply_env(|k| (k == "TOKIO_WORKER_THREADS").then(|| "many".to_string()));
        assert_eq!(cfg.server.worker_threads, Some(2));

        cfg.apply_env(|k| (k == "TOKIO_WORKER_THREADS").then(|| "8".to_string()));
        assert_eq!(cfg.server.worker_threads, Some(8));
        Ok(())
    }

    #[test]
    fn rejects_bad_peer_settings() {
        let mut cfg = parse("[peer]\ngerenciamento_url = \"gerenciamento:5000\"\n").unwrap();
        assert!(cfg.normalize_and_validate(RESERVAS).is_err());

        let mut cfg = parse("[peer]\ntimeout_secs = 0\n").unwrap();
        assert!(cfg.normalize_and_validate(RESERVAS).is_err());
    }
}
