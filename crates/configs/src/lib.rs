use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Process-wide configuration, built once at startup and handed to every
/// component that needs it.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub producto_service: ProductoServiceConfig,
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

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Run pending migrations when the service boots.
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Shared secret expected in the `X-API-KEY` header (and sent on outbound calls).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub key: String,
}

/// Where the inventario service finds the producto catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductoServiceConfig {
    pub url: String,
    #[serde(default = "default_http_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_http_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for ProductoServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081".into(),
            connect_timeout_ms: default_http_timeout_ms(),
            read_timeout_ms: default_http_timeout_ms(),
        }
    }
}

impl ProductoServiceConfig {
    pub fn connect_timeout(&self) -> Duration { Duration::from_millis(self.connect_timeout_ms) }
    pub fn read_timeout(&self) -> Duration { Duration::from_millis(self.read_timeout_ms) }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_http_timeout_ms() -> u64 { 5000 }
fn default_true() -> bool { true }

/// Read `CONFIG_PATH` (or `default_path`); a missing file yields defaults.
pub fn load_default(default_path: &str) -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| default_path.to_string());
    if Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate(default_path: &str) -> Result<Self> {
        let mut cfg = load_default(default_path)?;
        cfg.apply_overrides(|k| std::env::var(k).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over the file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(key) = lookup("API_KEY") {
            self.api.key = key;
        }
        if let Some(url) = lookup("PRODUCTO_SERVICE_URL") {
            self.producto_service.url = url;
        }
        if let Some(ms) = lookup("PRODUCTO_CONNECT_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.producto_service.connect_timeout_ms = ms;
        }
        if let Some(ms) = lookup("PRODUCTO_READ_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.producto_service.read_timeout_ms = ms;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        if self.api.key.trim().is_empty() {
            return Err(anyhow!("api.key is empty; set it in the config file or API_KEY"));
        }
        self.producto_service.normalize_and_validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in the config file or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl ProductoServiceConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        let trimmed = self.url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(anyhow!("producto_service.url must start with http(s)"));
        }
        self.url = trimmed;
        if self.connect_timeout_ms == 0 || self.read_timeout_ms == 0 {
            return Err(anyhow!("producto_service timeouts must be positive milliseconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.database.url = "postgres://u:p@localhost/db".into();
        cfg.api.key = "secret".into();
        cfg
    }

    #[test]
    fn parses_sections_and_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8082

            [database]
            url = "postgres://u:p@db/pruebatec"

            [api]
            key = "k"

            [producto_service]
            url = "http://producto:8081"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8082);
        assert_eq!(cfg.database.max_connections, 10);
        assert!(cfg.database.auto_migrate);
        assert_eq!(cfg.producto_service.connect_timeout_ms, 5000);
        assert_eq!(cfg.producto_service.read_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "9000"),
            ("API_KEY", "from-env"),
            ("PRODUCTO_SERVICE_URL", "http://catalog:8081/"),
            ("PRODUCTO_READ_TIMEOUT_MS", "1500"),
        ]);
        let mut cfg = valid();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.api.key, "from-env");
        assert_eq!(cfg.producto_service.url, "http://catalog:8081");
        assert_eq!(cfg.producto_service.read_timeout_ms, 1500);
        assert_eq!(cfg.producto_service.connect_timeout_ms, 5000);
    }

    #[test]
    fn rejects_missing_api_key() {
        let mut cfg = valid();
        cfg.api.key = "  ".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_non_postgres_url() {
        let mut cfg = valid();
        cfg.database.url = "mysql://localhost/db".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_zero_http_timeouts() {
        let mut cfg = valid();
        cfg.producto_service.connect_timeout_ms = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn zero_worker_threads_fall_back_to_four() {
        let mut cfg = valid();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
