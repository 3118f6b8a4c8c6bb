use anyhow::Result;
use serde::Deserialize;
use anyhow::{anyhow, Context};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub qr: QrConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
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

/// Which repository implementation backs the contact collection.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    Moka,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "moka" => Ok(Self::Moka),
            other => Err(anyhow!("unknown store backend `{other}` (expected memory|moka)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            ttl_secs: default_ttl_secs(),
            max_contacts: default_max_contacts(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrConfig {
    #[serde(default = "default_qr_side")]
    pub width: u32,
    #[serde(default = "default_qr_side")]
    pub height: u32,
    #[serde(default)]
    pub margin: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self { width: default_qr_side(), height: default_qr_side(), margin: 0 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_ttl_secs() -> u64 { 24 * 60 * 60 }
fn default_max_contacts() -> usize { 10 }
fn default_qr_side() -> u32 { 300 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults overlaid with environment variables.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path(), |key| std::env::var(key).ok())
    }

    /// Only a missing file falls back to defaults; unreadable or malformed files are errors.
    pub fn load_or_env_from<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => load_from_str(&content).with_context(|| format!("invalid config file {path}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut cfg = AppConfig::default();
                cfg.apply_env_overrides(lookup)?;
                cfg
            }
            Err(e) => return Err(anyhow!(e).context(format!("cannot read config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from a key lookup (normally the process environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| anyhow!("SERVER_PORT is not a valid port: {port}"))?;
        }
        if let Some(threads) = lookup("TOKIO_WORKER_THREADS") {
            let threads = threads
                .parse::<usize>()
                .map_err(|_| anyhow!("TOKIO_WORKER_THREADS must be an integer: {threads}"))?;
            self.server.worker_threads = Some(threads);
        }
        if let Some(backend) = lookup("CONTACTS_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(ttl) = lookup("CONTACTS_TTL_SECS") {
            self.store.ttl_secs = ttl.parse().map_err(|_| anyhow!("CONTACTS_TTL_SECS must be an integer: {ttl}"))?;
        }
        if let Some(max) = lookup("CONTACTS_MAX") {
            self.store.max_contacts = max.parse().map_err(|_| anyhow!("CONTACTS_MAX must be an integer: {max}"))?;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Compact,
            };
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.validate()?;
        self.qr.validate()?;
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
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ttl_secs == 0 {
            return Err(anyhow!("store.ttl_secs must be a positive number of seconds"));
        }
        if self.max_contacts == 0 {
            return Err(anyhow!("store.max_contacts must be >= 1"));
        }
        Ok(())
    }

    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_secs)
    }
}

impl QrConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!("qr.width and qr.height must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.store.backend, StoreBackend::Moka);
        assert_eq!(cfg.store.ttl_secs, 86_400);
        assert_eq!(cfg.store.max_contacts, 10);
        assert_eq!((cfg.qr.width, cfg.qr.height, cfg.qr.margin), (300, 300, 0));
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn parses_all_sections() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [store]
            backend = "memory"
            ttl_secs = 60
            max_contacts = 3

            [qr]
            width = 128
            height = 128
            margin = 2

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.ttl(), std::time::Duration::from_secs(60));
        assert_eq!(cfg.store.max_contacts, 3);
        assert_eq!(cfg.qr.margin, 2);
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn rejects_zero_ttl_and_capacity() {
        let mut cfg = load_from_str("[store]\nttl_secs = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = load_from_str("[store]\nmax_contacts = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_host_and_zero_threads_are_normalized() {
        let mut cfg = load_from_str("[server]\nhost = \"  \"\nport = 8081\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|key| match key {
            "SERVER_PORT" => Some("7070".into()),
            "CONTACTS_BACKEND" => Some("memory".into()),
            "CONTACTS_TTL_SECS" => Some("5".into()),
            "LOG_FORMAT" => Some("JSON".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.server.port, 7070);
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.ttl_secs, 5);
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_env_port_is_an_error() {
        let mut cfg = AppConfig::default();
        let res = cfg.apply_env_overrides(|key| (key == "SERVER_PORT").then(|| "http".to_string()));
        assert!(res.is_err());
    }

    #[test]
    fn invalid_env_worker_threads_is_an_error() {
        let mut cfg = AppConfig::default();
        let res = cfg.apply_env_overrides(|key| (key == "TOKIO_WORKER_THREADS").then(|| "many".to_string()));
        assert!(res.is_err());

        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|key| (key == "TOKIO_WORKER_THREADS").then(|| "2".to_string()))
            .unwrap();
        assert_eq!(cfg.server.worker_threads, Some(2));
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("contact-card-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn malformed_file_is_not_replaced_by_defaults() {
        let path = scratch_path("malformed");
        std::fs::write(&path, "[store]\nmax_contacts = \"ten\"\nttl_secs = 60\n").unwrap();
        let res = AppConfig::load_or_env_from(path.to_str().unwrap(), |_| None);
        std::fs::remove_file(&path).ok();
        assert!(res.is_err(), "malformed config must not silently fall back");
    }

    #[test]
    fn existing_file_is_used() {
        let path = scratch_path("valid");
        std::fs::write(&path, "[store]\nttl_secs = 60\n").unwrap();
        let cfg = AppConfig::load_or_env_from(path.to_str().unwrap(), |_| None).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.store.ttl_secs, 60);
        assert_eq!(cfg.store.max_contacts, 10);
    }

    #[test]
    fn missing_file_falls_back_to_env_over_defaults() {
        let path = scratch_path("absent");
        let cfg = AppConfig::load_or_env_from(path.to_str().unwrap(), |key| {
            (key == "CONTACTS_MAX").then(|| "3".to_string())
        })
        .unwrap();
        assert_eq!(cfg.store.max_contacts, 3);
        assert_eq!(cfg.server.port, 8080);
    }
}
