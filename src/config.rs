use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub constants: ConstantsConfig,
    pub validator: ValidatorConfig,
    pub margin: MarginConfig,
    pub db: DbConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            request_timeout_secs: 30,
            enable_cors: false,
            cors_origin: "http://localhost:3000".into(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantsBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantsConfig {
    pub cache_ttl_seconds: u64,
    pub source: ConstantsBackend,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self { cache_ttl_seconds: 900, source: ConstantsBackend::Memory }
    }
}

impl ConstantsConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub audit_enabled: bool,
    pub alert_threshold: u8,
    pub alert_webhook_url: Option<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { audit_enabled: true, alert_threshold: 70, alert_webhook_url: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub policy_version: String,
    pub min_margin_percent: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self { policy_version: "2025.1".into(), min_margin_percent: 10.0 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbConfig {
    pub url: Option<String>,
}

impl Config {
    /// Built-in defaults, then `config/default.toml`, then `BESS__*` env vars.
    pub fn load() -> Result<Self> {
        Self::figment().extract().map_err(Into::into)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("BESS__").split("__"))
    }
}
