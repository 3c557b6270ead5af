use crate::{env::EnvManager, error::ConfigError};
use connectors::source::DataSource;
use engine_core::settings::{FailurePolicy, SessionSettings};
use planner::query::{
    dialect::{Dialect, DialectKind},
    renderer::InListStyle,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fs, path::Path, sync::Arc, time::Duration};
use tracing::debug;

pub const ENV_DATA_SOURCE: &str = "DBQ_DATA_SOURCE";
pub const ENV_DIALECT: &str = "DBQ_DIALECT";
pub const ENV_FAILURE_POLICY: &str = "DBQ_FAILURE_POLICY";
pub const ENV_TIMEOUT_MS: &str = "DBQ_TIMEOUT_MS";
pub const ENV_IN_LISTS: &str = "DBQ_IN_LISTS";

/// Runtime configuration of a query session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Data directory or data source name, handed to the driver as is.
    pub data_source: String,

    #[serde(default)]
    pub dialect: DialectKind,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub in_list_style: InListStyle,
}

impl EngineConfig {
    pub fn new(data_source: impl Into<String>) -> Self {
        EngineConfig {
            data_source: data_source.into(),
            dialect: DialectKind::default(),
            failure_policy: FailurePolicy::default(),
            timeout_ms: None,
            in_list_style: InListStyle::default(),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: EngineConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;

        debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Reads the `DBQ_*` variables. Only the data source is required.
    pub fn from_env(env: &EnvManager) -> Result<Self, ConfigError> {
        let data_source = env
            .get(ENV_DATA_SOURCE)
            .ok_or_else(|| ConfigError::Missing(ENV_DATA_SOURCE.to_string()))?;

        let mut config = EngineConfig::new(data_source);
        if let Some(value) = env.get(ENV_DIALECT) {
            config.dialect = parse_named(ENV_DIALECT, value)?;
        }
        if let Some(value) = env.get(ENV_FAILURE_POLICY) {
            config.failure_policy = parse_named(ENV_FAILURE_POLICY, value)?;
        }
        if let Some(value) = env.get(ENV_IN_LISTS) {
            config.in_list_style = parse_named(ENV_IN_LISTS, value)?;
        }
        if let Some(value) = env.get(ENV_TIMEOUT_MS) {
            let ms = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_MS.to_string(),
                value: value.to_string(),
            })?;
            config.timeout_ms = Some(ms);
        }
        config.validate()?;

        debug!(dialect = ?config.dialect, policy = ?config.failure_policy, "Loaded engine config from environment");
        Ok(config)
    }

    /// Process environment overlaid with `.env` in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let mut env = EnvManager::from_process();
        env.load_if_exists(".env")?;
        Self::from_env(&env)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_source.trim().is_empty() {
            return Err(ConfigError::Missing("data_source".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::new(self.data_source.clone())
    }

    pub fn dialect(&self) -> Arc<dyn Dialect> {
        Arc::from(self.dialect.dialect())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            failure_policy: self.failure_policy,
            in_lists: self.in_list_style,
            timeout: self.timeout(),
        }
    }
}

/// Parses a variable through the same names the JSON form uses.
fn parse_named<T: DeserializeOwned>(key: &str, value: &str) -> Result<T, ConfigError> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|_| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    })
}
