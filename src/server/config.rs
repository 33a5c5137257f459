use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,

    pub bind_address: SocketAddr,

    /// Relay that receives notifications as JSON; `None` logs them instead.
    pub notification_webhook_url: Option<String>,

    /// Insert demo flights when the flight table is empty.
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_address = var("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

        let seed_demo_data = match var("SEED_DEMO_DATA").as_deref().map(str::trim) {
            None => false,
            Some("1") | Some("true") | Some("TRUE") => true,
            Some("0") | Some("false") | Some("FALSE") => false,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "SEED_DEMO_DATA".to_string(),
                    reason: format!("expected true or false, got '{}'", other),
                }
                .into())
            }
        };

        Ok(Self {
            database_url,
            bind_address,
            notification_webhook_url: var("NOTIFICATION_WEBHOOK_URL"),
            seed_demo_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();

        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert!(config.notification_webhook_url.is_none());
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn requires_database_url() {
        let result = Config::from_lookup(lookup(&[]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DATABASE_URL"
        ));
    }

    #[test]
    fn rejects_invalid_seed_flag() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SEED_DEMO_DATA", "sometimes"),
        ]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn blank_webhook_url_is_unset() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("NOTIFICATION_WEBHOOK_URL", " "),
            ("SEED_DEMO_DATA", "true"),
        ]))
        .unwrap();

        assert!(config.notification_webhook_url.is_none());
        assert!(config.seed_demo_data);
    }
}
