use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::{
    application::{
        services::jwt::JwtServiceConfig, usecases::authenticate_operator::OperatorCredentials,
    },
    infrastructure::gateways::{GreenApiConfig, SimulatedGatewayConfig},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("An error occured while getting {0} env param")]
    Missing(&'static str),
    #[error("An error occured while parsing {0} env param: {1}")]
    Invalid(&'static str, String),
}

#[derive(Clone)]
pub enum GatewayConfig {
    Simulated(SimulatedGatewayConfig),
    GreenApi(GreenApiConfig),
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub log_level: String,
    pub log_format: String,
    pub gateway: GatewayConfig,
    pub send_timeout: Duration,
    pub jwt: JwtServiceConfig,
    pub operator: OperatorCredentials,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let mock_mode = env.parse_or("MOCK_MODE", false)?;
        let gateway = if mock_mode {
            let failure_rate: f64 = env.parse_or("MOCK_FAILURE_RATE", 0.1)?;
            if !(0.0..=1.0).contains(&failure_rate) {
                return Err(ConfigError::Invalid(
                    "MOCK_FAILURE_RATE",
                    "must be between 0 and 1".to_string(),
                ));
            }
            GatewayConfig::Simulated(SimulatedGatewayConfig {
                failure_rate,
                latency: Duration::from_millis(env.parse_or("MOCK_LATENCY_MS", 200)?),
            })
        } else {
            GatewayConfig::GreenApi(GreenApiConfig {
                base_url: env
                    .optional("GREEN_API_URL")
                    .unwrap_or_else(|| "https://api.green-api.com".to_string()),
                id_instance: env.required("GREEN_API_ID_INSTANCE")?,
                api_token: env.required("GREEN_API_TOKEN_INSTANCE")?,
            })
        };

        Ok(Config {
            port: env.parse_required("PORT")?,
            scheme: env.required("SCHEME")?,
            host: env.required("HOST")?,
            log_level: env.optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: env
                .optional("LOG_FORMAT")
                .unwrap_or_else(|| "pretty".to_string()),
            gateway,
            send_timeout: Duration::from_secs(env.parse_or("SEND_TIMEOUT_SECS", 30)?),
            jwt: JwtServiceConfig {
                secret: env.required("JWT_SECRET")?,
                expiration: Duration::from_secs(env.parse_or("JWT_EXPIRATION_SECS", 3600)?),
            },
            operator: OperatorCredentials {
                username: env.required("OPERATOR_USERNAME")?,
                password: env.required("OPERATOR_PASSWORD")?,
            },
        })
    }

    pub fn mock_mode(&self) -> bool {
        matches!(self.gateway, GatewayConfig::Simulated(_))
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &'static str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn parse_required<T>(&self, key: &'static str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.required(key)?
            .trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::Invalid(key, err.to_string()))
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(_) => self.parse_required(key),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(extra: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = BASE
            .iter()
            .chain(extra)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const BASE: &[(&str, &str)] = &[
        ("PORT", "5000"),
        ("SCHEME", "http"),
        ("HOST", "localhost"),
        ("JWT_SECRET", "secret"),
        ("OPERATOR_USERNAME", "admin"),
        ("OPERATOR_PASSWORD", "password"),
    ];

    #[test]
    fn mock_mode_needs_no_gateway_credentials() {
        let config = parse(&[("MOCK_MODE", "true")]).unwrap();

        assert!(config.mock_mode());
        assert_eq!(config.port, 5000);
        assert_eq!(config.send_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        match config.gateway {
            GatewayConfig::Simulated(sim) => {
                assert_eq!(sim.failure_rate, 0.1);
                assert_eq!(sim.latency, Duration::from_millis(200));
            }
            GatewayConfig::GreenApi(_) => panic!("expected simulated gateway"),
        }
    }

    #[test]
    fn real_mode_requires_green_api_instance() {
        let result = parse(&[]);

        assert_eq!(
            result.err(),
            Some(ConfigError::Missing("GREEN_API_ID_INSTANCE"))
        );
    }

    #[test]
    fn real_mode_uses_default_green_api_url() {
        let config = parse(&[
            ("GREEN_API_ID_INSTANCE", "1101000001"),
            ("GREEN_API_TOKEN_INSTANCE", "token"),
        ])
        .unwrap();

        assert!(!config.mock_mode());
        match config.gateway {
            GatewayConfig::GreenApi(green) => {
                assert_eq!(green.base_url, "https://api.green-api.com")
            }
            GatewayConfig::Simulated(_) => panic!("expected green-api gateway"),
        }
    }

    #[test]
    fn rejects_unparseable_port_and_failure_rate() {
        let bad_port = parse(&[("MOCK_MODE", "true"), ("PORT", "http")]);
        assert!(matches!(bad_port, Err(ConfigError::Invalid("PORT", _))));

        let bad_rate = parse(&[("MOCK_MODE", "true"), ("MOCK_FAILURE_RATE", "1.5")]);
        assert!(matches!(
            bad_rate,
            Err(ConfigError::Invalid("MOCK_FAILURE_RATE", _))
        ));
    }
}
