use anyhow::{Context, Result};

use crate::settings::{keys, Settings};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    /// Name of the variable the API-key gate reads on each request.
    pub api_key_var: String,
}

impl ServerConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let host = settings.get_or("HOST", "0.0.0.0").to_string();

        let port = settings
            .get_parsed::<u16>("PORT")
            .context("PORT must be a valid number")?
            .unwrap_or(3002);

        let cors_origin = settings.get_or("CORS_ORIGIN", "*").to_string();

        let api_key_var = settings.get_or("API_KEY_VAR", keys::API_KEY).to_string();

        Ok(Self {
            host,
            port,
            cors_origin,
            api_key_var,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        Settings::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_settings(&settings(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3002);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.api_key_var, "API_KEY");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_settings(&settings(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ORIGIN", "https://example.com"),
            ("API_KEY_VAR", "GATEWAY_KEY"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "https://example.com");
        assert_eq!(config.api_key_var, "GATEWAY_KEY");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_settings(&settings(&[("PORT", "70000")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid number"));
    }
}
