use models::invoice::{DEFAULT_DUE_DAYS, InvoiceTerms};
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CURRENCY: &str = "NGN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub oidc_issuer_url: String,
    pub bind_addr: SocketAddr,
    pub invoice_terms: InvoiceTerms,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bind_addr = parse(
            "BIND_ADDR",
            get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let currency = get("CURRENCY")
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
            .trim()
            .to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid {
                key: "CURRENCY",
                value: currency,
                reason: "expected a three-letter ISO 4217 code".to_string(),
            });
        }

        let due_days = match get("INVOICE_DUE_DAYS") {
            Some(value) => parse("INVOICE_DUE_DAYS", value)?,
            None => DEFAULT_DUE_DAYS,
        };

        let run_migrations = match get("RUN_MIGRATIONS") {
            Some(value) => parse("RUN_MIGRATIONS", value.to_lowercase())?,
            None => false,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            bind_addr,
            invoice_terms: InvoiceTerms { currency, due_days },
            run_migrations,
        })
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/banquet"),
        ("OIDC_ISSUER_URL", "https://idp.example.com"),
    ];

    #[test]
    fn test_defaults() {
        let config = config(&REQUIRED).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.invoice_terms, InvoiceTerms::default());
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_missing_database_url() {
        let err = config(&[("OIDC_ISSUER_URL", "https://idp.example.com")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("CURRENCY", "usd"),
            ("INVOICE_DUE_DAYS", "7"),
            ("RUN_MIGRATIONS", "TRUE"),
        ]);
        let config = config(&vars).unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.invoice_terms.currency, "USD");
        assert_eq!(config.invoice_terms.due_days, 7);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("INVOICE_DUE_DAYS", "two weeks"));
        assert!(matches!(
            config(&vars),
            Err(ConfigError::Invalid {
                key: "INVOICE_DUE_DAYS",
                ..
            })
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("CURRENCY", "NAIRA"));
        assert!(matches!(
            config(&vars),
            Err(ConfigError::Invalid { key: "CURRENCY", .. })
        ));
    }
}
