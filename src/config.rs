use std::path::PathBuf;

use crate::error::RegistryError;
use crate::registry::CategoryRegistry;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Prepended to every category's bucket suffix.
    pub bucket_prefix: String,
    /// JSON file of category definitions; the builtin set is used when unset.
    pub categories_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            bucket_prefix: "stowage".into(),
            categories_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            bucket_prefix: lookup("BUCKET_PREFIX").unwrap_or(defaults.bucket_prefix),
            categories_path: lookup("CATEGORIES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn load_registry(&self) -> Result<CategoryRegistry, RegistryError> {
        match &self.categories_path {
            Some(path) => CategoryRegistry::from_path(path),
            None => CategoryRegistry::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("BUCKET_PREFIX", "prod"),
            ("CATEGORIES_PATH", "/etc/stowage/categories.json"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.bucket_prefix, "prod");
        assert_eq!(
            config.categories_path,
            Some(PathBuf::from("/etc/stowage/categories.json"))
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_load_builtin_registry() {
        let registry = Config::default().load_registry().unwrap();
        assert!(registry.get("documents").is_some());
    }
}
