use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Keys the connection file must define. Order is the order they are reported in.
pub const REQUIRED_KEYS: [&str; 4] = ["DB_HOST", "DB_USER", "DB_PASS", "DB_NAME"];

const DEFAULT_CONFIG_PATH: &str = ".env";
const DEFAULT_LOG_FILTER: &str = "cotizador=debug,tower_http=debug";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0} not found")]
    MissingFile(PathBuf),

    #[error("configuration file could not be read: {0}")]
    Unreadable(#[from] dotenvy::Error),

    #[error("database configuration incomplete, missing: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

// Top-level configuration, one section per concern
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub pool_size: u32,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
}

/// Log filter used before any configuration file has been read.
pub fn log_filter() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

impl Config {
    /// Loads the connection file named by `COTIZADOR_CONFIG` (default `.env`).
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("COTIZADOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            values.insert(key, value);
        }

        Self::from_values(&values)
    }

    /// Builds the configuration from key/value pairs. The four connection keys
    /// must come from `values`; everything else falls back to the process
    /// environment and then to defaults.
    pub fn from_values(values: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !values.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        let lookup = |key: &str| values.get(key).cloned().or_else(|| env::var(key).ok());

        Ok(Config {
            app: AppConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or("PORT", lookup("PORT"), 8000)?,
            },
            database: DatabaseConfig {
                host: values["DB_HOST"].clone(),
                port: parse_or("DB_PORT", lookup("DB_PORT"), 5432)?,
                user: values["DB_USER"].clone(),
                password: values["DB_PASS"].clone(),
                name: values["DB_NAME"].clone(),
                pool_size: parse_or("DB_POOL_SIZE", lookup("DB_POOL_SIZE"), 10)?,
            },
            redis: RedisConfig {
                url: lookup("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            },
            session: SessionConfig {
                ttl_seconds: parse_or("SESSION_TTL_SECONDS", lookup("SESSION_TTL_SECONDS"), 86400)?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn complete() -> HashMap<String, String> {
        [
            ("DB_HOST", "localhost"),
            ("DB_USER", "cotizador"),
            ("DB_PASS", "secreto"),
            ("DB_NAME", "tienda"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn complete_values_build_config() {
        let config = Config::from_values(&complete()).unwrap();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.user, "cotizador");
        assert_eq!(config.database.password, "secreto");
        assert_eq!(config.database.name, "tienda");
    }

    #[test]
    fn every_missing_key_is_reported() {
        let mut values = complete();
        values.remove("DB_PASS");
        values.remove("DB_HOST");

        match Config::from_values(&values) {
            Err(ConfigError::MissingKeys(keys)) => assert_eq!(keys, vec!["DB_HOST", "DB_PASS"]),
            other => panic!("expected MissingKeys, got {other:?}"),
        }
    }

    #[test]
    fn file_values_take_precedence_and_bad_numbers_fail() {
        let mut values = complete();
        values.insert("DB_POOL_SIZE".into(), "3".into());
        assert_eq!(Config::from_values(&values).unwrap().database.pool_size, 3);

        values.insert("DB_POOL_SIZE".into(), "muchos".into());
        assert!(matches!(
            Config::from_values(&values),
            Err(ConfigError::Invalid { key: "DB_POOL_SIZE", .. })
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        assert!(matches!(Config::from_file(&path), Err(ConfigError::MissingFile(_))));
    }

    #[test]
    fn reads_key_value_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "DB_HOST=db.interno").unwrap();
        writeln!(file, "DB_USER=app").unwrap();
        writeln!(file, "DB_PASS=\"p4ss word\"").unwrap();
        writeln!(file, "DB_NAME=cotizaciones").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.database.host, "db.interno");
        assert_eq!(config.database.password, "p4ss word");
    }

    #[test]
    fn incomplete_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "DB_HOST=localhost\n").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::MissingKeys(_))));
    }
}
