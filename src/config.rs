use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

const DEV_SECRET_KEY: &str = "dev-secret-key-do-not-use-in-production";
const TEST_SECRET_KEY: &str = "test-secret-key-for-testing-only";

/// Deployment environment selecting the per-environment defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("unknown environment '{}'", other),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        })
    }
}

/// Database engine, derived from the scheme of the database URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseEngine {
    Sqlite,
    Postgres,
}

impl DatabaseEngine {
    fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("sqlite:") {
            Ok(DatabaseEngine::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DatabaseEngine::Postgres)
        } else {
            bail!("unsupported database URL scheme in '{}'", url)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordHasher {
    Argon2,
    Pbkdf2,
    /// Fast and insecure, only meant to speed up test suites
    Md5,
}

impl FromStr for PasswordHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "argon2" => Ok(PasswordHasher::Argon2),
            "pbkdf2" => Ok(PasswordHasher::Pbkdf2),
            "md5" => Ok(PasswordHasher::Md5),
            other => bail!("unknown password hasher '{}'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    LocalMemory,
    Redis(String),
}

impl FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("locmem") {
            Ok(CacheBackend::LocalMemory)
        } else if s.starts_with("redis://") || s.starts_with("rediss://") {
            Ok(CacheBackend::Redis(s.to_string()))
        } else {
            bail!("unsupported cache backend '{}'", s)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticStorage {
    Plain,
    /// Hashed file names resolved through a manifest
    Manifest,
}

impl FromStr for StaticStorage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(StaticStorage::Plain),
            "manifest" => Ok(StaticStorage::Manifest),
            other => bail!("unknown static storage '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown log format '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub debug: bool,
    pub secret_key: String,
    pub database_url: String,
    pub database_engine: DatabaseEngine,
    pub log_filter: String,
    pub log_format: LogFormat,
    pub password_hasher: PasswordHasher,
    pub cache_backend: CacheBackend,
    pub static_storage: StaticStorage,
    pub api_docs: bool,
    pub service_host: String,
    pub service_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, applying the defaults of
    /// the environment named by `APP_ENV`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(value) => value
                .parse::<Environment>()
                .context("APP_ENV must be one of development, test, production")?,
            None => Environment::Development,
        };
        let production = environment == Environment::Production;

        let debug = parse_bool(&lookup, "DEBUG", !production)?;

        let secret_key = match (lookup("SECRET_KEY"), environment) {
            (Some(key), _) => key,
            (None, Environment::Production) => {
                bail!("SECRET_KEY environment variable is required in production")
            }
            (None, Environment::Test) => TEST_SECRET_KEY.to_string(),
            (None, Environment::Development) => DEV_SECRET_KEY.to_string(),
        };

        let database_url = match (lookup("DATABASE_URL"), environment) {
            (Some(url), _) => url,
            (None, Environment::Production) => {
                bail!("DATABASE_URL environment variable is required in production")
            }
            (None, Environment::Test) => "sqlite::memory:".to_string(),
            (None, Environment::Development) => "sqlite://db.sqlite3".to_string(),
        };
        let database_engine = DatabaseEngine::from_url(&database_url)
            .context("DATABASE_URL must be a sqlite: or postgres:// URL")?;

        let log_filter = lookup("LOG_FILTER").unwrap_or_else(|| {
            match environment {
                Environment::Development => "debug",
                Environment::Test => "off",
                Environment::Production => "info",
            }
            .to_string()
        });

        let log_format = parse_or(
            &lookup,
            "LOG_FORMAT",
            if production { LogFormat::Json } else { LogFormat::Pretty },
        )?;

        let password_hasher = parse_or(
            &lookup,
            "PASSWORD_HASHER",
            if environment == Environment::Test {
                PasswordHasher::Md5
            } else {
                PasswordHasher::Argon2
            },
        )?;
        if production && password_hasher == PasswordHasher::Md5 {
            bail!("PASSWORD_HASHER=md5 is not allowed in production");
        }

        let cache_backend = parse_or(&lookup, "CACHE_URL", CacheBackend::LocalMemory)?;

        let static_storage = parse_or(
            &lookup,
            "STATIC_STORAGE",
            if production {
                StaticStorage::Manifest
            } else {
                StaticStorage::Plain
            },
        )?;

        let api_docs = parse_bool(&lookup, "API_DOCS", !production)?;

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            environment,
            debug,
            secret_key,
            database_url,
            database_engine,
            log_filter,
            log_format,
            password_hasher,
            cache_backend,
            static_storage,
            api_docs,
            service_host,
            service_port,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {} (debug: {})", self.environment, self.debug);
        tracing::info!("  Secret key: <redacted, {} bytes>", self.secret_key.len());
        tracing::info!("  Database: {:?} at {}", self.database_engine, self.database_url);
        tracing::info!("  Password hasher: {:?}", self.password_hasher);
        tracing::info!(
            "  Cache backend: {}",
            match &self.cache_backend {
                CacheBackend::LocalMemory => "local memory",
                CacheBackend::Redis(url) => url.as_str(),
            }
        );
        tracing::info!("  Static storage: {:?}", self.static_storage);
        tracing::info!("  API docs: {}", if self.api_docs { "enabled" } else { "disabled" });
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr<Err = anyhow::Error>,
{
    match lookup(key) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value", key)),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).map(|v| v.to_ascii_lowercase());
    match value.as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => bail!("{} must be a boolean, got '{}'", key, other),
    }
}
