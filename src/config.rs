//! Engine configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any link
//! operation runs.
//!
//! ## Variables
//!
//! - `CODE_LENGTH` - short code length in characters (default: 6, range 4-16)
//! - `CODE_STRATEGY` - `random` or `sequential` (default: `random`)
//! - `MAX_CREATE_ATTEMPTS` - collision retry bound in `create` (default: 5)
//! - `EXPIRY_STRATEGY` - `lazy` (check on read only) or `sweep` (background
//!   pass as well; default: `lazy`)
//! - `SWEEP_INTERVAL_SECONDS` - period of the background sweep (default: 60)
//! - `RUST_LOG` - log level filter (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, SequentialCodeGenerator};

/// How candidate codes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStrategy {
    /// Unguessable codes from a CSPRNG. The default.
    Random,
    /// Dense, enumerable codes from an atomic counter.
    Sequential,
}

/// How expired rows are garbage-collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStrategy {
    /// Pull-based: expired rows are purged when a resolve trips over them.
    Lazy,
    /// Push-based: a background sweep additionally removes expired rows
    /// every `period`. Resolve-time checks still apply.
    Sweep { period: Duration },
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub code_length: usize,
    pub allocation: AllocationStrategy,
    pub max_create_attempts: usize,
    pub expiry: ExpiryStrategy,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            code_length: 6,
            allocation: AllocationStrategy::Random,
            max_create_attempts: 5,
            expiry: ExpiryStrategy::Lazy,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error on unknown strategy names and on non-numeric values
    /// for the numeric variables. Out-of-range numeric values are caught by
    /// [`Self::validate`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let code_length = parse_env_var("CODE_LENGTH", defaults.code_length)?;

        let allocation = match env::var("CODE_STRATEGY") {
            Ok(v) if v.eq_ignore_ascii_case("random") => AllocationStrategy::Random,
            Ok(v) if v.eq_ignore_ascii_case("sequential") => AllocationStrategy::Sequential,
            Ok(v) => anyhow::bail!("CODE_STRATEGY must be 'random' or 'sequential', got '{v}'"),
            Err(_) => defaults.allocation,
        };

        let max_create_attempts =
            parse_env_var("MAX_CREATE_ATTEMPTS", defaults.max_create_attempts)?;

        let sweep_period = Duration::from_secs(parse_env_var("SWEEP_INTERVAL_SECONDS", 60)?);

        let expiry = match env::var("EXPIRY_STRATEGY") {
            Ok(v) if v.eq_ignore_ascii_case("lazy") => ExpiryStrategy::Lazy,
            Ok(v) if v.eq_ignore_ascii_case("sweep") => ExpiryStrategy::Sweep {
                period: sweep_period,
            },
            Ok(v) => anyhow::bail!("EXPIRY_STRATEGY must be 'lazy' or 'sweep', got '{v}'"),
            Err(_) => defaults.expiry,
        };

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            code_length,
            allocation,
            max_create_attempts,
            expiry,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code_length` is outside 4..=16
    /// - `max_create_attempts` is outside 1..=64
    /// - the sweep period is zero or longer than a day
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !(4..=16).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between 4 and 16, got {}",
                self.code_length
            );
        }

        if !(1..=64).contains(&self.max_create_attempts) {
            anyhow::bail!(
                "MAX_CREATE_ATTEMPTS must be between 1 and 64, got {}",
                self.max_create_attempts
            );
        }

        if let ExpiryStrategy::Sweep { period } = self.expiry {
            if period.is_zero() || period > Duration::from_secs(86_400) {
                anyhow::bail!(
                    "SWEEP_INTERVAL_SECONDS must be between 1 and 86400, got {}",
                    period.as_secs()
                );
            }
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Builds the code generator selected by [`Config::allocation`].
    pub fn code_generator(&self) -> Arc<dyn CodeGenerator> {
        match self.allocation {
            AllocationStrategy::Random => Arc::new(RandomCodeGenerator::new(self.code_length)),
            AllocationStrategy::Sequential => {
                Arc::new(SequentialCodeGenerator::new(self.code_length))
            }
        }
    }
}

/// Reads a numeric variable, falling back to `default` only when the
/// variable is unset. A set-but-unparsable value is a configuration error,
/// not a silent default.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} must be an integer, got '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Loads `.env` (if present) and returns a validated configuration.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
pub fn load_from_env() -> Result<Config> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

/// Installs a `tracing` subscriber honoring the configured level and format.
///
/// Call once from the embedding application, before the first link
/// operation. Panics if a global subscriber is already set.
pub fn init_tracing(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
