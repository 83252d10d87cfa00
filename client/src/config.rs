//! Shell configuration resolved at build time.
//!
//! WASM has no process environment, so values come from `option_env!` when
//! the bundle is compiled. Unset values fall back to the defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_ROUTER_BASE: &str = "/";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_ROLE_KEY: &str = "role";

/// Error returned by [`ShellConfig::from_values`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown CLINIC_LOG_LEVEL: {0}")]
    LogLevel(String),
    #[error("CLINIC_ROUTER_BASE must start with '/': {0}")]
    RouterBase(String),
}

/// Storage key names for the session flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub role: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { token: DEFAULT_TOKEN_KEY.to_owned(), role: DEFAULT_ROLE_KEY.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Path prefix the app is served under. Always starts with `/`, never ends with one
    /// unless it is exactly `/`.
    pub router_base: String,
    pub log_level: log::Level,
    pub storage_keys: StorageKeys,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            router_base: DEFAULT_ROUTER_BASE.to_owned(),
            log_level: DEFAULT_LOG_LEVEL,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl ShellConfig {
    /// Build config from the variables captured when the crate was compiled.
    ///
    /// Optional:
    /// - `CLINIC_ROUTER_BASE`: default `/`
    /// - `CLINIC_LOG_LEVEL`: `error`, `warn`, `info` (default), `debug`, `trace`
    ///
    /// # Errors
    ///
    /// Returns an error if either variable holds an unusable value.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("CLINIC_ROUTER_BASE"), option_env!("CLINIC_LOG_LEVEL"))
    }

    /// Build config from raw optional values.
    ///
    /// # Errors
    ///
    /// Returns an error if the base does not start with `/` or the log level
    /// is not recognised.
    pub fn from_values(
        router_base: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let router_base = parse_router_base(router_base)?;
        let log_level = parse_log_level(log_level)?;
        Ok(Self { router_base, log_level, storage_keys: StorageKeys::default() })
    }
}

fn parse_router_base(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ROUTER_BASE);
    if !raw.starts_with('/') {
        return Err(ConfigError::RouterBase(raw.to_owned()));
    }
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() { Ok("/".to_owned()) } else { Ok(trimmed.to_owned()) }
}

fn parse_log_level(raw: Option<&str>) -> Result<log::Level, ConfigError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_LOG_LEVEL),
        Some(value) => {
            value.parse::<log::Level>().map_err(|_| ConfigError::LogLevel(value.to_owned()))
        }
    }
}
