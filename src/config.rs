//! Runtime configuration
//!
//! Every setting resolves in the same order: explicit command-line value,
//! then environment variable, then built-in default.

use std::str::FromStr;
use std::time::Duration;

/// Desktop Chrome identity; many shops serve reduced markup to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/131.0.0.0 Safari/537.36";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
/// Product pages rarely exceed a few hundred KiB; anything past this is refused.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub const HOST_ENV: &str = "PRODUCT_PARSER_HOST";
pub const PORT_ENV: &str = "PORT";
pub const TIMEOUT_ENV: &str = "PRODUCT_PARSER_TIMEOUT_SECS";
pub const USER_AGENT_ENV: &str = "PRODUCT_PARSER_USER_AGENT";
pub const MAX_REDIRECTS_ENV: &str = "PRODUCT_PARSER_MAX_REDIRECTS";
pub const MAX_BODY_BYTES_ENV: &str = "PRODUCT_PARSER_MAX_BODY_BYTES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Bound on the whole request, connect through body
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
    /// Largest response body read from a shop, in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_redirects: Option<usize>,
    pub max_body_bytes: Option<usize>,
}

impl Config {
    /// Resolve each setting from `overrides`, the process environment, or the default
    pub fn resolve(overrides: Overrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with an injectable environment lookup
    pub fn resolve_with(overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let host = overrides
            .host
            .or_else(|| env(HOST_ENV).filter(|h| !h.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = overrides
            .port
            .unwrap_or_else(|| parse_env(&env, PORT_ENV, DEFAULT_PORT));

        let timeout_secs = overrides
            .timeout_secs
            .unwrap_or_else(|| parse_env(&env, TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS));

        let user_agent = overrides
            .user_agent
            .or_else(|| env(USER_AGENT_ENV).filter(|ua| !ua.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let max_redirects = overrides
            .max_redirects
            .unwrap_or_else(|| parse_env(&env, MAX_REDIRECTS_ENV, DEFAULT_MAX_REDIRECTS));

        let max_body_bytes = overrides
            .max_body_bytes
            .unwrap_or_else(|| parse_env(&env, MAX_BODY_BYTES_ENV, DEFAULT_MAX_BODY_BYTES));

        Self {
            host,
            port,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
            max_redirects,
            max_body_bytes,
        }
    }
}

fn parse_env<T: FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match env(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring invalid environment value");
                default
            }
        },
        None => default,
    }
}
