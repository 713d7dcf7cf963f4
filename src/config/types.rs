//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through an environment
//! variable, which is how the proxy is usually configured in containers.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    secs_f64_to_duration, DEFAULT_DISPATCH_INTERVAL_SECS, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_QUEUE_TIMEOUT_SECS, DEFAULT_RATE_LIMIT_MAX_CALLS, DEFAULT_RATE_LIMIT_PERIOD_SECS,
    DEFAULT_REFERER, DEFAULT_UPSTREAM_TIMEOUT_SECS, DEFAULT_UPSTREAM_URL, DEFAULT_USER_AGENT,
};
use crate::config::headers::UpstreamHeaders;
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Proxy configuration.
///
/// Parsed once at startup and then passed by reference into every component
/// constructor. Nothing reads configuration from global state after startup.
///
/// # Examples
///
/// ```bash
/// # Defaults: 127.0.0.1:5000, one upstream job every 15 seconds
/// booru_proxy
///
/// # Faster dispatch and a public bind address
/// booru_proxy --host 0.0.0.0 --interval-seconds 2
///
/// # Same thing through the environment
/// BOORU_PROXY_HOST=0.0.0.0 BOORU_PROXY_INTERVAL=2 booru_proxy
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "booru_proxy",
    about = "Serves one image per tag search from a Danbooru-style image board, with rate limiting and a serialized upstream queue."
)]
pub struct Config {
    /// Bind host
    #[arg(long, env = "BOORU_PROXY_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Bind port
    #[arg(long, env = "BOORU_PROXY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable debug logging (overrides --log-level)
    #[arg(long, env = "BOORU_PROXY_DEBUG")]
    pub debug: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, env = "BOORU_PROXY_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, env = "BOORU_PROXY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Idle seconds between two upstream jobs
    #[arg(long, env = "BOORU_PROXY_INTERVAL", default_value_t = DEFAULT_DISPATCH_INTERVAL_SECS)]
    pub interval_seconds: f64,

    /// Seconds a request waits for its queued job before answering 408
    #[arg(long, env = "BOORU_PROXY_QUEUE_TIMEOUT", default_value_t = DEFAULT_QUEUE_TIMEOUT_SECS)]
    pub queue_timeout_seconds: u64,

    /// Per-call upstream timeout in seconds
    #[arg(long, env = "BOORU_PROXY_UPSTREAM_TIMEOUT", default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum admitted /image.jpg requests per window
    #[arg(long, env = "BOORU_PROXY_RATE_LIMIT_MAX_CALLS", default_value_t = DEFAULT_RATE_LIMIT_MAX_CALLS)]
    pub rate_limit_max_calls: usize,

    /// Rate limit window length in seconds
    #[arg(long, env = "BOORU_PROXY_RATE_LIMIT_PERIOD", default_value_t = DEFAULT_RATE_LIMIT_PERIOD_SECS)]
    pub rate_limit_period_seconds: u64,

    /// Upstream image board base URL
    #[arg(long, env = "BOORU_PROXY_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// User-Agent sent to the upstream API
    #[arg(long, env = "BOORU_PROXY_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            interval_seconds: DEFAULT_DISPATCH_INTERVAL_SECS,
            queue_timeout_seconds: DEFAULT_QUEUE_TIMEOUT_SECS,
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            rate_limit_max_calls: DEFAULT_RATE_LIMIT_MAX_CALLS,
            rate_limit_period_seconds: DEFAULT_RATE_LIMIT_PERIOD_SECS,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Checks option values that clap cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be between 1 and 65535".to_string(),
            });
        }
        if secs_f64_to_duration(self.interval_seconds).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "interval_seconds",
                reason: format!(
                    "must be a non-negative number of seconds that fits a duration, got {}",
                    self.interval_seconds
                ),
            });
        }
        if self.queue_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "queue_timeout_seconds",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.rate_limit_max_calls == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit_max_calls",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.rate_limit_period_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit_period_seconds",
                reason: "must be at least 1".to_string(),
            });
        }
        let url = self.upstream_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUpstreamUrl(self.upstream_url.clone()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }
        if reqwest::header::HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "user_agent",
                reason: "must be a valid HTTP header value".to_string(),
            });
        }
        Ok(())
    }

    /// Effective log level, with `--debug` taking precedence.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            self.log_level.clone().into()
        }
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle time after each job. Out-of-range values (rejected by `validate`)
    /// fall back to zero.
    pub fn dispatch_interval(&self) -> Duration {
        secs_f64_to_duration(self.interval_seconds).unwrap_or(Duration::ZERO)
    }

    pub fn queue_timeout(&self) -> Duration {
        Duration::from_secs(self.queue_timeout_seconds)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn rate_limit_period(&self) -> Duration {
        Duration::from_secs(self.rate_limit_period_seconds)
    }

    /// Upstream base URL without a trailing slash
    pub fn upstream_base(&self) -> &str {
        self.upstream_url.trim().trim_end_matches('/')
    }

    pub fn upstream_headers(&self) -> UpstreamHeaders {
        UpstreamHeaders::new(self.user_agent.clone(), DEFAULT_REFERER)
    }
}
