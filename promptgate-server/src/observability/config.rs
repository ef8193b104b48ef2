//! Configuration types for logging.

use std::env;
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for structured logging.
    Json,
    /// Human-readable pretty format with colors.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            "compact" => Self::Compact,
            _ => Self::default(),
        })
    }
}

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name attached to startup logs.
    service_name: String,
    /// Log output format.
    log_format: LogFormat,
    /// Log level filter (e.g., "info", "debug,promptgate_core=trace").
    log_filter: String,
    /// Whether to include source location in logs.
    include_location: bool,
    /// Whether to include target in logs.
    include_target: bool,
    /// Whether to include thread names in logs.
    ///
    /// Useful for telling blocked gate workers apart from request handlers.
    include_thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "promptgate".to_string(),
            log_format: LogFormat::default(),
            log_filter: "info".to_string(),
            include_location: false,
            include_target: true,
            include_thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Create a new builder.
    pub fn builder() -> TracingConfigBuilder {
        TracingConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PROMPTGATE_LOG_FORMAT`: "json", "pretty", or "compact"
    /// - `PROMPTGATE_LOG_LEVEL` or `RUST_LOG`: Log filter string
    /// - `PROMPTGATE_LOG_LOCATION`: "true" to include file and line
    /// - `PROMPTGATE_LOG_THREAD_NAMES`: "true" to include thread names
    pub fn from_env() -> Self {
        Self::from_env_or("info")
    }

    /// Like [`from_env`](Self::from_env), with `default_filter` used when
    /// neither filter variable is set.
    pub fn from_env_or(default_filter: &str) -> Self {
        Self::from_lookup(|key| env::var(key).ok(), default_filter)
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        default_filter: &str,
    ) -> Self {
        let flag = |key: &str| {
            lookup(key)
                .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
                .unwrap_or(false)
        };

        let log_format = lookup("PROMPTGATE_LOG_FORMAT")
            .and_then(|s| s.parse::<LogFormat>().ok())
            .unwrap_or_else(|| {
                // Auto-detect: JSON for non-TTY, pretty for TTY
                if is_terminal() {
                    LogFormat::Pretty
                } else {
                    LogFormat::Json
                }
            });

        let log_filter = lookup("PROMPTGATE_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| default_filter.to_string());

        Self {
            service_name: "promptgate".to_string(),
            log_format,
            log_filter,
            include_location: flag("PROMPTGATE_LOG_LOCATION"),
            include_target: true,
            include_thread_names: flag("PROMPTGATE_LOG_THREAD_NAMES"),
        }
    }

    /// Apply a `-v` count. Zero leaves the configured filter alone; two or
    /// more also turns on thread names so blocked gate workers stand out.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        let filter = match verbosity {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.log_filter = filter.to_string();
        if verbosity >= 2 {
            self.include_thread_names = true;
        }
        self
    }

    /// Get the service name.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Get the log format.
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Get the log filter.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Check if source location should be included.
    pub fn include_location(&self) -> bool {
        self.include_location
    }

    /// Check if target should be included.
    pub fn include_target(&self) -> bool {
        self.include_target
    }

    /// Check if thread names should be included.
    pub fn include_thread_names(&self) -> bool {
        self.include_thread_names
    }
}

/// Builder for TracingConfig.
#[derive(Debug, Clone, Default)]
pub struct TracingConfigBuilder {
    service_name: Option<String>,
    log_format: Option<LogFormat>,
    log_filter: Option<String>,
    include_location: Option<bool>,
    include_target: Option<bool>,
    include_thread_names: Option<bool>,
}

impl TracingConfigBuilder {
    /// Set the service name.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Set the log format.
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Set the log filter.
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Include source location in logs.
    pub fn include_location(mut self, include: bool) -> Self {
        self.include_location = Some(include);
        self
    }

    /// Include target in logs.
    pub fn include_target(mut self, include: bool) -> Self {
        self.include_target = Some(include);
        self
    }

    /// Include thread names in logs.
    pub fn include_thread_names(mut self, include: bool) -> Self {
        self.include_thread_names = Some(include);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> TracingConfig {
        let defaults = TracingConfig::default();
        TracingConfig {
            service_name: self.service_name.unwrap_or(defaults.service_name),
            log_format: self.log_format.unwrap_or(defaults.log_format),
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
            include_location: self.include_location.unwrap_or(defaults.include_location),
            include_target: self.include_target.unwrap_or(defaults.include_target),
            include_thread_names: self
                .include_thread_names
                .unwrap_or(defaults.include_thread_names),
        }
    }
}

fn is_terminal() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn log_level_variable_reaches_filter() {
        let config = TracingConfig::from_lookup(
            lookup(&[
                ("PROMPTGATE_LOG_LEVEL", "promptgate_core=debug"),
                ("RUST_LOG", "trace"),
            ]),
            "warn",
        );
        assert_eq!(config.log_filter(), "promptgate_core=debug");
    }

    #[test]
    fn rust_log_is_fallback_filter() {
        let config = TracingConfig::from_lookup(lookup(&[("RUST_LOG", "debug")]), "warn");
        assert_eq!(config.log_filter(), "debug");

        let config = TracingConfig::from_lookup(lookup(&[]), "warn");
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn format_and_flags_from_variables() {
        let config = TracingConfig::from_lookup(
            lookup(&[
                ("PROMPTGATE_LOG_FORMAT", "compact"),
                ("PROMPTGATE_LOG_LOCATION", "true"),
                ("PROMPTGATE_LOG_THREAD_NAMES", "1"),
            ]),
            "info",
        );
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.include_location());
        assert!(config.include_thread_names());
    }

    #[test]
    fn verbosity_overrides_filter() {
        let base = || {
            TracingConfig::from_lookup(lookup(&[("PROMPTGATE_LOG_LEVEL", "error")]), "warn")
        };

        assert_eq!(base().with_verbosity(0).log_filter(), "error");
        assert_eq!(base().with_verbosity(1).log_filter(), "info");

        let debug = base().with_verbosity(2);
        assert_eq!(debug.log_filter(), "debug");
        assert!(debug.include_thread_names());
        assert_eq!(base().with_verbosity(5).log_filter(), "trace");
    }
}
