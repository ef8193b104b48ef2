//! Logging setup.
//!
//! Logging format is controlled via `PROMPTGATE_LOG_FORMAT`:
//! - `json` - Structured JSON output
//! - `pretty` - Human-readable colored output (default for TTY)
//! - `compact` - Compact single-line format
//!
//! # Example
//!
//! ```ignore
//! use promptgate_server::observability::{TracingConfig, init_tracing};
//!
//! let _guard = init_tracing(TracingConfig::from_env())?;
//! ```

mod config;
mod tracing_setup;

pub use config::{LogFormat, TracingConfig, TracingConfigBuilder};
pub use tracing_setup::{TracingGuard, init_tracing};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.service_name(), "promptgate");
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn config_builder() {
        let config = TracingConfig::builder()
            .service_name("gate-test")
            .log_format(LogFormat::Json)
            .log_filter("debug")
            .include_thread_names(true)
            .build();

        assert_eq!(config.service_name(), "gate-test");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.log_filter(), "debug");
        assert!(config.include_thread_names());
        assert!(config.include_target());
    }

    #[test]
    fn log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("other".parse::<LogFormat>().unwrap(), LogFormat::Compact);
    }
}
