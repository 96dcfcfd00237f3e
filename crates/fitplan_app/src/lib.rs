//! Request boundary and command-line plumbing for fitplan.

pub mod error;
pub mod services;

pub use error::{AppError, AppResult};
pub use services::{FitnessService, MAX_UPLOAD_BYTES, check_upload_size, read_upload};

/// The single local user the command-line driver acts as.
pub const LOCAL_USER: fitplan_core::UserId = 1;

/// Resolve the log filter from `FITPLAN_LOG_LEVEL`, then `RUST_LOG`, default `info`.
pub fn log_filter_from<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get("FITPLAN_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

/// Build an `EnvFilter`, falling back to `info` when the directive is invalid.
pub fn env_filter(directive: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_new(directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_prefers_crate_variable() {
        let get = |k: &str| match k {
            "FITPLAN_LOG_LEVEL" => Some("debug".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            _ => None,
        };
        assert_eq!(log_filter_from(get), "debug");
    }

    #[test]
    fn log_filter_falls_back_to_rust_log_then_info() {
        let get = |k: &str| (k == "RUST_LOG").then(|| "trace".to_string());
        assert_eq!(log_filter_from(get), "trace");
        assert_eq!(log_filter_from(|_| None), "info");
    }

    #[test]
    fn invalid_filter_falls_back() {
        let filter = env_filter("invalid[[[filter");
        assert!(!format!("{filter:?}").is_empty());
    }
}
