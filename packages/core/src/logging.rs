use tracing_subscriber::{fmt, EnvFilter};

/// Directives used when `RUST_LOG` is unset. sqlx logs every statement at
/// info, so it is held back to warnings.
pub const DEFAULT_LOG_DIRECTIVES: &str = "info,sqlx=warn";

/// Build the log filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_DIRECTIVES`].
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Install the global tracing subscriber. Call once, before the first log line.
pub fn init_logging() {
    fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .compact()
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "holiday-resolver logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        let filter = EnvFilter::new(DEFAULT_LOG_DIRECTIVES);
        assert!(filter.to_string().contains("sqlx=warn"));
    }
}
