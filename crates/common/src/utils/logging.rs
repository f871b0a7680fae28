use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sea_orm=warn,sqlx=warn";

/// Human or machine-oriented log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Compact,
    Json,
}

/// Initialize the tracing subscriber.
/// - `RUST_LOG` wins when set, then `fallback_filter`, then `DEFAULT_FILTER`
/// - Writes to stdout so container runtimes capture it
/// - Safe to call more than once; later calls are no-ops
pub fn init_logging(format: Format, fallback_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter.unwrap_or(DEFAULT_FILTER)));
    let builder = fmt().with_env_filter(env_filter).with_target(false).with_writer(io::stdout);
    let _ = match format {
        Format::Compact => builder.compact().try_init(),
        Format::Json => builder.json().try_init(),
    };
}
