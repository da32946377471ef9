// Bootstrap for the demo binary: .env overrides, log output and panic logging.

use tracing_subscriber::EnvFilter;

// Demo events at info; dependencies only when they warn.
const DEFAULT_LOG_FILTER: &str = "orbit_duel=info,warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

fn log_format(raw: Option<&str>) -> LogFormat {
    match raw {
        Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Compact,
    }
}

pub fn init_runtime() {
    // Read before the subscriber exists, logged once it does.
    let dotenv = dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_format(std::env::var("LOG_FORMAT").ok().as_deref()) {
        LogFormat::Json => builder.json().flatten_event(true).init(),
        LogFormat::Compact => builder.compact().with_target(false).init(),
    }

    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "demo aborted");
    }));
}
