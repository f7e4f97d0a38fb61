//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,question=debug,math_dungeon=debug,tower_http=info,axum=info").
//!   An unparsable value falls back to `DEFAULT_FILTER`.
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets are included in the output: `question` covers per-question selection,
//! `math_dungeon` covers startup, config and sockets.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,question=debug,math_dungeon=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Anything other than "json" (case-insensitive) is pretty.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Filter from a LOG_LEVEL value, or `DEFAULT_FILTER` when unset or invalid.
pub fn env_filter(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = std::env::var("LOG_FORMAT").ok();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level.as_deref()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // JSON and pretty are different layer types; pick one and init directly.
    match LogFormat::from_env_value(format.as_deref()) {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses_and_names_our_targets() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        for target in ["question=debug", "math_dungeon=debug"] {
            assert!(DEFAULT_FILTER.split(',').any(|d| d == target), "{target}");
        }
    }

    #[test]
    fn invalid_level_falls_back_to_default() {
        let fallback = env_filter(Some("question=notalevel")).to_string();
        assert_eq!(fallback, EnvFilter::new(DEFAULT_FILTER).to_string());
        assert_eq!(env_filter(None).to_string(), fallback);
        assert_ne!(env_filter(Some("warn")).to_string(), fallback);
    }

    #[test]
    fn format_selection() {
        assert_eq!(LogFormat::from_env_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Pretty);
    }
}
