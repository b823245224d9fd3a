//! Test logging for every crate in the workspace.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Crates whose spans and events tests care about.
const WORKSPACE_TARGETS: &[&str] = &["president", "president_simulator"];

/// Used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "error,president=warn,president_simulator=warn";

/// Turn a `TEST_LOG` value into filter directives.
///
/// A bare level (`TEST_LOG=debug`) applies to the workspace crates only and
/// keeps dependencies at `error`. Anything else is taken as full directives.
pub fn test_log_directives(raw: &str) -> String {
    let raw = raw.trim();
    let bare_level = matches!(
        raw.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    );
    if !bare_level {
        return raw.to_string();
    }
    std::iter::once("error".to_string())
        .chain(WORKSPACE_TARGETS.iter().map(|t| format!("{t}={raw}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install a test-writer subscriber once per process.
///
/// ```bash
/// TEST_LOG=debug cargo test -p president -- table
/// TEST_LOG="president::players=trace" cargo test -p president --test remote_session
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let directives = match std::env::var("TEST_LOG") {
            Ok(raw) => test_log_directives(&raw),
            Err(_) => std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string()),
        };

        fmt()
            .with_env_filter(EnvFilter::new(directives))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
