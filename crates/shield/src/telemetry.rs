use tracing_subscriber::{fmt, EnvFilter};

/// Install a JSON log subscriber filtered by `RUST_LOG` (default `info`).
///
/// Hosts that already configure `tracing` should skip this. Calling it when
/// a global subscriber exists is a no-op; returns whether this call
/// installed one.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .is_ok()
}
