use tracing_subscriber::EnvFilter;

/// Initializes tracing output for host processes embedding the engine.
///
/// Filtering is controlled with `RUST_LOG`; defaults to `info` when unset.
/// Safe to call once per process; the host may install its own subscriber
/// instead and skip this entirely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
