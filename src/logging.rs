use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG` (default
/// `info`). Does nothing if a subscriber is already set.
///
/// For native consumers driving a [`Page`](crate::page::Page) over their own
/// host. The wasm entry points use `init_browser_tracing` instead.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}

/// Routes panics and `tracing` output to the browser console. Safe to call
/// more than once.
#[cfg(feature = "web")]
pub fn init_browser_tracing() {
    console_error_panic_hook::set_once();
    let _ = tracing_wasm::try_set_as_global_default();
}
