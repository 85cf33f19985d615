// Tracing subscriber setup.
// Honors RUST_LOG when set; otherwise the debug flag picks the filter.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber once. A subscriber already installed by
/// the embedding application wins, so this is safe to call repeatedly.
pub(crate) fn init(debug: bool) {
    let default_filter = if debug {
        "secretserver=debug"
    } else {
        "secretserver=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
