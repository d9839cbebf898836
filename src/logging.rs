//! Log output for sketches.

use tracing_subscriber::EnvFilter;

/// Default directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,gpui_sketchkit=debug";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `filter`.
///
/// Panics if a global subscriber is already installed; use [`try_init`] when
/// that can happen.
pub fn init(filter: &str) {
    tracing_subscriber::fmt().with_env_filter(env_filter(filter)).init();
}

/// Like [`init`] but returns `false` instead of panicking when a subscriber
/// is already installed.
pub fn try_init(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        .try_init()
        .is_ok()
}

fn env_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported() {
        let _ = try_init(DEFAULT_FILTER);
        assert!(!try_init(DEFAULT_FILTER));
    }
}
