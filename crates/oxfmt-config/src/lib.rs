//! oxfmt configuration loading
//!
//! Locates an `.oxfmtrc.json` / `.oxfmtrc.jsonc` file for a directory,
//! parses it and memoizes both the resolved path and the parsed document.

pub mod cache;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use cache::Memo;
pub use config::{
    CONFIG_FILE_NAMES, ConfigDocument, ConfigFormat, ConfigLoader, FormatOptions, LoadOptions,
    OverrideEntry, SortImportsOptions, load_config, resolve_config_path,
};
pub use error::{ConfigError, ErrorKind, LoadFailure, Result};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Install a stderr tracing subscriber for the loader's log output
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies, for example
/// `"oxfmt_config=debug"` to see every search step. Logs go to stderr.
/// Fails if a global subscriber is already installed. The library itself
/// never calls this.
pub fn init_tracing(default_filter: &str) -> std::result::Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false),
        )
        .try_init()
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
