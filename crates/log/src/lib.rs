//! # telephone-log
//!
//! Logging bootstrap for the `telephone` binary. Library crates only emit
//! `tracing` events; this crate decides where they go.
//!
//! ```no_run
//! use telephone_log::{Config, LoggerBuilder};
//!
//! LoggerBuilder::from_config(Config::from_env()).build()?;
//! tracing::info!("ready");
//! # Ok::<(), telephone_log::LogError>(())
//! ```

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, Format};
pub use error::{LogError, LogResult};

/// Initialize from the environment (`TELEPHONE_LOG`, `TELEPHONE_LOG_FORMAT`).
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<()> {
    init_with(Config::from_env())
}

/// Initialize from an explicit configuration.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init_with(config: Config) -> LogResult<()> {
    LoggerBuilder::from_config(config).build()
}
