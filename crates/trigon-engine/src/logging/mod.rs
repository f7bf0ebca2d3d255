//! Logging setup.
//!
//! Centralizes logger initialization. Library code only uses the `log` facade;
//! the `env_logger` backend is installed here.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
