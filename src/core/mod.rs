//! Core utilities, configuration, and common functionality

pub mod code;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

// Re-exports for convenience
pub use config::*;
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_admin_configuration};
