//! Configuration management for the rally-rating service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and the default engine parameters.

pub mod app;
pub mod live;
pub mod update;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use live::LiveParams;
pub use update::UpdateParams;
