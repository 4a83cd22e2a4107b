//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (depth limit, resolver timeouts)
//! - The allow-list store and its process-wide instance
//! - CLI option types and parsing

mod allow_list;
mod constants;
mod types;

// Re-export public API
pub use allow_list::{
    global_config, load_allow_list, merge_global_config, reset_global_config, AllowListConfig,
    PartialAllowList,
};
pub use constants::*;
pub use types::{Command, Config, LogFormat, LogLevel};
