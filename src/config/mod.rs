//! Configuration module for savings-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Per-user store locations
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
