//! Configuration module for gnucash-reports
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::{EmailSettings, Settings};
