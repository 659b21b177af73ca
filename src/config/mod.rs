//! Configuration module for Seatbook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SeatbookPaths;
pub use settings::Settings;
