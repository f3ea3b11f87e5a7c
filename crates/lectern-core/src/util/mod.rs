//! Utility modules for path handling and ID checks.
//!
//! # Modules
//!
//! - [`ids`]: Content ID validation and slug normalization
//! - [`paths`]: Slash-separated relative path arithmetic

pub mod ids;
pub mod paths;
