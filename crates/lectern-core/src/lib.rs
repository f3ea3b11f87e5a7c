//! Lectern Core — shared types, diagnostics, errors, and utilities.
//!
//! This crate provides the foundational types used across all Lectern crates.
//! It has no internal Lectern dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`diagnostics`]: Content diagnostics (`ContentError`) and their accumulator
//! - [`layout`]: Content-type buckets and the directory layout that maps paths to them
//! - [`util`]: Path and ID utilities

#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod util;

// Re-export key types at crate root for convenience
pub use diagnostics::{ContentError, Diagnostics, Severity};
pub use error::{Error, Result};
pub use layout::{ContentKind, ContentLayout};

// Convenience re-exports from util
pub use util::ids::{is_valid_content_id, normalize_slug, slug_from_path};
pub use util::paths::{file_stem, normalize_path, parent_dir, resolve_relative};
