//! Markup parsing utilities for Lectern content.
//!
//! This crate provides the generic, document-type-agnostic stages of the
//! compiler. Domain parsers in `lectern-compiler` compose them with
//! type-specific validation.
//!
//! # Modules
//!
//! - [`frontmatter`]: YAML frontmatter extraction
//! - [`sections`]: Depth-parameterized section splitting
//! - [`fields`]: `key:: value` field extraction with multiline continuations
//! - [`wikilink`]: `[[path|display]]` parsing and resolution
//!
//! # Example
//!
//! ```rust
//! use lectern_content::{extract_frontmatter, split_sections, SectionSpec};
//! use lectern_core::Diagnostics;
//!
//! let content = "---\nid: x\n---\n## Lens: Intro\nsource:: [[../Lenses/intro]]\n";
//! let fm = extract_frontmatter(content).unwrap();
//!
//! let spec = SectionSpec::new(2, &["lens", "test"]).with_known_fields(&["source", "optional"]);
//! let mut diagnostics = Diagnostics::new();
//! let sections = split_sections(fm.body(), fm.body_line(), &spec, "LO/a.md", &mut diagnostics);
//!
//! assert_eq!(sections.len(), 1);
//! assert_eq!(sections[0].fields.get("source"), Some("[[../Lenses/intro]]"));
//! assert!(diagnostics.is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod fields;
pub mod frontmatter;
pub mod sections;
pub mod wikilink;

pub use fields::{Fields, extract_fields};
pub use frontmatter::{FrontmatterError, FrontmatterResult, extract_frontmatter};
pub use sections::{Section, SectionSpec, heading_depth, split_sections};
pub use wikilink::{
    WikilinkError, WikilinkReference, parse_wikilink, resolve_reference, resolve_wikilink,
};
