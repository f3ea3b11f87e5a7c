//! Course documents.
//!
//! ```markdown
//! ---
//! slug: default
//! title: AI Safety Fundamentals
//! ---
//!
//! # Module: [[../modules/introduction]]
//!
//! # Meeting: 1
//!
//! # Module: [[../modules/feedback-loops]]
//! optional:: true
//! ```

use lectern_content::{Section, SectionSpec, split_sections};
use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics};

use super::{ParseOutcome, optional_flag, read_header, reference, required_header};
use crate::model::{Course, ProgressionItem};

const SECTION_TYPES: &[&str] = &["module", "meeting"];
const KNOWN_FIELDS: &[&str] = &["optional"];

/// Parse a course document.
///
/// `module_slug` maps a resolved module path to its slug; references it
/// cannot map are reported and skipped.
pub fn parse_course<F>(text: &str, file: &str, layout: &ContentLayout, module_slug: F) -> ParseOutcome<Course>
where
    F: Fn(&str) -> Option<String>,
{
    let mut diagnostics = Diagnostics::new();
    let Some(header) = read_header(text, file, &mut diagnostics) else {
        return ParseOutcome::new(None, diagnostics);
    };
    let slug = required_header(&header, "slug", file, &mut diagnostics);
    let title = required_header(&header, "title", file, &mut diagnostics);

    let spec = SectionSpec::new(1, SECTION_TYPES).with_known_fields(KNOWN_FIELDS);
    let progression: Vec<ProgressionItem> = split_sections(header.body(), header.body_line(), &spec, file, &mut diagnostics)
        .iter()
        .filter(|s| s.recognized)
        .filter_map(|s| parse_item(s, file, layout, &module_slug, &mut diagnostics))
        .collect();

    let course = match (slug, title) {
        (Some(slug), Some(title)) => Some(Course {
            slug,
            title,
            progression,
        }),
        _ => None,
    };
    ParseOutcome::new(course, diagnostics)
}

fn parse_item<F>(
    section: &Section,
    file: &str,
    layout: &ContentLayout,
    module_slug: &F,
    diagnostics: &mut Diagnostics,
) -> Option<ProgressionItem>
where
    F: Fn(&str) -> Option<String>,
{
    if section.is("meeting") {
        return match section.title.trim().parse::<u32>() {
            Ok(number) if number > 0 => Some(ProgressionItem::Meeting { number }),
            _ => {
                diagnostics.push(
                    ContentError::error(file, format!("Invalid meeting number '{}'", section.title))
                        .at_line(section.line)
                        .with_suggestion("Write the meeting as '# Meeting: 1' with a positive number"),
                );
                None
            }
        };
    }

    let optional = optional_flag(&section.fields, section.line, file, diagnostics);
    let path = reference(&section.title, ContentKind::Module, section.line, file, layout, diagnostics)?;
    match module_slug(&path) {
        Some(slug) => Some(ProgressionItem::Module { slug, optional }),
        None => {
            diagnostics.push(
                ContentError::error(file, format!("Module '{path}' not found"))
                    .at_line(section.line)
                    .with_suggestion("Check the link path and that the module file exists"),
            );
            None
        }
    }
}
