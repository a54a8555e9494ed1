//! Terminal output helpers.

use hoverscope::{Annotation, Segment};
use hoverscope_core::Category;
use is_terminal::IsTerminal;
use std::io;

/// Colorize text with ANSI escape codes (only if stdout is a terminal)
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Color code for an entity category
pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Instrument => "1;36",
        Category::Survey => "1;32",
        Category::Simulation => "1;35",
        Category::Model => "1;33",
        Category::Person => "1;34",
    }
}

/// The annotated text with entity spans highlighted.
pub fn highlighted(annotation: &Annotation) -> String {
    annotation
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { text, .. } => text.clone(),
            Segment::Entity { text, category, .. } => color(category_color(*category), text),
        })
        .collect()
}

/// `[text](id)` markup for every entity span.
pub fn markup(annotation: &Annotation) -> String {
    annotation
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { text, .. } => text.clone(),
            Segment::Entity {
                text, entity_id, ..
            } => format!("[{text}]({entity_id})"),
        })
        .collect()
}
