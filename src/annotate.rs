//! Annotation building: splice resolved matches back into the text.
//!
//! ```text
//! text:      "the Hubble Space Telescope and Euclid"
//! resolved:       [4 ───────────────── 26]     [31 ─ 37]
//!
//! segments:  Text("the ")
//!            Entity("Hubble Space Telescope", hst)
//!            Text(" and ")
//!            Entity("Euclid", euclid)
//! ```
//!
//! Concatenating the segment texts always reproduces the input byte for byte.
//! The builder takes entity text from the input itself, and skips any match
//! that is out of order, out of bounds, or not on a character boundary.

use crate::scan::RawMatch;
use hoverscope_core::Category;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A literal run of text or a reference to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Unmatched text, kept verbatim.
    Text {
        /// Byte offset (start, inclusive)
        start: usize,
        /// Byte offset (end, exclusive)
        end: usize,
        /// The literal text
        text: String,
    },
    /// A matched entity name.
    Entity {
        /// Byte offset (start, inclusive)
        start: usize,
        /// Byte offset (end, exclusive)
        end: usize,
        /// The matched text as it appears in the input
        text: String,
        /// Identifier of the entity
        entity_id: String,
        /// Category of the entity
        category: Category,
    },
}

impl Segment {
    /// Text content of the segment.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Segment::Text { text, .. } | Segment::Entity { text, .. } => text,
        }
    }

    /// Byte range in the original text unit.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        match self {
            Segment::Text { start, end, .. } | Segment::Entity { start, end, .. } => *start..*end,
        }
    }

    /// Entity identifier for entity segments.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Segment::Entity { entity_id, .. } => Some(entity_id),
            Segment::Text { .. } => None,
        }
    }

    /// Whether this is an entity reference.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, Segment::Entity { .. })
    }
}

/// Build the segment sequence for `text` from resolved matches.
#[must_use]
pub fn build(text: &str, resolved: &[RawMatch]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(resolved.len() * 2 + 1);
    let mut cursor = 0;

    for m in resolved {
        let valid = m.start >= cursor
            && m.start < m.end
            && m.end <= text.len()
            && text.is_char_boundary(m.start)
            && text.is_char_boundary(m.end);
        if !valid {
            log::debug!(
                "[annotate] Dropping match {}..{} for '{}' (cursor at {})",
                m.start,
                m.end,
                m.entity_id,
                cursor
            );
            continue;
        }

        if m.start > cursor {
            segments.push(literal(text, cursor, m.start));
        }
        segments.push(Segment::Entity {
            start: m.start,
            end: m.end,
            text: text[m.start..m.end].to_string(),
            entity_id: m.entity_id.clone(),
            category: m.category,
        });
        cursor = m.end;
    }

    if cursor < text.len() {
        segments.push(literal(text, cursor, text.len()));
    }
    segments
}

fn literal(text: &str, start: usize, end: usize) -> Segment {
    Segment::Text {
        start,
        end,
        text: text[start..end].to_string(),
    }
}

/// Concatenate segment texts.
#[must_use]
pub fn reconstruct(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// The annotated form of one text unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Ordered segments covering the whole text unit.
    pub segments: Vec<Segment>,
}

impl Annotation {
    /// Number of entity references.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_entity()).count()
    }

    /// Entity segments only, in text order.
    pub fn entities(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_entity())
    }

    /// The original text unit.
    #[must_use]
    pub fn reconstruct(&self) -> String {
        reconstruct(&self.segments)
    }
}
