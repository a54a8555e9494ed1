//! Field rendering: one entity record → ordered (label, value) pairs.
//!
//! ```text
//! profile: [type, status]        record: { type: "X", extra: "Z", status: "Y",
//!                                          description: "..." }
//!
//!   1. profile fields, in profile order, if non-empty   → Type, Status
//!   2. remaining non-reserved fields, in record order   → Extra
//!   3. description, separately, always last
//! ```
//!
//! Reserved fields (`id`, `name`, `aliases`, `description`, `order_key`) never
//! appear as generic pairs.

use hoverscope_core::{is_reserved_field, EntityRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One rendered label/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Human-readable label derived from the field name.
    pub label: String,
    /// Trimmed textual value.
    pub value: String,
}

impl Field {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Presentation-ready form of one entity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRecord {
    /// Canonical name, used as the heading.
    pub name: String,
    /// Ordered label/value pairs.
    pub fields: Vec<Field>,
    /// Description block, shown after every field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RenderedRecord {
    /// Pairs as `(label, value)` tuples.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
            .collect()
    }
}

/// Render `record` with the given display-order profile.
#[must_use]
pub fn render(record: &EntityRecord, profile: &[String]) -> RenderedRecord {
    let mut fields = Vec::with_capacity(record.fields.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for name in profile {
        if is_reserved_field(name) || !seen.insert(name.as_str()) {
            continue;
        }
        if let Some(value) = record.field(name).and_then(field_value) {
            fields.push(Field::new(field_label(name), value));
        }
    }

    for (name, value) in &record.fields {
        if is_reserved_field(name) || seen.contains(name.as_str()) {
            continue;
        }
        if let Some(value) = field_value(value) {
            fields.push(Field::new(field_label(name), value));
        }
    }

    let description = record
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    RenderedRecord {
        name: record.name.clone(),
        fields,
        description,
    }
}

/// Derive a display label from a field name.
///
/// `_` and `-` become spaces, and every letter or digit that follows a
/// non-alphanumeric character (or starts the name) is upper-cased:
/// `launch_date` → `Launch Date`, `o'brien` → `O'Brien`.
#[must_use]
pub fn field_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        match c {
            '_' | '-' => {
                label.push(' ');
                at_word_start = true;
            }
            c if c.is_whitespace() => {
                label.push(c);
                at_word_start = true;
            }
            c if at_word_start && c.is_alphanumeric() => {
                label.extend(c.to_uppercase());
                at_word_start = false;
            }
            c => {
                label.push(c);
                at_word_start = !c.is_alphanumeric();
            }
        }
    }
    label
}

/// Textual form of a field value, or `None` when there is nothing to show.
///
/// Null, blank strings and empty arrays are empty. Numbers and booleans are
/// always shown, `0` and `false` included.
#[must_use]
pub fn field_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(field_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
