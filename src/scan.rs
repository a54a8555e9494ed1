//! Scanning: run every compiled pattern over one text unit.
//!
//! The scanner collects raw candidates only. Matches of *different* names may
//! overlap here; [`crate::resolve`] picks the non-overlapping subset.
//!
//! Output order is discovery order: entity order in the table, then the
//! entity's names (canonical name, aliases, reversed person forms), then
//! position within the text.

use crate::merge::MergedTable;
use crate::pattern::PatternSet;
use hoverscope_core::Category;
use serde::{Deserialize, Serialize};

/// One candidate occurrence of an entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatch {
    /// Byte offset (start, inclusive)
    pub start: usize,
    /// Byte offset (end, exclusive)
    pub end: usize,
    /// Matched text, exactly as it appears in the input
    pub text: String,
    /// Identifier of the matched entity
    pub entity_id: String,
    /// Category of the matched entity
    pub category: Category,
}

impl RawMatch {
    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the match is empty (never true for scanner output).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two matches share at least one byte.
    #[must_use]
    pub fn overlaps(&self, other: &RawMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Find every occurrence of every entity name in `text`.
///
/// Total: an empty table or empty text yields no matches. Entities with no
/// compiled patterns in `patterns` are skipped.
#[must_use]
pub fn scan(text: &str, table: &MergedTable, patterns: &PatternSet) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    if text.is_empty() {
        return matches;
    }

    for record in table.iter() {
        for pattern in patterns.for_entity(&record.id) {
            for range in pattern.find_all(text) {
                if range.is_empty() {
                    continue;
                }
                matches.push(RawMatch {
                    start: range.start,
                    end: range.end,
                    text: text[range].to_string(),
                    entity_id: record.id.clone(),
                    category: record.category,
                });
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::merge::merge;
    use serde_json::json;

    fn table() -> (MergedTable, PatternSet) {
        let instruments = Catalog::new(Category::Instrument)
            .with_entry(
                "hst",
                json!({"name": "Hubble Space Telescope", "aliases": ["HST", "Hubble", ""]}),
            )
            .with_entry("euclid", json!({"name": "Euclid"}));
        let persons = Catalog::new(Category::Person)
            .with_entry("doe", json!({"name": "Jane A. Doe"}));
        let table = merge([Some(&instruments), Some(&persons)]).unwrap();
        let patterns = PatternSet::compile(&table);
        (table, patterns)
    }

    #[test]
    fn overlapping_names_are_all_reported() {
        let (table, patterns) = table();
        let text = "the Hubble Space Telescope observed";
        let matches = scan(text, &table, &patterns);
        let found: Vec<_> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(found, vec!["Hubble Space Telescope", "Hubble"]);
        assert!(matches[0].overlaps(&matches[1]));
    }

    #[test]
    fn discovery_order_follows_table_then_names() {
        let (table, patterns) = table();
        let text = "Euclid and HST and Hubble";
        let ids: Vec<_> = scan(text, &table, &patterns)
            .into_iter()
            .map(|m| (m.entity_id, m.text))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("hst".to_string(), "HST".to_string()),
                ("hst".to_string(), "Hubble".to_string()),
                ("euclid".to_string(), "Euclid".to_string()),
            ]
        );
    }

    #[test]
    fn reversed_person_form_is_found() {
        let (table, patterns) = table();
        let matches = scan("Doe, J. A. discussed Euclid", &table, &patterns);
        let person: Vec<_> = matches
            .iter()
            .filter(|m| m.category == Category::Person)
            .collect();
        assert_eq!(person.len(), 1);
        assert_eq!(person[0].text, "Doe, J. A.");
        assert_eq!((person[0].start, person[0].end), (0, 10));
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let (table, patterns) = table();
        assert!(scan("", &table, &patterns).is_empty());
        let empty = MergedTable::empty();
        assert!(scan("Hubble", &empty, &PatternSet::compile(&empty)).is_empty());
    }

    #[test]
    fn offsets_are_byte_offsets() {
        let (table, patterns) = table();
        let text = "café Euclid";
        let m = &scan(text, &table, &patterns)[0];
        assert_eq!(&text[m.start..m.end], "Euclid");
        assert_eq!(m.start, 6);
    }
}
