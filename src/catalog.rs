//! Catalogs: one category's entities, as parsed from its source file.
//!
//! A catalog file is a JSON object mapping identifiers to entry objects, with
//! an optional `display_order` pseudo-entry:
//!
//! ```json
//! {
//!   "display_order": ["type", "status"],
//!   "hst": { "name": "Hubble Space Telescope", "aliases": ["HST", "Hubble"], "type": "Space telescope" }
//! }
//! ```
//!
//! Parsing only checks the top-level shape. Entry-level problems (a missing
//! name, a non-object entry) are left for the merger, which skips the entry
//! and keeps the rest of the catalog.

use crate::{Error, Result};
use hoverscope_core::Category;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Key of the profile-override pseudo-entry.
pub const DISPLAY_ORDER_KEY: &str = "display_order";

/// One category's entities plus an optional display-order override.
///
/// Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    category: Category,
    entries: Map<String, Value>,
    display_order: Option<Vec<String>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Map::new(),
            display_order: None,
        }
    }

    /// Add or replace an entry (builder style, for tests and programmatic catalogs).
    #[must_use]
    pub fn with_entry(mut self, id: impl Into<String>, entry: Value) -> Self {
        self.entries.insert(id.into(), entry);
        self
    }

    /// Set the display-order override.
    #[must_use]
    pub fn with_display_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Build a catalog from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `value` is not an object, or if
    /// `display_order` is present but is not an array of strings.
    pub fn from_value(category: Category, value: Value) -> Result<Self> {
        let Value::Object(mut entries) = value else {
            return Err(Error::parse(format!(
                "{category} catalog must be a JSON object"
            )));
        };

        let display_order = match entries.remove(DISPLAY_ORDER_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        other => Err(Error::parse(format!(
                            "{category} display_order must contain strings, found {other}"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(other) => {
                return Err(Error::parse(format!(
                    "{category} display_order must be an array, found {other}"
                )))
            }
        };

        Ok(Self {
            category,
            entries,
            display_order,
        })
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for invalid JSON and [`Error::Parse`] for a
    /// wrongly shaped document.
    pub fn from_json_str(category: Category, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(category, value)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// IO errors, plus everything [`Catalog::from_json_str`] can return.
    pub fn from_path(category: Category, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(category, &json)?;
        log::debug!(
            "[catalog] Read {} {} entries from {}",
            catalog.len(),
            category,
            path.display()
        );
        Ok(catalog)
    }

    /// Category of every entity in this catalog.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Raw entries, in file order, without the `display_order` pseudo-entry.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Display-order override, if this catalog supplies one.
    #[must_use]
    pub fn display_order(&self) -> Option<&[String]> {
        self.display_order.as_deref()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
