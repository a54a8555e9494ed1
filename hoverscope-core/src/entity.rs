//! Entity records and their category/profile tags.
//!
//! # Categories and Profiles
//!
//! Every catalog holds exactly one category of entity. Categories are grouped
//! into display-order profiles, which decide how a record's fields are ordered
//! when it is rendered:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Category          ProfileKey        Default field order     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  instrument  ──┐                                             │
//! │                ├─► telescope   type, launch_date, ...        │
//! │  survey      ──┘                                             │
//! │  simulation  ────► simulation  type, volume, ...             │
//! │  model       ────► SAM         type, included_physics, ...   │
//! │  person      ────► person      (record key order)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog may override its profile's order with a `display_order` list;
//! the defaults above apply otherwise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Reserved Fields
// ============================================================================

/// Identifier field name.
pub const ID_FIELD: &str = "id";
/// Canonical name field name.
pub const NAME_FIELD: &str = "name";
/// Alias list field name.
pub const ALIASES_FIELD: &str = "aliases";
/// Free-text description field name.
pub const DESCRIPTION_FIELD: &str = "description";
/// Profile key field name (stamped by the merger).
pub const ORDER_KEY_FIELD: &str = "order_key";

/// Fields that are never rendered as generic label/value pairs.
pub const RESERVED_FIELDS: &[&str] = &[
    ID_FIELD,
    NAME_FIELD,
    ALIASES_FIELD,
    DESCRIPTION_FIELD,
    ORDER_KEY_FIELD,
];

/// Returns true if `field` is one of [`RESERVED_FIELDS`].
#[must_use]
pub fn is_reserved_field(field: &str) -> bool {
    RESERVED_FIELDS.contains(&field)
}

// ============================================================================
// Category
// ============================================================================

/// Kind of named entity. Closed set: one catalog file per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Telescopes, satellites and other observing instruments.
    Instrument,
    /// Sky surveys.
    Survey,
    /// Cosmological simulations.
    Simulation,
    /// Semi-analytic models.
    Model,
    /// People, matched in both "First Last" and "Last, First" order.
    Person,
}

impl Category {
    /// All categories, in catalog precedence order.
    pub const ALL: [Category; 5] = [
        Category::Instrument,
        Category::Survey,
        Category::Simulation,
        Category::Model,
        Category::Person,
    ];

    /// The display-order profile this category renders with.
    #[must_use]
    pub const fn profile_key(&self) -> ProfileKey {
        match self {
            Category::Instrument | Category::Survey => ProfileKey::Telescope,
            Category::Simulation => ProfileKey::Simulation,
            Category::Model => ProfileKey::Sam,
            Category::Person => ProfileKey::Person,
        }
    }

    /// Lowercase name used in catalogs, output and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Instrument => "instrument",
            Category::Survey => "survey",
            Category::Simulation => "simulation",
            Category::Model => "model",
            Category::Person => "person",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parse a category name. Accepts the legacy "telescope" and "sam" spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instrument" | "telescope" => Ok(Category::Instrument),
            "survey" => Ok(Category::Survey),
            "simulation" => Ok(Category::Simulation),
            "model" | "sam" => Ok(Category::Model),
            "person" => Ok(Category::Person),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

// ============================================================================
// Profile Key
// ============================================================================

/// Key of a display-order profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileKey {
    /// Instruments and surveys.
    #[serde(rename = "telescope")]
    Telescope,
    /// Simulations.
    #[serde(rename = "simulation")]
    Simulation,
    /// Semi-analytic models.
    #[serde(rename = "SAM")]
    Sam,
    /// People.
    #[serde(rename = "person")]
    Person,
}

impl ProfileKey {
    /// All profile keys.
    pub const ALL: [ProfileKey; 4] = [
        ProfileKey::Telescope,
        ProfileKey::Simulation,
        ProfileKey::Sam,
        ProfileKey::Person,
    ];

    /// Built-in field order used when no catalog overrides it.
    #[must_use]
    pub const fn default_order(&self) -> &'static [&'static str] {
        match self {
            ProfileKey::Telescope => &[
                "type",
                "launch_date",
                "wavelengths",
                "survey_area",
                "location",
                "status",
            ],
            ProfileKey::Simulation => &[
                "type",
                "volume",
                "mass_resolution",
                "code",
                "included_physics",
                "hydrodynamics",
                "subgrid_model",
            ],
            ProfileKey::Sam => &[
                "type",
                "included_physics",
                "volume",
                "mass_resolution",
                "end_redshift",
                "merger_tree_code",
                "parent_simulation",
            ],
            ProfileKey::Person => &[],
        }
    }

    /// Serialized name of the key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProfileKey::Telescope => "telescope",
            ProfileKey::Simulation => "simulation",
            ProfileKey::Sam => "SAM",
            ProfileKey::Person => "person",
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Entity Record
// ============================================================================

/// One entity in the merged table.
///
/// `fields` holds every non-reserved catalog field in the catalog's own key
/// order. Reserved fields live in dedicated struct fields instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Identifier, unique within the merged table.
    pub id: String,
    /// Canonical name (never empty).
    pub name: String,
    /// Alternate surface forms, in catalog order.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Category of the catalog the record came from.
    pub category: Category,
    /// Free-text description, rendered as a trailing block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Remaining fields, in catalog key order.
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Display-order profile stamped by the merger.
    #[serde(rename = "order_key")]
    pub profile: ProfileKey,
}

impl EntityRecord {
    /// Create a record with no aliases, description or extra fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            category,
            description: None,
            fields: Map::new(),
            profile: category.profile_key(),
        }
    }

    /// Add an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field. Reserved names are ignored.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if !is_reserved_field(&name) {
            self.fields.insert(name, value.into());
        }
        self
    }

    /// Canonical name followed by aliases, skipping empty strings.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|n| !n.is_empty())
    }

    /// Look up a non-reserved field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
