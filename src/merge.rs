//! Catalog merging: N category catalogs → one lookup table.
//!
//! # Two Passes
//!
//! ```text
//!   catalogs (caller order)        pass 1: profiles           pass 2: records
//!  ┌────────────────────┐    ┌──────────────────────┐   ┌──────────────────────┐
//!  │ instruments        │──► │ first non-empty      │   │ fold entries in      │
//!  │ surveys            │──► │ display_order per    │   │ order; stamp profile │
//!  │ simulations        │──► │ profile key, else    │   │ key; later ids       │
//!  │ models             │──► │ built-in default     │   │ overwrite earlier    │
//!  │ persons (optional) │──► │                      │   │                      │
//!  └────────────────────┘    └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! Both passes read the catalogs immutably; the table is assembled once and
//! never mutated afterwards.
//!
//! # Precedence
//!
//! On an identifier collision the later catalog wins (last-write-wins), and
//! the record keeps the position of the first occurrence. Callers must supply
//! primary catalogs before any override catalog.

use crate::catalog::Catalog;
use crate::{Error, Result};
use hoverscope_core::{
    is_reserved_field, Category, EntityRecord, ProfileKey, ALIASES_FIELD, DESCRIPTION_FIELD,
    NAME_FIELD,
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// An entry the merger dropped because it had no usable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Category of the catalog the entry came from.
    pub category: Category,
    /// Identifier of the entry.
    pub id: String,
    /// Why it was skipped.
    pub reason: String,
}

/// The union of all catalogs plus the resolved display-order profiles.
///
/// Built once per load cycle by [`merge`] and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    records: Vec<EntityRecord>,
    index: HashMap<String, usize>,
    profiles: BTreeMap<ProfileKey, Vec<String>>,
    skipped: Vec<SkippedEntry>,
}

impl MergedTable {
    /// A table with no entities and the built-in default profiles.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            profiles: resolve_profiles(&[]),
            ..Self::default()
        }
    }

    /// Look up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Records in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field order for a profile key.
    #[must_use]
    pub fn profile(&self, key: ProfileKey) -> &[String] {
        self.profiles.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Field order for a record, via its stamped profile key.
    #[must_use]
    pub fn profile_for(&self, record: &EntityRecord) -> &[String] {
        self.profile(record.profile)
    }

    /// Entries dropped during the merge.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }
}

/// Merge catalogs, in the order given, into one table.
///
/// A `None` slot means a catalog the caller was required to supply is
/// missing; the whole load fails and the caller keeps its previous table.
///
/// # Errors
///
/// [`Error::MissingCatalog`] if any slot is `None`. Malformed entries are not
/// errors: they are logged, listed in [`MergedTable::skipped`], and left out.
///
/// # Example
///
/// ```rust
/// use hoverscope::{merge, Catalog};
/// use hoverscope_core::Category;
/// use serde_json::json;
///
/// let a = Catalog::new(Category::Instrument).with_entry("x", json!({"name": "Foo"}));
/// let b = Catalog::new(Category::Survey).with_entry("x", json!({"name": "Bar"}));
/// let table = merge([Some(&a), Some(&b)]).unwrap();
/// assert_eq!(table.get("x").unwrap().name, "Bar");
/// ```
pub fn merge<'a, I>(catalogs: I) -> Result<MergedTable>
where
    I: IntoIterator<Item = Option<&'a Catalog>>,
{
    let catalogs = catalogs
        .into_iter()
        .enumerate()
        .map(|(position, slot)| {
            slot.ok_or_else(|| Error::missing_catalog(format!("catalog #{position} was not supplied")))
        })
        .collect::<Result<Vec<_>>>()?;

    let profiles = resolve_profiles(&catalogs);
    let mut table = MergedTable {
        profiles,
        ..MergedTable::default()
    };

    for catalog in &catalogs {
        fold_catalog(&mut table, catalog);
    }

    log::debug!(
        "[merge] {} catalogs -> {} entities ({} skipped)",
        catalogs.len(),
        table.records.len(),
        table.skipped.len()
    );
    Ok(table)
}

// =============================================================================
// Pass 1: profiles
// =============================================================================

fn resolve_profiles(catalogs: &[&Catalog]) -> BTreeMap<ProfileKey, Vec<String>> {
    ProfileKey::ALL
        .iter()
        .map(|&key| {
            let order = catalogs
                .iter()
                .filter(|c| c.category().profile_key() == key)
                .find_map(|c| c.display_order().filter(|order| !order.is_empty()))
                .map(<[String]>::to_vec)
                .unwrap_or_else(|| key.default_order().iter().map(|s| s.to_string()).collect());
            (key, order)
        })
        .collect()
}

// =============================================================================
// Pass 2: records
// =============================================================================

fn fold_catalog(table: &mut MergedTable, catalog: &Catalog) {
    let category = catalog.category();
    for (id, entry) in catalog.entries() {
        match parse_record(category, id, entry) {
            Ok(record) => match table.index.get(id) {
                Some(&i) => {
                    log::debug!("[merge] {category} entry '{id}' overrides an earlier entry");
                    table.records[i] = record;
                }
                None => {
                    table.index.insert(id.to_string(), table.records.len());
                    table.records.push(record);
                }
            },
            Err(err) => {
                log::warn!("[merge] Skipping entry: {err}");
                let reason = match err {
                    Error::MalformedCatalog { reason, .. } => reason,
                    other => other.to_string(),
                };
                table.skipped.push(SkippedEntry {
                    category,
                    id: id.to_string(),
                    reason,
                });
            }
        }
    }
}

/// Turn one raw catalog entry into a record.
fn parse_record(category: Category, id: &str, entry: &Value) -> Result<EntityRecord> {
    let Value::Object(map) = entry else {
        return Err(Error::malformed(category, id, "entry is not an object"));
    };

    let name = match map.get(NAME_FIELD) {
        Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
        Some(Value::String(_)) => return Err(Error::malformed(category, id, "name is empty")),
        Some(_) => return Err(Error::malformed(category, id, "name is not a string")),
        None => return Err(Error::malformed(category, id, "name is missing")),
    };

    let aliases = match map.get(ALIASES_FIELD) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(alias)) => vec![alias.clone()],
        _ => Vec::new(),
    };

    let description = map
        .get(DESCRIPTION_FIELD)
        .and_then(Value::as_str)
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string);

    let fields: Map<String, Value> = map
        .iter()
        .filter(|(key, _)| !is_reserved_field(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(EntityRecord {
        id: id.to_string(),
        name,
        aliases,
        category,
        description,
        fields,
        profile: category.profile_key(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instruments() -> Catalog {
        Catalog::new(Category::Instrument)
            .with_entry(
                "hst",
                json!({"name": "Hubble Space Telescope", "aliases": ["HST", "Hubble"], "type": "Space telescope"}),
            )
            .with_entry("jwst", json!({"name": "James Webb Space Telescope", "aliases": ["JWST"]}))
    }

    #[test]
    fn later_catalog_wins_on_collision() {
        let a = Catalog::new(Category::Instrument).with_entry("x", json!({"name": "Foo"}));
        let b = Catalog::new(Category::Survey).with_entry("x", json!({"name": "Bar"}));
        let table = merge([Some(&a), Some(&b)]).unwrap();
        let x = table.get("x").unwrap();
        assert_eq!(x.name, "Bar");
        assert_eq!(x.category, Category::Survey);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn merge_order_is_a_parameter() {
        let a = Catalog::new(Category::Instrument).with_entry("x", json!({"name": "Foo"}));
        let b = Catalog::new(Category::Survey).with_entry("x", json!({"name": "Bar"}));
        let table = merge([Some(&b), Some(&a)]).unwrap();
        assert_eq!(table.get("x").unwrap().name, "Foo");
    }

    #[test]
    fn override_keeps_first_position() {
        let a = Catalog::new(Category::Instrument)
            .with_entry("a", json!({"name": "A"}))
            .with_entry("b", json!({"name": "B"}));
        let b = Catalog::new(Category::Survey).with_entry("a", json!({"name": "A2"}));
        let table = merge([Some(&a), Some(&b)]).unwrap();
        let names: Vec<_> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }

    #[test]
    fn missing_catalog_fails_the_load() {
        let a = instruments();
        let err = merge([Some(&a), None]).unwrap_err();
        assert!(matches!(err, Error::MissingCatalog(_)));
    }

    #[test]
    fn nameless_entries_are_skipped() {
        let catalog = instruments()
            .with_entry("blank", json!({"name": "  "}))
            .with_entry("none", json!({"type": "Radio"}))
            .with_entry("num", json!({"name": 7}))
            .with_entry("list", json!(["not", "an", "object"]));
        let table = merge([Some(&catalog)]).unwrap();
        assert_eq!(table.len(), 2);
        let skipped: Vec<_> = table.skipped().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(skipped, vec!["blank", "none", "num", "list"]);
    }

    #[test]
    fn profile_key_is_stamped_per_category() {
        let sams = Catalog::new(Category::Model).with_entry("galform", json!({"name": "GALFORM"}));
        let table = merge([Some(&instruments()), Some(&sams)]).unwrap();
        assert_eq!(table.get("hst").unwrap().profile, ProfileKey::Telescope);
        assert_eq!(table.get("galform").unwrap().profile, ProfileKey::Sam);
    }

    #[test]
    fn first_non_empty_override_wins() {
        let telescopes = instruments().with_display_order(Vec::<String>::new());
        let surveys = Catalog::new(Category::Survey).with_display_order(["status", "type"]);
        let later = Catalog::new(Category::Instrument).with_display_order(["location"]);
        let table = merge([Some(&telescopes), Some(&surveys), Some(&later)]).unwrap();
        assert_eq!(table.profile(ProfileKey::Telescope), &["status", "type"]);
    }

    #[test]
    fn defaults_apply_without_override() {
        let table = merge([Some(&instruments())]).unwrap();
        assert_eq!(table.profile(ProfileKey::Simulation)[1], "volume");
        assert_eq!(table.profile(ProfileKey::Sam)[4], "end_redshift");
        assert!(table.profile(ProfileKey::Person).is_empty());
    }

    #[test]
    fn reserved_fields_are_lifted_out() {
        let catalog = Catalog::new(Category::Simulation).with_entry(
            "eagle",
            json!({
                "name": "EAGLE",
                "aliases": "Eagle",
                "description": "Hydrodynamical simulation",
                "order_key": "bogus",
                "code": "GADGET"
            }),
        );
        let table = merge([Some(&catalog)]).unwrap();
        let eagle = table.get("eagle").unwrap();
        assert_eq!(eagle.aliases, vec!["Eagle"]);
        assert_eq!(eagle.description.as_deref(), Some("Hydrodynamical simulation"));
        assert_eq!(eagle.fields.keys().collect::<Vec<_>>(), vec!["code"]);
        assert_eq!(eagle.profile, ProfileKey::Simulation);
    }

    #[test]
    fn empty_table_has_default_profiles() {
        let table = MergedTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.profile(ProfileKey::Telescope)[0], "type");
    }
}
