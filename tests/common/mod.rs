//! Shared fixtures for integration tests.

#![allow(dead_code)]

use hoverscope::{Catalog, Engine};
use hoverscope_core::Category;
use serde_json::json;
use std::sync::OnceLock;

/// A small catalog set covering every category and every exclusion rule.
pub fn catalogs() -> Vec<Catalog> {
    vec![
        Catalog::new(Category::Instrument)
            .with_display_order(["type", "status"])
            .with_entry(
                "hst",
                json!({"name": "Hubble Space Telescope", "aliases": ["HST", "Hubble"],
                       "type": "Space telescope", "status": "Operational"}),
            )
            .with_entry(
                "jwst",
                json!({"name": "James Webb Space Telescope", "aliases": ["JWST", "Webb"]}),
            )
            .with_entry(
                "planck",
                json!({"name": "Planck satellite", "aliases": ["Planck"]}),
            )
            .with_entry("euclid", json!({"name": "Euclid"}))
            .with_entry(
                "et",
                json!({"name": "Einstein Telescope", "aliases": ["ET"]}),
            )
            .with_entry(
                "fast",
                json!({"name": "Five-hundred-meter Aperture Spherical Telescope", "aliases": ["FAST"]}),
            ),
        Catalog::new(Category::Survey)
            .with_entry("cosmos", json!({"name": "COSMOS"}))
            .with_entry("euclid_wide", json!({"name": "Euclid Wide Survey"}))
            .with_entry("sdss", json!({"name": "Sloan Digital Sky Survey", "aliases": ["SDSS"]})),
        Catalog::new(Category::Simulation).with_entry(
            "eagle",
            json!({"name": "EAGLE", "code": "GADGET", "type": "Hydrodynamical"}),
        ),
        Catalog::new(Category::Model).with_entry("galform", json!({"name": "GALFORM"})),
        Catalog::new(Category::Person)
            .with_entry("doe", json!({"name": "Jane A. Doe", "affiliation": "Somewhere"}))
            .with_entry("smith", json!({"name": "John Smith"})),
    ]
}

/// Engine over [`catalogs`].
pub fn engine() -> Engine {
    let catalogs = catalogs();
    Engine::from_catalogs(catalogs.iter().map(Some)).expect("fixture catalogs merge")
}

/// One [`engine`] shared by every case of a property test.
pub fn shared_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(engine)
}

/// Words that exercise matches, exclusions and near misses.
pub const VOCABULARY: &[&str] = &[
    "the", "Hubble", "Space", "Telescope", "HST", "constant", "tension", "JWST", "Webb",
    "Planck", "Fokker-Planck", "Euclid", "Wide", "Survey", "COSMOS", "COSMOS-Web", "EAGLE",
    "GALFORM", "Doe,", "Jane", "J.", "A.", "John", "Smith", "Smith,", "ET", "et", "al.",
    "fast", "FAST", "observed", "café", "—", "data", "SDSS",
];

/// Separators placed between vocabulary words.
pub const SEPARATORS: &[&str] = &[" ", "  ", ", ", "\n", ". "];
