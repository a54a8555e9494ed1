//! # hoverscope
//!
//! Entity annotation for astronomy text: find mentions of instruments,
//! surveys, simulations, semi-analytic models and people, and describe them.
//!
//! ```text
//!   catalogs ─► merge ─► MergedTable ─► PatternSet::compile
//!                              │                 │
//!   text ──────────────────────┴──► scan ◄───────┘
//!                                    │  RawMatch (may overlap)
//!                                    ▼
//!                                 resolve   earliest start, first discovered
//!                                    │
//!                                    ▼
//!                                  build ─► [Segment]   reconstructs text
//!
//!   entity id ─► render(record, profile) ─► (label, value) pairs
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use hoverscope::{Catalog, Engine};
//! use hoverscope_core::Category;
//! use serde_json::json;
//!
//! let instruments = Catalog::new(Category::Instrument).with_entry(
//!     "jwst",
//!     json!({"name": "James Webb Space Telescope", "aliases": ["JWST"], "type": "Space telescope"}),
//! );
//! let engine = Engine::from_catalogs([Some(&instruments)]).unwrap();
//!
//! let annotation = engine.annotate("New JWST spectra.");
//! assert_eq!(annotation.match_count(), 1);
//! assert_eq!(annotation.reconstruct(), "New JWST spectra.");
//!
//! let card = engine.render("jwst").unwrap();
//! assert_eq!(card.pairs(), vec![("Type", "Space telescope")]);
//! ```
//!
//! ## Refreshing
//!
//! [`EngineHandle`] owns the current [`Engine`] and swaps it atomically on
//! [`EngineHandle::refresh`]. Callers holding an earlier snapshot keep a
//! consistent view until they drop it.

#![warn(missing_docs)]

pub mod annotate;
pub mod catalog;
pub mod config;
pub mod engine;
mod error;
pub mod merge;
pub mod offset;
pub mod pattern;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod source;
pub mod sync;

pub use annotate::{build, reconstruct, Annotation, Segment};
pub use catalog::Catalog;
pub use config::HoverscopeConfig;
pub use engine::{Engine, EngineHandle};
pub use error::{Error, Result};
pub use merge::{merge, MergedTable, SkippedEntry};
pub use offset::{CharSpan, SpanConverter};
pub use pattern::{compile, compile_reversed, ExclusionRule, MatchPattern, PatternKind, PatternSet};
pub use render::{field_label, field_value, render, Field, RenderedRecord};
pub use resolve::resolve;
pub use scan::{scan, RawMatch};
pub use source::{CatalogFiles, CatalogSource, DirectorySource};

pub use hoverscope_core::{Category, EntityRecord, ProfileKey};
