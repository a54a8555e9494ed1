//! Engine snapshots and the swap point between them.
//!
//! ```text
//!   CatalogSource ──fetch──► merge ──► PatternSet::compile ──► Engine
//!                                                                │
//!                                     EngineHandle::swap ◄───────┘
//!                                            │
//!            snapshot() ──► Arc<Engine> ──► annotate(text) / render(id)
//! ```
//!
//! An [`Engine`] is immutable: a merged table plus the patterns compiled from
//! it. Readers take an `Arc<Engine>` from the [`EngineHandle`] and keep it for
//! as long as they like; a refresh builds a new engine off to the side and
//! replaces the `Arc` in one step. A failed refresh leaves the current engine
//! in place.

use crate::annotate::{build, Annotation, Segment};
use crate::catalog::Catalog;
use crate::merge::{merge, MergedTable};
use crate::pattern::PatternSet;
use crate::render::{render, RenderedRecord};
use crate::resolve::resolve;
use crate::scan::{scan, RawMatch};
use crate::source::CatalogSource;
use crate::sync::{read, write, RwLock};
use crate::Result;
use std::sync::Arc;

// =============================================================================
// Engine
// =============================================================================

/// An immutable table snapshot with its compiled patterns.
#[derive(Debug, Clone)]
pub struct Engine {
    table: Arc<MergedTable>,
    patterns: PatternSet,
}

impl Engine {
    /// Compile patterns for `table`.
    #[must_use]
    pub fn new(table: MergedTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    /// Compile patterns for an already shared table.
    #[must_use]
    pub fn from_shared(table: Arc<MergedTable>) -> Self {
        let patterns = PatternSet::compile(&table);
        log::debug!(
            "[engine] Compiled {} patterns for {} entities",
            patterns.len(),
            table.len()
        );
        Self { table, patterns }
    }

    /// An engine with no entities. Annotates every text as plain literal.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(MergedTable::empty())
    }

    /// Merge `catalogs` and compile the result.
    ///
    /// # Errors
    ///
    /// Whatever [`merge`] returns.
    pub fn from_catalogs<'a, I>(catalogs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<&'a Catalog>>,
    {
        Ok(Self::new(merge(catalogs)?))
    }

    /// The merged table.
    #[must_use]
    pub fn table(&self) -> &MergedTable {
        &self.table
    }

    /// Shared handle to the merged table.
    #[must_use]
    pub fn shared_table(&self) -> Arc<MergedTable> {
        Arc::clone(&self.table)
    }

    /// The compiled patterns.
    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Scan and resolve: the non-overlapping matches in `text`.
    #[must_use]
    pub fn matches(&self, text: &str) -> Vec<RawMatch> {
        resolve(scan(text, &self.table, &self.patterns))
    }

    /// Annotate one text unit.
    ///
    /// Whitespace-only text is returned as a single literal segment without
    /// scanning.
    #[must_use]
    pub fn annotate(&self, text: &str) -> Annotation {
        if text.trim().is_empty() {
            let segments = if text.is_empty() {
                Vec::new()
            } else {
                vec![Segment::Text {
                    start: 0,
                    end: text.len(),
                    text: text.to_string(),
                }]
            };
            return Annotation { segments };
        }

        let resolved = self.matches(text);
        log::debug!(
            "[engine] {} matches in {} bytes",
            resolved.len(),
            text.len()
        );
        Annotation {
            segments: build(text, &resolved),
        }
    }

    /// Render the entity `id` with its category's display-order profile.
    #[must_use]
    pub fn render(&self, id: &str) -> Option<RenderedRecord> {
        let record = self.table.get(id)?;
        Some(render(record, self.table.profile_for(record)))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// EngineHandle
// =============================================================================

/// Owner of the current engine snapshot.
///
/// The lock is held only long enough to clone or replace the `Arc`; merging
/// and pattern compilation happen before it is taken.
#[derive(Debug)]
pub struct EngineHandle {
    current: RwLock<Arc<Engine>>,
}

impl EngineHandle {
    /// Start from an existing engine.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// Start from an empty engine.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Engine::empty())
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Engine> {
        Arc::clone(&read(&self.current))
    }

    /// Replace the current engine, returning the previous one.
    pub fn swap(&self, engine: Engine) -> Arc<Engine> {
        let entities = engine.table().len();
        let previous = std::mem::replace(&mut *write(&self.current), Arc::new(engine));
        log::info!(
            "[engine] Swapped table: {} -> {} entities",
            previous.table().len(),
            entities
        );
        previous
    }

    /// Merge `catalogs`, compile, and swap the result in.
    ///
    /// # Errors
    ///
    /// Whatever [`merge`] returns; the current engine is kept.
    pub fn load_table<'a, I>(&self, catalogs: I) -> Result<Arc<Engine>>
    where
        I: IntoIterator<Item = Option<&'a Catalog>>,
    {
        match Engine::from_catalogs(catalogs) {
            Ok(engine) => {
                self.swap(engine);
                Ok(self.snapshot())
            }
            Err(err) => {
                log::warn!("[engine] Load failed, keeping current table: {err}");
                Err(err)
            }
        }
    }

    /// Fetch catalogs from `source` and load them.
    ///
    /// # Errors
    ///
    /// Fetch or merge errors; the current engine is kept.
    pub fn refresh(&self, source: &dyn CatalogSource) -> Result<Arc<Engine>> {
        let catalogs = match source.fetch() {
            Ok(catalogs) => catalogs,
            Err(err) => {
                log::warn!(
                    "[engine] Refresh from '{}' failed, keeping current table: {err}",
                    source.name()
                );
                return Err(err);
            }
        };
        log::debug!(
            "[engine] Fetched {} catalog slots from '{}'",
            catalogs.len(),
            source.name()
        );
        self.load_table(catalogs.iter().map(Option::as_ref))
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use hoverscope_core::Category;
    use serde_json::json;

    struct FixedSource(Vec<Option<Catalog>>);

    impl CatalogSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> Result<Vec<Option<Catalog>>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self) -> Result<Vec<Option<Catalog>>> {
            Err(Error::source_failed("network unreachable"))
        }
    }

    fn instruments() -> Catalog {
        Catalog::new(Category::Instrument).with_entry(
            "jwst",
            json!({"name": "James Webb Space Telescope", "aliases": ["JWST"], "type": "Space telescope"}),
        )
    }

    #[test]
    fn annotate_runs_the_pipeline() {
        let engine = Engine::from_catalogs([Some(&instruments())]).unwrap();
        let annotation = engine.annotate("Data from JWST arrived.");
        assert_eq!(annotation.match_count(), 1);
        assert_eq!(annotation.reconstruct(), "Data from JWST arrived.");
    }

    #[test]
    fn whitespace_only_text_is_one_literal() {
        let engine = Engine::from_catalogs([Some(&instruments())]).unwrap();
        let annotation = engine.annotate(" \n\t ");
        assert_eq!(annotation.segments.len(), 1);
        assert_eq!(annotation.match_count(), 0);
        assert!(engine.annotate("").segments.is_empty());
    }

    #[test]
    fn empty_engine_matches_nothing() {
        let annotation = Engine::empty().annotate("JWST");
        assert_eq!(annotation.match_count(), 0);
        assert_eq!(annotation.reconstruct(), "JWST");
    }

    #[test]
    fn render_uses_the_records_profile() {
        let engine = Engine::from_catalogs([Some(&instruments())]).unwrap();
        let rendered = engine.render("jwst").unwrap();
        assert_eq!(rendered.name, "James Webb Space Telescope");
        assert_eq!(rendered.pairs(), vec![("Type", "Space telescope")]);
        assert!(engine.render("nope").is_none());
    }

    #[test]
    fn failed_load_keeps_the_previous_snapshot() {
        let handle = EngineHandle::empty();
        handle.load_table([Some(&instruments())]).unwrap();
        let before = handle.snapshot();

        assert!(handle.load_table([Some(&instruments()), None]).is_err());
        assert!(handle.refresh(&FailingSource).is_err());
        assert!(Arc::ptr_eq(&before, &handle.snapshot()));
    }

    #[test]
    fn in_flight_snapshot_survives_a_swap() {
        let handle = EngineHandle::empty();
        handle.load_table([Some(&instruments())]).unwrap();
        let old = handle.snapshot();

        let surveys = Catalog::new(Category::Survey).with_entry("sdss", json!({"name": "SDSS"}));
        handle.refresh(&FixedSource(vec![Some(surveys)])).unwrap();

        assert_eq!(old.annotate("JWST and SDSS").match_count(), 1);
        assert!(old.table().get("jwst").is_some());
        let new = handle.snapshot();
        assert!(new.table().get("jwst").is_none());
        assert_eq!(new.annotate("JWST and SDSS").match_count(), 1);
    }

    #[test]
    fn snapshots_are_shared_across_threads() {
        let handle = Arc::new(EngineHandle::new(
            Engine::from_catalogs([Some(&instruments())]).unwrap(),
        ));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || handle.snapshot().annotate("JWST").match_count())
            })
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), 1);
        }
    }
}
