//! Overlap resolution: raw candidates → ordered, non-overlapping matches.
//!
//! ```text
//! raw (discovery order):  [Hubble Space Telescope]  [Hubble]  [Euclid]
//!                          4 ─────────────────── 26  4 ─── 10  36 ── 42
//!
//! stable sort by start:   [HST 4..26] [Hubble 4..10] [Euclid 36..42]
//!
//! sweep:                  accept 4..26
//!                         reject 4..10   (starts before 26)
//!                         accept 36..42
//! ```
//!
//! Earliest start wins; among equal starts the first discovered wins. There is
//! no priority between categories or entities, and losers are dropped whole,
//! never trimmed.

use crate::scan::RawMatch;

/// Pick the greedy earliest-start, first-discovered subset of `matches`.
///
/// The result is sorted by start offset and no two matches share a byte.
#[must_use]
pub fn resolve(mut matches: Vec<RawMatch>) -> Vec<RawMatch> {
    // Stable: ties keep discovery order.
    matches.sort_by_key(|m| m.start);

    let mut resolved: Vec<RawMatch> = Vec::with_capacity(matches.len());
    let mut last_end = 0;
    for m in matches {
        if m.is_empty() {
            continue;
        }
        if m.start >= last_end {
            last_end = m.end;
            resolved.push(m);
        }
    }
    resolved
}
