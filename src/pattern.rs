//! Pattern compilation: entity name → word-bounded match pattern.
//!
//! # Anatomy of a Pattern
//!
//! ```text
//!   name: "Hubble"
//!
//!   ┌──────────┬─────────────┬──────────┬───────────────────────────────┐
//!   │ case     │ boundary    │ literal  │ exclusion guards              │
//!   ├──────────┼─────────────┼──────────┼───────────────────────────────┤
//!   │ (?i)     │ \b ... \b   │ Hubble   │ not followed by " tension",   │
//!   │ unless   │             │ (escaped)│ " flow", " constant", ...     │
//!   │ allow-   │             │          │                               │
//!   │ listed   │             │          │                               │
//!   └──────────┴─────────────┴──────────┴───────────────────────────────┘
//! ```
//!
//! `\b` is only placed beside a word character: "Gaia (DR3)" is anchored
//! before the `G` and left open after the `)`.
//!
//! The `regex` crate has no lookaround, so exclusions are guards checked
//! against the text around each candidate. A rejected candidate does not
//! consume its span: the search resumes one character after its start.
//!
//! # Exclusion Rules
//!
//! Rules are hand-authored and keyed by exact name string in
//! [`EXCLUSION_RULES`]. The compiler consults the table generically; adding a
//! rule never touches the compiler.
//!
//! # Reversed Person Names
//!
//! A multi-token person name "Jane A. Doe" also compiles to a reversed form
//! matching "Doe, Jane A.", "Doe, J. A." or "Doe, J.A.": the last token, a
//! comma, then every given-name token in full or as an initial, each with an
//! optional period. Reversed forms are always case-insensitive.

use hoverscope_core::{Category, EntityRecord};
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;

use crate::merge::MergedTable;

// =============================================================================
// Static Tables
// =============================================================================

/// Names that must match case-exactly ("ET" vs "et al.", "FAST" vs "fast").
pub const CASE_SENSITIVE_NAMES: &[&str] = &["ET", "FIRST", "FAST", "INTEGRAL"];

/// An entity-specific false-positive filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionRule {
    /// Reject a match followed by whitespace and one of these phrases.
    TrailingWords(&'static [&'static str]),
    /// Reject a match preceded by one or two hyphens ("Fokker-Planck", "Fokker--Planck").
    LeadingHyphen,
    /// Reject a match followed by a hyphen and this token ("COSMOS-Web").
    TrailingHyphenToken(&'static str),
}

const HUBBLE_FOLLOWERS: &[&str] = &[
    "parameter",
    "tension",
    "expansion",
    "flow",
    "residuals",
    "Frontier Fields",
    "constant",
];

/// The bare "Hubble" also sits at the start of "Hubble Space Telescope", so it
/// additionally rejects the followers reached past "Space Telescope".
const HUBBLE_ALIAS_FOLLOWERS: &[&str] = &[
    "parameter",
    "tension",
    "expansion",
    "flow",
    "residuals",
    "Frontier Fields",
    "constant",
    "Space Telescope parameter",
    "Space Telescope tension",
    "Space Telescope expansion",
    "Space Telescope flow",
    "Space Telescope residuals",
    "Space Telescope Frontier Fields",
    "Space Telescope constant",
];

/// Exclusion rules by exact entity name.
pub const EXCLUSION_RULES: &[(&str, ExclusionRule)] = &[
    ("Hubble", ExclusionRule::TrailingWords(HUBBLE_ALIAS_FOLLOWERS)),
    (
        "Hubble Space Telescope",
        ExclusionRule::TrailingWords(HUBBLE_FOLLOWERS),
    ),
    ("HST", ExclusionRule::TrailingWords(HUBBLE_FOLLOWERS)),
    ("Planck", ExclusionRule::LeadingHyphen),
    ("Planck satellite", ExclusionRule::LeadingHyphen),
    ("COSMOS", ExclusionRule::TrailingHyphenToken("Web")),
];

/// Rules registered for `name`, in table order.
pub fn exclusions_for(name: &str) -> impl Iterator<Item = ExclusionRule> + '_ {
    EXCLUSION_RULES
        .iter()
        .filter(move |(rule_name, _)| *rule_name == name)
        .map(|(_, rule)| *rule)
}

/// Whether `name` is on the case-exact allowlist.
#[must_use]
pub fn is_case_sensitive(name: &str) -> bool {
    CASE_SENSITIVE_NAMES.contains(&name)
}

// =============================================================================
// MatchPattern
// =============================================================================

/// Which surface form a pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// The name as written.
    Literal,
    /// "Last, First Middle" form of a person name.
    Reversed,
}

#[derive(Debug, Clone)]
enum Guard {
    /// Anchored at the match end; a hit rejects the match.
    FollowedBy(Regex),
    PrecededByHyphen,
    FollowedByHyphenToken { token: String, ignore_case: bool },
    FollowedByWordChar,
}

impl Guard {
    fn rejects(&self, text: &str, start: usize, end: usize) -> bool {
        match self {
            Guard::FollowedBy(re) => re.is_match(&text[end..]),
            Guard::PrecededByHyphen => text[..start].ends_with('-'),
            Guard::FollowedByHyphenToken { token, ignore_case } => {
                let Some(rest) = text[end..].strip_prefix('-') else {
                    return false;
                };
                match rest.get(..token.len()) {
                    Some(head) if *ignore_case => head.eq_ignore_ascii_case(token),
                    Some(head) => head == token,
                    None => false,
                }
            }
            Guard::FollowedByWordChar => text[end..]
                .chars()
                .next()
                .is_some_and(is_word_char),
        }
    }
}

/// A compiled, reusable pattern for one surface form of one name.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    name: String,
    kind: PatternKind,
    regex: Regex,
    guards: Vec<Guard>,
}

impl MatchPattern {
    /// The name this pattern was compiled from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Surface form matched.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Regex source, without guards (for debugging).
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All non-overlapping occurrences in `text`, left to right, as byte ranges.
    #[must_use]
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(m) = self.regex.find_at(text, pos) else {
                break;
            };
            if self.guards.iter().any(|g| g.rejects(text, m.start(), m.end())) {
                pos = next_char(text, m.start());
                continue;
            }
            found.push(m.range());
            pos = if m.end() > m.start() {
                m.end()
            } else {
                next_char(text, m.end())
            };
        }
        found
    }
}

/// Byte index just past the character starting at `i` (or `i + 1` at the end).
fn next_char(text: &str, i: usize) -> usize {
    i + text[i..].chars().next().map_or(1, char::len_utf8)
}

// =============================================================================
// Compilation
// =============================================================================

/// Compile `name` with the exclusion rules registered for it.
///
/// Returns `None` for an empty name. Pure: the same name always yields the
/// same pattern.
///
/// # Example
///
/// ```rust
/// use hoverscope::pattern::compile;
/// use hoverscope_core::Category;
///
/// let hubble = compile("Hubble", Category::Instrument).unwrap();
/// assert_eq!(hubble.find_all("the Hubble tension").len(), 0);
/// assert_eq!(hubble.find_all("the hubble images").len(), 1);
/// ```
#[must_use]
pub fn compile(name: &str, category: Category) -> Option<MatchPattern> {
    let rules: Vec<ExclusionRule> = exclusions_for(name).collect();
    compile_with(name, category, &rules)
}

/// Compile `name` with an explicit set of exclusion rules.
#[must_use]
pub fn compile_with(
    name: &str,
    _category: Category,
    rules: &[ExclusionRule],
) -> Option<MatchPattern> {
    if name.is_empty() {
        return None;
    }
    let ignore_case = !is_case_sensitive(name);
    let flags = if ignore_case { "(?i)" } else { "" };
    let source = format!(
        r"{flags}{}{}{}",
        boundary(name.chars().next()),
        regex::escape(name),
        boundary(name.chars().next_back())
    );
    let regex = build_regex(&source)?;
    let guards = rules
        .iter()
        .filter_map(|rule| guard_for(rule, ignore_case))
        .collect();

    Some(MatchPattern {
        name: name.to_string(),
        kind: PatternKind::Literal,
        regex,
        guards,
    })
}

/// `\b` beside a word character; nothing beside punctuation, where `\b`
/// would demand a word character on the far side.
fn boundary(edge: Option<char>) -> &'static str {
    match edge {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Compile the "Last, First Middle" form of a person name.
///
/// Returns `None` for names with fewer than two tokens, names that already
/// contain a comma, and every non-person category.
#[must_use]
pub fn compile_reversed(name: &str, category: Category) -> Option<MatchPattern> {
    if category != Category::Person || name.contains(',') {
        return None;
    }
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let (last, given) = tokens.split_last()?;
    let given: Vec<String> = given
        .iter()
        .map(|t| t.trim_end_matches('.'))
        .filter(|t| !t.is_empty())
        .map(given_name_piece)
        .collect();
    if given.is_empty() {
        return None;
    }

    let source = format!(
        r"(?i)\b{},\s*{}",
        regex::escape(last),
        given.join(r"\s*")
    );
    let regex = build_regex(&source)?;

    Some(MatchPattern {
        name: name.to_string(),
        kind: PatternKind::Reversed,
        regex,
        guards: vec![Guard::FollowedByWordChar],
    })
}

/// `Jane` → `(?:Jane|J)\.?`; `A` → `A\.?`.
fn given_name_piece(token: &str) -> String {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(initial), Some(_)) => format!(
            r"(?:{}|{})\.?",
            regex::escape(token),
            regex::escape(&initial.to_string())
        ),
        _ => format!(r"{}\.?", regex::escape(token)),
    }
}

fn guard_for(rule: &ExclusionRule, ignore_case: bool) -> Option<Guard> {
    match rule {
        ExclusionRule::TrailingWords(words) => {
            let alternatives: Vec<String> = words
                .iter()
                .map(|w| {
                    w.split_whitespace()
                        .map(regex::escape)
                        .collect::<Vec<_>>()
                        .join(r"\s+")
                })
                .filter(|w| !w.is_empty())
                .collect();
            if alternatives.is_empty() {
                return None;
            }
            let flags = if ignore_case { "(?i)" } else { "" };
            let source = format!(r"{flags}^\s+(?:{})", alternatives.join("|"));
            build_regex(&source).map(Guard::FollowedBy)
        }
        ExclusionRule::LeadingHyphen => Some(Guard::PrecededByHyphen),
        ExclusionRule::TrailingHyphenToken(token) => Some(Guard::FollowedByHyphenToken {
            token: (*token).to_string(),
            ignore_case,
        }),
    }
}

/// Escaped input always compiles; a failure here means a size limit was hit.
fn build_regex(source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(err) => {
            log::warn!("[pattern] Could not compile {source:?}: {err}");
            None
        }
    }
}

// =============================================================================
// PatternSet
// =============================================================================

/// Every pattern for one merged table, compiled once per load.
///
/// Identical names shared by several entities are compiled once and cloned
/// (a `Regex` clone shares its compiled program).
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    by_entity: HashMap<String, Vec<MatchPattern>>,
}

impl PatternSet {
    /// Compile literal patterns for every name and alias of every record, plus
    /// reversed forms for people.
    #[must_use]
    pub fn compile(table: &MergedTable) -> Self {
        let mut cache: HashMap<(String, PatternKind), Option<MatchPattern>> = HashMap::new();
        let mut by_entity = HashMap::with_capacity(table.len());

        for record in table.iter() {
            let patterns = Self::record_patterns(record, &mut cache);
            by_entity.insert(record.id.clone(), patterns);
        }

        log::debug!(
            "[pattern] Compiled {} distinct patterns for {} entities",
            cache.values().filter(|p| p.is_some()).count(),
            by_entity.len()
        );
        Self { by_entity }
    }

    fn record_patterns(
        record: &EntityRecord,
        cache: &mut HashMap<(String, PatternKind), Option<MatchPattern>>,
    ) -> Vec<MatchPattern> {
        let mut patterns = Vec::new();
        for name in record.names() {
            let literal = cache
                .entry((name.to_string(), PatternKind::Literal))
                .or_insert_with(|| compile(name, record.category));
            patterns.extend(literal.clone());
        }
        if record.category == Category::Person {
            for name in record.names() {
                let reversed = cache
                    .entry((name.to_string(), PatternKind::Reversed))
                    .or_insert_with(|| compile_reversed(name, record.category));
                patterns.extend(reversed.clone());
            }
        }
        patterns
    }

    /// Patterns for one entity, in discovery order.
    #[must_use]
    pub fn for_entity(&self, id: &str) -> &[MatchPattern] {
        self.by_entity.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_entity.values().map(Vec::len).sum()
    }

    /// Whether no patterns were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
