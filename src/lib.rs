//! Buildlog-triage classifies the root cause of build failures.
//!
//! Given the lines of a build log (`sbuild`, `apt-get`, `autopkgtest` or a
//! plain compiler transcript), the crate locates the line or lines that
//! explain the failure and maps them onto a closed taxonomy of problem
//! kinds, each carrying a typed, JSON-serialisable payload.

#![deny(missing_docs)]

use std::borrow::Cow;
use std::collections::HashMap;

/// Scanner for apt-get transcripts and dose3 resolver reports.
pub mod apt;
/// Parser for the autopkgtest event protocol.
pub mod autopkgtest;
/// Parser for Breezy (`brz`) error output.
pub mod brz;
/// The matcher catalogue and the generic build-failure scanners.
pub mod catalog;
/// Data model for CUDF dependency-resolver reports.
pub mod cudf;
/// Bounded iteration helpers over log line windows.
pub mod lines;
/// The problem taxonomy.
pub mod problems;
/// Sbuild log segmentation and per-stage failure dispatch.
pub mod sbuild;
/// Matcher machinery: regex matchers and ordered matcher groups.
pub mod scan;

/// Provenance tag recorded on a match, e.g. `direct regex (...)`.
///
/// Only used for debugging output; carries no semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin(pub String);

impl Origin {
    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Origin {
    fn from(s: &str) -> Self {
        Origin(s.to_string())
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single located line in a log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleLineMatch {
    /// Where the match came from.
    pub origin: Origin,
    /// Zero-based line offset.
    pub offset: usize,
    /// The matched line, trailing newline included if the input had one.
    pub line: String,
}

/// A run of located lines in a log.
///
/// `line()`/`offset()` alias the last element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiLineMatch {
    /// Where the match came from.
    pub origin: Origin,
    /// Zero-based line offsets, in increasing order.
    pub offsets: Vec<usize>,
    /// The matched lines, parallel to `offsets`.
    pub lines: Vec<String>,
}

impl MultiLineMatch {
    /// Build a multi-line match; panics if `offsets` and `lines` disagree
    /// in length or are empty.
    pub fn new(origin: Origin, offsets: Vec<usize>, lines: Vec<String>) -> Self {
        assert!(!offsets.is_empty());
        assert_eq!(offsets.len(), lines.len());
        Self {
            origin,
            offsets,
            lines,
        }
    }
}

/// The located line(s) that justify a problem: either one line or a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Match {
    /// A single-line match.
    Single(SingleLineMatch),
    /// A multi-line match.
    Multi(MultiLineMatch),
}

impl Match {
    /// Single-line match referencing `lines[offset]`.
    pub fn single_from_lines(lines: &[&str], offset: usize, origin: Option<&str>) -> Self {
        Match::Single(SingleLineMatch {
            origin: Origin(origin.unwrap_or("").to_string()),
            offset,
            line: lines[offset].to_string(),
        })
    }

    /// Multi-line match referencing the given offsets into `lines`.
    pub fn multi_from_lines(lines: &[&str], offsets: Vec<usize>, origin: Option<&str>) -> Self {
        let matched = offsets.iter().map(|&i| lines[i].to_string()).collect();
        Match::Multi(MultiLineMatch::new(
            Origin(origin.unwrap_or("").to_string()),
            offsets,
            matched,
        ))
    }

    /// The matched line; for multi-line matches, the last one.
    pub fn line(&self) -> &str {
        match self {
            Match::Single(m) => &m.line,
            Match::Multi(m) => m.lines.last().expect("multi-line match is never empty"),
        }
    }

    /// All matched lines.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Match::Single(m) => vec![m.line.as_str()],
            Match::Multi(m) => m.lines.iter().map(|s| s.as_str()).collect(),
        }
    }

    /// Zero-based offset; for multi-line matches, the last one.
    pub fn offset(&self) -> usize {
        match self {
            Match::Single(m) => m.offset,
            Match::Multi(m) => *m.offsets.last().expect("multi-line match is never empty"),
        }
    }

    /// All zero-based offsets.
    pub fn offsets(&self) -> Vec<usize> {
        match self {
            Match::Single(m) => vec![m.offset],
            Match::Multi(m) => m.offsets.clone(),
        }
    }

    /// One-based line number of `offset()`.
    pub fn lineno(&self) -> usize {
        self.offset() + 1
    }

    /// One-based line numbers for all offsets.
    pub fn linenos(&self) -> Vec<usize> {
        self.offsets().iter().map(|o| o + 1).collect()
    }

    /// The provenance tag.
    pub fn origin(&self) -> &Origin {
        match self {
            Match::Single(m) => &m.origin,
            Match::Multi(m) => &m.origin,
        }
    }

    /// The same match shifted `delta` lines down, for relocating matches
    /// found in a sub-range back into the full log.
    pub fn add_offset(&self, delta: usize) -> Match {
        match self {
            Match::Single(m) => Match::Single(SingleLineMatch {
                origin: m.origin.clone(),
                offset: m.offset + delta,
                line: m.line.clone(),
            }),
            Match::Multi(m) => Match::Multi(MultiLineMatch {
                origin: m.origin.clone(),
                offsets: m.offsets.iter().map(|o| o + delta).collect(),
                lines: m.lines.clone(),
            }),
        }
    }
}

impl From<SingleLineMatch> for Match {
    fn from(m: SingleLineMatch) -> Self {
        Match::Single(m)
    }
}

impl From<MultiLineMatch> for Match {
    fn from(m: MultiLineMatch) -> Self {
        Match::Multi(m)
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.origin(),
            self.lineno(),
            self.line().trim_end_matches('\n')
        )
    }
}

/// One variant of the closed problem taxonomy.
///
/// Implementations are plain data records; `kind()` is a short stable tag
/// that is unique across the crate, and `json()` is the payload with the
/// tag and the global flag excluded.
pub trait Problem: std::fmt::Display + std::fmt::Debug + Send + Sync {
    /// Stable machine-readable tag, e.g. `missing-c-header`.
    fn kind(&self) -> Cow<'_, str>;

    /// Payload fields as a JSON value.
    fn json(&self) -> serde_json::Value;

    /// Downcast support.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Whether this problem describes an environmental condition (disk
    /// full, session killed) that should win over more specific matches
    /// found in the same scan window.
    fn is_global(&self) -> bool {
        false
    }
}

impl PartialEq for dyn Problem {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.json() == other.json()
    }
}

impl Eq for dyn Problem {}

impl std::hash::Hash for dyn Problem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.json().to_string().hash(state);
    }
}

impl serde::Serialize for dyn Problem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serde_json::Map::new();
        map.insert("kind".to_string(), self.kind().to_string().into());
        map.insert("details".to_string(), self.json());
        map.serialize(serializer)
    }
}

/// Outcome of a scanner run: the located line(s) plus the classified
/// problem, either of which may be absent.
pub type FinderResult = (Option<Match>, Option<Box<dyn Problem>>);

/// Registry entry tying a problem kind tag to its JSON constructor.
pub struct ProblemKind {
    /// The stable tag.
    pub kind: &'static str,
    /// Rebuilds the problem from its `json()` payload.
    pub from_json: fn(serde_json::Value) -> Result<Box<dyn Problem>, serde_json::Error>,
}

inventory::collect!(ProblemKind);

lazy_static::lazy_static! {
    static ref PROBLEM_REGISTRY: HashMap<&'static str, &'static ProblemKind> = {
        let mut map = HashMap::new();
        for entry in inventory::iter::<ProblemKind> {
            if map.insert(entry.kind, entry).is_some() {
                panic!("problem kind {:?} registered twice", entry.kind);
            }
        }
        map
    };
}

/// Reconstruct a problem from its kind tag and `json()` payload.
///
/// Returns `None` for unknown tags or payloads that do not bind to the
/// variant's fields; the latter is logged.
pub fn problem_from_json(kind: &str, details: serde_json::Value) -> Option<Box<dyn Problem>> {
    let entry = PROBLEM_REGISTRY.get(kind)?;
    match (entry.from_json)(details) {
        Ok(problem) => Some(problem),
        Err(e) => {
            log::warn!("payload for problem kind {:?} did not bind: {}", kind, e);
            None
        }
    }
}

/// All registered problem kind tags, sorted.
pub fn known_problem_kinds() -> Vec<&'static str> {
    let mut kinds: Vec<_> = PROBLEM_REGISTRY.keys().copied().collect();
    kinds.sort_unstable();
    kinds
}

/// Implement [`Problem`] for a payload struct and register its kind tag.
///
/// The struct must derive `Serialize`/`Deserialize`; the payload JSON is
/// whatever serde produces for it. Pass `global` as a third argument for
/// environmental kinds that override more specific matches.
#[macro_export]
macro_rules! problem_kind {
    ($ty:ident, $kind:literal) => {
        $crate::problem_kind!(@impl $ty, $kind, false);
    };
    ($ty:ident, $kind:literal, global) => {
        $crate::problem_kind!(@impl $ty, $kind, true);
    };
    (@impl $ty:ident, $kind:literal, $global:expr) => {
        impl $crate::Problem for $ty {
            fn kind(&self) -> std::borrow::Cow<'_, str> {
                $kind.into()
            }

            fn json(&self) -> serde_json::Value {
                serde_json::to_value(self).unwrap()
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn is_global(&self) -> bool {
                $global
            }
        }

        inventory::submit! {
            $crate::ProblemKind {
                kind: $kind,
                from_json: |value| {
                    let problem: $ty = serde_json::from_value(value)?;
                    Ok(Box::new(problem) as Box<dyn $crate::Problem>)
                },
            }
        }
    };
}

/// Print a match with `context` surrounding lines, marking matched lines
/// with `>`.
pub fn highlight_lines(lines: &[&str], m: &Match, context: usize) {
    use std::cmp::min;
    let linenos = m.linenos();
    if linenos.len() == 1 {
        println!("Issue found at line {}:", m.lineno());
    } else {
        println!(
            "Issue found at lines {}-{}:",
            linenos.first().unwrap(),
            linenos.last().unwrap()
        );
    }
    let offsets = m.offsets();
    let start = offsets[0].saturating_sub(context);
    let end = min(lines.len(), offsets.last().unwrap() + context + 1);
    for (i, line) in lines.iter().enumerate().take(end).skip(start) {
        println!(
            " {}  {}",
            if offsets.contains(&i) { ">" } else { " " },
            line.trim_end_matches('\n')
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single() -> Match {
        Match::Single(SingleLineMatch {
            origin: Origin("test".to_string()),
            offset: 10,
            line: "test line".to_string(),
        })
    }

    fn multi() -> Match {
        Match::Multi(MultiLineMatch::new(
            Origin("test".to_string()),
            vec![10, 11, 12],
            vec!["one".to_string(), "two".to_string(), "three".to_string()],
        ))
    }

    #[test]
    fn test_single_accessors() {
        let m = single();
        assert_eq!(m.line(), "test line");
        assert_eq!(m.offset(), 10);
        assert_eq!(m.lineno(), 11);
        assert_eq!(m.offsets(), vec![10]);
        assert_eq!(m.linenos(), vec![11]);
        assert_eq!(m.lines(), vec!["test line"]);
        assert_eq!(m.origin().as_str(), "test");
    }

    #[test]
    fn test_multi_accessors() {
        let m = multi();
        assert_eq!(m.line(), "three");
        assert_eq!(m.offset(), 12);
        assert_eq!(m.lineno(), 13);
        assert_eq!(m.offsets(), vec![10, 11, 12]);
        assert_eq!(m.linenos(), vec![11, 12, 13]);
    }

    #[test]
    fn test_add_offset() {
        assert_eq!(single().add_offset(5).offset(), 15);
        assert_eq!(multi().add_offset(5).offsets(), vec![15, 16, 17]);
    }

    #[test]
    fn test_single_from_lines() {
        let lines = vec!["a", "b", "c"];
        let m = Match::single_from_lines(&lines, 1, Some("direct match"));
        assert_eq!(m.line(), "b");
        assert_eq!(m.lineno(), 2);
        assert_eq!(m.origin().as_str(), "direct match");
    }

    #[test]
    fn test_registry_round_trip() {
        use crate::problems::common::{MissingCHeader, NoSpaceOnDevice};
        let p: Box<dyn Problem> = Box::new(MissingCHeader {
            header: "zlib.h".to_string(),
        });
        let rebuilt = problem_from_json(&p.kind(), p.json()).unwrap();
        assert_eq!(&*rebuilt, &*p);

        let p: Box<dyn Problem> = Box::new(NoSpaceOnDevice {});
        let rebuilt = problem_from_json(&p.kind(), p.json()).unwrap();
        assert_eq!(&*rebuilt, &*p);
        assert!(rebuilt.is_global());
    }

    #[test]
    fn test_registry_unknown_kind() {
        assert!(problem_from_json("no-such-kind", serde_json::json!({})).is_none());
    }

    #[test]
    fn test_known_problem_kinds_unique() {
        let kinds = known_problem_kinds();
        assert!(
            kinds.len() > 150,
            "expected a large taxonomy, got {}",
            kinds.len()
        );
        let mut deduped = kinds.clone();
        deduped.dedup();
        assert_eq!(kinds, deduped);
    }

    #[test]
    fn test_highlight_lines_does_not_panic() {
        let lines = vec!["line 1", "line 2", "line 3"];
        highlight_lines(&lines, &Match::single_from_lines(&lines, 1, None), 1);
    }
}
