//! Matcher machinery.
//!
//! A [`Matcher`] inspects a window of log lines anchored at one offset and
//! may produce a [`Match`] plus an optional [`Problem`]. Matchers are
//! assembled into ordered [`MatcherGroup`]s; the first hit wins, so more
//! specific patterns must be listed before more general ones.

use crate::{Match, Origin, Problem};
use regex::{Captures, Regex};

/// Error raised by a matcher builder over bad captures.
///
/// Never aborts a scan: the group logs it and moves on to the next
/// matcher.
#[derive(Debug)]
pub struct Error {
    /// Diagnostic text.
    pub message: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.message.fmt(f)
    }
}

impl std::error::Error for Error {}

/// What a builder returns: a problem, no problem (the match alone is
/// meaningful), or an error.
pub type BuilderResult = Result<Option<Box<dyn Problem>>, Error>;

/// Post-processing callback turning regex captures into a problem.
pub type Builder = Box<dyn Fn(&Captures) -> BuilderResult + Send + Sync>;

/// Wrap a problem value as a successful builder result.
pub fn problem<P: Problem + 'static>(p: P) -> BuilderResult {
    Ok(Some(Box::new(p)))
}

/// Capture group `i` as a string slice, or `""` when the group did not
/// participate. Builders must tolerate optional groups.
pub fn cap<'t>(c: &Captures<'t>, i: usize) -> &'t str {
    c.get(i).map_or("", |g| g.as_str())
}

/// Anything that can extract a match from a line window.
pub trait Matcher: Sync {
    /// Try to match at `lines[offset]`; `Ok(None)` means no match here.
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error>;
}

/// Single-line matcher: a compiled regex plus a builder.
pub struct RegexLineMatcher {
    regex: Regex,
    builder: Builder,
}

impl RegexLineMatcher {
    /// Pair a compiled regex with its builder.
    pub fn new(regex: Regex, builder: Builder) -> Self {
        Self { regex, builder }
    }

    /// Whether the (newline-stripped) line matches at all.
    pub fn matches_line(&self, line: &str) -> bool {
        self.regex.is_match(line.trim_end_matches('\n'))
    }

    /// Run regex and builder against one line.
    ///
    /// Outer `None`: regex did not match. Inner `None`: matched, but the
    /// builder produced no problem.
    pub fn extract_from_line(&self, line: &str) -> Result<Option<Option<Box<dyn Problem>>>, Error> {
        match self.regex.captures(line.trim_end_matches('\n')) {
            Some(c) => Ok(Some((self.builder)(&c)?)),
            None => Ok(None),
        }
    }

    fn origin(&self) -> Origin {
        Origin(format!("direct regex ({})", self.regex.as_str()))
    }
}

impl Matcher for RegexLineMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        let line = lines[offset];
        if let Some(problem) = self.extract_from_line(line)? {
            let m = Match::Single(crate::SingleLineMatch {
                origin: self.origin(),
                offset,
                line: line.to_string(),
            });
            return Ok(Some((m, problem)));
        }
        Ok(None)
    }
}

/// Build a boxed [`RegexLineMatcher`] from a pattern literal and an
/// optional builder closure.
#[macro_export]
macro_rules! line_matcher {
    ($re:expr, $builder:expr) => {
        Box::new($crate::scan::RegexLineMatcher::new(
            regex::Regex::new($re).unwrap(),
            Box::new($builder),
        )) as Box<dyn $crate::scan::Matcher>
    };
    ($re:expr) => {
        $crate::line_matcher!($re, |_| Ok(None))
    };
}

/// Like [`line_matcher!`] but with `(?s)` prepended so `.` crosses
/// newlines; used for matchers run against collected multi-line blocks.
#[macro_export]
macro_rules! para_matcher {
    ($re:expr, $builder:expr) => {
        $crate::line_matcher!(concat!("(?s)", $re), $builder)
    };
    ($re:expr) => {
        $crate::line_matcher!(concat!("(?s)", $re))
    };
}

/// An ordered list of matchers tried first-hit-wins.
pub struct MatcherGroup(Vec<Box<dyn Matcher>>);

impl MatcherGroup {
    /// Assemble a group; order is priority.
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self(matchers)
    }

    /// Try every matcher at `lines[offset]`.
    ///
    /// A matcher that errors is logged and skipped; the scan never stops
    /// on a bad builder.
    pub fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Option<(Match, Option<Box<dyn Problem>>)> {
        for matcher in self.0.iter() {
            match matcher.extract_from_lines(lines, offset) {
                Ok(Some(hit)) => return Some(hit),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("matcher failed on line {}: {}", offset + 1, e);
                }
            }
        }
        None
    }
}

impl From<Vec<Box<dyn Matcher>>> for MatcherGroup {
    fn from(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self::new(matchers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[derive(Debug)]
    struct Marker(String);

    impl std::fmt::Display for Marker {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Problem for Marker {
        fn kind(&self) -> Cow<'_, str> {
            "marker".into()
        }

        fn json(&self) -> serde_json::Value {
            serde_json::json!({ "text": self.0 })
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn marker_matcher(pattern: &str) -> Box<dyn Matcher> {
        Box::new(RegexLineMatcher::new(
            Regex::new(pattern).unwrap(),
            Box::new(|c: &Captures| Ok(Some(Box::new(Marker(cap(c, 0).to_string()))))),
        ))
    }

    #[test]
    fn test_extract_from_line() {
        let matcher = marker_matcher("boom");
        let lines = vec!["fine", "it went boom", "fine"];
        let (m, p) = matcher.extract_from_lines(&lines, 1).unwrap().unwrap();
        assert_eq!(m.offset(), 1);
        assert_eq!(m.line(), "it went boom");
        assert_eq!(p.unwrap().kind(), "marker");
        assert!(matcher.extract_from_lines(&lines, 0).unwrap().is_none());
    }

    #[test]
    fn test_trailing_newline_is_stripped_for_matching() {
        let matcher = line_matcher!(r"^error: (.*)$", |c| {
            assert_eq!(cap(c, 1), "boom");
            Ok(None)
        });
        let lines = vec!["error: boom\n"];
        let (m, p) = matcher.extract_from_lines(&lines, 0).unwrap().unwrap();
        // The match retains the original line, newline included.
        assert_eq!(m.line(), "error: boom\n");
        assert!(p.is_none());
    }

    #[test]
    fn test_group_order_and_errors() {
        let failing = line_matcher!("always", |_| -> BuilderResult {
            Err(Error {
                message: "bad capture".to_string(),
            })
        });
        let group = MatcherGroup::new(vec![failing, marker_matcher("always")]);
        let lines = vec!["always fails first"];
        // The erroring matcher is skipped, the second one still fires.
        let (_, p) = group.extract_from_lines(&lines, 0).unwrap();
        assert_eq!(p.unwrap().kind(), "marker");
    }

    #[test]
    fn test_group_no_match() {
        let group = MatcherGroup::new(vec![marker_matcher("nope")]);
        assert!(group.extract_from_lines(&["nothing here"], 0).is_none());
    }

    #[test]
    fn test_line_matcher_macro_without_builder() {
        let matcher = line_matcher!("warning");
        let (m, p) = matcher
            .extract_from_lines(&["a warning line"], 0)
            .unwrap()
            .unwrap();
        assert_eq!(m.offset(), 0);
        assert!(p.is_none());
    }
}
