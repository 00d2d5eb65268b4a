//! Problems reported by autopkgtest runs.

use crate::problem_kind;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Test dependencies could not be satisfied; the payload is the parsed
/// `blame:` line, a list of `(kind, value)` pairs where kind is `deb`,
/// `arg`, `dsc` or absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutopkgtestDepsUnsatisfiable(pub Vec<(Option<String>, String)>);

impl AutopkgtestDepsUnsatisfiable {
    /// Parse an autopkgtest `blame: ...` line.
    pub fn from_blame_line(line: &str) -> Self {
        let mut entries = vec![];
        for entry in line["blame: ".len()..].split_whitespace() {
            match entry.split_once(':') {
                Some((kind @ ("deb" | "arg" | "dsc"), value)) => {
                    entries.push((Some(kind.to_string()), value.to_string()));
                }
                _ => entries.push((None, entry.to_string())),
            }
        }
        Self(entries)
    }
}

impl Display for AutopkgtestDepsUnsatisfiable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Test dependencies unsatisfiable, blame: {:?}", self.0)
    }
}

problem_kind!(AutopkgtestDepsUnsatisfiable, "badpkg");

/// The test run was aborted for exceeding its time budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopkgtestTimedOut {}

impl Display for AutopkgtestTimedOut {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Timed out")
    }
}

problem_kind!(AutopkgtestTimedOut, "timed-out");

/// `XDG_RUNTIME_DIR` was not set in the test environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XDGRunTimeNotSet {}

impl Display for XDGRunTimeNotSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "XDG_RUNTIME_DIR is not set")
    }
}

problem_kind!(XDGRunTimeNotSet, "xdg-runtime-dir-not-set");

/// The testbed itself failed, with the reason autopkgtest reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopkgtestTestbedFailure {
    /// Reason text from the `testbed failure:` event.
    pub reason: String,
}

impl Display for AutopkgtestTestbedFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Testbed failure: {}", self.reason)
    }
}

problem_kind!(AutopkgtestTestbedFailure, "testbed-failure");

/// The schroot session backing the testbed disappeared mid-run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopkgtestDepChrootDisappeared {}

impl Display for AutopkgtestDepChrootDisappeared {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Chroot for building dependencies disappeared")
    }
}

problem_kind!(AutopkgtestDepChrootDisappeared, "testbed-chroot-disappeared");

/// autopkgtest rejected the package under test as erroneous.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopkgtestErroneousPackage {
    /// Reason text from the `erroneous package:` event.
    pub reason: String,
}

impl Display for AutopkgtestErroneousPackage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Erroneous package: {}", self.reason)
    }
}

problem_kind!(AutopkgtestErroneousPackage, "erroneous-package");

/// A test failed only because it wrote to stderr.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopkgtestStderrFailure {
    /// The offending stderr line.
    pub stderr_line: String,
}

impl Display for AutopkgtestStderrFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "output on stderr: {}", self.stderr_line)
    }
}

problem_kind!(AutopkgtestStderrFailure, "stderr-output");

/// Setting up the testbed failed while running a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopkgtestTestbedSetupFailure {
    /// The command that failed.
    pub command: String,
    /// Its exit status.
    pub exit_status: i64,
    /// Captured stderr.
    pub error: String,
}

impl Display for AutopkgtestTestbedSetupFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error setting up testbed: {} failed ({}): {}",
            self.command, self.exit_status, self.error
        )
    }
}

problem_kind!(AutopkgtestTestbedSetupFailure, "testbed-setup-failure");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_blame_line() {
        let p = AutopkgtestDepsUnsatisfiable::from_blame_line(
            "blame: arg:/build/foo_1.deb deb:foo /build/foo_1.dsc",
        );
        assert_eq!(
            p.0,
            vec![
                (Some("arg".to_string()), "/build/foo_1.deb".to_string()),
                (Some("deb".to_string()), "foo".to_string()),
                (None, "/build/foo_1.dsc".to_string()),
            ]
        );
    }

    #[test]
    fn test_badpkg_json_round_trip() {
        use crate::Problem;
        let p = AutopkgtestDepsUnsatisfiable(vec![(Some("deb".to_string()), "foo".to_string())]);
        let rebuilt = crate::problem_from_json("badpkg", p.json()).unwrap();
        assert_eq!(&*rebuilt, &p as &dyn Problem);
    }
}
