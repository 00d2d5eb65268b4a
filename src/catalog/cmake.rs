//! The CMake error-block matcher.
//!
//! CMake reports errors as an indented block below a `CMake Error at
//! path:lineno (func):` header. The block is collected, dedented and run
//! through its own ordered catalogue of DOTALL regexes.

use crate::problems::common::*;
use crate::scan::{cap, problem, Error, Matcher, MatcherGroup};
use crate::{para_matcher, Match, Problem};

fn collect_error_block<'a>(lines: &'a [&'a str], anchor: usize) -> (Vec<usize>, String) {
    let mut offsets = vec![anchor];
    let mut block: Vec<&str> = vec![];

    for (j, line) in lines.iter().enumerate().skip(anchor + 1) {
        let stripped = line.trim_end_matches('\n');
        if !stripped.is_empty() && !stripped.starts_with(' ') {
            break;
        }
        block.push(stripped);
        offsets.push(j);
    }

    // Trailing blank lines are not part of the block.
    while block.last().is_some_and(|l| l.trim().is_empty()) {
        block.pop();
        offsets.pop();
    }

    (offsets, textwrap::dedent(&block.join("\n")))
}

lazy_static::lazy_static! {
    static ref CMAKE_BLOCK_MATCHERS: MatcherGroup = MatcherGroup::new(vec![
        para_matcher!(r"Could NOT find (.*) \(missing:\s(.*)\)\s\(found\ssuitable\sversion\s.*",
            |c| problem(MissingCMakeComponents {
                name: cap(c, 1).to_string(),
                components: cap(c, 2).split_whitespace().map(|s| s.to_string()).collect(),
            })),
        para_matcher!(r"\s*--\s+Package '(.*)', required by '(.*)', not found",
            |c| problem(MissingPkgConfig::simple(cap(c, 1)))),
        para_matcher!(r#"Could not find a package configuration file provided by\s"(.*)" \(requested\sversion\s(.*)\)\swith\sany\s+of\s+the\s+following\snames:\n\n(  .*\n)+\n.*$"#,
            |c| problem(MissingCMakeConfig {
                name: cap(c, 1).to_string(),
                version: Some(cap(c, 2).to_string()),
            })),
        para_matcher!(r"Could NOT find (.*) \(missing: (.*)\)",
            |c| problem(MissingCMakeComponents {
                name: cap(c, 1).to_string(),
                components: cap(c, 2).split_whitespace().map(|s| s.to_string()).collect(),
            })),
        para_matcher!(
            r#"The (.+) compiler\n\n  "(.*)"\n\nis not able to compile a simple test program\.\n\nIt fails with the following output:\n\n(.*)\n\nCMake will not be able to correctly generate this project\.$"#,
            |c| {
                let output = textwrap::dedent(cap(c, 3));
                let output_lines: Vec<&str> = output.split_inclusive('\n').collect();
                let (_, error) = super::find_build_failure_description(&output_lines);
                Ok(error)
            }),
        para_matcher!(
            r#"Could NOT find (.*): Found unsuitable version "(.*)",\sbut\srequired\sis\sexact version "(.*)" \(found\s(.*)\)"#,
            |c| problem(CMakeNeedExactVersion {
                package: cap(c, 1).to_string(),
                version_found: cap(c, 2).to_string(),
                exact_version_needed: cap(c, 3).to_string(),
                path: cap(c, 4).into(),
            })),
        para_matcher!(r"(.*) couldn't be found \(missing: .*_LIBRARIES .*_INCLUDE_DIR\)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(
            r#"Could NOT find (.*): Found unsuitable version "(.*)",\sbut\srequired\sis\sat\sleast\s"(.*)" \(found\s(.*)\)"#,
            |c| problem(MissingPkgConfig::new(cap(c, 1), Some(cap(c, 3).to_string())))),
        para_matcher!(
            r#"The imported target "(.*)" references the file\n\n\s*"(.*)"\n\nbut this file does not exist\.(.*)"#,
            |c| problem(MissingFile::new(cap(c, 2).into()))),
        para_matcher!(
            r#"Could not find a configuration file for package "(.*)"\sthat\sis\scompatible\swith\srequested\sversion\s"(.*)"\."#,
            |c| problem(MissingCMakeConfig {
                name: cap(c, 1).to_string(),
                version: Some(cap(c, 2).to_string()),
            })),
        para_matcher!(
            r#".*Could not find a package configuration file provided by "(.*)"\s\(requested\sversion\s(.+\))\swith\sany\sof\sthe\sfollowing\snames:\n\n(  .*\n)+\n.*$"#,
            |c| problem(MissingCMakeConfig {
                name: cap(c, 1).to_string(),
                version: Some(cap(c, 2).to_string()),
            })),
        para_matcher!(
            r#".*Could not find a package configuration file provided by "(.*)"\s+with\s+any\s+of\s+the\s+following\s+names:\n\n(  .*\n)+\n.*$"#,
            |c| problem(CMakeFilesMissing {
                filenames: cap(c, 2).split_whitespace().map(|s| s.to_string()).collect(),
                version: None,
            })),
        para_matcher!(
            r#"No CMAKE_(.*)_COMPILER could be found.\n\nTell CMake where to find the compiler by setting either\sthe\senvironment\svariable\s"(.*)"\sor\sthe\sCMake\scache\sentry\sCMAKE_(.*)_COMPILER\sto\sthe\sfull\spath\sto\sthe\scompiler,\sor\sto\sthe\scompiler\sname\sif\sit\sis\sin\sthe\sPATH\."#,
            |c| problem(MissingCommand::new(cap(c, 1).to_lowercase()))),
        para_matcher!(r#"file INSTALL cannot find\s"(.*)"\."#,
            |c| problem(MissingFile::new(cap(c, 1).into()))),
        para_matcher!(r#"file INSTALL cannot copy file\n"(.*)"\sto\s"(.*)":\sNo space left on device\."#,
            |_| problem(NoSpaceOnDevice {})),
        para_matcher!(r"patch: \*\*\*\* write error : No space left on device",
            |_| problem(NoSpaceOnDevice {})),
        para_matcher!(r".*\(No space left on device\)", |_| problem(NoSpaceOnDevice {})),
        para_matcher!(r#"file INSTALL cannot copy file\n"(.*)"\nto\n"(.*)"\."#),
        para_matcher!(
            r"Missing (.*)\.  Either your\nlib(.*) version is too old, or lib(.*) wasn't found in the place you\nsaid.",
            |c| problem(MissingLibrary { library: cap(c, 1).to_string() })),
        para_matcher!(r"need (.*) of version (.*)",
            |c| problem(MissingVagueDependency {
                name: cap(c, 1).to_string(),
                minimum_version: Some(cap(c, 2).trim().to_string()),
                url: None,
                current_version: None,
            })),
        para_matcher!(r"\*\*\* (.*) is required to build (.*)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"\[([^ ]+)\] not found", |c| problem(
            MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"([^ ]+) not found", |c| problem(
            MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"error: could not find git .*", |_| problem(MissingCommand::new("git"))),
        para_matcher!(r"Could not find '(.*)' executable[!,].*",
            |c| problem(MissingCommand::new(cap(c, 1)))),
        para_matcher!(r"Could not find (.*)_STATIC_LIBRARIES using the following names: ([a-zA-z0-9_.]+)",
            |c| problem(MissingStaticLibrary {
                library: cap(c, 1).to_string(),
                filename: cap(c, 2).to_string(),
            })),
        para_matcher!("include could not find (requested|load) file:\n\n  ([^\n]*)",
            |c| {
                let mut path = cap(c, 2).to_string();
                if !path.ends_with(".cmake") {
                    path.push_str(".cmake");
                }
                problem(CMakeFilesMissing { filenames: vec![path], version: None })
            }),
        para_matcher!(r"(.*) and (.*) are required",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Please check your (.*) installation",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Python module (.*) not found!",
            |c| problem(MissingPythonModule::simple(cap(c, 1)))),
        para_matcher!(r"\s*could not find ([^\s]+)$",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Please install (.*) before installing (.*)\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Please get (.*) from (www\..*)",
            |c| problem(MissingVagueDependency {
                name: cap(c, 1).to_string(),
                url: Some(cap(c, 2).to_string()),
                minimum_version: None,
                current_version: None,
            })),
        para_matcher!(r#"Found unsuitable Qt version "" from NOTFOUND, this code requires Qt 4.x"#,
            |_| problem(MissingQt {})),
        para_matcher!(r"(.*) executable not found! Please install (.*)\.",
            |c| problem(MissingCommand::new(cap(c, 1)))),
        para_matcher!(r"(.*) tool not found", |c| problem(MissingCommand::new(cap(c, 1)))),
        para_matcher!(r"--   Requested '(.*) >= (.*)' but version of (.*) is (.*)",
            |c| problem(MissingPkgConfig::new(cap(c, 1), Some(cap(c, 2).to_string())))),
        para_matcher!(r"--   No package '(.*)' found",
            |c| problem(MissingPkgConfig::simple(cap(c, 1)))),
        para_matcher!(r"([^ ]+) library not found\.",
            |c| problem(MissingLibrary { library: cap(c, 1).to_string() })),
        para_matcher!(r"Please install ([^ ]+) so that it is on the PATH and try again\.",
            super::command_missing),
        para_matcher!(r"-- Unable to find git\.  Setting git revision to 'unknown'\.",
            |_| problem(MissingCommand::new("git"))),
        para_matcher!(r"(.*) must be installed before configuration & building can proceed",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"(.*) development files not found\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r".* but no (.*) dev libraries found",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Failed to find (.*) \(missing: .*\)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Couldn't find ([^ ]+) development files\..*",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Could not find required (.*) package!",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Cannot find (.*), giving up\. .*",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Cannot find (.*)\. (.*) is required for (.*)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"The development\sfiles\sfor\s(.*)\sare\srequired\sto\sbuild (.*)\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Required library (.*) not found\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"(.*) requires (.*) ([0-9].*) or newer. See (https://.*)\s*",
            |c| problem(MissingVagueDependency {
                name: cap(c, 2).to_string(),
                minimum_version: Some(cap(c, 3).to_string()),
                url: Some(cap(c, 4).to_string()),
                current_version: None,
            })),
        para_matcher!(r"(.*) requires (.*) ([0-9].*) or newer.\s*",
            |c| problem(MissingVagueDependency {
                name: cap(c, 2).to_string(),
                minimum_version: Some(cap(c, 3).to_string()),
                url: None,
                current_version: None,
            })),
        para_matcher!(r"(.*) requires (.*) to build",
            |c| problem(MissingVagueDependency::simple(cap(c, 2)))),
        para_matcher!(r"(.*) library missing",
            |c| problem(MissingLibrary { library: cap(c, 1).to_string() })),
        para_matcher!(r"(.*) requires (.*)",
            |c| problem(MissingVagueDependency::simple(cap(c, 2)))),
        para_matcher!(r"Could not find ([A-Za-z-]+)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"(.+) is required for (.*)\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"No (.+) version could be found in your system\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"([^ ]+) >= (.*) is required",
            |c| problem(MissingVagueDependency {
                name: cap(c, 1).to_string(),
                minimum_version: Some(cap(c, 2).to_string()),
                url: None,
                current_version: None,
            })),
        para_matcher!(r"\s*([^ ]+) is required",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"([^ ]+) binary not found!",
            |c| problem(MissingCommand::new(cap(c, 1)))),
        para_matcher!(r"error: could not find git for clone of .*",
            |_| problem(MissingCommand::new("git"))),
        para_matcher!(r"Did not find ([^\s]+)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Could not find the ([^ ]+) external dependency\.",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
        para_matcher!(r"Couldn't find (.*)",
            |c| problem(MissingVagueDependency::simple(cap(c, 1)))),
    ]);
}

/// Matches a CMake error header and classifies the indented block below
/// it.
#[derive(Debug, Clone)]
pub struct CMakeErrorBlockMatcher;

impl Matcher for CMakeErrorBlockMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if lazy_regex::regex_captures!(
            r"CMake (Error|Warning) at (.+):([0-9]+) \((.*)\):",
            lines[offset].trim_end_matches('\n')
        )
        .is_none()
        {
            return Ok(None);
        }

        let (offsets, block) = collect_error_block(lines, offset);
        let m = Match::multi_from_lines(lines, offsets, Some("CMake"));

        let problem = CMAKE_BLOCK_MATCHERS
            .extract_from_lines(&[block.as_str()], 0)
            .and_then(|(_, p)| p);

        Ok(Some((m, problem)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Problem;

    #[test]
    fn test_missing_components_with_version_hint() {
        let lines = vec![
            "CMake Error at /usr/share/cmake-3.18/Modules/FindPackageHandleStandardArgs.cmake:165 (message):\n",
            "  Could NOT find Boost (missing: program_options filesystem) (found suitable\n",
            "  version \"1.74.0\", minimum required is \"1.55.0\")\n",
            "\n",
        ];
        let (m, p) = CMakeErrorBlockMatcher
            .extract_from_lines(&lines, 0)
            .unwrap()
            .unwrap();
        assert_eq!(m.offsets(), vec![0, 1, 2]);
        let expected = MissingCMakeComponents {
            name: "Boost".to_string(),
            components: vec!["program_options".to_string(), "filesystem".to_string()],
        };
        assert_eq!(&*p.unwrap(), &expected as &dyn Problem);
    }

    #[test]
    fn test_not_anchored_elsewhere() {
        let lines = vec!["-- Configuring done\n"];
        assert!(CMakeErrorBlockMatcher
            .extract_from_lines(&lines, 0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_file_install_no_space() {
        let lines = vec![
            "CMake Error at cmake_install.cmake:46 (file):\n",
            "  file INSTALL cannot copy file\n",
            "  \"/build/foo/src/foo\" to \"/usr/bin/foo\": No space left on device.\n",
        ];
        let (_, p) = CMakeErrorBlockMatcher
            .extract_from_lines(&lines, 0)
            .unwrap()
            .unwrap();
        assert_eq!(&*p.unwrap(), &NoSpaceOnDevice {} as &dyn Problem);
    }
}
