//! Matchers that need more than one line of context.

use crate::lines::LineWindow;
use crate::problems::common::*;
use crate::scan::{problem, Error, Matcher, MatcherGroup};
use crate::{line_matcher, Match, MultiLineMatch, Origin, Problem, SingleLineMatch};
use lazy_regex::{regex_captures, regex_is_match};

use super::file_not_found_maybe_executable;

lazy_static::lazy_static! {
    static ref CONFIGURE_TAIL_MATCHERS: MatcherGroup = MatcherGroup::new(vec![
        line_matcher!(r"^\s*Unable to find (.*) \(http(.*)\)", |c| problem(MissingVagueDependency {
            name: crate::scan::cap(c, 1).to_string(),
            url: Some(crate::scan::cap(c, 2).to_string()),
            minimum_version: None,
            current_version: None,
        })),
        line_matcher!(r"^\s*Unable to find (.*)\.", |c| problem(
            MissingVagueDependency::simple(crate::scan::cap(c, 1))
        )),
    ]);
}

/// `configure: error:` with the actual message on the following lines.
#[derive(Debug, Clone)]
pub struct ConfigureErrorBlockMatcher;

impl Matcher for ConfigureErrorBlockMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if lines[offset].trim_end_matches(['\r', '\n']) != "configure: error:" {
            return Ok(None);
        }

        let mut relevant = vec![];
        for (j, line) in lines.enumerate_forward(None).skip(offset + 1) {
            if line.trim().is_empty() {
                continue;
            }
            relevant.push(j);
            if let Some(hit) = CONFIGURE_TAIL_MATCHERS.extract_from_lines(lines, j) {
                return Ok(Some(hit));
            }
        }

        if relevant.is_empty() {
            return Ok(None);
        }
        let m = Match::multi_from_lines(lines, relevant, Some("configure"));
        Ok(Some((m, None)))
    }
}

/// The cpanm hint block listing Perl modules that are not available.
#[derive(Debug, Clone)]
pub struct PerlMissingModulesBlockMatcher;

impl Matcher for PerlMissingModulesBlockMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if lines[offset].trim_end_matches(['\r', '\n'])
            != "# The following modules are not available."
        {
            return Ok(None);
        }
        if offset + 2 >= lines.len()
            || lines[offset + 1].trim_end_matches(['\r', '\n'])
                != "# `perl Makefile.PL | cpanm` will install them:"
        {
            return Ok(None);
        }

        let m = Match::multi_from_lines(
            lines,
            vec![offset, offset + 1, offset + 2],
            Some("perl line match"),
        );
        let p = MissingPerlModule::simple(lines[offset + 2].trim());
        Ok(Some((m, Some(Box::new(p)))))
    }
}

/// An R vignette processing failure, diagnosed from the line after the
/// header.
#[derive(Debug, Clone)]
pub struct VignetteErrorMatcher;

lazy_static::lazy_static! {
    static ref VIGNETTE_TAIL_MATCHERS: MatcherGroup = MatcherGroup::new(vec![
        line_matcher!(r"^([^ ]+) is not available", |c| problem(
            MissingVagueDependency::simple(crate::scan::cap(c, 1)))),
        line_matcher!(r"^The package `(.*)` is required\.", |c| problem(
            MissingRPackage::simple(crate::scan::cap(c, 1)))),
        line_matcher!(r"^Package '(.*)' required.*", |c| problem(
            MissingRPackage::simple(crate::scan::cap(c, 1)))),
        line_matcher!(r"^The '(.*)' package must be installed.*", |c| problem(
            MissingRPackage::simple(crate::scan::cap(c, 1)))),
    ]);
}

impl Matcher for VignetteErrorMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if !regex_is_match!(
            r"^Error: processing vignette '(.*)' failed with diagnostics:",
            lines[offset].trim_end_matches('\n')
        ) || offset + 1 >= lines.len()
        {
            return Ok(None);
        }

        if let Some(hit) = VIGNETTE_TAIL_MATCHERS.extract_from_lines(lines, offset + 1) {
            return Ok(Some(hit));
        }

        Ok(Some((
            Match::single_from_lines(lines, offset + 1, Some("vignette line match")),
            None,
        )))
    }
}

/// cabal's "Encountered missing or private dependencies:" block.
#[derive(Debug, Clone)]
pub struct HaskellMissingDependenciesMatcher;

impl Matcher for HaskellMissingDependenciesMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if !regex_is_match!(
            r"(.*): Encountered missing or private dependencies:",
            lines[offset].trim_end_matches('\n')
        ) {
            return Ok(None);
        }

        let mut deps = vec![];
        let mut offsets = vec![offset];
        for (j, line) in lines.enumerate_forward(None).skip(offset + 1) {
            if line.trim().is_empty() {
                break;
            }
            if let Some((dep, _)) = line.trim().split_once(',') {
                deps.push(dep.to_string());
            } else {
                deps.push(line.trim().to_string());
            }
            offsets.push(j);
        }
        let m = Match::multi_from_lines(lines, offsets, Some("haskell dependencies"));
        Ok(Some((m, Some(Box::new(MissingHaskellDependencies { deps })))))
    }
}

/// `setup.py` rejecting a subcommand; only meaningful below the usage
/// banner.
#[derive(Debug, Clone)]
pub struct SetupPyCommandMissingMatcher;

impl Matcher for SetupPyCommandMissingMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        let command = match regex_captures!(r"error: invalid command '(.*)'", lines[offset].trim())
        {
            Some((_, command)) => command,
            None => return Ok(None),
        };

        for j in (offset.saturating_sub(20)..offset).rev() {
            if regex_is_match!(
                r"usage: setup.py \[global_opts\] cmd1 \[cmd1_opts\] \[cmd2 \[cmd2_opts\] \.\.\.\]",
                lines[j].trim_end_matches('\n')
            ) {
                let m = Match::single_from_lines(lines, offset, Some("setup.py"));
                let p = MissingSetupPyCommand {
                    command: command.to_string(),
                };
                return Ok(Some((m, Some(Box::new(p)))));
            }
        }

        log::warn!("Unable to find setup.py usage line");
        Ok(None)
    }
}

/// An unexpanded autoconf macro surfacing as a shell syntax error.
#[derive(Debug, Clone)]
pub struct AutoconfUnexpectedMacroMatcher;

impl Matcher for AutoconfUnexpectedMacroMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if !regex_is_match!(
            r"\./configure: line [0-9]+: syntax error near unexpected token `.+'",
            lines[offset].trim_end_matches('\n')
        ) || offset + 1 >= lines.len()
        {
            return Ok(None);
        }

        let m = Match::Multi(MultiLineMatch::new(
            Origin("autoconf unexpected macro".into()),
            vec![offset, offset + 1],
            vec![lines[offset].to_string(), lines[offset + 1].to_string()],
        ));

        let problem = regex_captures!(
            r"^\./configure: line [0-9]+: `[\s\t]*([A-Z0-9_]+)\(.*",
            lines[offset + 1].trim_end_matches('\n')
        )
        .map(|(_, name)| {
            Box::new(MissingAutoconfMacro {
                r#macro: name.to_string(),
                need_rebuild: true,
            }) as Box<dyn Problem>
        });

        Ok(Some((m, problem)))
    }
}

/// A Python `FileNotFoundError` traceback tail; the two-lines-back
/// context decides between a missing command and a missing file.
#[derive(Debug, Clone)]
pub struct PythonFileNotFoundErrorMatcher;

impl Matcher for PythonFileNotFoundErrorMatcher {
    fn extract_from_lines(
        &self,
        lines: &[&str],
        offset: usize,
    ) -> Result<Option<(Match, Option<Box<dyn Problem>>)>, Error> {
        if let Some((_, name)) = regex_captures!(
            r"^(?:E  +)?FileNotFoundError: \[Errno 2\] No such file or directory: '(.*)'",
            lines[offset].trim_end_matches('\n')
        ) {
            let m = Match::Single(SingleLineMatch {
                origin: Origin("python".into()),
                offset,
                line: lines[offset].to_string(),
            });
            let problem = if offset >= 2 && lines[offset - 2].contains("subprocess") {
                Some(Box::new(MissingCommand::new(name)) as Box<dyn Problem>)
            } else {
                file_not_found_maybe_executable(name)?
            };
            return Ok(Some((m, problem)));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perl_block() {
        let lines = vec![
            "# The following modules are not available.",
            "# `perl Makefile.PL | cpanm` will install them:",
            "  Test::More",
        ];
        let (m, p) = PerlMissingModulesBlockMatcher
            .extract_from_lines(&lines, 0)
            .unwrap()
            .unwrap();
        assert_eq!(m.offsets(), vec![0, 1, 2]);
        assert_eq!(
            &*p.unwrap(),
            &MissingPerlModule::simple("Test::More") as &dyn Problem
        );
    }

    #[test]
    fn test_python_file_not_found_subprocess() {
        let lines = vec![
            "  File \"/usr/lib/python3.9/subprocess.py\", line 1702, in _execute_child",
            "    raise child_exception_type(errno_num, err_msg, err_filename)",
            "FileNotFoundError: [Errno 2] No such file or directory: 'svgtopng'",
        ];
        let (m, p) = PythonFileNotFoundErrorMatcher
            .extract_from_lines(&lines, 2)
            .unwrap()
            .unwrap();
        assert_eq!(m.lineno(), 3);
        assert_eq!(&*p.unwrap(), &MissingCommand::new("svgtopng") as &dyn Problem);
    }

    #[test]
    fn test_python_file_not_found_absolute() {
        let lines = vec![
            "Traceback (most recent call last):",
            "  File \"setup.py\", line 5, in <module>",
            "    with open('/etc/widget.conf') as f:",
            "FileNotFoundError: [Errno 2] No such file or directory: '/etc/widget.conf'",
        ];
        let (_, p) = PythonFileNotFoundErrorMatcher
            .extract_from_lines(&lines, 3)
            .unwrap()
            .unwrap();
        assert_eq!(
            &*p.unwrap(),
            &MissingFile::new("/etc/widget.conf".into()) as &dyn Problem
        );
    }

    #[test]
    fn test_setup_py_command() {
        let lines = vec![
            "usage: setup.py [global_opts] cmd1 [cmd1_opts] [cmd2 [cmd2_opts] ...]",
            "   or: setup.py --help [cmd1 cmd2 ...]",
            "error: invalid command 'test'",
        ];
        let (m, p) = SetupPyCommandMissingMatcher
            .extract_from_lines(&lines, 2)
            .unwrap()
            .unwrap();
        assert_eq!(m.lineno(), 3);
        assert_eq!(
            &*p.unwrap(),
            &MissingSetupPyCommand {
                command: "test".to_string()
            } as &dyn Problem
        );
    }

    #[test]
    fn test_haskell_dependencies() {
        let lines = vec![
            "buildable: Encountered missing or private dependencies:",
            "    base >=4 && <5,",
            "",
        ];
        let (m, p) = HaskellMissingDependenciesMatcher
            .extract_from_lines(&lines, 0)
            .unwrap()
            .unwrap();
        assert_eq!(m.offsets(), vec![0, 1]);
        assert_eq!(
            &*p.unwrap(),
            &MissingHaskellDependencies {
                deps: vec!["base >=4 && <5".to_string()]
            } as &dyn Problem
        );
    }
}
