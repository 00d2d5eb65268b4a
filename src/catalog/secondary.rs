//! Patterns that hint at an error without identifying its cause.
//!
//! These produce a location but no problem value; the scanner only
//! consults them after every primary matcher has come up empty.

use crate::lines::LineWindow;
use crate::{Match, Origin, SingleLineMatch};

macro_rules! hint {
    ($re:expr) => {
        fancy_regex::Regex::new($re).unwrap()
    };
}

lazy_static::lazy_static! {
    static ref SECONDARY_MATCHERS: Vec<fancy_regex::Regex> = vec![
    hint!(r"E: pybuild pybuild:[0-9]+: test: plugin [^ ]+ failed with:"),
    hint!(r"[^:]+: error: (.*)"),
    hint!(r"[^:]+:[0-9]+: error: (.*)"),
    hint!(r"[^:]+:[0-9]+:[0-9]+: error: (.*)"),
    hint!(r"error TS[0-9]+: (.*)"),

    hint!(r"mount: .*: mount failed: Operation not permitted\."),

    hint!(r"  [0-9]+:[0-9]+\s+error\s+.+"),

    hint!(r"fontmake: Error: In '(.*)': (.*)"),

    hint!(r"#   Failed test at t\/.*\.t line [0-9]+\."),

    hint!(r"Gradle build daemon disappeared unexpectedly \(it may have been killed or may have crashed\)"),

    // ocaml
    hint!(r"\*\*\* omake error:"),
    hint!(r".*ocamlc.*: OCam has been configured with -force-safe-string: -unsafe-string is not available\."),

    // latex
    hint!(r"\! LaTeX Error: .*"),

    hint!(r"Killed"),

    // Java
    hint!(r#"Exception in thread "(.*)" (.*): (.*);"#),
    hint!(r"error: Unrecognized option: '.*'"),
    hint!(r"Segmentation fault"),
    hint!(r"\[ERROR\] (.*\.java):\[[0-9]+,[0-9]+\] (.*)"),
    hint!(r"make: \*\*\* No targets specified and no makefile found\.  Stop\."),
    hint!(r"make\[[0-9]+\]: \*\*\* No targets specified and no makefile found\.  Stop\."),
    hint!(r"make: \*\*\* No rule to make target '(.*)'\.  Stop\."),
    hint!(r"make\[[0-9]+\]: (.*): No such file or directory"),
    hint!(r"make\[[0-9]+\]: \*\*\* \[.*:[0-9]+: .*\] Segmentation fault"),
    hint!(r"make\[[0-9]+\]: \*\*\* No rule to make target '(?!maintainer-clean)(?!clean)(.*)'\.  Stop\."),
    hint!(r".*:[0-9]+: \*\*\* empty variable name.  Stop."),
    hint!(r"error: can't copy '(.*)': doesn't exist or not a regular file"),
    hint!(r"error: ([0-9]+) test executed, ([0-9]+) fatal tests failed, "),
    hint!(r"([0-9]+) nonfatal test failed\."),
    hint!(r".*\.rst:toctree contains ref to nonexisting file '.*'"),
    hint!(r".*\.rst:[0-9]+:term not in glossary: .*"),
    hint!(r"Try adding AC_PREREQ\(\[(.*)\]\) to your configure\.ac\."),
    // Erlang
    hint!(r"  (.*_test): (.+)\.\.\.\*failed\*"),
    hint!(r"(.*\.erl):[0-9]+:[0-9]+: erlang:.*"),
    // Clojure
    hint!(r"Could not locate (.*) or (.*) on classpath\."),
    // QMake
    hint!(r"Project ERROR: .*"),
    // pdflatex
    hint!(r"\!  ==> Fatal error occurred, no output PDF file produced\!"),
    // latex
    hint!(r"\! Undefined control sequence\."),
    hint!(r"\! Emergency stop\."),
    hint!(r"\!pdfTeX error: pdflatex: fwrite\(\) failed"),
    // inkscape
    hint!(r"Unknown option (?!.*ignoring.*)"),
    // CTest
    hint!(r"not ok [0-9]+ .*"),
    hint!(r"Errors while running CTest"),
    hint!(r"dh_auto_install: error: .*"),
    hint!(r"dh_quilt_patch: error: (.*)"),
    hint!(r"dh.*: Aborting due to earlier error"),
    hint!(r"dh.*: unknown option or error during option parsing; aborting"),
    hint!(r"Could not import extension .* \(exception: .*\)"),
    hint!(r"configure.ac:[0-9]+: error: (.*)"),
    hint!(r"Reconfigure the source tree (via './config' or 'perl Configure'), please."),
    hint!(r"dwz: Too few files for multifile optimization"),
    hint!(r"\[CJM/MatchManifest\] Aborted because of MANIFEST mismatch"),
    hint!(r"dh_dwz: dwz -q -- .* returned exit code [0-9]+"),
    hint!(r"help2man: can't get `-?-help' info from .*"),
    hint!(r"[^:]+: line [0-9]+:\s+[0-9]+ Segmentation fault.*"),
    hint!(r"dpkg-gencontrol: error: (.*)"),
    hint!(r".*:[0-9]+:[0-9]+: (error|ERROR): (.*)"),
    hint!(r".*[.]+FAILED .*"),
    hint!(r"FAIL: (.*)"),
    hint!(r"FAIL\!  : (.*)"),
    hint!(r"\s*FAIL (.*) \(.*\)"),
    hint!(r"FAIL\s+(.*) \[.*\] ?"),
    hint!(r"([0-9]+)% tests passed, ([0-9]+) tests failed out of ([0-9]+)"),
    hint!(r"TEST FAILURE"),
    hint!(r"make\[[0-9]+\]: \*\*\* \[.*\] Error [0-9]+"),
    hint!(r"make\[[0-9]+\]: \*\*\* \[.*\] Aborted"),
    hint!(r"exit code=[0-9]+: .*"),
    hint!(r"chmod: cannot access '.*': .*"),
    hint!(r"dh_autoreconf: autoreconf .* returned exit code [0-9]+"),
    hint!(r"make: \*\*\* \[.*\] Error [0-9]+"),
    hint!(r".*:[0-9]+: \*\*\* missing separator\.  Stop\."),
    hint!(r"[0-9]+ tests: [0-9]+ ok, [0-9]+ failure\(s\), [0-9]+ test\(s\) skipped"),
    hint!(r"\*\*Error:\*\* (.*)"),
    hint!(r"^Error: (.*)"),
    hint!(r"Failed [0-9]+ tests? out of [0-9]+, [0-9.]+% okay."),
    hint!(r"Failed [0-9]+\/[0-9]+ test programs. [0-9]+/[0-9]+ subtests failed."),
    hint!(r"Original error was: (.*)"),
    hint!(r"-- Error \(.*\.R:[0-9]+:[0-9]+\): \(.*\) [-]*"),
    hint!(r"^Error \[ERR_.*\]: .*"),
    hint!(r"^FAILED \(.*\)"),
    hint!(r"FAILED .*"),
    // Random Python errors
    hint!("^(E  +)?(SyntaxError|TypeError|ValueError|AttributeError|NameError|django.core.exceptions..*|RuntimeError|subprocess.CalledProcessError|testtools.matchers._impl.MismatchError|PermissionError|IndexError|TypeError|AssertionError|IOError|ImportError|SerialException|OSError|qtawesome.iconic_font.FontError|redis.exceptions.ConnectionError|builtins.OverflowError|ArgumentError|httptools.parser.errors.HttpParserInvalidURLError|HypothesisException|SSLError|KeyError|Exception|rnc2rng.parser.ParseError|pkg_resources.UnknownExtra|tarfile.ReadError|numpydoc.docscrape.ParseError|distutils.errors.DistutilsOptionError|datalad.support.exceptions.IncompleteResultsError|AssertionError|Cython.Compiler.Errors.CompileError|UnicodeDecodeError|UnicodeEncodeError): .*"),
    // Rust
    hint!(r"error\[E[0-9]+\]: .*"),
    hint!("^E   DeprecationWarning: .*"),
    hint!("^E       fixture '(.*)' not found"),
    // Rake
    hint!(r"[0-9]+ runs, [0-9]+ assertions, [0-9]+ failures, [0-9]+ errors, [0-9]+ skips"),
    // Node
    hint!(r"# failed [0-9]+ of [0-9]+ tests"),
    // Pytest
    hint!(r"(.*).py:[0-9]+: AssertionError"),
    hint!(r"============================ no tests ran in ([0-9.]+)s ============================="),
    // Perl
    hint!(r"  Failed tests:  [0-9-]+"),
    hint!(r"Failed (.*\.t): output changed"),
    // Go
    hint!(r"no packages to test"),
    hint!("FAIL\t(.*)\t[0-9.]+s"),
    hint!(r".*.go:[0-9]+:[0-9]+: (?!note:).*"),
    hint!(r"can't load package: package \.: no Go files in /<<PKGBUILDDIR>>/(.*)"),
    // Ld
    hint!(r"\/usr\/bin\/ld: cannot open output file (.*): No such file or directory"),
    hint!(r"configure: error: (.+)"),
    hint!(r"config.status: error: (.*)"),
    hint!(r"E: Build killed with signal TERM after ([0-9]+) minutes of inactivity"),
    hint!(r"    \[javac\] [^: ]+:[0-9]+: error: (.*)"),
    hint!(r"1\) TestChannelFeature: ([^:]+):([0-9]+): assert failed"),
    hint!(r"cp: target '(.*)' is not a directory"),
    hint!(r"cp: cannot create regular file '(.*)': No such file or directory"),
    hint!(r"couldn't determine home directory at (.*)"),
    hint!(r"ln: failed to create symbolic link '(.*)': File exists"),
    hint!(r"ln: failed to create symbolic link '(.*)': No such file or directory"),
    hint!(r"ln: failed to create symbolic link '(.*)': Permission denied"),
    hint!(r"ln: invalid option -- .*"),
    hint!(r"mkdir: cannot create directory [‘'](.*)['’]: No such file or directory"),
    hint!(r"mkdir: cannot create directory [‘'](.*)['’]: File exists"),
    hint!(r"mkdir: missing operand"),
    hint!(r"rmdir: failed to remove '.*': No such file or directory"),
    hint!(r"Fatal error: .*"),
    hint!("Fatal Error: (.*)"),
    hint!(r"Alert: (.*)"),
    hint!(r#"ERROR: Test "(.*)" failed. Exiting."#),
    // scons
    hint!(r"ERROR: test\(s\) failed in (.*)"),
    hint!(r"./configure: line [0-9]+: syntax error near unexpected token `.*'"),
    hint!(r"scons: \*\*\* \[.*\] ValueError : unsupported pickle protocol: .*"),
    // yarn
    hint!(r"ERROR: There are no scenarios; must have at least one."),
    // perl
    hint!(r"Execution of (.*) aborted due to compilation errors."),
    // Mocha
    hint!(r"     AssertionError \[ERR_ASSERTION\]: Missing expected exception."),
    // lt (C++)
    hint!(r".*: .*:[0-9]+: .*: Assertion `.*' failed."),
    hint!(r"(.*).xml: FAILED:"),
    hint!(r" BROKEN .*"),
    hint!(r"failed: [0-9]+-.*"),
    // ninja
    hint!(r"ninja: build stopped: subcommand failed."),
    hint!(r".*\.s:[0-9]+: Error: .*"),
    // rollup
    hint!(r"\[\!\] Error: Unexpected token"),
    // glib
    hint!(r"\(.*:[0-9]+\): [a-zA-Z0-9]+-CRITICAL \*\*: [0-9:.]+: .*"),
    hint!(r"tar: option requires an argument -- '.'"),
    hint!(r"tar: .*: Cannot stat: No such file or directory"),
    hint!(r"tar: .*: Cannot open: No such file or directory"),
    // rsvg-convert
    hint!(r"Could not render file (.*.svg)"),
    // pybuild tests
    hint!(r"ERROR: file not found: (.*)"),
    // msgfmt
    hint!(r"/usr/bin/msgfmt: found [0-9]+ fatal errors"),
    // Docker
    hint!(r"Cannot connect to the Docker daemon at unix:///var/run/docker.sock. Is the docker daemon running\?"),
    hint!(r"dh_makeshlibs: failing due to earlier errors"),
    // Ruby
    hint!(r"([^:]+)\.rb:[0-9]+:in `([^']+)': (.*) \((.*)\)"),
    hint!(r".*: \*\*\* ERROR: There where errors/warnings in server logs after running test cases."),
    hint!(r"Errno::EEXIST: File exists @ dir_s_mkdir - .*"),
    hint!(r"Test environment was found to be incomplete at configuration time,"),
    hint!(r"libtool:   error: cannot find the library '(.*)' or unhandled argument '(.*)'"),
    hint!(r"npm ERR\! (.*)"),
    hint!(r"install: failed to access '(.*)': (.*)"),
    hint!(r"MSBUILD: error MSBUILD[0-9]+: Project file '(.*)' not found."),
    hint!(r"E: (.*)"),
    hint!(r"(.*)\(([0-9]+),([0-9]+)\): Error: .*"),
    // C #
    hint!(r"(.*)\.cs\([0-9]+,[0-9]+\): error CS[0-9]+: .*"),
    hint!(r".*Segmentation fault.*"),
    hint!(r"a2x: ERROR: (.*) returned non-zero exit status ([0-9]+)"),
    hint!(r"-- Configuring incomplete, errors occurred\!"),
    hint!(r#"Error opening link script "(.*)""#),
    hint!(r"cc: error: (.*)"),
    hint!(r"\[ERROR\] .*"),
    hint!(r"dh_auto_(test|build): error: (.*)"),
    hint!(r"tar: This does not look like a tar archive"),
    hint!(r"\[DZ\] no (name|version) was ever set"),
    hint!(r"\[Runtime\] No -phase or -relationship specified at .* line [0-9]+\."),
    hint!(r"diff: (.*): No such file or directory"),
    hint!(r"gpg: signing failed: .*"),
    // mh_install
    hint!(r"Cannot find the jar to install: (.*)"),
    hint!(r"ERROR: .*"),
    hint!(r"> error: (.*)"),
    hint!(r"error: (.*)"),
    hint!(r"(.*\.hs):[0-9]+:[0-9]+: error:"),
    hint!(r"go1: internal compiler error: .*"),
    ];
}

/// Scan the last `look_back` lines forward for a vague error hint.
///
/// The returned match carries a location only; the caller reports it as
/// "unclassified but localised".
pub fn find_secondary_build_failure(lines: &[&str], look_back: usize) -> Option<Match> {
    for (offset, line) in lines.enumerate_tail_forward(look_back) {
        let stripped = line.trim_end_matches('\n');
        for regexp in SECONDARY_MATCHERS.iter() {
            if regexp.is_match(stripped).unwrap_or(false) {
                log::debug!("secondary match {:?} on line {}", regexp, offset + 1);
                return Some(Match::Single(SingleLineMatch {
                    origin: Origin(format!("secondary regex {:?}", regexp)),
                    offset,
                    line: line.to_string(),
                }));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_vague_error() {
        let lines = vec![
            "everything fine so far\n",
            "make[1]: *** [Makefile:42: all] Error 2\n",
        ];
        let m = find_secondary_build_failure(&lines, 50).unwrap();
        assert_eq!(m.lineno(), 2);
    }

    #[test]
    fn test_ignores_clean_log() {
        let lines = vec!["building widgets\n", "all done\n"];
        assert!(find_secondary_build_failure(&lines, 50).is_none());
    }

    #[test]
    fn test_respects_look_back_window() {
        let mut lines = vec!["error: something broke\n"];
        for _ in 0..60 {
            lines.push("noise\n");
        }
        assert!(find_secondary_build_failure(&lines, 50).is_none());
    }
}
