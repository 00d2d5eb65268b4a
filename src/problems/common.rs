//! Problems common to any build environment.
//!
//! Most variants describe a missing dependency of some flavour; the rest
//! cover environmental conditions (disk full, cancelled sessions) and a
//! handful of quality gates.

use crate::problem_kind;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::PathBuf;

// --- Files, commands and directories ---

/// A file outside the build tree is missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFile {
    /// Absolute path of the missing file.
    pub path: PathBuf,
}

impl MissingFile {
    /// Convenience constructor.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Display for MissingFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing file: {}", self.path.display())
    }
}

problem_kind!(MissingFile, "missing-file");

/// A file inside the build tree is missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingBuildFile {
    /// Path relative to the build tree.
    pub filename: String,
}

impl Display for MissingBuildFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing build file: {}", self.filename)
    }
}

problem_kind!(MissingBuildFile, "missing-build-file");

/// A bare name that could be either an executable or a build file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCommandOrBuildFile {
    /// The ambiguous name.
    pub filename: String,
}

impl MissingCommandOrBuildFile {
    /// The name read as a command.
    pub fn command(&self) -> &str {
        &self.filename
    }
}

impl Display for MissingCommandOrBuildFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing command or build file: {}", self.filename)
    }
}

problem_kind!(MissingCommandOrBuildFile, "missing-command-or-build-file");

/// An executable is not available on PATH.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCommand {
    /// The command name.
    pub command: String,
}

impl MissingCommand {
    /// Convenience constructor.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Display for MissingCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing command: {}", self.command)
    }
}

problem_kind!(MissingCommand, "command-missing");

/// A file exists but is not executable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotExecutableFile {
    /// Path of the non-executable file.
    pub path: String,
}

impl Display for NotExecutableFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Command not executable: {}", self.path)
    }
}

problem_kind!(NotExecutableFile, "command-not-executable");

/// `./configure` is referenced but not present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingConfigure {}

impl Display for MissingConfigure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing configure script")
    }
}

problem_kind!(MissingConfigure, "missing-configure");

/// A directory the build wants to enter does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNonExistant {
    /// The missing directory.
    pub path: String,
}

impl Display for DirectoryNonExistant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Directory does not exist: {}", self.path)
    }
}

problem_kind!(DirectoryNonExistant, "local-directory-not-existing");

// --- Version control ---

/// The build needs a VCS control directory (`.git`, `CVS/Root`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsControlDirectoryNeeded {
    /// The acceptable version control systems.
    pub vcs: Vec<String>,
}

impl VcsControlDirectoryNeeded {
    /// Construct from VCS names.
    pub fn new(vcs: &[&str]) -> Self {
        Self {
            vcs: vcs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Display for VcsControlDirectoryNeeded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VCS control directory needed: {}", self.vcs.join(", "))
    }
}

problem_kind!(VcsControlDirectoryNeeded, "vcs-control-directory-needed");

/// git has no user identity configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGitIdentity {}

impl Display for MissingGitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Git Identity")
    }
}

problem_kind!(MissingGitIdentity, "missing-git-identity");

/// gpg has no default secret key for signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSecretGpgKey {}

impl Display for MissingSecretGpgKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "No secret GPG key is present")
    }
}

problem_kind!(MissingSecretGpgKey, "no-secret-gpg-key");

/// vcversioner found neither a VCS nor a version.txt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingVcVersionerVersion {}

impl Display for MissingVcVersionerVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "vcversion could not find a git directory or version.txt file")
    }
}

problem_kind!(MissingVcVersionerVersion, "no-vcversioner-version");

// --- Python ---

/// A Python module failed to import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPythonModule {
    /// Dotted module name.
    pub module: String,
    /// Major Python version, when the log pinned one.
    pub python_version: Option<i32>,
    /// Required minimum version, when stated.
    pub minimum_version: Option<String>,
}

impl MissingPythonModule {
    /// A module with no version constraints.
    pub fn simple(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            python_version: None,
            minimum_version: None,
        }
    }
}

impl Display for MissingPythonModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(python_version) = self.python_version {
            write!(f, "Missing {} Python module: {}", python_version, self.module)?;
        } else {
            write!(f, "Missing Python module: {}", self.module)?;
        }
        if let Some(minimum_version) = &self.minimum_version {
            write!(f, " (>= {})", minimum_version)?;
        }
        Ok(())
    }
}

problem_kind!(MissingPythonModule, "missing-python-module");

/// A Python distribution (pip/setuptools package) is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPythonDistribution {
    /// Distribution name as on PyPI.
    pub distribution: String,
    /// Major Python version, when the log pinned one.
    pub python_version: Option<i32>,
    /// Required minimum version, when stated.
    pub minimum_version: Option<String>,
}

fn python_version_from_marker(marker: Vec<Vec<pep508_rs::MarkerExpression>>) -> Option<i32> {
    for expr in marker.iter().flat_map(|clause| clause.iter()) {
        if let pep508_rs::MarkerExpression::Version {
            key: pep508_rs::MarkerValueVersion::PythonVersion,
            specifier,
        } = expr
        {
            return Some(specifier.version().release()[0] as i32);
        }
    }
    None
}

impl MissingPythonDistribution {
    /// A distribution with no version constraints.
    pub fn simple(distribution: impl Into<String>) -> Self {
        Self {
            distribution: distribution.into(),
            python_version: None,
            minimum_version: None,
        }
    }

    /// Parse a PEP508 requirement string (`foo>=1.2; python_version >=
    /// "3"`). Returns `None` when the string is not a requirement.
    pub fn from_requirement_str(text: &str, python_version: Option<i32>) -> Option<Self> {
        use pep508_rs::pep440_rs::Operator;
        use pep508_rs::{Requirement, VersionOrUrl};
        use std::str::FromStr;

        let depspec = Requirement::from_str(text).ok()?;
        let distribution = depspec.name.to_string();
        let python_version =
            python_version.or_else(|| python_version_from_marker(depspec.marker.to_dnf()));
        let minimum_version = match depspec.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specifiers)) if specifiers.len() == 1 => {
                if *specifiers[0].operator() == Operator::GreaterThanEqual {
                    Some(specifiers[0].version().to_string())
                } else {
                    None
                }
            }
            _ => None,
        };
        Some(Self {
            distribution,
            python_version,
            minimum_version,
        })
    }
}

impl Display for MissingPythonDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(python_version) = self.python_version {
            write!(
                f,
                "Missing {} Python distribution: {}",
                python_version, self.distribution
            )?;
        } else {
            write!(f, "Missing Python distribution: {}", self.distribution)?;
        }
        if let Some(minimum_version) = &self.minimum_version {
            write!(f, " (>= {})", minimum_version)?;
        }
        Ok(())
    }
}

problem_kind!(MissingPythonDistribution, "missing-python-distribution");

/// setuptools-scm could not detect a version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetuptoolScmVersionIssue {}

impl Display for SetuptoolScmVersionIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "setuptools-scm was unable to find version")
    }
}

problem_kind!(SetuptoolScmVersionIssue, "setuptools-scm-version-issue");

/// A pytest fixture is not defined anywhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPytestFixture {
    /// The fixture name.
    pub fixture: String,
}

impl Display for MissingPytestFixture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing pytest fixture: {}", self.fixture)
    }
}

problem_kind!(MissingPytestFixture, "missing-pytest-fixture");

/// pytest does not understand a configuration option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedPytestConfigOption {
    /// The option name.
    pub name: String,
}

impl Display for UnsupportedPytestConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unsupported pytest configuration option: {}", self.name)
    }
}

problem_kind!(UnsupportedPytestConfigOption, "unsupported-pytest-config-option");

/// pytest was invoked with arguments it does not recognise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedPytestArguments {
    /// The rejected arguments.
    pub args: Vec<String>,
}

impl Display for UnsupportedPytestArguments {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unsupported pytest arguments: {:?}", self.args)
    }
}

problem_kind!(UnsupportedPytestArguments, "unsupported-pytest-arguments");

/// `setup.py` was asked for a command it does not provide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSetupPyCommand {
    /// The unknown command.
    pub command: String,
}

impl Display for MissingSetupPyCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing setup.py subcommand: {}", self.command)
    }
}

problem_kind!(MissingSetupPyCommand, "missing-setup.py-command");

// --- Perl ---

/// A Perl module is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPerlModule {
    /// The `.pm` filename, when the interpreter printed one.
    pub filename: Option<String>,
    /// Module name, e.g. `Test::More`.
    pub module: String,
    /// `@INC` as reported, when available.
    pub inc: Option<Vec<String>>,
    /// Required minimum version, when stated.
    pub minimum_version: Option<String>,
}

impl MissingPerlModule {
    /// A module with no extra context.
    pub fn simple(module: impl Into<String>) -> Self {
        Self {
            filename: None,
            module: module.into(),
            inc: None,
            minimum_version: None,
        }
    }
}

impl Display for MissingPerlModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Perl module: {}", self.module)
    }
}

problem_kind!(MissingPerlModule, "missing-perl-module");

/// A file could not be located in `@INC`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPerlFile {
    /// The file perl looked for.
    pub filename: String,
    /// `@INC` as reported, when available.
    pub inc: Option<Vec<String>>,
}

impl MissingPerlFile {
    /// Convenience constructor.
    pub fn new(filename: impl Into<String>, inc: Option<Vec<String>>) -> Self {
        Self {
            filename: filename.into(),
            inc,
        }
    }
}

impl Display for MissingPerlFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Perl file: {} (inc: {:?})", self.filename, self.inc)
    }
}

problem_kind!(MissingPerlFile, "missing-perl-file");

/// A bareword suggests a Perl symbol that needed predeclaring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPerlPredeclared {
    /// The symbol.
    pub name: String,
}

impl Display for MissingPerlPredeclared {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing predeclared function: {}", self.name)
    }
}

problem_kind!(MissingPerlPredeclared, "missing-perl-predeclared");

/// The MANIFEST file is absent from the Perl distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPerlManifest {}

impl Display for MissingPerlManifest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing Perl MANIFEST")
    }
}

problem_kind!(MissingPerlManifest, "missing-perl-manifest");

/// A file such as META.yml is missing from the distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPerlDistributionFile {
    /// The missing file.
    pub filename: String,
}

impl Display for MissingPerlDistributionFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing perl distribution file: {}", self.filename)
    }
}

problem_kind!(MissingPerlDistributionFile, "missing-perl-distribution-file");

/// Dist::Zilla needs PAUSE credentials that are not configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPauseCredentials {}

impl Display for MissingPauseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing credentials for PAUSE")
    }
}

problem_kind!(MissingPauseCredentials, "missing-pause-credentials");

// --- Haskell ---

/// A Haskell module could not be found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingHaskellModule {
    /// The module name.
    pub module: String,
}

impl Display for MissingHaskellModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Haskell module: {}", self.module)
    }
}

problem_kind!(MissingHaskellModule, "missing-haskell-module");

/// cabal reported missing or private dependencies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingHaskellDependencies {
    /// The dependency expressions.
    pub deps: Vec<String>,
}

impl Display for MissingHaskellDependencies {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Haskell dependencies: {:?}", self.deps)
    }
}

problem_kind!(MissingHaskellDependencies, "missing-haskell-dependencies");

// --- Ruby ---

/// A Ruby gem is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRubyGem {
    /// The gem name.
    pub gem: String,
    /// Required minimum version, when stated.
    pub version: Option<String>,
}

impl MissingRubyGem {
    /// Convenience constructor.
    pub fn new(gem: impl Into<String>, version: Option<String>) -> Self {
        Self {
            gem: gem.into(),
            version,
        }
    }
}

impl Display for MissingRubyGem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "missing ruby gem: {} (>= {})", self.gem, version),
            None => write!(f, "missing ruby gem: {}", self.gem),
        }
    }
}

problem_kind!(MissingRubyGem, "missing-ruby-gem");

/// A Ruby file could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRubyFile {
    /// The `require`d name.
    pub filename: String,
}

impl Display for MissingRubyFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing ruby file: {}", self.filename)
    }
}

problem_kind!(MissingRubyFile, "missing-ruby-file");

/// Sprockets could not find an asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSprocketsFile {
    /// Asset name.
    pub name: String,
    /// Asset content type.
    pub content_type: String,
}

impl Display for MissingSprocketsFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing sprockets file: {} (type: {})", self.name, self.content_type)
    }
}

problem_kind!(MissingSprocketsFile, "missing-sprockets-file");

// --- R ---

/// An R package is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRPackage {
    /// The package name.
    pub package: String,
    /// Required minimum version, when stated.
    pub minimum_version: Option<String>,
}

impl MissingRPackage {
    /// A package with no version constraint.
    pub fn simple(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            minimum_version: None,
        }
    }
}

impl Display for MissingRPackage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing R package: {}", self.package)?;
        if let Some(minimum_version) = &self.minimum_version {
            write!(f, " (>= {})", minimum_version)?;
        }
        Ok(())
    }
}

problem_kind!(MissingRPackage, "missing-r-package");

// --- Node / JavaScript ---

/// A node module cannot be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingNodeModule {
    /// The module specifier.
    pub module: String,
}

impl Display for MissingNodeModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Node module: {}", self.module)
    }
}

problem_kind!(MissingNodeModule, "missing-node-module");

/// A node package is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingNodePackage {
    /// The package name.
    pub package: String,
}

impl Display for MissingNodePackage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Node package: {}", self.package)
    }
}

problem_kind!(MissingNodePackage, "missing-node-package");

/// No JavaScript runtime is available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingJavaScriptRuntime {}

impl Display for MissingJavaScriptRuntime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing JavaScript Runtime")
    }
}

problem_kind!(MissingJavaScriptRuntime, "javascript-runtime-missing");

/// An ES module was loaded with `require`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ESModuleMustUseImport {
    /// Path of the ES module.
    pub path: String,
}

impl Display for ESModuleMustUseImport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ESM-only module {} must use import", self.path)
    }
}

problem_kind!(ESModuleMustUseImport, "esmodule-must-use-import");

// --- Java ---

/// A Java class is not on the classpath.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingJavaClass {
    /// Fully-qualified class name.
    pub classname: String,
}

impl MissingJavaClass {
    /// Convenience constructor.
    pub fn simple(classname: impl Into<String>) -> Self {
        Self {
            classname: classname.into(),
        }
    }
}

impl Display for MissingJavaClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing Java class: {}", self.classname)
    }
}

problem_kind!(MissingJavaClass, "missing-java-class");

/// A JDK installation is missing a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingJDKFile {
    /// Path of the JDK installation.
    pub jdk_path: String,
    /// The file that should be there.
    pub filename: String,
}

impl Display for MissingJDKFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing JDK file {} (JDK Path: {})", self.filename, self.jdk_path)
    }
}

problem_kind!(MissingJDKFile, "missing-jdk-file");

/// No usable JDK was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingJDK {
    /// Path of the JDK installation that was tried.
    pub jdk_path: String,
}

impl Display for MissingJDK {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing JDK (JDK Path: {})", self.jdk_path)
    }
}

problem_kind!(MissingJDK, "missing-jdk");

/// No Java runtime was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingJRE {}

impl Display for MissingJRE {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing JRE")
    }
}

problem_kind!(MissingJRE, "missing-jre");

/// `JAVA_HOME` points at something that is not a JVM.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingJVM {}

impl Display for MissingJVM {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing JVM")
    }
}

problem_kind!(MissingJVM, "missing-jvm");

/// Maven could not resolve artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingMavenArtifacts {
    /// Artifact coordinates.
    pub artifacts: Vec<String>,
}

impl Display for MissingMavenArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing maven artifacts: {:?}", self.artifacts)
    }
}

problem_kind!(MissingMavenArtifacts, "missing-maven-artifacts");

// --- PHP ---

/// A PHP class is not defined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPhpClass {
    /// The class name.
    pub php_class: String,
}

impl MissingPhpClass {
    /// Convenience constructor.
    pub fn simple(php_class: impl Into<String>) -> Self {
        Self {
            php_class: php_class.into(),
        }
    }
}

impl Display for MissingPhpClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing PHP class: {}", self.php_class)
    }
}

problem_kind!(MissingPhpClass, "missing-php-class");

/// A PHP extension is not loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPHPExtension {
    /// The extension name.
    pub extension: String,
}

impl Display for MissingPHPExtension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing PHP Extension: {}", self.extension)
    }
}

problem_kind!(MissingPHPExtension, "missing-php-extension");

// --- Go ---

/// A Go package cannot be found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGoPackage {
    /// The import path.
    pub package: String,
}

impl Display for MissingGoPackage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Go package: {}", self.package)
    }
}

problem_kind!(MissingGoPackage, "missing-go-package");

/// No Go runtime is installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGoRuntime {}

impl Display for MissingGoRuntime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "go runtime is missing")
    }
}

problem_kind!(MissingGoRuntime, "missing-go-runtime");

/// `go.mod` is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGoModFile {}

impl Display for MissingGoModFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "go.mod file is missing")
    }
}

problem_kind!(MissingGoModFile, "missing-go.mod-file");

/// `go.mod` needs updating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedGoModFile {}

impl Display for OutdatedGoModFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "go.mod file is outdated")
    }
}

problem_kind!(OutdatedGoModFile, "outdated-go.mod-file");

/// `go.sum` lacks an entry for a module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGoSumEntry {
    /// The module path.
    pub package: String,
    /// The module version.
    pub version: String,
}

impl Display for MissingGoSumEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing go.sum entry: {}@{}", self.package, self.version)
    }
}

problem_kind!(MissingGoSumEntry, "missing-go.sum-entry");

// --- Rust / Cargo ---

/// cargo could not resolve a crate dependency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCargoCrate {
    /// The crate name.
    #[serde(rename = "crate")]
    pub cratename: String,
    /// The version requirement, when given.
    pub requirement: Option<String>,
}

impl MissingCargoCrate {
    /// A crate with no version requirement.
    pub fn simple(cratename: impl Into<String>) -> Self {
        Self {
            cratename: cratename.into(),
            requirement: None,
        }
    }
}

impl Display for MissingCargoCrate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.requirement {
            Some(requirement) => {
                write!(f, "Missing crate: {} ({})", self.cratename, requirement)
            }
            None => write!(f, "Missing crate: {}", self.cratename),
        }
    }
}

problem_kind!(MissingCargoCrate, "missing-cargo-crate");

/// No Rust compiler is available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRustCompiler {}

impl Display for MissingRustCompiler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Rust compiler")
    }
}

problem_kind!(MissingRustCompiler, "missing-rust-compiler");

// --- Other language ecosystems ---

/// An OCaml findlib package is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingOCamlPackage {
    /// The package name.
    pub package: String,
}

impl Display for MissingOCamlPackage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing OCaml package: {}", self.package)
    }
}

problem_kind!(MissingOCamlPackage, "missing-ocaml-package");

/// A Lua module could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLuaModule {
    /// The module name.
    pub module: String,
}

impl Display for MissingLuaModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Lua Module: {}", self.module)
    }
}

problem_kind!(MissingLuaModule, "missing-lua-module");

/// A Vala package is unknown to valac.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValaPackage {
    /// The package name.
    pub package: String,
}

impl Display for MissingValaPackage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Vala package: {}", self.package)
    }
}

problem_kind!(MissingValaPackage, "missing-vala-package");

/// valac itself is broken in this environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValaCompilerCannotCompile {}

impl Display for ValaCompilerCannotCompile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vala compiler cannot compile")
    }
}

problem_kind!(ValaCompilerCannotCompile, "valac-cannot-compile");

/// A GObject Introspection typelib is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingIntrospectionTypelib {
    /// The namespace/library name.
    pub library: String,
}

impl Display for MissingIntrospectionTypelib {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing introspection typelib: {}", self.library)
    }
}

problem_kind!(MissingIntrospectionTypelib, "missing-introspection-typelib");

// --- C/C++, libraries, compilers ---

/// A C header could not be included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCHeader {
    /// The header path as written in the include directive.
    pub header: String,
}

impl MissingCHeader {
    /// Convenience constructor.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl Display for MissingCHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing C Header: {}", self.header)
    }
}

problem_kind!(MissingCHeader, "missing-c-header");

/// A shared library is not available to the linker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLibrary {
    /// The library name, without `lib` prefix.
    pub library: String,
}

impl Display for MissingLibrary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing library: {}", self.library)
    }
}

problem_kind!(MissingLibrary, "missing-library");

/// A static library could not be found under any of its names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingStaticLibrary {
    /// The library name.
    pub library: String,
    /// The filename that was searched for.
    pub filename: String,
}

impl Display for MissingStaticLibrary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing static library: {}", self.library)
    }
}

problem_kind!(MissingStaticLibrary, "missing-static-library");

/// No Fortran compiler is installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFortranCompiler {}

impl Display for MissingFortranCompiler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Fortran compiler")
    }
}

problem_kind!(MissingFortranCompiler, "missing-fortran-compiler");

/// No C# compiler is installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCSharpCompiler {}

impl Display for MissingCSharpCompiler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing C# compiler")
    }
}

problem_kind!(MissingCSharpCompiler, "missing-c#-compiler");

/// No assembler is installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAssembler {}

impl Display for MissingAssembler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing assembler")
    }
}

problem_kind!(MissingAssembler, "missing-assembler");

/// libtool is referenced but `LIBTOOL` is undefined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLibtool {}

impl Display for MissingLibtool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Libtool is missing")
    }
}

problem_kind!(MissingLibtool, "missing-libtool");

// --- pkg-config and CMake ---

/// A pkg-config module is unavailable or too old.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPkgConfig {
    /// The module name.
    pub module: String,
    /// Required minimum version, when stated.
    pub minimum_version: Option<String>,
}

impl MissingPkgConfig {
    /// A module with no version constraint.
    pub fn simple(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            minimum_version: None,
        }
    }

    /// A module with a minimum version.
    pub fn new(module: impl Into<String>, minimum_version: Option<String>) -> Self {
        Self {
            module: module.into(),
            minimum_version,
        }
    }
}

impl Display for MissingPkgConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.minimum_version {
            Some(minimum_version) => write!(
                f,
                "missing pkg-config file: {} (>= {})",
                self.module, minimum_version
            ),
            None => write!(f, "missing pkg-config file: {}", self.module),
        }
    }
}

problem_kind!(MissingPkgConfig, "missing-pkg-config-package");

/// A CMake find_package call reported missing components.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCMakeComponents {
    /// The package name.
    pub name: String,
    /// The missing components.
    pub components: Vec<String>,
}

impl Display for MissingCMakeComponents {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing {} components: {:?}", self.name, self.components)
    }
}

problem_kind!(MissingCMakeComponents, "missing-cmake-components");

/// CMake could not find any of a set of configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CMakeFilesMissing {
    /// The candidate filenames.
    pub filenames: Vec<String>,
    /// Requested version, when one was given.
    pub version: Option<String>,
}

impl Display for CMakeFilesMissing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing CMake package configuration files: {:?}", self.filenames)
    }
}

problem_kind!(CMakeFilesMissing, "missing-cmake-files");

/// A CMake package configuration is absent or incompatible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCMakeConfig {
    /// The package name.
    pub name: String,
    /// Requested version, when one was given.
    pub version: Option<String>,
}

impl Display for MissingCMakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.version {
            Some(version) => write!(
                f,
                "Missing CMake configuration for {} (version {})",
                self.name, version
            ),
            None => write!(f, "Missing CMake configuration for {}", self.name),
        }
    }
}

problem_kind!(MissingCMakeConfig, "missing-cmake-config");

/// CMake needs an exact package version but found another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CMakeNeedExactVersion {
    /// The package name.
    pub package: String,
    /// The version that was found.
    pub version_found: String,
    /// The exact version required.
    pub exact_version_needed: String,
    /// Where the unsuitable version lives.
    pub path: PathBuf,
}

impl Display for CMakeNeedExactVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CMake needs exact package {}, version {}",
            self.package, self.exact_version_needed
        )
    }
}

problem_kind!(CMakeNeedExactVersion, "cmake-exact-version-missing");

// --- Autotools, gettext, build generators ---

/// An autoconf macro is undefined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAutoconfMacro {
    /// The macro name.
    pub r#macro: String,
    /// Whether configure needs regenerating for the diagnosis to be
    /// certain.
    pub need_rebuild: bool,
}

impl MissingAutoconfMacro {
    /// Convenience constructor.
    pub fn new(r#macro: impl Into<String>) -> Self {
        Self {
            r#macro: r#macro.into(),
            need_rebuild: false,
        }
    }
}

impl Display for MissingAutoconfMacro {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "autoconf macro {} missing", self.r#macro)
    }
}

problem_kind!(MissingAutoconfMacro, "missing-autoconf-macro");

/// automake could not open one of its inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAutomakeInput {
    /// The input path.
    pub path: String,
}

impl Display for MissingAutomakeInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "automake input file {} missing", self.path)
    }
}

problem_kind!(MissingAutomakeInput, "missing-automake-input");

/// config.status could not find an input file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingConfigStatusInput {
    /// The input path.
    pub path: String,
}

impl Display for MissingConfigStatusInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing config.status input {}", self.path)
    }
}

problem_kind!(MissingConfigStatusInput, "missing-config.status-input");

/// The tree requires a newer autoconf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumAutoconfTooOld {
    /// The minimum supported version.
    pub minimum_version: String,
}

impl Display for MinimumAutoconfTooOld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "configure.{{ac,in}} should require newer autoconf {}",
            self.minimum_version
        )
    }
}

problem_kind!(MinimumAutoconfTooOld, "minimum-autoconf-too-old");

/// gnome-common is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnomeCommonMissing {}

impl Display for GnomeCommonMissing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "gnome-common is not installed")
    }
}

problem_kind!(GnomeCommonMissing, "missing-gnome-common");

/// A tool needed by gnome-common is missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGnomeCommonDependency {
    /// The tool.
    pub package: String,
    /// Minimum version, when stated.
    pub minimum_version: Option<String>,
}

impl MissingGnomeCommonDependency {
    /// Convenience constructor.
    pub fn new(package: impl Into<String>, minimum_version: Option<String>) -> Self {
        Self {
            package: package.into(),
            minimum_version,
        }
    }
}

impl Display for MissingGnomeCommonDependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Missing gnome-common dependency: {}: (>= {:?})",
            self.package, self.minimum_version
        )
    }
}

problem_kind!(MissingGnomeCommonDependency, "missing-gnome-common-dependency");

/// A dependency of the Xfce autogen machinery is missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingXfceDependency {
    /// The dependency name.
    pub package: String,
}

impl Display for MissingXfceDependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing XFCE build dependency: {}", self.package)
    }
}

problem_kind!(MissingXfceDependency, "missing-xfce-dependency");

/// The gnulib submodule directory is not checked out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingGnulibDirectory {
    /// The expected directory.
    pub directory: PathBuf,
}

impl Display for MissingGnulibDirectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing gnulib directory {}", self.directory.display())
    }
}

problem_kind!(MissingGnulibDirectory, "missing-gnulib-directory");

/// Makefile.in.in and the autoconf macros come from different gettext
/// releases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchGettextVersions {
    /// Version the Makefile.in.in is from.
    pub makefile_version: String,
    /// Version the autoconf macros are from.
    pub autoconf_version: String,
}

impl Display for MismatchGettextVersions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Mismatch versions ({}, {})",
            self.makefile_version, self.autoconf_version
        )
    }
}

problem_kind!(MismatchGettextVersions, "mismatch-gettext-versions");

// --- LaTeX ---

/// A LaTeX input file could not be found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLatexFile {
    /// The file LaTeX looked for.
    pub filename: String,
}

impl Display for MissingLatexFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing LaTeX file: {}", self.filename)
    }
}

problem_kind!(MissingLatexFile, "missing-latex-file");

/// fontspec could not find a font.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFontspec {
    /// The font specification.
    pub fontspec: String,
}

impl Display for MissingFontspec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing font spec: {}", self.fontspec)
    }
}

problem_kind!(MissingFontspec, "missing-fontspec");

// --- X11 / Qt / display ---

/// X11 development headers or libraries are absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingX11 {}

impl Display for MissingX11 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing X11 headers")
    }
}

problem_kind!(MissingX11, "missing-x11");

/// No X display is available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingXDisplay {}

impl Display for MissingXDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "No X Display")
    }
}

problem_kind!(MissingXDisplay, "missing-x-display");

/// No Qt installation was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingQt {}

impl Display for MissingQt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing QT installation")
    }
}

problem_kind!(MissingQt, "missing-qt");

/// Qt modules referenced by the project are not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingQtModules {
    /// The missing modules.
    pub modules: Vec<String>,
}

impl Display for MissingQtModules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing QT modules: {:?}", self.modules)
    }
}

problem_kind!(MissingQtModules, "missing-qt-modules");

// --- debhelper ---

/// `dh --with` came after the sequence argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhWithOrderIncorrect {}

impl Display for DhWithOrderIncorrect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dh argument order is incorrect")
    }
}

problem_kind!(DhWithOrderIncorrect, "debhelper-argument-order");

/// The requested debhelper compat level is no longer supported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedDebhelperCompatLevel {
    /// The oldest level debhelper still supports.
    pub oldest_supported: u32,
    /// The level the package requested.
    pub requested: u32,
}

impl Display for UnsupportedDebhelperCompatLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Request debhelper compat level {} lower than supported {}",
            self.requested, self.oldest_supported
        )
    }
}

problem_kind!(
    UnsupportedDebhelperCompatLevel,
    "unsupported-debhelper-compat-level"
);

/// `dh --until` is no longer supported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhUntilUnsupported {}

impl Display for DhUntilUnsupported {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dh --until is no longer supported")
    }
}

problem_kind!(DhUntilUnsupported, "dh-until-unsupported");

/// A debhelper addon failed to load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhAddonLoadFailure {
    /// The addon name.
    pub name: String,
    /// The Perl path that failed to load.
    pub path: String,
}

impl DhAddonLoadFailure {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Display for DhAddonLoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dh addon loading failed: {}", self.name)
    }
}

problem_kind!(DhAddonLoadFailure, "dh-addon-load-failure");

/// A built file was not installed into any package.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhMissingUninstalled {
    /// The file dh_missing flagged.
    pub missing_file: String,
}

impl Display for DhMissingUninstalled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "File built by Debian not installed: {}", self.missing_file)
    }
}

problem_kind!(DhMissingUninstalled, "dh-missing-uninstalled");

/// dh_link was asked to link into a directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhLinkDestinationIsDirectory {
    /// The destination path.
    pub path: String,
}

impl Display for DhLinkDestinationIsDirectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Link destination {} is directory", self.path)
    }
}

problem_kind!(DhLinkDestinationIsDirectory, "dh-link-destination-is-directory");

/// A debhelper glob matched nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebhelperPatternNotFound {
    /// The pattern that matched nothing.
    pub pattern: String,
    /// The dh tool that reported it.
    pub tool: String,
    /// Directories that were searched.
    pub directories: Vec<String>,
}

impl Display for DebhelperPatternNotFound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "debhelper ({}) expansion failed for {:?} (directories: {:?})",
            self.tool, self.pattern, self.directories
        )
    }
}

problem_kind!(DebhelperPatternNotFound, "debhelper-pattern-not-found");

/// debian/compat and a debhelper-compat build-dependency both specify a
/// level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateDHCompatLevel {
    /// The dh command that complained.
    pub command: String,
}

impl Display for DuplicateDHCompatLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DH Compat Level specified twice (command: {})", self.command)
    }
}

problem_kind!(DuplicateDHCompatLevel, "duplicate-dh-compat-level");

/// No debhelper compat level is specified at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDHCompatLevel {
    /// The dh command that complained.
    pub command: String,
}

impl Display for MissingDHCompatLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing DH Compat Level (command: {})", self.command)
    }
}

problem_kind!(MissingDHCompatLevel, "missing-dh-compat-level");

/// An upstart job file is still present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstartFilePresent {
    /// The upstart file.
    pub filename: String,
}

impl Display for UpstartFilePresent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Upstart file present: {}", self.filename)
    }
}

problem_kind!(UpstartFilePresent, "upstart-file-present");

/// `pg_buildext updatecontrol` needs to be run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedPgBuildExtUpdateControl {
    /// The generated control file.
    pub generated_path: String,
    /// The template it is generated from.
    pub template_path: String,
}

impl Display for NeedPgBuildExtUpdateControl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Need to run 'pg_buildext updatecontrol' to update {}",
            self.generated_path
        )
    }
}

problem_kind!(NeedPgBuildExtUpdateControl, "need-pg-buildext-updatecontrol");

/// A build dependency listed in pybuild's error output is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDebianBuildDep {
    /// The build dependency.
    pub dep: String,
}

impl Display for MissingDebianBuildDep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing Debian Build-Depends: {}", self.dep)
    }
}

problem_kind!(MissingDebianBuildDep, "missing-debian-build-dep");

/// The Debian version is not acceptable to upstream tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebianVersionRejected {
    /// The rejected version.
    pub version: String,
}

impl Display for DebianVersionRejected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Debian Version Rejected; {}", self.version)
    }
}

problem_kind!(DebianVersionRejected, "debian-version-rejected");

// --- Environment ---

/// The disk filled up. Overrides more specific matches in the same
/// window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoSpaceOnDevice {}

impl Display for NoSpaceOnDevice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "No space on device")
    }
}

problem_kind!(NoSpaceOnDevice, "no-space-on-device", global);

/// The requested chroot does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChrootNotFound {
    /// The chroot name.
    pub chroot: String,
}

impl Display for ChrootNotFound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Chroot not found: {}", self.chroot)
    }
}

problem_kind!(ChrootNotFound, "chroot-not-found");

/// TLS failed against a certificate authority we do not know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownCertificateAuthority {
    /// The URL that failed to verify.
    pub url: String,
}

impl Display for UnknownCertificateAuthority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown Certificate Authority for {}", self.url)
    }
}

problem_kind!(UnknownCertificateAuthority, "unknown-certificate-authority");

/// The build was killed after a period without output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactiveKilled {
    /// Minutes of inactivity before the kill.
    pub minutes: i64,
}

impl Display for InactiveKilled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Killed due to inactivity after {} minutes", self.minutes)
    }
}

problem_kind!(InactiveKilled, "inactive-killed");

/// The session was cancelled from outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancelled {}

impl Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cancelled by runner or job manager")
    }
}

problem_kind!(Cancelled, "cancelled");

/// A tool refused to run as the current user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidCurrentUser {
    /// The rejected user.
    pub user: String,
}

impl Display for InvalidCurrentUser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Can not run as {}", self.user)
    }
}

problem_kind!(InvalidCurrentUser, "invalid-current-user");

/// The process ran out of file descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooManyOpenFiles {}

impl Display for TooManyOpenFiles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Too many open files")
    }
}

problem_kind!(TooManyOpenFiles, "too-many-open-files");

// --- Quality gates ---

/// Test coverage fell below the configured threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeCoverageTooLow {
    /// The measured coverage, percent.
    pub actual: f64,
    /// The required coverage, percent.
    pub required: f64,
}

impl Display for CodeCoverageTooLow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Code coverage too low: {:.2} < {:.2}", self.actual, self.required)
    }
}

problem_kind!(CodeCoverageTooLow, "code-coverage-too-low");

/// Symbols disappeared from the symbols file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisappearedSymbols {}

impl Display for DisappearedSymbols {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Disappeared symbols")
    }
}

problem_kind!(DisappearedSymbols, "disappeared-symbols");

// --- Everything else ---

/// An XML entity could not be loaded over the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingXmlEntity {
    /// The entity URL.
    pub url: String,
}

impl Display for MissingXmlEntity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing XML entity: {}", self.url)
    }
}

problem_kind!(MissingXmlEntity, "missing-xml-entity");

/// ccache reported an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcacheError {
    /// The ccache message.
    pub error: String,
}

impl Display for CcacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ccache error: {}", self.error)
    }
}

problem_kind!(CcacheError, "ccache-error");

/// A PostgreSQL extension could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPostgresExtension {
    /// The extension name.
    pub extension: String,
}

impl Display for MissingPostgresExtension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing PostgreSQL extension: {}", self.extension)
    }
}

problem_kind!(MissingPostgresExtension, "missing-postgresql-extension");

/// An ImageMagick delegate is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMagickDelegateMissing {
    /// The delegate (format) name.
    pub delegate: String,
}

impl Display for ImageMagickDelegateMissing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Imagemagick missing delegate: {}", self.delegate)
    }
}

problem_kind!(ImageMagickDelegateMissing, "imagemagick-delegate-missing");

/// A dependency was named without enough structure to classify further.
///
/// Produced by the intentionally-vague matchers at the catalogue tail;
/// concrete matchers earlier in the list take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingVagueDependency {
    /// The name, as printed by the build.
    pub name: String,
    /// A URL the build suggested, if any.
    pub url: Option<String>,
    /// Minimum version, when stated.
    pub minimum_version: Option<String>,
    /// The version that was found instead, when stated.
    pub current_version: Option<String>,
}

impl MissingVagueDependency {
    /// Just a name.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            minimum_version: None,
            current_version: None,
        }
    }
}

impl Display for MissingVagueDependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing dependency: {}", self.name)
    }
}

problem_kind!(MissingVagueDependency, "missing-vague-dependency");

/// A patch in the series failed to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchApplicationFailed {
    /// The patch name.
    pub patchname: String,
}

impl Display for PatchApplicationFailed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Patch application failed: {}", self.patchname)
    }
}

problem_kind!(PatchApplicationFailed, "patch-application-failed");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Problem;

    #[test]
    fn test_python_module_display() {
        let p = MissingPythonModule {
            module: "distro".to_string(),
            python_version: Some(3),
            minimum_version: None,
        };
        assert_eq!(p.to_string(), "Missing 3 Python module: distro");
        assert_eq!(
            p.json(),
            serde_json::json!({
                "module": "distro",
                "python_version": 3,
                "minimum_version": null,
            })
        );
    }

    #[test]
    fn test_from_requirement_str() {
        let p = MissingPythonDistribution::from_requirement_str("pytest-cov>=2.5", None).unwrap();
        assert_eq!(p.distribution, "pytest-cov");
        assert_eq!(p.minimum_version.as_deref(), Some("2.5"));

        let p = MissingPythonDistribution::from_requirement_str("tomli", None).unwrap();
        assert_eq!(p.distribution, "tomli");
        assert!(p.minimum_version.is_none());
    }

    #[test]
    fn test_no_space_on_device_is_global() {
        assert!(NoSpaceOnDevice {}.is_global());
        assert!(!MissingCommand::new("make").is_global());
    }

    #[test]
    fn test_cargo_crate_json_uses_crate_key() {
        let p = MissingCargoCrate::simple("serde");
        assert_eq!(
            p.json(),
            serde_json::json!({"crate": "serde", "requirement": null})
        );
    }

    #[test]
    fn test_autoconf_macro_json_field_name() {
        let p = MissingAutoconfMacro::new("AC_PROG_CC");
        assert_eq!(
            p.json(),
            serde_json::json!({"macro": "AC_PROG_CC", "need_rebuild": false})
        );
    }

    #[test]
    fn test_empty_payload_round_trip() {
        let p = MissingConfigure {};
        assert_eq!(p.json(), serde_json::json!({}));
        let rebuilt = crate::problem_from_json("missing-configure", p.json()).unwrap();
        assert_eq!(&*rebuilt, &p as &dyn Problem);
    }
}
