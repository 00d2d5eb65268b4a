//! Problems specific to Debian packaging tooling.

use crate::problem_kind;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::PathBuf;

/// dpkg reported an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgError {
    /// The text after `dpkg: error:`.
    pub error: String,
}

impl Display for DpkgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dpkg Error: {}", self.error)
    }
}

problem_kind!(DpkgError, "dpkg-error");

/// `apt-get update` failed without a more specific diagnosis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptUpdateError {}

impl Display for AptUpdateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Apt update error")
    }
}

problem_kind!(AptUpdateError, "apt-update-error");

/// apt failed to fetch a file from a repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptFetchFailure {
    /// URL of the file that could not be fetched, when apt printed one.
    pub url: Option<String>,
    /// The failure reason.
    pub error: String,
}

impl Display for AptFetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(url) = &self.url {
            write!(f, "Apt file fetch failed: {} ({})", url, self.error)
        } else {
            write!(f, "Apt file fetch failed: {}", self.error)
        }
    }
}

problem_kind!(AptFetchFailure, "apt-file-fetch-failure");

/// A configured repository has no Release file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptMissingReleaseFile {
    /// The repository URL apt complained about.
    pub url: String,
}

impl Display for AptMissingReleaseFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing release file: {}", self.url)
    }
}

problem_kind!(AptMissingReleaseFile, "missing-release-file");

/// apt could not locate a package by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptPackageUnknown {
    /// The unknown package name.
    pub package: String,
}

impl Display for AptPackageUnknown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Apt package unknown: {}", self.package)
    }
}

problem_kind!(AptPackageUnknown, "apt-package-unknown");

/// apt refused to proceed because of broken packages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptBrokenPackages {
    /// The summary line preceding the `E:` line.
    pub description: String,
    /// Names of the packages involved, when they could be collected.
    pub broken: Option<Vec<String>>,
}

impl Display for AptBrokenPackages {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Broken apt packages: {}", self.description)
    }
}

problem_kind!(AptBrokenPackages, "apt-broken-packages");

/// Build dependencies cannot be satisfied; payload is the canonical
/// Debian relation string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnsatisfiedAptDependencies(pub String);

impl Display for UnsatisfiedAptDependencies {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unsatisfied apt dependencies: {}", self.0)
    }
}

problem_kind!(UnsatisfiedAptDependencies, "unsatisfied-apt-dependencies");

/// Build dependencies conflict; payload is the canonical Debian relation
/// string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnsatisfiedAptConflicts(pub String);

impl Display for UnsatisfiedAptConflicts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unsatisfied apt conflicts: {}", self.0)
    }
}

problem_kind!(UnsatisfiedAptConflicts, "unsatisfied-apt-conflicts");

/// dpkg-source aborted over unexpected upstream changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgSourceLocalChanges {
    /// Path of the diff file dpkg-source pointed at.
    pub diff_file: Option<String>,
    /// The modified files, when listed.
    pub files: Option<Vec<String>>,
}

impl Display for DpkgSourceLocalChanges {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.files {
            Some(files) if files.len() < 5 => {
                write!(f, "Tree has local changes: {:?}", files)
            }
            Some(files) => write!(f, "Tree has local changes: {} files", files.len()),
            None => write!(f, "Tree has local changes"),
        }
    }
}

problem_kind!(DpkgSourceLocalChanges, "unexpected-local-upstream-changes");

/// dpkg-source found changes it cannot represent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgSourceUnrepresentableChanges {}

impl Display for DpkgSourceUnrepresentableChanges {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tree has unrepresentable local changes.")
    }
}

problem_kind!(
    DpkgSourceUnrepresentableChanges,
    "unrepresentable-local-changes"
);

/// dpkg-source detected unwanted binary files in the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgUnwantedBinaryFiles {}

impl Display for DpkgUnwantedBinaryFiles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tree has unwanted binary files.")
    }
}

problem_kind!(DpkgUnwantedBinaryFiles, "unwanted-binary-files");

/// Contents of a binary file changed, which dpkg-source cannot express.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgBinaryFileChanged {
    /// The binary files that changed.
    pub files: Vec<String>,
}

impl Display for DpkgBinaryFileChanged {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tree has binary files with changes: {:?}", self.files)
    }
}

problem_kind!(DpkgBinaryFileChanged, "changed-binary-files");

/// `debian/control` could not be read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingControlFile {
    /// The path dpkg-source tried.
    pub path: PathBuf,
}

impl Display for MissingControlFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tree is missing control file {}", self.path.display())
    }
}

problem_kind!(MissingControlFile, "missing-control-file");

/// No upstream tarball could be found for the package.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnableToFindUpstreamTarball {
    /// Source package name.
    pub package: String,
    /// Upstream version searched for.
    pub version: String,
}

impl Display for UnableToFindUpstreamTarball {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unable to find upstream tarball for {}, version {}",
            self.package, self.version
        )
    }
}

problem_kind!(UnableToFindUpstreamTarball, "unable-to-find-upstream-tarball");

/// The source format cannot build this tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFormatUnbuildable {
    /// The source format, e.g. `3.0 (quilt)`.
    pub source_format: String,
    /// Reason given by dpkg-source.
    pub reason: String,
}

impl Display for SourceFormatUnbuildable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Source format {} unusable: {}",
            self.source_format, self.reason
        )
    }
}

problem_kind!(SourceFormatUnbuildable, "source-format-unbuildable");

/// The source format is not supported by the tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFormatUnsupported {
    /// The unsupported format string.
    pub source_format: String,
}

impl Display for SourceFormatUnsupported {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Source format {} unsupported", self.source_format)
    }
}

problem_kind!(SourceFormatUnsupported, "unsupported-source-format");

/// A patch listed in the series file is not present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFileMissing {
    /// Path of the missing patch.
    pub path: PathBuf,
}

impl Display for PatchFileMissing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Patch file {} missing", self.path.display())
    }
}

problem_kind!(PatchFileMissing, "patch-file-missing");

/// Mercurial metadata carried fields the importer does not understand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownMercurialExtraFields {
    /// The unrecognised field.
    pub field: String,
}

impl Display for UnknownMercurialExtraFields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown Mercurial extra fields: {}", self.field)
    }
}

problem_kind!(UnknownMercurialExtraFields, "unknown-mercurial-extra-fields");

/// The upstream PGP signature did not verify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamPGPSignatureVerificationFailed {}

impl Display for UpstreamPGPSignatureVerificationFailed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unable to verify the PGP signature on the upstream source")
    }
}

problem_kind!(
    UpstreamPGPSignatureVerificationFailed,
    "upstream-pgp-signature-verification-failed"
);

/// uscan did not find the version requested in the watch file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UScanRequestVersionMissing {
    /// The version uscan looked for.
    pub version: String,
}

impl Display for UScanRequestVersionMissing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UScan can not find requested version {}", self.version)
    }
}

problem_kind!(UScanRequestVersionMissing, "uscan-requested-version-missing");

/// debcargo failed for a reason we could not classify further.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebcargoFailure {
    /// Whatever debcargo printed.
    pub reason: String,
}

impl Display for DebcargoFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Debcargo failed: {}", self.reason)
    }
}

problem_kind!(DebcargoFailure, "debcargo-failed");

/// `debian/changelog` could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogParseError {
    /// Parser message.
    pub reason: String,
}

impl Display for ChangelogParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Changelog failed to parse: {}", self.reason)
    }
}

problem_kind!(ChangelogParseError, "changelog-parse-failed");

/// uscan failed for a reason we could not classify further.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UScanError {
    /// Whatever uscan printed.
    pub reason: String,
}

impl Display for UScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UScan failed: {}", self.reason)
    }
}

problem_kind!(UScanError, "uscan-error");

/// uscan failed downloading a particular URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UScanFailed {
    /// The URL uscan was downloading.
    pub url: String,
    /// The failure reason.
    pub reason: String,
}

impl Display for UScanFailed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UScan failed to download {}: {}", self.url, self.reason)
    }
}

problem_kind!(UScanFailed, "uscan-failed");

/// Version and source format disagree about nativeness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InconsistentSourceFormat {
    /// Whether the version looks native.
    pub version: bool,
    /// Whether the source format is native.
    pub source_format: bool,
}

impl Display for InconsistentSourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Inconsistent source format between version and source format")
    }
}

problem_kind!(InconsistentSourceFormat, "inconsistent-source-format");

/// `debian/upstream/metadata` did not parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamMetadataFileParseError {
    /// Path of the metadata file.
    pub path: PathBuf,
    /// Parser message.
    pub reason: String,
}

impl Display for UpstreamMetadataFileParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unable to parse {}: {}", self.path.display(), self.reason)
    }
}

problem_kind!(
    UpstreamMetadataFileParseError,
    "debian-upstream-metadata-invalid"
);

/// Packing the source tree failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgSourcePackFailed {
    /// The dpkg-source message.
    pub reason: String,
}

impl Display for DpkgSourcePackFailed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Packing source directory failed: {}", self.reason)
    }
}

problem_kind!(DpkgSourcePackFailed, "dpkg-source-pack-failed");

/// The changelog version was rejected as invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpkgBadVersion {
    /// The offending version string.
    pub version: String,
    /// Why it was rejected, when given.
    pub reason: Option<String>,
}

impl Display for DpkgBadVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "Version {} is invalid: {}", self.version, reason),
            None => write!(f, "Version {} is invalid", self.version),
        }
    }
}

problem_kind!(DpkgBadVersion, "dpkg-bad-version");

/// debcargo could not find a crate matching the requested version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDebcargoCrate {
    /// The crate name.
    #[serde(rename = "crate")]
    pub cratename: String,
    /// The requested version, when one was pinned.
    pub version: Option<String>,
}

impl MissingDebcargoCrate {
    /// Parse the `foo = 1.2.3` form debcargo prints.
    pub fn from_string(text: &str) -> Self {
        match text.split_once('=') {
            Some((name, version)) => Self {
                cratename: name.trim().to_string(),
                version: Some(version.trim().to_string()),
            },
            None => Self {
                cratename: text.trim().to_string(),
                version: None,
            },
        }
    }
}

impl Display for MissingDebcargoCrate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.version {
            Some(version) => write!(
                f,
                "debcargo can't find crate {} (version: {})",
                self.cratename, version
            ),
            None => write!(f, "debcargo can't find crate {}", self.cratename),
        }
    }
}

problem_kind!(MissingDebcargoCrate, "debcargo-missing-crate");

/// pristine-tar could not find the requested tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PristineTarTreeMissing {
    /// The treeish pristine-tar was asked for.
    pub treeish: String,
}

impl Display for PristineTarTreeMissing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pristine-tar can not find tree {}", self.treeish)
    }
}

problem_kind!(PristineTarTreeMissing, "pristine-tar-missing-tree");

/// A VCS revision referenced by the packaging is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRevision {
    /// The revision id.
    pub revision: String,
}

impl Display for MissingRevision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Missing revision: {}", self.revision)
    }
}

problem_kind!(MissingRevision, "missing-revision");

/// debcargo cannot represent a prerelease predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebcargoUnacceptablePredicate {
    /// The crate the predicate applies to.
    #[serde(rename = "crate")]
    pub cratename: String,
    /// The predicate text.
    pub predicate: String,
}

impl Display for DebcargoUnacceptablePredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Cannot represent prerelease part of dependency: {}",
            self.predicate
        )
    }
}

problem_kind!(DebcargoUnacceptablePredicate, "debcargo-unacceptable-predicate");

/// debcargo cannot represent a prerelease comparator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebcargoUnacceptableComparator {
    /// The crate the comparator applies to.
    #[serde(rename = "crate")]
    pub cratename: String,
    /// The comparator text.
    pub comparator: String,
}

impl Display for DebcargoUnacceptableComparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Cannot represent prerelease part of dependency: {}",
            self.comparator
        )
    }
}

problem_kind!(
    DebcargoUnacceptableComparator,
    "debcargo-unacceptable-comparator"
);

/// uscan was rate-limited by the upstream site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UScanTooManyRequests {
    /// The URL that returned 429.
    pub url: String,
}

impl Display for UScanTooManyRequests {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UScan: {}: too many requests", self.url)
    }
}

problem_kind!(UScanTooManyRequests, "uscan-too-many-requests");

/// The package does not build on the current architecture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureNotInList {
    /// The build architecture.
    pub arch: String,
    /// The architectures the package declares.
    pub arch_list: Vec<String>,
}

impl Display for ArchitectureNotInList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Architecture {} not a build arch ({:?})",
            self.arch, self.arch_list
        )
    }
}

problem_kind!(ArchitectureNotInList, "arch-not-in-list");

/// sbuild's space check found too little free disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientDiskSpace {
    /// KiB the build needs.
    pub needed: u64,
    /// KiB available.
    pub free: u64,
}

impl Display for InsufficientDiskSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Insufficient disk space for build. Need: {} KiB, available: {} KiB",
            self.needed, self.free
        )
    }
}

problem_kind!(InsufficientDiskSpace, "insufficient-disk-space");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Problem;

    #[test]
    fn test_unsatisfied_dependencies_serialise_to_relation_string() {
        let p = UnsatisfiedAptDependencies("libfoo (>= 1.0)".to_string());
        assert_eq!(p.json(), serde_json::json!("libfoo (>= 1.0)"));
        let rebuilt = crate::problem_from_json("unsatisfied-apt-dependencies", p.json()).unwrap();
        assert_eq!(&*rebuilt, &p as &dyn Problem);
    }

    #[test]
    fn test_debcargo_crate_from_string() {
        assert_eq!(
            MissingDebcargoCrate::from_string("utf8parse =0.10.1"),
            MissingDebcargoCrate {
                cratename: "utf8parse".to_string(),
                version: Some("0.10.1".to_string())
            }
        );
        assert_eq!(
            MissingDebcargoCrate::from_string("semver"),
            MissingDebcargoCrate {
                cratename: "semver".to_string(),
                version: None
            }
        );
    }

    #[test]
    fn test_crate_field_renamed_in_json() {
        let p = MissingDebcargoCrate::from_string("version-check = 0.9.2");
        assert_eq!(
            p.json(),
            serde_json::json!({"crate": "version-check", "version": "0.9.2"})
        );
    }
}
