//! The problem taxonomy.
//!
//! One struct per kind, grouped by the tool family the diagnostic belongs
//! to. Payload structs derive serde and register themselves with
//! [`crate::problem_kind!`], which also wires up the JSON round-trip
//! registry.

/// Problems reported by autopkgtest runs.
pub mod autopkgtest;

/// Problems common to any build environment.
pub mod common;

/// Problems specific to Debian packaging tooling (dpkg, apt, sbuild,
/// uscan, debcargo).
pub mod debian;
