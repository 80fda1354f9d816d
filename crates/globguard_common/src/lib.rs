//! Shared foundational types used across the globguard crates.
//!
//! Currently this is the content hash used to fingerprint configuration
//! files, so that a later `check` can tell whether the inputs of the last
//! configuration pass are still the ones on disk.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
