//! Glob verification cache.
//!
//! During a configuration pass every glob a rule evaluates is registered with
//! a [`GlobVerificationManager`] together with the files it resolved to and
//! the call site that asked for it. The manager refuses contradictory results
//! for the same glob within one pass ([`GlobConflict`]) and, at the end of
//! the pass, writes a verification script plus a stamp file that the build
//! step uses to notice when the filesystem has drifted since configuration.

#![warn(missing_docs)]

pub mod conflict;
pub mod entry;
pub mod error;
pub mod generated;
pub mod key;
pub mod manager;
pub mod manifest;
pub mod script;

pub use conflict::GlobConflict;
pub use entry::{GlobCacheEntry, GlobRecord, Provenance};
pub use error::VerifyError;
pub use generated::GeneratedFile;
pub use key::GlobKey;
pub use manager::GlobVerificationManager;
pub use manifest::{ConfigFingerprint, GlobManifest, ManifestGlob};
pub use script::GeneratorInfo;
