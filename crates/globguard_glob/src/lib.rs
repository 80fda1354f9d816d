//! Filesystem resolution of glob requests.
//!
//! A [`GlobRequest`] carries the same five parameters that identify a cached
//! glob (recursion, directory listing, symlink following, relative base and
//! expression). [`FsResolver`] evaluates it against the real filesystem and
//! returns the sorted list of matches, which is what the verification cache
//! records and what a later check compares against.

#![warn(missing_docs)]

pub mod error;
pub mod path;
pub mod request;
pub mod resolver;

pub use error::GlobError;
pub use request::GlobRequest;
pub use resolver::{FsResolver, GlobResolver};
