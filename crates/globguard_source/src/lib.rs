//! Configuration text and call-site backtraces.
//!
//! [`SourceDb`] keeps the text of every configuration file read during a
//! pass so that byte offsets reported by the TOML parser can be turned into
//! the [`Frame`]s of a [`Backtrace`]. Backtraces are recorded as provenance
//! for every glob request and rendered in script comments and diagnostics.

#![warn(missing_docs)]

pub mod backtrace;
pub mod source_db;
pub mod source_file;

pub use backtrace::{Backtrace, Frame};
pub use source_db::{FileId, SourceDb};
pub use source_file::SourceFile;
