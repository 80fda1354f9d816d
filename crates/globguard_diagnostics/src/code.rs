//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A category prefix plus a numeric identifier, displayed as e.g. `E101`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// The same glob produced two different file lists in one pass.
    pub const INCONSISTENT_GLOB: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
    /// The verification script or stamp file could not be written.
    pub const ARTIFACT_IO: DiagnosticCode = DiagnosticCode::new(Category::Error, 201);
    /// The glob manifest could not be written.
    pub const MANIFEST_IO: DiagnosticCode = DiagnosticCode::new(Category::Error, 202);
    /// A glob could not be resolved against the filesystem.
    pub const GLOB_RESOLUTION: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);
    /// A glob result drifted since the last configuration pass.
    pub const GLOB_DRIFT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 401);
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
