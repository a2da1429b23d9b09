// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy for the generation engine.
//!
//! | Variant | Raised when | Caller outcome |
//! |---------|-------------|----------------|
//! | [`Error::Validation`] | Input is malformed, empty or inconsistent | Reject request |
//! | [`Error::Generation`] | A generator fails while assembling | Abort, no file map |
//! | [`Error::NotFound`] | Unknown project id | "not found" response |
//! | [`Error::Upstream`] | The diagram analyzer failed | Opaque failure |

use std::fmt;

use thiserror::Error;

use crate::validate::{Severity, ValidationIssue};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the engine and its handoff surface.
#[derive(Debug, Error)]
pub enum Error {
    /// The analysis result was rejected before generation started.
    #[error("invalid analysis result: {0}")]
    Validation(ValidationReport),

    /// A generator failed while assembling the project.
    #[error("failed to generate project ({stage}): {message}")]
    Generation {
        /// Assembly stage that failed (e.g. `entities`, `schema`).
        stage:   &'static str,
        /// Human-readable cause.
        message: String
    },

    /// No generated project is stored under this id.
    #[error("project not found: {project_id}")]
    NotFound {
        /// Requested project id.
        project_id: String
    },

    /// The upstream diagram analyzer failed.
    #[error("diagram analysis failed: {message}")]
    Upstream {
        /// Message reported by the analyzer.
        message: String
    },

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Writing generated files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error)
}

impl Error {
    /// Build a validation error carrying a single issue.
    pub fn invalid(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationReport::new(vec![ValidationIssue::error(
            location, message
        )]))
    }

    /// Build a generation error for the given stage.
    pub fn generation(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Generation {
            stage,
            message: message.into()
        }
    }

    /// Check if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a generation error.
    #[must_use]
    pub const fn is_generation(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }

    /// Check if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Blocking issues found while validating an analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>
}

impl ValidationReport {
    /// Wrap a list of issues.
    #[must_use]
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self {
            issues
        }
    }

    /// All issues, in discovery order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issues with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Check whether any issue was recorded at the given location prefix.
    #[must_use]
    pub fn mentions(&self, location: &str) -> bool {
        self.issues.iter().any(|i| i.location.starts_with(location))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.errors().map(ToString::to_string).collect();
        f.write_str(&rendered.join("; "))
    }
}
