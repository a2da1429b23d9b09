// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FileMap;
use crate::variant::DatabaseVariant;

/// A generated project: every file plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    /// Fresh unique id (UUID v4).
    pub project_id:      String,
    /// Project name copied from the analysis.
    pub project_name:    String,
    /// Base package copied from the analysis.
    pub base_package:    String,
    /// Database variant the project targets.
    pub database:        DatabaseVariant,
    /// Relative path → content, in generation order.
    pub generated_files: FileMap,
    /// Generation timestamp.
    pub generated_at:    DateTime<Utc>,
    /// Counts and timing.
    pub statistics:      GenerationStatistics
}

/// Counts over the produced file map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatistics {
    /// Entity files.
    pub entity_count:       usize,
    /// Repository files.
    pub repository_count:   usize,
    /// Controller files.
    pub controller_count:   usize,
    /// All files.
    pub total_files:        usize,
    /// Wall-clock assembly time.
    pub generation_time_ms: u64
}
