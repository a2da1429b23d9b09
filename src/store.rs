// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage of generated projects between generation, editing and download.
//!
//! [`ProjectStore`] is the seam; [`MemoryProjectStore`] keeps projects in a
//! bounded in-process cache that evicts by capacity and time-to-live.

use std::{sync::Arc, time::Duration};

use moka::sync::Cache;

use crate::{config::StoreConfig, model::GeneratedProject};

/// Keyed storage of generated projects.
pub trait ProjectStore: Send + Sync {
    /// Store a project under its id, replacing any previous entry.
    fn put(&self, project: GeneratedProject) -> Arc<GeneratedProject>;

    /// Fetch a project by id.
    fn get(&self, project_id: &str) -> Option<Arc<GeneratedProject>>;

    /// Remove a project, returning it if it was present.
    fn delete(&self, project_id: &str) -> Option<Arc<GeneratedProject>>;
}

/// In-memory [`ProjectStore`] backed by a `moka` cache.
#[derive(Clone)]
pub struct MemoryProjectStore {
    cache: Cache<String, Arc<GeneratedProject>>
}

impl MemoryProjectStore {
    /// Create a store holding at most `max_projects` entries for `ttl_seconds`.
    #[must_use]
    pub fn new(max_projects: u64, ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_projects)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();
        Self {
            cache
        }
    }

    /// Create a store from configuration.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.max_projects, config.ttl_seconds)
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Check whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryProjectStore {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

impl std::fmt::Debug for MemoryProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryProjectStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn put(&self, project: GeneratedProject) -> Arc<GeneratedProject> {
        let project = Arc::new(project);
        self.cache
            .insert(project.project_id.clone(), Arc::clone(&project));
        tracing::debug!(project_id = %project.project_id, "project stored");
        project
    }

    fn get(&self, project_id: &str) -> Option<Arc<GeneratedProject>> {
        let found = self.cache.get(project_id);
        if found.is_none() {
            tracing::warn!(project_id, "project not in store");
        }
        found
    }

    fn delete(&self, project_id: &str) -> Option<Arc<GeneratedProject>> {
        self.cache.remove(project_id)
    }
}
