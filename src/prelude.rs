// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use blueprint_forge::prelude::*;
//!
//! let analysis = AnalysisResult::from_json(
//!     r#"{"projectName":"Shop","basePackage":"com.shop",
//!         "entities":[{"name":"Order","attributes":[{"name":"id","type":"Long","primaryKey":true}]}]}"#
//! )
//! .unwrap();
//! let project = assemble(&analysis, DatabaseVariant::H2).unwrap();
//! assert!(project.generated_files.contains("src/main/resources/schema.sql"));
//! ```

pub use crate::{
    AnalysisResult, DatabaseVariant, Error, FileMap, FlowchartMode, ForgeConfig,
    GeneratedProject, GenerationService, ProjectAssembler, Result, assemble,
    model::{Attribute, DiagramType, Entity, RelationType, Relationship},
    package::{ProjectArchive, archive, write_to_disk},
    service::{DiagramAnalysisRequest, DiagramAnalyzer, FileUpdateRequest, GenerateRequest},
    store::{MemoryProjectStore, ProjectStore}
};
