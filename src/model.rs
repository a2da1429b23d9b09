// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Input and output data model of the engine.
//!
//! # Architecture
//!
//! ```text
//! model.rs (coordinator)
//! ├── analysis.rs  - AnalysisResult and its parts (input contract)
//! ├── file_map.rs  - FileMap, ordered path → content map
//! └── project.rs   - GeneratedProject and GenerationStatistics (output)
//! ```
//!
//! The input side mirrors the JSON document produced by the upstream diagram
//! analyzer. It is deserialized once, validated, and then only read.

mod analysis;
mod file_map;
mod project;

pub use analysis::{
    AnalysisResult, Attribute, DiagramType, Entity, FlowchartProgram, Method, RelationType,
    Relationship, Service, Step, StepKind
};
pub use file_map::FileMap;
pub use project::{GeneratedProject, GenerationStatistics};
