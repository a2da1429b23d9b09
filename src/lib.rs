// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Quick Navigation
//!
//! - **One call**: [`assemble`] turns an [`AnalysisResult`] into a
//!   [`GeneratedProject`]
//! - **Request surface**: [`GenerationService`] adds analysis, storage,
//!   editing and download
//! - **Single files**: [`generator`] exposes every generator on its own
//! - **Variants**: [`DatabaseVariant`] and its [`VariantProfile`]
//!
//! # Architecture
//!
//! ```text
//! lib.rs
//! ├── model       - input analysis, FileMap, generated project
//! ├── validate    - structural checks before generation
//! ├── naming      - identifier, table, route and package normalization
//! ├── types       - logical type → SQL / Java mapping
//! ├── variant     - database variant profiles and config templates
//! ├── generator   - schema, entity, repository, controller, service,
//! │                 flowchart and scaffold generators
//! ├── assembler   - ordered assembly of one project
//! ├── store       - project store (moka-backed)
//! ├── package     - archive layout and disk materialization
//! ├── service     - request-level facade
//! ├── config      - layered configuration
//! └── error       - error taxonomy
//! ```
//!
//! Generators are pure functions of their input. The only shared mutable
//! state is the project store.

pub mod assembler;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod package;
pub mod prelude;
pub mod service;
pub mod store;
pub mod types;
pub mod validate;
pub mod variant;

pub use crate::{
    assembler::{AssemblerOptions, ProjectAssembler, assemble},
    config::ForgeConfig,
    error::{Error, Result, ValidationReport},
    generator::FlowchartMode,
    model::{AnalysisResult, FileMap, GeneratedProject, GenerationStatistics},
    service::GenerationService,
    variant::{DatabaseVariant, VariantProfile}
};
