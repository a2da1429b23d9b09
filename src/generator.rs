// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Source generators.
//!
//! Every generator is a pure function of the [`Context`] (analysis result plus
//! variant profile) and returns text. Nothing here touches the file system or
//! shared state.
//!
//! # Generated Files
//!
//! | Generator | Output | Per |
//! |-----------|--------|-----|
//! | [`entity`] | `entity/<Name>.java` | entity |
//! | [`repository`] | `repository/<Name>Repository.java` | entity |
//! | [`controller`] | `controller/<Name>Controller.java` | entity |
//! | [`service`] | `service/<Name>.java` | service |
//! | [`flowchart`] | `service/<ServiceName>.java` | flowchart |
//! | [`schema`] | `schema.sql` | project |
//! | [`scaffold`] | `application.yml`, `pom.xml`, `docker-compose.yml`, `Application.java`, `README.md` | project |
//!
//! # Architecture
//!
//! ```text
//! generator.rs (this module)
//! ├── context.rs       → Context, relation index, id fields
//! ├── java.rs          → Java source helpers (imports, method stubs)
//! ├── schema.rs        → DDL
//! ├── entity.rs        → JPA / document entities
//! ├── repository.rs    → Spring Data repositories
//! ├── controller.rs    → REST controllers
//! ├── service.rs       → service stubs
//! ├── flowchart.rs     → flowchart transpiler + service
//! └── scaffold.rs      → build, config and docs files
//! ```

pub mod context;
pub mod controller;
pub mod entity;
pub mod flowchart;
pub mod java;
pub mod repository;
pub mod scaffold;
pub mod schema;
pub mod service;

pub use context::{Context, IdField, RelationField, RelationMapping};
pub use flowchart::{FlowchartMode, transpile};
pub use schema::generate_schema;
