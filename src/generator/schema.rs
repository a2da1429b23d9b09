// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL DDL generation.
//!
//! # Layout
//!
//! ```text
//! -- header
//! DROP TABLE IF EXISTS <table> CASCADE;     reverse declaration order
//!
//! -- Table: <Name>
//! CREATE TABLE <table> (
//!     <column> <TYPE> [PRIMARY KEY] [NOT NULL] [UNIQUE] [DEFAULT x]
//! );
//!
//! COMMENT ON TABLE <table> IS '<Name> entity table';
//!
//! -- Foreign Key Constraints
//! -- ALTER TABLE <src> ADD CONSTRAINT fk_<src>_<tgt> ...
//! ```
//!
//! Foreign keys are emitted as comments. The owning column depends on the
//! cardinality, and the entity layer creates the real join columns.

use crate::{
    model::{AnalysisResult, Attribute, Entity, Relationship},
    naming::to_snake_case,
    types::sql_type
};

/// Generate `schema.sql` for every entity of the analysis.
///
/// The caller guarantees a validated, non-empty entity list.
///
/// # Examples
///
/// ```
/// use blueprint_forge::{
///     generator::generate_schema,
///     model::{AnalysisResult, Attribute, Entity}
/// };
///
/// let analysis = AnalysisResult {
///     entities: vec![Entity {
///         name: "Tag".into(),
///         attributes: vec![Attribute::new("label", "String")],
///         ..Entity::default()
///     }],
///     ..AnalysisResult::default()
/// };
///
/// let ddl = generate_schema(&analysis);
/// assert!(ddl.contains("CREATE TABLE tag (\n    label VARCHAR(255)\n);"));
/// ```
#[must_use]
pub fn generate_schema(analysis: &AnalysisResult) -> String {
    let mut schema = String::new();
    schema.push_str("-- Auto-generated SQL schema\n");
    schema.push_str("-- Generated from diagram analysis\n\n");

    schema.push_str("-- Drop existing tables\n");
    for entity in analysis.entities.iter().rev() {
        schema.push_str(&format!(
            "DROP TABLE IF EXISTS {} CASCADE;\n",
            entity.table_name()
        ));
    }
    schema.push('\n');

    for entity in &analysis.entities {
        schema.push_str(&table_ddl(entity));
        schema.push('\n');
    }

    if !analysis.relationships.is_empty() {
        schema.push_str("-- Foreign Key Constraints\n");
        for rel in &analysis.relationships {
            schema.push_str(&foreign_key_comment(analysis, rel));
        }
    }

    schema
}

fn table_ddl(entity: &Entity) -> String {
    let table = entity.table_name();
    let columns: Vec<String> = entity.attributes.iter().map(column_ddl).collect();

    let mut ddl = format!("-- Table: {}\nCREATE TABLE {} (\n", entity.name, table);
    if !columns.is_empty() {
        ddl.push_str("    ");
        ddl.push_str(&columns.join(",\n    "));
        ddl.push('\n');
    }
    ddl.push_str(");\n");
    ddl.push_str(&format!(
        "\nCOMMENT ON TABLE {} IS '{} entity table';\n",
        table,
        entity.name.replace('\'', "''")
    ));
    ddl
}

fn column_ddl(attr: &Attribute) -> String {
    let mut column = format!("{} {}", to_snake_case(&attr.name), sql_type(attr));

    if attr.primary_key {
        column.push_str(" PRIMARY KEY");
    }
    if !attr.nullable {
        column.push_str(" NOT NULL");
    }
    if attr.unique && !attr.primary_key {
        column.push_str(" UNIQUE");
    }
    if let Some(default) = &attr.default_value {
        column.push_str(" DEFAULT ");
        column.push_str(default);
    }

    column
}

fn foreign_key_comment(analysis: &AnalysisResult, rel: &Relationship) -> String {
    let source = analysis.table_of(&rel.source_entity);
    let target = analysis.table_of(&rel.target_entity);
    format!(
        "-- ALTER TABLE {source} ADD CONSTRAINT fk_{source}_{target} FOREIGN KEY ({target}_id) REFERENCES {target}(id);\n"
    )
}
