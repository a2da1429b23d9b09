// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity class generation.
//!
//! Relational variants produce JPA entities, the document variant produces
//! Spring Data MongoDB documents. Both use Lombok accessors and constructors.
//!
//! # Member Order
//!
//! 1. Synthetic `Long id`, only when no primary key is declared
//! 2. Attributes in declaration order, a declared primary key included
//! 3. Relation fields in relationship order
//! 4. Method stubs

use super::{
    context::{Context, IdField, RelationField, RelationMapping},
    java::{Imports, javadoc, method_stub, package_decl}
};
use crate::{
    error::{Error, Result},
    model::{Attribute, Entity, FileMap},
    naming::to_snake_case,
    types::{JavaTypeMapper, LogicalType, TypeMapper}
};

/// Generate one entity file per entity, keyed by file name.
///
/// # Errors
///
/// Returns [`Error::Generation`] when two entities map to the same file.
pub fn generate_all(ctx: &Context<'_>) -> Result<FileMap> {
    let mut files = FileMap::new();
    for entity in &ctx.analysis.entities {
        let file = format!("{}.java", entity.name);
        if !files.insert(file.clone(), generate(ctx, entity)) {
            return Err(Error::generation(
                "entities",
                format!("duplicate entity file {file}")
            ));
        }
    }
    Ok(files)
}

/// Generate the source of one entity class.
#[must_use]
pub fn generate(ctx: &Context<'_>, entity: &Entity) -> String {
    let document = ctx.profile.is_document();
    let relations = ctx.relations(&entity.name);
    let id = IdField::of(entity);

    let mut imports = Imports::new();
    for import in [
        "lombok.AllArgsConstructor",
        "lombok.Getter",
        "lombok.NoArgsConstructor",
        "lombok.Setter"
    ] {
        imports.add(import);
    }
    if document {
        imports.add("org.springframework.data.annotation.Id");
        imports.add("org.springframework.data.mongodb.core.mapping.Document");
        if entity.attributes.iter().any(|a| !a.primary_key) {
            imports.add("org.springframework.data.mongodb.core.mapping.Field");
        }
        if !relations.is_empty() {
            imports.add("org.springframework.data.mongodb.core.mapping.DBRef");
        }
    } else {
        imports.add("jakarta.persistence.*");
    }
    imports.add_type(id.java);
    for attr in &entity.attributes {
        imports.add_type(JavaTypeMapper.map_type(attr));
    }
    if relations.iter().any(|r| r.collection) {
        imports.add("java.util.ArrayList");
        imports.add("java.util.List");
    }

    let mut members = Vec::new();
    if id.synthetic {
        members.push(synthetic_id(&id, document));
    }
    for attr in &entity.attributes {
        members.push(attribute_field(attr, document));
    }
    for relation in relations {
        members.push(relation_field(relation));
    }
    for method in &entity.methods {
        let mut block = String::new();
        method_stub(&mut block, method);
        members.push(block);
    }

    let mut out = package_decl(ctx.base_package(), "entity");
    out.push_str(&imports.render());

    let description = entity
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map_or_else(|| format!("{} entity", entity.name), str::to_string);
    javadoc(&mut out, "", &description);

    let table = entity.table_name();
    if document {
        out.push_str(&format!("@Document(collection = \"{table}\")\n"));
    } else {
        out.push_str("@Entity\n");
        out.push_str(&format!("@Table(name = \"{table}\")\n"));
    }
    out.push_str("@Getter\n@Setter\n@NoArgsConstructor\n@AllArgsConstructor\n");
    out.push_str(&format!("public class {} {{\n\n", entity.name));
    out.push_str(&members.join("\n"));
    if !members.is_empty() {
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn synthetic_id(id: &IdField, document: bool) -> String {
    let mut block = String::from("    @Id\n");
    if !document {
        block.push_str("    @GeneratedValue(strategy = GenerationType.IDENTITY)\n");
    }
    block.push_str(&format!("    private {} {};\n", id.java.name, id.name));
    block
}

fn attribute_field(attr: &Attribute, document: bool) -> String {
    let mut block = String::new();
    if let Some(description) = attr.description.as_deref().filter(|d| !d.trim().is_empty()) {
        javadoc(&mut block, "    ", description);
    }

    let column = to_snake_case(&attr.name);
    let logical = LogicalType::of(attr);

    if attr.primary_key {
        block.push_str("    @Id\n");
        if !document && logical.is_integral() {
            block.push_str("    @GeneratedValue(strategy = GenerationType.IDENTITY)\n");
        }
    }

    if document {
        if !attr.primary_key {
            block.push_str(&format!("    @Field(\"{column}\")\n"));
        }
    } else {
        let mut args = vec![format!("name = \"{column}\"")];
        if !attr.nullable {
            args.push("nullable = false".to_string());
        }
        if attr.unique && !attr.primary_key {
            args.push("unique = true".to_string());
        }
        if logical == LogicalType::String
            && let Some(length) = attr.length
        {
            args.push(format!("length = {length}"));
        }
        block.push_str(&format!("    @Column({})\n", args.join(", ")));
    }

    block.push_str(&format!(
        "    private {} {};\n",
        logical.java().name,
        attr.name
    ));
    block
}

fn relation_field(field: &RelationField) -> String {
    let mut block = String::new();

    match &field.mapping {
        RelationMapping::JoinColumn(column) => {
            block.push_str(&format!("    @{}\n", field.annotation));
            block.push_str(&format!("    @JoinColumn(name = \"{column}\")\n"));
        }
        RelationMapping::JoinTable {
            table,
            join_column,
            inverse_join_column
        } => {
            block.push_str(&format!("    @{}\n", field.annotation));
            block.push_str("    @JoinTable(\n");
            block.push_str(&format!("        name = \"{table}\",\n"));
            block.push_str(&format!(
                "        joinColumns = @JoinColumn(name = \"{join_column}\"),\n"
            ));
            block.push_str(&format!(
                "        inverseJoinColumns = @JoinColumn(name = \"{inverse_join_column}\")\n"
            ));
            block.push_str("    )\n");
        }
        RelationMapping::MappedBy { field: owner, cascade } => {
            let cascade = if *cascade {
                ", cascade = CascadeType.ALL"
            } else {
                ""
            };
            block.push_str(&format!(
                "    @{}(mappedBy = \"{owner}\"{cascade})\n",
                field.annotation
            ));
        }
        RelationMapping::Reference => block.push_str("    @DBRef\n")
    }

    if field.collection {
        block.push_str(&format!(
            "    private {} {} = new ArrayList<>();\n",
            field.java_type(),
            field.name
        ));
    } else {
        block.push_str(&format!(
            "    private {} {};\n",
            field.java_type(),
            field.name
        ));
    }
    block
}
