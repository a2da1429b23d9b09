// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository interface generation.
//!
//! Generates a Spring Data repository per entity with derived queries:
//!
//! | Source | Methods |
//! |--------|---------|
//! | Unique non-key attribute `email` | `findByEmail`, `existsByEmail` |
//! | Owning single reference `customer` | `findByCustomerId` |

use super::{
    context::{Context, IdField},
    java::{Imports, package_decl}
};
use crate::{
    error::{Error, Result},
    model::{Entity, FileMap},
    naming::capitalize,
    types::{JavaTypeMapper, TypeMapper}
};

/// Generate one repository file per entity, keyed by file name.
///
/// # Errors
///
/// Returns [`Error::Generation`] when two entities map to the same file.
pub fn generate_all(ctx: &Context<'_>) -> Result<FileMap> {
    let mut files = FileMap::new();
    for entity in &ctx.analysis.entities {
        let file = format!("{}Repository.java", entity.name);
        if !files.insert(file.clone(), generate(ctx, entity)) {
            return Err(Error::generation(
                "repositories",
                format!("duplicate repository file {file}")
            ));
        }
    }
    Ok(files)
}

/// Generate the source of one repository interface.
#[must_use]
pub fn generate(ctx: &Context<'_>, entity: &Entity) -> String {
    let base = ctx.base_package();
    let name = &entity.name;
    let id = IdField::of(entity);
    let (parent, parent_import) = if ctx.profile.is_document() {
        (
            "MongoRepository",
            "org.springframework.data.mongodb.repository.MongoRepository"
        )
    } else {
        (
            "JpaRepository",
            "org.springframework.data.jpa.repository.JpaRepository"
        )
    };

    let mut imports = Imports::new();
    imports.add(format!("{base}.entity.{name}"));
    imports.add(parent_import);
    imports.add("org.springframework.stereotype.Repository");
    imports.add_type(id.java);

    let mut queries = Vec::new();

    for attr in entity.unique_attributes() {
        let ty = JavaTypeMapper.map_type(attr);
        imports.add_type(ty);
        imports.add("java.util.Optional");
        let suffix = capitalize(&attr.name);
        queries.push(format!(
            "    Optional<{name}> findBy{suffix}({} {});\n",
            ty.name, attr.name
        ));
        queries.push(format!(
            "    boolean existsBy{suffix}({} {});\n",
            ty.name, attr.name
        ));
    }

    for relation in ctx.relations(name).iter().filter(|r| r.is_owning_single()) {
        let target_id = ctx.id_field(&relation.target);
        imports.add_type(target_id.java);
        imports.add("java.util.List");
        queries.push(format!(
            "    List<{name}> findBy{}{}({} {}{});\n",
            capitalize(&relation.name),
            capitalize(&target_id.name),
            target_id.java.name,
            relation.name,
            capitalize(&target_id.name)
        ));
    }

    let mut out = package_decl(base, "repository");
    out.push_str(&imports.render());
    out.push_str("@Repository\n");
    out.push_str(&format!(
        "public interface {name}Repository extends {parent}<{name}, {}> {{\n",
        id.java.name
    ));
    if !queries.is_empty() {
        out.push('\n');
        out.push_str(&queries.join("\n"));
    }
    out.push_str("}\n");
    out
}
