// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! REST controller generation.
//!
//! # Endpoints
//!
//! | Method | Path | Success | Missing id |
//! |--------|------|---------|------------|
//! | `GET` | `/api/<resource>` | 200 list | |
//! | `GET` | `/api/<resource>/{id}` | 200 | 404 |
//! | `POST` | `/api/<resource>` | 201 | |
//! | `PUT` | `/api/<resource>/{id}` | 200 | 404 |
//! | `DELETE` | `/api/<resource>/{id}` | 204 | 404 |

use super::{
    context::{Context, IdField},
    java::{Imports, package_decl}
};
use crate::{
    error::{Error, Result},
    model::{Entity, FileMap},
    naming::{capitalize, field_name, route_segment}
};

/// Generate one controller file per entity, keyed by file name.
///
/// # Errors
///
/// Returns [`Error::Generation`] when two entities map to the same file.
pub fn generate_all(ctx: &Context<'_>) -> Result<FileMap> {
    let mut files = FileMap::new();
    for entity in &ctx.analysis.entities {
        let file = format!("{}Controller.java", entity.name);
        if !files.insert(file.clone(), generate(ctx, entity)) {
            return Err(Error::generation(
                "controllers",
                format!("duplicate controller file {file}")
            ));
        }
    }
    Ok(files)
}

/// Generate the source of one controller class.
#[must_use]
pub fn generate(ctx: &Context<'_>, entity: &Entity) -> String {
    let base = ctx.base_package();
    let name = &entity.name;
    let var = field_name(name);
    let repo_type = format!("{name}Repository");
    let repo = format!("{var}Repository");
    let id = IdField::of(entity);
    let id_type = id.java.name;
    let setter = format!("set{}", capitalize(&id.name));

    let mut imports = Imports::new();
    imports.add(format!("{base}.entity.{name}"));
    imports.add(format!("{base}.repository.{repo_type}"));
    imports.add("org.springframework.http.HttpStatus");
    imports.add("org.springframework.http.ResponseEntity");
    imports.add("org.springframework.web.bind.annotation.*");
    imports.add("java.util.List");
    imports.add_type(id.java);

    let mut out = package_decl(base, "controller");
    out.push_str(&imports.render());
    out.push_str("@RestController\n");
    out.push_str(&format!(
        "@RequestMapping(\"/api/{}\")\n",
        route_segment(name)
    ));
    out.push_str(&format!("public class {name}Controller {{\n\n"));

    out.push_str(&format!("    private final {repo_type} {repo};\n\n"));
    out.push_str(&format!(
        "    public {name}Controller({repo_type} {repo}) {{\n        this.{repo} = {repo};\n    }}\n\n"
    ));

    out.push_str(&format!(
        "    @GetMapping
    public ResponseEntity<List<{name}>> findAll() {{
        return ResponseEntity.ok({repo}.findAll());
    }}

    @GetMapping(\"/{{id}}\")
    public ResponseEntity<{name}> findById(@PathVariable {id_type} id) {{
        return {repo}.findById(id)
                .map(ResponseEntity::ok)
                .orElse(ResponseEntity.notFound().build());
    }}

    @PostMapping
    public ResponseEntity<{name}> create(@RequestBody {name} {var}) {{
        return ResponseEntity.status(HttpStatus.CREATED).body({repo}.save({var}));
    }}

    @PutMapping(\"/{{id}}\")
    public ResponseEntity<{name}> update(@PathVariable {id_type} id, @RequestBody {name} {var}) {{
        if (!{repo}.existsById(id)) {{
            return ResponseEntity.notFound().build();
        }}
        {var}.{setter}(id);
        return ResponseEntity.ok({repo}.save({var}));
    }}

    @DeleteMapping(\"/{{id}}\")
    public ResponseEntity<Void> delete(@PathVariable {id_type} id) {{
        if (!{repo}.existsById(id)) {{
            return ResponseEntity.notFound().build();
        }}
        {repo}.deleteById(id);
        return ResponseEntity.noContent().build();
    }}
}}
"
    ));
    out
}
