// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming normalizer.
//!
//! Every generator derives identifiers through this module so that a column
//! name in `schema.sql`, a join column in an entity and a repository query
//! method always agree.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `orderItem` | [`to_snake_case`] | `order_item` |
//! | `OrderItem` | [`field_name`] | `orderItem` |
//! | `OrderItem` | [`route_segment`] | `order-items` |
//! | `com.acme.shop` | [`package_path`] | `com/acme/shop` |
//! | `My Shop` | [`artifact_id`] | `my-shop` |

use convert_case::{Case, Casing};

/// Convert a camelCase or PascalCase identifier to snake_case.
///
/// An underscore is inserted at every lowercase → uppercase transition and
/// the result is lowercased. Consecutive capitals are not split, so
/// `URLPath` becomes `urlpath`.
///
/// # Examples
///
/// ```
/// use blueprint_forge::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("orderItem"), "order_item");
/// assert_eq!(to_snake_case("OrderItem"), "order_item");
/// assert_eq!(to_snake_case("order_item"), "order_item");
/// ```
#[must_use]
pub fn to_snake_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut prev: Option<char> = None;

    for c in identifier.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push('_');
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_lowercase()
}

/// Convert a dotted package name to a relative directory path.
#[must_use]
pub fn package_path(package: &str) -> String {
    package.replace('.', "/")
}

/// Java field name for a reference to `entity` (`OrderItem` → `orderItem`).
#[must_use]
pub fn field_name(entity: &str) -> String {
    entity.to_case(Case::Camel)
}

/// Capitalize the first character (`email` → `Email`).
///
/// Used for derived query method names such as `findByEmail`.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}

/// Pluralize an English noun with the usual suffix rules.
#[must_use]
pub fn pluralize(s: &str) -> String {
    if s.ends_with('s') || s.ends_with("sh") || s.ends_with("ch") || s.ends_with('x') {
        format!("{}es", s)
    } else if s.ends_with('y') && !s.ends_with("ay") && !s.ends_with("ey") && !s.ends_with("oy") {
        format!("{}ies", &s[..s.len() - 1])
    } else {
        format!("{}s", s)
    }
}

/// REST route segment for an entity (`OrderItem` → `order-items`).
#[must_use]
pub fn route_segment(entity: &str) -> String {
    pluralize(&to_snake_case(entity)).to_case(Case::Kebab)
}

/// Maven artifact id / application name derived from a project name.
#[must_use]
pub fn artifact_id(project_name: &str) -> String {
    project_name.to_lowercase().replace(' ', "-")
}

/// Directory-safe project name used as the archive root.
///
/// Lowercases, replaces everything outside `[a-z0-9-]` with `-`, collapses
/// runs of `-` and trims them from both ends.
#[must_use]
pub fn sanitize_project_name(project_name: &str) -> String {
    let mut out = String::with_capacity(project_name.len());

    for c in project_name.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches('-').to_string()
}
