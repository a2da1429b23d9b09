// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Service stub generation for free-form `services[]` entries.

use super::java::{javadoc, method_stub, package_decl};
use crate::{
    error::{Error, Result},
    model::{FileMap, Service}
};

/// Generate one service file per service, keyed by file name.
///
/// # Errors
///
/// Returns [`Error::Generation`] when two services share a name.
pub fn generate_all(base_package: &str, services: &[Service]) -> Result<FileMap> {
    let mut files = FileMap::new();
    for service in services {
        let file = format!("{}.java", service.name);
        if !files.insert(file.clone(), generate(base_package, service)) {
            return Err(Error::generation(
                "services",
                format!("duplicate service file {file}")
            ));
        }
    }
    Ok(files)
}

/// Generate the source of one service class.
#[must_use]
pub fn generate(base_package: &str, service: &Service) -> String {
    let mut out = package_decl(base_package, "service");
    out.push_str("import lombok.RequiredArgsConstructor;\n");
    out.push_str("import lombok.extern.slf4j.Slf4j;\n");
    out.push_str("import org.springframework.stereotype.Service;\n\n");

    let description = service
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(&service.name);
    javadoc(&mut out, "", description);
    out.push_str("@Slf4j\n@Service\n@RequiredArgsConstructor\n");
    out.push_str(&format!("public class {} {{\n", service.name));

    for method in &service.methods {
        out.push('\n');
        method_stub(&mut out, method);
    }

    out.push_str("}\n");
    out
}
