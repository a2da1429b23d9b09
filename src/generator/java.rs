// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Java source helpers shared by the generators.

use std::collections::BTreeSet;

use crate::{model::Method, types::JavaType};

/// Sorted, de-duplicated import list.
///
/// Third-party imports come first, `java.*` imports after a blank line.
#[derive(Debug, Default)]
pub struct Imports(BTreeSet<String>);

impl Imports {
    /// Empty import list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully qualified import.
    pub fn add(&mut self, import: impl Into<String>) {
        self.0.insert(import.into());
    }

    /// Add the import a Java type needs, if any.
    pub fn add_type(&mut self, ty: JavaType) {
        if let Some(import) = ty.import {
            self.add(import);
        }
    }

    /// Render `import` lines followed by a blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let (java, other): (Vec<&String>, Vec<&String>) =
            self.0.iter().partition(|i| i.starts_with("java."));

        let mut out = String::new();
        for import in &other {
            out.push_str(&format!("import {import};\n"));
        }
        if !other.is_empty() && !java.is_empty() {
            out.push('\n');
        }
        for import in &java {
            out.push_str(&format!("import {import};\n"));
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// `package <base>.<layer>;` followed by a blank line.
#[must_use]
pub fn package_decl(base_package: &str, layer: &str) -> String {
    if layer.is_empty() {
        format!("package {base_package};\n\n")
    } else {
        format!("package {base_package}.{layer};\n\n")
    }
}

/// Javadoc block at the given indentation.
pub fn javadoc(out: &mut String, indent: &str, text: &str) {
    out.push_str(&format!("{indent}/**\n"));
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {line}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n"));
}

/// Escape text for a Java string literal body.
#[must_use]
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '\t' => out.push_str("\\t"),
            _ => out.push(c)
        }
    }
    out
}

/// Declared return type; blank or missing means `void`.
#[must_use]
pub fn return_type(method: &Method) -> &str {
    method
        .return_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("void")
}

/// Convert a `"name: Type"` parameter to Java's `Type name`.
///
/// Parameters without a colon are already in Java form and are kept.
#[must_use]
pub fn parameter(raw: &str) -> String {
    match raw.split_once(':') {
        Some((name, ty)) if !name.trim().is_empty() && !ty.trim().is_empty() => {
            format!("{} {}", ty.trim(), name.trim())
        }
        _ => raw.trim().to_string()
    }
}

/// Comma-separated Java parameter list.
#[must_use]
pub fn parameter_list(params: &[String]) -> String {
    params
        .iter()
        .map(|p| parameter(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Placeholder returned from a stub, `None` for `void`.
#[must_use]
pub fn placeholder(return_type: &str) -> Option<&'static str> {
    match return_type {
        "void" => None,
        "boolean" => Some("false"),
        "int" | "long" | "short" | "byte" | "double" | "float" | "char" => Some("0"),
        _ => Some("null")
    }
}

/// Pseudocode lines of an algorithm.
///
/// Lines are separated by real newlines or by the two-character escape
/// `\n` analyzers emit inside JSON strings.
#[must_use]
pub fn algorithm_lines(algorithm: &str) -> Vec<&str> {
    algorithm
        .split('\n')
        .flat_map(|line| line.split("\\n"))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Render a method stub at class-member indentation.
pub fn method_stub(out: &mut String, method: &Method) {
    let ret = return_type(method);
    let visibility = method
        .visibility
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("public");

    if let Some(description) = method.description.as_deref().filter(|d| !d.trim().is_empty()) {
        javadoc(out, "    ", description);
    }
    out.push_str(&format!(
        "    {visibility} {ret} {}({}) {{\n",
        method.name,
        parameter_list(&method.parameters)
    ));

    if let Some(algorithm) = &method.algorithm {
        let lines = algorithm_lines(algorithm);
        if !lines.is_empty() {
            out.push_str("        // Algorithm:\n");
            for line in lines {
                out.push_str(&format!("        // {line}\n"));
            }
        }
    }
    out.push_str(&format!("        // TODO: Implement {}\n", method.name));
    if let Some(value) = placeholder(ret) {
        out.push_str(&format!("        return {value};\n"));
    }
    out.push_str("    }\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_become_java_declarations() {
        assert_eq!(parameter("amount: BigDecimal"), "BigDecimal amount");
        assert_eq!(parameter(" id :Long "), "Long id");
        assert_eq!(parameter("String name"), "String name");
        assert_eq!(
            parameter_list(&["a: int".into(), "".into(), "b: String".into()]),
            "int a, String b"
        );
    }

    #[test]
    fn placeholders_match_return_type() {
        assert_eq!(placeholder("void"), None);
        assert_eq!(placeholder("boolean"), Some("false"));
        assert_eq!(placeholder("int"), Some("0"));
        assert_eq!(placeholder("Boolean"), Some("null"));
        assert_eq!(placeholder("List<Order>"), Some("null"));
    }

    #[test]
    fn algorithm_splits_on_escape_and_newline() {
        assert_eq!(
            algorithm_lines("load order\\ncheck stock\nship"),
            ["load order", "check stock", "ship"]
        );
    }

    #[test]
    fn imports_group_java_last() {
        let mut imports = Imports::new();
        imports.add("java.util.List");
        imports.add("lombok.Getter");
        imports.add("java.util.List");
        imports.add("jakarta.persistence.*");
        assert_eq!(
            imports.render(),
            "import jakarta.persistence.*;\nimport lombok.Getter;\n\nimport java.util.List;\n\n"
        );
        assert_eq!(Imports::new().render(), "");
    }

    #[test]
    fn method_stub_layout() {
        let method = Method {
            name: "total".into(),
            return_type: Some("BigDecimal".into()),
            parameters: vec!["discount: int".into()],
            description: Some("Compute total".into()),
            visibility: None,
            algorithm: Some("sum items\\napply discount".into())
        };
        let mut out = String::new();
        method_stub(&mut out, &method);
        assert_eq!(
            out,
            "    /**\n     * Compute total\n     */\n    public BigDecimal total(int discount) {\n        // Algorithm:\n        // sum items\n        // apply discount\n        // TODO: Implement total\n        return null;\n    }\n"
        );
    }

    #[test]
    fn void_stub_has_no_return() {
        let method = Method {
            name: "reset".into(),
            visibility: Some("protected".into()),
            ..Method::default()
        };
        let mut out = String::new();
        method_stub(&mut out, &method);
        assert!(out.starts_with("    protected void reset() {\n"));
        assert!(!out.contains("return"));
    }

    #[test]
    fn string_literal_escapes() {
        assert_eq!(string_literal(r#"say "hi"\"#), r#"say \"hi\"\\"#);
    }
}
