// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Analysis result validator.
//!
//! Checks an [`AnalysisResult`] for structural errors before any file is
//! generated. Errors block generation; warnings are logged and generation
//! proceeds.
//!
//! | Check | Location | Severity |
//! |-------|----------|----------|
//! | At least one entity | `entities` | Error |
//! | Project name / base package present | `projectName`, `basePackage` | Error |
//! | Base package made of dotted Java identifiers | `basePackage` | Error |
//! | Entity names present, unique and Java identifiers | `entities[i].name` | Error |
//! | Table names unique | `entities[i].tableName` | Error |
//! | Attribute names present and unique per entity | `entities[i].attributes[j]` | Error |
//! | Relationship endpoints declared | `relationships[i].sourceEntity` | Error |
//! | Relation fields clash with no other field | `relationships[i]` | Error |
//! | Service names present and Java identifiers | `services[i].name` | Error |
//! | Flowchart service / method names are Java identifiers | `flowchartLogic` | Error |
//! | Entity without primary key | `entities[i]` | Warning |
//! | DECISION without condition | `flowchartLogic.steps[i]` | Warning |
//! | Branch index out of range | `flowchartLogic.steps[i].trueNext` | Warning |
//!
//! Entity, service and flowchart names become file names and the base package
//! becomes a directory path, so anything other than a Java identifier is
//! rejected before it can reach the file tree.

use std::{
    collections::{HashMap, HashSet},
    fmt
};

use crate::{
    error::{Error, Result, ValidationReport},
    generator::context::relational_fields,
    model::{AnalysisResult, StepKind}
};

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_"
];

/// Check whether `name` is a legal Java identifier.
///
/// ```
/// use blueprint_forge::validate::is_java_identifier;
///
/// assert!(is_java_identifier("OrderItem"));
/// assert!(is_java_identifier("$cache_1"));
/// assert!(!is_java_identifier("../escaped"));
/// assert!(!is_java_identifier("Order Item"));
/// assert!(!is_java_identifier("class"));
/// ```
#[must_use]
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&name)
}

/// Check whether `package` is a dotted sequence of Java identifiers.
#[must_use]
pub fn is_java_package(package: &str) -> bool {
    package.split('.').all(is_java_identifier)
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Human-readable description of the problem.
    pub message:  String,
    /// Location in the analysis document (e.g. `entities[0].attributes[1]`).
    pub location: String,
    /// Whether this blocks generation.
    pub severity: Severity
}

/// Severity of a [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks generation.
    Error,
    /// Advisory; generation proceeds.
    Warning
}

impl ValidationIssue {
    /// Blocking issue.
    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message:  message.into(),
            location: location.into(),
            severity: Severity::Error
        }
    }

    /// Advisory issue.
    pub fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message:  message.into(),
            location: location.into(),
            severity: Severity::Warning
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN"
        };
        write!(f, "[{}] {}: {}", tag, self.location, self.message)
    }
}

/// Validate an analysis result and return every issue found.
///
/// An empty `Vec` means the result is clean.
#[must_use]
pub fn validate(analysis: &AnalysisResult) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    validate_project(analysis, &mut issues);
    validate_entities(analysis, &mut issues);
    if validate_relationships(analysis, &mut issues) {
        validate_relation_fields(analysis, &mut issues);
    }
    validate_services(analysis, &mut issues);
    validate_flowchart(analysis, &mut issues);

    issues
}

/// Validate and fail on any error-severity issue.
///
/// Warnings are logged through `tracing` and returned to the caller.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every issue when at least one is an
/// error.
pub fn ensure_valid(analysis: &AnalysisResult) -> Result<Vec<ValidationIssue>> {
    let issues = validate(analysis);

    if issues.iter().any(|i| i.severity == Severity::Error) {
        return Err(Error::Validation(ValidationReport::new(issues)));
    }

    for issue in &issues {
        tracing::warn!(location = %issue.location, "{}", issue.message);
    }
    Ok(issues)
}

// ── Internal validators ────────────────────────────────────────────────────────

fn validate_project(analysis: &AnalysisResult, issues: &mut Vec<ValidationIssue>) {
    if analysis.project_name.trim().is_empty() {
        issues.push(ValidationIssue::error("projectName", "must not be empty"));
    }
    if analysis.base_package.trim().is_empty() {
        issues.push(ValidationIssue::error("basePackage", "must not be empty"));
    } else if !is_java_package(&analysis.base_package) {
        issues.push(ValidationIssue::error(
            "basePackage",
            format!(
                "'{}' is not a dotted sequence of Java identifiers",
                analysis.base_package
            )
        ));
    }
}

fn validate_entities(analysis: &AnalysisResult, issues: &mut Vec<ValidationIssue>) {
    if analysis.entities.is_empty() {
        issues.push(ValidationIssue::error(
            "entities",
            "at least one entity is required"
        ));
        return;
    }

    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut seen_tables: HashMap<String, &str> = HashMap::new();

    for (idx, entity) in analysis.entities.iter().enumerate() {
        let loc = format!("entities[{idx}]");

        if entity.name.trim().is_empty() {
            issues.push(ValidationIssue::error(
                format!("{loc}.name"),
                "entity name must not be empty"
            ));
        } else if !is_java_identifier(&entity.name) {
            issues.push(ValidationIssue::error(
                format!("{loc}.name"),
                format!("entity name '{}' is not a Java identifier", entity.name)
            ));
        } else if !seen_names.insert(entity.name.as_str()) {
            issues.push(ValidationIssue::error(
                format!("{loc}.name"),
                format!("duplicate entity name '{}'", entity.name)
            ));
        } else {
            let table = entity.table_name().into_owned();
            if let Some(other) = seen_tables.get(&table) {
                issues.push(ValidationIssue::error(
                    format!("{loc}.tableName"),
                    format!(
                        "entity '{}' maps to table '{table}', already used by '{other}'",
                        entity.name
                    )
                ));
            } else {
                seen_tables.insert(table, entity.name.as_str());
            }
        }

        let mut seen_attrs: HashSet<&str> = HashSet::new();
        for (a_idx, attr) in entity.attributes.iter().enumerate() {
            let a_loc = format!("{loc}.attributes[{a_idx}]");
            if attr.name.trim().is_empty() {
                issues.push(ValidationIssue::error(
                    format!("{a_loc}.name"),
                    "attribute name must not be empty"
                ));
            } else if !seen_attrs.insert(attr.name.as_str()) {
                issues.push(ValidationIssue::error(
                    format!("{a_loc}.name"),
                    format!(
                        "duplicate attribute '{}' in entity '{}'",
                        attr.name, entity.name
                    )
                ));
            }
        }

        if entity.primary_key().is_none() {
            issues.push(ValidationIssue::warning(
                loc,
                format!(
                    "entity '{}' has no primary key; a synthetic Long id is generated",
                    entity.name
                )
            ));
        }
    }
}

/// Returns `true` when every endpoint resolves.
fn validate_relationships(analysis: &AnalysisResult, issues: &mut Vec<ValidationIssue>) -> bool {
    let before = issues.len();
    for (idx, rel) in analysis.relationships.iter().enumerate() {
        let loc = format!("relationships[{idx}]");

        if analysis.entity(&rel.source_entity).is_none() {
            issues.push(ValidationIssue::error(
                format!("{loc}.sourceEntity"),
                format!("unknown entity '{}'", rel.source_entity)
            ));
        }
        if analysis.entity(&rel.target_entity).is_none() {
            issues.push(ValidationIssue::error(
                format!("{loc}.targetEntity"),
                format!("unknown entity '{}'", rel.target_entity)
            ));
        }
    }
    issues.len() == before
}

/// Relation fields must not collide with attributes, the synthetic id or
/// each other on the entity that declares them.
///
/// Relational variants produce a superset of the document fields, so the
/// relational layout covers every variant.
fn validate_relation_fields(analysis: &AnalysisResult, issues: &mut Vec<ValidationIssue>) {
    let mut fields: HashMap<&str, HashSet<String>> = analysis
        .entities
        .iter()
        .map(|entity| {
            let mut names: HashSet<String> =
                entity.attributes.iter().map(|a| a.name.clone()).collect();
            if entity.primary_key().is_none() {
                names.insert("id".to_string());
            }
            (entity.name.as_str(), names)
        })
        .collect();

    for (idx, rel) in analysis.relationships.iter().enumerate() {
        for (owner, field) in relational_fields(analysis, rel) {
            let Some(names) = fields.get_mut(owner.as_str()) else {
                continue;
            };
            if !names.insert(field.name.clone()) {
                issues.push(ValidationIssue::error(
                    format!("relationships[{idx}]"),
                    format!(
                        "relation field '{}' clashes with another field of '{owner}'; set mappedBy to name it",
                        field.name
                    )
                ));
            }
        }
    }
}

fn validate_services(analysis: &AnalysisResult, issues: &mut Vec<ValidationIssue>) {
    for (idx, service) in analysis.services.iter().enumerate() {
        if service.name.trim().is_empty() {
            issues.push(ValidationIssue::error(
                format!("services[{idx}].name"),
                "service name must not be empty"
            ));
        } else if !is_java_identifier(&service.name) {
            issues.push(ValidationIssue::error(
                format!("services[{idx}].name"),
                format!("service name '{}' is not a Java identifier", service.name)
            ));
        }
    }
}

fn validate_flowchart(analysis: &AnalysisResult, issues: &mut Vec<ValidationIssue>) {
    let Some(flow) = &analysis.flowchart_logic else {
        return;
    };

    for (field, value) in [
        ("serviceName", &flow.service_name),
        ("methodName", &flow.method_name)
    ] {
        let loc = format!("flowchartLogic.{field}");
        if value.trim().is_empty() {
            issues.push(ValidationIssue::error(loc, "must not be empty"));
        } else if !is_java_identifier(value) {
            issues.push(ValidationIssue::error(
                loc,
                format!("'{value}' is not a Java identifier")
            ));
        }
    }

    let len = flow.steps.len();
    for (idx, step) in flow.steps.iter().enumerate() {
        let loc = format!("flowchartLogic.steps[{idx}]");
        if step.kind != StepKind::Decision {
            continue;
        }
        if step.condition.as_deref().is_none_or(|c| c.trim().is_empty()) {
            issues.push(ValidationIssue::warning(
                loc.clone(),
                "DECISION step without condition"
            ));
        }
        for (field, target) in [("trueNext", step.true_next), ("falseNext", step.false_next)] {
            if let Some(target) = target
                && target >= len
            {
                issues.push(ValidationIssue::warning(
                    format!("{loc}.{field}"),
                    format!("step index {target} is out of range (0..{len})")
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Attribute, Entity, FlowchartProgram, RelationType, Relationship, Service, Step
    };

    fn entity(name: &str) -> Entity {
        Entity {
            name: name.into(),
            attributes: vec![Attribute::new("id", "Long").primary_key()],
            ..Entity::default()
        }
    }

    fn analysis(entities: Vec<Entity>) -> AnalysisResult {
        AnalysisResult {
            project_name: "Shop".into(),
            base_package: "com.shop".into(),
            entities,
            ..AnalysisResult::default()
        }
    }

    fn has_error(issues: &[ValidationIssue], location: &str) -> bool {
        issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.location == location)
    }

    #[test]
    fn clean_input_has_no_issues() {
        assert!(validate(&analysis(vec![entity("Order")])).is_empty());
    }

    #[test]
    fn empty_entities_rejected() {
        let issues = validate(&analysis(Vec::new()));
        assert!(has_error(&issues, "entities"));
        assert!(ensure_valid(&analysis(Vec::new())).unwrap_err().is_validation());
    }

    #[test]
    fn missing_project_fields_rejected() {
        let mut input = analysis(vec![entity("Order")]);
        input.project_name = " ".into();
        input.base_package = String::new();
        let issues = validate(&input);
        assert!(has_error(&issues, "projectName"));
        assert!(has_error(&issues, "basePackage"));
    }

    #[test]
    fn duplicate_entity_names_rejected() {
        let issues = validate(&analysis(vec![entity("Order"), entity("Order")]));
        assert!(has_error(&issues, "entities[1].name"));
    }

    #[test]
    fn duplicate_attributes_rejected() {
        let mut order = entity("Order");
        order.attributes.push(Attribute::new("id", "Long"));
        let issues = validate(&analysis(vec![order]));
        assert!(has_error(&issues, "entities[0].attributes[1].name"));
    }

    #[test]
    fn dangling_relationships_listed() {
        let mut input = analysis(vec![entity("Order")]);
        input.relationships = vec![
            Relationship::new("Order", "OrderItem", RelationType::OneToMany),
            Relationship::new("Customer", "Order", RelationType::OneToMany),
        ];
        let err = ensure_valid(&input).unwrap_err();
        match err {
            Error::Validation(report) => {
                assert!(report.mentions("relationships[0].targetEntity"));
                assert!(report.mentions("relationships[1].sourceEntity"));
                assert_eq!(report.errors().count(), 2);
            }
            other => panic!("unexpected error: {other:?}")
        }
    }

    #[test]
    fn missing_primary_key_is_warning() {
        let mut order = entity("Order");
        order.attributes.clear();
        let input = analysis(vec![order]);
        let issues = ensure_valid(&input).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn flowchart_index_out_of_range_is_warning() {
        let mut input = analysis(vec![entity("Order")]);
        let mut decision = Step::new(StepKind::Decision, "check");
        decision.condition = Some("x > 0".into());
        decision.true_next = Some(7);
        input.flowchart_logic = Some(FlowchartProgram {
            service_name: "FlowService".into(),
            method_name: "run".into(),
            description: None,
            steps: vec![decision]
        });
        let issues = ensure_valid(&input).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, "flowchartLogic.steps[0].trueNext");
    }

    #[test]
    fn flowchart_requires_names() {
        let mut input = analysis(vec![entity("Order")]);
        input.flowchart_logic = Some(FlowchartProgram::default());
        let issues = validate(&input);
        assert!(has_error(&issues, "flowchartLogic.serviceName"));
        assert!(has_error(&issues, "flowchartLogic.methodName"));
    }

    #[test]
    fn path_like_names_rejected() {
        let mut input = analysis(vec![entity("../Order")]);
        input.base_package = "com/../../tmp".into();
        input.services = vec![Service {
            name: "../../../../../../../../escaped".into(),
            ..Service::default()
        }];
        input.flowchart_logic = Some(FlowchartProgram {
            service_name: "Flow/Service".into(),
            method_name: "run now".into(),
            ..FlowchartProgram::default()
        });

        let issues = validate(&input);
        assert!(has_error(&issues, "entities[0].name"));
        assert!(has_error(&issues, "basePackage"));
        assert!(has_error(&issues, "services[0].name"));
        assert!(has_error(&issues, "flowchartLogic.serviceName"));
        assert!(has_error(&issues, "flowchartLogic.methodName"));
    }

    #[test]
    fn java_identifiers() {
        assert!(is_java_identifier("Order"));
        assert!(is_java_identifier("_tmp$1"));
        assert!(!is_java_identifier(""));
        assert!(!is_java_identifier("1Order"));
        assert!(!is_java_identifier("public"));
        assert!(is_java_package("com.shop.api"));
        assert!(!is_java_package("com..shop"));
        assert!(!is_java_package("com.shop."));
        assert!(!is_java_package("com.new"));
    }

    #[test]
    fn tables_must_be_unique() {
        let issues = validate(&analysis(vec![entity("OrderItem"), entity("Order_Item")]));
        assert!(has_error(&issues, "entities[1].tableName"));

        let mut explicit = entity("Invoice");
        explicit.table_name = Some("order_item".into());
        let issues = validate(&analysis(vec![entity("OrderItem"), explicit]));
        assert!(has_error(&issues, "entities[1].tableName"));
    }

    #[test]
    fn repeated_relationship_clashes() {
        let mut input = analysis(vec![entity("Order"), entity("Customer")]);
        input.relationships = vec![
            Relationship::new("Order", "Customer", RelationType::ManyToOne),
            Relationship::new("Order", "Customer", RelationType::ManyToOne),
        ];
        let issues = validate(&input);
        let clash = issues
            .iter()
            .find(|i| i.severity == Severity::Error && i.location == "relationships[1]")
            .unwrap();
        assert!(clash.message.contains("'customer'"));
        assert!(clash.message.contains("mappedBy"));

        let mut named = Relationship::new("Order", "Customer", RelationType::ManyToOne);
        named.mapped_by = Some("billedTo".into());
        input.relationships[1] = named;
        assert!(validate(&input).is_empty());
    }

    #[test]
    fn relation_field_clashing_with_attribute() {
        let mut order = entity("Order");
        order.attributes.push(Attribute::new("customer", "String"));
        let mut input = analysis(vec![order, entity("Customer")]);
        input.relationships = vec![Relationship::new("Order", "Customer", RelationType::ManyToOne)];
        assert!(has_error(&validate(&input), "relationships[0]"));
    }

    #[test]
    fn relation_field_named_like_synthetic_id() {
        let mut order = entity("Order");
        order.attributes.clear();
        let mut input = analysis(vec![order, entity("Customer")]);
        let mut rel = Relationship::new("Order", "Customer", RelationType::ManyToOne);
        rel.mapped_by = Some("id".into());
        input.relationships = vec![rel];
        assert!(has_error(&validate(&input), "relationships[0]"));
    }

    #[test]
    fn issue_display() {
        let issue = ValidationIssue::warning("entities[0]", "no primary key");
        assert_eq!(issue.to_string(), "[WARN] entities[0]: no primary key");
    }
}
