// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Analysis result: the structured diagram description consumed by the
//! generators.
//!
//! # Structure
//!
//! ```text
//! AnalysisResult
//! ├── diagram_type: Option<DiagramType>
//! ├── project_name / base_package
//! ├── entities: Vec<Entity>
//! │   └── Entity
//! │       ├── name, table_name, description
//! │       ├── attributes: Vec<Attribute>
//! │       ├── methods: Vec<Method>
//! │       └── constraints: Vec<String>    (carried, unused)
//! ├── relationships: Vec<Relationship>
//! ├── services: Vec<Service>
//! └── flowchart_logic: Option<FlowchartProgram>
//!     └── steps: Vec<Step>
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    naming::to_snake_case
};

/// Diagram classification reported by the analyzer.
///
/// Informational only; it is printed in the generated README.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagramType {
    /// Entity-relationship diagram.
    #[serde(alias = "ER_DIAGRAM")]
    Er,
    /// UML class diagram.
    #[serde(alias = "CLASS_DIAGRAM")]
    Class,
    /// Flowchart.
    Flowchart,
    /// Sequence diagram.
    #[serde(alias = "SEQUENCE_DIAGRAM")]
    Sequence,
    /// Use-case diagram.
    UseCase,
    /// Component / architecture diagram.
    Component,
    /// Anything the engine does not recognize.
    #[serde(other)]
    Other
}

impl DiagramType {
    /// Label used in generated documentation.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Er => "ER_DIAGRAM",
            Self::Class => "CLASS_DIAGRAM",
            Self::Flowchart => "FLOWCHART",
            Self::Sequence => "SEQUENCE_DIAGRAM",
            Self::UseCase => "USE_CASE",
            Self::Component => "COMPONENT",
            Self::Other => "OTHER"
        }
    }
}

/// Complete analysis of one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    /// Diagram classification.
    pub diagram_type: Option<DiagramType>,

    /// Human-readable project name (e.g. `Library System`).
    pub project_name: String,

    /// Java base package (e.g. `com.acme.library`).
    pub base_package: String,

    /// Entities in declaration order.
    pub entities: Vec<Entity>,

    /// Relationships between entities.
    pub relationships: Vec<Relationship>,

    /// Free-form services.
    pub services: Vec<Service>,

    /// Optional flowchart program turned into a service method.
    pub flowchart_logic: Option<FlowchartProgram>,

    /// Raw analyzer text, kept for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>
}

impl AnalysisResult {
    /// Parse a JSON analysis document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the document is not valid JSON or
    /// does not match the analysis shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid("$", format!("malformed analysis: {e}")))
    }

    /// Parse analyzer output that may be wrapped in Markdown code fences.
    ///
    /// The raw text is kept in [`AnalysisResult::raw_response`].
    ///
    /// # Errors
    ///
    /// Same as [`AnalysisResult::from_json`].
    pub fn from_ai_response(response: &str) -> Result<Self> {
        let cleaned = strip_code_fences(response);
        let mut result = Self::from_json(&cleaned)?;
        result.raw_response = Some(response.to_string());
        Ok(result)
    }

    /// Look up an entity by name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Table name for an entity name, falling back to its snake form when the
    /// entity is not declared.
    #[must_use]
    pub fn table_of(&self, entity_name: &str) -> String {
        self.entity(entity_name)
            .map(|e| e.table_name().into_owned())
            .unwrap_or_else(|| to_snake_case(entity_name))
    }
}

/// Remove ```` ```json ```` / ```` ``` ```` fences and surrounding whitespace.
fn strip_code_fences(response: &str) -> String {
    let mut out = String::with_capacity(response.len());
    let mut rest = response;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if let Some(stripped) = rest.strip_prefix("json") {
            rest = stripped;
        }
        rest = rest.trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// A persistent entity (one table / collection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    /// Singular PascalCase name (e.g. `OrderItem`).
    pub name: String,

    /// Explicit table name; derived from `name` when absent.
    pub table_name: Option<String>,

    /// Short description used in generated docs.
    pub description: Option<String>,

    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,

    /// Domain methods rendered as stubs.
    pub methods: Vec<Method>,

    /// Free-text constraints; carried through, not interpreted.
    pub constraints: Vec<String>
}

impl Entity {
    /// Effective table name: the supplied one, or `to_snake_case(name)`.
    #[must_use]
    pub fn table_name(&self) -> Cow<'_, str> {
        match self.table_name.as_deref().map(str::trim) {
            Some(table) if !table.is_empty() => Cow::Borrowed(table),
            _ => Cow::Owned(to_snake_case(&self.name))
        }
    }

    /// First attribute flagged as primary key.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.primary_key)
    }

    /// Attributes flagged `unique` that are not the primary key.
    pub fn unique_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.unique && !a.primary_key)
    }
}

/// One attribute / column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    /// camelCase attribute name.
    pub name:          String,
    /// Logical type tag, case-insensitive (`Long`, `String`, ...).
    #[serde(rename = "type")]
    pub ty:            String,
    /// Whether NULL is allowed.
    pub nullable:      bool,
    /// Primary key flag.
    pub primary_key:   bool,
    /// Unique constraint flag.
    pub unique:        bool,
    /// Length for variable-length strings.
    pub length:        Option<u32>,
    /// Raw SQL default literal.
    pub default_value: Option<String>,
    /// Description.
    pub description:   Option<String>
}

impl Default for Attribute {
    fn default() -> Self {
        Self {
            name:          String::new(),
            ty:            String::new(),
            nullable:      true,
            primary_key:   false,
            unique:        false,
            length:        None,
            default_value: None,
            description:   None
        }
    }
}

impl Attribute {
    /// Create a nullable attribute with the given name and type tag.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Self::default()
        }
    }

    /// Mark as primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as NOT NULL.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A method signature with optional pseudocode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Method {
    /// Method name.
    pub name:        String,
    /// Return type; `None` means void.
    pub return_type: Option<String>,
    /// Raw `"name: Type"` parameter strings.
    pub parameters:  Vec<String>,
    /// Description.
    pub description: Option<String>,
    /// Visibility modifier (`public` when absent).
    pub visibility:  Option<String>,
    /// Multi-line pseudocode, lines separated by `\n` escapes.
    pub algorithm:   Option<String>
}

/// Relationship cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// 1:1
    OneToOne,
    /// 1:N, the source holds a collection.
    OneToMany,
    /// N:1, the source holds a reference.
    ManyToOne,
    /// M:N
    ManyToMany
}

/// A relationship between two declared entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Source entity name.
    pub source_entity: String,
    /// Target entity name.
    pub target_entity: String,
    /// Cardinality.
    #[serde(rename = "type")]
    pub kind:          RelationType,
    /// Owning-side field name hint.
    #[serde(default)]
    pub mapped_by:     Option<String>,
    /// Whether the inverse side gets a field.
    #[serde(default)]
    pub bidirectional: bool,
    /// Description.
    #[serde(default)]
    pub description:   Option<String>
}

impl Relationship {
    /// Create a unidirectional relationship.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: RelationType) -> Self {
        Self {
            source_entity: source.into(),
            target_entity: target.into(),
            kind,
            mapped_by: None,
            bidirectional: false,
            description: None
        }
    }
}

/// A free-form service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    /// Class name.
    pub name:        String,
    /// Description.
    pub description: Option<String>,
    /// Methods.
    pub methods:     Vec<Method>
}

/// Flowchart logic rendered as a single service method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowchartProgram {
    /// Service class name.
    pub service_name: String,
    /// Method name.
    pub method_name:  String,
    /// Description.
    pub description:  Option<String>,
    /// Steps in array order.
    pub steps:        Vec<Step>
}

/// Flowchart step kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    /// Entry point.
    Start,
    /// Plain statement.
    Process,
    /// Two-way branch.
    Decision,
    /// Exit point.
    End
}

impl StepKind {
    /// Upper-case label (`PROCESS`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Process => "PROCESS",
            Self::Decision => "DECISION",
            Self::End => "END"
        }
    }
}

/// One flowchart step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step kind.
    #[serde(rename = "type")]
    pub kind:        StepKind,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Statement text (PROCESS).
    #[serde(default)]
    pub code:        Option<String>,
    /// Condition (DECISION).
    #[serde(default)]
    pub condition:   Option<String>,
    /// Index taken when the condition holds (DECISION).
    #[serde(default)]
    pub true_next:   Option<usize>,
    /// Index taken otherwise (DECISION).
    #[serde(default)]
    pub false_next:  Option<usize>
}

impl Step {
    /// Create a step with a description.
    #[must_use]
    pub fn new(kind: StepKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: Some(description.into()),
            code: None,
            condition: None,
            true_next: None,
            false_next: None
        }
    }

    /// Comment text for this step: description, else condition, else kind.
    #[must_use]
    pub fn label(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or(self.condition.as_deref())
            .unwrap_or(self.kind.label())
    }
}
