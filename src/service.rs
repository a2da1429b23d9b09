// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request-level facade over analysis, assembly, storage and packaging.
//!
//! # Flow
//!
//! ```text
//! GenerateRequest
//!   └─ DiagramAnalyzer::analyze ──► AnalysisResult
//!        └─ ProjectAssembler::assemble ──► GeneratedProject
//!             ├─ ProjectStore::put
//!             └─ UsageRecorder::record
//! ```
//!
//! [`GenerationService::generate`] never returns an error: failures become a
//! [`GenerationResponse`] with `success == false`. The follow-up operations
//! (`update_file`, `download`, `save`) return [`Result`] so callers can map
//! [`Error::NotFound`] to their own "not found" outcome.

use std::{path::PathBuf, sync::Arc, time::Instant};

use serde::{Deserialize, Serialize};

use crate::{
    assembler::{AssemblerOptions, ProjectAssembler},
    config::ForgeConfig,
    error::{Error, Result},
    model::{AnalysisResult, DiagramType, FileMap, GeneratedProject, GenerationStatistics},
    package::{self, ProjectArchive},
    store::{MemoryProjectStore, ProjectStore},
    variant::{DatabaseOption, DatabaseVariant}
};

/// Image handed to the diagram analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramAnalysisRequest {
    /// Raw image bytes.
    pub image_data:   Vec<u8>,
    /// Original file name.
    pub file_name:    String,
    /// MIME type of the image.
    pub mime_type:    String,
    /// Free-form hints for the analyzer.
    pub instructions: Option<String>
}

/// Turns a diagram image into an [`AnalysisResult`].
///
/// Implementations should report their own failures as [`Error::Upstream`].
pub trait DiagramAnalyzer: Send + Sync {
    /// Analyze one diagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] when the analyzer fails.
    fn analyze(&self, request: &DiagramAnalysisRequest) -> Result<AnalysisResult>;
}

/// Receives usage figures after each successful generation.
pub trait UsageRecorder: Send + Sync {
    /// Record one generation.
    fn record(&self, generation_time_ms: u64, entity_count: usize);
}

/// [`UsageRecorder`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUsageRecorder;

impl UsageRecorder for NoopUsageRecorder {
    fn record(&self, _generation_time_ms: u64, _entity_count: usize) {}
}

/// Generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Diagram to analyze.
    pub diagram:  DiagramAnalysisRequest,
    /// Database selector; the configured default applies when absent.
    pub database: Option<String>
}

/// Replacement content for one generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpdateRequest {
    /// Project to edit.
    pub project_id: String,
    /// Relative path inside the project.
    pub file_path:  String,
    /// New content.
    pub content:    String
}

/// Outcome of a generation or edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    /// Whether the operation succeeded.
    pub success:         bool,
    /// Human-readable summary.
    pub message:         String,
    /// Id of the stored project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id:      Option<String>,
    /// Project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name:    Option<String>,
    /// Diagram kind reported by the analyzer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram_type:    Option<DiagramType>,
    /// Selected database variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database:        Option<DatabaseVariant>,
    /// Analysis the project was generated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
    /// Generated files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_files: Option<FileMap>,
    /// Generation statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics:      Option<GenerationStatistics>
}

impl GenerationResponse {
    /// Failed response carrying only a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Coordinates analyzer, assembler, store and usage recorder.
#[derive(Clone)]
pub struct GenerationService {
    config:    ForgeConfig,
    assembler: ProjectAssembler,
    analyzer:  Arc<dyn DiagramAnalyzer>,
    store:     Arc<dyn ProjectStore>,
    usage:     Arc<dyn UsageRecorder>
}

impl std::fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationService")
            .field("config", &self.config)
            .field("assembler", &self.assembler)
            .finish_non_exhaustive()
    }
}

impl GenerationService {
    /// Create a service with an in-memory store and no usage recording.
    #[must_use]
    pub fn new(config: ForgeConfig, analyzer: Arc<dyn DiagramAnalyzer>) -> Self {
        let store = Arc::new(MemoryProjectStore::from_config(&config.store));
        let assembler = ProjectAssembler::new(AssemblerOptions {
            flowchart_mode: config.generation.flowchart_mode
        });
        Self {
            config,
            assembler,
            analyzer,
            store,
            usage: Arc::new(NoopUsageRecorder)
        }
    }

    /// Replace the project store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ProjectStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the usage recorder.
    #[must_use]
    pub fn with_usage_recorder(mut self, usage: Arc<dyn UsageRecorder>) -> Self {
        self.usage = usage;
        self
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Analyze a diagram and generate a project from it.
    #[tracing::instrument(skip(self, request), fields(file = %request.diagram.file_name))]
    pub fn generate(&self, request: GenerateRequest) -> GenerationResponse {
        let started = Instant::now();
        let analysis = match self.analyzer.analyze(&request.diagram) {
            Ok(analysis) => analysis,
            Err(err) => return failure(&err)
        };
        tracing::info!(
            diagram = ?analysis.diagram_type,
            entities = analysis.entities.len(),
            relationships = analysis.relationships.len(),
            "diagram analyzed"
        );
        self.finish(analysis, request.database.as_deref(), started)
    }

    /// Generate a project from an analysis that is already available.
    pub fn generate_from_analysis(
        &self,
        analysis: AnalysisResult,
        database: Option<&str>
    ) -> GenerationResponse {
        self.finish(analysis, database, Instant::now())
    }

    fn finish(
        &self,
        mut analysis: AnalysisResult,
        database: Option<&str>,
        started: Instant
    ) -> GenerationResponse {
        if analysis.base_package.trim().is_empty() {
            analysis
                .base_package
                .clone_from(&self.config.generation.base_package);
        }
        let variant = database.map_or(self.config.generation.default_database, |selector| {
            DatabaseVariant::parse_or_default(Some(selector))
        });

        let project = match self.assembler.assemble(&analysis, variant) {
            Ok(project) => project,
            Err(err) => return failure(&err)
        };
        let project = self.store.put(project);

        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.usage
            .record(elapsed, project.statistics.entity_count);

        GenerationResponse {
            success:         true,
            message:         "Project generated successfully".to_string(),
            project_id:      Some(project.project_id.clone()),
            project_name:    Some(project.project_name.clone()),
            diagram_type:    analysis.diagram_type,
            database:        Some(variant),
            generated_files: Some(project.generated_files.clone()),
            statistics:      Some(project.statistics),
            analysis_result: Some(analysis)
        }
    }

    /// Fetch a stored project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown or expired ids.
    pub fn project(&self, project_id: &str) -> Result<Arc<GeneratedProject>> {
        self.store.get(project_id).ok_or_else(|| Error::NotFound {
            project_id: project_id.to_string()
        })
    }

    /// Replace or add one file of a stored project.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for unknown ids
    /// - [`Error::Validation`] when the path is empty, absolute or escapes
    ///   the project root
    pub fn update_file(&self, request: FileUpdateRequest) -> Result<GenerationResponse> {
        check_relative_path(&request.file_path)?;
        let stored = self.project(&request.project_id)?;

        let mut project = GeneratedProject::clone(&stored);
        project
            .generated_files
            .upsert(request.file_path.as_str(), request.content);
        let project = self.store.put(project);
        tracing::info!(
            project_id = %request.project_id,
            file = %request.file_path,
            "file updated"
        );

        Ok(GenerationResponse {
            success: true,
            message: "File updated successfully".to_string(),
            project_id: Some(request.project_id),
            generated_files: Some(project.generated_files.clone()),
            ..GenerationResponse::default()
        })
    }

    /// Package a stored project for download.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    pub fn download(&self, project_id: &str) -> Result<ProjectArchive> {
        let project = self.project(project_id)?;
        let archive = package::archive(&project);
        tracing::info!(
            project_id,
            file_name = %archive.file_name,
            entries = archive.entries.len(),
            "project packaged"
        );
        Ok(archive)
    }

    /// Write a stored project under the configured output directory.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for unknown ids
    /// - [`Error::Io`] when writing fails
    pub fn save(&self, project_id: &str) -> Result<PathBuf> {
        let project = self.project(project_id)?;
        package::write_to_disk(&project, &self.config.generation.output_directory)
    }

    /// Supported database variants as value/label pairs.
    #[must_use]
    pub fn database_options(&self) -> Vec<DatabaseOption> {
        DatabaseVariant::options()
    }
}

fn failure(err: &Error) -> GenerationResponse {
    tracing::error!(error = %err, "generation failed");
    GenerationResponse::failed(format!("Generation failed: {err}"))
}

fn check_relative_path(path: &str) -> Result<()> {
    let escapes = path
        .split(['/', '\\'])
        .any(|segment| segment == "..");
    if path.trim().is_empty() || path.starts_with('/') || path.starts_with('\\') || escapes {
        return Err(Error::invalid(
            "filePath",
            format!("{path:?} is not a relative path inside the project")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::{Attribute, Entity};

    struct Fixed(Result<AnalysisResult, String>);

    impl DiagramAnalyzer for Fixed {
        fn analyze(&self, _request: &DiagramAnalysisRequest) -> Result<AnalysisResult> {
            self.0.clone().map_err(|message| Error::Upstream {
                message
            })
        }
    }

    #[derive(Default)]
    struct Recorded(Mutex<Vec<(u64, usize)>>);

    impl UsageRecorder for Recorded {
        fn record(&self, generation_time_ms: u64, entity_count: usize) {
            self.0
                .lock()
                .unwrap()
                .push((generation_time_ms, entity_count));
        }
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            diagram_type: Some(DiagramType::Er),
            project_name: "Shop".into(),
            entities: vec![Entity {
                name: "Order".into(),
                attributes: vec![Attribute::new("id", "Long").primary_key()],
                ..Entity::default()
            }],
            ..AnalysisResult::default()
        }
    }

    fn service(analyzer: Fixed) -> GenerationService {
        GenerationService::new(ForgeConfig::default(), Arc::new(analyzer))
    }

    #[test]
    fn generate_stores_project_and_records_usage() {
        let usage = Arc::new(Recorded::default());
        let svc = service(Fixed(Ok(analysis()))).with_usage_recorder(usage.clone());

        let response = svc.generate(GenerateRequest {
            database: Some("postgres".into()),
            ..GenerateRequest::default()
        });
        assert!(response.success, "{}", response.message);
        assert_eq!(response.database, Some(DatabaseVariant::Postgresql));
        assert_eq!(response.diagram_type, Some(DiagramType::Er));

        let files = response.generated_files.unwrap();
        assert!(files.contains("src/main/java/com/generated/entity/Order.java"));
        assert_eq!(
            response.analysis_result.unwrap().base_package,
            "com.generated"
        );

        let id = response.project_id.unwrap();
        assert_eq!(svc.project(&id).unwrap().project_name, "Shop");
        assert_eq!(usage.0.lock().unwrap()[0].1, 1);
    }

    #[test]
    fn upstream_failure_becomes_failed_response() {
        let svc = service(Fixed(Err("quota exceeded".into())));
        let response = svc.generate(GenerateRequest::default());
        assert!(!response.success);
        assert_eq!(
            response.message,
            "Generation failed: diagram analysis failed: quota exceeded"
        );
        assert!(response.project_id.is_none());
    }

    #[test]
    fn invalid_analysis_becomes_failed_response() {
        let svc = service(Fixed(Ok(AnalysisResult::default())));
        let response = svc.generate_from_analysis(AnalysisResult::default(), None);
        assert!(!response.success);
        assert!(response.message.contains("at least one entity is required"));
    }

    #[test]
    fn unknown_database_falls_back_to_h2() {
        let svc = service(Fixed(Ok(analysis())));
        let response = svc.generate_from_analysis(analysis(), Some("oracle"));
        assert_eq!(response.database, Some(DatabaseVariant::H2));
    }

    #[test]
    fn update_file_replaces_content() {
        let svc = service(Fixed(Ok(analysis())));
        let id = svc
            .generate_from_analysis(analysis(), None)
            .project_id
            .unwrap();

        let response = svc
            .update_file(FileUpdateRequest {
                project_id: id.clone(),
                file_path:  "README.md".into(),
                content:    "# Edited\n".into()
            })
            .unwrap();
        assert!(response.success);
        assert_eq!(
            response.generated_files.unwrap().get("README.md"),
            Some("# Edited\n")
        );
        assert_eq!(
            svc.project(&id).unwrap().generated_files.get("README.md"),
            Some("# Edited\n")
        );
    }

    #[test]
    fn update_unknown_project_is_not_found() {
        let svc = service(Fixed(Ok(analysis())));
        let err = svc
            .update_file(FileUpdateRequest {
                project_id: "missing".into(),
                file_path:  "README.md".into(),
                content:    String::new()
            })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_rejects_escaping_paths() {
        let svc = service(Fixed(Ok(analysis())));
        for path in ["", "/etc/passwd", "../x", "src/../../x"] {
            let err = svc
                .update_file(FileUpdateRequest {
                    project_id: "any".into(),
                    file_path:  path.into(),
                    content:    String::new()
                })
                .unwrap_err();
            assert!(err.is_validation(), "{path}");
        }
    }

    #[test]
    fn download_and_options() {
        let svc = service(Fixed(Ok(analysis())));
        let id = svc
            .generate_from_analysis(analysis(), Some("mongodb"))
            .project_id
            .unwrap();

        let archive = svc.download(&id).unwrap();
        assert_eq!(archive.file_name, "Shop.zip");
        assert_eq!(archive.entries.last().unwrap().0, "shop/.gitignore");
        assert!(svc.download("missing").unwrap_err().is_not_found());
        assert_eq!(svc.database_options().len(), 5);
    }
}
