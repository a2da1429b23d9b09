// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Project assembly.
//!
//! The assembler is the only component with orchestration logic. It validates
//! the analysis, runs every generator in a fixed order and merges their output
//! into one [`FileMap`].
//!
//! # Generation Order
//!
//! | # | Output | Condition |
//! |---|--------|-----------|
//! | 1 | `<java>/entity/<Name>.java` | per entity |
//! | 2 | `<java>/repository/<Name>Repository.java` | per entity |
//! | 3 | `<java>/controller/<Name>Controller.java` | per entity |
//! | 4 | `<java>/service/<Name>.java` | per service |
//! | 5 | `<java>/service/<ServiceName>.java` | flowchart present |
//! | 6 | `src/main/resources/schema.sql` | always |
//! | 7 | `src/main/resources/application.yml` | always |
//! | 8 | `pom.xml` | always |
//! | 9 | `docker-compose.yml` | variant runs a database service |
//! | 10 | `<java>/Application.java` | always |
//! | 11 | `README.md` | always |
//!
//! `<java>` is `src/main/java/<base package path>`.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    generator::{
        Context, FlowchartMode, controller, entity, flowchart, repository, scaffold, schema,
        service
    },
    model::{AnalysisResult, FileMap, GeneratedProject, GenerationStatistics},
    naming::package_path,
    validate::ensure_valid,
    variant::DatabaseVariant
};

/// Assembly options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// How the flowchart service body is produced.
    pub flowchart_mode: FlowchartMode
}

/// Runs the generators and builds a [`GeneratedProject`].
#[derive(Debug, Clone, Default)]
pub struct ProjectAssembler {
    options: AssemblerOptions
}

impl ProjectAssembler {
    /// Create an assembler with the given options.
    #[must_use]
    pub const fn new(options: AssemblerOptions) -> Self {
        Self {
            options
        }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> AssemblerOptions {
        self.options
    }

    /// Generate every file of the project.
    ///
    /// Output is all-or-nothing: on error no file map is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when the analysis is rejected
    /// - [`Error::Generation`] when two generators claim the same path
    pub fn assemble(&self, analysis: &AnalysisResult, variant: DatabaseVariant) -> Result<GeneratedProject> {
        let started = Instant::now();
        tracing::info!(
            project = %analysis.project_name,
            database = %variant,
            "assembling project"
        );

        ensure_valid(analysis)?;

        let ctx = Context::new(analysis, variant);
        let java_root = format!("src/main/java/{}", package_path(ctx.base_package()));
        let mut files = FileMap::new();

        let entities = entity::generate_all(&ctx)?;
        tracing::debug!(stage = "entities", files = entities.len());
        merge(&mut files, &format!("{java_root}/entity"), &entities)?;

        let repositories = repository::generate_all(&ctx)?;
        tracing::debug!(stage = "repositories", files = repositories.len());
        merge(&mut files, &format!("{java_root}/repository"), &repositories)?;

        let controllers = controller::generate_all(&ctx)?;
        tracing::debug!(stage = "controllers", files = controllers.len());
        merge(&mut files, &format!("{java_root}/controller"), &controllers)?;

        if !analysis.services.is_empty() {
            let services = service::generate_all(ctx.base_package(), &analysis.services)?;
            tracing::debug!(stage = "services", files = services.len());
            merge(&mut files, &format!("{java_root}/service"), &services)?;
        }

        if let Some(program) = &analysis.flowchart_logic {
            tracing::debug!(stage = "flowchart", mode = %self.options.flowchart_mode);
            add(
                &mut files,
                format!("{java_root}/service/{}.java", program.service_name),
                flowchart::generate_service(ctx.base_package(), program, self.options.flowchart_mode)
            )?;
        }

        tracing::debug!(stage = "scaffold");
        add(
            &mut files,
            "src/main/resources/schema.sql".to_string(),
            schema::generate_schema(analysis)
        )?;
        add(
            &mut files,
            "src/main/resources/application.yml".to_string(),
            scaffold::application_yml(&ctx)
        )?;
        add(&mut files, "pom.xml".to_string(), scaffold::pom_xml(&ctx))?;
        if let Some(compose) = scaffold::docker_compose(&ctx) {
            add(&mut files, "docker-compose.yml".to_string(), compose)?;
        }
        add(
            &mut files,
            format!("{java_root}/Application.java"),
            scaffold::application_java(&ctx)
        )?;
        add(&mut files, "README.md".to_string(), scaffold::readme(&ctx))?;

        let generation_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let statistics = GenerationStatistics {
            entity_count: entities.len(),
            repository_count: repositories.len(),
            controller_count: controllers.len(),
            total_files: files.len(),
            generation_time_ms
        };

        let project = GeneratedProject {
            project_id: Uuid::new_v4().to_string(),
            project_name: analysis.project_name.clone(),
            base_package: analysis.base_package.clone(),
            database: variant,
            generated_files: files,
            generated_at: Utc::now(),
            statistics
        };

        tracing::info!(
            project_id = %project.project_id,
            files = statistics.total_files,
            elapsed_ms = generation_time_ms,
            "project assembled"
        );
        Ok(project)
    }
}

/// Assemble with default options.
///
/// # Errors
///
/// See [`ProjectAssembler::assemble`].
pub fn assemble(analysis: &AnalysisResult, variant: DatabaseVariant) -> Result<GeneratedProject> {
    ProjectAssembler::default().assemble(analysis, variant)
}

fn add(files: &mut FileMap, path: String, content: String) -> Result<()> {
    if files.contains(&path) {
        return Err(Error::generation(
            "assembly",
            format!("duplicate output path {path}")
        ));
    }
    files.insert(path, content);
    Ok(())
}

fn merge(files: &mut FileMap, dir: &str, layer: &FileMap) -> Result<()> {
    for (name, content) in layer {
        add(files, format!("{dir}/{name}"), content.to_string())?;
    }
    Ok(())
}
