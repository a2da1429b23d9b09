// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Project scaffold: build descriptor, runtime configuration, container
//! compose file, bootstrap class and README.
//!
//! Variant-specific text comes from the [`VariantProfile`] of the context;
//! nothing here matches on the variant itself.
//!
//! [`VariantProfile`]: crate::variant::VariantProfile

use super::{context::Context, java::package_decl};
use crate::{
    naming::{artifact_id, route_segment},
    variant::{application_config, render}
};

const JPA_STARTER: &str = "        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-data-jpa</artifactId>
        </dependency>
";

/// `src/main/resources/application.yml`.
#[must_use]
pub fn application_yml(ctx: &Context<'_>) -> String {
    application_config(
        ctx.variant,
        &artifact_id(&ctx.analysis.project_name),
        ctx.base_package()
    )
}

/// `pom.xml`.
///
/// The JPA starter is only declared for relational variants.
#[must_use]
pub fn pom_xml(ctx: &Context<'_>) -> String {
    let group = xml_escape(ctx.base_package());
    let artifact = xml_escape(&artifact_id(&ctx.analysis.project_name));
    let name = xml_escape(&ctx.analysis.project_name);
    let jpa = if ctx.profile.uses_jpa() { JPA_STARTER } else { "" };
    let driver = ctx.profile.build_dependency;

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0
         https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.3.6</version>
    </parent>

    <groupId>{group}</groupId>
    <artifactId>{artifact}</artifactId>
    <version>1.0.0-SNAPSHOT</version>
    <name>{name}</name>
    <description>Generated from a diagram</description>

    <properties>
        <java.version>21</java.version>
    </properties>

    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
{jpa}{driver}
        <dependency>
            <groupId>org.projectlombok</groupId>
            <artifactId>lombok</artifactId>
            <optional>true</optional>
        </dependency>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-validation</artifactId>
        </dependency>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-test</artifactId>
            <scope>test</scope>
        </dependency>
    </dependencies>

    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#
    )
}

/// `docker-compose.yml`, for variants that run a database service.
#[must_use]
pub fn docker_compose(ctx: &Context<'_>) -> Option<String> {
    let project = artifact_id(&ctx.analysis.project_name);
    ctx.profile
        .compose_template
        .map(|template| render(template, &[("project", project.as_str())]))
}

/// `Application.java` in the base package.
#[must_use]
pub fn application_java(ctx: &Context<'_>) -> String {
    let mut out = package_decl(ctx.base_package(), "");
    out.push_str(
        "import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class Application {
    public static void main(String[] args) {
        SpringApplication.run(Application.class, args);
    }
}
"
    );
    out
}

/// `README.md`.
///
/// Contains no timestamp so that identical input yields identical output.
#[must_use]
pub fn readme(ctx: &Context<'_>) -> String {
    let analysis = ctx.analysis;
    let profile = ctx.profile;
    let diagram = analysis
        .diagram_type
        .map_or("ER_DIAGRAM", |d| d.label());
    let project = artifact_id(&analysis.project_name);
    let setup = render(profile.readme_setup, &[("project", project.as_str())]);
    let endpoints: String = analysis
        .entities
        .iter()
        .map(|e| format!("- `{}`: `/api/{}`\n", e.name, route_segment(&e.name)))
        .collect();
    let (persistence, entities, schema) = if profile.is_document() {
        (
            "Spring Data MongoDB",
            "MongoDB documents with references",
            "Collections created on first write"
        )
    } else {
        (
            "Spring Data JPA",
            "JPA entities with relationships",
            "SQL schema in `src/main/resources/schema.sql`"
        )
    };

    format!(
        "# {name}

> Generated from a diagram

## Project Overview

This Spring Boot project was generated from a diagram.

- **Diagram Type:** {diagram}
- **Database:** {database}
- **Entities:** {count}

## Quick Start

```bash
# Build the project
mvn clean install

# Run the application
mvn spring-boot:run
```

{setup}

## API Endpoints

- **Application:** http://localhost:8080
{endpoints}
## Features

- {entities}
- Spring Data repositories
- REST controllers with CRUD operations
- {schema}
- {database} database

## Technology Stack

- Java 21
- Spring Boot 3.3
- {persistence}
- {database} (`{driver}`)
- Lombok
",
        name = analysis.project_name,
        database = profile.display_name,
        count = analysis.entities.len(),
        driver = profile.driver_class
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
