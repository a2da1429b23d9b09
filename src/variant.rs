// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Database variants.
//!
//! Each [`DatabaseVariant`] owns exactly one static [`VariantProfile`] record
//! carrying every variant-specific template. Generators never branch on the
//! variant directly; they read the profile. Adding a variant means adding a
//! profile record.
//!
//! # Supported Databases
//!
//! | Variant | Storage | Compose service | Build dependency |
//! |---------|---------|-----------------|------------------|
//! | H2 | Relational, in-process | none | `com.h2database:h2` |
//! | PostgreSQL | Relational | `postgres:15` | `org.postgresql:postgresql` |
//! | MySQL | Relational | `mysql:8` | `com.mysql:mysql-connector-j` |
//! | MongoDB | Document | `mongo:6` | `spring-boot-starter-data-mongodb` |
//! | SQLite | Relational, embedded file | none | `org.xerial:sqlite-jdbc` |
//!
//! Templates use `{project}` (artifact id) and `{base_package}` placeholders,
//! substituted by [`render`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Target persistence/runtime profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatabaseVariant {
    /// H2 in-memory database, no external service.
    #[default]
    H2,
    /// PostgreSQL server.
    Postgresql,
    /// MySQL server.
    Mysql,
    /// MongoDB document store.
    Mongodb,
    /// SQLite database file.
    Sqlite
}

/// How the variant stores entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageModel {
    /// Tables, JPA entities, `JpaRepository`.
    Relational,
    /// Collections, `@Document` entities, `MongoRepository`.
    Document
}

/// Selector value / display label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseOption {
    /// Selector value (e.g. `POSTGRESQL`).
    pub value: &'static str,
    /// Display label (e.g. `PostgreSQL`).
    pub label: &'static str
}

/// All variant-specific data.
#[derive(Debug)]
pub struct VariantProfile {
    /// Selector value.
    pub value:            &'static str,
    /// Display name.
    pub display_name:     &'static str,
    /// JDBC driver class, or `mongodb`.
    pub driver_class:     &'static str,
    /// Storage model.
    pub storage:          StorageModel,
    /// `application.yml` template.
    pub config_template:  &'static str,
    /// `pom.xml` dependency block for the driver.
    pub build_dependency: &'static str,
    /// `docker-compose.yml` template, if the variant needs a service.
    pub compose_template: Option<&'static str>,
    /// README database section template.
    pub readme_setup:     &'static str
}

impl VariantProfile {
    /// Whether the JPA starter (and DDL semantics) apply.
    #[must_use]
    pub fn uses_jpa(&self) -> bool {
        self.storage == StorageModel::Relational
    }

    /// Whether entities are documents.
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.storage == StorageModel::Document
    }
}

impl DatabaseVariant {
    /// Every variant, in display order.
    pub const ALL: [Self; 5] = [
        Self::H2,
        Self::Postgresql,
        Self::Mysql,
        Self::Mongodb,
        Self::Sqlite
    ];

    /// Profile record for this variant.
    #[must_use]
    pub fn profile(&self) -> &'static VariantProfile {
        match self {
            Self::H2 => &H2,
            Self::Postgresql => &POSTGRESQL,
            Self::Mysql => &MYSQL,
            Self::Mongodb => &MONGODB,
            Self::Sqlite => &SQLITE
        }
    }

    /// Selector value (`H2`, `POSTGRESQL`, ...).
    #[must_use]
    pub fn value(&self) -> &'static str {
        self.profile().value
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.profile().display_name
    }

    /// Parse a selector, falling back to [`DatabaseVariant::H2`] for missing
    /// or unknown values.
    #[must_use]
    pub fn parse_or_default(selector: Option<&str>) -> Self {
        match selector {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(selector = raw, "unknown database variant, using H2");
                Self::default()
            }),
            None => Self::default()
        }
    }

    /// Value/label pairs for every variant.
    #[must_use]
    pub fn options() -> Vec<DatabaseOption> {
        Self::ALL
            .iter()
            .map(|v| DatabaseOption {
                value: v.value(),
                label: v.display_name()
            })
            .collect()
    }
}

/// Error for unknown variant selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown database variant: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for DatabaseVariant {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "h2" => Ok(Self::H2),
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgresql),
            "mysql" => Ok(Self::Mysql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(UnknownVariant(value.to_string()))
        }
    }
}

impl fmt::Display for DatabaseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl Serialize for DatabaseVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for DatabaseVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Substitute `{key}` placeholders in a template.
#[must_use]
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

const LOGGING_AND_SERVER: &str = "
server:
  port: 8080

logging:
  level:
    root: INFO
    {base_package}: DEBUG
";

static H2: VariantProfile = VariantProfile {
    value:            "H2",
    display_name:     "H2 In-Memory",
    driver_class:     "org.h2.Driver",
    storage:          StorageModel::Relational,
    config_template:  "spring:
  application:
    name: {project}

  datasource:
    url: jdbc:h2:mem:testdb
    driver-class-name: org.h2.Driver
    username: sa
    password:

  jpa:
    hibernate:
      ddl-auto: update
    show-sql: true
    properties:
      hibernate:
        format_sql: true

  h2:
    console:
      enabled: true
      path: /h2-console
",
    build_dependency: "        <dependency>
            <groupId>com.h2database</groupId>
            <artifactId>h2</artifactId>
            <scope>runtime</scope>
        </dependency>",
    compose_template: None,
    readme_setup:     "H2 Console: http://localhost:8080/h2-console"
};

static POSTGRESQL: VariantProfile = VariantProfile {
    value:            "POSTGRESQL",
    display_name:     "PostgreSQL",
    driver_class:     "org.postgresql.Driver",
    storage:          StorageModel::Relational,
    config_template:  "spring:
  application:
    name: {project}

  datasource:
    url: jdbc:postgresql://localhost:5432/{project}
    driver-class-name: org.postgresql.Driver
    username: postgres
    password: postgres

  jpa:
    hibernate:
      ddl-auto: update
    show-sql: true
    properties:
      hibernate:
        dialect: org.hibernate.dialect.PostgreSQLDialect
        format_sql: true
",
    build_dependency: "        <dependency>
            <groupId>org.postgresql</groupId>
            <artifactId>postgresql</artifactId>
            <scope>runtime</scope>
        </dependency>",
    compose_template: Some(
        "version: '3.8'
services:
  postgres:
    image: postgres:15
    container_name: {project}-postgres
    environment:
      POSTGRES_DB: {project}
      POSTGRES_USER: postgres
      POSTGRES_PASSWORD: postgres
    ports:
      - \"5432:5432\"
    volumes:
      - postgres_data:/var/lib/postgresql/data

volumes:
  postgres_data:
"
    ),
    readme_setup:     "## Database Setup
```bash
# Start PostgreSQL with Docker
docker-compose up -d
```"
};

static MYSQL: VariantProfile = VariantProfile {
    value:            "MYSQL",
    display_name:     "MySQL",
    driver_class:     "com.mysql.cj.jdbc.Driver",
    storage:          StorageModel::Relational,
    config_template:  "spring:
  application:
    name: {project}

  datasource:
    url: jdbc:mysql://localhost:3306/{project}?useSSL=false&serverTimezone=UTC
    driver-class-name: com.mysql.cj.jdbc.Driver
    username: root
    password: root

  jpa:
    hibernate:
      ddl-auto: update
    show-sql: true
    properties:
      hibernate:
        dialect: org.hibernate.dialect.MySQLDialect
        format_sql: true
",
    build_dependency: "        <dependency>
            <groupId>com.mysql</groupId>
            <artifactId>mysql-connector-j</artifactId>
            <scope>runtime</scope>
        </dependency>",
    compose_template: Some(
        "version: '3.8'
services:
  mysql:
    image: mysql:8
    container_name: {project}-mysql
    environment:
      MYSQL_ROOT_PASSWORD: root
      MYSQL_DATABASE: {project}
    ports:
      - \"3306:3306\"
    volumes:
      - mysql_data:/var/lib/mysql

volumes:
  mysql_data:
"
    ),
    readme_setup:     "## Database Setup
```bash
# Start MySQL with Docker
docker-compose up -d
```"
};

static MONGODB: VariantProfile = VariantProfile {
    value:            "MONGODB",
    display_name:     "MongoDB",
    driver_class:     "mongodb",
    storage:          StorageModel::Document,
    config_template:  "spring:
  application:
    name: {project}

  data:
    mongodb:
      uri: mongodb://localhost:27017/{project}
",
    build_dependency: "        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-data-mongodb</artifactId>
        </dependency>",
    compose_template: Some(
        "version: '3.8'
services:
  mongodb:
    image: mongo:6
    container_name: {project}-mongodb
    ports:
      - \"27017:27017\"
    volumes:
      - mongo_data:/data/db

volumes:
  mongo_data:
"
    ),
    readme_setup:     "## Database Setup
```bash
# Start MongoDB with Docker
docker-compose up -d
```"
};

static SQLITE: VariantProfile = VariantProfile {
    value:            "SQLITE",
    display_name:     "SQLite",
    driver_class:     "org.sqlite.JDBC",
    storage:          StorageModel::Relational,
    config_template:  "spring:
  application:
    name: {project}

  datasource:
    url: jdbc:sqlite:{project}.db
    driver-class-name: org.sqlite.JDBC

  jpa:
    hibernate:
      ddl-auto: update
    show-sql: true
    properties:
      hibernate:
        dialect: org.hibernate.community.dialect.SQLiteDialect
        format_sql: true
",
    build_dependency: "        <dependency>
            <groupId>org.xerial</groupId>
            <artifactId>sqlite-jdbc</artifactId>
            <version>3.44.1.0</version>
        </dependency>
        <dependency>
            <groupId>org.hibernate.orm</groupId>
            <artifactId>hibernate-community-dialects</artifactId>
        </dependency>",
    compose_template: None,
    readme_setup:     "SQLite database file: ./{project}.db"
};

/// Full `application.yml` for a variant.
#[must_use]
pub fn application_config(variant: DatabaseVariant, project: &str, base_package: &str) -> String {
    let template = format!("{}{}", variant.profile().config_template, LOGGING_AND_SERVER);
    render(&template, &[("project", project), ("base_package", base_package)])
}
