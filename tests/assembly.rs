// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end assembly scenarios.

mod common;

use blueprint_forge::{
    AnalysisResult, AssemblerOptions, DatabaseVariant, FlowchartMode, ProjectAssembler, assemble,
    generator::generate_schema,
    model::{Attribute, RelationType, Relationship, Service}
};
use common::{checkout_flow, entity, order, order_with_items, shop};
use proptest::prelude::*;

const JAVA: &str = "src/main/java/com/shop";

#[test]
fn order_scenario_schema() {
    let project = assemble(&shop(vec![order()], vec![]), DatabaseVariant::H2).unwrap();
    let schema = project
        .generated_files
        .get("src/main/resources/schema.sql")
        .unwrap();

    let drop = schema.find("DROP TABLE IF EXISTS order CASCADE;").unwrap();
    let create = schema
        .find("CREATE TABLE order (\n    id BIGINT PRIMARY KEY,\n    total DECIMAL(19,2)\n);")
        .unwrap();
    assert!(drop < create);
}

#[test]
fn order_items_fk_comment() {
    let project = assemble(&order_with_items(), DatabaseVariant::H2).unwrap();
    let schema = project
        .generated_files
        .get("src/main/resources/schema.sql")
        .unwrap();

    let fk_lines: Vec<&str> = schema
        .lines()
        .filter(|l| l.starts_with("-- ALTER TABLE"))
        .collect();
    assert_eq!(fk_lines.len(), 1);
    assert!(fk_lines[0].contains("fk_order_order_item"));

    let order = project
        .generated_files
        .get(&format!("{JAVA}/entity/Order.java"))
        .unwrap();
    assert!(order.contains("private List<OrderItem> orderItems = new ArrayList<>();"));

    let repo = project
        .generated_files
        .get(&format!("{JAVA}/repository/OrderItemRepository.java"))
        .unwrap();
    assert!(repo.contains("List<OrderItem> findByOrderId(Long orderId);"));
}

#[test]
fn empty_entities_is_rejected() {
    let err = assemble(&shop(vec![], vec![]), DatabaseVariant::H2).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn dangling_relationships_are_all_reported() {
    let input = shop(
        vec![order()],
        vec![
            Relationship::new("Order", "Invoice", RelationType::OneToOne),
            Relationship::new("Customer", "Order", RelationType::OneToMany),
        ]
    );
    match assemble(&input, DatabaseVariant::H2).unwrap_err() {
        blueprint_forge::Error::Validation(report) => {
            assert!(report.mentions("relationships[0].targetEntity"));
            assert!(report.mentions("relationships[1].sourceEntity"));
            assert_eq!(report.errors().count(), 2);
        }
        other => panic!("unexpected error: {other:?}")
    }
}

#[test]
fn service_name_cannot_leave_the_source_tree() {
    let mut input = shop(vec![order()], vec![]);
    input.services = vec![Service {
        name: "../../../../../../../../escaped".into(),
        ..Service::default()
    }];
    match assemble(&input, DatabaseVariant::H2).unwrap_err() {
        blueprint_forge::Error::Validation(report) => {
            assert!(report.mentions("services[0].name"));
        }
        other => panic!("unexpected error: {other:?}")
    }
}

#[test]
fn repeated_relationship_needs_mapped_by() {
    let input = shop(
        vec![order(), entity("Customer", vec![Attribute::new("id", "Long").primary_key()])],
        vec![
            Relationship::new("Order", "Customer", RelationType::ManyToOne),
            Relationship::new("Order", "Customer", RelationType::ManyToOne),
        ]
    );
    let err = assemble(&input, DatabaseVariant::H2).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("mappedBy"), "{err}");
}

#[test]
fn output_is_deterministic() {
    let mut input = order_with_items();
    input.flowchart_logic = Some(checkout_flow());

    for variant in [
        DatabaseVariant::H2,
        DatabaseVariant::Postgresql,
        DatabaseVariant::Mysql,
        DatabaseVariant::Mongodb,
        DatabaseVariant::Sqlite
    ] {
        let first = assemble(&input, variant).unwrap();
        let second = assemble(&input, variant).unwrap();
        assert_eq!(first.generated_files, second.generated_files, "{variant}");
        assert_ne!(first.project_id, second.project_id);
    }
}

#[test]
fn document_store_has_no_jpa() {
    let project = assemble(&order_with_items(), DatabaseVariant::Mongodb).unwrap();
    let files = &project.generated_files;

    let pom = files.get("pom.xml").unwrap();
    assert!(!pom.contains("spring-boot-starter-data-jpa"));
    assert!(pom.contains("spring-boot-starter-data-mongodb"));

    for (path, content) in files {
        if path.ends_with(".java") {
            assert!(!content.contains("jakarta.persistence"), "{path}");
        }
    }
    let order = files.get(&format!("{JAVA}/entity/Order.java")).unwrap();
    assert!(order.contains("@Document(collection = \"order\")"));
    assert!(files.contains("docker-compose.yml"));
}

#[test]
fn relational_variants_use_jpa() {
    for variant in [
        DatabaseVariant::H2,
        DatabaseVariant::Postgresql,
        DatabaseVariant::Mysql,
        DatabaseVariant::Sqlite
    ] {
        let project = assemble(&order_with_items(), variant).unwrap();
        let pom = project.generated_files.get("pom.xml").unwrap();
        assert!(pom.contains("spring-boot-starter-data-jpa"), "{variant}");
        assert_eq!(
            project.generated_files.contains("docker-compose.yml"),
            matches!(variant, DatabaseVariant::Postgresql | DatabaseVariant::Mysql),
            "{variant}"
        );
    }
}

#[test]
fn linear_flowchart_keeps_array_order() {
    let mut input = shop(vec![order()], vec![]);
    input.flowchart_logic = Some(checkout_flow());

    let project = assemble(&input, DatabaseVariant::H2).unwrap();
    let service = project
        .generated_files
        .get(&format!("{JAVA}/service/CheckoutFlow.java"))
        .unwrap();

    let markers = [
        "// Begin checkout",
        "// Reset counter",
        "x=0;",
        "// Counter reached one",
        "// Checkout done"
    ];
    let positions: Vec<usize> = markers
        .iter()
        .map(|m| service.find(m).unwrap_or_else(|| panic!("missing {m}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(service.matches("x=0;").count(), 1);
    assert!(!service.contains("if ("));
}

#[test]
fn structured_flowchart_recovers_loop() {
    let mut input = shop(vec![order()], vec![]);
    input.flowchart_logic = Some(checkout_flow());

    let assembler = ProjectAssembler::new(AssemblerOptions {
        flowchart_mode: FlowchartMode::Structured
    });
    let project = assembler.assemble(&input, DatabaseVariant::H2).unwrap();
    let service = project
        .generated_files
        .get(&format!("{JAVA}/service/CheckoutFlow.java"))
        .unwrap();
    assert!(service.contains("do {"));
    assert!(service.contains("} while (!(x==1));"));
}

#[test]
fn analyzer_output_with_fences() {
    let response = r#"```json
{
  "diagramType": "ER",
  "projectName": "Library",
  "basePackage": "org.library",
  "entities": [
    {"name": "Book", "attributes": [
      {"name": "id", "type": "Long", "primaryKey": true},
      {"name": "isbn", "type": "String", "unique": true, "nullable": false}
    ]}
  ]
}
```"#;
    let analysis = AnalysisResult::from_ai_response(response).unwrap();
    let project = assemble(&analysis, DatabaseVariant::H2).unwrap();
    let repo = project
        .generated_files
        .get("src/main/java/org/library/repository/BookRepository.java")
        .unwrap();
    assert!(repo.contains("Optional<Book> findByIsbn(String isbn);"));
    assert!(repo.contains("boolean existsByIsbn(String isbn);"));
}

fn entity_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Z][a-z]{2,8}", 1..6)
        .prop_map(|names| names.into_iter().collect())
}

proptest! {
    #[test]
    fn one_drop_and_create_per_entity(names in entity_names()) {
        let entities = names
            .iter()
            .map(|n| entity(n, vec![Attribute::new("id", "Long").primary_key()]))
            .collect();
        let schema = generate_schema(&shop(entities, vec![]));

        prop_assert_eq!(schema.matches("DROP TABLE IF EXISTS").count(), names.len());
        prop_assert_eq!(schema.matches("CREATE TABLE").count(), names.len());

        let drops: Vec<usize> = names
            .iter()
            .map(|n| schema.find(&format!("DROP TABLE IF EXISTS {} CASCADE;", n.to_lowercase())).unwrap())
            .collect();
        prop_assert!(drops.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn one_fk_line_per_relationship(names in entity_names(), picks in prop::collection::vec((0usize..6, 0usize..6), 0..8)) {
        let relationships: Vec<Relationship> = picks
            .iter()
            .map(|&(a, b)| Relationship::new(
                names[a % names.len()].clone(),
                names[b % names.len()].clone(),
                RelationType::ManyToOne
            ))
            .collect();
        let entities = names.iter().map(|n| entity(n, vec![])).collect();
        let schema = generate_schema(&shop(entities, relationships.clone()));
        prop_assert_eq!(schema.matches("-- ALTER TABLE").count(), relationships.len());
    }
}
