// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use blueprint_forge::{
    AnalysisResult,
    model::{Attribute, Entity, FlowchartProgram, RelationType, Relationship, Step, StepKind}
};

pub fn entity(name: &str, attributes: Vec<Attribute>) -> Entity {
    Entity {
        name: name.into(),
        attributes,
        ..Entity::default()
    }
}

pub fn shop(entities: Vec<Entity>, relationships: Vec<Relationship>) -> AnalysisResult {
    AnalysisResult {
        project_name: "Shop".into(),
        base_package: "com.shop".into(),
        entities,
        relationships,
        ..AnalysisResult::default()
    }
}

/// `Order{id: Long (primary key), total: BigDecimal}`.
pub fn order() -> Entity {
    entity(
        "Order",
        vec![
            Attribute::new("id", "Long").primary_key(),
            Attribute::new("total", "BigDecimal"),
        ]
    )
}

pub fn order_item() -> Entity {
    entity(
        "OrderItem",
        vec![
            Attribute::new("id", "Long").primary_key(),
            Attribute::new("quantity", "Integer").required(),
        ]
    )
}

/// Order and OrderItem joined by one ONE_TO_MANY relationship.
pub fn order_with_items() -> AnalysisResult {
    shop(
        vec![order(), order_item()],
        vec![Relationship::new("Order", "OrderItem", RelationType::OneToMany)]
    )
}

/// `[START, PROCESS(x=0;), DECISION(x==1), END]` with branch indices that
/// point backwards and forwards.
pub fn checkout_flow() -> FlowchartProgram {
    let mut process = Step::new(StepKind::Process, "Reset counter");
    process.code = Some("x=0;".into());

    let mut decision = Step::new(StepKind::Decision, "Counter reached one");
    decision.condition = Some("x==1".into());
    decision.true_next = Some(3);
    decision.false_next = Some(1);

    FlowchartProgram {
        service_name: "CheckoutFlow".into(),
        method_name: "checkout".into(),
        description: Some("Checkout process".into()),
        steps: vec![
            Step::new(StepKind::Start, "Begin checkout"),
            process,
            decision,
            Step::new(StepKind::End, "Checkout done"),
        ]
    }
}
