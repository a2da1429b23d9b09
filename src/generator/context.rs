// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation context shared by every per-entity generator.
//!
//! The context is built once per assembly. It resolves each relationship into
//! the concrete fields it produces on both entities, so that the entity
//! generator and the repository generator agree on field names and join
//! columns.
//!
//! # Relation Fields
//!
//! | Type | Source side | Target side |
//! |------|-------------|-------------|
//! | `ONE_TO_ONE` | owning, join column `<target table>_id` | inverse, if bidirectional |
//! | `MANY_TO_ONE` | owning, join column `<target table>_id` | inverse list, if bidirectional |
//! | `ONE_TO_MANY` | inverse list, cascade all | owning, join column `<source table>_id` |
//! | `MANY_TO_MANY` | owning list, join table `<source>_<target>` | inverse list, if bidirectional |
//!
//! The owning field is named by `mappedBy` when given. Document stores only
//! get a `@DBRef` field on the declared source side.

use std::collections::HashMap;

use crate::{
    model::{AnalysisResult, Entity, RelationType, Relationship},
    naming::{field_name, pluralize},
    types::{JavaType, JavaTypeMapper, LogicalType, TypeMapper},
    variant::{DatabaseVariant, VariantProfile}
};

/// Everything a generator needs besides the entity it renders.
#[derive(Debug)]
pub struct Context<'a> {
    /// Input analysis.
    pub analysis: &'a AnalysisResult,
    /// Selected database variant.
    pub variant:  DatabaseVariant,
    /// Profile record of [`Context::variant`].
    pub profile:  &'static VariantProfile,
    relations:    HashMap<String, Vec<RelationField>>
}

impl<'a> Context<'a> {
    /// Build the context and the relation index.
    #[must_use]
    pub fn new(analysis: &'a AnalysisResult, variant: DatabaseVariant) -> Self {
        let profile = variant.profile();
        let mut relations: HashMap<String, Vec<RelationField>> = HashMap::new();

        for rel in &analysis.relationships {
            let fields = if profile.is_document() {
                document_fields(rel)
            } else {
                relational_fields(analysis, rel)
            };
            for (owner, field) in fields {
                relations.entry(owner).or_default().push(field);
            }
        }

        Self {
            analysis,
            variant,
            profile,
            relations
        }
    }

    /// Java base package.
    #[must_use]
    pub fn base_package(&self) -> &str {
        &self.analysis.base_package
    }

    /// Relation fields declared on an entity, in relationship order.
    #[must_use]
    pub fn relations(&self, entity: &str) -> &[RelationField] {
        self.relations.get(entity).map_or(&[], Vec::as_slice)
    }

    /// Identifier of an entity by name; unknown entities get a synthetic
    /// `Long id`.
    #[must_use]
    pub fn id_field(&self, entity: &str) -> IdField {
        self.analysis
            .entity(entity)
            .map_or_else(IdField::synthetic, IdField::of)
    }
}

/// The identifier attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdField {
    /// Java field name.
    pub name:      String,
    /// Java type.
    pub java:      JavaType,
    /// Whether ids are generated by the database.
    pub generated: bool,
    /// Whether the entity declared no primary key and this field is added.
    pub synthetic: bool
}

impl IdField {
    /// Primary key of `entity`, or a synthetic `Long id`.
    #[must_use]
    pub fn of(entity: &Entity) -> Self {
        match entity.primary_key() {
            Some(pk) => Self {
                name:      pk.name.clone(),
                java:      JavaTypeMapper.map_type(pk),
                generated: LogicalType::of(pk).is_integral(),
                synthetic: false
            },
            None => Self::synthetic()
        }
    }

    fn synthetic() -> Self {
        Self {
            name:      "id".to_string(),
            java:      LogicalType::BigInt.java(),
            generated: true,
            synthetic: true
        }
    }
}

/// A field produced by a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationField {
    /// Java field name.
    pub name:       String,
    /// Referenced entity name.
    pub target:     String,
    /// JPA annotation name without `@` (`ManyToOne`, ...).
    pub annotation: &'static str,
    /// Whether the field is a `List`.
    pub collection: bool,
    /// How the field is mapped.
    pub mapping:    RelationMapping
}

/// Mapping details of a [`RelationField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationMapping {
    /// Owning side with a foreign key column.
    JoinColumn(String),
    /// Owning side of a many-to-many association.
    JoinTable {
        /// Join table name.
        table:               String,
        /// Column referencing the owner.
        join_column:         String,
        /// Column referencing the target.
        inverse_join_column: String
    },
    /// Inverse side.
    MappedBy {
        /// Owning field on the other entity.
        field:   String,
        /// Whether operations cascade to the other side.
        cascade: bool
    },
    /// Document reference.
    Reference
}

impl RelationField {
    /// Declared Java type (`OrderItem` or `List<OrderItem>`).
    #[must_use]
    pub fn java_type(&self) -> String {
        if self.collection {
            format!("List<{}>", self.target)
        } else {
            self.target.clone()
        }
    }

    /// Whether this field holds a single owned reference that a repository
    /// can query by id.
    #[must_use]
    pub fn is_owning_single(&self) -> bool {
        !self.collection
            && matches!(
                self.mapping,
                RelationMapping::JoinColumn(_) | RelationMapping::Reference
            )
    }
}

fn join_column(table: &str) -> String {
    format!("{table}_id")
}

/// Fields for relational variants, keyed by the entity that declares them.
pub(crate) fn relational_fields(analysis: &AnalysisResult, rel: &Relationship) -> Vec<(String, RelationField)> {
    let src = &rel.source_entity;
    let tgt = &rel.target_entity;
    let src_table = analysis.table_of(src);
    let tgt_table = analysis.table_of(tgt);
    let mut fields = Vec::with_capacity(2);

    match rel.kind {
        RelationType::OneToOne | RelationType::ManyToOne => {
            let owning = rel.mapped_by.clone().unwrap_or_else(|| field_name(tgt));
            fields.push((
                src.clone(),
                RelationField {
                    name:       owning.clone(),
                    target:     tgt.clone(),
                    annotation: if rel.kind == RelationType::OneToOne {
                        "OneToOne"
                    } else {
                        "ManyToOne"
                    },
                    collection: false,
                    mapping:    RelationMapping::JoinColumn(join_column(&tgt_table))
                }
            ));
            if rel.bidirectional {
                let one_to_one = rel.kind == RelationType::OneToOne;
                fields.push((
                    tgt.clone(),
                    RelationField {
                        name:       if one_to_one {
                            field_name(src)
                        } else {
                            pluralize(&field_name(src))
                        },
                        target:     src.clone(),
                        annotation: if one_to_one { "OneToOne" } else { "OneToMany" },
                        collection: !one_to_one,
                        mapping:    RelationMapping::MappedBy {
                            field:   owning,
                            cascade: false
                        }
                    }
                ));
            }
        }
        RelationType::OneToMany => {
            let owning = rel.mapped_by.clone().unwrap_or_else(|| field_name(src));
            fields.push((
                src.clone(),
                RelationField {
                    name:       pluralize(&field_name(tgt)),
                    target:     tgt.clone(),
                    annotation: "OneToMany",
                    collection: true,
                    mapping:    RelationMapping::MappedBy {
                        field:   owning.clone(),
                        cascade: true
                    }
                }
            ));
            fields.push((
                tgt.clone(),
                RelationField {
                    name:       owning,
                    target:     src.clone(),
                    annotation: "ManyToOne",
                    collection: false,
                    mapping:    RelationMapping::JoinColumn(join_column(&src_table))
                }
            ));
        }
        RelationType::ManyToMany => {
            let owning = rel
                .mapped_by
                .clone()
                .unwrap_or_else(|| pluralize(&field_name(tgt)));
            fields.push((
                src.clone(),
                RelationField {
                    name:       owning.clone(),
                    target:     tgt.clone(),
                    annotation: "ManyToMany",
                    collection: true,
                    mapping:    RelationMapping::JoinTable {
                        table:               format!("{src_table}_{tgt_table}"),
                        join_column:         join_column(&src_table),
                        inverse_join_column: join_column(&tgt_table)
                    }
                }
            ));
            if rel.bidirectional {
                fields.push((
                    tgt.clone(),
                    RelationField {
                        name:       pluralize(&field_name(src)),
                        target:     src.clone(),
                        annotation: "ManyToMany",
                        collection: true,
                        mapping:    RelationMapping::MappedBy {
                            field:   owning,
                            cascade: false
                        }
                    }
                ));
            }
        }
    }

    fields
}

/// Document stores keep a `@DBRef` on the source side only.
fn document_fields(rel: &Relationship) -> Vec<(String, RelationField)> {
    let tgt = &rel.target_entity;
    let (name, collection) = match rel.kind {
        RelationType::OneToOne | RelationType::ManyToOne => {
            (rel.mapped_by.clone().unwrap_or_else(|| field_name(tgt)), false)
        }
        RelationType::OneToMany => (pluralize(&field_name(tgt)), true),
        RelationType::ManyToMany => (
            rel.mapped_by
                .clone()
                .unwrap_or_else(|| pluralize(&field_name(tgt))),
            true
        )
    };

    vec![(
        rel.source_entity.clone(),
        RelationField {
            name,
            target: tgt.clone(),
            annotation: "DBRef",
            collection,
            mapping: RelationMapping::Reference
        }
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    fn shop(kind: RelationType, bidirectional: bool) -> AnalysisResult {
        let entity = |name: &str| Entity {
            name: name.into(),
            attributes: vec![Attribute::new("id", "Long").primary_key()],
            ..Entity::default()
        };
        let mut rel = Relationship::new("Order", "OrderItem", kind);
        rel.bidirectional = bidirectional;
        AnalysisResult {
            project_name: "Shop".into(),
            base_package: "com.shop".into(),
            entities: vec![entity("Order"), entity("OrderItem")],
            relationships: vec![rel],
            ..AnalysisResult::default()
        }
    }

    #[test]
    fn one_to_many_owned_by_target() {
        let analysis = shop(RelationType::OneToMany, false);
        let ctx = Context::new(&analysis, DatabaseVariant::H2);

        let order = ctx.relations("Order");
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].name, "orderItems");
        assert_eq!(order[0].java_type(), "List<OrderItem>");
        assert_eq!(
            order[0].mapping,
            RelationMapping::MappedBy {
                field:   "order".into(),
                cascade: true
            }
        );

        let item = ctx.relations("OrderItem");
        assert_eq!(item.len(), 1);
        assert_eq!(item[0].name, "order");
        assert_eq!(item[0].mapping, RelationMapping::JoinColumn("order_id".into()));
        assert!(item[0].is_owning_single());
    }

    #[test]
    fn many_to_one_inverse_only_when_bidirectional() {
        let analysis = shop(RelationType::ManyToOne, false);
        let ctx = Context::new(&analysis, DatabaseVariant::Postgresql);
        assert!(ctx.relations("OrderItem").is_empty());
        assert_eq!(
            ctx.relations("Order")[0].mapping,
            RelationMapping::JoinColumn("order_item_id".into())
        );

        let analysis = shop(RelationType::ManyToOne, true);
        let ctx = Context::new(&analysis, DatabaseVariant::Postgresql);
        let inverse = &ctx.relations("OrderItem")[0];
        assert_eq!(inverse.name, "orders");
        assert_eq!(inverse.annotation, "OneToMany");
    }

    #[test]
    fn mapped_by_names_the_owning_field() {
        let mut analysis = shop(RelationType::OneToOne, true);
        analysis.relationships[0].mapped_by = Some("lineItem".into());
        let ctx = Context::new(&analysis, DatabaseVariant::H2);

        assert_eq!(ctx.relations("Order")[0].name, "lineItem");
        assert_eq!(
            ctx.relations("OrderItem")[0].mapping,
            RelationMapping::MappedBy {
                field:   "lineItem".into(),
                cascade: false
            }
        );
    }

    #[test]
    fn many_to_many_join_table() {
        let analysis = shop(RelationType::ManyToMany, true);
        let ctx = Context::new(&analysis, DatabaseVariant::Mysql);
        assert_eq!(
            ctx.relations("Order")[0].mapping,
            RelationMapping::JoinTable {
                table:               "order_order_item".into(),
                join_column:         "order_id".into(),
                inverse_join_column: "order_item_id".into()
            }
        );
        assert_eq!(ctx.relations("OrderItem")[0].name, "orders");
    }

    #[test]
    fn document_store_keeps_source_side_only() {
        let analysis = shop(RelationType::OneToMany, true);
        let ctx = Context::new(&analysis, DatabaseVariant::Mongodb);
        assert!(ctx.relations("OrderItem").is_empty());
        let field = &ctx.relations("Order")[0];
        assert_eq!(field.mapping, RelationMapping::Reference);
        assert!(field.collection);
    }

    #[test]
    fn id_field_falls_back_to_synthetic_long() {
        let analysis = AnalysisResult {
            entities: vec![Entity {
                name: "Tag".into(),
                ..Entity::default()
            }],
            ..AnalysisResult::default()
        };
        let ctx = Context::new(&analysis, DatabaseVariant::H2);
        let id = ctx.id_field("Tag");
        assert!(id.synthetic);
        assert!(id.generated);
        assert_eq!(id.java.name, "Long");
    }

    #[test]
    fn string_primary_key_is_not_generated() {
        let entity = Entity {
            name: "Country".into(),
            attributes: vec![Attribute::new("code", "String").primary_key()],
            ..Entity::default()
        };
        let id = IdField::of(&entity);
        assert_eq!(id.name, "code");
        assert!(!id.generated);
        assert!(!id.synthetic);
    }
}
