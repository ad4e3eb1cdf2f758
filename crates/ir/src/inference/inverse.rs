//! Inverse relationship synthesis
//!
//! Every `BelongsTo` gets a `HasMany` (or its pending override) on the
//! referenced table, and every `BelongsToMany` recorded on a pivot table gets
//! a `BelongsToMany` between the two tables the pivot joins. Synthesis walks
//! a snapshot of the forward set, so appended inverses are never revisited.

use crate::inference::pivot::pivot_parts;
use crate::relationship::{Relationship, RelationshipGraph, RelationshipSet};
use crate::schema_index::SchemaIndex;
use scaffold_core::{RelationKind, ScaffoldError, ScaffoldResult};

/// Append the inverse of every forward relationship and freeze the result.
///
/// The frozen graph lists owning tables in schema declaration order.
pub fn synthesize(
    mut set: RelationshipSet,
    index: &SchemaIndex,
) -> ScaffoldResult<RelationshipGraph> {
    for (table, relationship) in set.snapshot() {
        match relationship.kind {
            RelationKind::BelongsTo => {
                let kind = relationship.inverse_kind();
                tracing::debug!("Inverse: {} --[{}]--> {}", relationship.on, kind, table);
                set.push(relationship.on, Relationship::inverse(table, kind));
            }
            RelationKind::BelongsToMany => {
                let target = many_to_many_target(index, &table, &relationship.on)?;
                tracing::debug!(
                    "Inverse: {} --[{}]--> {} (through {})",
                    relationship.on,
                    RelationKind::BelongsToMany,
                    target,
                    table
                );
                set.push(
                    relationship.on,
                    Relationship::inverse(target, RelationKind::BelongsToMany),
                );
            }
            RelationKind::HasOne | RelationKind::HasMany => {}
        }
    }

    let order = index.all_tables().map(|(name, _)| name);
    Ok(set.in_table_order(order).freeze())
}

/// The table on the other side of a pivot from `on`.
///
/// Each pivot part is resolved to its table through its singular label;
/// the target is whichever resolved table is not `on`.
fn many_to_many_target(index: &SchemaIndex, pivot: &str, on: &str) -> ScaffoldResult<String> {
    let (first, second) = pivot_parts(pivot)?.ok_or_else(|| {
        ScaffoldError::internal(format!(
            "'{}' holds a many-to-many relationship but is not a pivot table",
            pivot
        ))
    })?;

    let first_table = index
        .table_name_for_singular(first)
        .ok_or_else(|| ScaffoldError::unresolved_singular(first, pivot))?;
    let second_table = index
        .table_name_for_singular(second)
        .ok_or_else(|| ScaffoldError::unresolved_singular(second, pivot))?;

    let target = if on == first_table {
        second_table
    } else {
        first_table
    };

    Ok(target.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, TableDef};
    use pretty_assertions::assert_eq;

    fn index() -> SchemaIndex {
        Schema::new()
            .with_table("roles", TableDef::new("role"))
            .with_table("users", TableDef::new("user"))
            .with_table("profiles", TableDef::new("profile"))
            .with_table("posts", TableDef::new("post"))
            .with_table("role_user", TableDef::new("role_user"))
            .with_table("user_user", TableDef::new("user_user"))
            .into()
    }

    #[test]
    fn test_belongs_to_gets_has_many() {
        let mut set = RelationshipSet::new();
        set.push(
            "profiles",
            Relationship::forward("user_id", "users", RelationKind::BelongsTo),
        );

        let graph = synthesize(set, &index()).unwrap();
        assert_eq!(
            graph.relationships_for("users"),
            &[Relationship::inverse("profiles", RelationKind::HasMany)]
        );
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_pending_inverse_kind_is_used() {
        let mut set = RelationshipSet::new();
        set.push(
            "profiles",
            Relationship::forward("user_id", "users", RelationKind::BelongsTo)
                .with_pending_inverse(RelationKind::HasOne),
        );

        let graph = synthesize(set, &index()).unwrap();
        assert_eq!(
            graph.relationships_for("users"),
            &[Relationship::inverse("profiles", RelationKind::HasOne)]
        );
        // the forward record is untouched
        assert_eq!(
            graph.relationships_for("profiles")[0].kind,
            RelationKind::BelongsTo
        );
    }

    #[test]
    fn test_has_one_is_not_inverted() {
        let mut set = RelationshipSet::new();
        set.push(
            "profiles",
            Relationship::forward("user_id", "users", RelationKind::HasOne),
        );

        let graph = synthesize(set, &index()).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.relationships_for("users").is_empty());
    }

    #[test]
    fn test_belongs_to_many_inverse_pair() {
        let mut set = RelationshipSet::new();
        set.push(
            "role_user",
            Relationship::forward("role_id", "roles", RelationKind::BelongsToMany),
        );
        set.push(
            "role_user",
            Relationship::forward("user_id", "users", RelationKind::BelongsToMany),
        );

        let graph = synthesize(set, &index()).unwrap();
        assert_eq!(
            graph.relationships_for("roles"),
            &[Relationship::inverse("users", RelationKind::BelongsToMany)]
        );
        assert_eq!(
            graph.relationships_for("users"),
            &[Relationship::inverse("roles", RelationKind::BelongsToMany)]
        );
        assert_eq!(graph.relationships_for("role_user").len(), 2);
    }

    #[test]
    fn test_self_referential_pivot() {
        let mut set = RelationshipSet::new();
        set.push(
            "user_user",
            Relationship::forward("user_id", "users", RelationKind::BelongsToMany),
        );

        let graph = synthesize(set, &index()).unwrap();
        assert_eq!(
            graph.relationships_for("users"),
            &[Relationship::inverse("users", RelationKind::BelongsToMany)]
        );
    }

    #[test]
    fn test_graph_follows_declaration_order() {
        let index: SchemaIndex = Schema::new()
            .with_table("users", TableDef::new("user"))
            .with_table("teams", TableDef::new("team"))
            .with_table("profiles", TableDef::new("profile"))
            .into();

        let mut set = RelationshipSet::new();
        set.push(
            "teams",
            Relationship::forward("user_id", "users", RelationKind::BelongsTo),
        );
        set.push(
            "profiles",
            Relationship::forward("user_id", "users", RelationKind::BelongsTo),
        );

        // users only gains entries during synthesis but is declared first
        let graph = synthesize(set, &index).unwrap();
        assert_eq!(
            graph.as_set().tables().collect::<Vec<_>>(),
            vec!["users", "teams", "profiles"]
        );

        let json = serde_json::to_string(&graph).unwrap();
        let users = json.find("\"users\"").unwrap();
        let teams = json.find("\"teams\"").unwrap();
        assert!(users < teams);
    }

    #[test]
    fn test_unresolved_singular_fails() {
        let index: SchemaIndex = Schema::new()
            .with_table("roles", TableDef::new("role"))
            .with_table("role_team", TableDef::new("role_team"))
            .into();

        let mut set = RelationshipSet::new();
        set.push(
            "role_team",
            Relationship::forward("role_id", "roles", RelationKind::BelongsToMany),
        );

        let err = synthesize(set, &index).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::UnresolvedSingular { ref singular, ref table }
                if singular == "team" && table == "role_team"
        ));
    }

    #[test]
    fn test_every_forward_gets_exactly_one_inverse() {
        let mut set = RelationshipSet::new();
        set.push(
            "posts",
            Relationship::forward("user_id", "users", RelationKind::BelongsTo),
        );
        set.push(
            "profiles",
            Relationship::forward("user_id", "users", RelationKind::BelongsTo),
        );
        set.push(
            "role_user",
            Relationship::forward("user_id", "users", RelationKind::BelongsToMany),
        );

        let graph = synthesize(set, &index()).unwrap();
        assert_eq!(
            graph.relationships_for("users"),
            &[
                Relationship::inverse("posts", RelationKind::HasMany),
                Relationship::inverse("profiles", RelationKind::HasMany),
                Relationship::inverse("roles", RelationKind::BelongsToMany),
            ]
        );
        assert_eq!(graph.len(), 6);
    }
}
