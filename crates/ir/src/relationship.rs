//! Relationship records and the relationship set
//!
//! A `Relationship` is a directional edge from an owning table to a
//! referenced table. The `RelationshipSet` maps each table to its ordered
//! relationships while inference runs; once inverse synthesis completes it
//! is frozen into a `RelationshipGraph`.

use indexmap::IndexMap;
use scaffold_core::RelationKind;
use serde::{Deserialize, Serialize};

/// Key column on the referenced side of every relationship
pub const REFERENCED_KEY: &str = "id";

// ============================================================================
// Relationship
// ============================================================================

/// A relationship recorded on an owning table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Column holding the reference (forward edges only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_column: Option<String>,

    /// Key column on the referenced table
    pub referenced_key: String,

    /// Name of the referenced table
    pub on: String,

    /// Kind of relationship
    pub kind: RelationKind,

    /// Inverse kind to synthesize instead of the default `HasMany`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_inverse_kind: Option<RelationKind>,
}

impl Relationship {
    /// Create a forward relationship detected from a foreign-key column
    pub fn forward(
        foreign_column: impl Into<String>,
        on: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            foreign_column: Some(foreign_column.into()),
            referenced_key: REFERENCED_KEY.to_string(),
            on: on.into(),
            kind,
            pending_inverse_kind: None,
        }
    }

    /// Create a synthesized inverse relationship (no foreign column)
    pub fn inverse(on: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            foreign_column: None,
            referenced_key: REFERENCED_KEY.to_string(),
            on: on.into(),
            kind,
            pending_inverse_kind: None,
        }
    }

    /// Set the pending inverse kind
    pub fn with_pending_inverse(mut self, kind: RelationKind) -> Self {
        self.pending_inverse_kind = Some(kind);
        self
    }

    /// Check if this relationship physically holds a foreign key
    pub fn is_forward(&self) -> bool {
        self.foreign_column.is_some()
    }

    /// Kind synthesized on the far side of a `BelongsTo` relationship
    pub fn inverse_kind(&self) -> RelationKind {
        self.pending_inverse_kind.unwrap_or(RelationKind::HasMany)
    }
}

// ============================================================================
// RelationshipSet
// ============================================================================

/// Mapping from table name to its ordered relationships
///
/// Threaded by value through detection, disambiguation, and synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipSet {
    tables: IndexMap<String, Vec<Relationship>>,
}

impl RelationshipSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a relationship to a table's list
    pub fn push(&mut self, table: impl Into<String>, relationship: Relationship) {
        self.tables.entry(table.into()).or_default().push(relationship);
    }

    /// Relationships recorded on a table, in order
    pub fn get(&self, table: &str) -> &[Relationship] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over `(table, relationship)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relationship)> {
        self.tables.iter().flat_map(|(table, relationships)| {
            relationships
                .iter()
                .map(move |relationship| (table.as_str(), relationship))
        })
    }

    /// Iterate mutably over `(table, relationship)` pairs in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Relationship)> {
        self.tables.iter_mut().flat_map(|(table, relationships)| {
            relationships
                .iter_mut()
                .map(move |relationship| (table.as_str(), relationship))
        })
    }

    /// Copy of every `(table, relationship)` pair taken at this moment
    pub fn snapshot(&self) -> Vec<(String, Relationship)> {
        self.iter()
            .map(|(table, relationship)| (table.to_string(), relationship.clone()))
            .collect()
    }

    /// Tables that own at least one relationship
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Total number of relationships across all tables
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Check whether no relationship is recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count relationships of a given kind
    pub fn count_kind(&self, kind: RelationKind) -> usize {
        self.iter().filter(|(_, r)| r.kind == kind).count()
    }

    /// Reorder the owning tables to follow `order`.
    ///
    /// Each table keeps its own relationship list untouched. Tables missing
    /// from `order` go last, in their current order.
    pub fn in_table_order<'a>(mut self, order: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tables = IndexMap::with_capacity(self.tables.len());
        for table in order {
            if let Some((name, relationships)) = self.tables.shift_remove_entry(table) {
                tables.insert(name, relationships);
            }
        }
        tables.extend(self.tables);

        Self { tables }
    }

    /// Freeze the set into a read-only graph
    pub fn freeze(self) -> RelationshipGraph {
        RelationshipGraph { set: self }
    }
}

// ============================================================================
// RelationshipGraph
// ============================================================================

/// The finalized relationship graph handed to the emitters
///
/// Contains forward relationships and their synthesized inverses. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationshipGraph {
    set: RelationshipSet,
}

impl RelationshipGraph {
    /// Relationships recorded on a table, in order
    pub fn relationships_for(&self, table: &str) -> &[Relationship] {
        self.set.get(table)
    }

    /// Forward relationships (those holding a foreign column) of a table
    pub fn foreign_keys_for<'a>(
        &'a self,
        table: &str,
    ) -> impl Iterator<Item = &'a Relationship> + use<'a> {
        self.set.get(table).iter().filter(|r| r.is_forward())
    }

    /// Iterate over `(table, relationship)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relationship)> {
        self.set.iter()
    }

    /// Total number of relationships
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Check whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Count relationships of a given kind
    pub fn count_kind(&self, kind: RelationKind) -> usize {
        self.set.count_kind(kind)
    }

    /// The underlying set
    pub fn as_set(&self) -> &RelationshipSet {
        &self.set
    }
}

// ============================================================================
// Tests
// ============================================================================
