//! # Relationship Inference
//!
//! Infers the relationship graph of a schema in three passes, each taking
//! the relationship set by value and handing it to the next:
//!
//! ```text
//! SchemaIndex
//!     │
//!     ▼
//! detector::detect()            → RelationshipSet (forward edges)
//!     │
//!     ▼
//! disambiguation::resolve()     → RelationshipSet (kinds confirmed)
//!     │
//!     ▼
//! inverse::synthesize()         → RelationshipGraph (frozen)
//! ```
//!
//! Any error aborts the whole run; a partial graph is never returned.

pub mod detector;
pub mod disambiguation;
pub mod inverse;
pub mod pivot;

pub use detector::{candidate_table, detect};
pub use disambiguation::{AlwaysDefault, DecisionSource, ScriptedDecisions, resolve};
pub use inverse::synthesize;
pub use pivot::{is_pivot_table, pivot_parts};

use crate::relationship::RelationshipGraph;
use crate::schema_index::SchemaIndex;
use scaffold_core::{RelationKind, ScaffoldResult};

/// Run detection, disambiguation, and inverse synthesis.
pub fn infer(
    index: &SchemaIndex,
    decisions: &mut dyn DecisionSource,
) -> ScaffoldResult<RelationshipGraph> {
    let detected = detect(index)?;
    tracing::info!(
        "Detected {} relationship(s) ({} one-to-many, {} many-to-many)",
        detected.len(),
        detected.count_kind(RelationKind::BelongsTo),
        detected.count_kind(RelationKind::BelongsToMany),
    );

    if detected.count_kind(RelationKind::BelongsTo) > 0 {
        decisions.note("Please confirm the following relationship types:");
    }
    let resolved = resolve(detected, index, decisions)?;

    let graph = synthesize(resolved, index)?;
    tracing::info!(
        "Relationship graph complete: {} relationship(s) across {} table(s)",
        graph.len(),
        graph.as_set().tables().count()
    );

    Ok(graph)
}

// ============================================================================
// Tests
// ============================================================================
