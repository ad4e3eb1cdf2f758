//! Disambiguation of detected one-to-many relationships
//!
//! A detected `BelongsTo` may really be one-to-one in either direction. An
//! injected [`DecisionSource`] answers up to two questions per relationship:
//!
//! ```text
//! "Profiles belong to Users (one to many)"          default yes
//!   yes -> BelongsTo, inverse HasMany
//!   no  -> "Ok, so does a profile have one user? (one to one)"   default no
//!            yes -> kind becomes HasOne on the owning table
//!            no  -> kind stays BelongsTo, inverse becomes HasOne
//! ```
//!
//! `BelongsToMany` relationships are never revisited.

use crate::relationship::RelationshipSet;
use crate::schema_index::SchemaIndex;
use scaffold_core::{RelationKind, ScaffoldError, ScaffoldResult};
use std::collections::VecDeque;

// ============================================================================
// DecisionSource
// ============================================================================

/// Capability that answers yes/no questions during disambiguation
///
/// Implementations may prompt a human or replay scripted answers.
pub trait DecisionSource {
    /// Ask a yes/no question; `default` is the answer on empty input
    fn confirm(&mut self, prompt: &str, default: bool) -> bool;

    /// Informational message that needs no answer
    fn note(&mut self, _message: &str) {}
}

/// Decision source that accepts every default
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDefault;

impl DecisionSource for AlwaysDefault {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        tracing::debug!("{} -> {}", prompt, if default { "yes" } else { "no" });
        default
    }
}

/// Decision source replaying a fixed queue of answers
///
/// Once the queue is exhausted every prompt receives its default. Every
/// prompt and note is recorded for inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<bool>,
    asked: Vec<String>,
    notes: Vec<String>,
}

impl ScriptedDecisions {
    /// Create a source that replays `answers` in order
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Prompts asked so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Notes received so far, in order
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Number of scripted answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(default)
    }

    fn note(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }
}

// ============================================================================
// Prompts
// ============================================================================

/// `"Profiles belong to Users (one to many)"`
pub fn belongs_to_prompt(owner: &str, referenced: &str) -> String {
    format!(
        "{} belong to {} (one to many)",
        upper_first(owner),
        upper_first(referenced)
    )
}

/// `"Ok, so does a profile have one user? (one to one)"`
pub fn has_one_prompt(owner_singular: &str, referenced_singular: &str) -> String {
    format!(
        "Ok, so does a {} have one {}? (one to one)",
        owner_singular, referenced_singular
    )
}

/// `"Got it, so a user has one profile. (one to one the other way round)"`
pub fn inverse_has_one_note(owner_singular: &str, referenced_singular: &str) -> String {
    format!(
        "Got it, so a {} has one {}. (one to one the other way round)",
        referenced_singular, owner_singular
    )
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// resolve
// ============================================================================

/// Confirm every detected `BelongsTo` with the decision source.
///
/// Only `kind` and `pending_inverse_kind` change; every relationship stays
/// attached to the table that holds its foreign key.
pub fn resolve(
    mut set: RelationshipSet,
    index: &SchemaIndex,
    decisions: &mut dyn DecisionSource,
) -> ScaffoldResult<RelationshipSet> {
    for (table, relationship) in set.iter_mut() {
        if relationship.kind != RelationKind::BelongsTo {
            continue;
        }

        if decisions.confirm(&belongs_to_prompt(table, &relationship.on), true) {
            continue;
        }

        let owner_singular = singular(index, table)?;
        let referenced_singular = singular(index, &relationship.on)?;

        if decisions.confirm(&has_one_prompt(owner_singular, referenced_singular), false) {
            tracing::debug!("{} has one {}", table, relationship.on);
            relationship.kind = RelationKind::HasOne;
        } else {
            decisions.note(&inverse_has_one_note(owner_singular, referenced_singular));
            tracing::debug!("{} has one {} (inverse)", relationship.on, table);
            relationship.pending_inverse_kind = Some(RelationKind::HasOne);
        }
    }

    Ok(set)
}

fn singular<'a>(index: &'a SchemaIndex, table: &str) -> ScaffoldResult<&'a str> {
    index
        .singular_of(table)
        .ok_or_else(|| ScaffoldError::TableNotFound(table.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
