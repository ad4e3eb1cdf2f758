//! # Migration Generation
//!
//! This module generates Laravel migration classes from the schema
//! description. Every table gets one migration, pivot tables included, in
//! declaration order.
//!
//! ## Generated Files
//!
//! Each table produces a migration file named:
//! ```text
//! database/migrations/{Y_m_d}_{unix time + position}_create_{table}_table.php
//! ```
//!
//! ## Features
//!
//! - One schema-builder call per column, with arguments and chained modifiers
//! - Index definitions on a single column or a list of columns
//! - Foreign-key constraints for every detected forward relationship
//! - `down()` drops the table

pub mod php;

pub use php::{MIGRATIONS_DIR, generate_migrations};
