//! Schema description model
//!
//! A schema description maps table names (plural, lowercase) to their
//! singular label, ordered columns, and optional indexes. Declaration order
//! is preserved everywhere: tables, columns, and modifiers.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Schema
// ============================================================================

/// The validated schema description: table name → table definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub tables: IndexMap<String, TableDef>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, keeping declaration order
    pub fn with_table(mut self, name: impl Into<String>, table: TableDef) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Get a table definition by name
    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.get(name)
    }

    /// Check whether a table exists
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Iterate over `(name, table)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableDef)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check whether the schema has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

// ============================================================================
// TableDef
// ============================================================================

/// A single table of the schema description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Singular label (e.g. `user` for `users`)
    #[serde(default)]
    pub singular: String,

    /// Columns in declaration order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Indexes in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    /// Create a table with the given singular label and no columns
    pub fn new(singular: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Append a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append an index
    pub fn with_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Names of all named columns, in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(|c| c.name())
    }

    /// Check whether any column has the given type tag
    pub fn has_column_type(&self, column_type: &str) -> bool {
        self.columns.iter().any(|c| c.column_type == column_type)
    }
}

// ============================================================================
// Column
// ============================================================================

/// A column definition
///
/// Some column types (`timestamps`, `rememberToken`, ...) carry no name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Schema-builder type tag (e.g. `integer`, `string`, `increments`)
    #[serde(rename = "type", default)]
    pub column_type: String,

    /// Extra builder arguments after the column name
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub arguments: Vec<Argument>,

    /// Chained modifiers (e.g. `unsigned`, `nullable`, `default`)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub modifiers: IndexMap<String, Argument>,
}

impl Column {
    /// Create a named column
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            column_type: column_type.into(),
            ..Self::default()
        }
    }

    /// Create a column without a name (e.g. `timestamps`)
    pub fn unnamed(column_type: impl Into<String>) -> Self {
        Self {
            name: None,
            column_type: column_type.into(),
            ..Self::default()
        }
    }

    /// Append a builder argument
    pub fn with_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Add a modifier
    pub fn with_modifier(mut self, name: impl Into<String>, argument: impl Into<Argument>) -> Self {
        self.modifiers.insert(name.into(), argument.into());
        self
    }

    /// The column name, treating an empty name as absent
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

// ============================================================================
// Argument
// ============================================================================

/// A literal argument passed to a column builder or modifier
///
/// Text arguments are emitted verbatim, so they may hold expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl Argument {
    /// Render the argument as it appears in generated source
    pub fn render(&self) -> String {
        match self {
            Argument::Bool(b) => b.to_string(),
            Argument::Integer(i) => i.to_string(),
            Argument::Float(f) => f.to_string(),
            Argument::Text(s) => s.clone(),
            Argument::List(items) => render_list(items),
        }
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Integer(value)
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Float(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Text(value.to_string())
    }
}

impl From<Vec<&str>> for Argument {
    fn from(value: Vec<&str>) -> Self {
        Argument::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Render a list of names as a short array literal: `['a', 'b']`
pub fn render_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// A lone argument is accepted in place of a list of arguments.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Argument>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Argument>),
        One(Argument),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(arguments) => arguments,
        OneOrMany::One(argument) => vec![argument],
    })
}

// ============================================================================
// IndexDef
// ============================================================================

/// An index definition (`unique`, `index`, `primary`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDef {
    #[serde(rename = "type", default)]
    pub index_type: String,

    #[serde(default)]
    pub columns: IndexColumns,
}

impl IndexDef {
    /// Create an index over the given columns
    pub fn new(index_type: impl Into<String>, columns: impl Into<IndexColumns>) -> Self {
        Self {
            index_type: index_type.into(),
            columns: columns.into(),
        }
    }
}

/// Index columns: a single column name or a list of names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexColumns {
    One(String),
    Many(Vec<String>),
}

impl IndexColumns {
    /// Check whether no column is named
    pub fn is_empty(&self) -> bool {
        match self {
            IndexColumns::One(column) => column.is_empty(),
            IndexColumns::Many(columns) => columns.is_empty(),
        }
    }

    /// Render as a builder argument: `'phone'` or `['a', 'b']`
    pub fn render(&self) -> String {
        match self {
            IndexColumns::One(column) => format!("'{}'", column),
            IndexColumns::Many(columns) => render_list(columns),
        }
    }
}

impl Default for IndexColumns {
    fn default() -> Self {
        IndexColumns::Many(Vec::new())
    }
}

impl From<&str> for IndexColumns {
    fn from(value: &str) -> Self {
        IndexColumns::One(value.to_string())
    }
}

impl From<Vec<&str>> for IndexColumns {
    fn from(value: Vec<&str>) -> Self {
        IndexColumns::Many(value.into_iter().map(str::to_string).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
