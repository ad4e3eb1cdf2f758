//! Validation rules and utilities for schema descriptions
//!
//! Runs before relationship inference. Column types and their argument
//! counts are checked against the static registry in `scaffold_core`.

use crate::schema::{Schema, TableDef};
use scaffold_core::{ScaffoldError, ScaffoldResult, Validatable, column_type};

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check whether an error with the given code was reported
    pub fn has_code(&self, code: ValidationErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Convert to ScaffoldResult (fails if any errors)
    pub fn to_result(self) -> ScaffoldResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
                .join("; ");
            Err(ScaffoldError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "users.columns[2]")
    pub path: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

// ============================================================================
// ValidationErrorCode
// ============================================================================

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    // Table errors
    EmptyTableName,
    MissingSingular,
    NoColumns,

    // Column errors
    MissingColumnType,
    InvalidColumnType,
    MissingColumnName,
    TooManyArguments,

    // Index errors
    MissingIndexType,
    MissingIndexColumns,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Validate a schema and return the result
    fn validate(&self, schema: &Schema) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Schema validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with default rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(TablesRule));
        validator.add_rule(Box::new(ColumnsRule));
        validator.add_rule(Box::new(IndexesRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Validate a schema with all rules
    pub fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for rule in &self.rules {
            let rule_result = rule.validate(schema);
            if rule_result.has_errors() {
                tracing::debug!(
                    "Rule '{}' reported {} error(s)",
                    rule.name(),
                    rule_result.errors.len()
                );
            }
            result.merge(rule_result);
        }

        result
    }

    /// Validate and return Result
    pub fn validate_result(&self, schema: &Schema) -> ScaffoldResult<()> {
        self.validate(schema).to_result()
    }
}

impl Validatable for Schema {
    fn validate(&self) -> ScaffoldResult<()> {
        Validator::with_default_rules().validate_result(self)
    }
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Every table needs a name, a singular label, and at least one column
pub struct TablesRule;

impl ValidationRule for TablesRule {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (name, table) in schema.iter() {
            if name.trim().is_empty() {
                result.add_error(ValidationError::new(
                    ValidationErrorCode::EmptyTableName,
                    "Cannot have empty table name",
                ));
                continue;
            }

            if table.singular.trim().is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::MissingSingular,
                        format!("Table {} is missing the singular property", name),
                    )
                    .with_path(name),
                );
            }

            if table.columns.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::NoColumns,
                        format!("Table {} is missing any columns", name),
                    )
                    .with_path(name),
                );
            }
        }

        result
    }
}

/// Column types must exist and receive an acceptable number of arguments
pub struct ColumnsRule;

impl ColumnsRule {
    fn validate_table(name: &str, table: &TableDef, result: &mut ValidationResult) {
        for (i, column) in table.columns.iter().enumerate() {
            let path = format!("{}.columns[{}]", name, i);

            if column.column_type.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::MissingColumnType,
                        format!("A column in {} is missing the type property.", name),
                    )
                    .with_path(path),
                );
                continue;
            }

            let Some(spec) = column_type(&column.column_type) else {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidColumnType,
                        format!(
                            "A column in {} has the invalid type of {}",
                            name, column.column_type
                        ),
                    )
                    .with_path(path),
                );
                continue;
            };

            if spec.requires_name() && column.name().is_none() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::MissingColumnName,
                        format!(
                            "A column in {} of type {} is missing the required name property.",
                            name, column.column_type
                        ),
                    )
                    .with_path(path),
                );
                continue;
            }

            let provided = usize::from(column.name().is_some()) + column.arguments.len();
            if provided > spec.total() {
                let subject = match column.name() {
                    Some(column_name) => format!(
                        "The field {} in the table {} has too many arguments.",
                        column_name, name
                    ),
                    None => format!(
                        "A field in the {} table of type {} has too many arguments.",
                        name, column.column_type
                    ),
                };
                let accepted = spec.total().saturating_sub(1);
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::TooManyArguments,
                        format!(
                            "{} {} only accepts {} arguments.",
                            subject, column.column_type, accepted
                        ),
                    )
                    .with_path(path),
                );
            }
        }
    }
}

impl ValidationRule for ColumnsRule {
    fn name(&self) -> &'static str {
        "columns"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for (name, table) in schema.iter() {
            Self::validate_table(name, table, &mut result);
        }
        result
    }
}

/// Indexes need a type and at least one column
pub struct IndexesRule;

impl ValidationRule for IndexesRule {
    fn name(&self) -> &'static str {
        "indexes"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (name, table) in schema.iter() {
            for (i, index) in table.indexes.iter().enumerate() {
                let path = format!("{}.indexes[{}]", name, i);

                if index.index_type.trim().is_empty() {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::MissingIndexType,
                            format!("Table {} has an index without a type.", name),
                        )
                        .with_path(path.clone()),
                    );
                }

                if index.columns.is_empty() {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::MissingIndexColumns,
                            format!("Table {} has an index without any columns.", name),
                        )
                        .with_path(path),
                    );
                }
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
