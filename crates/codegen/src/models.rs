//! # Model Generator (Eloquent)
//!
//! Generates an Eloquent model for every table that is not a pivot table.
//!
//! ## Generated Files
//!
//! For each table (e.g. `users` with singular `user`), this generator
//! produces `app/User.php` (or the directory matching the configured
//! namespace) containing:
//!
//! - `use SoftDeletes;` when the table has a `softDeletes` column
//! - `protected $table`
//! - `protected $fillable` listing every named column in order
//! - one accessor method per relationship recorded on the table
//!
//! ## Accessor Naming
//!
//! `belongsTo` and `hasOne` accessors are named after the singular label of
//! the related table; `hasMany` and `belongsToMany` accessors after the
//! related table itself.

use scaffold_core::ScaffoldResult;
use scaffold_ir::{Relationship, TableDef};
use std::collections::HashSet;

use crate::context::GenerationContext;
use crate::GeneratedFile;

// ============================================================================
// Public API
// ============================================================================

/// Generate one model file per non-pivot table.
pub fn generate_models(ctx: &GenerationContext) -> ScaffoldResult<Vec<GeneratedFile>> {
    let dir = ctx.model_dir();

    ctx.model_tables()
        .map(|(name, table)| {
            let class = GenerationContext::class_name(&table.singular);
            let path = dir.join(format!("{}.php", class));
            let content = render_model(ctx, name, table)?;
            Ok(GeneratedFile::model(path, content))
        })
        .collect()
}

// ============================================================================
// Model class
// ============================================================================

/// Render the model class for a table.
pub fn render_model(ctx: &GenerationContext, name: &str, table: &TableDef) -> ScaffoldResult<String> {
    let class = GenerationContext::class_name(&table.singular);
    let soft_deletes = GenerationContext::uses_soft_deletes(table);

    let mut content = String::with_capacity(2048);

    content.push_str("<?php\n\n");
    content.push_str(&format!("namespace {};\n\n", ctx.model_namespace()));
    content.push_str("use Illuminate\\Database\\Eloquent\\Model;\n");
    if soft_deletes {
        content.push_str("use Illuminate\\Database\\Eloquent\\SoftDeletes;\n");
    }
    content.push('\n');

    content.push_str(&format!("class {} extends Model\n{{\n", class));

    if soft_deletes {
        content.push_str("    use SoftDeletes;\n\n");
    }

    content.push_str("    /**\n     * The table associated with the model.\n     *\n     * @var string\n     */\n");
    content.push_str(&format!("    protected $table = '{}';\n\n", name));

    let fillable: Vec<String> = GenerationContext::fillable(table)
        .into_iter()
        .map(|column| format!("'{}'", column))
        .collect();
    content.push_str("    /**\n     * The attributes that are mass assignable.\n     *\n     * @var array\n     */\n");
    content.push_str(&format!("    protected $fillable = [{}];\n", fillable.join(", ")));

    let mut seen: HashSet<String> = HashSet::new();
    for relationship in ctx.relationships_for(name) {
        let accessor = render_accessor(ctx, relationship)?;
        if !seen.insert(accessor.method.clone()) {
            tracing::warn!(
                "Model {} already has a '{}' accessor; skipping duplicate {} to {}",
                class,
                accessor.method,
                relationship.kind,
                relationship.on
            );
            continue;
        }
        content.push('\n');
        content.push_str(&accessor.body);
    }

    content.push_str("}\n");
    Ok(content)
}

// ============================================================================
// Accessors
// ============================================================================

/// A rendered relationship accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// PHP method name
    pub method: String,

    /// Full method source, indented for the class body
    pub body: String,
}

/// Render the accessor method for one relationship.
pub fn render_accessor(ctx: &GenerationContext, relationship: &Relationship) -> ScaffoldResult<Accessor> {
    let singular_foreign = ctx.singular(&relationship.on)?;

    let method = if relationship.kind.is_collection() {
        GenerationContext::method_name(&relationship.on)
    } else {
        GenerationContext::method_name(singular_foreign)
    };

    let body = format!(
        "    public function {}()\n    {{\n        return $this->{}({}::class);\n    }}\n",
        method,
        relationship.kind.method_name(),
        ctx.qualified_class(singular_foreign)
    );

    Ok(Accessor { method, body })
}

// ============================================================================
// Tests
// ============================================================================
