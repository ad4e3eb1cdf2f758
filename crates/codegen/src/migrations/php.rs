//! PHP migration rendering

use scaffold_ir::{Column, IndexDef, Relationship, TableDef};
use std::path::PathBuf;

use crate::context::GenerationContext;
use crate::GeneratedFile;

/// Directory of migration files relative to the project root
pub const MIGRATIONS_DIR: &str = "database/migrations";

/// Indentation of statements inside the `Schema::create` closure
const BODY_INDENT: &str = "            ";

// ============================================================================
// Public API
// ============================================================================

/// Generate one migration file per table, in declaration order.
pub fn generate_migrations(ctx: &GenerationContext) -> Vec<GeneratedFile> {
    ctx.tables()
        .enumerate()
        .map(|(position, (name, table))| {
            let path = PathBuf::from(MIGRATIONS_DIR).join(ctx.migration_file_name(position, name));
            let foreign_keys: Vec<&Relationship> = ctx.foreign_keys_for(name).collect();
            GeneratedFile::migration(path, render_migration(name, table, &foreign_keys))
        })
        .collect()
}

// ============================================================================
// Migration class
// ============================================================================

/// Render the full migration class for a table.
pub fn render_migration(name: &str, table: &TableDef, foreign_keys: &[&Relationship]) -> String {
    let mut content = String::with_capacity(1024);

    content.push_str("<?php\n\n");
    content.push_str("use Illuminate\\Database\\Migrations\\Migration;\n");
    content.push_str("use Illuminate\\Database\\Schema\\Blueprint;\n");
    content.push_str("use Illuminate\\Support\\Facades\\Schema;\n\n");

    content.push_str(&format!(
        "class {} extends Migration\n{{\n",
        GenerationContext::migration_class(name)
    ));

    // up()
    content.push_str("    /**\n     * Run the migrations.\n     *\n     * @return void\n     */\n");
    content.push_str("    public function up()\n    {\n");
    content.push_str(&format!(
        "        Schema::create('{}', function (Blueprint $table) {{\n",
        name
    ));

    for column in &table.columns {
        content.push_str(BODY_INDENT);
        content.push_str(&render_column(column));
        content.push('\n');
    }

    for index in &table.indexes {
        content.push_str(BODY_INDENT);
        content.push_str(&render_index(index));
        content.push('\n');
    }

    for relationship in foreign_keys {
        if let Some(line) = render_foreign_key(relationship) {
            content.push_str(BODY_INDENT);
            content.push_str(&line);
            content.push('\n');
        }
    }

    content.push_str("        });\n");
    content.push_str("    }\n\n");

    // down()
    content.push_str("    /**\n     * Reverse the migrations.\n     *\n     * @return void\n     */\n");
    content.push_str("    public function down()\n    {\n");
    content.push_str(&format!("        Schema::dropIfExists('{}');\n", name));
    content.push_str("    }\n");

    content.push_str("}\n");
    content
}

// ============================================================================
// Statements
// ============================================================================

/// `$table->string('phone', 30)->nullable();`
pub fn render_column(column: &Column) -> String {
    let mut args: Vec<String> = Vec::with_capacity(column.arguments.len() + 1);
    if let Some(name) = column.name() {
        args.push(format!("'{}'", name));
    }
    args.extend(column.arguments.iter().map(|a| a.render()));

    let mut line = format!("$table->{}({})", column.column_type, args.join(", "));
    for (modifier, argument) in &column.modifiers {
        line.push_str(&format!("->{}({})", modifier, argument.render()));
    }
    line.push(';');
    line
}

/// `$table->unique('phone');` or `$table->index(['a', 'b']);`
pub fn render_index(index: &IndexDef) -> String {
    format!("$table->{}({});", index.index_type, index.columns.render())
}

/// `$table->foreign('user_id')->references('id')->on('users');`
///
/// Returns `None` for relationships that hold no foreign column.
pub fn render_foreign_key(relationship: &Relationship) -> Option<String> {
    let column = relationship.foreign_column.as_deref()?;
    Some(format!(
        "$table->foreign('{}')->references('{}')->on('{}');",
        column, relationship.referenced_key, relationship.on
    ))
}

// ============================================================================
// Tests
// ============================================================================
