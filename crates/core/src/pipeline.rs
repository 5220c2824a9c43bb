//! End-to-end compilation: source text in, assembly text out.
//!
//! Phases run strictly in order and the first error aborts the run:
//! parse, validate, assign ids, explode names, lay out the table, emit.

use menudef_diagnostics::Diagnostic;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::emit::{EmitConfig, emit_asm};
use crate::error::CompileResult;
use crate::explode::explode_names;
use crate::grammar::ast::MenuFile;
use crate::grammar::parser::parse_str;
use crate::symbols::{DuplicateNamePolicy, SymbolTable, assign_ids};
use crate::table::{MenuTable, build_table};
use crate::validate::validate;

/// Knobs for [`compile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Source file name quoted in the output header.
    pub source_name: String,
    /// Which display names may repeat.
    pub duplicate_names: DuplicateNamePolicy,
    /// Keep a copy of the tree as parsed, before validation pads it.
    pub snapshot_parsed: bool,
}

impl CompileOptions {
    /// Default options naming `source_name` in the output header.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Default::default()
        }
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The fully annotated tree (padded, numbered, exploded).
    pub file: MenuFile,
    /// The tree as parsed, when [`CompileOptions::snapshot_parsed`] is set.
    pub parsed: Option<MenuFile>,
    /// Id assignment context.
    pub symbols: SymbolTable,
    /// Typed table layout.
    pub table: MenuTable,
    /// Rendered assembly text.
    pub assembly: String,
    /// Non-fatal diagnostics collected along the way.
    pub warnings: Vec<Diagnostic>,
}

/// Compile menu definition source into assembly.
pub fn compile(source: &str, options: &CompileOptions) -> CompileResult<Compilation> {
    info!(source = %options.source_name, "parsing");
    let parsed = parse_str(source)?;
    let mut file = parsed.file;
    let snapshot = options.snapshot_parsed.then(|| file.clone());

    info!("validating");
    validate(&mut file)?;

    info!("assigning node ids");
    let symbols = assign_ids(&mut file, options.duplicate_names)?;

    info!("exploding display names");
    explode_names(&mut file)?;

    info!("emitting assembly");
    let table = build_table(&file)?;
    let assembly = emit_asm(&table, &EmitConfig::new(options.source_name.as_str()));

    Ok(Compilation {
        file,
        parsed: snapshot,
        symbols,
        table,
        assembly,
        warnings: parsed.warnings,
    })
}
