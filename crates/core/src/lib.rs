//! Menu definition compiler core library.
//!
//! Turns a menu definition file (a small bracketed DSL describing a tree of
//! calculator menus) into Z80 assembler tables. The main entry point is
//! [`compile`]; each phase is also public so it can be driven on its own:
//! [`parse_str`], [`validate()`], [`assign_ids`], [`explode_names`],
//! [`build_table`] and [`emit_asm`].

#![warn(missing_docs)]

/// Menu grammar: lexer, parser, AST and JSON dumps.
pub mod grammar;
/// Typed compile errors.
pub mod error;
/// `<glyph>` escape expansion in display names.
pub mod explode;
/// The hybrid traversal order shared by all passes.
pub mod traverse;
/// Structural checks and row padding.
pub mod validate;
/// Node id assignment and duplicate detection.
pub mod symbols;
/// Typed layout of the output tables.
pub mod table;
/// Assembly text rendering.
pub mod emit;
/// Phase orchestration.
pub mod pipeline;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use grammar::lexer::{Lexer, Token, tokenize};
pub use grammar::parser::{ParseOutput, parse_str};

// AST
pub use grammar::ast::{DisplayName, MenuConfig, MenuFile, MenuNode, NodeInfo, NodeKind, Row};

// Errors
pub use error::{CompileError, CompileResult, ErrorCategory};

// Passes
pub use explode::{ExplodeError, explode_names, explode_str};
pub use symbols::{DuplicateNamePolicy, SymbolTable, assign_ids};
pub use validate::validate;

// Emitter
pub use emit::{EmitConfig, emit_asm};
pub use table::{MenuTable, NodeRecord, build_table};

// Pipeline
pub use pipeline::{Compilation, CompileOptions, compile};

// Diagnostics (re-exported from the diagnostics crate)
pub use menudef_diagnostics::{Diagnostic, Severity, Span, codes};

// Serialization helpers
pub use grammar::dump::to_pretty_json;
