//! Typed compile errors.
//!
//! Every failure is fatal: the pipeline stops at the first error and no
//! output is produced. Each variant maps onto a stable diagnostic code and
//! one of four categories.

use std::collections::BTreeMap;

use menudef_diagnostics::{Diagnostic, Span, codes};

use crate::explode::ExplodeError;
use crate::grammar::ast::NodeKind;

/// Result alias used throughout the pipeline.
pub type CompileResult<T> = Result<T, CompileError>;

/// Broad class of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed token stream (in practice: input ended too early).
    Lexical,
    /// Unexpected keyword, token or bracket.
    Syntax,
    /// Tree shape, label, duplicate or id-space violation.
    Structural,
    /// Malformed `<glyph>` escape in a display name.
    Encoding,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "lexical"),
            ErrorCategory::Syntax => write!(f, "syntax"),
            ErrorCategory::Structural => write!(f, "structural"),
            ErrorCategory::Encoding => write!(f, "encoding"),
        }
    }
}

/// A fatal error raised by any compiler phase.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    // -- Lexical --
    /// A mandatory token was missing at end of input.
    #[error("unexpected end of input at line {line}, expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for.
        expected: String,
        /// Last line of the input.
        line: usize,
        /// Zero-width span at the end of the input.
        span: Span,
    },

    // -- Syntax --
    /// A token does not fit the grammar at its position.
    #[error("unexpected token '{found}' at line {line}, expected {expected}")]
    UnexpectedToken {
        /// The offending token text.
        found: String,
        /// What the parser was looking for.
        expected: String,
        /// Line of the offending token.
        line: usize,
        /// Span of the offending token.
        span: Span,
    },

    /// The file has no top-level `MenuGroup`.
    #[error("missing root 'MenuGroup' after 'MenuConfig' (input ends at line {line})")]
    MissingRoot {
        /// Last line of the input.
        line: usize,
        /// Zero-width span at the end of the input.
        span: Span,
    },

    /// A second top-level `MenuGroup` was found.
    #[error("second root 'MenuGroup' at line {line}; only one root group is allowed")]
    ExtraRoot {
        /// Line of the second `MenuGroup` keyword.
        line: usize,
        /// Span of the second `MenuGroup` keyword.
        span: Span,
    },

    // -- Structural --
    /// A group has no rows.
    #[error("MenuGroup '{group}' at line {line} must have at least one MenuRow")]
    EmptyGroup {
        /// Name of the group.
        group: String,
        /// Line of the group.
        line: usize,
        /// Span of the group.
        span: Span,
    },

    /// A row declares more than five slots.
    #[error("MenuGroup '{group}', row {row} at line {line} has too many ({count}) nodes, must be <= 5")]
    RowOverflow {
        /// Name of the enclosing group.
        group: String,
        /// 0-based row index.
        row: usize,
        /// Number of declared slots.
        count: usize,
        /// Line of the row.
        line: usize,
        /// Span of the row keyword.
        span: Span,
    },

    /// A row declares no slots.
    #[error("MenuGroup '{group}', row {row} at line {line} has 0 nodes")]
    EmptyRow {
        /// Name of the enclosing group.
        group: String,
        /// 0-based row index.
        row: usize,
        /// Line of the row.
        line: usize,
        /// Span of the row keyword.
        span: Span,
    },

    /// A group declares more rows than a byte can count.
    #[error("MenuGroup '{group}' at line {line} has {count} rows, must be <= 255")]
    TooManyRows {
        /// Name of the group.
        group: String,
        /// Number of rows.
        count: usize,
        /// Line of the group.
        line: usize,
        /// Span of the group.
        span: Span,
    },

    /// A label is reserved or not a valid symbol start.
    #[error("illegal label '{label}' for menu '{name}' at line {line}: {reason}")]
    IllegalLabel {
        /// The offending label.
        label: String,
        /// Display name of the node.
        name: String,
        /// Why the label is rejected.
        reason: String,
        /// Line of the node.
        line: usize,
        /// Span of the node.
        span: Span,
    },

    /// The blank sentinel was used where only a plain item may appear.
    #[error("invalid blank sentinel '*' for {kind} at line {line}; only 'MenuItem * *' may be blank")]
    MisplacedBlank {
        /// Kind of the offending node.
        kind: NodeKind,
        /// Line of the node.
        line: usize,
        /// Span of the node.
        span: Span,
    },

    /// A display name is used twice in a way the policy forbids.
    #[error("duplicate name '{name}' at line {line} ({kind} clashes with {previous})")]
    DuplicateName {
        /// The repeated display name.
        name: String,
        /// Kind of the new node.
        kind: NodeKind,
        /// Kind of the node that first used the name.
        previous: NodeKind,
        /// Line of the second occurrence.
        line: usize,
        /// Span of the second occurrence.
        span: Span,
    },

    /// A label is used twice.
    #[error("duplicate label '{label}' at line {line} (first used at line {first_line})")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
        /// Line of the second occurrence.
        line: usize,
        /// Line of the first occurrence.
        first_line: usize,
        /// Span of the second occurrence.
        span: Span,
    },

    /// Node ids ran past the single-byte ceiling.
    #[error("overflow: menu tree needs more than {max} node ids (at '{label}', line {line})")]
    IdOverflow {
        /// Highest legal node id.
        max: u8,
        /// Label of the node that did not fit.
        label: String,
        /// Line of the node.
        line: usize,
        /// Span of the node.
        span: Span,
    },

    /// Name ids ran past the single-byte ceiling.
    #[error("overflow: name pool needs more than {max} name ids (at '{label}')")]
    NameIdOverflow {
        /// Highest legal name id.
        max: u8,
        /// Label of the node whose name did not fit.
        label: String,
        /// Span of the node.
        span: Span,
    },

    // -- Encoding --
    /// A display name has a malformed glyph escape.
    #[error("invalid syntax in menu name '{name}' at line {line}: {source}")]
    InvalidNameSyntax {
        /// The offending display string.
        name: String,
        /// What is wrong with it.
        #[source]
        source: ExplodeError,
        /// Line of the node.
        line: usize,
        /// Span of the node.
        span: Span,
    },
}

impl CompileError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::UnexpectedEof { .. } => codes::UNEXPECTED_EOF,
            CompileError::UnexpectedToken { .. } => codes::UNEXPECTED_TOKEN,
            CompileError::MissingRoot { .. } => codes::MISSING_ROOT,
            CompileError::ExtraRoot { .. } => codes::EXTRA_ROOT,
            CompileError::EmptyGroup { .. } => codes::EMPTY_GROUP,
            CompileError::RowOverflow { .. } => codes::ROW_OVERFLOW,
            CompileError::EmptyRow { .. } => codes::EMPTY_ROW,
            CompileError::TooManyRows { .. } => codes::TOO_MANY_ROWS,
            CompileError::IllegalLabel { .. } => codes::ILLEGAL_LABEL,
            CompileError::MisplacedBlank { .. } => codes::MISPLACED_BLANK,
            CompileError::DuplicateName { .. } => codes::DUPLICATE_NAME,
            CompileError::DuplicateLabel { .. } => codes::DUPLICATE_LABEL,
            CompileError::IdOverflow { .. } => codes::ID_OVERFLOW,
            CompileError::NameIdOverflow { .. } => codes::NAME_ID_OVERFLOW,
            CompileError::InvalidNameSyntax { .. } => codes::INVALID_NAME_SYNTAX,
        }
    }

    /// Broad class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompileError::UnexpectedEof { .. } => ErrorCategory::Lexical,
            CompileError::UnexpectedToken { .. }
            | CompileError::MissingRoot { .. }
            | CompileError::ExtraRoot { .. } => ErrorCategory::Syntax,
            CompileError::InvalidNameSyntax { .. } => ErrorCategory::Encoding,
            _ => ErrorCategory::Structural,
        }
    }

    /// Source span the error points at, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::UnexpectedEof { span, .. }
            | CompileError::UnexpectedToken { span, .. }
            | CompileError::MissingRoot { span, .. }
            | CompileError::ExtraRoot { span, .. }
            | CompileError::EmptyGroup { span, .. }
            | CompileError::RowOverflow { span, .. }
            | CompileError::EmptyRow { span, .. }
            | CompileError::TooManyRows { span, .. }
            | CompileError::IllegalLabel { span, .. }
            | CompileError::MisplacedBlank { span, .. }
            | CompileError::DuplicateName { span, .. }
            | CompileError::DuplicateLabel { span, .. }
            | CompileError::IdOverflow { span, .. }
            | CompileError::NameIdOverflow { span, .. }
            | CompileError::InvalidNameSyntax { span, .. } => Some(*span),
        }
    }

    /// Convert into a [`Diagnostic`] with machine-readable context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut ctx: BTreeMap<String, String> = BTreeMap::new();
        ctx.insert("category".into(), self.category().to_string());
        match self {
            CompileError::UnexpectedEof { expected, .. } => {
                ctx.insert("expected".into(), expected.clone());
            }
            CompileError::UnexpectedToken {
                found, expected, ..
            } => {
                ctx.insert("found".into(), found.clone());
                ctx.insert("expected".into(), expected.clone());
            }
            CompileError::EmptyGroup { group, .. } | CompileError::TooManyRows { group, .. } => {
                ctx.insert("group".into(), group.clone());
            }
            CompileError::RowOverflow { group, row, .. } | CompileError::EmptyRow { group, row, .. } => {
                ctx.insert("group".into(), group.clone());
                ctx.insert("row".into(), row.to_string());
            }
            CompileError::IllegalLabel { label, name, .. } => {
                ctx.insert("label".into(), label.clone());
                ctx.insert("name".into(), name.clone());
            }
            CompileError::DuplicateName { name, .. } => {
                ctx.insert("name".into(), name.clone());
            }
            CompileError::DuplicateLabel { label, .. }
            | CompileError::IdOverflow { label, .. }
            | CompileError::NameIdOverflow { label, .. } => {
                ctx.insert("label".into(), label.clone());
            }
            CompileError::InvalidNameSyntax { name, .. } => {
                ctx.insert("name".into(), name.clone());
            }
            CompileError::MissingRoot { .. }
            | CompileError::ExtraRoot { .. }
            | CompileError::MisplacedBlank { .. } => {}
        }
        Diagnostic::error(self.code(), self.to_string(), self.span()).with_context(ctx)
    }
}

impl From<CompileError> for Diagnostic {
    fn from(err: CompileError) -> Self {
        err.to_diagnostic()
    }
}
