//! Diagnostics for the menu definition compiler.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] used to report errors
//! and warnings from the parser, validator, symbol generator and emitter.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: compilation stops and no output is written.
    Error,
    /// Warning: the input compiles but may not mean what was intended.
    Warn,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// A diagnostic message produced while compiling a menu definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"MDL2002"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the source input that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling (`"label"`, `"name"`, `"line"`, ...).
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }

    /// Whether this diagnostic aborts compilation.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explanation(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_envelope_matches_cli_output() {
        let d = Diagnostic::error(codes::ROW_OVERFLOW, "row has 6 slots", Some(Span::new(40, 46)))
            .with_context(BTreeMap::from([
                ("group".into(), "Root".into()),
                ("category".into(), "structure".into()),
            ]));
        let json: serde_json::Value = serde_json::to_value(&d).unwrap();
        assert_eq!(json["id"], "MDL2002");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["span"]["start"], 40);
        assert_eq!(json["span"]["end"], 46);
        assert_eq!(json["context"]["group"], "Root");
    }

    #[test]
    fn warnings_omit_missing_span_and_context() {
        let d = Diagnostic::warn(codes::DUPLICATE_CONFIG_KEY, "GroupHandler repeated", None);
        assert!(!d.is_error());
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains(r#""severity":"warn""#), "{json}");
        assert!(!json.contains("span") && !json.contains("context"), "{json}");
    }

    #[test]
    fn end_of_input_span_is_zero_width() {
        assert_eq!(Span::empty(7), Span::new(7, 7));
    }

    #[test]
    fn plain_rendering_includes_code() {
        let d = Diagnostic::error(codes::DUPLICATE_LABEL, "duplicate label 'mPlus'", None);
        assert_eq!(d.to_string(), "error[MDL2202]: duplicate label 'mPlus'");
    }

    #[test]
    fn every_code_is_unique_and_explained() {
        let mut seen = std::collections::HashSet::new();
        for code in codes::ALL {
            assert!(seen.insert(*code), "duplicate diagnostic code {code}");
            assert!(explain(code).is_some(), "{code} has no explanation");
        }
        assert!(explain("MDL9999").is_none());
    }
}
