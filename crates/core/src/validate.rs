//! Structural validation and row normalization.
//!
//! Runs over the freshly parsed tree in hybrid order. For every node the
//! label is checked; for every group the rows are checked and padded with
//! blank sentinels to exactly [`ROW_SLOTS`] slots. Nothing here assigns ids.

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::grammar::ast::{BLANK, MenuFile, MenuNode, NodeKind, ROW_SLOTS, Row};
use crate::traverse::{VisitMut, walk_mut};

/// Label prefixes reserved for symbols the emitter generates itself.
pub const RESERVED_LABEL_PREFIXES: &[&str] = &["mBlank", "mNull", "mMenuTable", "mMenuNameTable"];

/// Most rows a single group may declare; the row count is one byte.
pub const MAX_ROWS: usize = u8::MAX as usize;

/// Validate `file` and pad every partial row with blank items.
///
/// Fails on the first violated rule.
pub fn validate(file: &mut MenuFile) -> CompileResult<()> {
    let mut validator = Validator { padded: 0 };
    walk_mut(&mut file.root, &mut validator)?;
    debug!(padded = validator.padded, "validated menu tree");
    Ok(())
}

struct Validator {
    /// Number of blank slots synthesized so far.
    padded: usize,
}

impl VisitMut for Validator {
    type Error = CompileError;

    fn visit_node(&mut self, node: &mut MenuNode, _parent_id: u8) -> CompileResult<()> {
        validate_label(node)?;
        if let MenuNode::Group { info, rows } = node {
            if rows.is_empty() {
                return Err(CompileError::EmptyGroup {
                    group: info.name.text.clone(),
                    line: info.line,
                    span: info.span,
                });
            }
            if rows.len() > MAX_ROWS {
                return Err(CompileError::TooManyRows {
                    group: info.name.text.clone(),
                    count: rows.len(),
                    line: info.line,
                    span: info.span,
                });
            }
            for (index, row) in rows.iter_mut().enumerate() {
                self.padded += normalize_row(&info.name.text, index, row)?;
            }
        }
        Ok(())
    }
}

/// Check the slot count of `row` and append blanks up to [`ROW_SLOTS`].
/// Returns the number of blanks added.
fn normalize_row(group: &str, index: usize, row: &mut Row) -> CompileResult<usize> {
    let count = row.slots.len();
    if count > ROW_SLOTS {
        return Err(CompileError::RowOverflow {
            group: group.to_string(),
            row: index,
            count,
            line: row.line,
            span: row.span,
        });
    }
    if count == 0 {
        return Err(CompileError::EmptyRow {
            group: group.to_string(),
            row: index,
            line: row.line,
            span: row.span,
        });
    }
    let missing = ROW_SLOTS - count;
    for _ in 0..missing {
        row.slots.push(MenuNode::blank(row.line, row.span));
    }
    Ok(missing)
}

/// Reject reserved or malformed labels, and blanks anywhere but `MenuItem * *`.
fn validate_label(node: &MenuNode) -> CompileResult<()> {
    let info = node.info();
    let label = info.label.as_str();
    let illegal = |reason: String| CompileError::IllegalLabel {
        label: label.to_string(),
        name: info.name.text.clone(),
        reason,
        line: info.line,
        span: info.span,
    };

    if let Some(prefix) = RESERVED_LABEL_PREFIXES
        .iter()
        .find(|prefix| label.starts_with(**prefix))
    {
        return Err(illegal(format!("prefix '{prefix}' is reserved")));
    }

    if node.is_blank() {
        if node.kind() != NodeKind::Item {
            return Err(CompileError::MisplacedBlank {
                kind: node.kind(),
                line: info.line,
                span: info.span,
            });
        }
        if label != BLANK {
            return Err(illegal("a blank menu must use the label '*'".into()));
        }
        return Ok(());
    }

    if label == BLANK {
        return Err(illegal("'*' is only valid for a blank menu".into()));
    }
    if !label.chars().next().is_some_and(char::is_alphabetic) {
        return Err(illegal("a label must begin with a letter".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::NodeInfo;
    use menudef_diagnostics::Span;

    fn item(name: &str, label: &str) -> MenuNode {
        MenuNode::Item {
            info: NodeInfo::new(name, label, 1, Span::default()),
        }
    }

    #[test]
    fn reserved_prefixes_are_rejected() {
        for label in ["mBlank001", "mNullThing", "mMenuTable", "mMenuNameTable2"] {
            let err = validate_label(&item("X", label)).unwrap_err();
            assert!(
                matches!(err, CompileError::IllegalLabel { .. }),
                "{label} should be illegal"
            );
        }
    }

    #[test]
    fn labels_must_start_with_a_letter() {
        assert!(validate_label(&item("X", "1abc")).is_err());
        assert!(validate_label(&item("X", "_abc")).is_err());
        assert!(validate_label(&item("X", "mAbc")).is_ok());
    }

    #[test]
    fn star_label_needs_star_name() {
        assert!(validate_label(&item("X", "*")).is_err());
        assert!(validate_label(&item("*", "mX")).is_err());
        assert!(validate_label(&item("*", "*")).is_ok());
    }

    #[test]
    fn blank_name_only_for_plain_items() {
        let group = MenuNode::Group {
            info: NodeInfo::new("*", "*", 3, Span::default()),
            rows: Vec::new(),
        };
        let err = validate_label(&group).unwrap_err();
        assert!(matches!(
            err,
            CompileError::MisplacedBlank {
                kind: NodeKind::Group,
                line: 3,
                ..
            }
        ));
    }

    #[test]
    fn normalize_pads_after_declared_slots() {
        let mut row = Row {
            slots: vec![item("A", "mA"), item("B", "mB")],
            line: 2,
            span: Span::new(4, 11),
        };
        assert_eq!(normalize_row("Root", 0, &mut row).unwrap(), 3);
        assert_eq!(row.slots.len(), ROW_SLOTS);
        assert_eq!(row.slots[0].name(), "A");
        assert_eq!(row.slots[1].name(), "B");
        for blank in &row.slots[2..] {
            assert!(blank.is_blank());
            assert_eq!(blank.label(), "*");
            assert_eq!(blank.info().line, 2);
        }
    }

    #[test]
    fn full_row_is_untouched() {
        let mut row = Row {
            slots: (0..5).map(|i| item(&format!("N{i}"), &format!("mN{i}"))).collect(),
            line: 1,
            span: Span::default(),
        };
        assert_eq!(normalize_row("Root", 0, &mut row).unwrap(), 0);
        assert!(row.slots.iter().all(|s| !s.is_blank()));
    }
}
