//! Node id assignment and duplicate detection.
//!
//! Ids are handed out from a single counter in hybrid traversal order, so
//! each group's direct slots receive one contiguous run of ids. A group can
//! then address its children with just its row count and the id of its first
//! slot ([`MenuNode::row_begin_id`]).
//!
//! The same pass enforces uniqueness of labels and, subject to a
//! [`DuplicateNamePolicy`], of display names. Blank slots take part in
//! numbering but not in duplicate detection; each gets a synthesized
//! `mBlankNNN` label derived from its id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::grammar::ast::{MAX_NODE_ID, MenuFile, MenuNode, NodeKind, ROOT_ID};
use crate::traverse::{VisitMut, walk_mut};

/// Which nodes may share a display name.
///
/// Labels are never allowed to repeat, whatever the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateNamePolicy {
    /// Two leaves of the same kind (`MenuItem`/`MenuItem` or
    /// `MenuItemAlt`/`MenuItemAlt`) may share a name. Anything involving a
    /// group, or mixing leaf kinds, is rejected.
    #[default]
    SameKindLeaves,
    /// Any two leaves may share a name; groups may not.
    AnyLeaves,
    /// Every non-blank name must be unique.
    Strict,
}

impl DuplicateNamePolicy {
    /// Whether a node of kind `new` may reuse a name first taken by `previous`.
    pub fn allows(self, previous: NodeKind, new: NodeKind) -> bool {
        if previous == NodeKind::Group || new == NodeKind::Group {
            return false;
        }
        match self {
            DuplicateNamePolicy::SameKindLeaves => previous == new,
            DuplicateNamePolicy::AnyLeaves => true,
            DuplicateNamePolicy::Strict => false,
        }
    }
}

/// Traversal context of the symbol generator, returned for inspection.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    policy: DuplicateNamePolicy,
    /// Next id to hand out.
    next_id: u16,
    /// Display name -> kind of the first node that used it.
    names: HashMap<String, NodeKind>,
    /// Label -> (id, source line).
    labels: HashMap<String, (u8, usize)>,
}

impl SymbolTable {
    /// Empty table; the first assigned id will be [`ROOT_ID`].
    pub fn new(policy: DuplicateNamePolicy) -> Self {
        Self {
            policy,
            next_id: u16::from(ROOT_ID),
            ..Default::default()
        }
    }

    /// Number of ids assigned, including blanks.
    pub fn node_count(&self) -> usize {
        usize::from(self.next_id - u16::from(ROOT_ID))
    }

    /// Id of the node carrying `label`. Blank labels are not recorded.
    pub fn id_of_label(&self, label: &str) -> Option<u8> {
        self.labels.get(label).map(|(id, _)| *id)
    }

    /// Kind of the first node displaying `name`.
    pub fn kind_of_name(&self, name: &str) -> Option<NodeKind> {
        self.names.get(name).copied()
    }

    fn register(&mut self, node: &MenuNode) -> CompileResult<()> {
        let info = node.info();
        let kind = node.kind();

        if let Some(&previous) = self.names.get(&info.name.text) {
            if !self.policy.allows(previous, kind) {
                return Err(CompileError::DuplicateName {
                    name: info.name.text.clone(),
                    kind,
                    previous,
                    line: info.line,
                    span: info.span,
                });
            }
        } else {
            self.names.insert(info.name.text.clone(), kind);
        }

        if let Some(&(_, first_line)) = self.labels.get(&info.label) {
            return Err(CompileError::DuplicateLabel {
                label: info.label.clone(),
                line: info.line,
                first_line,
                span: info.span,
            });
        }
        Ok(())
    }

    fn next(&mut self, node: &MenuNode) -> CompileResult<u8> {
        match u8::try_from(self.next_id) {
            Ok(id) if id <= MAX_NODE_ID => {
                self.next_id += 1;
                Ok(id)
            }
            _ => Err(CompileError::IdOverflow {
                max: MAX_NODE_ID,
                label: node.label().to_string(),
                line: node.info().line,
                span: node.info().span,
            }),
        }
    }
}

impl VisitMut for SymbolTable {
    type Error = CompileError;

    fn visit_node(&mut self, node: &mut MenuNode, parent_id: u8) -> CompileResult<()> {
        let blank = node.is_blank();
        if !blank {
            self.register(node)?;
        }

        let id = self.next(node)?;
        let info = node.info_mut();
        info.id = id;
        info.parent_id = parent_id;
        if blank {
            info.label = blank_label(id);
        } else {
            self.labels.insert(info.label.clone(), (id, info.line));
        }
        Ok(())
    }
}

/// Synthesized label of the blank slot with the given id.
pub fn blank_label(id: u8) -> String {
    format!("mBlank{id:03}")
}

/// Assign ids and parent ids to every node of a validated tree.
pub fn assign_ids(file: &mut MenuFile, policy: DuplicateNamePolicy) -> CompileResult<SymbolTable> {
    let mut table = SymbolTable::new(policy);
    walk_mut(&mut file.root, &mut table)?;
    debug!(nodes = table.node_count(), "assigned node ids");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_matrix() {
        use DuplicateNamePolicy::*;
        use NodeKind::*;

        assert!(SameKindLeaves.allows(Item, Item));
        assert!(SameKindLeaves.allows(ItemAlt, ItemAlt));
        assert!(!SameKindLeaves.allows(Item, ItemAlt));
        assert!(!SameKindLeaves.allows(Group, Group));
        assert!(!SameKindLeaves.allows(Item, Group));

        assert!(AnyLeaves.allows(Item, ItemAlt));
        assert!(!AnyLeaves.allows(Group, Item));

        assert!(!Strict.allows(Item, Item));
    }

    #[test]
    fn blank_labels_are_zero_padded() {
        assert_eq!(blank_label(4), "mBlank004");
        assert_eq!(blank_label(123), "mBlank123");
    }
}
