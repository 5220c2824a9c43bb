//! Typed layout of the generated menu table.
//!
//! [`build_table`] walks an annotated tree in hybrid order and produces the
//! records and name pool entries that [`crate::emit`] renders to text.
//! Keeping the layout typed lets callers inspect ids and references without
//! parsing assembly.

use serde::Serialize;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::grammar::ast::{DisplayName, MenuConfig, MenuFile, MenuNode, Row};
use crate::traverse::{Visit, walk};

/// Highest name id; the name id field is one byte and 0 is the null name.
pub const MAX_NAME_ID: u8 = 254;

/// Label of the reserved null node.
pub const NULL_LABEL: &str = "mNull";

/// The complete table: node entries in traversal order plus the name pool.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MenuTable {
    /// Node records interleaved with group/row markers, root first. The
    /// reserved null record is implicit and always precedes these.
    pub entries: Vec<Entry>,
    /// Name pool entries in name id order, starting at id 1.
    pub names: Vec<NameEntry>,
}

impl MenuTable {
    /// Node records only, in emission (and id) order.
    pub fn records(&self) -> impl Iterator<Item = &NodeRecord> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Node(record) => Some(record),
            _ => None,
        })
    }

    /// Record of the node with the given label.
    pub fn record(&self, label: &str) -> Option<&NodeRecord> {
        self.records().find(|r| r.label == label)
    }

    /// Name pool entry with the given symbol (e.g. `mPlusName`).
    pub fn name(&self, symbol: &str) -> Option<&NameEntry> {
        self.names.iter().find(|n| n.symbol() == symbol)
    }
}

/// One line group of the node table.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind")]
pub enum Entry {
    /// Marks the start of a group's direct children.
    GroupChildren {
        /// Display name of the group.
        group: String,
    },
    /// Marks the start of one row of a group's children.
    GroupRow {
        /// Display name of the group.
        group: String,
        /// 0-based row index.
        row: usize,
    },
    /// A node record.
    Node(NodeRecord),
}

/// The fixed-shape record of one menu node.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeRecord {
    /// Node label; the record defines `<label>:` and `<label>Id`.
    pub label: String,
    /// Node id.
    pub id: u8,
    /// Label of the parent ([`NULL_LABEL`] for the root).
    pub parent_label: String,
    /// Parent id.
    pub parent_id: u8,
    /// Name id symbol.
    pub name_id: String,
    /// Number of rows; 0 for leaves.
    pub num_rows: u8,
    /// Fifth byte: first child for groups, alternate name for alt items.
    pub row_begin: RowBegin,
    /// Handler routine.
    pub handler: Handler,
    /// Name selector routine of alt items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_selector: Option<String>,
}

/// Content of the shared `rowBeginId` / `altNameId` byte.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum RowBegin {
    /// Leaves without an alternate name.
    None,
    /// First slot of the group's first row.
    FirstSlot {
        /// Label of that slot.
        label: String,
        /// Id of that slot.
        id: u8,
    },
    /// Alternate name id of a `MenuItemAlt`.
    AltName {
        /// `<label>AltNameId` symbol.
        symbol: String,
    },
}

/// Handler routine referenced by a record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Handler {
    /// Routine symbol.
    pub symbol: String,
    /// `true` when the routine comes from `MenuConfig` (or its default)
    /// rather than being named after the node's label.
    pub predefined: bool,
}

/// Which display string of a node a [`NameEntry`] holds.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum NameSlot {
    /// The node's name.
    Primary,
    /// The alternate name of a `MenuItemAlt`.
    Alt,
}

/// Contents of a pool string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum NameText {
    /// Emitted as a quoted string.
    Literal(String),
    /// Emitted as a list of character and glyph tokens.
    Glyphs(Vec<String>),
}

impl From<&DisplayName> for NameText {
    fn from(name: &DisplayName) -> Self {
        match &name.exploded {
            Some(tokens) => NameText::Glyphs(tokens.clone()),
            None => NameText::Literal(name.text.clone()),
        }
    }
}

/// One entry of the name pointer table and string pool.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NameEntry {
    /// Label of the owning node.
    pub label: String,
    /// Name or alternate name.
    pub slot: NameSlot,
    /// Name id (index into the pointer table).
    pub id: u8,
    /// String contents.
    pub text: NameText,
}

impl NameEntry {
    /// Symbol of the string in the pool (`<label>Name` or `<label>AltName`).
    pub fn symbol(&self) -> String {
        match self.slot {
            NameSlot::Primary => format!("{}Name", self.label),
            NameSlot::Alt => format!("{}AltName", self.label),
        }
    }

    /// Symbol of the name id (`<label>NameId` or `<label>AltNameId`).
    pub fn id_symbol(&self) -> String {
        format!("{}Id", self.symbol())
    }
}

/// Lay out the table for a validated, numbered and exploded tree.
pub fn build_table(file: &MenuFile) -> CompileResult<MenuTable> {
    let mut names = NamePool::default();
    walk(&file.root, &mut names)?;

    let mut layout = Layout {
        config: &file.config,
        entries: Vec::new(),
    };
    walk(&file.root, &mut layout)?;

    debug!(
        records = layout.entries.len(),
        names = names.entries.len(),
        "laid out menu table"
    );
    Ok(MenuTable {
        entries: layout.entries,
        names: names.entries,
    })
}

// ── Name pool ───────────────────────────────────────────────────────────

#[derive(Default)]
struct NamePool {
    entries: Vec<NameEntry>,
}

impl NamePool {
    fn push(&mut self, node: &MenuNode, slot: NameSlot, name: &DisplayName) -> CompileResult<()> {
        let next = self.entries.len() + 1;
        let id = match u8::try_from(next) {
            Ok(id) if id <= MAX_NAME_ID => id,
            _ => {
                return Err(CompileError::NameIdOverflow {
                    max: MAX_NAME_ID,
                    label: node.label().to_string(),
                    span: node.info().span,
                });
            }
        };
        self.entries.push(NameEntry {
            label: node.label().to_string(),
            slot,
            id,
            text: NameText::from(name),
        });
        Ok(())
    }
}

impl<'a> Visit<'a> for NamePool {
    type Error = CompileError;

    fn visit_node(&mut self, node: &'a MenuNode, _parent: Option<&'a MenuNode>) -> CompileResult<()> {
        if node.is_blank() {
            return Ok(());
        }
        self.push(node, NameSlot::Primary, &node.info().name)?;
        if let Some(altname) = node.altname() {
            self.push(node, NameSlot::Alt, altname)?;
        }
        Ok(())
    }
}

// ── Node records ────────────────────────────────────────────────────────

struct Layout<'c> {
    config: &'c MenuConfig,
    entries: Vec<Entry>,
}

impl Layout<'_> {
    fn record(&self, node: &MenuNode, parent: Option<&MenuNode>) -> NodeRecord {
        let label = node.label().to_string();
        let (parent_label, parent_id) = match parent {
            Some(p) => (p.label().to_string(), p.id()),
            None => (NULL_LABEL.to_string(), node.parent_id()),
        };
        let own = |suffix: &str| format!("{label}{suffix}");

        let (name_id, num_rows, row_begin, handler, name_selector) = match node {
            MenuNode::Item { .. } if node.is_blank() => (
                self.config.blank_name_id().to_string(),
                0,
                RowBegin::None,
                Handler {
                    symbol: self.config.blank_handler().to_string(),
                    predefined: true,
                },
                None,
            ),
            MenuNode::Item { .. } => (
                own("NameId"),
                0,
                RowBegin::None,
                Handler {
                    symbol: own("Handler"),
                    predefined: false,
                },
                None,
            ),
            MenuNode::ItemAlt { .. } => (
                own("NameId"),
                0,
                RowBegin::AltName {
                    symbol: own("AltNameId"),
                },
                Handler {
                    symbol: own("Handler"),
                    predefined: false,
                },
                Some(own("NameSelector")),
            ),
            MenuNode::Group { rows, .. } => (
                own("NameId"),
                // Row counts above 255 are rejected by the validator.
                u8::try_from(rows.len()).unwrap_or(u8::MAX),
                first_slot(rows),
                Handler {
                    symbol: self.config.group_handler().to_string(),
                    predefined: true,
                },
                None,
            ),
        };

        NodeRecord {
            id: node.id(),
            parent_label,
            parent_id,
            name_id,
            num_rows,
            row_begin,
            handler,
            name_selector,
            label,
        }
    }
}

fn first_slot(rows: &[Row]) -> RowBegin {
    match rows.first().and_then(|row| row.slots.first()) {
        Some(slot) => RowBegin::FirstSlot {
            label: slot.label().to_string(),
            id: slot.id(),
        },
        None => RowBegin::None,
    }
}

impl<'a> Visit<'a> for Layout<'_> {
    type Error = CompileError;

    fn visit_node(&mut self, node: &'a MenuNode, parent: Option<&'a MenuNode>) -> CompileResult<()> {
        let record = self.record(node, parent);
        self.entries.push(Entry::Node(record));
        Ok(())
    }

    fn enter_group(&mut self, group: &'a MenuNode) -> CompileResult<()> {
        self.entries.push(Entry::GroupChildren {
            group: group.name().to_string(),
        });
        Ok(())
    }

    fn enter_row(&mut self, group: &'a MenuNode, _row: &'a Row, index: usize) -> CompileResult<()> {
        self.entries.push(Entry::GroupRow {
            group: group.name().to_string(),
            row: index,
        });
        Ok(())
    }
}
