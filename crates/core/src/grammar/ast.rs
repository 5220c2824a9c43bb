use serde::{Deserialize, Serialize};
use menudef_diagnostics::Span;

/// Number of slots in every [`Row`] once validation has padded it.
pub const ROW_SLOTS: usize = 5;

/// The display name and label of the blank sentinel.
pub const BLANK: &str = "*";

/// Reserved id of the null node: parent of the root, never assigned to a real node.
pub const NULL_ID: u8 = 0;

/// Id always given to the root group.
pub const ROOT_ID: u8 = 1;

/// Highest id a node may receive. The id field is a single byte and the
/// counter must stay below 256 after the last assignment.
pub const MAX_NODE_ID: u8 = 254;

/// A parsed menu definition file: one config block and one root group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuFile {
    /// Defaults collected from the `MenuConfig` block.
    pub config: MenuConfig,
    /// The top-level `MenuGroup`.
    pub root: MenuNode,
}

/// Optional defaults declared in the `MenuConfig` block.
///
/// The emitter uses these for fields of blank items and groups, which have
/// no handler or name of their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuConfig {
    /// `ItemName`: parsed and kept so existing definition files still load;
    /// nothing in the emitted tables reads it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    /// `ItemNameId`: default name id symbol for blank items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name_id: Option<String>,
    /// `ItemHandler`: default handler symbol for blank items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_handler: Option<String>,
    /// `GroupHandler`: handler symbol shared by every group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_handler: Option<String>,
}

impl MenuConfig {
    /// Name id symbol for blank items, falling back to the null name.
    pub fn blank_name_id(&self) -> &str {
        self.item_name_id.as_deref().unwrap_or("mNullNameId")
    }

    /// Handler symbol for blank items, falling back to the null handler.
    pub fn blank_handler(&self) -> &str {
        self.item_handler.as_deref().unwrap_or("mNullHandler")
    }

    /// Handler symbol for groups.
    pub fn group_handler(&self) -> &str {
        self.group_handler.as_deref().unwrap_or("mGroupHandler")
    }
}

/// A display string as written in the source, plus its exploded form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayName {
    /// The raw token text.
    pub text: String,
    /// Glyph and character tokens, set by the exploder when `text` contains
    /// `<` or `>`. `None` means the text is emitted verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploded: Option<Vec<String>>,
}

impl DisplayName {
    /// Wrap raw source text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exploded: None,
        }
    }

    /// Whether the text uses `<glyph>` escapes and must be exploded.
    pub fn contains_special(&self) -> bool {
        self.text.contains(['<', '>'])
    }
}

/// Fields shared by every kind of menu node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    /// Display name shown on the menu button.
    pub name: DisplayName,
    /// Assembler label prefix; unique across the tree.
    pub label: String,
    /// Node id, 0 until the symbol generator runs.
    pub id: u8,
    /// Id of the enclosing group, 0 for the root.
    pub parent_id: u8,
    /// 1-based source line of the node's keyword.
    pub line: usize,
    /// Source span of the node's keyword, or of its row for synthesized blanks.
    pub span: Span,
}

impl NodeInfo {
    /// Fresh, unannotated node info.
    pub fn new(name: impl Into<String>, label: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            name: DisplayName::new(name),
            label: label.into(),
            id: NULL_ID,
            parent_id: NULL_ID,
            line,
            span,
        }
    }
}

/// A node of the menu tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum MenuNode {
    /// `MenuItem <name> <label>`: a leaf button.
    Item {
        /// Common fields.
        info: NodeInfo,
    },
    /// `MenuItemAlt <name> <altname> <label>`: a leaf with an alternate
    /// display name picked at runtime by a name selector.
    ItemAlt {
        /// Common fields.
        info: NodeInfo,
        /// Alternate display name.
        altname: DisplayName,
    },
    /// `MenuGroup <name> <label> [ MenuRow+ ]`: an interior node.
    Group {
        /// Common fields.
        info: NodeInfo,
        /// Rows of exactly [`ROW_SLOTS`] slots after validation.
        rows: Vec<Row>,
    },
}

/// Discriminant of a [`MenuNode`], used where only the kind matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// [`MenuNode::Item`]
    Item,
    /// [`MenuNode::ItemAlt`]
    ItemAlt,
    /// [`MenuNode::Group`]
    Group,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Item => write!(f, "MenuItem"),
            NodeKind::ItemAlt => write!(f, "MenuItemAlt"),
            NodeKind::Group => write!(f, "MenuGroup"),
        }
    }
}

impl MenuNode {
    /// The blank sentinel used to pad partial rows.
    pub fn blank(line: usize, span: Span) -> Self {
        MenuNode::Item {
            info: NodeInfo::new(BLANK, BLANK, line, span),
        }
    }

    /// Common fields of this node.
    pub fn info(&self) -> &NodeInfo {
        match self {
            MenuNode::Item { info } | MenuNode::ItemAlt { info, .. } | MenuNode::Group { info, .. } => {
                info
            }
        }
    }

    /// Mutable access to the common fields.
    pub fn info_mut(&mut self) -> &mut NodeInfo {
        match self {
            MenuNode::Item { info } | MenuNode::ItemAlt { info, .. } | MenuNode::Group { info, .. } => {
                info
            }
        }
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            MenuNode::Item { .. } => NodeKind::Item,
            MenuNode::ItemAlt { .. } => NodeKind::ItemAlt,
            MenuNode::Group { .. } => NodeKind::Group,
        }
    }

    /// Display name text.
    pub fn name(&self) -> &str {
        &self.info().name.text
    }

    /// Label.
    pub fn label(&self) -> &str {
        &self.info().label
    }

    /// Assigned id (0 before symbol generation).
    pub fn id(&self) -> u8 {
        self.info().id
    }

    /// Assigned parent id.
    pub fn parent_id(&self) -> u8 {
        self.info().parent_id
    }

    /// Whether this is a blank sentinel slot (`name == "*"`).
    pub fn is_blank(&self) -> bool {
        self.name() == BLANK
    }

    /// Whether this node is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, MenuNode::Group { .. })
    }

    /// Rows of a group; empty for leaves.
    pub fn rows(&self) -> &[Row] {
        match self {
            MenuNode::Group { rows, .. } => rows,
            _ => &[],
        }
    }

    /// Alternate display name of an `ItemAlt`.
    pub fn altname(&self) -> Option<&DisplayName> {
        match self {
            MenuNode::ItemAlt { altname, .. } => Some(altname),
            _ => None,
        }
    }

    /// Id of the first slot of the first row; 0 for leaves.
    ///
    /// Slot `k` of row `r` has id `row_begin_id + 5 * r + k`.
    pub fn row_begin_id(&self) -> u8 {
        self.rows()
            .first()
            .and_then(|row| row.slots.first())
            .map_or(NULL_ID, MenuNode::id)
    }
}

/// One row of a group: up to five declared slots, padded to exactly five.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    /// Slots in declaration order.
    pub slots: Vec<MenuNode>,
    /// 1-based source line of the `MenuRow` keyword.
    pub line: usize,
    /// Source span of the `MenuRow` keyword.
    pub span: Span,
}
