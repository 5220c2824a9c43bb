//! Diagnostic ID constants.
//!
//! Codes are grouped by compiler phase: `MDL1xxx` for tokenizing and
//! parsing, `MDL2xxx` for tree structure and symbols, `MDL3xxx` for display
//! name encoding. Use these instead of string literals so a typo is a compile
//! error.

// ── Lexical / syntax ────────────────────────────────────────────────────

/// Input ended while a token was still required.
pub const UNEXPECTED_EOF: &str = "MDL1001";
/// A token does not match the keyword or bracket the grammar expects.
pub const UNEXPECTED_TOKEN: &str = "MDL1101";
/// The file has no top-level `MenuGroup`.
pub const MISSING_ROOT: &str = "MDL1102";
/// The file has more than one top-level `MenuGroup`.
pub const EXTRA_ROOT: &str = "MDL1103";
/// A `MenuConfig` key appears more than once.
pub const DUPLICATE_CONFIG_KEY: &str = "MDL1201";

// ── Structure ───────────────────────────────────────────────────────────

/// A `MenuGroup` declares no `MenuRow`.
pub const EMPTY_GROUP: &str = "MDL2001";
/// A `MenuRow` declares more than five slots.
pub const ROW_OVERFLOW: &str = "MDL2002";
/// A `MenuRow` declares no slots.
pub const EMPTY_ROW: &str = "MDL2003";
/// A `MenuGroup` declares more rows than a single byte can count.
pub const TOO_MANY_ROWS: &str = "MDL2004";
/// A label uses a reserved prefix or does not start with a letter.
pub const ILLEGAL_LABEL: &str = "MDL2101";
/// The blank sentinel `*` is used outside of a plain `MenuItem * *`.
pub const MISPLACED_BLANK: &str = "MDL2102";
/// Two nodes share a display name in a way the duplicate policy forbids.
pub const DUPLICATE_NAME: &str = "MDL2201";
/// Two nodes share a label.
pub const DUPLICATE_LABEL: &str = "MDL2202";
/// The menu tree has more nodes than the single-byte id field can address.
pub const ID_OVERFLOW: &str = "MDL2301";
/// The name pool has more entries than the single-byte name id can address.
pub const NAME_ID_OVERFLOW: &str = "MDL2302";

// ── Encoding ────────────────────────────────────────────────────────────

/// A display name has a malformed `<glyph>` escape or an unsupported character.
pub const INVALID_NAME_SYNTAX: &str = "MDL3001";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    UNEXPECTED_EOF,
    UNEXPECTED_TOKEN,
    MISSING_ROOT,
    EXTRA_ROOT,
    DUPLICATE_CONFIG_KEY,
    EMPTY_GROUP,
    ROW_OVERFLOW,
    EMPTY_ROW,
    TOO_MANY_ROWS,
    ILLEGAL_LABEL,
    MISPLACED_BLANK,
    DUPLICATE_NAME,
    DUPLICATE_LABEL,
    ID_OVERFLOW,
    NAME_ID_OVERFLOW,
    INVALID_NAME_SYNTAX,
];

/// Long-form explanation for each code, looked up by [`crate::explain`].
pub(crate) fn explanation(id: &str) -> Option<&'static str> {
    match id {
        UNEXPECTED_EOF => Some(
            "The file ended in the middle of a construct. Every MenuGroup, MenuRow and MenuConfig block must be closed with ']', and every MenuItem needs both a name and a label.",
        ),
        UNEXPECTED_TOKEN => Some(
            "The parser found a token that cannot appear at this position. Check for a misspelled keyword (MenuGroup, MenuRow, MenuItem, MenuItemAlt) or a missing bracket.",
        ),
        MISSING_ROOT => Some(
            "A menu definition file must contain exactly one top-level MenuGroup after the MenuConfig block; it becomes the root menu.",
        ),
        EXTRA_ROOT => Some(
            "Only one top-level MenuGroup is allowed. Nest additional groups inside a MenuRow of the root group.",
        ),
        DUPLICATE_CONFIG_KEY => Some(
            "A MenuConfig key was given more than once. The last value is used.",
        ),
        EMPTY_GROUP => Some("Every MenuGroup must contain at least one MenuRow."),
        ROW_OVERFLOW => Some(
            "A MenuRow maps onto the five menu buttons and may declare at most five slots. Split the entries into another MenuRow.",
        ),
        EMPTY_ROW => Some(
            "A MenuRow must declare at least one slot. Use 'MenuItem * *' to reserve an empty button explicitly.",
        ),
        TOO_MANY_ROWS => Some(
            "A MenuGroup stores its row count in a single byte and may declare at most 255 rows.",
        ),
        ILLEGAL_LABEL => Some(
            "Labels become assembler symbols. They must start with a letter and must not start with a reserved prefix (mBlank, mNull, mMenuTable, mMenuNameTable).",
        ),
        MISPLACED_BLANK => Some(
            "The blank sentinel '*' may only be used as 'MenuItem * *'. Groups and alternate-name items need a real name and label.",
        ),
        DUPLICATE_NAME => Some(
            "Two menu nodes share a display name. Depending on the duplicate-name policy, leaf items may share names, but a MenuGroup name must always be unique.",
        ),
        DUPLICATE_LABEL => Some(
            "Two menu nodes share a label. Labels become assembler symbols and must be unique across the whole tree.",
        ),
        ID_OVERFLOW => Some(
            "Node ids are stored in a single byte and id 0 is reserved, so the tree (including padded blank slots) may hold at most 254 nodes.",
        ),
        NAME_ID_OVERFLOW => Some(
            "Name ids are stored in a single byte and id 0 is reserved for the null name, so at most 254 names and alternate names can be emitted.",
        ),
        INVALID_NAME_SYNTAX => Some(
            "Display names may only use ASCII letters, digits and '<...>' glyph references. Names containing '<' or '>' are exploded into glyph tokens, and every '<' needs a matching '>' with a non-empty glyph name in between.",
        ),
        _ => None,
    }
}
