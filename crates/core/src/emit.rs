//! Assembly emitter: renders a [`MenuTable`] as Z80 assembler source.
//!
//! The output has three parts, in this order:
//!
//! 1. `mMenuTable`: the null record followed by one fixed-size record per
//!    node, in id order;
//! 2. `mMenuNameTable`: one 2-byte pointer per name id;
//! 3. the pool of NUL-terminated name strings.
//!
//! Rendering is infallible; every check happens while building the table.

use tracing::info;

use crate::table::{Entry, MenuTable, NameText, NodeRecord, RowBegin};

// ── Configuration ───────────────────────────────────────────────────────

/// Configuration for the assembly emitter.
#[derive(Debug, Clone, Default)]
pub struct EmitConfig {
    /// Source file name quoted in the header comment.
    pub source_name: String,
}

impl EmitConfig {
    /// Config naming `source_name` in the header.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────────

/// Render the full assembly text for `table`.
pub fn emit_asm(table: &MenuTable, config: &EmitConfig) -> String {
    let mut out = String::new();

    info!("generating menu nodes");
    emit_header(&mut out, config);
    emit_null_record(&mut out);
    for entry in &table.entries {
        match entry {
            Entry::GroupChildren { group } => {
                out.push_str(&format!("; MenuGroup {group}: children\n"));
            }
            Entry::GroupRow { group, row } => {
                out.push_str(&format!("; MenuGroup {group}: children: row {row}\n"));
            }
            Entry::Node(record) => emit_record(&mut out, record),
        }
    }
    out.push('\n');

    info!("generating name strings");
    emit_name_pointers(&mut out, table);
    out.push('\n');
    emit_name_pool(&mut out, table);
    out
}

// ── Node table ──────────────────────────────────────────────────────────

fn emit_header(out: &mut String, config: &EmitConfig) {
    out.push_str(
        ";-----------------------------------------------------------------------------\n",
    );
    out.push_str(&format!(
        "; Menu hierarchy definitions, generated from {}.\n",
        config.source_name
    ));
    out.push_str(
        "\
; See menu.asm for the equivalent C struct declaration.
;
; The following symbols are reserved and pre-generated by the compilemenu
; tool:
;   - mNull
;   - mNullId
;   - mNullName
;   - mNullNameId
;   - mNullHandler
;
; The following symbols are not reserved, but the root menu group is
; recommended to use the 'mRoot' label, which then generates the following
; for the root menu group:
;   - mRoot
;   - mRootId
;   - mRootNameId
;
; The following is the recommended configuration of the 'GroupHandler'
; directive inside a 'MenuConfig':
;   - GroupHandler mGroupHandler
;
; The following are the recommended configurations for a blank menu item:
;   - ItemName mNullName
;   - ItemNameId mNullNameId
;   - ItemHandler mNullHandler
;
; DO NOT EDIT: This file was autogenerated.
;-----------------------------------------------------------------------------

",
    );
}

fn emit_null_record(out: &mut String) {
    out.push_str(
        "\
mMenuTable:
mNull:
mNullId equ 0
    .db mNullId ; id
    .db mNullId ; parentId
    .db mNullNameId ; nameId
    .db 0 ; numRows
    .db 0 ; rowBeginId
    .dw mNullHandler
    .dw 0
",
    );
}

fn emit_record(out: &mut String, record: &NodeRecord) {
    let label = &record.label;
    let row_begin = match &record.row_begin {
        RowBegin::None => "0".to_string(),
        RowBegin::FirstSlot { label, .. } => format!("{label}Id"),
        RowBegin::AltName { symbol } => symbol.clone(),
    };
    let handler_comment = if record.handler.predefined {
        "predefined"
    } else {
        "to be implemented"
    };

    out.push_str(&format!("{label}:\n"));
    out.push_str(&format!("{label}Id equ {}\n", record.id));
    out.push_str(&format!("    .db {label}Id ; id\n"));
    out.push_str(&format!("    .db {}Id ; parentId\n", record.parent_label));
    out.push_str(&format!("    .db {} ; nameId\n", record.name_id));
    out.push_str(&format!("    .db {} ; numRows\n", record.num_rows));
    out.push_str(&format!("    .db {row_begin} ; rowBeginId or altNameId\n"));
    out.push_str(&format!(
        "    .dw {} ; handler ({handler_comment})\n",
        record.handler.symbol
    ));
    out.push_str(&format!(
        "    .dw {} ; nameSelector\n",
        record.name_selector.as_deref().unwrap_or("0")
    ));
}

// ── Names ───────────────────────────────────────────────────────────────

fn emit_name_pointers(out: &mut String, table: &MenuTable) {
    out.push_str(
        "\
; Table of 2-byte pointers to names in the pool of strings below.
mMenuNameTable:
mNullNameId equ 0
    .dw mNullName
",
    );
    for name in &table.names {
        out.push_str(&format!("{} equ {}\n", name.id_symbol(), name.id));
        out.push_str(&format!("    .dw {}\n", name.symbol()));
    }
}

fn emit_name_pool(out: &mut String, table: &MenuTable) {
    out.push_str(
        "\
; Table of names as NUL terminated C strings.
mNullName:
    .db 0
",
    );
    for name in &table.names {
        let text = match &name.text {
            NameText::Literal(text) => format!("\"{text}\""),
            NameText::Glyphs(tokens) => tokens.join(", "),
        };
        out.push_str(&format!("{}:\n", name.symbol()));
        out.push_str(&format!("    .db {text}, 0\n"));
    }
}
