//! Shared test helpers for `menudef_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;

use menudef_core::grammar::ast::{MenuFile, MenuNode};
use menudef_core::traverse::flatten;
use menudef_core::{Compilation, CompileError, CompileOptions, DuplicateNamePolicy, compile};

/// The smallest useful menu: a root group with two items in one row.
#[allow(dead_code)]
pub const PLUS_MINUS: &str = "\
MenuConfig [ ItemName mNullName ItemNameId mNullNameId ItemHandler mNullHandler GroupHandler mGroupHandler ]
MenuGroup Root mRoot [
    MenuRow [
        MenuItem Plus mPlus
        MenuItem Minus mMinus
    ]
]
";

/// Read a file from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

/// Wrap rows of a root group in the mandatory config block.
#[allow(dead_code)]
pub fn with_root(rows: &str) -> String {
    format!("MenuConfig [ ]\nMenuGroup Root mRoot [\n{rows}\n]\n")
}

/// Options used by most tests.
#[allow(dead_code)]
pub fn options() -> CompileOptions {
    CompileOptions::new("menudef.txt")
}

/// Compile with default options, panicking on error.
#[allow(dead_code)]
pub fn compile_ok(source: &str) -> Compilation {
    compile(source, &options()).unwrap_or_else(|e| panic!("compile failed: {e}"))
}

/// Compile with default options, expecting an error.
#[allow(dead_code)]
pub fn compile_err(source: &str) -> CompileError {
    compile_err_with(source, DuplicateNamePolicy::default())
}

/// Compile with the given duplicate name policy, expecting an error.
#[allow(dead_code)]
pub fn compile_err_with(source: &str, policy: DuplicateNamePolicy) -> CompileError {
    let opts = CompileOptions {
        duplicate_names: policy,
        ..options()
    };
    match compile(source, &opts) {
        Ok(_) => panic!("expected compile error"),
        Err(e) => e,
    }
}

/// Find a node by label anywhere in the tree.
#[allow(dead_code)]
pub fn node<'a>(file: &'a MenuFile, label: &str) -> &'a MenuNode {
    flatten(&file.root)
        .into_iter()
        .find(|n| n.label() == label)
        .unwrap_or_else(|| panic!("no node labelled {label}"))
}

/// Labels of all nodes in hybrid traversal order.
#[allow(dead_code)]
pub fn labels(file: &MenuFile) -> Vec<String> {
    flatten(&file.root)
        .into_iter()
        .map(|n| n.label().to_string())
        .collect()
}
