//! Sample-based integration tests: compile every fixture menu and check
//! the output is self-consistent.

mod common;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use menudef_core::traverse::flatten;
use menudef_core::{CompileOptions, compile, to_pretty_json};

#[test]
fn compile_fixture_directory() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut seen = 0;
    for entry in fs::read_dir(&dir).expect("fixtures") {
        let path = entry.unwrap().path();
        if path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }
        let input = fs::read_to_string(&path).expect("read menudef");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let out = compile(&input, &CompileOptions::new(name))
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));

        // Every node defines its label and id symbol exactly once.
        let mut labels = HashSet::new();
        for node in flatten(&out.file.root) {
            assert!(labels.insert(node.label().to_string()));
            let def = format!("\n{}Id equ {}\n", node.label(), node.id());
            assert_eq!(
                out.assembly.matches(&def).count(),
                1,
                "{}: {def:?}",
                path.display()
            );
        }
        // Every referenced name id is defined in the pointer table.
        for name in &out.table.names {
            assert!(out.assembly.contains(&format!("{} equ {}\n", name.id_symbol(), name.id)));
        }
        seen += 1;
    }
    assert!(seen > 0, "no fixtures found in {}", dir.display());
}

#[test]
fn snapshot_keeps_the_unpadded_tree() {
    let opts = CompileOptions {
        snapshot_parsed: true,
        ..common::options()
    };
    let out = compile(common::PLUS_MINUS, &opts).unwrap();
    let parsed = out.parsed.expect("snapshot requested");
    assert_eq!(parsed.root.rows()[0].slots.len(), 2);
    assert_eq!(out.file.root.rows()[0].slots.len(), 5);

    let json: serde_json::Value = serde_json::from_str(&to_pretty_json(&out.file)).unwrap();
    assert_eq!(json["root"]["kind"], "Group");
    assert_eq!(json["root"]["info"]["id"], 1);
    assert_eq!(json["root"]["rows"][0]["slots"][3]["info"]["label"], "mBlank005");
}

#[test]
fn repeated_config_key_surfaces_as_warning() {
    let src = "MenuConfig [ GroupHandler a GroupHandler mGroupHandler ]\n\
               MenuGroup Root mRoot [ MenuRow [ MenuItem A mA ] ]";
    let out = common::compile_ok(src);
    assert_eq!(out.warnings.len(), 1);
    assert!(!out.warnings[0].is_error());
    assert!(out.assembly.contains(".dw mGroupHandler ; handler (predefined)"));
}
