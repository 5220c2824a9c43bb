//! CLI tests for `compilemenu`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo;

const MENU: &str = "\
MenuConfig [ ItemName mNullName ItemNameId mNullNameId ItemHandler mNullHandler GroupHandler mGroupHandler ]
MenuGroup Root mRoot [
    MenuRow [
        MenuItem Plus mPlus
        MenuItem Minus mMinus
    ]
]
";

fn compilemenu_cmd() -> Command {
    Command::new(cargo::cargo_bin!("compilemenu"))
}

fn write_temp_menu(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("menudef.txt");
    fs::write(&path, content).expect("write menudef");
    (dir, path)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn compiles_to_default_asm_path() {
    let (dir, input) = write_temp_menu(MENU);

    let output = compilemenu_cmd()
        .arg(&input)
        .output()
        .expect("run compilemenu");

    assert!(output.status.success(), "{output:?}");
    let asm = read(&dir.path().join("menudef.asm"));
    assert!(asm.contains("; Menu hierarchy definitions, generated from menudef.txt."));
    assert!(asm.contains("mRootId equ 1\n"));
    assert!(asm.contains("mPlusId equ 2\n"));
    assert!(asm.contains("mBlank006Id equ 6\n"));
    assert!(asm.ends_with("mMinusName:\n    .db \"Minus\", 0\n"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Reading"), "stderr: {stderr}");
    assert!(stderr.contains("Generating"), "stderr: {stderr}");
}

#[test]
fn explicit_output_path() {
    let (dir, input) = write_temp_menu(MENU);
    let out = dir.path().join("out").join("menus.asm");
    fs::create_dir_all(out.parent().unwrap()).unwrap();

    let status = compilemenu_cmd()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .status()
        .expect("run compilemenu");

    assert!(status.success());
    assert!(out.exists());
    assert!(!dir.path().join("menudef.asm").exists());
}

#[test]
fn compile_error_exits_one_without_output() {
    let bad = MENU.replace(
        "MenuItem Minus mMinus",
        "MenuItem Minus mMinus MenuItem A mA MenuItem B mB MenuItem C mC MenuItem D mD",
    );
    let (dir, input) = write_temp_menu(&bad);

    let output = compilemenu_cmd()
        .arg(&input)
        .args(["--error-format", "json"])
        .output()
        .expect("run compilemenu");

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("menudef.asm").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    let diags = json.as_array().expect("array of diagnostics");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["id"], "MDL2002");
    assert_eq!(diags[0]["severity"], "error");
    assert_eq!(diags[0]["context"]["group"], "Root");
    assert!(
        diags[0]["message"]
            .as_str()
            .unwrap()
            .contains("too many (6)")
    );
}

#[test]
fn pretty_errors_go_to_stderr() {
    let (_dir, input) = write_temp_menu("MenuConfig [ ]\n");

    let output = compilemenu_cmd()
        .arg(&input)
        .args(["--error-format", "pretty"])
        .output()
        .expect("run compilemenu");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MDL1102"), "stderr: {stderr}");
}

#[test]
fn duplicate_name_policy_flag() {
    let menu = MENU.replace("MenuItem Minus mMinus", "MenuItemAlt Plus Minus mMinus");
    let (_dir, input) = write_temp_menu(&menu);

    let rejected = compilemenu_cmd()
        .arg(&input)
        .args(["--error-format", "json"])
        .output()
        .expect("run compilemenu");
    assert_eq!(rejected.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&rejected.stdout);
    assert!(stdout.contains("MDL2201"), "stdout: {stdout}");

    let accepted = compilemenu_cmd()
        .arg(&input)
        .args(["--duplicate-names", "any-leaf"])
        .status()
        .expect("run compilemenu");
    assert!(accepted.success());
}

#[test]
fn debug_dumps_trees_to_stderr() {
    let (_dir, input) = write_temp_menu(MENU);

    let output = compilemenu_cmd()
        .arg(&input)
        .arg("--debug")
        .output()
        .expect("run compilemenu");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("==== Parsed menu tree"));
    assert!(stderr.contains("==== Annotated menu tree"));
    assert!(stderr.contains("\"mBlank004\""));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = compilemenu_cmd()
        .arg(dir.path().join("nope.txt"))
        .output()
        .expect("run compilemenu");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {stderr}");
}
