use std::fs;
use std::path::PathBuf;

use conf_tree_core::{parse_file, ParseError, Syntax, TypedPattern};
use regex::Regex;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_ios_fixture_into_interface_blocks() {
    let tree = parse_file(&fixture("fixtures/ios-sw1.conf"), Syntax::Ios)
        .expect("parse should succeed");

    let anchors = tree.find_objects(&Regex::new(r"^interface\s").expect("regex"));
    assert_eq!(anchors.len(), 7);

    // every interface block owns its indented statements
    let first = anchors[0];
    assert_eq!(tree.text(first), "interface GigabitEthernet0/1");
    assert_eq!(tree.children(first).len(), 2);
    for &child in tree.children(first) {
        assert_eq!(tree.parent(child), Some(first));
    }
}

#[test]
fn parses_junos_fixture_with_nested_blocks() {
    let tree = parse_file(&fixture("fixtures/junos-rt1.conf"), Syntax::Junos)
        .expect("parse should succeed");

    let hostname = TypedPattern::new(r"host-?name\s+(\S+)").expect("pattern");
    assert_eq!(tree.first_match_typed(&hostname), Some("rt1".to_string()));

    let interfaces = tree
        .find_objects(&Regex::new(r"^interfaces$").expect("regex"))
        .into_iter()
        .find(|&id| tree.parent(id).is_none())
        .expect("interfaces block");
    assert_eq!(tree.children(interfaces).len(), 5);

    // address statement sits three levels below its physical interface
    let address = tree
        .find_objects(&Regex::new(r"^address 10\.0\.0\.1/24$").expect("regex"))
        .pop()
        .expect("address line");
    assert_eq!(tree.get(address).map(|l| l.depth), Some(4));
}

#[test]
fn junos_unbalanced_file_reports_malformed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.conf");
    fs::write(&path, "interfaces {\n    ge-0/0/1 {\n        unit 0;\n}\n").expect("write");

    let err = parse_file(&path, Syntax::Junos).unwrap_err();
    assert!(matches!(err, ParseError::Malformed(_)));
}

#[test]
fn missing_file_reports_io_error() {
    let err = parse_file(&fixture("fixtures/no-such-file.conf"), Syntax::Ios).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}
