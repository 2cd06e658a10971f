use std::fs;
use std::process::{Command, Output};

fn tsreport(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tsreport"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("run tsreport")
}

#[test]
fn lists_builtin_variants() {
    let output = tsreport(&["variants"]);
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(body.lines().count(), 5);
    assert!(body.contains("filename-roots"));
    assert!(body.contains("p div mroots"));
}

#[test]
fn show_prints_loadable_yaml() {
    let output = tsreport(&["show", "moran"]);
    assert!(output.status.success());
    let yaml = String::from_utf8(output.stdout).expect("utf8");
    assert!(yaml.contains("pattern: moran/*.trees"));

    let dir = tempfile::tempdir().expect("tmp dir");
    let config = dir.path().join("moran.yaml");
    fs::write(&config, yaml).expect("write config");
    let root = dir.path().to_str().expect("utf8 path");
    let output = tsreport(&["run", "--config", config.to_str().unwrap(), "--root", root]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "div\n");
}

#[test]
fn empty_input_prints_header_only() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let root = dir.path().to_str().expect("utf8 path");
    let output = tsreport(&["run", "--variant", "overlapping", "--root", root]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "N p recrate div\n");
}

#[test]
fn invalid_tree_file_fails_the_run() {
    let dir = tempfile::tempdir().expect("tmp dir");
    fs::write(dir.path().join("b_bad.trees"), b"garbage").expect("write input");
    let root = dir.path().to_str().expect("utf8 path");

    let output = tsreport(&["run", "--variant", "filename-roots", "--root", root]);
    assert!(!output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "p div mroots\n");

    let output = tsreport(&[
        "run",
        "--variant",
        "filename-roots",
        "--root",
        root,
        "--skip-failures",
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "p div mroots\n");
}

#[test]
fn unknown_variant_is_rejected() {
    let output = tsreport(&["run", "--variant", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CFG005"));
}
