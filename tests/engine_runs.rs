mod common;

use anyhow::Result;
use common::{toml_path, FailingComparator, ModelTree};
use mdl_diff::utils::validation::Validate;
use mdl_diff::{DiffEngine, DiffError, LocalStorage, TomlConfig};
use std::fs;
use tempfile::TempDir;

fn populate_half_life(tree: &ModelTree) {
    tree.model("valve/models", "barney.mdl", b"barney-ld");
    tree.model("gearbox/models", "barney.mdl", b"barney-ld");
    tree.model("bshift/models", "barney.mdl", b"barney-ld");
    tree.model("valve/models", "gman.mdl", b"gman-valve");
    tree.model("bshift/models", "gman.mdl", b"gman-bshift");
    tree.model("gearbox/models", "otis.mdl", b"otis");

    tree.model("valve_hd/models", "barney.mdl", b"barney-hd");
    tree.model("gearbox_hd/models", "barney.mdl", b"barney-hd");
    // bshift_hd 不存在
}

#[test]
fn builtin_layout_writes_ld_and_hd_reports() -> Result<()> {
    let tree = ModelTree::new();
    populate_half_life(&tree);
    let out = TempDir::new()?;

    let config = TomlConfig::half_life(tree.path());
    config.validate()?;
    let engine = DiffEngine::new(LocalStorage::new(out.path()), config);

    let outcomes = engine.run(&[])?;
    let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["ld", "hd"]);

    assert_eq!(outcomes[0].total_models, 3);
    assert_eq!(outcomes[0].mismatches, vec!["gman.mdl"]);
    assert_eq!(outcomes[1].total_models, 1);
    assert!(outcomes[1].mismatches.is_empty());

    let ld = fs::read_to_string(out.path().join("models_diff_ld.txt"))?;
    let gap = " ".repeat(11);
    let rule = format!("{}{}", gap, "-".repeat(43));
    let expected = [
        format!("{}|  Valve  | Gearbox | BShift  |           |", gap),
        rule.clone(),
        format!("{}| present | present | present | identical |", gap),
        rule.clone(),
        "barney.mdl |    X    |    X    |    X    |     X     |".to_string(),
        "gman.mdl   |    X    |         |    X    |           |".to_string(),
        "otis.mdl   |         |    X    |         |     X     |".to_string(),
        rule,
        String::new(),
        "Binary unequal models found:".to_string(),
        String::new(),
        "gman.mdl".to_string(),
        String::new(),
    ]
    .join("\n");
    assert_eq!(ld, expected);

    let hd = fs::read_to_string(out.path().join("models_diff_hd.txt"))?;
    assert!(hd.contains("barney.mdl |    X    |    X    |         |     X     |"));
    assert!(hd.ends_with("All models are binary equal\n"));
    assert!(!out.path().join("models_diff_all.txt").exists());
    Ok(())
}

#[test]
fn all_run_is_selectable_and_six_way() -> Result<()> {
    let tree = ModelTree::new();
    populate_half_life(&tree);
    let out = TempDir::new()?;

    let engine = DiffEngine::new(LocalStorage::new(out.path()), TomlConfig::half_life(tree.path()));
    let outcomes = engine.run(&["all".to_string()])?;

    assert_eq!(outcomes.len(), 1);
    // barney 在 LD 與 HD 內容不同
    assert_eq!(outcomes[0].mismatches, vec!["barney.mdl", "gman.mdl"]);

    let all = fs::read_to_string(&outcomes[0].output_path)?;
    let lines: Vec<&str> = all.lines().collect();
    assert!(lines[0].contains("|       Valve       |      Gearbox      |"));
    assert!(lines[2].contains("|   LD    |   HD    |   LD    |   HD    |"));
    assert_eq!(
        lines[6],
        "barney.mdl |    X    |    X    |    X    |    X    |    X    |         |           |"
    );
    assert!(all.contains("Binary unequal models found:"));
    Ok(())
}

#[test]
fn rerun_produces_identical_output() -> Result<()> {
    let tree = ModelTree::new();
    populate_half_life(&tree);
    let out = TempDir::new()?;

    let engine = DiffEngine::new(LocalStorage::new(out.path()), TomlConfig::half_life(tree.path()));
    engine.run(&[])?;
    let first = fs::read(out.path().join("models_diff_ld.txt"))?;
    engine.run(&[])?;
    let second = fs::read(out.path().join("models_diff_ld.txt"))?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn toml_config_with_summary_disabled_and_sha256() -> Result<()> {
    let tree = ModelTree::new();
    tree.model("ld", "a.mdl", b"aaaa");
    tree.model("hd", "a.mdl", b"aaab");
    let out = TempDir::new()?;

    let content = format!(
        r#"
strategy = "sha256"

[[runs]]
name = "pair"
output = "nested/pair.txt"
summary = false

[[runs.groups]]
title = "Valve"
[[runs.groups.variants]]
label = "LD"
path = "{}"
[[runs.groups.variants]]
label = "HD"
path = "{}"
"#,
        toml_path(&tree.dir("ld")),
        toml_path(&tree.dir("hd"))
    );

    let config = TomlConfig::from_toml_str(&content)?;
    config.validate()?;
    let engine = DiffEngine::new(LocalStorage::new(out.path()), config);
    let outcomes = engine.run(&[])?;
    assert_eq!(outcomes[0].mismatches, vec!["a.mdl"]);

    let text = fs::read_to_string(out.path().join("nested/pair.txt"))?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "      |       Valve       |           |");
    assert_eq!(lines[6], "a.mdl |    X    |    X    |           |");
    assert_eq!(lines[7], format!("      {}", "-".repeat(33)));
    assert!(!text.contains("Binary unequal"));
    Ok(())
}

#[test]
fn failed_comparison_keeps_previous_report() -> Result<()> {
    let tree = ModelTree::new();
    populate_half_life(&tree);
    let out = TempDir::new()?;

    let engine = DiffEngine::new(LocalStorage::new(out.path()), TomlConfig::half_life(tree.path()));
    engine.run(&["ld".to_string()])?;
    let before = fs::read(out.path().join("models_diff_ld.txt"))?;

    let failing = DiffEngine::new(LocalStorage::new(out.path()), TomlConfig::half_life(tree.path()))
        .with_comparator(|| Box::new(FailingComparator));
    let err = failing.run(&["ld".to_string()]).unwrap_err();
    assert!(matches!(err, DiffError::Io { .. }));

    assert_eq!(fs::read(out.path().join("models_diff_ld.txt"))?, before);
    let entries: Vec<_> = fs::read_dir(out.path())?
        .map(|e| e.map(|e| e.file_name()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(entries, vec![std::ffi::OsString::from("models_diff_ld.txt")]);
    Ok(())
}

#[test]
fn failed_comparison_writes_no_report() -> Result<()> {
    let tree = ModelTree::new();
    populate_half_life(&tree);
    let out = TempDir::new()?;

    let engine = DiffEngine::new(LocalStorage::new(out.path()), TomlConfig::half_life(tree.path()))
        .with_comparator(|| Box::new(FailingComparator));
    let err = engine.run(&[]).unwrap_err();
    assert!(matches!(err, DiffError::Io { .. }));
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}

#[test]
fn unknown_run_is_rejected_before_writing() -> Result<()> {
    let tree = ModelTree::new();
    let out = TempDir::new()?;

    let engine = DiffEngine::new(LocalStorage::new(out.path()), TomlConfig::half_life(tree.path()));
    let err = engine.run(&["ultra".to_string()]).unwrap_err();
    assert!(matches!(err, DiffError::UnknownRun { .. }));
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}
