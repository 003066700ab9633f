use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::Path};

const ENTITY_ID: &str = "tech.derbent.orders.domain.COrder";
const ENTITY: &str = "package tech.derbent.orders.domain;

@Entity
public class COrder extends CEntityDB<COrder> {

    @Column
    private String title;
}
";

fn project(base: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let file = base.join("src/main/java/tech/derbent/orders/domain/COrder.java");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, ENTITY).unwrap();
    let list = base.join("all_classes.txt");
    fs::write(&list, format!("{ENTITY_ID}\ntech.derbent.orders.domain.CMissing\n")).unwrap();
    (list, file)
}

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("quality-matrix").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_unit_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .current_dir(dir.path())
        .args(["report", "--input"])
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn zero_workers_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (list, _) = project(dir.path());
    bin()
        .current_dir(dir.path())
        .args(["report", "--workers", "0", "--input"])
        .arg(&list)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn report_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let (list, _) = project(dir.path());
    let out = dir.path().join("out");

    bin()
        .current_dir(dir.path())
        .arg("report")
        .arg("--input")
        .arg(&list)
        .arg("--base-dir")
        .arg(dir.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 units x 52 rules"));

    for name in ["quality_matrix.html", "matrix.jsonl", "details.jsonl", "summary.json"] {
        assert!(out.join(name).is_file(), "{name} missing");
    }
    let matrix = fs::read_to_string(out.join("matrix.jsonl")).unwrap();
    assert_eq!(matrix.lines().count(), 2);
    assert!(matrix.lines().next().unwrap().contains(ENTITY_ID));
}

#[test]
fn annotate_is_a_dry_run_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let (list, file) = project(dir.path());

    bin()
        .current_dir(dir.path())
        .arg("annotate")
        .arg("--input")
        .arg(&list)
        .arg("--base-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"))
        .stdout(predicate::str::contains("would update"));

    assert_eq!(fs::read_to_string(&file).unwrap(), ENTITY);
}

#[test]
fn annotate_apply_writes_markers_once() {
    let dir = tempfile::tempdir().unwrap();
    let (list, file) = project(dir.path());

    let run = || {
        bin()
            .current_dir(dir.path())
            .args(["annotate", "--apply", "--input"])
            .arg(&list)
            .arg("--base-dir")
            .arg(dir.path())
            .assert()
            .success();
        fs::read_to_string(&file).unwrap()
    };

    let first = run();
    assert!(first.contains("// TODO: [@AMetaData Annotations] - field: title (title)"));
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn dry_run_lists_every_planned_marker() {
    let dir = tempfile::tempdir().unwrap();
    let mut body = String::from("package tech.derbent.orders.domain;\n\npublic class CWide {\n");
    for i in 0..8 {
        body.push_str(&format!("    @Column\n    private Long amount{i};\n"));
    }
    body.push_str("}\n");
    let file = dir.path().join("src/main/java/tech/derbent/orders/domain/CWide.java");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, &body).unwrap();
    let list = dir.path().join("all_classes.txt");
    fs::write(&list, "tech.derbent.orders.domain.CWide\n").unwrap();

    let output = bin()
        .current_dir(dir.path())
        .arg("annotate")
        .arg("--input")
        .arg(&list)
        .arg("--base-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for i in 0..8 {
        assert!(
            stdout.contains(&format!("[@AMetaData Annotations] - field: amount{i} (amount{i})")),
            "amount{i} missing from dry-run listing"
        );
    }
    assert_eq!(fs::read_to_string(&file).unwrap(), body);
}
