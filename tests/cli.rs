use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("wdi-panels").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("figure.png");
    let mut cmd = Command::cargo_bin("wdi-panels").unwrap();
    cmd.args(["render", "--input"])
        .arg(dir.path().join("Education_data.xlsx"))
        .arg("--output")
        .arg(&out);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("data unavailable"));
    assert!(!out.exists());
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.json");
    fs::write(&cfg, r#"{ "indicators": ["only one"] }"#).unwrap();
    let mut cmd = Command::cargo_bin("wdi-panels").unwrap();
    cmd.args(["summary", "--config"]).arg(&cfg);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn summary_prints_one_line_per_group() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("wdi.csv");
    fs::write(
        &csv,
        "Country Name,Indicator Name,2000,2001\n\
         Ghana,Alpha,80,82\n\
         Mexico,Alpha,90,..\n\
         Chad,Alpha,1,2\n",
    )
    .unwrap();
    let cfg = dir.path().join("cfg.json");
    fs::write(
        &cfg,
        r#"{
            "countries": ["Ghana", "Mexico"],
            "indicators": ["Alpha", "Beta", "Gamma", "Delta"],
            "years": [2000, 2001],
            "pie_year": 2001
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("wdi-panels").unwrap();
    cmd.args(["summary", "--config"]).arg(&cfg).arg("--input").arg(&csv);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Alpha • Ghana  count=2 missing=0  min=80 max=82 mean=81"))
        .stdout(predicate::str::contains("Alpha • Mexico  count=1 missing=1"))
        .stdout(predicate::str::contains("Chad").not());
}
