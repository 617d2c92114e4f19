use assert_cmd::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::path::PathBuf;
use tempfile::tempdir;

fn network(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("networks")
        .join(name)
}

fn records(stdout: &[u8]) -> Result<Vec<serde_json::Value>, Box<dyn Error>> {
    Ok(serde_json::from_slice(stdout)?)
}

fn pair(record: &serde_json::Value) -> (u64, u64) {
    (
        record["source"].as_u64().unwrap_or_default(),
        record["target"].as_u64().unwrap_or_default(),
    )
}

#[test]
fn build_reports_edge_counts() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.args(["build", "--json"]).arg(network("pairing.toml"));
    let output = cmd.assert().success().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["num_nodes"], 100);
    assert_eq!(report["total_edges"], 70);
    assert_eq!(report["edges_per_type"]["static"], 35);
    assert_eq!(report["edges_per_type"]["plastic"], 35);
    // Every target is even, so worker 1 owns nothing
    assert_eq!(report["edges_per_worker"], serde_json::json!([70, 0]));
    Ok(())
}

#[test]
fn build_table_output() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("build").arg(network("balanced.toml"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Connections: 100000"))
        .stdout(predicate::str::contains("exc"));
    Ok(())
}

#[test]
fn query_by_synapse_type_as_json() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("query")
        .arg(network("pairing.toml"))
        .args(["--synapse", "static", "--format", "json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let records = records(&output)?;
    assert_eq!(records.len(), 35);
    assert_eq!(pair(&records[0]), (1, 2));
    assert_eq!(pair(&records[34]), (69, 70));
    assert!(records.iter().all(|r| r["synapse"] == "static"));
    assert_eq!(records[0]["params"]["weight"], 1.0);
    Ok(())
}

#[test]
fn query_by_source_keeps_construction_order() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("get-connections")
        .arg(network("pairing.toml"))
        .args(["--source", "31,33,35", "--format", "json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let records = records(&output)?;
    let pairs: Vec<_> = records.iter().map(pair).collect();
    assert_eq!(pairs, vec![(31, 32), (33, 34), (35, 36), (31, 32), (33, 34), (35, 36)]);
    let names: Vec<_> = records.iter().map(|r| r["synapse"].as_str().unwrap_or("")).collect();
    assert_eq!(names, vec!["static", "static", "static", "plastic", "plastic", "plastic"]);
    Ok(())
}

#[test]
fn query_writes_output_file() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let out = tmp.path().join("plastic.json");

    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("query")
        .arg(network("pairing.toml"))
        .args(["--synapse", "plastic", "--format", "json", "--limit", "5", "--output"])
        .arg(&out);
    cmd.assert().success();

    let records = records(&std::fs::read(&out)?)?;
    assert_eq!(records.len(), 5);
    assert_eq!(pair(&records[0]), (31, 32));
    assert_eq!(records[0]["params"]["Wmax"], 50.0);
    Ok(())
}

#[test]
fn query_unknown_synapse_is_empty() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("query")
        .arg(network("pairing.toml"))
        .args(["--synapse", "missing", "--format", "json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    assert!(records(&output)?.is_empty());
    Ok(())
}

#[test]
fn types_lists_builtins_and_derived() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("types").arg(network("pairing.toml"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("static_synapse"))
        .stdout(predicate::str::contains("tsodyks_synapse"))
        .stdout(predicate::str::contains("Wmax=50"));
    Ok(())
}

#[test]
fn unknown_population_fails() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let path = tmp.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
        [[populations]]
        name = "a"
        size = 4

        [[connections]]
        rule = "all_to_all"
        synapse = "static_synapse"
        sources = { population = "a" }
        targets = { population = "b" }
        "#,
    )?;

    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("build").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown population 'b'"));
    Ok(())
}

#[test]
fn zero_limit_rejected() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("snn-connect")?;
    cmd.arg("query")
        .arg(network("pairing.toml"))
        .args(["--limit", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--limit"));
    Ok(())
}
