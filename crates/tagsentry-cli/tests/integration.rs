use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn check_cloud_tags(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("check_cloud_tags").unwrap();
    cmd.current_dir(dir.path())
        .env("TAGSENTRY_INVENTORY", dir.path().join("inventory.json"));
    cmd
}

fn write_inventory(dir: &TempDir, json: &str) {
    std::fs::write(dir.path().join("inventory.json"), json).unwrap();
}

/// One volume in eu-west-1 tagged only with `name`, plus a second region
/// and a restricted region for the region-selection tests.
const FIXTURE: &str = r#"{
    "regions": ["eu-west-1", "us-east-1"],
    "restricted_regions": ["cn-north-1"],
    "resources": [
        {"id": "vol-1a2b", "kind": "volume", "region": "eu-west-1",
         "tags": {"name": "unknown"}},
        {"id": "i-9f8e", "kind": "instance", "region": "us-east-1",
         "tags": {"name": "web"}},
        {"id": "snap-77", "kind": "snapshot", "region": "cn-north-1",
         "tags": {}}
    ]
}"#;

// ---------------------------------------------------------------------------
// Severity scenarios
// ---------------------------------------------------------------------------

#[test]
fn missing_critical_tag_exits_2() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--critical", "criticaltag"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "volume vol-1a2b in eu-west-1 is missing tag 'criticaltag'",
        ))
        .stdout(predicate::str::contains("criticals=1"));
}

#[test]
fn satisfied_critical_with_missing_warning_exits_1() {
    let dir = TempDir::new().unwrap();
    write_inventory(
        &dir,
        r#"{
            "regions": ["eu-west-1"],
            "resources": [
                {"id": "vol-1a2b", "kind": "volume", "region": "eu-west-1",
                 "tags": {"name": "unknown", "criticaltag": "set"}}
            ]
        }"#,
    );

    check_cloud_tags(&dir)
        .args([
            "--check",
            "tagcheck",
            "--warning",
            "warningtag",
            "--critical",
            "criticaltag",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing tag 'warningtag'"))
        .stdout(predicate::str::contains("warnings=1"));
}

#[test]
fn fully_tagged_resource_exits_0() {
    let dir = TempDir::new().unwrap();
    write_inventory(
        &dir,
        r#"{
            "regions": ["eu-west-1"],
            "resources": [
                {"id": "vol-1a2b", "kind": "volume", "region": "eu-west-1",
                 "tags": {"criticaltag": "set", "warningtag": "set"}}
            ]
        }"#,
    );

    check_cloud_tags(&dir)
        .args([
            "--check",
            "tagcheck",
            "--warning",
            "warningtag",
            "--critical",
            "criticaltag",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("State is OK"))
        .stdout(predicate::str::contains("OKs=1"));
}

#[test]
fn empty_region_exits_0() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, r#"{"regions": ["eu-west-1"], "resources": []}"#);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--critical", "owner"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("State is OK"))
        .stdout(predicate::str::contains("OKs=0"));
}

// ---------------------------------------------------------------------------
// Region selection
// ---------------------------------------------------------------------------

#[test]
fn all_regions_spans_the_listing_and_skips_restricted_ones() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    // The cn-north-1 snapshot is withheld from ALL, so only the volume
    // and the instance are evaluated.
    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--region", "ALL", "--critical", "owner"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("vol-1a2b"))
        .stdout(predicate::str::contains("i-9f8e"))
        .stdout(predicate::str::contains("snap-77").not())
        .stdout(predicate::str::contains("resources=2"));
}

#[test]
fn restricted_region_can_be_named_explicitly() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args([
            "--check",
            "tagcheck",
            "--region",
            "cn-north-1",
            "--critical",
            "owner",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "snapshot snap-77 in cn-north-1 is missing tag 'owner'",
        ));
}

#[test]
fn unknown_region_exits_3() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--region", "south-pole-1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown region: south-pole-1"));
}

// ---------------------------------------------------------------------------
// Kind selection via check options
// ---------------------------------------------------------------------------

#[test]
fn resource_option_limits_the_kinds_checked() {
    let dir = TempDir::new().unwrap();
    write_inventory(
        &dir,
        r#"{
            "regions": ["eu-west-1"],
            "resources": [
                {"id": "vol-1", "kind": "volume", "region": "eu-west-1", "tags": {}},
                {"id": "i-1", "kind": "instance", "region": "eu-west-1", "tags": {}}
            ]
        }"#,
    );

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--critical", "owner"])
        .args(["--resource", "instance"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("i-1"))
        .stdout(predicate::str::contains("vol-1").not());
}

#[test]
fn resource_option_accepts_the_equals_form() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--critical", "owner"])
        .arg("--resource=volume")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("vol-1a2b"));
}

#[test]
fn unknown_resource_kind_exits_3_naming_the_offender() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--resource", "volume,bogus"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown resource kind: bogus"));
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[test]
fn missing_check_parameter_exits_3() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--check parameter is mandatory"))
        .stderr(predicate::str::contains("recognized checks: tagcheck"));
}

#[test]
fn unknown_check_exits_3() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args(["--check", "diskcheck"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown check: diskcheck"));
}

#[test]
fn unpaired_check_option_exits_3() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, FIXTURE);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--resource"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("'--key value' pairs"));
}

#[test]
fn missing_inventory_exits_3() {
    let dir = TempDir::new().unwrap();
    // No inventory file written.

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("inventory"));
}

#[test]
fn clap_errors_map_to_the_unknown_exit_code() {
    // Without --inventory (flag or env) clap refuses the invocation;
    // that must surface as 3, not clap's own exit code.
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("check_cloud_tags")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("TAGSENTRY_INVENTORY")
        .args(["--check", "tagcheck"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--inventory"));
}

#[test]
fn help_exits_0() {
    Command::cargo_bin("check_cloud_tags")
        .unwrap()
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("required tags"));
}

// ---------------------------------------------------------------------------
// Output contract
// ---------------------------------------------------------------------------

#[test]
fn perf_data_line_always_carries_the_four_counters() {
    let dir = TempDir::new().unwrap();
    write_inventory(&dir, r#"{"regions": ["eu-west-1"], "resources": []}"#);

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("OKs="))
        .stdout(predicate::str::contains("warnings="))
        .stdout(predicate::str::contains("criticals="))
        .stdout(predicate::str::contains("unknowns="))
        .stdout(predicate::str::contains("|"));
}

#[test]
fn verbose_reveals_per_resource_ok_detail() {
    let dir = TempDir::new().unwrap();
    write_inventory(
        &dir,
        r#"{
            "regions": ["eu-west-1"],
            "resources": [
                {"id": "vol-1a2b", "kind": "volume", "region": "eu-west-1",
                 "tags": {"owner": "infra"}}
            ]
        }"#,
    );

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--critical", "owner"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("carries all required tags").not());

    check_cloud_tags(&dir)
        .args(["--check", "tagcheck", "--critical", "owner", "-v"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "volume vol-1a2b in eu-west-1 carries all required tags",
        ))
        .stdout(predicate::str::contains("State is OK"));
}

#[test]
fn report_orders_criticals_before_warnings() {
    let dir = TempDir::new().unwrap();
    write_inventory(
        &dir,
        r#"{
            "regions": ["eu-west-1"],
            "resources": [
                {"id": "vol-1", "kind": "volume", "region": "eu-west-1", "tags": {}}
            ]
        }"#,
    );

    let output = check_cloud_tags(&dir)
        .args([
            "--check",
            "tagcheck",
            "--warning",
            "team",
            "--critical",
            "owner",
        ])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let critical_at = stdout.find("missing tag 'owner'").unwrap();
    let warning_at = stdout.find("missing tag 'team'").unwrap();
    assert!(critical_at < warning_at, "criticals must print first");
}
