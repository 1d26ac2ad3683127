use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run ordertrail with a fixed actor so git config does not leak in.
fn ordertrail() -> Command {
    let mut cmd = cargo_bin_cmd!("ordertrail");
    cmd.env_remove("ORDERTRAIL_DIR")
        .env_remove("RUST_LOG")
        .env("ORDERTRAIL_ACTOR", "Test Manager <manager@shop.test>");
    cmd
}

fn init(dir: &assert_fs::TempDir) {
    ordertrail()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

fn record(dir: &assert_fs::TempDir, args: &[&str]) {
    ordertrail()
        .current_dir(dir.path())
        .arg("record")
        .args(args)
        .assert()
        .success();
}

/// An initialized dir with three entries across two orders and two users.
fn seeded() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    record(&dir, &["1001", "coupon_added", "--field", "coupon", "--new", "spring"]);
    record(&dir, &["1001", "note_added", "--field", "note", "--new", "Left at the door"]);
    ordertrail()
        .current_dir(dir.path())
        .args(["--actor", "Warehouse Bot", "record", "1002", "order_refunded"])
        .args(["--field", "refund", "--new", "5"])
        .assert()
        .success();

    dir
}

// ─── Record ─────────────────────────────────────────────────────

#[test]
fn record_writes_entry() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    ordertrail()
        .current_dir(dir.path())
        .args(["record", "1001", "coupon_added", "--field", "coupon", "--new", "spring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded #1: Coupon added on order 1001"));

    let log = std::fs::read_to_string(dir.path().join(".ordertrail/changes.log")).unwrap();
    assert!(log.contains("\"action\":\"coupon_added\""));
    assert!(log.contains("\"old_value\":null"));
    assert!(log.contains("\"new_value\":\"spring\""));
}

#[test]
fn record_rejects_unknown_action() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    ordertrail()
        .current_dir(dir.path())
        .args(["record", "1001", "order_exploded"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown action 'order_exploded'"))
        .stderr(predicate::str::contains("status_changed"));
}

// ─── Log ────────────────────────────────────────────────────────

#[test]
fn log_lists_newest_first() {
    let dir = seeded();

    let output = ordertrail()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1 (3 entries)"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let refund_at = stdout.find("Order refunded").unwrap();
    let coupon_at = stdout.find("Coupon added").unwrap();
    assert!(refund_at < coupon_at);
}

#[test]
fn log_ascending_reverses_order() {
    let dir = seeded();

    let output = ordertrail()
        .current_dir(dir.path())
        .args(["log", "--asc"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let refund_at = stdout.find("Order refunded").unwrap();
    let coupon_at = stdout.find("Coupon added").unwrap();
    assert!(coupon_at < refund_at);
}

#[test]
fn log_filters_by_order() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--order", "1002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order refunded"))
        .stdout(predicate::str::contains("Coupon added").not());
}

#[test]
fn log_filters_by_action() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--action", "note_added"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Left at the door"))
        .stdout(predicate::str::contains("(1 entries)"));
}

#[test]
fn log_filters_by_user() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--user", "warehouse"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order refunded"))
        .stdout(predicate::str::contains("Note added").not());
}

#[test]
fn log_search_matches_values() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--search", "SPRING"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coupon added"))
        .stdout(predicate::str::contains("(1 entries)"));
}

#[test]
fn log_date_range_is_inclusive_of_today() {
    let dir = seeded();
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--from", &today, "--to", &today])
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 entries)"));

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--to", "2000-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change log entries found"))
        .stdout(predicate::str::contains("Try removing filters"));
}

#[test]
fn log_rejects_bad_date() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--from", "01/02/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '01/02/2026'"));
}

#[test]
fn log_pages_results() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    for i in 0..12 {
        record(&dir, &["1001", "note_added", "--field", "note", "--new", &format!("note {i}")]);
    }

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--per-page", "10", "--page", "2", "--asc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2 of 2 (12 entries)"))
        .stdout(predicate::str::contains("note 10"))
        .stdout(predicate::str::contains("note 11"))
        .stdout(predicate::str::contains("note 9").not());
}

#[test]
fn log_page_far_past_the_end() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--page", "18446744073709551615"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is past the end (3 entries)"));
}

#[test]
fn log_rejects_out_of_range_page_size() {
    let dir = seeded();

    for size in ["5", "101"] {
        ordertrail()
            .current_dir(dir.path())
            .args(["log", "--per-page", size])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--per-page"));
    }
}

#[test]
fn log_empty() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    ordertrail()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("No change log entries found"));
}

// ─── Show ───────────────────────────────────────────────────────

#[test]
fn show_lists_one_order() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["show", "1001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order 1001: change history"))
        .stdout(predicate::str::contains("Coupon added"))
        .stdout(predicate::str::contains("Note added"))
        .stdout(predicate::str::contains("Order refunded").not());
}

#[test]
fn show_page_far_past_the_end() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["show", "1001", "--page", "18446744073709551615"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is past the end (2 changes)"));
}

#[test]
fn show_unknown_order() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["show", "9999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded"));
}

// ─── Delete / cleanup ───────────────────────────────────────────

#[test]
fn delete_removes_selected_entries() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["delete", "1", "3", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 entries"));

    ordertrail()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 entries)"))
        .stdout(predicate::str::contains("Note added"));
}

#[test]
fn delete_nothing_matches() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["delete", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching entries"));
}

#[test]
fn cleanup_purges_old_entries() {
    let dir = seeded();

    let log = dir.child(".ordertrail/changes.log");
    let mut content = std::fs::read_to_string(log.path()).unwrap();
    content.push_str(
        r#"{"id":4,"order_id":"900","timestamp":"2020-01-01T00:00:00Z","user":"old","email":null,"action":"note_added","field_name":"note","old_value":null,"new_value":"ancient","additional_data":null}"#,
    );
    content.push('\n');
    log.write_str(&content).unwrap();

    ordertrail()
        .current_dir(dir.path())
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 entry older than 90 days"));

    ordertrail()
        .current_dir(dir.path())
        .args(["log", "--search", "ancient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change log entries found"));
}

#[test]
fn cleanup_rejects_zero_days() {
    let dir = seeded();

    ordertrail()
        .current_dir(dir.path())
        .args(["cleanup", "--days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--days must be at least 1"));
}
