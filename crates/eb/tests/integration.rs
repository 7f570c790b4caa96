//! End-to-end CLI integration tests for the `eb` binary.
//!
//! Each test creates its own temporary directory, initializes an estate
//! project where needed, and exercises the `eb` binary as a subprocess via
//! `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `eb` binary, isolated from the
/// caller's environment.
fn eb() -> Command {
    let mut cmd = Command::cargo_bin("eb").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("EB_NO_PAGER", "1")
        .env_remove("EB_DATA")
        .env_remove("ESTATE_DIR")
        .env_remove("ESTATE_DATA_FILE")
        .env_remove("ESTATE_DEFAULT_LIMIT")
        .env_remove("ESTATE_PROMPT")
        .env_remove("ESTATE_COLOR");
    cmd
}

/// Initialize a fresh project in a temp directory and return the handle.
fn init_project(sample: bool) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let mut args = vec!["init", "--quiet"];
    if sample {
        args.push("--sample");
    }
    eb().args(&args).current_dir(tmp.path()).assert().success();
    tmp
}

/// Run one book command with `--json` and return the parsed output.
fn run_json(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = eb()
        .arg("--json")
        .args(args)
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn data_file(tmp: &TempDir) -> std::path::PathBuf {
    tmp.path().join(".estate").join("estatebook.json")
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_project_files() {
    let tmp = TempDir::new().unwrap();
    eb().arg("init")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("eb initialized successfully!"));

    let estate = tmp.path().join(".estate");
    assert!(estate.join("config.yaml").is_file());
    assert!(estate.join(".gitignore").is_file());
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data_file(&tmp)).unwrap()).unwrap();
    assert_eq!(doc["contacts"].as_array().unwrap().len(), 0);
    assert!(doc["saved_at"].is_string());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = init_project(true);
    eb().arg("init")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    eb().args(["init", "--force", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    let list = run_json(&tmp, &["listc"]);
    assert_eq!(list["total"], 0);
}

#[test]
fn init_rejects_an_explicit_data_file() {
    let tmp = TempDir::new().unwrap();
    let elsewhere = tmp.path().join("elsewhere.json");
    eb().args(["--data", elsewhere.to_str().unwrap(), "init"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be combined with init"));
    assert!(!elsewhere.exists());
    assert!(!tmp.path().join(".estate").exists());
}

#[test]
fn init_honours_estate_dir() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("shared-book");
    let work = tmp.path().join("work");
    std::fs::create_dir(&work).unwrap();

    eb().args(["init", "--quiet", "--sample"])
        .env("ESTATE_DIR", &project)
        .current_dir(&work)
        .assert()
        .success();
    assert!(project.join("config.yaml").is_file());
    assert!(project.join("estatebook.json").is_file());
    assert!(!work.join(".estate").exists());

    let output = eb()
        .args(["--json", "listp"])
        .env("ESTATE_DIR", &project)
        .current_dir(&work)
        .output()
        .unwrap();
    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list["total"], 3);
}

#[test]
fn commands_outside_a_project_fail() {
    let tmp = TempDir::new().unwrap();
    eb().arg("listc")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("eb init"));
}

// ---------------------------------------------------------------------------
// Book commands
// ---------------------------------------------------------------------------

#[test]
fn contact_and_property_lifecycle() {
    let tmp = init_project(false);

    let added = run_json(
        &tmp,
        &["addc", "n/John", "Doe", "p/98765432", "e/johnd@example.com", "bmax/900000"],
    );
    assert_eq!(added["contact"]["id"], 1);
    assert_eq!(added["message"], "New contact added: #1 John Doe");

    let added = run_json(
        &tmp,
        &[
            "addp", "a/12", "Marine", "Parade", "Road", "pc/449283", "fa/110", "bed/3", "bath/2",
            "pr/850000",
        ],
    );
    assert_eq!(added["property"]["id"], 1);
    assert_eq!(added["property"]["status"], "available");

    run_json(&tmp, &["link", "c/1", "p/1", "r/buyer"]);

    let shown = run_json(&tmp, &["showc", "1"]);
    assert_eq!(shown["contact"]["buying_properties"][0]["postal_code"], "449283");

    let shown = run_json(&tmp, &["showp", "#1"]);
    assert_eq!(shown["property"]["buyer_contacts"][0]["name"], "John Doe");

    run_json(&tmp, &["markp", "1", "s/sold"]);
    let filtered = run_json(&tmp, &["filterp", "s/sold"]);
    assert_eq!(filtered["total"], 1);

    run_json(&tmp, &["deletep", "1"]);
    let shown = run_json(&tmp, &["showc", "1"]);
    assert_eq!(shown["contact"]["buying_properties"].as_array().unwrap().len(), 0);
}

#[test]
fn human_output_shows_tables() {
    let tmp = init_project(true);
    eb().arg("listp")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Listed all 3 properties"))
        .stdout(predicate::str::contains("ADDRESS"))
        .stdout(predicate::str::contains("18 Tanjong Rhu Road"));

    eb().args(["showp", "2"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BUYERS"))
        .stdout(predicate::str::contains("Alex Yeoh"));
}

#[test]
fn filters_page_through_matches() {
    let tmp = init_project(true);
    let page = run_json(&tmp, &["filterc", "s/active", "limit/2", "offset/1"]);
    assert_eq!(page["total"], 3);
    assert_eq!(page["offset"], 1);
    let contacts = page["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["name"], "Bernice Yu");
}

#[test]
fn invalid_commands_report_errors() {
    let tmp = init_project(false);
    eb().args(["addc", "n/John"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("Parameters: n/NAME p/PHONE e/EMAIL"));

    eb().args(["--json", "showc", "42"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""))
        .stderr(predicate::str::contains("no contact with id #42"));
}

#[test]
fn help_is_served_by_the_grammar() {
    eb().args(["--data", ":memory:", "help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("filterp"));

    eb().args(["--data", ":memory:", "help", "link"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r/buyer|seller"));
}

#[test]
fn readonly_mode_blocks_changes() {
    let tmp = init_project(true);
    let before = std::fs::read_to_string(data_file(&tmp)).unwrap();
    eb().args(["--readonly", "clear"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
    assert_eq!(std::fs::read_to_string(data_file(&tmp)).unwrap(), before);

    eb().args(["--readonly", "listc"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn memory_data_needs_no_project() {
    let tmp = TempDir::new().unwrap();
    eb().args(["--data", ":memory:", "listc"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts in the book yet"));
    assert!(!tmp.path().join(".estate").exists());
}

#[test]
fn explicit_data_file_is_created_on_first_change() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("books").join("mine.json");
    eb().args(["--data", path.to_str().unwrap(), "addc", "n/Ann", "p/91234567", "e/ann@example.com"])
        .assert()
        .success();
    assert!(path.is_file());
}

#[test]
fn corrupt_data_file_is_left_alone() {
    let tmp = init_project(false);
    std::fs::write(data_file(&tmp), "{ not json").unwrap();
    eb().args(["addc", "n/Ann", "p/91234567", "e/ann@example.com"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"))
        .stderr(predicate::str::contains("eb init --force"));
    assert_eq!(std::fs::read_to_string(data_file(&tmp)).unwrap(), "{ not json");
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

#[test]
fn shell_reads_commands_from_stdin() {
    let tmp = init_project(false);
    eb().current_dir(tmp.path())
        .write_stdin(
            "addc n/John Doe p/98765432 e/johnd@example.com\n\
             \n\
             bogus\n\
             listc\n\
             exit\n\
             clear\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("New contact added: #1 John Doe"))
        .stdout(predicate::str::contains("Listed all 1 contacts"))
        .stdout(predicate::str::contains("Goodbye!"))
        .stdout(predicate::str::contains("eb> ").not())
        .stderr(predicate::str::contains("unknown command 'bogus'"));

    // `clear` came after `exit` and never ran.
    let list = run_json(&tmp, &["listc"]);
    assert_eq!(list["total"], 1);
}

#[test]
fn shell_stops_at_end_of_input() {
    let tmp = init_project(true);
    eb().arg("shell")
        .current_dir(tmp.path())
        .write_stdin("listp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Listed all 3 properties"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_set_changes_default_limit() {
    let tmp = init_project(true);
    eb().args(["config", "set", "default-limit", "1"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default-limit = 1"));

    eb().args(["config", "show"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("default-limit: 1"));

    let page = run_json(&tmp, &["filterc", "s/active"]);
    assert_eq!(page["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(page["total"], 3);
}

#[test]
fn config_set_rejects_unknown_keys() {
    let tmp = init_project(false);
    eb().args(["config", "set", "colour", "never"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key"));
}

#[test]
fn environment_overrides_config_file() {
    let tmp = init_project(true);
    let output = eb()
        .args(["--json", "config", "show"])
        .env("ESTATE_DEFAULT_LIMIT", "2")
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["default-limit"], "2");
}

#[test]
fn completion_script_is_generated() {
    eb().args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eb"));
}
