use assert_cmd::Command;
use predicates::prelude::*;

fn dialdesk() -> Command {
    let mut cmd = Command::cargo_bin("dialdesk").expect("binary builds");
    cmd.env_remove("DIALDESK_API_TOKEN");
    cmd
}

#[test]
fn test_help_lists_resource_subcommands() {
    dialdesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("agents"))
        .stdout(predicate::str::contains("lead-groups"))
        .stdout(predicate::str::contains("voices"));
}

#[test]
fn test_config_show_creates_default_profile() {
    let temp = tempfile::tempdir().expect("temp dir");
    dialdesk()
        .args(["--config-dir", temp.path().to_str().unwrap()])
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url = http://localhost:8080"));
}

#[test]
fn test_config_set_page_size_persists() {
    let temp = tempfile::tempdir().expect("temp dir");
    let dir = temp.path().to_str().unwrap().to_string();

    dialdesk()
        .args(["--config-dir", &dir])
        .args(["config", "set", "page_size", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set page_size = 25"));

    dialdesk()
        .args(["--config-dir", &dir])
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 25"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let temp = tempfile::tempdir().expect("temp dir");
    dialdesk()
        .args(["--config-dir", temp.path().to_str().unwrap()])
        .args(["config", "set", "color_scheme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration value"));
}

#[test]
fn test_resource_commands_require_a_token() {
    let temp = tempfile::tempdir().expect("temp dir");
    dialdesk()
        .args(["--config-dir", temp.path().to_str().unwrap()])
        .args(["agents", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication required"));
}
