use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the console with `input` on stdin and no prompt.
fn run_console(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_service-console"))
        .args(["--prompt", ""])
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn service-console");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for console")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Console loop
// ---------------------------------------------------------------------------

#[test]
fn end_of_input_shuts_down_cleanly() {
    let output = run_console(&["--player", "alice"], "list\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 online: alice\n");
}

#[test]
fn stop_command_ends_session_before_later_lines() {
    let output = run_console(&[], "say before\nstop\nsay after\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[broadcast] before\n");
}

#[test]
fn quoted_broadcast_and_ban_flow() {
    let output = run_console(
        &["--player", "alice", "--player", "bob"],
        "say \"hello   world\"\nban bob 10 -r 'spawn camping'\nlist --verbose\n",
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[broadcast] hello   world\n\
         banned bob for 10 minutes\n\
         [broadcast] bob has been banned\n\
         1 online: alice\n\
         1 banned: bob\n"
    );
}

#[test]
fn unknown_command_is_reported_and_session_continues() {
    let output = run_console(&["--player", "alice"], "frobnicate now\nlist\n");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "error: unknown command 'frobnicate'\n1 online: alice\n"
    );
}

#[test]
fn conversion_error_prints_usage_and_skips_handler() {
    let output = run_console(&["--player", "bob"], "ban bob soon\nlist\n");
    let out = stdout(&output);
    assert!(out.contains("error: invalid value 'soon' for 'minutes': expected integer"));
    assert!(out.contains("usage: ban player [minutes] [--reason <text>] [--silent] [--help]\n"));
    assert!(out.ends_with("1 online: bob\n"));
}

#[test]
fn extra_tokens_warn_but_execute() {
    let output = run_console(&[], "list extra1 extra2\n");
    assert_eq!(
        stdout(&output),
        "warning: ignored unexpected input: extra1 extra2\n0 online: \n"
    );
}

#[test]
fn command_help_flag_renders_table() {
    let output = run_console(&[], "kick --help\n");
    let out = stdout(&output);
    assert!(out.starts_with("usage: kick player [--reason <text>] [--help]\n"));
    assert!(out.contains("Disconnect a player"));
    assert!(out.contains("-r, --reason"));
}

#[test]
fn global_help_lists_commands_in_order() {
    let output = run_console(&[], "help\n");
    let out = stdout(&output);
    let names: Vec<&str> = out
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["list", "say", "kick", "ban", "unban", "stop", "help"]);
}

// ---------------------------------------------------------------------------
// Configuration and catalogs
// ---------------------------------------------------------------------------

#[test]
fn config_file_changes_prefixes_and_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("console.yaml");
    std::fs::write(
        &config,
        "prompt: \"$ \"\nparser:\n  long_prefix: \"//\"\n  short_prefix: \"/\"\n",
    )
    .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_service-console"))
        .arg("--config")
        .arg(&config)
        .args(["--player", "alice"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"ban alice /s\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "$ banned alice for good\n$ ");
}

#[test]
fn catalog_translates_messages() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("fr.yaml");
    std::fs::write(
        &catalog,
        "\"unknown command '{token}'\": \"commande inconnue : {token}\"\n\
         \"error: {message}\": \"erreur : {message}\"\n",
    )
    .unwrap();
    let catalog = catalog.to_str().unwrap();

    let output = run_console(&["--catalog", catalog], "frob\n");
    assert_eq!(stdout(&output), "erreur : commande inconnue : frob\n");
}

#[test]
fn invalid_config_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("console.yaml");
    std::fs::write(&config, "parser:\n  long_prefix: \"-\"\n  short_prefix: \"-\"\n").unwrap();
    let config = config.to_str().unwrap();

    let output = run_console(&["--config", config], "list\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid configuration"));
}

// ---------------------------------------------------------------------------
// Command listing
// ---------------------------------------------------------------------------

#[test]
fn list_commands_as_json() {
    let output = run_console(&["--list-commands", "--format", "json"], "");
    assert!(output.status.success());

    let specs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let specs = specs.as_array().unwrap();
    assert_eq!(specs.len(), 7);
    assert_eq!(specs[3]["name"], "ban");
    assert_eq!(specs[3]["arguments"][1]["value_type"], "integer");
}

#[test]
fn list_commands_as_table() {
    let output = run_console(&["--list-commands"], "");
    let out = stdout(&output);
    assert!(out.starts_with("Commands:\n"));
    assert!(out.contains("  unban  Lift a ban\n"));
}
