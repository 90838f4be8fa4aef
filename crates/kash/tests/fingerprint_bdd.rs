//! Behavioural tests for the kash CLI.
//!
//! These scenarios drive `kash::cli::run` with an injected environment and
//! check the fingerprints and failures it reports.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;

use kash::cli::run;
use kash::{CLIENT_ID_ENV, ISSUER_ENV, SCOPES_ENV};
use mockable::MockEnv;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(Default, ScenarioState)]
struct World {
    vars: Slot<HashMap<String, String>>,
    first: Slot<CommandResult>,
    second: Slot<CommandResult>,
}

#[derive(Debug, Clone)]
struct CommandResult {
    is_success: bool,
    stdout: String,
    stderr: String,
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("OIDC_ISS is \"{value}\"")]
fn oidc_iss_is(world: &World, value: String) {
    set_var(world, ISSUER_ENV, &value);
}

#[given("OIDC_AZP is \"{value}\"")]
fn oidc_azp_is(world: &World, value: String) {
    set_var(world, CLIENT_ID_ENV, &value);
}

#[given("OIDC_SCP is \"{value}\"")]
fn oidc_scp_is(world: &World, value: String) {
    set_var(world, SCOPES_ENV, &value);
}

#[when("the kubelogin command runs")]
fn the_kubelogin_command_runs(world: &World) {
    world.first.set(run_cli(world, &["kubelogin"]));
}

#[when("the kubelogin command runs again")]
fn the_kubelogin_command_runs_again(world: &World) {
    world.second.set(run_cli(world, &["kubelogin"]));
}

#[when("the kubelogin command runs again with OIDC_SCP set to an empty string")]
fn the_kubelogin_command_runs_again_with_empty_scopes(world: &World) {
    set_var(world, SCOPES_ENV, "");
    world.second.set(run_cli(world, &["kubelogin"]));
}

#[when("the CLI runs without a command")]
fn the_cli_runs_without_a_command(world: &World) {
    world.first.set(run_cli(world, &[]));
}

#[when("the CLI runs the command \"{command}\"")]
fn the_cli_runs_the_command(world: &World, command: String) {
    world.first.set(run_cli(world, &[command.as_str()]));
}

#[then("the CLI succeeds")]
fn the_cli_succeeds(world: &World) {
    let result = first_result(world);
    assert!(result.is_success, "stderr was: {}", result.stderr);
    assert!(result.stderr.is_empty());
}

#[then("the fingerprint is \"{expected}\"")]
fn the_fingerprint_is(world: &World, expected: String) {
    assert_eq!(first_result(world).stdout, expected);
}

#[then("the fingerprint is 64 lowercase hexadecimal characters")]
fn the_fingerprint_is_lowercase_hex(world: &World) {
    let stdout = first_result(world).stdout;
    assert_eq!(stdout.len(), 64, "unexpected fingerprint: {stdout}");
    assert!(
        stdout
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "fingerprint should be lowercase hex: {stdout}"
    );
}

#[then("both fingerprints are identical")]
fn both_fingerprints_are_identical(world: &World) {
    let first = first_result(world);
    let second = world.second.get().expect("second result set");

    assert!(first.is_success && second.is_success);
    assert_eq!(first.stdout, second.stdout);
}

#[then("the CLI fails with \"{message}\"")]
fn the_cli_fails_with(world: &World, message: String) {
    let result = first_result(world);

    assert!(!result.is_success);
    assert!(result.stdout.is_empty(), "stdout was: {}", result.stdout);
    assert_eq!(result.stderr, message);
}

#[scenario(path = "tests/features/fingerprint.feature", index = 0)]
fn reference_fingerprint(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/fingerprint.feature", index = 1)]
fn another_client_id(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/fingerprint.feature", index = 2)]
fn repeated_runs_agree(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/fingerprint.feature", index = 3)]
fn unset_scopes_match_empty_scopes(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/fingerprint.feature", index = 4)]
fn missing_command(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/fingerprint.feature", index = 5)]
fn unknown_command(world: World) {
    drop(world);
}

fn set_var(world: &World, name: &str, value: &str) {
    let mut vars = world.vars.get().unwrap_or_default();
    vars.insert(name.to_owned(), value.to_owned());
    world.vars.set(vars);
}

fn first_result(world: &World) -> CommandResult {
    world.first.get().expect("command result set")
}

fn run_cli(world: &World, args: &[&str]) -> CommandResult {
    let vars = world.vars.get().unwrap_or_default();
    let mut env = MockEnv::new();
    env.expect_raw()
        .times(0..)
        .returning(move |key| vars.get(key).cloned().ok_or(VarError::NotPresent));

    let argv = args.iter().map(OsString::from).collect::<Vec<_>>();
    match run(argv.into_iter(), &env) {
        Ok(digest) => CommandResult {
            is_success: true,
            stdout: digest.to_hex(),
            stderr: String::new(),
        },
        Err(err) => CommandResult {
            is_success: false,
            stdout: String::new(),
            stderr: err.to_string(),
        },
    }
}
