//! Integration tests for CLI argument handling and the REPL loop
//!
//! Runs the built binary with piped stdin. None of these commands reach the
//! network.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Helper to run the CLI with given args and stdin, capturing output
fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute pokedex");

    // The process may exit before reading stdin (e.g. --help), so a broken pipe is fine
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }

    child.wait_with_output().expect("Failed to wait for pokedex")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"], "");
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pokedex"), "Help should mention pokedex");
    assert!(stdout.contains("--cache-interval"), "Help should mention --cache-interval");
}

#[test]
fn test_zero_interval_prints_error_and_exits() {
    let output = run_cli(&["--cache-interval", "0"], "q\n");
    assert!(!output.status.success(), "Expected zero interval to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid cache interval"),
        "Should print error message about the interval: {}",
        stderr
    );
}

#[test]
fn test_startup_prints_help_and_quits() {
    let output = run_cli(&[], "q\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available commands:"));
    assert!(stdout.contains("Pokedex> "));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let output = run_cli(&[], "");
    assert!(output.status.success());
}

#[test]
fn test_unknown_command_and_errors_keep_loop_running() {
    let output = run_cli(&[], "fly\nl\nInspect Pikachu\nprev\nquit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid command \"fly\""));
    assert!(stdout.contains("Error: You haven't caught any pokemon yet"));
    assert!(stdout.contains("Error: You haven't caught pikachu yet"));
    assert!(stdout.contains("Error: You are on the first page."));
}

#[test]
fn test_missing_argument_is_reported() {
    let output = run_cli(&[], "explore\nq\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No location area provided"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use pokedex::cli::{Cli, CliError, StartupConfig};
    use std::time::Duration;

    #[test]
    fn test_cli_no_args_gives_one_hour_interval() {
        let cli = Cli::parse_from(["pokedex"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_interval, Duration::from_secs(3600));
    }

    #[test]
    fn test_cli_zero_interval_is_rejected() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "0"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::InvalidInterval(0))));
    }

    #[test]
    fn test_cli_base_url_override() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "https://mirror.example/api/v2"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_url, "https://mirror.example/api/v2");
    }
}
