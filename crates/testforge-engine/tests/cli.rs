//! `testforge` binary behavior

use std::io::Write;
use std::process::{Command, Output, Stdio};
use testforge_test_utils::LOGIN_FORM;

fn testforge(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_testforge"))
        .args(args)
        .env("RUST_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    if let Some(mut pipe) = child.stdin.take() {
        // the binary may exit before reading, e.g. on a config error
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

#[test]
fn generate_reports_progress_and_prints_result() {
    let output = testforge(&["generate", "--progress"], LOGIN_FORM);
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(result["analysis"]["components"][0]["name"], "LoginForm");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[  5%] Processing code input..."), "{stderr}");
    assert!(stderr.contains("[100%] Generation complete"), "{stderr}");
}

#[test]
fn unknown_framework_exits_with_failed_result() {
    let output = testforge(&["generate", "--framework", "cobol"], LOGIN_FORM);
    assert_eq!(output.status.code(), Some(1));

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["success"], false);
    assert_eq!(result["error"], "no analyzer found for framework: cobol");
}

#[test]
fn frameworks_lists_builtins() {
    let output = testforge(&["frameworks"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  react\n"));
    assert!(stdout.contains("  claude\n"));
}
