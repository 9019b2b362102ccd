use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_sample_task");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run sample_task --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config-override"));
}

#[test]
fn cli_rejects_unknown_flag() {
    let exe = env!("CARGO_BIN_EXE_sample_task");
    let output = Command::new(exe)
        .arg("--nope")
        .output()
        .expect("failed to run sample_task --nope");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
