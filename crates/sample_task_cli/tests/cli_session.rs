use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sample-task-{nanos}-{file_name}"))
}

fn run_interactive(noise_db: u32, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_sample_task");
    let noise_override = format!("fixed_noise_db={noise_db}");

    let mut child = Command::new(exe)
        .args(["--config-override", &noise_override])
        .env("SAMPLE_TASK_CONFIG_PATH", temp_path("no-config.json"))
        .env_remove("SAMPLE_TASK_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn session_opens_on_start_screen() {
    let output = run_interactive(30, "exit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("== Start =="));
    assert!(stdout.contains("Let's start with a Sample Task for practice."));
}

#[test]
fn help_shows_usage() {
    let output = run_interactive(30, "help\n?\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
    assert!(stdout.contains("noise-test"));
}

#[test]
fn invalid_command_prints_error_and_continues() {
    let output = run_interactive(30, "nope\nstart\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("== Noise Test =="));
}

#[test]
fn quiet_room_unlocks_task_selection() {
    let output = run_interactive(30, "start\nnoise-test\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Current Noise: 30 dB. Good to proceed!"));
    assert!(stdout.contains("== Task Selection =="));
}

#[test]
fn noisy_room_stays_on_noise_test() {
    let output = run_interactive(47, "start\nnoise-test\nselect history\nexit\n");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: noise_too_high - Please move to a quieter place"));
    assert!(stderr.contains("ERROR: invalid_transition"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Current Noise: 47 dB"));
    assert!(!stdout.contains("== Task Selection =="));
}

#[test]
fn recording_outside_window_is_rejected() {
    let input = "start\nnoise-test\nselect text-reading\nhold 9\nhold 21\nsubmit\nexit\n";
    let output = run_interactive(30, input);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: recording_too_short - Recording too short (min 10s)"));
    assert!(stderr.contains("ERROR: recording_too_long - Recording too long (max 20s)"));
    assert!(stderr.contains("ERROR: missing_required_field - recording is required"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Submitted task"));
}

#[test]
fn audio_tasks_are_recorded_with_sequential_ids() {
    let input = "start\nnoise-test\n\
                 select text-reading\nhold 10\nsubmit\n\
                 select image-description\nhold 20\nsubmit\n\
                 select history\nexit\n";
    let output = run_interactive(25, input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Recorded: 10s (/local/audio_"));
    assert!(stdout.contains("Submitted task #1"));
    assert!(stdout.contains("Describe this image aloud: https://cdn.dummyjson.com/"));
    assert!(stdout.contains("Submitted task #2"));
    assert!(stdout.contains("Total Tasks: 2    Total Duration: 30s"));
}

#[test]
fn back_leaves_task_without_recording() {
    let input = "start\nnoise-test\nselect text-reading\nhold 12\nback\nselect history\nexit\n";
    let output = run_interactive(30, input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Tasks: 0    Total Duration: 0s"));
    assert!(stdout.contains("No tasks recorded yet."));
}

#[test]
fn end_of_input_closes_session() {
    let output = run_interactive(30, "start\n");
    assert!(output.status.success());
}
