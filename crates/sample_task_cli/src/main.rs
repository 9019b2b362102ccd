use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use sample_task_cli::cli::{Action, ActionLine, CONFIG_OVERRIDE_FLAG, Cli, apply_config_override};
use sample_task_cli::render::render_screen;
use sample_task_core::config::{self, ConfigOverrides, Palette, SessionSettings};
use sample_task_core::device::{FileCamera, StaticPermission};
use sample_task_core::error::AppError;
use sample_task_core::session::{CaptureOutcome, Session};
use std::io::{self, BufRead};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "SAMPLE_TASK_LOG";

struct Shell {
    session: Session,
    permission: StaticPermission,
    palette: Palette,
    json: bool,
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = ActionLine::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_action(shell: &mut Shell, action: Action) -> Result<Option<String>, AppError> {
    let session = &mut shell.session;
    let feedback = match action {
        Action::Start => {
            session.start()?;
            None
        }
        Action::NoiseTest => {
            session.run_noise_test()?;
            let reading = session.noise_gate().last_reading_db().unwrap_or_default();
            let message = session.noise_gate().message().unwrap_or_default();
            Some(format!("Current Noise: {reading} dB. {message}"))
        }
        Action::Select { choice } => {
            session.select(choice.into())?;
            None
        }
        Action::Back => {
            session.back()?;
            None
        }
        Action::Press => {
            session.press_start()?;
            Some("Recording... type `release` to stop.".to_string())
        }
        Action::Release => {
            let recording = session.press_end()?;
            Some(format!(
                "Recorded: {}s ({})",
                recording.duration_sec, recording.audio_path
            ))
        }
        Action::Hold { seconds } => {
            let recording = session.record_hold(Duration::from_secs(seconds))?;
            Some(format!(
                "Recorded: {}s ({})",
                recording.duration_sec, recording.audio_path
            ))
        }
        Action::Capture { path } => {
            let mut camera = FileCamera::new(path);
            match session.capture_photo(&mut shell.permission, &mut camera)? {
                CaptureOutcome::Saved(path) => Some(format!("Captured image: {}", path.display())),
                CaptureOutcome::Cancelled => None,
                CaptureOutcome::PermissionDenied => {
                    Some("Camera permission is required to capture an image.".to_string())
                }
            }
        }
        Action::Describe { text } => {
            session.set_description(&text.join(" "))?;
            None
        }
        Action::Submit => {
            let id = session.submit()?;
            Some(format!("Submitted task #{id}"))
        }
        Action::Show => None,
    };

    Ok(feedback)
}

fn handle_line(shell: &mut Shell, line: &str) {
    let args = match split_command_line(line) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            return;
        }
    };

    if args.is_empty() {
        return;
    }

    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push("sample_task".to_string());
    argv.extend(args);

    let parsed = match ActionLine::try_parse_from(argv) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            return;
        }
    };

    match run_action(shell, parsed.action) {
        Ok(Some(feedback)) => println!("{feedback}"),
        Ok(None) => {}
        Err(err) => {
            if !err.is_recoverable() {
                warn!(code = err.code(), "action failed outside validation");
            }
            eprintln!("ERROR: {}", err);
        }
    }
    println!("{}", render_screen(&shell.session, &shell.palette, shell.json));
}

fn run_interactive(mut shell: Shell) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    println!("{}", render_screen(&shell.session, &shell.palette, shell.json));

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        handle_line(&mut shell, line);
    }

    let summary = shell.session.summary();
    info!(
        tasks = summary.count,
        total_duration_sec = summary.total_duration_sec,
        "session ended"
    );
    Ok(())
}

fn build_shell(cli: &Cli) -> Result<Shell, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        warn!(error = %err, "config could not be read, using defaults");
    }

    let mut overrides = ConfigOverrides::default();
    for raw in &cli.config_override {
        apply_config_override(&mut overrides, raw).map_err(|message| {
            AppError::invalid_input(format!("{CONFIG_OVERRIDE_FLAG} {raw}: {message}"))
        })?;
    }

    let merged = config::merge_overrides(&loaded.config, &overrides);
    let settings = SessionSettings::from_config(&merged);
    let session = Session::from_settings(&settings);
    info!(
        media_dir = %session.media_dir().display(),
        audio_dir = %settings.audio_dir,
        camera_allowed = settings.camera_allowed,
        "session configured"
    );

    Ok(Shell {
        session,
        permission: StaticPermission(settings.camera_allowed),
        palette: config::palette_for_theme(merged.theme.as_deref()),
        json: cli.json,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let shell = match build_shell(&cli) {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run_interactive(shell) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
