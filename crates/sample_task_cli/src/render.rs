use sample_task_core::config::Palette;
use sample_task_core::model::{HistorySummary, Screen, Task};
use sample_task_core::session::Session;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Task ID")]
    id: u64,
    #[tabled(rename = "Type")]
    task_type: &'static str,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl From<&Task> for HistoryRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            task_type: task.task_type.label(),
            duration: format!("{}s", task.duration_sec),
            timestamp: task.timestamp.clone(),
        }
    }
}

/// Text rendering of the current screen.
pub fn render_screen(session: &Session, palette: &Palette, json: bool) -> String {
    let mut lines = vec![palette.accentize(&format!("== {} ==", session.screen().label()))];

    match session.screen() {
        Screen::Start => {
            lines.push("Let's start with a Sample Task for practice.".to_string());
            lines.push(hint(palette, &["start"]));
        }
        Screen::NoiseTest => {
            let reading = session
                .noise_gate()
                .last_reading_db()
                .map(|db| format!("{db} dB"))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!("Current Noise: {reading}"));
            if let Some(message) = session.noise_gate().message() {
                lines.push(message.to_string());
            }
            lines.push(hint(palette, &["noise-test"]));
        }
        Screen::TaskSelection => {
            lines.push("Select a Task".to_string());
            lines.push(hint(
                palette,
                &[
                    "select text-reading",
                    "select image-description",
                    "select photo-capture",
                    "select history",
                ],
            ));
        }
        Screen::TextReading | Screen::ImageDescription => {
            if session.screen() == Screen::TextReading {
                lines.push(session.prompt_text().to_string());
            } else {
                lines.push(format!("Describe this image aloud: {}", session.image_url()));
            }
            push_recording_state(&mut lines, session);
            push_submit_state(&mut lines, session);
            lines.push(hint(palette, &["press", "release", "hold <seconds>", "submit", "back"]));
        }
        Screen::PhotoCapture => {
            match session.form().photo_path.as_deref() {
                Some(path) => lines.push(format!("Image: {}", path.display())),
                None => lines.push("No Image Captured".to_string()),
            }
            let description = session.form().description.as_str();
            if description.is_empty() {
                lines.push("Description: -".to_string());
            } else {
                lines.push(format!("Description: {description}"));
            }
            push_submit_state(&mut lines, session);
            lines.push(hint(
                palette,
                &["capture [path]", "describe <text>", "submit", "back"],
            ));
        }
        Screen::TaskHistory => {
            lines.push(render_history(session.tasks(), session.summary(), json));
            lines.push(hint(palette, &["back"]));
        }
    }

    lines.join("\n")
}

pub fn render_history(tasks: &[Task], summary: HistorySummary, json: bool) -> String {
    if json {
        return serde_json::json!({
            "total_tasks": summary.count,
            "total_duration_sec": summary.total_duration_sec,
            "tasks": tasks,
        })
        .to_string();
    }

    let mut out = format!(
        "Total Tasks: {}    Total Duration: {}s",
        summary.count, summary.total_duration_sec
    );
    if tasks.is_empty() {
        out.push_str("\nNo tasks recorded yet.");
    } else {
        let mut table = Table::new(tasks.iter().map(HistoryRow::from));
        table.with(Style::psql());
        out.push('\n');
        out.push_str(&table.to_string());
    }
    out
}

fn push_recording_state(lines: &mut Vec<String>, session: &Session) {
    if session.recording_gate().is_recording() {
        lines.push("Recording...".to_string());
    } else if let Some(recording) = session.form().recording.as_ref() {
        lines.push(format!("Recorded: {}s", recording.duration_sec));
    }
    if let Some(message) = session.recording_gate().message() {
        lines.push(message.to_string());
    }
}

fn push_submit_state(lines: &mut Vec<String>, session: &Session) {
    match session.missing_field() {
        None => lines.push("Submit: ready".to_string()),
        Some(field) => lines.push(format!("Submit: unavailable (needs {field})")),
    }
}

fn hint(palette: &Palette, actions: &[&str]) -> String {
    palette.mutedize(&format!("Actions: {}", actions.join(" | ")))
}
