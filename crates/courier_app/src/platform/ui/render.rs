use chrono::Local;
use courier_core::{AppViewModel, ResultRowView};

/// Local wall-clock time used to stamp each rendered frame.
pub fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

pub fn render(view: &AppViewModel, now: &str) -> String {
    let mut lines = vec![format!("[{now}] search: {:?}", view.input.trim())];

    if let Some(banner) = &view.banner {
        lines.push(format!("  ! {banner}"));
    }
    if let Some(message) = view.query.message() {
        lines.push(format!("  {message}"));
    }
    for row in &view.rows {
        render_row(row, &mut lines);
    }
    if view.active_jobs > 0 {
        let noun = if view.active_jobs == 1 {
            "download"
        } else {
            "downloads"
        };
        lines.push(format!("  {} {noun} in progress", view.active_jobs));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_row(row: &ResultRowView, lines: &mut Vec<String>) {
    // Disabled affordances are shown without the `/d` hint.
    let action = if row.button.enabled {
        format!("[{}] /d {}", row.button.label, row.number)
    } else {
        format!("[{}]", row.button.label)
    };
    lines.push(format!("  {:>2}. {}  {action}", row.number, row.label));
    if let Some(episode) = &row.episode_info {
        lines.push(format!("      {episode}"));
    }
    if let Some(description) = &row.description {
        lines.push(format!("      {description}"));
    }
    if let Some(duration) = &row.duration {
        lines.push(format!("      Duration: {duration}"));
    }
}
