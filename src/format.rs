use crate::models::{SleepSession, QUALITY_UNRATED};

/// Renders the session history into display-ready text for the UI layer.
///
/// Kept behind a trait so the tracker never depends on a concrete
/// presentation; callers with localization needs supply their own.
pub trait SessionFormatter: Send + Sync {
    fn format(&self, sessions: &[SleepSession]) -> String;
}

/// Default English plain-text rendering.
pub struct PlainTextFormatter;

fn quality_label(quality: i32) -> &'static str {
    match quality {
        QUALITY_UNRATED => "--",
        0 => "very bad",
        1 => "poor",
        2 => "so-so",
        3 => "ok",
        4 => "pretty good",
        5 => "excellent",
        _ => "--",
    }
}

impl SessionFormatter for PlainTextFormatter {
    fn format(&self, sessions: &[SleepSession]) -> String {
        if sessions.is_empty() {
            return String::new();
        }

        let mut out = String::from("Here is your sleep data:\n");
        for session in sessions {
            out.push('\n');
            out.push_str(&format!(
                "Started: {}\n",
                session.started_at.format("%a %Y-%m-%d %H:%M")
            ));
            out.push_str(&format!("Quality: {}\n", quality_label(session.quality)));
            if !session.is_open() {
                let minutes = session.duration().num_minutes();
                out.push_str(&format!("Slept: {}h {:02}m\n", minutes / 60, minutes % 60));
            }
        }
        out
    }
}
