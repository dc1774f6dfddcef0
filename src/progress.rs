//! Turning yt-dlp progress output into something a person can read.

use crate::i18n::Strings;
use crate::model::{ProgressEvent, ProgressStatus};

/// Marker that starts every line printed by our `--progress-template`
pub const PROGRESS_PREFIX: &str = "gui-progress";

/// Value for yt-dlp's `--progress-template` so each tick is one parseable line
pub fn progress_template() -> String {
    format!(
        "download:{PROGRESS_PREFIX} %(progress.status)s %(progress.downloaded_bytes)s \
         %(progress.total_bytes)s %(progress.total_bytes_estimate)s \
         %(progress.speed)s %(progress.eta)s"
    )
}

/// Parses one stdout line produced by [`progress_template`].
///
/// yt-dlp prints `NA` for fields it does not know; those become `None`.
/// Lines that are not ours, or that carry another status, yield `None`.
pub fn parse_progress_from_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    let mut fields = rest.split_whitespace();

    let status = match fields.next()? {
        "downloading" => ProgressStatus::Downloading,
        "finished" => ProgressStatus::Finished,
        _ => return None,
    };
    let mut number = || fields.next().and_then(|f| f.parse::<f64>().ok());

    let mut event = ProgressEvent::downloading(number().unwrap_or(0.0));
    event.status = status;
    event.total_bytes = number();
    event.total_bytes_estimate = number();
    event.speed = number();
    event.eta = number();
    Some(event)
}

/// Percentage done, from the exact total, else the estimate, else 0.
pub fn percentage(event: &ProgressEvent) -> f64 {
    let known = |v: Option<f64>| v.filter(|t| *t > 0.0);
    match known(event.total_bytes).or(known(event.total_bytes_estimate)) {
        Some(total) => event.downloaded_bytes / total * 100.0,
        None => 0.0,
    }
}

pub fn format_speed(bytes_per_sec: f64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    if bytes_per_sec > MIB {
        format!("{:.2} MiB/s", bytes_per_sec / MIB)
    } else if bytes_per_sec > KIB {
        format!("{:.2} KiB/s", bytes_per_sec / KIB)
    } else {
        format!("{bytes_per_sec:.2} B/s")
    }
}

pub fn format_eta(seconds: f64) -> String {
    format!("{}s", seconds.round() as u64)
}

/// Status line and bar value (0..=100) for one progress event.
pub fn status_line(t: &Strings, event: &ProgressEvent) -> (String, f32) {
    match event.status {
        ProgressStatus::Finished => (
            format!("{} 100% - {}", t.download_progress, t.progress_finalizing),
            100.0,
        ),
        ProgressStatus::Downloading => {
            let pct = percentage(event);
            let mut line = format!("{} {pct:.1}%", t.download_progress);
            if let Some(speed) = event.speed.filter(|s| *s > 0.0) {
                line.push_str(&format!(" | {} {}", t.download_speed, format_speed(speed)));
            }
            if let Some(eta) = event.eta.filter(|e| *e > 0.0) {
                line.push_str(&format!(" | {} {}", t.download_eta, format_eta(eta)));
            }
            (line, pct.clamp(0.0, 100.0) as f32)
        }
    }
}
