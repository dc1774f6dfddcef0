use std::path::PathBuf;

/// What the user wants out of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadMode {
    /// Muxed mp4, capped at 1080p
    #[default]
    Video,
    /// Best audio stream, transcoded to mp3
    Audio,
}

/// A single download the user asked for. Lives only as long as the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Link as typed (trimmed)
    pub url: String,
    /// Folder the output file lands in
    pub destination: PathBuf,
    pub mode: DownloadMode,
}

/// Phase reported by yt-dlp alongside each progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Bytes are still arriving
    Downloading,
    /// The stream is on disk; post-processing may follow
    Finished,
}

/// Snapshot of one running transfer.
///
/// Every size is in bytes, speed in bytes per second and eta in seconds.
/// Fields yt-dlp could not determine are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub downloaded_bytes: f64,
    pub total_bytes: Option<f64>,
    pub total_bytes_estimate: Option<f64>,
    pub speed: Option<f64>,
    pub eta: Option<f64>,
}

impl ProgressEvent {
    pub fn downloading(downloaded_bytes: f64) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes: None,
            total_bytes_estimate: None,
            speed: None,
            eta: None,
        }
    }
}

/// Messages a download job sends back to the UI thread, in order
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Progress(ProgressEvent),
    /// The first attempt failed and the fallback selector is about to run
    Retrying,
    Completed,
    /// Terminal failure; `message` is already cut down to its first line
    Failed { message: String },
}

impl JobEvent {
    /// Whether the job is over after this event
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobEvent::Completed | JobEvent::Failed { .. })
    }
}
