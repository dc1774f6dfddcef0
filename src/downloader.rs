use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
    sync::mpsc::UnboundedSender,
};
use tracing::{debug, trace};

use crate::deps::Toolchain;
use crate::error::FetchError;
use crate::model::{DownloadMode, DownloadRequest, JobEvent, ProgressEvent};
use crate::progress::{parse_progress_from_line, progress_template};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const HEADERS: [&str; 3] = [
    "Accept:text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    "Accept-Language:en-us,en;q=0.5",
    "Sec-Fetch-Mode:navigate",
];

/// Where a fetcher reports progress while it runs
#[derive(Clone)]
pub struct ProgressSink(UnboundedSender<JobEvent>);

impl ProgressSink {
    pub fn new(tx: UnboundedSender<JobEvent>) -> Self {
        Self(tx)
    }

    pub fn report(&self, event: ProgressEvent) {
        // The UI may already be gone while the process winds down.
        let _ = self.0.send(JobEvent::Progress(event));
    }
}

/// One attempt at pulling a link down with a given format selector
pub trait MediaFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        request: &DownloadRequest,
        selector: &str,
        progress: &ProgressSink,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;
}

/// Runs the yt-dlp executable and follows its progress output
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    ffmpeg: PathBuf,
    cookies: Option<PathBuf>,
}

impl YtDlp {
    /// `cookies` is only passed on when the file exists at download time.
    pub fn new(tools: &Toolchain, cookies: Option<PathBuf>) -> Self {
        Self {
            program: tools.yt_dlp.clone(),
            ffmpeg: tools.ffmpeg.clone(),
            cookies,
        }
    }

    pub fn args(&self, request: &DownloadRequest, selector: &str) -> Vec<String> {
        let template = request.destination.join("%(title)s.%(ext)s");

        let mut args = vec!["-f".to_owned(), selector.to_owned()];
        match request.mode {
            DownloadMode::Video => {
                args.push("--merge-output-format".to_owned());
                args.push("mp4".to_owned());
            }
            DownloadMode::Audio => {
                args.push("-x".to_owned());
                args.push("--audio-format".to_owned());
                args.push("mp3".to_owned());
                args.push("--audio-quality".to_owned());
                args.push("192K".to_owned());
            }
        }

        args.push("--no-check-certificate".to_owned());
        args.push("--user-agent".to_owned());
        args.push(USER_AGENT.to_owned());
        args.push("--extractor-args".to_owned());
        args.push("youtube:player_client=android,web".to_owned());
        for header in HEADERS {
            args.push("--add-header".to_owned());
            args.push(header.to_owned());
        }

        args.push("--ffmpeg-location".to_owned());
        args.push(self.ffmpeg.to_string_lossy().into_owned());
        if let Some(cookies) = self.cookies.as_ref().filter(|c| c.is_file()) {
            args.push("--cookies".to_owned());
            args.push(cookies.to_string_lossy().into_owned());
        }

        args.push("--progress-template".to_owned());
        args.push(progress_template());
        args.push("--newline".to_owned());

        args.push("-o".to_owned());
        args.push(template.to_string_lossy().into_owned());
        args.push(request.url.clone());
        args
    }
}

impl MediaFetcher for YtDlp {
    async fn fetch(
        &self,
        request: &DownloadRequest,
        selector: &str,
        progress: &ProgressSink,
    ) -> Result<(), FetchError> {
        let args = self.args(request, selector);
        debug!(program = %self.program.display(), ?args, "running yt-dlp");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(FetchError::Spawn)?;

        let out = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("yt-dlp stdout not captured"))?;
        let err = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("yt-dlp stderr not captured"))?;

        let stderr_task = tokio::spawn(async move {
            let mut lines = BufReader::new(err).lines();
            let mut collected = Vec::new();
            while let Ok(Some(line)) = lines.next_line().await {
                collected.push(line);
            }
            collected
        });

        let mut lines = BufReader::new(out).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_progress_from_line(&line) {
                Some(event) => progress.report(event),
                None => trace!(%line, "yt-dlp"),
            }
        }

        let status = child.wait().await?;
        let stderr = stderr_task.await.unwrap_or_default();
        if status.success() {
            debug!("yt-dlp finished");
            Ok(())
        } else {
            debug!(code = ?status.code(), "yt-dlp failed");
            Err(FetchError::Exited {
                message: error_text(&stderr, status),
            })
        }
    }
}

/// yt-dlp's `ERROR:` lines, or all of stderr when it printed none.
fn error_text(stderr: &[String], status: ExitStatus) -> String {
    let errors: Vec<&str> = stderr
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("ERROR:"))
        .collect();
    let text = if errors.is_empty() {
        stderr
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        errors.join("\n")
    };
    if text.is_empty() {
        format!("yt-dlp exited with {status}")
    } else {
        text
    }
}
