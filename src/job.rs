//! One download from start to finish: picking format selectors, the single
//! fallback retry for video, and telling the UI how it went.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::downloader::{MediaFetcher, ProgressSink};
use crate::model::{DownloadMode, DownloadRequest, JobEvent};

/// Capped-resolution selector tried first for video
pub const VIDEO_PRIMARY: &str = "best[height<=1080]/best";
/// Low-resolution selector tried once after any video failure
pub const VIDEO_FALLBACK: &str = "worst[height>=480]/worst";
pub const AUDIO: &str = "bestaudio/best";

/// Selectors to try, in order. Only video gets a second chance, and the
/// fallback is used whatever the reason for the first failure was.
pub fn format_attempts(mode: DownloadMode) -> &'static [&'static str] {
    match mode {
        DownloadMode::Video => &[VIDEO_PRIMARY, VIDEO_FALLBACK],
        DownloadMode::Audio => &[AUDIO],
    }
}

/// Runs the download and reports every step on `events`. The last event
/// sent is always [`JobEvent::Completed`] or [`JobEvent::Failed`].
pub async fn run<F: MediaFetcher>(
    fetcher: &F,
    request: DownloadRequest,
    events: UnboundedSender<JobEvent>,
) {
    let sink = ProgressSink::new(events.clone());
    let mut last_error = String::new();
    let mut attempts = 0;

    for (i, selector) in format_attempts(request.mode).iter().enumerate() {
        if i > 0 {
            info!(selector, "retrying with fallback format");
            let _ = events.send(JobEvent::Retrying);
        }
        attempts += 1;

        match fetcher.fetch(&request, selector, &sink).await {
            Ok(()) => {
                info!(url = %request.url, attempts, "download completed");
                let _ = events.send(JobEvent::Completed);
                return;
            }
            Err(e) => {
                warn!(url = %request.url, selector, error = %e, "download attempt failed");
                last_error = e.to_string();
            }
        }
    }

    let message = first_line(&last_error).to_owned();
    warn!(url = %request.url, attempts, %message, "download failed");
    let _ = events.send(JobEvent::Failed { message });
}

pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::model::ProgressEvent;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tokio::sync::mpsc::unbounded_channel;

    /// Fails the first `failures` calls, then succeeds; records selectors.
    struct Scripted {
        failures: usize,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn failing(failures: usize) -> Self {
            Self {
                failures,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn selectors(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl MediaFetcher for Scripted {
        async fn fetch(
            &self,
            _request: &DownloadRequest,
            selector: &str,
            progress: &ProgressSink,
        ) -> Result<(), FetchError> {
            let call = {
                let mut seen = self.seen.lock().unwrap();
                seen.push(selector.to_string());
                seen.len()
            };
            progress.report(ProgressEvent::downloading(10.0));
            if call <= self.failures {
                Err(FetchError::Exited {
                    message: format!("ERROR: attempt {call} failed\nTraceback follows"),
                })
            } else {
                Ok(())
            }
        }
    }

    fn request(mode: DownloadMode) -> DownloadRequest {
        DownloadRequest {
            url: "https://youtu.be/abc".to_string(),
            destination: PathBuf::from("/tmp"),
            mode,
        }
    }

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<JobEvent>) -> Vec<JobEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    #[tokio::test]
    async fn video_success_needs_one_attempt() {
        let fetcher = Scripted::failing(0);
        let (tx, mut rx) = unbounded_channel();

        run(&fetcher, request(DownloadMode::Video), tx).await;

        assert_eq!(fetcher.selectors(), vec![VIDEO_PRIMARY]);
        assert_eq!(drain(&mut rx).last(), Some(&JobEvent::Completed));
    }

    #[tokio::test]
    async fn video_failure_retries_once_with_fallback() {
        let fetcher = Scripted::failing(1);
        let (tx, mut rx) = unbounded_channel();

        run(&fetcher, request(DownloadMode::Video), tx).await;

        assert_eq!(fetcher.selectors(), vec![VIDEO_PRIMARY, VIDEO_FALLBACK]);
        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                JobEvent::Progress(ProgressEvent::downloading(10.0)),
                JobEvent::Retrying,
                JobEvent::Progress(ProgressEvent::downloading(10.0)),
                JobEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn video_gives_up_after_the_retry() {
        let fetcher = Scripted::failing(usize::MAX);
        let (tx, mut rx) = unbounded_channel();

        run(&fetcher, request(DownloadMode::Video), tx).await;

        assert_eq!(fetcher.selectors(), vec![VIDEO_PRIMARY, VIDEO_FALLBACK]);
        let events = drain(&mut rx);
        assert_eq!(events.iter().filter(|e| **e == JobEvent::Retrying).count(), 1);
        assert_eq!(
            events.last(),
            Some(&JobEvent::Failed {
                message: "ERROR: attempt 2 failed".to_string()
            })
        );
    }

    #[tokio::test]
    async fn audio_failure_is_reported_without_retry() {
        let fetcher = Scripted::failing(usize::MAX);
        let (tx, mut rx) = unbounded_channel();

        run(&fetcher, request(DownloadMode::Audio), tx).await;

        assert_eq!(fetcher.selectors(), vec![AUDIO]);
        let events = drain(&mut rx);
        assert!(!events.contains(&JobEvent::Retrying));
        assert_eq!(
            events.last(),
            Some(&JobEvent::Failed {
                message: "ERROR: attempt 1 failed".to_string()
            })
        );
    }

    #[test]
    fn first_line_of_multiline_errors() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }
}
