//! Everything the window shows, and how it changes in response to the user
//! and to download events. Kept free of egui so it can be driven from tests.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};
use tracing::{debug, warn};

use crate::config::{ConfigStore, Settings};
use crate::error::ValidationError;
use crate::i18n::{Language, Strings};
use crate::model::{DownloadMode, DownloadRequest, JobEvent};
use crate::progress::status_line;
use crate::theme::Theme;

/// How long the final progress line stays up after a download ends
pub const CLEAR_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A dialog waiting to be dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

pub struct AppState {
    pub settings: Settings,
    pub url: String,
    pub folder: Option<PathBuf>,
    pub mode: DownloadMode,
    /// Trigger is disabled while this is set
    pub busy: bool,
    /// Bar value, 0..=100
    pub progress: f32,
    pub progress_line: String,
    pub message: String,
    pub notice: Option<Notice>,
    clear_at: Option<Instant>,
    events: Option<UnboundedReceiver<JobEvent>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            url: String::new(),
            folder: None,
            mode: DownloadMode::default(),
            busy: false,
            progress: 0.0,
            progress_line: String::new(),
            message: String::new(),
            notice: None,
            clear_at: None,
            events: None,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        self.settings.language.strings()
    }

    pub fn path_label(&self) -> String {
        let t = self.strings();
        match &self.folder {
            Some(folder) => format!("{} {}", t.path_label_selected, folder.display()),
            None => t.path_label_default.clone(),
        }
    }

    pub fn select_folder(&mut self, folder: PathBuf) {
        self.folder = Some(folder);
        self.message.clear();
    }

    /// Validates the inputs and, when they are usable, marks the app busy and
    /// hands back the request to run. On a validation error nothing but the
    /// notice changes.
    pub fn begin_download(&mut self) -> Result<DownloadRequest, ValidationError> {
        let t = self.strings();
        let url = self.url.trim();

        let result = if url.is_empty() {
            Err(ValidationError::NoLink)
        } else {
            match &self.folder {
                None => Err(ValidationError::NoFolder),
                Some(folder) => Ok(DownloadRequest {
                    url: url.to_owned(),
                    destination: folder.clone(),
                    mode: self.mode,
                }),
            }
        };

        match &result {
            Ok(request) => {
                debug!(url = %request.url, mode = ?request.mode, "starting download");
                self.busy = true;
                self.clear_at = None;
                self.message = t.message_downloading.clone();
                self.progress_line = t.message_downloading.clone();
                self.progress = 0.0;
            }
            Err(e) => {
                let body = match e {
                    ValidationError::NoLink => &t.error_no_link,
                    ValidationError::NoFolder => &t.error_no_folder,
                };
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    title: t.error_title.clone(),
                    body: body.clone(),
                });
            }
        }
        result
    }

    /// Starts listening to a freshly spawned job
    pub fn attach(&mut self, events: UnboundedReceiver<JobEvent>) {
        self.events = Some(events);
    }

    /// Applies every event that has arrived, in order, then runs timers.
    pub fn poll(&mut self, now: Instant) {
        if let Some(mut rx) = self.events.take() {
            loop {
                match rx.try_recv() {
                    Ok(event) => {
                        let done = event.is_terminal();
                        self.apply(event, now);
                        if done {
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => {
                        self.events = Some(rx);
                        break;
                    }
                    Err(TryRecvError::Disconnected) => {
                        warn!("download job ended without reporting");
                        self.busy = false;
                        break;
                    }
                }
            }
        }
        self.tick(now);
    }

    pub fn apply(&mut self, event: JobEvent, now: Instant) {
        let t = self.strings();
        match event {
            JobEvent::Progress(ev) => {
                let (line, value) = status_line(t, &ev);
                self.progress_line = line;
                self.progress = value;
            }
            JobEvent::Retrying => {
                self.progress_line = t.progress_retrying.clone();
                self.progress = 0.0;
            }
            JobEvent::Completed => {
                self.progress_line = t.progress_completed.clone();
                self.progress = 100.0;
                self.notice = Some(Notice {
                    kind: NoticeKind::Info,
                    title: t.message_success_title.clone(),
                    body: t.message_success_body.clone(),
                });
                self.finish(now);
            }
            JobEvent::Failed { message } => {
                self.progress_line = t.progress_failed.clone();
                self.progress = 0.0;
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    title: t.error_title.clone(),
                    body: format!("{}{}", t.error_download, message),
                });
                self.finish(now);
            }
        }
    }

    fn finish(&mut self, now: Instant) {
        self.busy = false;
        self.message.clear();
        self.clear_at = Some(now + CLEAR_DELAY);
    }

    /// Clears the progress line once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.clear_at.is_some_and(|at| now >= at) {
            self.clear_at = None;
            self.progress_line.clear();
            self.progress = 0.0;
        }
    }

    pub fn set_language(&mut self, language: Language, store: &ConfigStore) {
        self.settings.language = language;
        self.message.clear();
        store.save(Some(language), None);
    }

    pub fn set_theme(&mut self, theme: Theme, store: &ConfigStore) {
        self.settings.theme = theme;
        store.save(None, Some(theme));
    }
}
