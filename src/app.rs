//! The window itself: widgets, menus and the glue between clicks, the
//! application state and background download jobs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::{App, Frame, egui};
use egui::{Align2, RichText};
use rfd::FileDialog;
use tokio::{runtime::Runtime, sync::mpsc::unbounded_channel};
use tracing::debug;

use crate::config::ConfigStore;
use crate::downloader::YtDlp;
use crate::fonts;
use crate::i18n::{LANGUAGE_MENU, Language};
use crate::job;
use crate::model::DownloadMode;
use crate::state::{AppState, NoticeKind};
use crate::theme::Theme;

pub struct DownloaderApp {
    state: AppState,
    store: ConfigStore,
    runtime: Runtime,
    fetcher: Arc<YtDlp>,
    /// Language the window title was last set for
    titled: Option<Language>,
}

impl DownloaderApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        state: AppState,
        store: ConfigStore,
        runtime: Runtime,
        fetcher: YtDlp,
    ) -> Self {
        fonts::install(&cc.egui_ctx);
        state.settings.theme.apply(&cc.egui_ctx);
        Self {
            state,
            store,
            runtime,
            fetcher: Arc::new(fetcher),
            titled: None,
        }
    }

    fn start_download(&mut self, ctx: &egui::Context) {
        let request = match self.state.begin_download() {
            Ok(request) => request,
            Err(e) => {
                debug!(reason = %e, "download not started");
                return;
            }
        };

        let (tx, rx) = unbounded_channel();
        self.state.attach(rx);

        let fetcher = Arc::clone(&self.fetcher);
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            job::run(fetcher.as_ref(), request, tx).await;
            ctx.request_repaint();
        });
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        let t = self.state.strings();
        let mut language = None;
        let mut theme = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(LANGUAGE_MENU, |ui| {
                    for lang in Language::ALL {
                        if ui.button(lang.native_name()).clicked() {
                            language = Some(lang);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button(t.theme_menu.as_str(), |ui| {
                    if ui.button(t.light_theme.as_str()).clicked() {
                        theme = Some(Theme::Light);
                        ui.close_menu();
                    }
                    if ui.button(t.dark_theme.as_str()).clicked() {
                        theme = Some(Theme::Dark);
                        ui.close_menu();
                    }
                });
            });
        });

        if let Some(language) = language {
            self.state.set_language(language, &self.store);
        }
        if let Some(theme) = theme {
            self.state.set_theme(theme, &self.store);
            theme.apply(ctx);
        }
    }

    fn form(&mut self, ctx: &egui::Context) {
        let t = self.state.strings();
        let palette = self.state.settings.theme.palette();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(t.link_label.as_str());
                ui.add(egui::TextEdit::singleline(&mut self.state.url).desired_width(f32::INFINITY));
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button(t.folder_button.as_str()).clicked() {
                    let mut dialog = FileDialog::new();
                    if let Some(current) = &self.state.folder {
                        dialog = dialog.set_directory(current);
                    }
                    if let Some(folder) = dialog.pick_folder() {
                        debug!(folder = %folder.display(), "download folder selected");
                        self.state.select_folder(folder);
                    }
                }
                ui.label(self.state.path_label());
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(t.download_type_label.as_str());
                ui.radio_value(&mut self.state.mode, DownloadMode::Video, t.type_video.as_str());
                ui.radio_value(&mut self.state.mode, DownloadMode::Audio, t.type_audio.as_str());
            });
            ui.add_space(15.0);

            let button = egui::Button::new(RichText::new(t.download_button.as_str()).strong().size(15.0))
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add_enabled(!self.state.busy, button).clicked() {
                self.start_download(ctx);
            }
            ui.add_space(8.0);

            ui.add(egui::ProgressBar::new(self.state.progress / 100.0).fill(palette.accent));
            ui.vertical_centered(|ui| {
                ui.colored_label(palette.accent, self.state.progress_line.as_str());
                ui.add_space(8.0);
                ui.colored_label(palette.accent, self.state.message.as_str());
            });
        });
    }

    fn notice(&mut self, ctx: &egui::Context) {
        let t = self.state.strings();
        let Some(notice) = &self.state.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let body = RichText::new(notice.body.as_str());
                match notice.kind {
                    NoticeKind::Error => ui.label(body.color(ui.visuals().error_fg_color)),
                    NoticeKind::Info => ui.label(body),
                };
                ui.vertical_centered(|ui| {
                    if ui.button(t.ok_button.as_str()).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.notice = None;
        }
    }
}

impl App for DownloaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.state.poll(Instant::now());

        if self.titled != Some(self.state.settings.language) {
            let title = self.state.strings().title.clone();
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
            self.titled = Some(self.state.settings.language);
        }

        self.menu_bar(ctx);
        self.form(ctx);
        self.notice(ctx);

        // Progress arrives off-thread and the clear timer needs ticks.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
