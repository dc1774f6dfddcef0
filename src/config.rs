//! Persisted user settings.
//!
//! A small JSON file under the per-user config directory. Reading never
//! fails (defaults are used instead) and writing is best effort, since the
//! settings are purely cosmetic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::i18n::Language;
use crate::theme::Theme;

const APP_DIR: &str = "yt-dlp-gui";
const CONFIG_FILE: &str = "config.json";
const COOKIES_FILE: &str = "cookies.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub theme: Theme,
}

/// Location of the settings file and the cookie file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
    /// Always under the per-user config dir, never the temp fallback
    cookies: Option<PathBuf>,
}

impl ConfigStore {
    /// Uses `<config dir>/yt-dlp-gui`, falling back to the temp directory
    /// when the config directory is unknown or cannot be created.
    pub fn locate() -> Self {
        Self::locate_in(dirs::config_dir())
    }

    /// [`ConfigStore::locate`] with an explicit per-user config dir.
    pub fn locate_in(base: Option<PathBuf>) -> Self {
        let Some(app_dir) = base.map(|d| d.join(APP_DIR)) else {
            warn!("no per-user config dir, using temp dir and no cookies");
            return Self {
                dir: std::env::temp_dir(),
                cookies: None,
            };
        };
        let cookies = Some(app_dir.join(COOKIES_FILE));
        let dir = match fs::create_dir_all(&app_dir) {
            Ok(()) => app_dir,
            Err(e) => {
                warn!(dir = %app_dir.display(), error = %e, "cannot create config dir, using temp dir");
                std::env::temp_dir()
            }
        };
        Self { dir, cookies }
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            cookies: Some(dir.join(COOKIES_FILE)),
            dir,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Cookie jar handed to yt-dlp when present
    pub fn cookies_path(&self) -> Option<&Path> {
        self.cookies.as_deref()
    }

    pub fn load(&self) -> Settings {
        read_settings(&self.config_path()).unwrap_or_else(|reason| {
            debug!(%reason, "using default settings");
            Settings::default()
        })
    }

    /// Merges the given fields into the stored settings and writes them back.
    pub fn save(&self, language: Option<Language>, theme: Option<Theme>) {
        let mut settings = self.load();
        if let Some(language) = language {
            settings.language = language;
        }
        if let Some(theme) = theme {
            settings.theme = theme;
        }

        let path = self.config_path();
        let result = serde_json::to_string_pretty(&settings)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&path, json).map_err(|e| e.to_string()));
        match result {
            Ok(()) => debug!(path = %path.display(), ?settings, "settings saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not save settings"),
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&contents).map_err(|e| e.to_string())
}
