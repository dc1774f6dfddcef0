//! Interface strings for every supported language.
//!
//! The tables live in `assets/locales/<code>.json` and are embedded into the
//! binary, then parsed once on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

#[derive(RustEmbed)]
#[folder = "assets/locales/"]
struct Locales;

/// Title of the language menu, identical in every language
pub const LANGUAGE_MENU: &str = "Language / Dil / اللغة";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
    Ar,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Tr, Language::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
            Language::Ar => "ar",
        }
    }

    /// Name of the language written in that language, for the menu
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
            Language::Ar => "العربية",
        }
    }

    pub fn strings(self) -> &'static Strings {
        &TABLES[&self]
    }
}

/// One language's worth of interface text
#[derive(Debug, Clone, Deserialize)]
pub struct Strings {
    pub title: String,
    pub link_label: String,
    pub folder_button: String,
    pub path_label_default: String,
    pub path_label_selected: String,
    pub download_button: String,
    pub message_downloading: String,
    pub message_success_title: String,
    pub message_success_body: String,
    pub error_title: String,
    pub error_no_link: String,
    pub error_no_folder: String,
    pub error_download: String,
    pub theme_menu: String,
    pub light_theme: String,
    pub dark_theme: String,
    pub download_progress: String,
    pub download_speed: String,
    pub download_eta: String,
    pub download_type_label: String,
    pub type_video: String,
    pub type_audio: String,
    pub progress_finalizing: String,
    pub progress_completed: String,
    pub progress_retrying: String,
    pub progress_failed: String,
    pub ok_button: String,
}

static TABLES: Lazy<HashMap<Language, Strings>> = Lazy::new(|| {
    Language::ALL
        .into_iter()
        .map(|lang| {
            let table = load_table(lang.code())
                .unwrap_or_else(|err| panic!("embedded locale {} is broken: {err}", lang.code()));
            (lang, table)
        })
        .collect()
});

fn load_table(code: &str) -> Result<Strings, String> {
    let file = Locales::get(&format!("{code}.json")).ok_or("file not embedded")?;
    serde_json::from_slice(&file.data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_complete_table() {
        for lang in Language::ALL {
            let t = load_table(lang.code()).expect("table parses");
            assert!(!t.title.is_empty(), "{} has an empty title", lang.code());
            assert!(!t.error_download.is_empty());
        }
    }

    #[test]
    fn lookup_returns_the_matching_table() {
        assert_eq!(Language::En.strings().download_button, "Download");
        assert_eq!(Language::Tr.strings().download_button, "İndir");
        assert_eq!(Language::Ar.strings().theme_menu, "السمة");
    }

    #[test]
    fn codes_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Tr).unwrap(), "\"tr\"");
        let lang: Language = serde_json::from_str("\"ar\"").unwrap();
        assert_eq!(lang, Language::Ar);
    }
}
