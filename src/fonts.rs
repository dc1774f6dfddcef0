//! Extra font coverage for scripts egui's bundled fonts lack (Arabic).

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use rust_embed::RustEmbed;
use tracing::warn;

#[derive(RustEmbed)]
#[folder = "assets/fonts/"]
struct Fonts;

const FALLBACK_FILE: &str = "DejaVuSans.ttf";
const FALLBACK_ID: &str = "dejavu-sans";

/// egui's default fonts with DejaVu Sans appended as the last fallback of
/// every family, or `None` if the font is not embedded.
pub fn definitions() -> Option<FontDefinitions> {
    let file = Fonts::get(FALLBACK_FILE)?;
    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        FALLBACK_ID.to_owned(),
        FontData::from_owned(file.data.into_owned()),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FALLBACK_ID.to_owned());
    }
    Some(fonts)
}

/// Takes effect from the next frame.
pub fn install(ctx: &egui::Context) {
    match definitions() {
        Some(fonts) => ctx.set_fonts(fonts),
        None => warn!(file = FALLBACK_FILE, "fallback font not embedded, Arabic will not render"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::FontId;

    fn has_glyph(ctx: &egui::Context, c: char) -> bool {
        ctx.fonts(|f| f.has_glyph(&FontId::proportional(14.0), c))
    }

    #[test]
    fn arabic_renders_once_installed() {
        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |_| {});
        assert!(!has_glyph(&ctx, 'ت'));

        install(&ctx);
        let _ = ctx.run(Default::default(), |_| {});
        assert!(has_glyph(&ctx, 'ت'));
        assert!(has_glyph(&ctx, 'ل'));
        assert!(has_glyph(&ctx, 'a'));
    }

    #[test]
    fn fallback_comes_after_the_default_fonts() {
        let fonts = definitions().expect("font embedded");
        let proportional = &fonts.families[&FontFamily::Proportional];
        assert_eq!(proportional.last().map(String::as_str), Some(FALLBACK_ID));
        assert!(proportional.len() > 1);
    }
}
