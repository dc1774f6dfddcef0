use eframe::egui::{self, Color32, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Colors used across the window for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color32,
    pub fg: Color32,
    pub entry_bg: Color32,
    pub button_bg: Color32,
    pub button_active_bg: Color32,
    /// Progress label, message label and bar fill
    pub accent: Color32,
    pub trough: Color32,
}

const LIGHT: Palette = Palette {
    bg: Color32::from_rgb(0xff, 0xff, 0xff),
    fg: Color32::from_rgb(0x00, 0x00, 0x00),
    entry_bg: Color32::from_rgb(0xff, 0xff, 0xff),
    button_bg: Color32::from_rgb(0xf0, 0xf0, 0xf0),
    button_active_bg: Color32::from_rgb(0xe0, 0xe0, 0xe0),
    accent: Color32::from_rgb(0x00, 0x66, 0xcc),
    trough: Color32::from_rgb(0xf0, 0xf0, 0xf0),
};

const DARK: Palette = Palette {
    bg: Color32::from_rgb(0x2b, 0x2b, 0x2b),
    fg: Color32::from_rgb(0xff, 0xff, 0xff),
    entry_bg: Color32::from_rgb(0x40, 0x40, 0x40),
    button_bg: Color32::from_rgb(0x40, 0x40, 0x40),
    button_active_bg: Color32::from_rgb(0x50, 0x50, 0x50),
    accent: Color32::from_rgb(0x4d, 0xa6, 0xff),
    trough: Color32::from_rgb(0x40, 0x40, 0x40),
};

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    /// egui visuals for this theme, built on the stock light/dark visuals
    pub fn visuals(self) -> Visuals {
        let p = self.palette();
        let mut v = match self {
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        };
        v.override_text_color = Some(p.fg);
        v.panel_fill = p.bg;
        v.window_fill = p.bg;
        v.extreme_bg_color = p.entry_bg;
        v.faint_bg_color = p.trough;
        v.selection.bg_fill = p.accent;
        v.widgets.inactive.weak_bg_fill = p.button_bg;
        v.widgets.inactive.bg_fill = p.button_bg;
        v.widgets.hovered.weak_bg_fill = p.button_active_bg;
        v.widgets.active.weak_bg_fill = p.button_active_bg;
        v
    }

    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_is_the_default() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn visuals_follow_the_palette() {
        let v = Theme::Light.visuals();
        assert!(!v.dark_mode);
        assert_eq!(v.panel_fill, Color32::WHITE);
        assert_eq!(v.override_text_color, Some(Color32::BLACK));

        let v = Theme::Dark.visuals();
        assert!(v.dark_mode);
        assert_eq!(v.selection.bg_fill, Theme::Dark.palette().accent);
    }
}
