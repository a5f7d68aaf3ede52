//! Colours for the light and dark themes

use crate::state::{HeaderStyle, Theme};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub header_background: Color,
    pub raised_header_background: Color,
    pub error: Color,
    pub success: Color,
    pub status_background: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::Gray,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                header_background: Color::Black,
                raised_header_background: Color::Rgb(24, 38, 48),
                error: Color::LightRed,
                success: Color::LightGreen,
                status_background: Color::DarkGray,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                header_background: Color::White,
                raised_header_background: Color::Rgb(226, 236, 242),
                error: Color::Red,
                success: Color::Green,
                status_background: Color::Gray,
            },
        }
    }

    pub fn header_background(&self, style: HeaderStyle) -> Color {
        match style {
            HeaderStyle::Resting => self.header_background,
            HeaderStyle::Raised => self.raised_header_background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_differ() {
        assert_ne!(Palette::for_theme(Theme::Dark), Palette::for_theme(Theme::Light));
    }

    #[test]
    fn test_raised_header_changes_background() {
        let palette = Palette::for_theme(Theme::Dark);
        assert_ne!(
            palette.header_background(HeaderStyle::Resting),
            palette.header_background(HeaderStyle::Raised)
        );
    }
}
