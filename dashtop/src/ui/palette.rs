//! Light/dark color sets. Every panel draws through a `Palette` so the theme
//! flag flips the whole frame at once.

use ratatui::style::{Color, Modifier, Style};

use crate::gauge::ColorTier;

// Gauge fills stay the same in both modes
pub const TIER_A: Color = Color::Rgb(59, 130, 246);
pub const TIER_B: Color = Color::Rgb(99, 102, 241);
pub const TIER_C: Color = Color::Rgb(79, 70, 229);

pub const GREEN: Color = Color::Rgb(22, 163, 74);
pub const BLUE: Color = Color::Rgb(37, 99, 235);
pub const YELLOW: Color = Color::Rgb(202, 138, 4);
pub const RED: Color = Color::Rgb(220, 38, 38);
pub const GRAY: Color = Color::Rgb(107, 114, 128);
pub const PURPLE: Color = Color::Rgb(147, 51, 234);
pub const ORANGE: Color = Color::Rgb(234, 88, 12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: bool,
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub gauge_track: Color,
    pub error: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            dark: false,
            bg: Color::Rgb(255, 255, 255),
            fg: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(209, 213, 219),
            accent: Color::Rgb(37, 99, 235),
            highlight_bg: Color::Rgb(229, 231, 235),
            gauge_track: Color::Rgb(241, 245, 249),
            error: Color::Rgb(239, 68, 68),
        }
    }

    pub fn dark() -> Self {
        Self {
            dark: true,
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(243, 244, 246),
            muted: Color::Rgb(156, 163, 175),
            border: Color::Rgb(55, 65, 81),
            accent: Color::Rgb(96, 165, 250),
            highlight_bg: Color::Rgb(55, 65, 81),
            gauge_track: Color::Rgb(75, 85, 99),
            error: Color::Rgb(248, 113, 113),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn tier(&self, tier: ColorTier) -> Color {
        match tier {
            ColorTier::A => TIER_A,
            ColorTier::B => TIER_B,
            ColorTier::C => TIER_C,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn header_row(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}
