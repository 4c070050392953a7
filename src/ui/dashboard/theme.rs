//! Per-variant colours and styles.

use crate::projection::{PALETTE_SIZE, ThreatTone};
use crate::variant::DashboardVariant;
use ratatui::prelude::{Color, Modifier, Style};

/// Category palette shared by every variant.
const CATEGORY_PALETTE: [Color; PALETTE_SIZE] = [
    Color::Rgb(0x3b, 0x82, 0xf6),
    Color::Rgb(0xef, 0x44, 0x44),
    Color::Rgb(0x10, 0xb9, 0x81),
    Color::Rgb(0xf5, 0x9e, 0x0b),
    Color::Rgb(0x8b, 0x5c, 0xf6),
    Color::Rgb(0xec, 0x48, 0x99),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub variant: DashboardVariant,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub background: Color,
    pub danger: Color,
    pub warning: Color,
    pub ok: Color,
}

impl Theme {
    pub fn for_variant(variant: DashboardVariant) -> Self {
        match variant {
            DashboardVariant::Classic => Self {
                variant,
                accent: Color::Rgb(0x3b, 0x82, 0xf6),
                text: Color::White,
                muted: Color::Gray,
                border: Color::Rgb(0x64, 0x74, 0x8b),
                background: Color::Rgb(15, 23, 42),
                danger: Color::Rgb(0xef, 0x44, 0x44),
                warning: Color::Rgb(0xf5, 0x9e, 0x0b),
                ok: Color::Rgb(0x10, 0xb9, 0x81),
            },
            DashboardVariant::Briefing => Self {
                variant,
                accent: Color::Rgb(0xf5, 0x9e, 0x0b),
                text: Color::Rgb(0xf5, 0xf5, 0xf4),
                muted: Color::Rgb(0xa8, 0xa2, 0x9e),
                border: Color::Rgb(0x78, 0x71, 0x6c),
                background: Color::Rgb(28, 25, 23),
                danger: Color::Rgb(0xdc, 0x26, 0x26),
                warning: Color::Rgb(0xea, 0xb3, 0x08),
                ok: Color::Rgb(0x16, 0xa3, 0x4a),
            },
            DashboardVariant::Console => Self {
                variant,
                accent: Color::Rgb(0x22, 0xd3, 0xee),
                text: Color::Rgb(0xa7, 0xf3, 0xd0),
                muted: Color::DarkGray,
                border: Color::Rgb(0x0e, 0x74, 0x90),
                background: Color::Rgb(16, 20, 24),
                danger: Color::LightRed,
                warning: Color::LightYellow,
                ok: Color::LightGreen,
            },
        }
    }

    pub fn tone_color(&self, tone: ThreatTone) -> Color {
        match tone {
            ThreatTone::Red => self.danger,
            ThreatTone::Yellow => self.warning,
            ThreatTone::Green => self.ok,
        }
    }

    pub fn palette_color(&self, index: usize) -> Color {
        CATEGORY_PALETTE[index % PALETTE_SIZE]
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
