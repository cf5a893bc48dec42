//! Palette and the per-section style table of the detail panel.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_PANEL_ALT: Color = Color::Rgb(26, 40, 58);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_VIOLET: Color = Color::Rgb(164, 132, 236);

/// Panel sections in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailSection {
    Portrait,
    Entry,
    Types,
    PopularItems,
    Stats,
    Dish,
    Passive,
    Ult,
}

impl DetailSection {
    pub const ALL: [DetailSection; 8] = [
        DetailSection::Portrait,
        DetailSection::Entry,
        DetailSection::Types,
        DetailSection::PopularItems,
        DetailSection::Stats,
        DetailSection::Dish,
        DetailSection::Passive,
        DetailSection::Ult,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailStyle {
    sections: [Style; 8],
    pub border: Style,
    pub heading: Style,
    pub text: Style,
    pub muted: Style,
    pub star_filled: Style,
    pub star_empty: Style,
    pub stat_label: Style,
    pub stat_value: Style,
    pub keyword: Style,
    pub tier: Style,
    pub tier_active: Style,
    pub tier_scaled: Style,
}

impl DetailStyle {
    pub fn section(&self, section: DetailSection) -> Style {
        self.sections[section.slot()]
    }

    pub fn with_section(mut self, section: DetailSection, style: Style) -> Self {
        self.sections[section.slot()] = style;
        self
    }
}

impl Default for DetailStyle {
    fn default() -> Self {
        let panel = Style::default().bg(BG_PANEL).fg(TEXT_MAIN);
        let alt = Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN);
        Self {
            sections: [panel, panel, panel, panel, alt, panel, alt, panel],
            border: Style::default().fg(TEXT_DIM),
            heading: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(TEXT_MAIN),
            muted: Style::default().fg(TEXT_DIM),
            star_filled: Style::default().fg(ACCENT_GOLD),
            star_empty: Style::default().fg(TEXT_DIM),
            stat_label: Style::default().fg(TEXT_DIM),
            stat_value: Style::default()
                .fg(TEXT_MAIN)
                .add_modifier(Modifier::BOLD),
            keyword: Style::default().fg(ACCENT_VIOLET),
            tier: Style::default().fg(TEXT_DIM),
            tier_active: Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
            tier_scaled: Style::default().add_modifier(Modifier::ITALIC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_overrides_only_touch_their_slot() {
        let custom = Style::default().bg(Color::Red);
        let style = DetailStyle::default().with_section(DetailSection::Dish, custom);
        assert_eq!(style.section(DetailSection::Dish), custom);
        assert_eq!(
            style.section(DetailSection::Passive),
            DetailStyle::default().section(DetailSection::Passive)
        );
    }
}
