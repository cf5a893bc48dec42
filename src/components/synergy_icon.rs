use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::Component;
use crate::action::Action;
use crate::data::Synergy;

pub struct SynergyIconProps<'a> {
    pub synergy: Synergy,
    pub label: &'a str,
}

/// Coloured two-letter badge followed by the localized synergy name.
#[derive(Default)]
pub struct SynergyIcon;

impl SynergyIcon {
    pub fn badge(synergy: Synergy) -> Span<'static> {
        Span::styled(
            format!(" {} ", synergy.glyph()),
            Style::default()
                .bg(synergy.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
    }

    pub fn spans(synergy: Synergy, label: &str) -> [Span<'static>; 2] {
        [
            Self::badge(synergy),
            Span::styled(format!(" {label}"), Style::default().fg(synergy.color())),
        ]
    }
}

impl Component<Action> for SynergyIcon {
    type Props<'a> = SynergyIconProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: SynergyIconProps<'_>) {
        let line = Line::from(Self::spans(props.synergy, props.label).to_vec());
        frame.render_widget(Paragraph::new(line), area);
    }
}
