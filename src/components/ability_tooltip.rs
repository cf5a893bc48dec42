use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_dispatch::EventKind;

use super::description_text::{description_text, tier_count, wrapped_height};
use super::detail_view::AbilityView;
use super::style::DetailStyle;
use super::Component;
use crate::action::Action;

pub struct AbilityTooltipProps<'a> {
    pub ability: &'a AbilityView,
    pub style: &'a DetailStyle,
    pub is_focused: bool,
}

/// Ability name and description. Keeps its own scroll offset and tier
/// highlight, so hosts re-key it when the creature changes.
#[derive(Debug, Default)]
pub struct AbilityTooltip {
    scroll: u16,
    max_scroll: u16,
    highlight: Option<usize>,
}

impl AbilityTooltip {
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Tier highlighted by the user, if they moved it away from the star level.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    fn active_tier(&self, stars: u8) -> usize {
        self.highlight
            .unwrap_or_else(|| usize::from(stars.saturating_sub(1)))
    }

    fn move_tier(&mut self, ability: &AbilityView, forward: bool) -> bool {
        let tiers = tier_count(&ability.description);
        if tiers == 0 {
            return false;
        }
        let current = self.active_tier(ability.stars).min(tiers - 1);
        let next = if forward {
            (current + 1).min(tiers - 1)
        } else {
            current.saturating_sub(1)
        };
        if Some(next) == self.highlight || (self.highlight.is_none() && next == current) {
            return false;
        }
        self.highlight = Some(next);
        true
    }
}

impl Component<Action> for AbilityTooltip {
    type Props<'a> = AbilityTooltipProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let changed = match key.code {
            KeyCode::Char('j') if self.scroll < self.max_scroll => {
                self.scroll += 1;
                true
            }
            KeyCode::Char('k') if self.scroll > 0 => {
                self.scroll -= 1;
                true
            }
            KeyCode::Char(']') => self.move_tier(props.ability, true),
            KeyCode::Char('[') => self.move_tier(props.ability, false),
            _ => false,
        };
        changed.then_some(Action::Render)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: AbilityTooltipProps<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(props.style.border)
            .title(Span::styled(
                format!(" {} ", props.ability.name),
                props.style.heading,
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = description_text(&props.ability.description, props.style, self.highlight);
        let content_height = wrapped_height(&text, inner.width);
        self.max_scroll = content_height.saturating_sub(inner.height);
        self.scroll = self.scroll.min(self.max_scroll);

        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, inner);
    }
}
