use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::style::DetailStyle;
use super::Component;
use crate::action::Action;
use crate::data::ItemId;
use crate::i18n::Translations;

pub const MAX_POPULAR_ITEMS: usize = 3;

pub struct PopularItemsProps<'a> {
    pub items: &'a [ItemId],
    pub translations: &'a Translations,
    pub style: &'a DetailStyle,
}

/// The most picked items for a species; draws nothing when there are none.
#[derive(Default)]
pub struct PopularItems;

impl PopularItems {
    pub fn shown(items: &[ItemId]) -> &[ItemId] {
        &items[..items.len().min(MAX_POPULAR_ITEMS)]
    }

    pub fn height(items: &[ItemId]) -> u16 {
        match Self::shown(items).len() {
            0 => 0,
            // heading plus one row of items
            _ => 2,
        }
    }
}

impl Component<Action> for PopularItems {
    type Props<'a> = PopularItemsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PopularItemsProps<'_>) {
        let items = Self::shown(props.items);
        if items.is_empty() || area.height == 0 {
            return;
        }

        let mut row = Vec::with_capacity(items.len() * 2);
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                row.push(Span::styled(" · ", props.style.muted));
            }
            row.push(Span::styled(
                props.translations.tf("item", item.as_str()),
                props.style.text,
            ));
        }
        let lines = vec![
            Line::from(Span::styled(
                props.translations.t("popular_items").into_owned(),
                props.style.heading,
            )),
            Line::from(row),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn items(ids: &[&str]) -> Vec<ItemId> {
        ids.iter().map(|id| ItemId(id.to_string())).collect()
    }

    #[test]
    fn shows_at_most_three_items() {
        let translations = Translations::builtin_en().expect("en");
        let items = items(&["CHOICE_SPECS", "SHELL_BELL", "POKEMONOMICON", "WIDE_LENS"]);
        let mut render = RenderHarness::new(60, 2);
        let mut component = PopularItems;
        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                PopularItemsProps {
                    items: &items,
                    translations: &translations,
                    style: &DetailStyle::default(),
                },
            );
        });
        assert!(output.contains("Popular items"));
        assert!(output.contains("Choice Specs"));
        assert!(output.contains("Pokemonomicon"));
        assert!(!output.contains("Wide Lens"));
    }

    #[test]
    fn no_items_no_rows() {
        assert_eq!(PopularItems::height(&[]), 0);
        assert_eq!(PopularItems::height(&items(&["LEFTOVERS"])), 2);
    }
}
