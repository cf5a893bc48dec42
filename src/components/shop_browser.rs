//! Host screen: species list on the left, detail panel on the right.

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use super::pokemon_detail::{PokemonDetail, PokemonDetailProps};
use super::style::{
    DetailStyle, ACCENT_GOLD, ACCENT_TEAL, BG_BASE, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use super::Component;
use crate::action::Action;
use crate::pokemon::PokemonRef;
use crate::state::AppState;

const LIST_WIDTH: u16 = 24;

pub struct ShopBrowserProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct ShopBrowser {
    list: SelectList,
    detail: PokemonDetail,
    status_bar: StatusBar,
    style: DetailStyle,
}

impl Default for ShopBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopBrowser {
    pub fn new() -> Self {
        Self {
            list: SelectList::new(),
            detail: PokemonDetail::new(),
            status_bar: StatusBar::new(),
            style: DetailStyle::default(),
        }
    }

    pub fn detail(&self) -> &PokemonDetail {
        &self.detail
    }
}

impl Component<Action> for ShopBrowser {
    type Props<'a> = ShopBrowserProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            KeyCode::Char('s') => vec![Action::OverrideToggleShiny],
            KeyCode::Char('e') => vec![Action::OverrideCycleEmotion],
            KeyCode::Char('c') => vec![Action::OverrideClear],
            KeyCode::Char('a') => vec![Action::PreferencesToggleAntialiasing],
            KeyCode::Char('r') => vec![Action::PopularItemsFetch],
            KeyCode::Char('j' | 'k' | '[' | ']') => {
                let Some(pokemon) = state.focus.as_ref() else {
                    return Vec::new();
                };
                self.detail
                    .handle_event(event, detail_props(state, pokemon, &self.style, true))
                    .into_iter()
                    .collect()
            }
            _ => {
                let items = species_items(state);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::SpeciesSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ShopBrowserProps<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let [body, footer] =
            Layout::vertical([Constraint::Min(10), Constraint::Length(3)]).areas(area);
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Length(LIST_WIDTH), Constraint::Min(30)]).areas(body);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("SHOP")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_TEAL));
        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);
        let items = species_items(state);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::SpeciesSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);

        match state.focus.as_ref() {
            Some(pokemon) => self.detail.render(
                frame,
                detail_area,
                detail_props(state, pokemon, &self.style, props.is_focused),
            ),
            None => frame.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.style.border),
                detail_area,
            ),
        }

        render_footer(frame, footer, state, &mut self.status_bar);
    }
}

fn species_items(state: &AppState) -> Vec<Line<'static>> {
    state.species_names().into_iter().map(Line::from).collect()
}

fn detail_props<'a>(
    state: &'a AppState,
    pokemon: &'a PokemonRef,
    style: &'a DetailStyle,
    is_focused: bool,
) -> PokemonDetailProps<'a> {
    PokemonDetailProps {
        pokemon,
        shiny: state.shiny_override,
        emotion: state.emotion_override,
        block: None,
        catalog: &state.catalog,
        catalog_revision: state.catalog_revision,
        translations: &state.translations,
        preferences: &state.preferences,
        portrait_base: &state.session.portrait_base,
        portrait: state.current_portrait(),
        popular_items: Some(state.popular_items_for(pokemon.species())),
        style,
        is_focused,
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn status_text(state: &AppState) -> String {
    if let Some(message) = state.status.as_ref() {
        return message.clone();
    }
    if state.popular_loading {
        "Refreshing popular items...".to_string()
    } else if state.portrait.is_loading() {
        "Loading portrait...".to_string()
    } else {
        String::new()
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = status_text(state);
    let status_items = [StatusBarItem::span(Span::styled(
        status.as_str(),
        Style::default().fg(ACCENT_GOLD),
    ))];
    let left_hints = [
        StatusBarHint::new("↑/↓", "Species"),
        StatusBarHint::new("s", "Shiny"),
        StatusBarHint::new("e", "Emotion"),
        StatusBarHint::new("c", "Clear"),
        StatusBarHint::new("a", "Antialias"),
        StatusBarHint::new("r", "Refresh"),
    ];
    let center_hints = [
        StatusBarHint::new("j/k", "Scroll"),
        StatusBarHint::new("[ ]", "Tier"),
        StatusBarHint::new("q", "Quit"),
    ];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pkm;
    use tui_dispatch::testing::*;

    fn render(browser: &mut ShopBrowser, state: &AppState) -> String {
        let mut harness = RenderHarness::new(140, 44);
        harness.render_to_string_plain(|frame| {
            browser.render(
                frame,
                frame.area(),
                ShopBrowserProps {
                    state,
                    is_focused: true,
                },
            )
        })
    }

    fn press(browser: &mut ShopBrowser, state: &AppState, c: &str) -> Vec<Action> {
        browser
            .handle_event(
                &EventKind::Key(key(c)),
                ShopBrowserProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn renders_list_detail_and_footer() {
        let state = AppState::default();
        let output = render(&mut ShopBrowser::new(), &state);
        assert!(output.contains("SHOP"));
        assert!(output.contains("Bulbasaur"));
        assert!(output.contains("Mewtwo"));
        assert!(output.contains("Shiny"));
    }

    #[test]
    fn status_message_wins_over_loading_hints() {
        let mut state = AppState::default();
        state.popular_loading = true;
        assert_eq!(status_text(&state), "Refreshing popular items...");
        state.status = Some("popular items: offline".into());
        assert_eq!(status_text(&state), "popular items: offline");
    }

    #[test]
    fn letter_keys_map_to_actions() {
        let state = AppState::default();
        let mut browser = ShopBrowser::new();
        press(&mut browser, &state, "s").assert_first(Action::OverrideToggleShiny);
        press(&mut browser, &state, "e").assert_first(Action::OverrideCycleEmotion);
        press(&mut browser, &state, "c").assert_first(Action::OverrideClear);
        press(&mut browser, &state, "a").assert_first(Action::PreferencesToggleAntialiasing);
        press(&mut browser, &state, "r").assert_first(Action::PopularItemsFetch);
        press(&mut browser, &state, "q").assert_first(Action::Quit);
    }

    #[test]
    fn brackets_reach_the_tooltip() {
        let mut state = AppState::default();
        state.focus_species(Pkm::from("PIKACHU"));
        let mut browser = ShopBrowser::new();
        render(&mut browser, &state);

        press(&mut browser, &state, "]").assert_first(Action::Render);
        assert_eq!(browser.detail().tooltip().highlight(), Some(2));
    }

    #[test]
    fn selecting_another_species_resets_the_tooltip() {
        let mut state = AppState::default();
        state.focus_species(Pkm::from("PIKACHU"));
        let mut browser = ShopBrowser::new();
        render(&mut browser, &state);
        press(&mut browser, &state, "]").assert_first(Action::Render);
        assert_eq!(browser.detail().tooltip().highlight(), Some(2));

        let snorlax = state
            .catalog
            .position(&Pkm::from("SNORLAX"))
            .expect("snorlax in catalog");
        crate::reducer::reducer(&mut state, Action::SpeciesSelect(snorlax));
        render(&mut browser, &state);
        assert_eq!(browser.detail().tooltip().highlight(), None);
    }

    #[test]
    fn unfocused_browser_ignores_keys() {
        let state = AppState::default();
        let mut browser = ShopBrowser::new();
        let actions: Vec<_> = browser
            .handle_event(
                &EventKind::Key(key("q")),
                ShopBrowserProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
