use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_dispatch::EventKind;

use super::ability_tooltip::{AbilityTooltip, AbilityTooltipProps};
use super::description_text::{description_text, wrapped_height};
use super::detail_view::{DetailContext, DetailView};
use super::keyed::Keyed;
use super::popular_items::{PopularItems, PopularItemsProps};
use super::style::{DetailSection, DetailStyle};
use super::synergy_icon::SynergyIcon;
use super::Component;
use crate::action::Action;
use crate::config::Preferences;
use crate::data::{Catalog, Emotion, ItemId};
use crate::error::DataError;
use crate::i18n::Translations;
use crate::pokemon::{project_stats, InstanceId, Memo, Pokemon, PokemonRef, StatEntry, StatKey};
use crate::sprite::{self, SpriteData, PORTRAIT_SCALE};
use crate::sprite_backend;

const PORTRAIT_COLS: u16 = 20;
const HEADER_ROWS: u16 = 9;
const KITTY_IMAGE_ID: u32 = 1;

pub struct PokemonDetailProps<'a> {
    pub pokemon: &'a PokemonRef,
    pub shiny: Option<bool>,
    pub emotion: Option<Emotion>,
    /// Replaces the default outer block.
    pub block: Option<Block<'a>>,
    pub catalog: &'a Catalog,
    /// Bumped by the host whenever `catalog` is replaced.
    pub catalog_revision: u32,
    pub translations: &'a Translations,
    pub preferences: &'a Preferences,
    pub portrait_base: &'a str,
    /// Decoded portrait for the current portrait location, if loaded.
    pub portrait: Option<&'a SpriteData>,
    /// Overrides the catalog's popular item table for this species.
    pub popular_items: Option<&'a [ItemId]>,
    pub style: &'a DetailStyle,
    pub is_focused: bool,
}

impl PokemonDetailProps<'_> {
    fn context(&self) -> DetailContext<'_> {
        DetailContext {
            catalog: self.catalog,
            translations: self.translations,
            preferences: self.preferences,
            portrait_base: self.portrait_base,
            shiny: self.shiny,
            emotion: self.emotion,
        }
    }
}

/// Detail panel for one creature in the shop.
#[derive(Default)]
pub struct PokemonDetail {
    resolved: Memo<(PokemonRef, u32), Result<Pokemon, DataError>>,
    stats: Memo<StatKey, [StatEntry; 6]>,
    scaled_portrait: Memo<(String, bool), SpriteData>,
    tooltip: Keyed<InstanceId, AbilityTooltip>,
    last_view: Option<DetailView>,
    showing_sprite: bool,
}

impl PokemonDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// View model from the most recent render, if the creature resolved.
    pub fn view(&self) -> Option<&DetailView> {
        self.last_view.as_ref()
    }

    /// Instance the tooltip state currently belongs to.
    pub fn tooltip_key(&self) -> Option<InstanceId> {
        self.tooltip.key().copied()
    }

    pub fn tooltip(&self) -> &AbilityTooltip {
        self.tooltip.current()
    }

    fn resolve(&mut self, props: &PokemonDetailProps<'_>) -> Result<Pokemon, String> {
        let key = (props.pokemon.clone(), props.catalog_revision);
        match self
            .resolved
            .get_or_compute(&key, |(reference, _)| reference.resolve(props.catalog))
        {
            Ok(pokemon) => Ok(pokemon.clone()),
            Err(err) => Err(err.to_string()),
        }
    }

    fn render_placeholder(&mut self, frame: &mut Frame, area: Rect, props: &PokemonDetailProps<'_>) {
        self.last_view = None;
        self.hide_sprite();
        let lines = vec![
            Line::from(Span::styled(
                props.translations.t("unknown_species").into_owned(),
                props.style.heading,
            )),
            Line::from(Span::styled(
                props.pokemon.species().to_string(),
                props.style.text,
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(props.style.section(DetailSection::Entry)),
            area,
        );
    }

    fn hide_sprite(&mut self) {
        if self.showing_sprite {
            sprite_backend::clear_sprites();
            self.showing_sprite = false;
        }
    }

    fn render_portrait(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        view: &DetailView,
        props: &PokemonDetailProps<'_>,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(view.portrait.border))
            .style(props.style.section(DetailSection::Portrait));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(image) = props.portrait else {
            self.hide_sprite();
            let text = Paragraph::new(Span::styled(view.portrait.path.clone(), props.style.muted))
                .wrap(Wrap { trim: true });
            frame.render_widget(text, inner);
            return;
        };

        let key = (view.portrait.src.clone(), view.portrait.pixelated);
        let scaled = self
            .scaled_portrait
            .get_or_compute(&key, |(_, pixelated)| image.rescaled(PORTRAIT_SCALE, *pixelated));
        let (cols, rows) = sprite::sprite_fit(scaled, inner.width, inner.height);
        let placed = scaled
            .frame(0)
            .and_then(|first| sprite::kitty_sequence(first, cols, rows, KITTY_IMAGE_ID).ok());
        match placed {
            Some(sequence) if cols > 0 && rows > 0 => {
                let x = inner.x + inner.width.saturating_sub(cols) / 2;
                let y = inner.y + inner.height.saturating_sub(rows) / 2;
                sprite_backend::show_sprite(x, y, sequence);
                self.showing_sprite = true;
            }
            _ => self.hide_sprite(),
        }
    }

    fn render_entry(frame: &mut Frame, area: Rect, view: &DetailView, props: &PokemonDetailProps<'_>) {
        let style = props.style;
        let mut stars = Vec::with_capacity(usize::from(view.stars.total()));
        stars.extend((0..view.stars.filled).map(|_| Span::styled("★", style.star_filled)));
        stars.extend((0..view.stars.empty).map(|_| Span::styled("☆", style.star_empty)));

        let lines = vec![
            Line::from(Span::styled(
                view.name.clone(),
                style.text.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                view.rarity_label.clone(),
                Style::default().fg(view.rarity_color),
            )),
            Line::from(stars),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(style.section(DetailSection::Entry)),
            area,
        );
    }

    fn render_types(frame: &mut Frame, area: Rect, view: &DetailView, props: &PokemonDetailProps<'_>) {
        let mut spans = Vec::with_capacity(view.types.len() * 3);
        for (index, (synergy, label)) in view.types.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }
            spans.extend(SynergyIcon::spans(*synergy, label));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .wrap(Wrap { trim: true })
                .style(props.style.section(DetailSection::Types)),
            area,
        );
    }

    fn render_stats(frame: &mut Frame, area: Rect, view: &DetailView, props: &PokemonDetailProps<'_>) {
        let style = props.style;
        frame.render_widget(
            Block::default().style(style.section(DetailSection::Stats)),
            area,
        );
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        for (row, chunk) in view.stats.chunks(3).enumerate() {
            let Some(row_area) = rows.get(row) else {
                break;
            };
            let cells = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(*row_area);
            for (cell, line) in cells.iter().zip(chunk) {
                let text = Line::from(vec![
                    Span::styled(format!("{} ", line.stat.glyph()), style.keyword),
                    Span::styled(format!("{} ", line.label), style.stat_label),
                    Span::styled(line.value.to_string(), style.stat_value),
                ]);
                frame.render_widget(Paragraph::new(text), *cell);
            }
        }
    }
}

impl Component<Action> for PokemonDetail {
    type Props<'a> = PokemonDetailProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let Some(ability) = self.last_view.as_ref().and_then(|view| view.ability.as_ref()) else {
            return None;
        };
        let Some(key) = self.tooltip.key().copied() else {
            return None;
        };
        let actions: Vec<Action> = self
            .tooltip
            .get(&key)
            .handle_event(
                event,
                AbilityTooltipProps {
                    ability,
                    style: props.style,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.into_iter().next()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PokemonDetailProps<'_>) {
        let block = props.block.clone().unwrap_or_else(|| {
            Block::default()
                .borders(Borders::ALL)
                .border_style(props.style.border)
        });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let pokemon = match self.resolve(&props) {
            Ok(pokemon) => pokemon,
            Err(err) => {
                tracing::debug!(species = %props.pokemon.species(), %err, "detail placeholder");
                self.render_placeholder(frame, inner, &props);
                return;
            }
        };
        let stats = *self
            .stats
            .get_or_compute(&pokemon.stat_key(), |key| project_stats(*key));
        let view = DetailView::assemble(&pokemon, &stats, &props.context());
        let style = props.style;
        let popular = props
            .popular_items
            .unwrap_or_else(|| props.catalog.popular_items_for(&pokemon.name));

        let dish_text = view.dish.as_ref().map(|dish| {
            let mut text = Text::from(Line::from(vec![
                Span::styled(format!("{}: ", dish.heading), style.heading),
                Span::styled(dish.name.clone(), style.text.add_modifier(Modifier::BOLD)),
                Span::styled(format!(" ({})", dish.icon_path), style.muted),
            ]));
            text.extend(description_text(&dish.description, style, None));
            text
        });
        let passive_text = view
            .passive
            .as_ref()
            .map(|passive| description_text(&passive.description, style, None));

        let width = inner.width;
        let dish_rows = dish_text.as_ref().map_or(0, |text| wrapped_height(text, width));
        let passive_rows = passive_text
            .as_ref()
            .map_or(0, |text| wrapped_height(text, width));
        let ult_rows = if view.ability.is_some() { 4 } else { 0 };

        let [header, stats_area, dish_area, passive_area, ult_area] = Layout::vertical([
            Constraint::Length(HEADER_ROWS),
            Constraint::Length(2),
            Constraint::Length(dish_rows),
            Constraint::Length(passive_rows),
            Constraint::Min(ult_rows),
        ])
        .areas(inner);

        let [portrait_area, side] =
            Layout::horizontal([Constraint::Length(PORTRAIT_COLS), Constraint::Min(10)])
                .areas(header);
        let [entry_area, types_area, popular_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(PopularItems::height(popular)),
        ])
        .areas(side.inner(ratatui::layout::Margin::new(1, 0)));

        self.render_portrait(frame, portrait_area, &view, &props);
        Self::render_entry(frame, entry_area, &view, &props);
        Self::render_types(frame, types_area, &view, &props);
        frame.render_widget(
            Block::default().style(style.section(DetailSection::PopularItems)),
            popular_area,
        );
        PopularItems.render(
            frame,
            popular_area,
            PopularItemsProps {
                items: popular,
                translations: props.translations,
                style,
            },
        );
        Self::render_stats(frame, stats_area, &view, &props);

        if let Some(text) = dish_text {
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .style(style.section(DetailSection::Dish)),
                dish_area,
            );
        }
        if let Some(text) = passive_text {
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .style(style.section(DetailSection::Passive)),
                passive_area,
            );
        }
        if let Some(ability) = view.ability.as_ref() {
            frame.render_widget(
                Block::default().style(style.section(DetailSection::Ult)),
                ult_area,
            );
            self.tooltip.get(&pokemon.id).render(
                frame,
                ult_area,
                AbilityTooltipProps {
                    ability,
                    style,
                    is_focused: props.is_focused,
                },
            );
        }

        self.last_view = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pkm;
    use tui_dispatch::testing::*;

    struct Fixture {
        catalog: Catalog,
        translations: Translations,
        preferences: Preferences,
        style: DetailStyle,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                catalog: Catalog::builtin().expect("catalog"),
                translations: Translations::builtin_en().expect("en"),
                preferences: Preferences::default(),
                style: DetailStyle::default(),
            }
        }

        fn props<'a>(&'a self, pokemon: &'a PokemonRef) -> PokemonDetailProps<'a> {
            PokemonDetailProps {
                pokemon,
                shiny: None,
                emotion: None,
                block: None,
                catalog: &self.catalog,
                catalog_revision: 0,
                translations: &self.translations,
                preferences: &self.preferences,
                portrait_base: "portraits",
                portrait: None,
                popular_items: None,
                style: &self.style,
                is_focused: true,
            }
        }
    }

    fn render(detail: &mut PokemonDetail, props: PokemonDetailProps<'_>) -> String {
        let mut harness = RenderHarness::new(72, 40);
        harness.render_to_string_plain(|frame| detail.render(frame, frame.area(), props))
    }

    #[test]
    fn identifier_resolution_is_memoized() {
        let fixture = Fixture::new();
        let reference = PokemonRef::Identifier(Pkm::from("PIKACHU"));
        let mut detail = PokemonDetail::new();

        render(&mut detail, fixture.props(&reference));
        let first = detail.tooltip_key().expect("tooltip keyed");
        render(&mut detail, fixture.props(&reference));
        assert_eq!(detail.tooltip_key(), Some(first));
    }

    #[test]
    fn new_instance_resets_tooltip() {
        let fixture = Fixture::new();
        let name = Pkm::from("PIKACHU");
        let a = PokemonRef::Instance(fixture.catalog.create_pokemon_from_name(&name).expect("a"));
        let b = PokemonRef::Instance(fixture.catalog.create_pokemon_from_name(&name).expect("b"));
        let mut detail = PokemonDetail::new();

        render(&mut detail, fixture.props(&a));
        let actions: Vec<_> = detail
            .handle_event(&EventKind::Key(key("]")), fixture.props(&a))
            .into_iter()
            .collect();
        actions.assert_first(Action::Render);
        assert_eq!(detail.tooltip().highlight(), Some(2));

        render(&mut detail, fixture.props(&b));
        assert_eq!(detail.tooltip().highlight(), None);
    }

    #[test]
    fn unknown_species_renders_placeholder() {
        let fixture = Fixture::new();
        let reference = PokemonRef::Identifier(Pkm::from("MISSINGNO"));
        let mut detail = PokemonDetail::new();

        let output = render(&mut detail, fixture.props(&reference));

        assert!(output.contains("Unknown species"));
        assert!(output.contains("MISSINGNO"));
        assert!(detail.view().is_none());
    }

    #[test]
    fn custom_block_replaces_frame() {
        let fixture = Fixture::new();
        let reference = PokemonRef::Identifier(Pkm::from("EEVEE"));
        let mut props = fixture.props(&reference);
        props.block = Some(Block::default().borders(Borders::ALL).title("shop slot"));
        let output = render(&mut PokemonDetail::new(), props);
        assert!(output.contains("shop slot"));
        assert!(output.contains("Eevee"));
    }

    #[test]
    fn unfocused_panel_ignores_tooltip_keys() {
        let fixture = Fixture::new();
        let reference = PokemonRef::Identifier(Pkm::from("PIKACHU"));
        let mut detail = PokemonDetail::new();
        render(&mut detail, fixture.props(&reference));

        let mut props = fixture.props(&reference);
        props.is_focused = false;
        let actions: Vec<_> = detail
            .handle_event(&EventKind::Key(key("]")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
