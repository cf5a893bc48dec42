//! Renders description tokens as styled ratatui text.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use super::style::DetailStyle;
use super::synergy_icon::SynergyIcon;
use crate::description::{DescriptionToken, IconKind};

/// `highlight` replaces the active tier of every tier group when set.
pub fn description_text(
    tokens: &[DescriptionToken],
    style: &DetailStyle,
    highlight: Option<usize>,
) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for token in tokens {
        match token {
            DescriptionToken::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    push_text(&mut current, first, style.text);
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    push_text(&mut current, part, style.text);
                }
            }
            DescriptionToken::Icon { kind, label, .. } => match kind {
                IconKind::Synergy(synergy) => current.extend(SynergyIcon::spans(*synergy, label)),
                IconKind::Stat(stat) => {
                    current.push(Span::styled(format!("{} {label}", stat.glyph()), style.keyword))
                }
                IconKind::Status | IconKind::Damage => {
                    current.push(Span::styled(label.clone(), style.keyword))
                }
            },
            DescriptionToken::Tiers {
                values,
                active,
                scaled,
            } => {
                let active = highlight
                    .map(|index| index.min(values.len().saturating_sub(1)))
                    .or(*active);
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        current.push(Span::styled("/", style.muted));
                    }
                    let mut tier_style = if Some(index) == active {
                        style.tier_active
                    } else {
                        style.tier
                    };
                    if *scaled {
                        tier_style = tier_style.patch(style.tier_scaled);
                    }
                    current.push(Span::styled(value.clone(), tier_style));
                }
            }
        }
    }
    lines.push(Line::from(current));
    Text::from(lines)
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if !text.is_empty() {
        spans.push(Span::styled(text.to_string(), style));
    }
}

/// Rows a trimmed, word-wrapped paragraph of `text` takes at `width`, at
/// least one.
pub fn wrapped_height(text: &Text<'_>, width: u16) -> u16 {
    let rows = Paragraph::new(text.clone())
        .wrap(Wrap { trim: true })
        .line_count(width.max(1));
    u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
}

/// Largest number of values in any tier group.
pub fn tier_count(tokens: &[DescriptionToken]) -> usize {
    tokens
        .iter()
        .filter_map(|token| match token {
            DescriptionToken::Tiers { values, .. } => Some(values.len()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> Vec<DescriptionToken> {
        vec![
            DescriptionToken::Text("Deals ".into()),
            DescriptionToken::Tiers {
                values: vec!["10".into(), "20".into(), "40".into()],
                active: Some(0),
                scaled: false,
            },
            DescriptionToken::Text("\nthen rests".into()),
        ]
    }

    #[test]
    fn newlines_split_lines() {
        let text = description_text(&tiers(), &DetailStyle::default(), None);
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[1].to_string(), "then rests");
        assert_eq!(text.lines[0].to_string(), "Deals 10/20/40");
    }

    #[test]
    fn highlight_overrides_active_tier() {
        let style = DetailStyle::default();
        let text = description_text(&tiers(), &style, Some(2));
        let spans = &text.lines[0].spans;
        let forty = spans.iter().find(|span| span.content == "40").expect("tier");
        assert_eq!(forty.style, style.tier_active);
        let ten = spans.iter().find(|span| span.content == "10").expect("tier");
        assert_eq!(ten.style, style.tier);
    }

    #[test]
    fn height_accounts_for_wrapping() {
        let text = Text::from("x".repeat(25));
        assert_eq!(wrapped_height(&text, 10), 3);
        assert_eq!(tier_count(&tiers()), 3);
    }

    #[test]
    fn height_follows_word_boundaries() {
        // 10 cells fit in two rows of 5, but words break onto a third.
        let text = Text::from("ab cdef gh");
        assert_eq!(wrapped_height(&text, 5), 3);
    }
}
