use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use sports_mapper::engine::Highlighted;

pub fn match_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Turns matched segments into styled spans on top of `base`
pub fn highlighted_line(text: &Highlighted, base: Style) -> Line<'static> {
    let spans: Vec<Span<'static>> = text
        .segments
        .iter()
        .map(|segment| {
            let style = if segment.matched {
                base.patch(match_style())
            } else {
                base
            };
            Span::styled(segment.text.clone(), style)
        })
        .collect();
    Line::from(spans)
}
