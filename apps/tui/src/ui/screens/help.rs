use crate::ui::widgets::popup::popup_frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const KEYS: [(&str, &str); 19] = [
    ("1 / 2 / 3", "Leagues, Teams, Players tab"),
    ("← / →", "Focus previous / next pane"),
    ("↑ ↓ PgUp PgDn", "Move the cursor"),
    ("Home / End", "First / last row"),
    ("Enter", "Select item, map name, or unmap"),
    ("/", "Edit the search term"),
    ("f", "Cycle the search category"),
    ("s", "Cycle the sport filter"),
    ("L", "Pick the league filter"),
    ("T", "Pick the team filter (Players)"),
    ("a", "Add a mapping for the selection"),
    ("x", "Delete the focused mapping"),
    ("n / e", "Add / edit an entity"),
    ("D", "Delete the focused entity"),
    ("u", "Clear the league selection (Leagues)"),
    ("c", "Clear selections and search"),
    ("r", "Reload all data"),
    ("F1 / Esc", "Close this help"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let (area, block) = popup_frame(f, "Help".to_string(), Color::Yellow, 60, 80);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<TextLine<'_>> = KEYS
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:>15}  "), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
