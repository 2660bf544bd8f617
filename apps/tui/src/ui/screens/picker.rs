use crate::app::state::PickerKind;
use crate::app::App;
use crate::ui::widgets::highlight::highlighted_line;
use crate::ui::widgets::popup::popup_frame;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

pub fn render_picker(app: &App, f: &mut Frame<'_>) {
    let Some(picker) = &app.picker else {
        return;
    };

    let title = match picker.kind {
        PickerKind::League => "Filter by League",
        PickerKind::Team => "Filter by Team",
    };
    let (area, block) = popup_frame(f, title.to_string(), Color::Magenta, 50, 60);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let query = Paragraph::new(TextLine::from(vec![
        Span::styled("> ", Style::default().fg(Color::Magenta)),
        Span::styled(
            format!("{}_", picker.query),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(query, chunks[0]);

    let max_visible_rows = chunks[1].height as usize;
    let offset = scroll_offset(picker.options.len(), max_visible_rows, picker.index);
    let items: Vec<ListItem<'_>> = picker
        .options
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, option)| {
            let base = if option.selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            let mut line = highlighted_line(&option.label, base);
            if !option.detail.is_empty() {
                line.spans.push(Span::styled(
                    format!("  {}", option.detail),
                    Style::default().fg(Color::Gray),
                ));
            }
            let style = if index == picker.index {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    if items.is_empty() {
        f.render_widget(
            Paragraph::new("No matches").style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    } else {
        f.render_widget(List::new(items), chunks[1]);
    }

    let hint = Paragraph::new("Enter: Apply   Del: Clear filter   Esc: Cancel")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(hint, chunks[2]);
}
