use crate::app::form::FieldValue;
use crate::app::App;
use crate::ui::widgets::popup::popup_frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_edit_entity(app: &App, f: &mut Frame<'_>) {
    let Some(edit_state) = &app.edit_state else {
        return;
    };
    let (area, block) = popup_frame(f, edit_state.title(), Color::Cyan, 60, 60);

    let mut lines = Vec::with_capacity(edit_state.fields.len() + 2);
    for (index, field) in edit_state.fields.iter().enumerate() {
        let current = index == edit_state.field_index;
        let label_style = if current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut value = field.value.display();
        let value_style = if current && edit_state.editing {
            value.push('_');
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let value = match field.value {
            FieldValue::Text(_) => value,
            FieldValue::Choice { .. } | FieldValue::Flag(_) => format!("< {value} >"),
        };

        lines.push(TextLine::from(vec![
            Span::styled(format!("{:>14}: ", field.field.label()), label_style),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(TextLine::from(""));
    let hint = if edit_state.editing {
        "Type to edit   Enter/Esc: Done"
    } else {
        "↑/↓: Field   Enter: Edit   ←/→: Change   s: Save   Esc: Cancel"
    };
    lines.push(TextLine::from(Span::styled(
        hint,
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
