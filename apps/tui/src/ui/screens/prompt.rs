use crate::app::App;
use crate::ui::widgets::popup::popup_frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

pub fn render_new_mapping(app: &App, f: &mut Frame<'_>) {
    let target = app
        .view()
        .target
        .map_or_else(String::new, |target| target.label);
    let (area, block) = popup_frame(f, "Add Mapping".to_string(), Color::Green, 50, 30);

    let text = Text::from(vec![
        TextLine::from(vec![
            Span::styled("Maps to: ", Style::default().fg(Color::Gray)),
            Span::styled(
                target,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            format!("> {}_", app.mapping_input),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Enter: Save   Esc: Cancel",
            Style::default().fg(Color::Gray),
        )),
    ]);

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_confirm(app: &App, f: &mut Frame<'_>) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let (area, block) = popup_frame(f, "Confirm".to_string(), Color::Red, 40, 20);

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            confirm.message.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(": Yes   "),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(": No"),
        ]),
    ]);

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
