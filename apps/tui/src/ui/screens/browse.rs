use crate::app::{App, AppScreen};
use crate::ui::widgets::highlight::highlighted_line;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs};
use ratatui::Frame;
use sports_mapper::engine::{Highlighted, Pane, TabView};
use sports_mapper::Tab;

pub fn render_browse(app: &App, f: &mut Frame<'_>) {
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Filters and search
            Constraint::Min(5),    // Panes
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    render_tabs(app, f, chunks[0]);
    render_filter_bar(app, &view, f, chunks[1]);
    render_panes(app, &view, f, chunks[2]);
    render_status(app, &view, f, chunks[3]);
    render_shortcuts(f, chunks[4]);
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles: Vec<TextLine<'_>> = Tab::ALL
        .iter()
        .map(|tab| TextLine::from(format!("{} {}", tab.index() + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.store.tab().index())
        .block(
            Block::default()
                .title(" Sports Mapper ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .title_bottom(TextLine::from(format!(" {} ", app.backend_label)).right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn label_span(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Gray))
}

fn value_span(value: Option<&str>) -> Span<'static> {
    value.map_or_else(
        || Span::styled("any", Style::default().fg(Color::DarkGray)),
        |value| {
            Span::styled(
                value.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        },
    )
}

fn render_filter_bar(app: &App, view: &TabView, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![
        label_span("Sport: "),
        value_span(view.filters.sport.as_deref()),
    ];
    if view.tab != Tab::Leagues {
        spans.push(label_span("   League: "));
        spans.push(value_span(view.filters.league.as_deref()));
    }
    if view.tab == Tab::Players {
        spans.push(label_span("   Team: "));
        spans.push(value_span(view.filters.team.as_deref()));
    }

    spans.push(label_span("   Search: "));
    let term = &app.store.search().term;
    let searching = app.screen == AppScreen::Search;
    let cursor = if searching { "_" } else { "" };
    let search_style = if searching {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(format!("{term}{cursor}"), search_style));
    spans.push(Span::styled(
        format!(" [{}]", view.category.label(view.tab)),
        Style::default().fg(Color::Magenta),
    ));

    let paragraph = Paragraph::new(TextLine::from(spans))
        .block(Block::default().title(" Filters ").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_panes(app: &App, view: &TabView, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    for pane in Pane::ALL {
        render_pane(app, view, pane, f, columns[pane.index()]);
    }
}

struct PaneRow {
    name: Highlighted,
    detail: TextLine<'static>,
    selected: bool,
}

fn pane_rows(view: &TabView, pane: Pane) -> Vec<PaneRow> {
    match pane {
        Pane::Items => view
            .items
            .iter()
            .map(|row| PaneRow {
                name: row.name.clone(),
                detail: highlighted_line(&row.detail, Style::default().fg(Color::Gray)),
                selected: row.active,
            })
            .collect(),
        Pane::Unmapped | Pane::Mapped => {
            let rows = if pane == Pane::Unmapped {
                &view.unmapped
            } else {
                &view.mapped
            };
            rows.iter()
                .map(|row| PaneRow {
                    name: row.name.clone(),
                    detail: TextLine::from(Span::styled(
                        row.context.clone().unwrap_or_default(),
                        Style::default().fg(Color::Gray),
                    )),
                    selected: false,
                })
                .collect()
        }
    }
}

fn render_pane(app: &App, view: &TabView, pane: Pane, f: &mut Frame<'_>, area: Rect) {
    let focused = app.pane == pane;
    let rows = pane_rows(view, pane);
    let total_rows = rows.len();
    let cursor = app.cursor(pane);

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if total_rows == 0 {
        format!(" {} ", pane.title(view.tab))
    } else {
        format!(
            " {} ({} of {}) ",
            pane.title(view.tab),
            cursor + 1,
            total_rows
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if rows.is_empty() {
        let paragraph = Paragraph::new(empty_message(view, pane))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let max_visible_rows = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, cursor);

    let table_rows = rows
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, row)| {
            let base = if row.selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if row.selected { "● " } else { "  " };

            let mut name = highlighted_line(&row.name, base);
            name.spans.insert(0, Span::styled(marker, base));

            let style = if index == cursor && focused {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .add_modifier(Modifier::BOLD)
            } else if index == cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };

            Row::new(vec![Cell::from(name), Cell::from(row.detail)]).style(style)
        });

    let widths = [Constraint::Percentage(60), Constraint::Percentage(40)];
    let table = Table::new(table_rows, widths)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

fn empty_message(view: &TabView, pane: Pane) -> &'static str {
    match (pane, view.tab) {
        (Pane::Mapped, _) if view.target.is_none() => "Select an item to see its mappings",
        (Pane::Unmapped, Tab::Players) => "Unmapped players are not listed",
        (Pane::Items, _) if view.term.is_some() => "No matches",
        _ => "Nothing here",
    }
}

fn render_status(app: &App, view: &TabView, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let line = match app.store.notification() {
        Some(notification) => {
            let style = if notification.is_error() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            TextLine::from(Span::styled(notification.message.clone(), style))
        }
        None => view.target.as_ref().map_or_else(
            || {
                TextLine::from(Span::styled(
                    format!("No {} selected", view.tab.mapping_kind().as_str()),
                    Style::default().fg(Color::Gray),
                ))
            },
            |target| {
                TextLine::from(vec![
                    Span::styled("Mapping to: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        target.label.clone(),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            },
        ),
    };

    let status_paragraph = Paragraph::new(line).block(status_block);
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let pairs = [
        ("1-3", "Tabs"),
        ("←/→", "Pane"),
        ("Enter", "Select/Map"),
        ("/", "Search"),
        ("f", "Category"),
        ("s", "Sport"),
        ("a", "Add mapping"),
        ("F1", "Help"),
        ("q", "Quit"),
    ];

    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, action) in pairs {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::raw(format!(": {action}   ")));
    }

    let paragraph = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
