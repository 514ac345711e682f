use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, Field, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(format!(
        "maplaunch – open map apps on {}",
        app.service.platform()
    ))
    .block(Block::default().borders(Borders::ALL).title("Maplaunch"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::ProviderSelect => draw_provider_select(frame, app, *content_area),
        Screen::RequestForm => draw_request_form(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::ProviderSelect => "↑/↓ move · Enter/Space choose map · r refresh · q/Ctrl-C quit",
        Screen::RequestForm => {
            "Tab/↑/↓ field · ←/→ mode · Enter marker · Ctrl-D directions · Esc back · Ctrl-C quit"
        }
    };

    let status_text = if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_provider_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = if app.providers.is_empty() {
        vec![ListItem::new("No map apps are known on this platform.")]
    } else {
        app.providers
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let prefix = if idx == app.provider_index { "> " } else { "  " };
                let mark = if entry.is_installed { "[x]" } else { "[ ]" };
                let line = format!(
                    "{prefix}{mark} {:<18} {}",
                    entry.provider.display_name, entry.provider.platform_identifier
                );
                let style = if entry.is_installed {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let installed = app.providers.iter().filter(|entry| entry.is_installed).count();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Map apps ({installed} of {} installed)",
            app.providers.len()
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.providers.is_empty() {
        state.select(Some(app.provider_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_request_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [form_area, history_area] = chunks else {
        return;
    };

    let provider_name = app
        .selected
        .as_ref()
        .map_or("<no map>", |provider| provider.display_name.as_str());

    let rows = Field::ALL.iter().map(|field| {
        let style = if *field == app.focus {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(field.label()),
            Cell::from(app.field_value(*field).to_owned()),
        ])
        .style(style)
    });

    let form = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)])
        .header(
            Row::new(vec!["Field", "Value"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Open in {provider_name} (zoom {})", app.zoom)),
        );
    frame.render_widget(form, *form_area);

    draw_history(frame, app, *history_area);
}

fn draw_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = "Launched";

    if app.history.is_empty() {
        let paragraph = Paragraph::new("Nothing launched yet.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.history.iter().rev().map(|record| {
        Row::new(vec![
            Cell::from(record.at.format("%H:%M:%S").to_string()),
            Cell::from(record.provider.clone()),
            Cell::from(record.action),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(10),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Time", "Map", "Action"]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
