// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::cursor::Cursor;
use crate::input::LineInput;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use roastery_app::{Grid, Locale, Notice};

/// Splits the screen into header, body and status bar.
pub(crate) fn screen_layout(area: Rect) -> [Rect; 3] {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);
    [layout[0], layout[1], layout[2]]
}

pub(crate) fn render_grid(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    grid: &Grid,
    cursor: Cursor,
    title: &str,
) {
    let columns = grid.column_count();
    let widths = vec![Constraint::Min(8); columns.max(1)];

    let header = Row::new(grid.columns().iter().map(|label| {
        Cell::from(label.as_str()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let selected = grid.selected_row();
    let rows = (0..grid.row_count()).map(|row_index| {
        let cells = (0..columns)
            .map(|column_index| {
                let text = grid.cell(row_index, column_index).unwrap_or_default();
                let mut style = Style::default();
                if selected == Some(row_index) {
                    style = style.bg(Color::DarkGray);
                }
                if cursor.row == row_index && cursor.column == column_index {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(text.to_owned()).style(style)
            })
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title(title.to_owned()).borders(Borders::ALL));

    // Only used so the viewport follows the cursor.
    let mut state = TableState::default();
    if cursor.row < grid.row_count() {
        state.select(Some(cursor.row));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

pub(crate) fn render_status(frame: &mut ratatui::Frame<'_>, area: Rect, text: String) {
    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

pub(crate) fn render_notice(frame: &mut ratatui::Frame<'_>, locale: Locale, notice: Notice) {
    let area = centered_rect(44, 24, frame.area());
    frame.render_widget(Clear, area);
    let body = format!("{}\n\nenter/esc: ok", locale.notice_text(notice));
    let dialog = Paragraph::new(body).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(locale.notice_title())
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(dialog, area);
}

pub(crate) fn render_input(frame: &mut ratatui::Frame<'_>, title: &str, input: &LineInput) {
    let area = centered_rect(70, 20, frame.area());
    frame.render_widget(Clear, area);
    let body = format!("{}_\n\nenter: ok | esc: cancel | ctrl+u: clear", input.value());
    let prompt = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(prompt, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width.max(1))
        .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
