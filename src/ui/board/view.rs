//! Rendering for the board TUI.

use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::Connectivity;
use crate::due::{classify, Urgency};
use crate::prefs::{PrefStore, Theme};
use crate::session::SessionMode;
use crate::task::{Column, Task};

use super::app::{AppState, EditorFocus, NewTagInput};

const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_DRAG: Color = Color::Rgb(214, 140, 230);

pub fn render<P: PrefStore>(frame: &mut Frame, app: &AppState<P>, now: DateTime<Utc>) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(frame, app, chunks[0]);
    render_columns(frame, app, chunks[1], now);
    render_footer(frame, app, chunks[2]);

    if let Some(session) = app.controller.session() {
        render_session_modal(frame, app, area, session);
    }
    if let Some(input) = app.new_tag.as_ref() {
        render_new_tag_modal(frame, area, input);
    }
}

fn text_color<P: PrefStore>(app: &AppState<P>) -> Color {
    match app.theme {
        Theme::Light => Color::Black,
        Theme::Dark => Color::White,
    }
}

fn render_header<P: PrefStore>(frame: &mut Frame, app: &AppState<P>, area: Rect) {
    let (status_label, status_color) = match app.controller.connectivity() {
        Connectivity::Healthy => ("online", COLOR_SUCCESS),
        Connectivity::Disconnected => ("offline", COLOR_ERROR),
        Connectivity::Checking => ("checking", COLOR_WARNING),
    };

    let line = Line::from(vec![
        Span::styled(
            " kb board ",
            Style::default()
                .fg(text_color(app))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{}]", status_label), Style::default().fg(status_color)),
        Span::styled(
            format!("  {} tasks", app.controller.view().total()),
            Style::default().fg(COLOR_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_columns<P: PrefStore>(
    frame: &mut Frame,
    app: &AppState<P>,
    area: Rect,
    now: DateTime<Utc>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);

    let view = app.controller.view();
    for (index, column) in Column::ALL.iter().enumerate() {
        let tasks = view.column(*column);
        let is_selected = index == app.selected_column;
        let is_drop_target = app.drop_target == Some(index);

        let border_color = if is_drop_target {
            COLOR_DRAG
        } else if is_selected {
            COLOR_ACCENT
        } else {
            COLOR_MUTED
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ({}) ", column.title(), tasks.len()));

        let mut lines: Vec<Line> = Vec::new();
        if tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "Drag tasks here",
                Style::default().fg(COLOR_MUTED),
            )));
        }
        for (row, task) in tasks.iter().enumerate() {
            let highlighted = is_selected && row == app.selected_row;
            lines.extend(task_lines(app, task, highlighted, now));
        }

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), chunks[index]);
    }
}

fn task_lines<'a, P: PrefStore>(
    app: &AppState<P>,
    task: &'a Task,
    highlighted: bool,
    now: DateTime<Utc>,
) -> Vec<Line<'a>> {
    let dragging = app.controller.dragging() == Some(task.id);
    let mut name_style = Style::default().fg(text_color(app));
    if highlighted {
        name_style = name_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    if dragging {
        name_style = name_style.fg(COLOR_DRAG);
    }

    let mut spans = vec![Span::styled(format!(" {} ", task.name), name_style)];
    match classify(task.due_date, now) {
        Urgency::Overdue => spans.push(Span::styled("overdue", Style::default().fg(COLOR_ERROR))),
        Urgency::Urgent => spans.push(Span::styled("due soon", Style::default().fg(COLOR_WARNING))),
        Urgency::Normal | Urgency::None => {}
    }

    let mut lines = vec![Line::from(spans)];
    if !task.tags.is_empty() {
        let names: Vec<String> = task.tags.iter().map(|tag| tag.name.clone()).collect();
        lines.push(Line::from(Span::styled(
            format!("   {}", names.join(", ")),
            Style::default().fg(COLOR_ACCENT),
        )));
    }
    lines
}

fn render_footer<P: PrefStore>(frame: &mut Frame, app: &AppState<P>, area: Rect) {
    let hints = if app.controller.session().is_some() {
        "Tab fields · Space toggle tag · n new tag · Enter save · Esc cancel"
    } else if app.controller.dragging().is_some() {
        "h/l pick column · Enter drop · Esc cancel"
    } else {
        "a add · Enter edit · g grab · d delete · r sync · t theme · q quit"
    };

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", hints),
        Style::default().fg(COLOR_MUTED),
    ))];
    if let Some(status) = app.status.as_deref() {
        lines.insert(
            0,
            Line::from(Span::styled(
                format!(" {}", status),
                Style::default().fg(COLOR_SUCCESS),
            )),
        );
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_session_modal<P: PrefStore>(
    frame: &mut Frame,
    app: &AppState<P>,
    area: Rect,
    session: &crate::session::TaskDetailSession,
) {
    let modal = centered_rect(area, 60, 70);
    frame.render_widget(Clear, modal);

    let title = match session.mode() {
        SessionMode::Create => " Create New Task ",
        SessionMode::Edit(_) => " Task Details ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(title);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = session.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
        lines.push(Line::from(""));
    }
    if session.saving() {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(COLOR_WARNING),
        )));
        lines.push(Line::from(""));
    }

    lines.push(field_line("Name", &session.name, app.focus == EditorFocus::Name));
    lines.push(field_line(
        "Description",
        &session.description,
        app.focus == EditorFocus::Description,
    ));
    lines.push(field_line("Due", &app.due_input, app.focus == EditorFocus::Due));
    lines.push(Line::from(""));

    let tags_focused = app.focus == EditorFocus::Tags;
    lines.push(Line::from(Span::styled(
        if tags_focused { "> Tags" } else { "  Tags" },
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let tags = app.controller.tags().tags();
    if tags.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no tags yet; press n to create one)",
            Style::default().fg(COLOR_MUTED),
        )));
    }
    for (index, tag) in tags.iter().enumerate() {
        let mark = if session.is_selected(tag.id) { "[x]" } else { "[ ]" };
        let cursor = if tags_focused && index == app.tag_cursor {
            ">"
        } else {
            " "
        };
        let mut style = Style::default();
        if tags_focused && index == app.tag_cursor {
            style = style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            format!(" {} {} {}", cursor, mark, tag.name),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), modal);
}

fn render_new_tag_modal(frame: &mut Frame, area: Rect, input: &NewTagInput) {
    let modal = centered_rect(area, 40, 25);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(" New Tag ");

    let lines = vec![
        field_line("Name", &input.name, !input.color_active),
        field_line("Color", &input.color, input.color_active),
        Line::from(""),
        Line::from(Span::styled(
            "Enter create · Tab switch · Esc cancel",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left),
        modal,
    );
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let marker = if focused { ">" } else { " " };
    let mut label_style = Style::default();
    if focused {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(format!("{} {}: ", marker, label), label_style),
        Span::raw(value),
    ])
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1]);
    horizontal[1]
}
