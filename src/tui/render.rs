use std::borrow::Cow;

use super::form::FieldType;
use super::state::AppState;
use crate::commentary::prompt::fmt_rate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn draw(f: &mut Frame, state: &AppState, spinner_frame: u8) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    draw_form(f, state, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(body[1]);
    draw_rates(f, state, right[0]);
    draw_prediction(f, state, right[1]);
    draw_commentary(f, state, right[2], spinner_frame);

    draw_logs(f, state, chunks[2]);
    draw_footer(f, chunks[3]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " 🏏 IPL Win Predictor ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("+ Live AI Commentary", Style::default().fg(Color::Cyan)),
    ]);
    let para = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_form(f: &mut Frame, state: &AppState, area: Rect) {
    let form = &state.form;
    let rows: Vec<Row> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == form.selected;
            let value_str = match &field.field_type {
                FieldType::Choice(_) => format!("\u{25c0} {} \u{25b6}", field.value),
                FieldType::Integer { .. } if selected => {
                    format!("\u{25c0} {}\u{258f} \u{25b6}", field.value)
                }
                _ if selected => format!("{}\u{258f}", field.value),
                _ => field.value.clone(),
            };
            let value_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(field.label).style(Style::default().fg(Color::White)),
                Cell::from(value_str).style(value_style),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(45), Constraint::Percentage(55)])
        .block(Block::default().borders(Borders::ALL).title(" Match Situation "))
        .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut table_state = TableState::default();
    table_state.select(Some(form.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_rates(f: &mut Frame, state: &AppState, area: Rect) {
    let m = &state.metrics;
    let line = Line::from(vec![
        Span::raw(" Current Run Rate: "),
        Span::styled(
            fmt_rate(m.current_run_rate, m.current_rate_defaulted()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" | Required Run Rate: "),
        Span::styled(
            fmt_rate(m.required_run_rate, m.required_rate_defaulted()),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    let para = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Rates "));
    f.render_widget(para, area);
}

fn draw_prediction(f: &mut Frame, state: &AppState, area: Rect) {
    let line = if let Some(err) = &state.prediction_error {
        Line::from(Span::styled(format!(" {}", err), Style::default().fg(Color::Red)))
    } else if let Some(stage) = &state.prediction {
        Line::from(vec![
            Span::raw(" 🏆 Predicted Winner: "),
            Span::styled(
                stage.prediction.winner.as_str(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            " Press Enter to predict",
            Style::default().fg(Color::DarkGray),
        ))
    };
    let para = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Prediction "));
    f.render_widget(para, area);
}

fn draw_commentary(f: &mut Frame, state: &AppState, area: Rect, spinner_frame: u8) {
    let mut title = " Live Commentary ".to_string();
    let body = if state.commentating {
        let ch = SPINNER_FRAMES[(spinner_frame as usize) % SPINNER_FRAMES.len()];
        Paragraph::new(Span::styled(
            format!("{} Generating live commentary...", ch),
            Style::default().fg(Color::Cyan),
        ))
    } else if let Some(c) = &state.commentary {
        title = format!(" Live Commentary ({}) ", c.tone);
        let style = if c.generated {
            Style::default()
        } else {
            Style::default().fg(Color::Yellow)
        };
        Paragraph::new(Span::styled(c.text.as_str(), style))
    } else {
        Paragraph::new("")
    };
    let para = body
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(para, area);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let max_width = area.width.saturating_sub(2) as usize; // borders
    let visible_lines = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible_lines)
        .map(|l| {
            let color = match l.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                _ => Color::DarkGray,
            };
            let prefix = format!(" {} [{}] ", l.time, l.level);
            let msg_max = max_width.saturating_sub(prefix.chars().count());
            let msg = truncate_with_ellipsis(&l.message, msg_max);
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(msg.into_owned()),
            ])
        })
        .collect();

    let para = Paragraph::new(lines).block(Block::default().title(" Log ").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("  [\u{2191}\u{2193}]", Style::default().fg(Color::Yellow)),
        Span::raw(" field  "),
        Span::styled("[\u{2190}\u{2192}]", Style::default().fg(Color::Yellow)),
        Span::raw(" change  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" predict  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}
