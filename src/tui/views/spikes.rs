//! Spike Explorer tab
//!
//! Ranked spike days on the left; the selected day's card on the right:
//! revenue against expectation, driver deltas, category contribution and
//! the card as exported JSON.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::panel;
use crate::analysis::{driver_deltas, SpikeCard};
use crate::display::{format_amount, format_bar, format_percentage, format_signed, truncate};
use crate::tui::app::App;
use crate::tui::layout::list_detail;

const CATEGORY_BAR_WIDTH: usize = 20;

/// Render the spike explorer tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (list, detail) = list_detail(area, 50);
    render_spike_table(frame, app, list);

    match app.selected_card() {
        Some(card) => render_card(frame, app, card, detail),
        None => frame.render_widget(
            Paragraph::new("No spike days.").block(panel("Spike card")),
            detail,
        ),
    }
}

fn render_spike_table(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.currency_symbol();
    let title = format!(
        "Top {} spike days by {} [+/-]",
        app.top_n(),
        app.analysis.score_by.column()
    );

    let header = Row::new(["#", "Date", "Day", "Revenue", "Expected", "z"].map(|h| {
        Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = app
        .analysis
        .spikes
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let score = app.analysis.score_by.score(day);
            let score_style = if score >= app.pipeline().options().spike_threshold {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(day.date.to_string()),
                Cell::from(day.dow.short_name()),
                Cell::from(format_amount(day.revenue.as_f64(), symbol)),
                Cell::from(format_amount(day.expected_revenue, symbol)),
                Cell::from(format!("{:.2}", score)).style(score_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(10),
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !app.analysis.spikes.is_empty() {
        state.select(Some(app.selected_spike));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_card(frame: &mut Frame, app: &App, card: &SpikeCard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Revenue vs expected
            Constraint::Length(6), // Drivers
            Constraint::Length(6), // Categories
            Constraint::Min(4),    // JSON
        ])
        .split(area);

    render_headline(frame, app, card, chunks[0]);
    render_drivers(frame, card, chunks[1]);
    render_categories(frame, app, card, chunks[2]);
    render_json(frame, card, chunks[3]);
}

fn render_headline(frame: &mut Frame, app: &App, card: &SpikeCard, area: Rect) {
    let symbol = app.currency_symbol();
    let delta_color = if card.delta_revenue >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    let pct = card
        .delta_pct
        .map(format_percentage)
        .unwrap_or_else(|| "n/a".to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Revenue  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_amount(card.actual_revenue, symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  vs expected  ", Style::default().fg(Color::Gray)),
            Span::raw(format_amount(card.expected_revenue, symbol)),
        ]),
        Line::from(vec![
            Span::styled("Delta    ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} ({})", format_amount(card.delta_revenue, symbol), pct),
                Style::default().fg(delta_color),
            ),
        ]),
        Line::from(vec![
            Span::styled("Score    ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.2}", card.score)),
        ]),
    ];
    if let Some(day) = app.selected_spike_day() {
        lines.push(Line::from(vec![
            Span::styled("Baseline ", Style::default().fg(Color::Gray)),
            Span::raw(day.baseline_level.to_string()),
        ]));
    }

    let title = format!("{} ({})", card.date, card.dow);
    frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}

fn render_drivers(frame: &mut Frame, card: &SpikeCard, area: Rect) {
    let rows: Vec<Row> = driver_deltas(card)
        .into_iter()
        .map(|d| {
            let color = if d.delta >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            Row::new(vec![
                Cell::from(d.name),
                Cell::from(format!("{:.2}", d.actual)),
                Cell::from(format!("{:.2}", d.baseline_mean)),
                Cell::from(format_signed(d.delta)).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let header = Row::new(["Driver", "Actual", "Mean", "Delta"])
        .style(Style::default().fg(Color::Yellow));
    let widths = [
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel("Drivers vs mean"));
    frame.render_widget(table, area);
}

fn render_categories(frame: &mut Frame, app: &App, card: &SpikeCard, area: Rect) {
    let symbol = app.currency_symbol();
    let mix = app.analysis.day_mix(card.date);

    let lines: Vec<Line> = mix
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::raw(format!("{:<12} ", truncate(&row.product_category, 12))),
                Span::styled(
                    format_bar(row.category_share, 1.0, CATEGORY_BAR_WIDTH),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(
                    " {} ({})",
                    format_amount(row.category_revenue.as_f64(), symbol),
                    format_percentage(row.category_share * 100.0)
                )),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel("Category contribution")),
        area,
    );
}

fn render_json(frame: &mut Frame, card: &SpikeCard, area: Rect) {
    let json = serde_json::to_string_pretty(card).unwrap_or_else(|e| e.to_string());
    let paragraph = Paragraph::new(json)
        .block(panel("Spike card (JSON)"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
