//! Overview tab
//!
//! Headline totals, a daily revenue sparkline and the residual series.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Sparkline},
    Frame,
};

use super::{bar_value, panel};
use crate::display::format_amount;
use crate::tui::app::App;

/// Render the overview tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // Totals
            Constraint::Percentage(35), // Sparkline
            Constraint::Min(6),         // Residuals
        ])
        .split(area);

    render_totals(frame, app, chunks[0]);
    render_revenue_sparkline(frame, app, chunks[1]);
    render_residuals(frame, app, chunks[2]);
}

fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let totals = app.analysis.totals();
    let symbol = app.currency_symbol();

    let cards = [
        ("Revenue", format_amount(totals.revenue.as_f64(), symbol)),
        ("Transactions", totals.txns.to_string()),
        ("Units", format!("{:.0}", totals.units)),
        ("Avg AOV", format_amount(totals.avg_aov, symbol)),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value), column) in cards.into_iter().zip(columns.iter()) {
        let text = Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(text).block(panel(label)), *column);
    }
}

fn render_revenue_sparkline(frame: &mut Frame, app: &App, area: Rect) {
    let daily = &app.analysis.daily;
    let values: Vec<u64> = daily.iter().map(|d| bar_value(d.revenue.as_f64())).collect();

    // Keep the most recent days that fit the inner width
    let width = area.width.saturating_sub(2) as usize;
    let visible = &values[values.len().saturating_sub(width)..];

    let title = match (daily.first(), daily.last()) {
        (Some(first), Some(last)) => format!("Daily revenue {} to {}", first.date, last.date),
        _ => "Daily revenue".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(panel(&title))
        .data(visible)
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(sparkline, area);
}

fn render_residuals(frame: &mut Frame, app: &App, area: Rect) {
    let scored = &app.analysis.scored;
    let block = panel("Residuals (actual - expected)");

    if scored.is_empty() {
        frame.render_widget(Paragraph::new("No transaction-days.").block(block), area);
        return;
    }

    let points: Vec<(f64, f64)> = scored
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.residual))
        .collect();
    let flagged: Vec<(f64, f64)> = scored
        .iter()
        .enumerate()
        .filter(|(_, d)| app.analysis.spikes.iter().any(|s| s.date == d.date))
        .map(|(i, d)| (i as f64, d.residual))
        .collect();

    let last = (scored.len() - 1).max(1) as f64;
    let zero = [(0.0, 0.0), (last, 0.0)];

    let max_abs = scored
        .iter()
        .map(|d| d.residual.abs())
        .fold(1.0_f64, f64::max);
    let symbol = app.currency_symbol();

    let datasets = vec![
        Dataset::default()
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(Color::DarkGray))
            .data(&zero),
        Dataset::default()
            .name("residual")
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .name("top spikes")
            .graph_type(GraphType::Scatter)
            .marker(symbols::Marker::Block)
            .style(Style::default().fg(Color::Red))
            .data(&flagged),
    ];

    let first_date = scored[0].date.to_string();
    let last_date = scored[scored.len() - 1].date.to_string();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last])
                .labels(vec![Span::raw(first_date), Span::raw(last_date)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([-max_abs, max_abs])
                .labels(vec![
                    Span::raw(format_amount(-max_abs, symbol)),
                    Span::raw("0"),
                    Span::raw(format_amount(max_abs, symbol)),
                ]),
        );

    frame.render_widget(chart, area);
}
