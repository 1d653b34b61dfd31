//! Seasonality tab
//!
//! Day-of-week bars (average and median), monthly revenue bars, the
//! monthly average AOV line and the month x weekday heatmap.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
        Row, Table,
    },
    Frame,
};

use super::{bar_value, panel};
use crate::analysis::MonthSummary;
use crate::display::format_amount;
use crate::models::DayOfWeek;
use crate::tui::app::App;

const AVG_COLOR: Color = Color::Cyan;
const MEDIAN_COLOR: Color = Color::Magenta;

/// Render the seasonality tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(top[1]);

    render_dow(frame, app, top[0]);
    render_months(frame, app, right[0]);
    render_month_aov(frame, app, right[1]);
    render_heatmap(frame, app, rows[1]);
}

fn render_dow(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::raw(" Day-of-week: "),
        Span::styled("avg", Style::default().fg(AVG_COLOR)),
        Span::raw(" / "),
        Span::styled("median", Style::default().fg(MEDIAN_COLOR)),
        Span::raw(" daily revenue "),
    ]);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .value_style(Style::default().fg(Color::Black));

    for day in &app.analysis.dow {
        let group = BarGroup::default()
            .label(Line::from(day.dow.short_name()))
            .bars(&[
                Bar::default()
                    .value(bar_value(day.avg_daily_revenue))
                    .text_value(String::new())
                    .style(Style::default().fg(AVG_COLOR)),
                Bar::default()
                    .value(bar_value(day.median_daily_revenue))
                    .text_value(String::new())
                    .style(Style::default().fg(MEDIAN_COLOR)),
            ]);
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

fn render_months(frame: &mut Frame, app: &App, area: Rect) {
    let labels: Vec<String> = app
        .analysis
        .month
        .iter()
        .map(|m| m.month.to_string())
        .collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&app.analysis.month)
        .map(|(label, m)| (label.as_str(), bar_value(m.revenue.as_f64())))
        .collect();

    let chart = BarChart::default()
        .block(panel("Monthly revenue (observed days)"))
        .data(data.as_slice())
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));

    frame.render_widget(chart, area);
}

/// Y-axis bounds for the AOV line, starting at zero with some headroom
fn aov_bounds(months: &[MonthSummary]) -> [f64; 2] {
    let max = months
        .iter()
        .map(|m| m.aov)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    [0.0, if max > 0.0 { max * 1.1 } else { 1.0 }]
}

fn render_month_aov(frame: &mut Frame, app: &App, area: Rect) {
    let months = &app.analysis.month;
    let block = panel("Monthly average AOV");

    if months.is_empty() {
        frame.render_widget(Paragraph::new("No data.").block(block), area);
        return;
    }

    let points: Vec<(f64, f64)> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.aov))
        .collect();
    let last = (months.len() - 1).max(1) as f64;
    let bounds = aov_bounds(months);
    let symbol = app.currency_symbol();

    let datasets = vec![Dataset::default()
        .graph_type(GraphType::Line)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last])
                .labels(vec![
                    Span::raw(months[0].month.to_string()),
                    Span::raw(months[months.len() - 1].month.to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(bounds)
                .labels(vec![
                    Span::raw(format_amount(bounds[0], symbol)),
                    Span::raw(format_amount(bounds[1], symbol)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Background for a heatmap cell, darker for lower means
fn heat_color(value: Option<f64>, max: f64) -> Option<Color> {
    let value = value?;
    if max <= 0.0 {
        return None;
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    Some(if ratio >= 0.8 {
        Color::Red
    } else if ratio >= 0.6 {
        Color::LightRed
    } else if ratio >= 0.4 {
        Color::Yellow
    } else if ratio >= 0.2 {
        Color::Green
    } else {
        Color::Blue
    })
}

fn render_heatmap(frame: &mut Frame, app: &App, area: Rect) {
    let heatmap = &app.analysis.heatmap;
    let block = panel("Month x day-of-week (average daily revenue)");

    if heatmap.is_empty() {
        frame.render_widget(Paragraph::new("No data.").block(block), area);
        return;
    }

    let max = heatmap.max_mean();
    let header = Row::new(
        std::iter::once(Cell::from("Month")).chain(
            DayOfWeek::ALL
                .iter()
                .map(|d| Cell::from(d.short_name())),
        ),
    )
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = heatmap
        .months
        .iter()
        .zip(&heatmap.means)
        .map(|(month, means)| {
            let cells = means.iter().map(|mean| match heat_color(*mean, max) {
                Some(bg) => Cell::from(format!("{:>8.0}", mean.unwrap_or_default()))
                    .style(Style::default().fg(Color::Black).bg(bg)),
                None => {
                    Cell::from(format!("{:>8}", "-")).style(Style::default().fg(Color::DarkGray))
                }
            });
            Row::new(std::iter::once(Cell::from(month.to_string())).chain(cells))
        })
        .collect();

    let mut widths = vec![Constraint::Length(8)];
    widths.extend([Constraint::Length(9); 7]);

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
