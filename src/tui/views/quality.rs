//! Data Quality tab

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table},
    Frame,
};

use super::panel;
use crate::display::format_amount;
use crate::tui::app::App;
use crate::tui::layout::list_detail;

/// Render the data quality tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (summary_area, mismatch_area) = list_detail(area, 45);
    render_summary(frame, app, summary_area);
    render_mismatches(frame, app, mismatch_area);
}

fn count_style(count: usize) -> Style {
    if count == 0 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let q = &app.analysis.quality;
    let p = &app.analysis.profile;
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
    };

    let counters = [
        ("Rows with missing values", q.n_missing_any),
        ("Quantity <= 0", q.n_negative_quantity),
        ("Price per unit <= 0", q.n_negative_price),
        ("Total amount <= 0", q.n_negative_total),
        ("Total != quantity x price", q.total_amount_mismatches),
    ];

    let mut rows = vec![
        Row::new(vec![Cell::from("Rows"), Cell::from(q.n_rows.to_string())]),
        Row::new(vec![
            Cell::from("Transaction-days"),
            Cell::from(format!("{} of {}", p.n_days, p.span_days())),
        ]),
        Row::new(vec![Cell::from("First date"), Cell::from(date(q.date_min))]),
        Row::new(vec![Cell::from("Last date"), Cell::from(date(q.date_max))]),
        Row::new(vec![Cell::from("Categories"), Cell::from(p.categories.join(", "))]),
    ];
    rows.extend(counters.iter().map(|(label, count)| {
        Row::new(vec![
            Cell::from(*label),
            Cell::from(count.to_string()).style(count_style(*count)),
        ])
    }));

    let title = if q.is_clean() {
        "Data quality: clean"
    } else {
        "Data quality: issues found"
    };
    let table = Table::new(rows, [Constraint::Length(27), Constraint::Min(10)])
        .header(
            Row::new(["Check", "Value"]).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(panel(title));

    frame.render_widget(table, area);
}

fn render_mismatches(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.currency_symbol();
    let amount = |m: Option<crate::models::Money>| {
        m.map(|m| format_amount(m.as_f64(), symbol))
            .unwrap_or_else(|| "-".to_string())
    };

    let rows: Vec<Row> = app
        .analysis
        .identity
        .iter()
        .filter(|c| c.is_mismatch)
        .map(|c| {
            Row::new(vec![
                Cell::from(c.transaction_id.clone()),
                Cell::from(c.date.to_string()),
                Cell::from(amount(c.total_amount)),
                Cell::from(amount(c.expected_total)),
                Cell::from(amount(c.abs_error)).style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();

    let title = format!("Total amount mismatches ({})", rows.len());
    let widths = [
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(8),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(["Txn", "Date", "Total", "Expected", "Error"])
                .style(Style::default().fg(Color::Yellow)),
        )
        .block(panel(&title));

    frame.render_widget(table, area);
}
