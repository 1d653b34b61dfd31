//! Dashboard views
//!
//! One view per tab, plus the tab bar and the status bar.

pub mod overview;
pub mod quality;
pub mod report;
pub mod seasonality;
pub mod spikes;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveTab, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_tab {
        ActiveTab::Overview => overview::render(frame, app, layout.main),
        ActiveTab::Seasonality => seasonality::render(frame, app, layout.main),
        ActiveTab::Spikes => spikes::render(frame, app, layout.main),
        ActiveTab::Quality => quality::render(frame, app, layout.main),
        ActiveTab::Report => report::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.show_help {
        dialogs::help::render(frame);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActiveTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Retail Pulse ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL),
        )
        .select(app.active_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}

/// Titled block shared by the views
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
}

/// Money as a whole-unit bar height; bars cannot be negative
pub(crate) fn bar_value(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}
