//! Status bar view
//!
//! Shows the input, top-n, spike count and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let options = app.pipeline().options();
    let input = options
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| options.input.display().to_string());

    let mut spans = vec![
        Span::styled(format!(" {} ", input), Style::default().fg(Color::Cyan)),
        Span::raw("│ "),
        Span::styled("top-n: ", Style::default().fg(Color::White)),
        Span::styled(
            app.top_n().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("score: {}", app.analysis.score_by),
            Style::default().fg(Color::White),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("flagged: {}", app.analysis.flagged.len()),
            Style::default().fg(if app.analysis.flagged.is_empty() {
                Color::Green
            } else {
                Color::Red
            }),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        "  [1-5] tabs  [r] run  [?] help  [q] quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
