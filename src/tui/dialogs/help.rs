//! Help popup
//!
//! Lists the dashboard's keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect;

/// Render the help popup
pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        heading("Navigation"),
        Line::from(""),
        key_line("1-5", "Jump to tab"),
        key_line("Tab / S-Tab", "Next / previous tab"),
        key_line("j/k", "Move selection or scroll report"),
        key_line("PgUp/PgDn", "Scroll report by a page"),
        Line::from(""),
        heading("Analysis"),
        Line::from(""),
        key_line("+/-", "Change top-n by 5 (5 to 50)"),
        key_line("r", "Re-run pipeline and write outputs"),
        Line::from(""),
        key_line("?", "Show/hide help"),
        key_line("q / Esc", "Quit"),
    ]
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

/// Create a key-description line
fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::raw(description),
    ])
}
