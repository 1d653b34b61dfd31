//! Report tab: the Markdown insights report, scrollable

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel;
use crate::tui::app::App;

/// Headings and fenced blocks get their own style
fn styled_line(line: &str) -> Line<'_> {
    if line.starts_with("# ") {
        Line::from(Span::styled(
            line,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    } else if line.starts_with("## ") {
        Line::from(Span::styled(
            line,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if line.starts_with("```") {
        Line::from(Span::styled(line, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(line)
    }
}

/// Render the report tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app.report_text.lines().map(styled_line).collect();
    let title = format!(
        "Report  line {}/{}  [j/k PgUp/PgDn]",
        app.report_scroll as usize + 1,
        lines.len()
    );

    let paragraph = Paragraph::new(lines)
        .block(panel(&title))
        .scroll((app.report_scroll, 0));

    frame.render_widget(paragraph, area);
}
