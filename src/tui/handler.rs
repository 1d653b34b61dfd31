//! Event handler for the dashboard
//!
//! Routes keyboard events to the application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use super::app::{ActiveTab, App};
use super::event::Event;

const PAGE: i32 = 20;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // Help popup swallows everything but its own close keys
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.toggle_help();
        }
        return Ok(());
    }

    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = ActiveTab::from_index(index) {
                app.select_tab(tab);
            }
        }

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::PageDown if app.active_tab == ActiveTab::Report => app.scroll_report(PAGE),
        KeyCode::PageUp if app.active_tab == ActiveTab::Report => app.scroll_report(-PAGE),
        KeyCode::Char('g') | KeyCode::Home if app.active_tab == ActiveTab::Report => {
            app.report_scroll = 0;
        }

        KeyCode::Char('+') | KeyCode::Char('=') => app.increase_top_n(),
        KeyCode::Char('-') => app.decrease_top_n(),

        KeyCode::Char('r') => {
            app.set_status("Re-running pipeline...");
            if let Err(e) = app.rerun() {
                warn!(error = %e, "dashboard re-run failed");
                app.set_status(format!("Error: {}", e));
            }
        }

        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Dataset;
    use crate::models::{Money, Transaction};
    use crate::pipeline::{Pipeline, RunOptions};
    use chrono::NaiveDate;

    fn app() -> App {
        let txns = (1..=28)
            .map(|d| {
                let total = Money::from_cents(5_000 + d as i64 * 250);
                Transaction::new(NaiveDate::from_ymd_opt(2023, 2, d).unwrap(), d.to_string())
                    .with_category("Electronics")
                    .with_amounts(1.0, total, total)
            })
            .collect();
        let pipeline = Pipeline::new(RunOptions::new("unused.csv")).unwrap();
        let analysis = pipeline.analyze(Dataset::new(txns, "memory")).unwrap();
        App::new(pipeline, analysis)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, ActiveTab::Spikes);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_tab, ActiveTab::Report);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, ActiveTab::Overview);
    }

    #[test]
    fn test_help_captures_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, ActiveTab::Overview);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_plus_minus_change_top_n() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.top_n(), 20);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.top_n(), 10);
    }

    #[test]
    fn test_rerun_failure_sets_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        let status = app.status_message.clone().unwrap();
        assert!(status.starts_with("Error:"), "{status}");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        )
        .unwrap();
        assert!(app.should_quit);
    }
}
