//! Report formatting utilities for terminal output
//!
//! Number formatting and the Unicode text charts shared by the Markdown
//! report and the CLI.

use crate::models::Money;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Format a currency amount with thousands separators
pub fn format_amount(value: f64, symbol: &str) -> String {
    Money::from_f64(value).format_with_symbol(symbol)
}

/// Format a signed number with an explicit `+` and one decimal
pub fn format_signed(value: f64) -> String {
    format!("{:+.1}", value)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar centred on an axis: negatives grow left, positives grow right
///
/// The result is `2 * half_width + 1` characters wide.
pub fn format_signed_bar(value: f64, max_abs: f64, half_width: usize) -> String {
    let filled = if max_abs <= 0.0 {
        0
    } else {
        ((value.abs() / max_abs) * half_width as f64).round() as usize
    }
    .min(half_width);

    let bar = "█".repeat(filled);
    let blank = " ".repeat(half_width - filled);
    let side = " ".repeat(half_width);
    if value < 0.0 {
        format!("{}{}│{}", blank, bar, side)
    } else {
        format!("{}│{}{}", side, bar, blank)
    }
}

/// Shade character for a heatmap cell scaled to `max_value`
pub fn shade(value: Option<f64>, max_value: f64) -> char {
    match value {
        Some(v) if max_value > 0.0 && v > 0.0 => {
            let level = ((v / max_value) * (SHADES.len() - 1) as f64).round() as usize;
            SHADES[level.clamp(1, SHADES.len() - 1)]
        }
        _ => SHADES[0],
    }
}

/// One-line sparkline of a series, scaled between its minimum and maximum
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|v| {
            if range <= 0.0 {
                SPARK_LEVELS[0]
            } else {
                let idx = ((v - min) / range * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
        assert_eq!(format_percentage(-25.0), "-25%");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5, "$"), "$1,234.50");
        assert_eq!(format_amount(-3.0, "€"), "-€3.00");
        assert_eq!(format_signed(2.0), "+2.0");
        assert_eq!(format_signed(-0.5), "-0.5");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_signed_bar() {
        assert_eq!(format_signed_bar(10.0, 10.0, 3), "   │███");
        assert_eq!(format_signed_bar(-5.0, 10.0, 4), "  ██│    ");
        assert_eq!(format_signed_bar(1.0, 0.0, 2), "  │  ");
    }

    #[test]
    fn test_shade_and_sparkline() {
        assert_eq!(shade(None, 10.0), ' ');
        assert_eq!(shade(Some(10.0), 10.0), '█');
        assert_eq!(shade(Some(0.1), 10.0), '░');

        assert_eq!(sparkline(&[1.0, 5.0, 9.0]), "▁▅█");
        assert_eq!(sparkline(&[3.0, 3.0]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Ümlaut café", 6), "Üml...");
    }
}
