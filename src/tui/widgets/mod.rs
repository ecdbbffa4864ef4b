//! TUI Widgets - shared rendering helpers
//!
//! Stateless helpers used by more than one view. Business logic stays in
//! the state layer.

use ratatui::text::{Line, Span};

use super::theme::ChocolateTheme;

/// Tab strip with the selected entry highlighted
pub fn tab_line<'a>(titles: &[&'a str], selected: usize, theme: &ChocolateTheme) -> Line<'a> {
    let mut spans = Vec::with_capacity(titles.len() * 2);
    for (i, title) in titles.iter().enumerate() {
        let style = if i == selected {
            theme.highlight()
        } else {
            theme.dimmed()
        };
        spans.push(Span::styled(format!(" {} ", title), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Common widget utilities
pub mod utils {
    /// Percentage with one decimal
    pub fn format_percent(value: f64) -> String {
        format!("{:.1}%", value)
    }

    /// Truncate string with ellipsis, counting characters
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len <= 3 {
            s.chars().take(max_len).collect()
        } else {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{}...", head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("Société Générale", 6), "Soc...");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(46.875), "46.9%");
        assert_eq!(format_percent(100.0), "100.0%");
    }

    #[test]
    fn test_tab_line_has_every_title() {
        let theme = ChocolateTheme::new();
        let line = tab_line(&["One", "Two"], 1, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains(" One "));
        assert!(text.contains(" Two "));
        assert_eq!(line.spans[2].style, theme.highlight());
    }
}
