//! Chocolate Theme - Visual Design System
//!
//! Cocoa brown, cream and caramel gold, matching the brand's packaging.

use ratatui::style::{Color, Modifier, Style};

/// Chocolate color palette
pub struct ChocolateTheme {
    // Primary palette
    pub cocoa: Color,
    pub cream: Color,
    pub caramel_gold: Color,
    pub milk_chocolate: Color,

    // Status colors
    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,

    pub muted: Color,
}

impl Default for ChocolateTheme {
    fn default() -> Self {
        Self {
            cocoa: Color::Rgb(61, 35, 20),            // #3D2314
            cream: Color::Rgb(255, 248, 231),         // #FFF8E7
            caramel_gold: Color::Rgb(212, 162, 76),   // #D4A24C
            milk_chocolate: Color::Rgb(150, 98, 62),  // #96623E

            success_green: Color::Rgb(34, 197, 94),   // #22C55E
            warning_orange: Color::Rgb(234, 150, 40), // #EA9628
            error_red: Color::Rgb(220, 38, 38),       // #DC2626

            muted: Color::Rgb(140, 120, 105),
        }
    }
}

impl ChocolateTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.cream)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Bold header style
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.caramel_gold)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent style (gold)
    pub fn accent(&self) -> Style {
        Style::default().fg(self.caramel_gold)
    }

    /// Selected tab / row
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.cocoa)
            .bg(self.caramel_gold)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Borders
    // ─────────────────────────────────────────────────────────────────────

    pub fn border(&self) -> Style {
        Style::default().fg(self.milk_chocolate)
    }

    /// Border of the field currently receiving text
    pub fn focused_border(&self) -> Style {
        Style::default()
            .fg(self.caramel_gold)
            .add_modifier(Modifier::BOLD)
    }

    /// Color for a progress step relative to the current step
    pub fn step_color(&self, done: bool, active: bool) -> Color {
        match (done, active) {
            (true, _) => self.success_green,
            (false, true) => self.caramel_gold,
            _ => self.muted,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod icons {
    pub const BRAND: &str = "◉";
    pub const DONE: &str = "✓";
    pub const ACTIVE: &str = "◉";
    pub const PENDING: &str = "○";
    pub const TREND_UP: &str = "▲";
    pub const WARNING: &str = "⚠";
    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const BULLET: &str = "•";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = ChocolateTheme::new();
        assert_eq!(theme.cocoa, Color::Rgb(61, 35, 20));
        assert_eq!(theme.cream, Color::Rgb(255, 248, 231));
        assert_eq!(theme.caramel_gold, Color::Rgb(212, 162, 76));
    }

    #[test]
    fn test_step_colors() {
        let theme = ChocolateTheme::new();
        assert_eq!(theme.step_color(true, false), theme.success_green);
        assert_eq!(theme.step_color(false, true), theme.caramel_gold);
        assert_eq!(theme.step_color(false, false), theme.muted);
    }
}
