//! TUI Views Module
//!
//! Five mutually exclusive screens selected by [`ActiveView`]:
//!
//! 1. **Dashboard** - headline KPIs, six-month trend, recent analyses
//! 2. **New Analysis** - data entry, preview and run progress
//! 3. **Results** - the stored coordinator result, in four tabs
//! 4. **History** - past analyses, pick two to compare
//! 5. **Settings** - agent endpoint and preferences
//!
//! Any screen is reachable from any other (`1`-`5`, `Tab`, `Shift+Tab`).

mod analysis;
mod dashboard;
mod history;
mod results;
mod settings;

use std::fmt;

use ratatui::{layout::Rect, Frame};

use super::state::AppState;
use super::theme::ChocolateTheme;

pub use results::ResultsTab;

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Analysis,
    Results,
    History,
    Settings,
}

impl ActiveView {
    /// Screens in menu order
    pub const ALL: [ActiveView; 5] = [
        ActiveView::Dashboard,
        ActiveView::Analysis,
        ActiveView::Results,
        ActiveView::History,
        ActiveView::Settings,
    ];

    /// Title for the menu bar
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Analysis => "New Analysis",
            Self::Results => "Results",
            Self::History => "History",
            Self::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Analysis => 1,
            Self::Results => 2,
            Self::History => 3,
            Self::Settings => 4,
        }
    }

    /// View bound to a digit key (`'1'`..=`'5'`)
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dashboard => "dashboard",
            Self::Analysis => "analysis",
            Self::Results => "results",
            Self::History => "history",
            Self::Settings => "settings",
        })
    }
}

/// Render the content area for the active view
pub fn render_view(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    match state.active_view {
        ActiveView::Dashboard => dashboard::render(frame, area, state, theme),
        ActiveView::Analysis => analysis::render(frame, area, state, theme),
        ActiveView::Results => results::render(frame, area, state, theme),
        ActiveView::History => history::render(frame, area, state, theme),
        ActiveView::Settings => settings::render(frame, area, state, theme),
    }
}

/// Key hints shown in the footer for a view
pub fn key_hints(view: ActiveView) -> &'static [(&'static str, &'static str)] {
    match view {
        ActiveView::Dashboard => &[("n", "new analysis")],
        ActiveView::Analysis => &[
            ("i", "edit data"),
            ("p", "period"),
            ("c", "competitors"),
            ("f", "load file"),
            ("x", "clear"),
            ("r", "run"),
        ],
        ActiveView::Results => &[("←/→", "tab"), ("n", "new analysis")],
        ActiveView::History => &[("↑/↓", "move"), ("Space", "select"), ("c", "compare")],
        ActiveView::Settings => &[("↑/↓", "move"), ("Space", "toggle"), ("s", "save")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        assert_eq!(ActiveView::default(), ActiveView::Dashboard);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(ActiveView::Settings.next(), ActiveView::Dashboard);
        assert_eq!(ActiveView::Dashboard.prev(), ActiveView::Settings);
        assert_eq!(ActiveView::Analysis.next(), ActiveView::Results);
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(ActiveView::from_digit('1'), Some(ActiveView::Dashboard));
        assert_eq!(ActiveView::from_digit('5'), Some(ActiveView::Settings));
        assert_eq!(ActiveView::from_digit('0'), None);
        assert_eq!(ActiveView::from_digit('6'), None);
        assert_eq!(ActiveView::from_digit('a'), None);
    }

    #[test]
    fn test_titles() {
        assert_eq!(ActiveView::Analysis.title(), "New Analysis");
        assert_eq!(ActiveView::History.to_string(), "history");
    }
}
