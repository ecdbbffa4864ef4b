//! History - past analyses, up to two selectable for comparison

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::placeholders::{HISTORY, MAX_COMPARE};
use crate::tui::state::AppState;
use crate::tui::theme::{icons, ChocolateTheme};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let [header, table_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(5)]).areas(area);

    let compare_style = if state.history.can_compare() {
        theme.highlight()
    } else {
        theme.dimmed()
    };
    let heading = Line::from(vec![
        Span::styled(" Analysis History  ", theme.header()),
        Span::styled(
            format!(
                " Compare Selected ({}/{}) ",
                state.history.len(),
                MAX_COMPARE
            ),
            compare_style,
        ),
    ]);
    frame.render_widget(Paragraph::new(heading), header);

    let rows = HISTORY.iter().enumerate().map(|(i, entry)| {
        let mark = if state.history.contains(entry.id) {
            icons::SELECTED
        } else {
            icons::UNSELECTED
        };
        let status = if entry.succeeded {
            theme.success()
        } else {
            theme.error()
        };
        let row = Row::new(vec![
            Span::styled(mark, theme.accent()),
            Span::styled(entry.date, theme.text()),
            Span::styled(entry.period, theme.text()),
            Span::styled(entry.brands.to_string(), theme.text()),
            Span::styled(entry.status_label(), status),
            Span::styled(entry.key_finding, theme.text()),
        ]);
        if i == state.history_cursor {
            row.style(theme.highlight())
        } else {
            row
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(15),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(["", "Date", "Period", "Brands", "Status", "Key Finding"]).style(theme.accent()),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border()),
    );

    frame.render_widget(table, table_area);
}
