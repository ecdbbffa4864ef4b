//! Settings - agent endpoint, analysis defaults and notification toggles

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::{mask_api_key, SomSovConfig};
use crate::tui::state::{AppState, SettingsToggle};
use crate::tui::theme::{icons, ChocolateTheme};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let [agent_area, toggles_area, path_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Min(2),
    ])
    .areas(area);

    let config = &state.settings;
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", label), theme.dimmed()),
            Span::styled(value, theme.text()),
        ])
    };
    let api_key = config
        .api_key()
        .map(|k| mask_api_key(k, 8))
        .unwrap_or_else(|| "not set".to_string());
    let period = if config.analysis.default_period.is_empty() {
        "none".to_string()
    } else {
        config.analysis.default_period.clone()
    };

    let agent_lines = vec![
        field("Agent endpoint", config.agent.endpoint.clone()),
        field("API key", api_key),
        field("Market", config.analysis.market_name.clone()),
        field("Default period", period),
        field("Step delay", format!("{} ms", config.analysis.step_delay_ms)),
    ];
    frame.render_widget(
        Paragraph::new(agent_lines).block(section(" Agent ", theme)),
        agent_area,
    );

    let toggle_lines: Vec<Line> = SettingsToggle::ALL
        .iter()
        .enumerate()
        .map(|(i, toggle)| {
            let mark = if toggle.value(config) {
                icons::SELECTED
            } else {
                icons::UNSELECTED
            };
            let style = if i == state.settings_cursor {
                theme.highlight()
            } else {
                theme.text()
            };
            Line::from(vec![
                Span::styled(format!("  {} ", mark), theme.accent()),
                Span::styled(toggle.label(), style),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(toggle_lines).block(section(" Preferences ", theme)),
        toggles_area,
    );

    let path = state
        .config_path
        .clone()
        .unwrap_or_else(SomSovConfig::config_path);
    let footer = Line::from(vec![
        Span::styled("  Saved to ", theme.dimmed()),
        Span::styled(path.display().to_string(), theme.text()),
        Span::styled(" with ", theme.dimmed()),
        Span::styled("s", theme.accent()),
    ]);
    frame.render_widget(Paragraph::new(footer), path_area);
}

fn section<'a>(title: &'a str, theme: &ChocolateTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(title, theme.accent()))
}
