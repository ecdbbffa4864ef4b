//! Results - the stored coordinator result
//!
//! Without a stored payload the screen shows the "No Analysis Data" notice
//! and never reads nested fields.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::agent::{AgentResult, AnalysisCoordinatorResult};
use crate::tui::state::AppState;
use crate::tui::theme::{icons, ChocolateTheme};
use crate::tui::widgets::{tab_line, utils::format_percent};

/// Tabs of the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsTab {
    #[default]
    Metrics,
    Trends,
    CompetitiveIntel,
    Recommendations,
}

impl ResultsTab {
    pub const ALL: [ResultsTab; 4] = [
        ResultsTab::Metrics,
        ResultsTab::Trends,
        ResultsTab::CompetitiveIntel,
        ResultsTab::Recommendations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Metrics => "Metrics",
            Self::Trends => "Trends",
            Self::CompetitiveIntel => "Competitive Intel",
            Self::Recommendations => "Recommendations",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    match state.stored_result() {
        Some(AgentResult::Coordinator(result)) => {
            render_result(frame, area, state, &result, theme)
        }
        Some(AgentResult::Unrecognized(value)) => render_raw(frame, area, &value, theme),
        Some(_) | None => render_empty(frame, area, theme),
    }
}

fn render_empty(frame: &mut Frame, area: Rect, theme: &ChocolateTheme) {
    let lines = vec![
        Line::from(""),
        Line::styled("No Analysis Data", theme.header()),
        Line::from(""),
        Line::styled("Run an analysis to see results here.", theme.dimmed()),
        Line::from(vec![
            Span::styled("Press ", theme.dimmed()),
            Span::styled("n", theme.accent()),
            Span::styled(" to start a new analysis", theme.dimmed()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_raw(frame: &mut Frame, area: Rect, value: &serde_json::Value, theme: &ChocolateTheme) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Unrecognized Result ", theme.warning()));
    frame.render_widget(
        Paragraph::new(text)
            .style(theme.text())
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn render_result(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    result: &AnalysisCoordinatorResult,
    theme: &ChocolateTheme,
) {
    let [banner, tabs, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
    ])
    .areas(area);

    render_banner(frame, banner, result, theme);

    let titles: Vec<&str> = ResultsTab::ALL.iter().map(|t| t.title()).collect();
    frame.render_widget(
        Paragraph::new(tab_line(&titles, state.results_tab.index(), theme)),
        tabs,
    );

    let lines = match state.results_tab {
        ResultsTab::Metrics => metrics_lines(result, theme),
        ResultsTab::Trends => {
            section(
                "Market Trends",
                &result.competitive_insights.market_trends,
                theme,
            )
        }
        ResultsTab::CompetitiveIntel => {
            let insights = &result.competitive_insights;
            let mut lines = section("Competitor Activities", &insights.competitor_activities, theme);
            lines.push(Line::from(""));
            lines.extend(section(
                "Industry Developments",
                &insights.industry_developments,
                theme,
            ));
            lines
        }
        ResultsTab::Recommendations => {
            let recs = &result.strategic_recommendations;
            let mut lines = section("Priority Actions", &recs.priority_actions, theme);
            lines.push(Line::from(""));
            lines.extend(section("Risk Areas", &recs.risk_areas, theme));
            lines.push(Line::from(""));
            lines.extend(section("Opportunity Areas", &recs.opportunity_areas, theme));
            lines
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(
            format!(" {} ", state.results_tab.title()),
            theme.accent(),
        ));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        body,
    );
}

fn render_banner(
    frame: &mut Frame,
    area: Rect,
    result: &AnalysisCoordinatorResult,
    theme: &ChocolateTheme,
) {
    let summary = &result.validation_summary;
    let (icon, style) = if summary.is_valid() {
        (icons::DONE, theme.success())
    } else {
        (icons::WARNING, theme.warning())
    };
    let status = if summary.data_quality_status.is_empty() {
        "Unknown"
    } else {
        summary.data_quality_status.as_str()
    };

    let mut spans = vec![
        Span::styled(format!(" {} Data Quality: {}", icon, status), style),
        Span::styled(
            format!("  ·  {} brands analyzed", summary.total_brands_analyzed),
            theme.text(),
        ),
    ];
    if !summary.issues_found.is_empty() {
        spans.push(Span::styled(
            format!("  ·  {} issues found", summary.issues_found.len()),
            theme.warning(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn metrics_lines<'a>(result: &AnalysisCoordinatorResult, theme: &ChocolateTheme) -> Vec<Line<'a>> {
    let metrics = &result.market_metrics;
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<26}", label), theme.dimmed()),
            Span::styled(value, theme.text()),
        ])
    };

    let mut lines = vec![
        row("Total Market Share", format_percent(metrics.total_market_share)),
        row("Total Voice Share", format_percent(metrics.total_voice_share)),
        row("Top Brand SOM", format_percent(metrics.top_brand_som)),
        row("Top Brand SOV", format_percent(metrics.top_brand_sov)),
    ];

    let leader = if metrics.efficiency_leader.is_empty() {
        "n/a".to_string()
    } else {
        metrics.efficiency_leader.clone()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<26}", "Efficiency Leader"), theme.dimmed()),
        Span::styled(leader, theme.highlight()),
        Span::styled("  Highest SOV/SOM ratio", theme.dimmed()),
    ]));
    lines
}

fn section<'a>(title: &str, items: &[String], theme: &ChocolateTheme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::styled(title.to_string(), theme.header())];
    if items.is_empty() {
        lines.push(Line::styled("  None reported", theme.dimmed()));
    }
    lines.extend(items.iter().map(|item| {
        Line::from(vec![
            Span::styled(format!("  {} ", icons::BULLET), theme.accent()),
            Span::styled(item.clone(), theme.text()),
        ])
    }));
    lines
}
