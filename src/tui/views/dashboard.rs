//! Dashboard - headline KPIs, six-month trend and recent analyses

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::placeholders::{is_efficient, Kpi, EFFICIENCY_RATIO, HISTORY, SOM_KPI, SOV_KPI, TREND};
use crate::tui::state::AppState;
use crate::tui::theme::{icons, ChocolateTheme};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let [kpi_area, trend_area, recent_area, prompt_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Length(7),
        Constraint::Length(1),
    ])
    .areas(area);

    let [som, sov, ratio] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(kpi_area);
    render_kpi(frame, som, &SOM_KPI, theme);
    render_kpi(frame, sov, &SOV_KPI, theme);
    render_ratio(frame, ratio, theme);

    render_trend(frame, trend_area, state, theme);
    render_recent(frame, recent_area, theme);

    let prompt = Line::from(vec![
        Span::styled(" Press ", theme.dimmed()),
        Span::styled("n", theme.accent()),
        Span::styled(" to start a new analysis", theme.dimmed()),
    ]);
    frame.render_widget(Paragraph::new(prompt), prompt_area);
}

fn card<'a>(title: &'a str, theme: &ChocolateTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(format!(" {} ", title), theme.dimmed()))
}

fn render_kpi(frame: &mut Frame, area: Rect, kpi: &Kpi, theme: &ChocolateTheme) {
    let mut headline = vec![Span::styled(kpi.value, theme.header())];
    if let Some(change) = kpi.change {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(
            format!("{} {}", icons::TREND_UP, change),
            theme.success(),
        ));
    }

    let lines = vec![Line::from(headline), Line::styled(kpi.caption, theme.dimmed())];
    frame.render_widget(Paragraph::new(lines).block(card(kpi.label, theme)), area);
}

fn render_ratio(frame: &mut Frame, area: Rect, theme: &ChocolateTheme) {
    let mut headline = vec![Span::styled(format!("{:.2}", EFFICIENCY_RATIO), theme.header())];
    if is_efficient(EFFICIENCY_RATIO) {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(" Efficient ", theme.highlight()));
    }

    let lines = vec![
        Line::from(headline),
        Line::styled("Above 1.0 target", theme.dimmed()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(card("SOV/SOM Ratio", theme)),
        area,
    );
}

fn render_trend(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let brand = Style::default().fg(theme.caramel_gold);
    let brand_voice = Style::default().fg(theme.cream);
    let rival = Style::default().fg(theme.milk_chocolate);
    let rival_voice = Style::default().fg(theme.muted);

    // Bar heights are tenths of a percent so 13.5 keeps its half step.
    let bar = |value: f64, style: Style| {
        Bar::default()
            .value((value * 10.0).round() as u64)
            .text_value(format!("{}", value))
            .style(style)
    };

    let title = format!(" 6-Month Performance Trend · {} ", state.market_name());
    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(title, theme.header()))
                .title_bottom(Line::from(vec![
                    Span::styled(" ■ Brand SOM ", brand),
                    Span::styled("■ Brand SOV ", brand_voice),
                    Span::styled("■ Competitor SOM ", rival),
                    Span::styled("■ Competitor SOV ", rival_voice),
                ])),
        )
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .label_style(theme.dimmed());

    for point in TREND.iter() {
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(point.month))
                .bars(&[
                    bar(point.brand_som, brand),
                    bar(point.brand_sov, brand_voice),
                    bar(point.competitor_som, rival),
                    bar(point.competitor_sov, rival_voice),
                ]),
        );
    }

    frame.render_widget(chart, area);
}

fn render_recent(frame: &mut Frame, area: Rect, theme: &ChocolateTheme) {
    let rows = HISTORY.iter().map(|entry| {
        let status = if entry.succeeded {
            theme.success()
        } else {
            theme.error()
        };
        Row::new(vec![
            Span::styled(entry.date, theme.text()),
            Span::styled(entry.period, theme.text()),
            Span::styled(entry.brands.to_string(), theme.text()),
            Span::styled(entry.status_label(), status),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Min(8),
        ],
    )
    .header(Row::new(["Date", "Period", "Brands", "Status"]).style(theme.accent()))
    .block(card("Recent Analyses", theme));

    frame.render_widget(table, area);
}
