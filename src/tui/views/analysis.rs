//! New Analysis - data entry, CSV preview and run progress

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::analysis::Progress;
use crate::preview::{EXPECTED_COLUMNS, SAMPLE_INPUT};
use crate::tui::state::{AppState, FormField, InputMode};
use crate::tui::theme::{icons, ChocolateTheme};
use crate::tui::widgets::utils::truncate;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let [form_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

    let [data, period, competitors, file] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(form_area);

    render_data_field(frame, data, state, theme);
    render_line_field(
        frame,
        period,
        state,
        FormField::Period,
        &state.form.period,
        "e.g., March 2024",
        theme,
    );
    render_line_field(
        frame,
        competitors,
        state,
        FormField::Competitors,
        &state.form.competitors,
        "Brand B, Brand C",
        theme,
    );
    render_line_field(
        frame,
        file,
        state,
        FormField::FilePath,
        &state.form.file_path,
        "path/to/data.csv",
        theme,
    );

    let [grid, progress] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(9)]).areas(preview_area);
    render_preview(frame, grid, state, theme);
    render_progress(frame, progress, state, theme);
}

fn field_block<'a>(field: FormField, state: &AppState, theme: &ChocolateTheme) -> Block<'a> {
    let editing = state.input_mode == InputMode::Editing(field);
    let border = if editing {
        theme.focused_border()
    } else {
        theme.border()
    };
    let title = if editing {
        format!(" {} (editing, Esc to finish) ", field.label())
    } else {
        format!(" {} ", field.label())
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, theme.accent()))
}

fn render_data_field(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let input = state.form.input();
    let mut block = field_block(FormField::Data, state, theme);
    if let Some(ref name) = state.form.loaded_file {
        block = block.title_bottom(Span::styled(format!(" {} ", name), theme.dimmed()));
    }

    let body = if input.is_empty() {
        Paragraph::new(SAMPLE_INPUT).style(theme.dimmed())
    } else {
        Paragraph::new(input).style(theme.text())
    };

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = tail_scroll(input.lines().count(), visible);

    frame.render_widget(body.block(block).scroll((scroll, 0)), area);
}

/// Scroll offset that keeps the last lines of the input visible
fn tail_scroll(line_count: usize, visible: usize) -> u16 {
    u16::try_from(line_count.saturating_sub(visible)).unwrap_or(u16::MAX)
}

fn render_line_field(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    field: FormField,
    value: &str,
    placeholder: &str,
    theme: &ChocolateTheme,
) {
    let text = if value.is_empty() {
        Span::styled(placeholder.to_string(), theme.dimmed())
    } else {
        Span::styled(value.to_string(), theme.text())
    };
    frame.render_widget(
        Paragraph::new(Line::from(text)).block(field_block(field, state, theme)),
        area,
    );
}

fn render_preview(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let grid = state.form.preview();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(
            format!(" Data Preview ({} rows) ", grid.len()),
            theme.accent(),
        ));

    let [table_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(block.inner(area));
    frame.render_widget(block, area);

    if grid.is_empty() {
        frame.render_widget(
            Paragraph::new("Paste or type CSV data to see a preview").style(theme.dimmed()),
            table_area,
        );
    } else {
        let columns = grid.column_count().max(1);
        let cell_width = (table_area.width as usize / columns).saturating_sub(1).max(3);
        let cells = |row: &[String]| {
            row.iter()
                .map(|cell| truncate(cell, cell_width))
                .collect::<Vec<_>>()
        };

        let (header, body) = grid.rows().split_at(1);
        let body: Vec<Row> = body
            .iter()
            .map(|row| Row::new(cells(row)).style(theme.text()))
            .collect();
        let table = Table::new(body, vec![Constraint::Fill(1); columns])
            .header(Row::new(cells(&header[0])).style(theme.header()));
        frame.render_widget(table, table_area);
    }

    frame.render_widget(format_hint(state, theme), hint_area);
}

fn format_hint<'a>(state: &AppState, theme: &ChocolateTheme) -> Paragraph<'a> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Expected columns: ", theme.dimmed()),
        Span::styled(EXPECTED_COLUMNS.join(", "), theme.text()),
    ])];

    let missing = state.form.preview().missing_columns();
    if !state.form.preview().is_empty() && !missing.is_empty() {
        lines.push(Line::styled(
            format!("{} Missing: {}", icons::WARNING, missing.join(", ")),
            theme.warning(),
        ));
    }

    Paragraph::new(lines).wrap(Wrap { trim: true })
}

fn render_progress(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let form = &state.form;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Analysis Progress ", theme.accent()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [steps_area, gauge_area, message_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    let steps: Vec<Line> = Progress::STEPS
        .iter()
        .map(|&step| {
            let done = form.progress.has_passed(step);
            let active = form.loading && form.progress == step;
            let icon = if done {
                icons::DONE
            } else if active {
                icons::ACTIVE
            } else {
                icons::PENDING
            };
            let color = Style::default().fg(theme.step_color(done, active));
            Line::from(vec![
                Span::styled(format!(" {} ", icon), color),
                Span::styled(step.label(), color),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(steps), steps_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.caramel_gold).bg(theme.cocoa))
        .percent(form.progress.percent())
        .label(format!("{}%", form.progress.percent()));
    frame.render_widget(gauge, gauge_area);

    let message = if let Some(ref error) = form.error {
        Line::styled(format!("{} {}", icons::WARNING, error), theme.error())
    } else if form.loading {
        Line::styled("Analyzing...", theme.accent())
    } else if form.progress == Progress::Complete {
        Line::styled("Analysis complete", theme.success())
    } else {
        Line::from(vec![
            Span::styled("Press ", theme.dimmed()),
            Span::styled("r", theme.accent()),
            Span::styled(" to run the analysis", theme.dimmed()),
        ])
    };
    frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), message_area);
}
