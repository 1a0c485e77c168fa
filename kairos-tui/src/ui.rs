//! UI rendering for the TUI.

use kairos_core::DurationUnit;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;

/// Accent color for the active locale and other header values
const ACCENT: Color = Color::Rgb(0, 180, 180);
/// Label color for header attributes
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Dim gray for placeholder and secondary text
const DIM: Color = Color::Rgb(128, 128, 128);
/// Badge color for unbound rows
const BADGE_UNBOUND: Color = Color::Rgb(120, 120, 120);
/// Border color for the filters block
const BORDER_FILTERS: Color = Color::Rgb(80, 160, 80);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(6),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_labels(frame, app, chunks[1]);
    render_filters(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Render the header with the shared settings every label reads.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let display = app.toolkit.config().snapshot();
    let timezone = if display.timezone.is_empty() {
        "local".to_string()
    } else {
        display.timezone
    };
    let suffix_default = if display.without_suffix { "off" } else { "on" };

    let line = Line::from(vec![
        Span::styled("kairos", Style::default().fg(ACCENT).bold()),
        Span::raw("  "),
        Span::styled("locale ", Style::default().fg(LABEL_COLOR)),
        Span::styled(app.toolkit.locale().current(), Style::default().fg(ACCENT)),
        Span::raw("  "),
        Span::styled("suffix default ", Style::default().fg(LABEL_COLOR)),
        Span::raw(suffix_default),
        Span::raw("  "),
        Span::styled("timezone ", Style::default().fg(LABEL_COLOR)),
        Span::raw(timezone),
        Span::raw("  "),
        Span::styled("timers ", Style::default().fg(LABEL_COLOR)),
        Span::raw(app.scheduler.pending().to_string()),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Render the live label table.
fn render_labels(frame: &mut Frame, app: &mut App, area: Rect) {
    let header_cells = ["Label", "Rendered", "Suffix", "Pattern", "Refresh"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1);

    let refresh: Vec<Option<std::time::Duration>> =
        app.labels.iter().map(|row| app.refresh_in(row)).collect();

    let rows = app.labels.iter().zip(refresh).map(|(row, refresh_in)| {
        let rendered = match row.ctrl.text() {
            None => Cell::from("(never bound)").style(Style::default().fg(BADGE_UNBOUND)),
            Some("") => Cell::from("(cleared)").style(Style::default().fg(DIM)),
            Some(text) => Cell::from(text.to_string()),
        };

        let pattern = match row.pattern {
            Some(pattern) if row.pattern_on => Cell::from(pattern),
            Some(_) => Cell::from("auto").style(Style::default().fg(DIM)),
            None => Cell::from("auto").style(Style::default().fg(DIM)),
        };

        let refresh_cell = match refresh_in {
            Some(delay) => Cell::from(format_delay(delay)),
            None => Cell::from("-").style(Style::default().fg(DIM)),
        };

        Row::new([
            Cell::from(row.name),
            rendered,
            Cell::from(row.suffix.label()),
            pattern,
            refresh_cell,
        ])
    });

    let widths = [
        Constraint::Length(12),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(17),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Live labels "),
        )
        .row_highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(Color::Cyan),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Render the one-shot filters applied to the selected row's value.
fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let row = &app.labels[app.selected()];
    let filters = app.toolkit.filters();

    let lines = vec![
        filter_line("source", &format!("{}", row.source)),
        filter_line("calendar", &filters.calendar(&row.source)),
        filter_line(
            "date format",
            &filters.date_format(&row.source, "%a %b %-d, %Y %H:%M"),
        ),
        filter_line(
            "duration",
            &filters.duration(Some(90.0), DurationUnit::Minutes, false),
        ),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_FILTERS))
        .title(format!(" Filters ({}) ", row.name));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn filter_line(name: &'static str, value: &str) -> Line<'static> {
    let value = if value.is_empty() {
        Span::styled("(empty)".to_string(), Style::default().fg(DIM))
    } else {
        Span::raw(value.to_string())
    };
    Line::from(vec![
        Span::styled(format!("{name:<12}"), Style::default().fg(LABEL_COLOR)),
        value,
    ])
}

/// Render the key hint footer.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        "q quit | j/k select | b bind/unbind | s suffix | f pattern | d default | l locale | z timezone",
        Style::default().fg(DIM),
    )]));
    frame.render_widget(footer, area);
}

/// Short delay display for the refresh column.
fn format_delay(delay: std::time::Duration) -> String {
    let secs = delay.as_secs();
    if secs >= 3600 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
