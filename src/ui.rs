use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::App;
use crate::models::Overlay;
use crate::theme::Theme;
use crate::utils::{page_report, range_report, text_or_dash, truncate, year_or_dash};

const COLUMN_TITLES: [&str; 5] = [
    "Title",
    "Place of Origin",
    "Artist Display",
    "Date Start",
    "Date End",
];

/// Renders the artworks screen and whichever overlay is open.
pub fn render(f: &mut Frame, app: &App, theme: &Theme) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(3),    // table
            Constraint::Length(1), // paginator
            Constraint::Length(3), // footer
        ])
        .split(area);

    render_title(f, app, theme, chunks[0]);
    render_table(f, app, theme, chunks[1]);
    render_paginator(f, app, theme, chunks[2]);
    render_footer(f, app, theme, chunks[3]);

    match &app.overlay {
        Overlay::None => {}
        Overlay::PageSizePrompt { input } => render_prompt(f, input, theme),
        Overlay::Alert { message } => render_alert(f, message, theme),
        Overlay::SelectionSummary => render_selection_summary(f, app, theme),
    }
}

fn render_title(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled("Artworks", theme.title)];
    if app.is_loading() {
        spans.push(Span::styled("  loading…", theme.loading));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

/// `[x]` when every visible row is selected, `[-]` for some, `[ ]` for none.
fn header_checkbox(app: &App) -> &'static str {
    if app.all_visible_selected() {
        "[x]"
    } else if app.visible_selection().is_empty() {
        "[ ]"
    } else {
        "[-]"
    }
}

fn render_table(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let header = Row::new(
        std::iter::once(Cell::from(header_checkbox(app)))
            .chain(COLUMN_TITLES.iter().map(|t| Cell::from(*t))),
    )
    .style(theme.table_header)
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .map(|artwork| {
            let selected = app.is_selected(artwork.id);
            let checkbox = if selected {
                Cell::from("[x]").style(theme.checkbox_on)
            } else {
                Cell::from("[ ]").style(theme.checkbox_off)
            };
            let row = Row::new(vec![
                checkbox,
                Cell::from(text_or_dash(artwork.title.as_deref())),
                Cell::from(text_or_dash(artwork.place_of_origin.as_deref())),
                Cell::from(text_or_dash(artwork.artist_display.as_deref())),
                Cell::from(year_or_dash(artwork.date_start)),
                Cell::from(year_or_dash(artwork.date_end)),
            ]);
            if selected {
                row.style(theme.selected_row)
            } else {
                row.style(Style::default().fg(theme.text))
            }
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(35),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!("Rows per page: {}", app.pagination.page_size()));

    if rows.is_empty() {
        let placeholder = Paragraph::new(if app.is_loading() {
            "Loading artworks..."
        } else {
            "No artworks to show."
        })
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_secondary));
        f.render_widget(placeholder, area);
        return;
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(theme.cursor_row.bg(theme.cursor_bg))
        .highlight_symbol("→ ");
    let mut state = TableState::default().with_selected(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_paginator(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let pagination = &app.pagination;
    let pager_style = |enabled: bool| {
        if enabled {
            theme.pager_enabled
        } else {
            theme.pager_disabled
        }
    };
    let prev_style = pager_style(pagination.has_prev());
    let next_style = pager_style(pagination.has_next());

    let line = Line::from(vec![
        Span::styled("‹ Prev", prev_style),
        Span::raw("  "),
        Span::styled(page_report(pagination), Style::default().fg(theme.text)),
        Span::raw("  "),
        Span::styled("Next ›", next_style),
        Span::raw("    "),
        Span::styled(
            range_report(pagination, app.records.len()),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("    "),
        Span::styled(format!("{} selected", app.selection.len()), theme.selection_count),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let select_all_label = if app.all_visible_selected() {
        "Deselect All"
    } else {
        "Select All"
    };
    let loaded = app
        .last_loaded
        .map(|t| format!(" | Loaded {}", t.format("%H:%M:%S")))
        .unwrap_or_default();
    let footer = Paragraph::new(format!(
        "↑/↓ j/k Move | <Space> Select | a {} | ←/→ h/l Page | [/] First/Last | r Rows per page | s Selection | c Copy ids | q Quit{}",
        select_all_label, loaded
    ))
    .block(Block::default().borders(Borders::ALL))
    .style(theme.footer);
    f.render_widget(footer, area);
}

fn render_prompt(f: &mut Frame, input: &str, theme: &Theme) {
    let popup_area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, popup_area);

    let input_line = if input.is_empty() {
        Line::from(Span::styled("Select no. of rows", theme.footer))
    } else {
        Line::from(Span::styled(format!("{input}_"), theme.input))
    };
    let lines = vec![
        input_line,
        Line::from(""),
        Line::from(Span::styled("Enter Submit | Esc Cancel", theme.footer)),
    ];
    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled("Rows per page", theme.popup_title))
                .borders(Borders::ALL)
                .style(theme.popup_border),
        )
        .style(theme.popup_text);
    f.render_widget(para, popup_area);
}

fn render_alert(f: &mut Frame, message: &str, theme: &Theme) {
    let popup_area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, popup_area);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press Enter to continue", theme.footer)),
    ];
    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Alert")
                .borders(Borders::ALL)
                .style(theme.alert_border),
        )
        .wrap(Wrap { trim: true })
        .style(theme.popup_text);
    f.render_widget(para, popup_area);
}

fn render_selection_summary(f: &mut Frame, app: &App, theme: &Theme) {
    let popup_area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, popup_area);

    let mut lines = Vec::new();
    if app.selection.is_empty() {
        lines.push(Line::from(Span::styled(
            "No artworks selected. Press <Space> to select rows.",
            Style::default().fg(theme.text_secondary),
        )));
    } else {
        for id in app.selection.iter() {
            let title = app.title_of(id).map(|t| truncate(t, 60)).unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(format!("{id:>8}  "), theme.selection_count),
                Span::raw(title),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("c Copy ids | Esc Close", theme.footer)));

    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(
                    format!("Selected Artworks ({})", app.selection.len()),
                    theme.popup_title,
                ))
                .borders(Borders::ALL)
                .style(theme.popup_border),
        )
        .style(theme.popup_text);
    f.render_widget(para, popup_area);
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Percentage((100-percent_y)/2), Constraint::Percentage(percent_y), Constraint::Percentage((100-percent_y)/2)]).split(r)[1];
    Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Percentage((100-percent_x)/2), Constraint::Percentage(percent_x), Constraint::Percentage((100-percent_x)/2)]).split(vertical)[1]
}
