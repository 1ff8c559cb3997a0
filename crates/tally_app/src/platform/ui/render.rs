use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tally_core::{AppViewModel, CountDisplay, ModelRowView, Stage};

use super::constants::*;
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel, cursor: usize) {
    let regions = layout::split(frame.area());

    render_picker(frame, view, cursor, regions.picker);
    render_drop_zone(frame, view, regions.drop_zone);
    render_status(frame, view, regions.status);
    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        regions.help,
    );
}

fn render_picker(frame: &mut Frame, view: &AppViewModel, cursor: usize, area: Rect) {
    let (rows, cursor_row) = picker_rows(&view.models, cursor);
    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|row| match row {
            PickerRow::Group(name) => ListItem::new(Line::from(Span::styled(
                name,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            PickerRow::Model(model) => ListItem::new(format_model_row(model)),
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(PICKER_TITLE),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut state = ListState::default();
    state.select(cursor_row);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_drop_zone(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let border_style = match view.stage {
        Stage::Reading | Stage::Counting => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Gray),
    };
    let text = vec![
        Line::default(),
        Line::from(DROP_HINT),
        Line::from(Span::styled(
            DROP_SUBHINT,
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let zone = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(border_style)
            .title(TITLE),
    );
    frame.render_widget(zone, area);
}

fn render_status(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let mut lines = Vec::new();
    match status_text(view) {
        Some(text) => lines.push(Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from(Span::styled(
            "No file loaded",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(format!("Model: {}", model_label(view))));
    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let status = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(status, area);
}

enum PickerRow<'a> {
    Group(&'a str),
    Model(&'a ModelRowView),
}

/// Interleaves group headings with model rows and maps the model cursor to a
/// list row.
fn picker_rows(models: &[ModelRowView], cursor: usize) -> (Vec<PickerRow<'_>>, Option<usize>) {
    let mut rows = Vec::with_capacity(models.len() * 2);
    let mut cursor_row = None;
    let mut current_group: Option<&str> = None;

    for (index, model) in models.iter().enumerate() {
        if current_group != Some(model.group.as_str()) {
            current_group = Some(model.group.as_str());
            rows.push(PickerRow::Group(model.group.as_str()));
        }
        if index == cursor {
            cursor_row = Some(rows.len());
        }
        rows.push(PickerRow::Model(model));
    }
    (rows, cursor_row)
}

fn format_model_row(model: &ModelRowView) -> String {
    let marker = if model.selected { "●" } else { "○" };
    let kind = if model.exact { "" } else { " ~" };
    format!("{marker} {}{kind}", model.label)
}

fn model_label(view: &AppViewModel) -> String {
    match view.models.iter().find(|row| row.selected) {
        Some(row) => row.label.clone(),
        None => format!("{} (unknown)", view.selected_model),
    }
}

/// `name — 1,234 tokens (estimate)`, `name — Processing...`, or just `name`
/// after a failure. `None` until a file has been dropped.
pub fn status_text(view: &AppViewModel) -> Option<String> {
    let name = view.file_name.as_deref()?;
    let text = match view.count {
        CountDisplay::Pending => format!("{name} — Processing..."),
        CountDisplay::Counted { count, is_estimate } => {
            let unit = if count == 1 { "token" } else { "tokens" };
            let suffix = if is_estimate { " (estimate)" } else { "" };
            format!("{name} — {} {unit}{suffix}", format_with_commas(count))
        }
        CountDisplay::Unavailable => name.to_string(),
    };
    Some(text)
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
