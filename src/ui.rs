//! UI rendering for the terminal user interface.
//!
//! Drawing reads the `App` and its last rendered `BoardView`; it holds no
//! state of its own and never talks to the store.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Form, LoadState, Mode};
use crate::config::UiSettings;
use crate::present::BoardView;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("v/enter", "vote");
    map.insert("a", "add song");
    map.insert("e", "edit");
    map.insert("d", "delete");
    map.insert("/", "search");
    map.insert("esc", "clear search");
    map.insert("r", "reload");
    map.insert("q", "quit");
    map
});

const FORM_CONTROLS: &str = "[tab] next field | [enter] submit | [esc] cancel";

fn controls_text() -> String {
    let order = [
        "j/k", "gg/G", "v/enter", "a", "e", "d", "/", "esc", "r", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mode = match app.mode {
        Mode::Browse if app.is_searching() => "SEARCH RESULTS",
        Mode::Browse => "BROWSE",
        Mode::Add => "ADD",
        Mode::Search => "SEARCH",
        Mode::Edit => "EDIT",
    };
    parts.push(format!(" MODE: {}", mode));

    match app.load {
        LoadState::Loading => parts.push("Loading".to_string()),
        LoadState::Loaded => parts.push(format!("Songs: {}", app.board.len())),
    }

    if app.has_pending() {
        let mut pending = Vec::new();
        if app.pending_creates > 0 {
            pending.push(format!("{} add", app.pending_creates));
        }
        if !app.pending_deletes.is_empty() {
            pending.push(format!("{} delete", app.pending_deletes.len()));
        }
        if app.pending_edit {
            pending.push("1 edit".to_string());
        }
        parts.push(format!("Pending: {}", pending.join(", ")));
    }

    if let Some(notice) = &app.notice {
        parts.push(notice.text.clone());
    }

    parts.join(" • ")
}

fn form_lines(form: &Form) -> Vec<Line<'_>> {
    form.labels
        .iter()
        .zip(form.values.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let focused = i == form.focus;
            let marker = if focused { "> " } else { "  " };
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(format!("{label}: "), Style::default().bold()),
                Span::raw(value.as_str()),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().slow_blink()));
            }
            Line::from(spans)
        })
        .collect()
}

fn form_title(mode: Mode) -> &'static str {
    match mode {
        Mode::Add => " add song ",
        Mode::Search => " search store ",
        Mode::Edit => " edit song ",
        Mode::Browse => "",
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" musictop ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app))
        .block(Block::bordered().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let list_title = if app.is_searching() {
        " search results "
    } else {
        " top songs "
    };
    let list_block = Block::default().borders(Borders::ALL).title(list_title);
    match &app.view {
        BoardView::Empty { text } => {
            let empty = Paragraph::new(text.as_str())
                .alignment(Alignment::Center)
                .block(list_block);
            frame.render_widget(empty, chunks[2]);
        }
        BoardView::Items(fragments) => {
            let items: Vec<ListItem> = fragments
                .iter()
                .enumerate()
                .map(|(i, f)| ListItem::new(format!("{:>2}. {}", i + 1, f.line)))
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(app.selected));
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }
    }

    // Popup form over the list area.
    if let Some(form) = app.active_form() {
        let popup_area = centered_rect_sized(56, 6, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let mut lines = form_lines(form);
        lines.push(Line::from(""));
        lines.push(Line::from(FORM_CONTROLS).italic());
        let popup = Paragraph::new(lines).block(
            Block::default()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .borders(Borders::ALL)
                .title(form_title(app.mode)),
        );
        frame.render_widget(popup, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
