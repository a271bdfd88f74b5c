//! Drawing
//!
//! The editor pane is painted line by line. On the caret line the ghost
//! text from the current [`Decoration`] is appended after the typed text and
//! the caret cell is shown reversed, so the suggestion reads as a dimmed
//! continuation of the paragraph.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::editor::TextAreaHost;
use crate::suggestion::Decoration;

/// Style of inline suggestion text
pub fn ghost_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// Top-left corner of the visible part of the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub top_row: usize,
    pub scroll_col: usize,
}

impl Viewport {
    /// Scroll just enough to keep the caret on screen
    pub fn follow(&mut self, cursor: (usize, usize), line_len: usize, height: usize, width: usize) {
        let (row, col) = cursor;

        if height > 0 {
            if row < self.top_row {
                self.top_row = row;
            } else if row >= self.top_row + height {
                self.top_row = row + 1 - height;
            }
        }

        if width == 0 {
            return;
        }

        let mut scroll = self.scroll_col;
        if col < scroll {
            scroll = col;
        } else if col >= scroll + width {
            scroll = col + 1 - width;
        }

        if line_len < scroll + width {
            let min_scroll = line_len.saturating_sub(width);
            let max_scroll_for_cursor = col.saturating_sub(width - 1);
            scroll = scroll.min(min_scroll.max(max_scroll_for_cursor));
        }

        self.scroll_col = scroll;
    }
}

/// Spans for one document line, with the caret and ghost text when given
///
/// Ghost text only exists at the end of the caret line, so the caret either
/// sits on a typed character or on the first ghost cell.
pub fn editor_line(
    line: &str,
    cursor_col: Option<usize>,
    ghost: Option<&str>,
) -> Vec<Span<'static>> {
    // Inline hint: line breaks inside the suggestion render as spaces
    let ghost = ghost.map(|g| g.replace('\n', " "));
    let mut spans = Vec::new();

    let Some(col) = cursor_col else {
        if !line.is_empty() {
            spans.push(Span::raw(line.to_string()));
        }
        if let Some(ghost) = ghost {
            spans.push(Span::styled(ghost, ghost_style()));
        }
        return spans;
    };

    let mut typed = line.chars();
    let before: String = typed.by_ref().take(col).collect();
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }

    match typed.next() {
        Some(under) => {
            spans.push(Span::styled(
                under.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
            let after: String = typed.collect();
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
            if let Some(ghost) = ghost {
                spans.push(Span::styled(ghost, ghost_style()));
            }
        }
        None => {
            let mut ghost_chars = ghost.as_deref().unwrap_or_default().chars();
            match ghost_chars.next() {
                Some(first) => {
                    spans.push(Span::styled(
                        first.to_string(),
                        ghost_style().add_modifier(Modifier::REVERSED),
                    ));
                    let rest: String = ghost_chars.collect();
                    if !rest.is_empty() {
                        spans.push(Span::styled(rest, ghost_style()));
                    }
                }
                None => spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                )),
            }
        }
    }

    spans
}

/// Keep only the columns `[scroll_col, scroll_col + width)`
fn clip_to_viewport(spans: &[Span<'static>], scroll_col: usize, width: usize) -> Vec<Span<'static>> {
    let view_end = scroll_col + width;
    let mut span_start = 0;
    let mut clipped = Vec::new();

    for span in spans {
        let span_end = span_start + span.content.chars().count();
        let from = span_start.max(scroll_col);
        let to = span_end.min(view_end);
        if from < to {
            let text: String = span
                .content
                .chars()
                .skip(from - span_start)
                .take(to - from)
                .collect();
            clipped.push(Span::styled(text, span.style));
        }
        span_start = span_end;
    }

    clipped
}

/// Render the whole screen: editor pane on top, status line below
pub fn render(app: &mut App, frame: &mut Frame) {
    let [editor_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    let title = match &app.file {
        Some(path) => format!(" ghostwrite: {} ", path.display()),
        None => " ghostwrite ".to_string(),
    };
    let decoration = app.engine.decoration(&app.host);

    render_editor(
        frame,
        editor_area,
        &app.host,
        decoration.as_ref(),
        &mut app.viewport,
        &title,
    );
    render_status(frame, status_area, &app.status, app.hint());
}

pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    host: &TextAreaHost,
    decoration: Option<&Decoration>,
    viewport: &mut Viewport,
    title: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::Cyan));

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines = host.lines();
    let (cursor_row, cursor_col) = host.cursor();
    let cursor_line_len = lines.get(cursor_row).map_or(0, |l| l.chars().count());
    viewport.follow((cursor_row, cursor_col), cursor_line_len, inner_height, inner_width);

    let rendered: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(viewport.top_row)
        .take(inner_height)
        .map(|(row, line)| {
            let spans = if row == cursor_row {
                editor_line(line, Some(cursor_col), decoration.map(|d| d.text.as_str()))
            } else {
                editor_line(line, None, None)
            };
            Line::from(clip_to_viewport(&spans, viewport.scroll_col, inner_width))
        })
        .collect();

    frame.render_widget(Paragraph::new(rendered).block(block), area);
}

pub fn render_status(frame: &mut Frame, area: Rect, message: &str, hint: &str) {
    let hint = format!("{} ", hint);
    let [message_area, hint_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(hint.chars().count() as u16),
    ])
    .areas(area);

    let message = Paragraph::new(Line::from(Span::styled(
        format!(" {}", message),
        Style::default().fg(Color::Gray),
    )));
    let hint = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::Yellow),
    )))
    .alignment(Alignment::Right);

    frame.render_widget(message, message_area);
    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
