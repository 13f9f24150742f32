//! # QueryForm Component
//!
//! The "Submit New Query" card: an editable text area seeded with a
//! placeholder prompt, and a Submit button that shows a spinner while a
//! submission is in flight.
//!
//! ## State Management
//!
//! The draft buffer and cursor are internal state, created empty and
//! discarded when the form is torn down after navigation. `submitting` and
//! `spinner_frame` are props synced from application state each frame; the
//! form is interactive iff `submitting` is false.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::state::PLACEHOLDER_QUERY;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Border (2) + padding (2) consumed horizontally by the bordered text area
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border width)
const BORDER_OFFSET: u16 = 1;

/// High-level events emitted by the QueryForm
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// User pressed Enter. Carries the draft verbatim — possibly empty;
    /// the placeholder substitution is the reducer's job.
    Submit(String),
    /// Draft content changed.
    ContentChanged,
}

/// The query submission form.
///
/// # Props
///
/// - `submitting`: whether a submission is in flight (from App state)
/// - `spinner_frame`: animation frame index for the button spinner
///
/// # State
///
/// - `buffer`: the draft text
/// - `cursor`: byte offset of the cursor within `buffer`
pub struct QueryForm {
    pub buffer: String,
    cursor: usize,
    pub submitting: bool,
    pub spinner_frame: usize,
}

impl QueryForm {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            submitting: false,
            spinner_frame: 0,
        }
    }

    /// Cursor screen position inside the text area, following the wrapped
    /// layout of the text before the cursor.
    fn cursor_screen_pos(&self, area: Rect) -> (u16, u16) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let before = &self.buffer[..self.cursor];
        let options = textwrap::Options::new(width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(before, &options);

        let mut row = lines.len().saturating_sub(1) as u16;
        // textwrap drops a trailing newline's empty line
        if before.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
            row += 1;
        }

        // Column from the last logical line, not the wrapped segment length:
        // textwrap trims trailing whitespace from segments.
        let logical_line = &before[before.rfind('\n').map(|i| i + 1).unwrap_or(0)..];
        let wrapped = textwrap::wrap(logical_line, &options);
        let col = if wrapped.len() <= 1 {
            logical_line.chars().count() as u16
        } else {
            let prev_chars: usize = wrapped
                .iter()
                .take(wrapped.len() - 1)
                .map(|seg| seg.chars().count())
                .sum();
            (logical_line.chars().count() - prev_chars) as u16
        };

        (
            area.x + BORDER_OFFSET + col.min(width),
            area.y + BORDER_OFFSET + row,
        )
    }

    fn render_text_area(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = if self.buffer.is_empty() {
            // Platform placeholder semantics: shown, never part of the value.
            (
                PLACEHOLDER_QUERY.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            (self.buffer.clone(), Style::default().fg(Color::White))
        };

        let border_style = if self.submitting {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let text_area = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title("Query"),
            );
        frame.render_widget(text_area, area);

        if !self.submitting {
            frame.set_cursor_position(self.cursor_screen_pos(area));
        }
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        let button = if self.submitting {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Yellow)),
                Span::styled("Submit", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(Span::styled(
                "[ Submit ]",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        frame.render_widget(
            Paragraph::new(button).alignment(Alignment::Right),
            area,
        );
    }
}

impl Default for QueryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for QueryForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        let card = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Submit New Query")
            .title_bottom(Line::from("Solaris AI").right_aligned());
        let inner = card.inner(area);
        frame.render_widget(card, area);

        let [description_area, text_area, button_area] =
            Layout::vertical([Length(1), Min(3), Length(1)]).areas(inner);

        let description = Paragraph::new("Ask a question about the solar power dataset.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(description, description_area);

        self.render_text_area(frame, text_area);
        self.render_button(frame, button_area);
    }
}

impl EventHandler for QueryForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // Mirrors the disabled field and button: nothing is interactive
        // while a submission is in flight.
        if self.submitting {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(FormEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(FormEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(FormEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(FormEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(FormEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(FormEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    FormEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    FormEvent::ContentChanged
                })
            }
            // No precondition on submitting: an empty draft is valid and the
            // reducer substitutes the placeholder text. The draft stays in
            // the buffer so a failed submission can be retried as-is.
            TuiEvent::Submit => Some(FormEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

/// Byte offset of the previous character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
