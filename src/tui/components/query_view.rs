//! # QueryView Component
//!
//! The results view behind `/viewQuery?query_id=...`. Shows the submitted
//! question, then the answer and its sources once the RAG pipeline has
//! completed. While the record is pending the view shows a spinner; the
//! event loop keeps polling in the background.
//!
//! Stateless: all data arrives as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::api::QueryRecord;
use crate::tui::component::Component;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Results view for a submitted query.
///
/// # Props
///
/// - `query_id`: the id being viewed (shown while the record loads)
/// - `record`: the fetched record, None until the first fetch lands
/// - `spinner_frame`: animation frame while the answer is pending
pub struct QueryView {
    pub query_id: String,
    pub record: Option<QueryRecord>,
    pub spinner_frame: usize,
}

impl QueryView {
    pub fn new(query_id: String, record: Option<QueryRecord>, spinner_frame: usize) -> Self {
        Self {
            query_id,
            record,
            spinner_frame,
        }
    }

    fn body_lines(&self) -> Vec<Line<'_>> {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let record = match &self.record {
            None => {
                return vec![Line::from(Span::styled(
                    format!("{spinner} Loading query {}...", self.query_id),
                    dim,
                ))];
            }
            Some(record) => record,
        };

        let mut lines = vec![
            Line::from(Span::styled("Question", label)),
            Line::from(record.query_text.as_str()),
            Line::default(),
            Line::from(Span::styled("Answer", label)),
        ];

        match &record.answer_text {
            Some(answer) if record.is_complete => {
                lines.extend(answer.lines().map(Line::from));
            }
            _ => {
                lines.push(Line::from(Span::styled(
                    format!("{spinner} Generating answer..."),
                    dim,
                )));
            }
        }

        if !record.sources.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Sources", label)));
            for source in &record.sources {
                lines.push(Line::from(Span::styled(format!("  • {source}"), dim)));
            }
        }

        lines
    }
}

impl Component for QueryView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let card = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Query Results")
            .title_bottom(Line::from("n: new query").right_aligned());
        let body = Paragraph::new(self.body_lines())
            .block(card)
            .wrap(Wrap { trim: false });
        frame.render_widget(body, area);
    }
}
