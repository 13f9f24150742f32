//! # TitleBar Component
//!
//! Top status bar. Purely presentational: it receives the status message
//! as a prop and has no internal state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar showing the app name and the current status message.
pub struct TitleBar {
    /// Status message (e.g., "Submitting...", a navigation path)
    pub status_message: String,
}

impl TitleBar {
    pub fn new(status_message: String) -> Self {
        Self { status_message }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            "Solaris".to_string()
        } else {
            format!("Solaris | {}", self.status_message)
        };
        frame.render_widget(Span::raw(title_text), area);
    }
}
