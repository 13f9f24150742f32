//! Frame layout: title bar on top, the routed view in the middle, key
//! hints at the bottom. An error banner appears above the view when the
//! app has a surfaced failure message.

use crate::core::state::{App, Route};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{QueryView, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, hint_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(app.status_message.clone()).render(frame, title_area);

    // Error banner claims the top of the main area when present
    let content_area = match &app.error {
        Some(message) => {
            let [error_area, rest] = Layout::vertical([Length(3), Min(0)]).areas(main_area);
            let banner = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::bordered().title("Error"));
            frame.render_widget(banner, error_area);
            rest
        }
        None => main_area,
    };

    match &app.route {
        Route::SubmitForm => {
            tui.query_form.submitting = app.is_submitting;
            tui.query_form.spinner_frame = spinner_frame;
            tui.query_form.render(frame, card_area(content_area));
        }
        Route::ViewQuery { query_id } => {
            QueryView::new(query_id.clone(), app.current_query.clone(), spinner_frame)
                .render(frame, content_area);
        }
    }

    let hints = match app.route {
        Route::SubmitForm => "Enter: submit | Ctrl+J: newline | Esc: quit",
        Route::ViewQuery { .. } => "n: new query | Esc: quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );
}

/// Centers the form card horizontally: capped width and height, one row
/// below the top of the area.
fn card_area(area: Rect) -> Rect {
    let width = area.width.min(72);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + u16::from(area.height > 13);
    let height = area.height.saturating_sub(y - area.y).min(12);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_submit_form_route() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Submit New Query"));
        assert!(text.contains("Enter: submit"));
    }

    #[test]
    fn test_draw_error_banner() {
        let mut app = test_app();
        update(&mut app, Action::Submit("q".into()));
        update(&mut app, Action::SubmitFailed("network error: refused".into()));

        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Error"));
        assert!(text.contains("network error: refused"));
        // Form is back and interactive after the failure
        assert!(text.contains("Submit New Query"));
    }

    #[test]
    fn test_draw_view_query_route() {
        let mut app = test_app();
        update(&mut app, Action::Submit("q".into()));
        update(
            &mut app,
            Action::SubmitCompleted(crate::api::SubmitQueryResponse {
                query_id: "q-42".to_string(),
            }),
        );

        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Query Results"));
        assert!(text.contains("/viewQuery?query_id=q-42"));
    }
}
