//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the routed
//! view, and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! core reducer never performs I/O: network calls run on spawned tokio
//! tasks that report back over an mpsc channel of actions, so the UI
//! thread re-renders immediately after a submission starts (spinner on,
//! form disabled) and resumes on the completion action.
//!
//! ## Redraw Strategy
//!
//! Conditional redraw: while a spinner is animating (submission in flight
//! or an answer still generating) the loop draws every ~80ms; otherwise it
//! sleeps up to 500ms and only redraws on events.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{HttpQueryService, QueryService, SubmitQueryRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Route};
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, QueryForm};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// The form's draft buffer and cursor live here; recreated on
    /// navigation back to the form, which discards the old draft.
    pub query_form: QueryForm,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            query_form: QueryForm::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for draft editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

pub fn run(config: ResolvedConfig, user_id: String) -> std::io::Result<()> {
    let service: Arc<dyn QueryService> =
        Arc::new(HttpQueryService::new(config.server_base_url.clone()));
    let mut app = App::new(service, user_id);
    let mut tui = TuiState::new();
    let poll_interval = Duration::from_secs(config.poll_interval_secs);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Spinner runs while a submission is in flight or an answer is
        // still being generated on the results view.
        let waiting_for_answer = matches!(app.route, Route::ViewQuery { .. })
            && !app.current_query.as_ref().is_some_and(|q| q.is_complete);
        let animating = app.is_submitting || waiting_for_answer;

        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Quit keys work regardless of route
            if matches!(event, TuiEvent::ForceQuit | TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            if matches!(app.route, Route::SubmitForm) {
                if let Some(FormEvent::Submit(draft)) = tui.query_form.handle_event(&event) {
                    let effect = update(&mut app, Action::Submit(draft));
                    handle_effect(effect, &app, &tx, poll_interval, &mut should_quit);
                }
            } else {
                // 'n' starts a fresh form; the old draft is discarded
                // with the torn-down component.
                if matches!(event, TuiEvent::InputChar('n')) {
                    update(&mut app, Action::NewQuery);
                    tui.query_form = QueryForm::new();
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle actions reported back by background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            handle_effect(effect, &app, &tx, poll_interval, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Performs the I/O an `update()` call asked for.
fn handle_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    poll_interval: Duration,
    should_quit: &mut bool,
) {
    match effect {
        Effect::Quit => *should_quit = true,
        Effect::SubmitQuery(request) => {
            spawn_submit(app.service.clone(), request, tx.clone());
        }
        Effect::FetchQuery { query_id, delayed } => {
            let delay = if delayed { Some(poll_interval) } else { None };
            spawn_fetch(app.service.clone(), query_id, delay, tx.clone());
        }
        Effect::None => {}
    }
}

/// Spawns the async submission call. The completion (or failure) comes
/// back to the event loop as an action; the UI is never blocked on it.
fn spawn_submit(
    service: Arc<dyn QueryService>,
    request: SubmitQueryRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning submission for user {}", request.user_id);
    tokio::spawn(async move {
        let action = match service.submit_query(&request).await {
            Ok(response) => {
                info!("submit_query response: {:?}", response);
                Action::SubmitCompleted(response)
            }
            Err(e) => {
                warn!("submit_query failed: {}", e);
                Action::SubmitFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send submission result: receiver dropped");
        }
    });
}

/// Spawns a fetch of the query record, optionally after one poll interval.
fn spawn_fetch(
    service: Arc<dyn QueryService>,
    query_id: String,
    delay: Option<Duration>,
    tx: mpsc::Sender<Action>,
) {
    tokio::spawn(async move {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let action = match service.get_query(&query_id).await {
            Ok(record) => Action::QueryFetched(record),
            Err(e) => {
                warn!("get_query failed for {}: {}", query_id, e);
                Action::QueryFetchFailed {
                    message: e.to_string(),
                    query_id,
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send fetched query: receiver dropped");
        }
    });
}
