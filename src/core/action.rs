//! # Actions
//!
//! Everything that can happen in Solaris becomes an `Action`.
//! User presses Enter on the form? That's `Action::Submit(draft)`.
//! The backend responds? That's `Action::SubmitCompleted(response)`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state. No side effects here: I/O happens in the tui
//! adapter, driven by the `Effect` value `update()` returns.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the form's contract testable without a terminal or a server.

use log::{info, warn};

use crate::api::{QueryRecord, SubmitQueryRequest, SubmitQueryResponse};
use crate::core::state::{App, PLACEHOLDER_QUERY, Route};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The form was submitted with the given draft text. An empty draft is
    /// substituted with the placeholder; whitespace-only drafts go verbatim.
    Submit(String),
    /// The backend accepted the submission.
    SubmitCompleted(SubmitQueryResponse),
    /// The submission failed. Carries a display message.
    SubmitFailed(String),
    /// A query record arrived for the results view.
    QueryFetched(QueryRecord),
    /// Fetching the query record failed. Carries the id so the poll loop
    /// can be re-armed if the results view is still waiting on it.
    QueryFetchFailed { query_id: String, message: String },
    /// Leave the results view and start a fresh form.
    NewQuery,
    Quit,
}

/// Side effects the tui adapter must perform after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Spawn the async submission call with this request.
    SubmitQuery(SubmitQueryRequest),
    /// Spawn a fetch of the given record. `delayed` waits one poll
    /// interval first (used while the answer is still being generated).
    FetchQuery { query_id: String, delayed: bool },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(draft) => {
            // Logical double-submit guard, independent of the disabled
            // rendering state.
            if app.is_submitting {
                warn!("Submit ignored: a submission is already in flight");
                return Effect::None;
            }

            // Empty draft falls back to the placeholder. Exact emptiness
            // test only: whitespace-only input is submitted as-is.
            let query_to_submit = if draft.is_empty() {
                PLACEHOLDER_QUERY.to_string()
            } else {
                draft
            };
            info!("Submitting query: {}", query_to_submit);

            app.is_submitting = true;
            app.error = None;
            app.status_message = String::from("Submitting...");

            Effect::SubmitQuery(SubmitQueryRequest {
                query_text: query_to_submit,
                user_id: app.user_id.clone(),
            })
        }
        Action::SubmitCompleted(response) => {
            app.is_submitting = false;
            let route = Route::ViewQuery {
                query_id: response.query_id.clone(),
            };
            info!("Navigating to {}", route.path());
            app.status_message = route.path();
            app.route = route;
            Effect::FetchQuery {
                query_id: response.query_id,
                delayed: false,
            }
        }
        Action::SubmitFailed(message) => {
            // Always resolve the in-flight flag so the form re-enables and
            // the draft can be resubmitted.
            app.is_submitting = false;
            app.status_message = String::from("Submission failed");
            app.error = Some(message);
            Effect::None
        }
        Action::QueryFetched(record) => {
            let query_id = record.query_id.clone();
            let is_complete = record.is_complete;
            app.current_query = Some(record);
            // A successful poll supersedes any transient fetch error
            app.error = None;
            if is_complete {
                app.status_message = String::from("Answer ready");
                Effect::None
            } else {
                // Keep polling until the RAG pipeline finishes.
                app.status_message = String::from("Waiting for answer...");
                Effect::FetchQuery {
                    query_id,
                    delayed: true,
                }
            }
        }
        Action::QueryFetchFailed { query_id, message } => {
            warn!("Query fetch failed for {}: {}", query_id, message);
            app.error = Some(message);
            // A transient failure must not strand the results view: keep
            // polling as long as it is still waiting on this record. This
            // also covers the first fetch racing the backend write.
            let still_viewing =
                matches!(&app.route, Route::ViewQuery { query_id: current } if *current == query_id);
            let incomplete = !app.current_query.as_ref().is_some_and(|q| q.is_complete);
            if still_viewing && incomplete {
                Effect::FetchQuery {
                    query_id,
                    delayed: true,
                }
            } else {
                Effect::None
            }
        }
        Action::NewQuery => {
            app.route = Route::SubmitForm;
            app.current_query = None;
            app.error = None;
            app.status_message = String::from("Solaris AI");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
