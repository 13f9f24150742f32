//! # Application State
//!
//! Core business state for Solaris. This module contains domain logic only -
//! no TUI-specific types. Presentation state (draft buffer, cursor) lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn QueryService>   // backend client
//! ├── user_id: String                  // injected session identifier
//! ├── route: Route                     // current view
//! ├── is_submitting: bool              // submission in flight
//! ├── current_query: Option<QueryRecord> // fetched results
//! ├── error: Option<String>            // surfaced failure message
//! └── status_message: String           // status bar text
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use std::sync::Arc;

use crate::api::{QueryRecord, QueryService};

/// Example question shown in the empty form, and submitted verbatim when
/// the user submits without typing anything.
pub const PLACEHOLDER_QUERY: &str =
    "What time of the day usually has the most solar power output?";

/// Client-side routes. Navigation is a route swap in the event loop, the
/// same way the web front end pushes a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The query submission form.
    SubmitForm,
    /// Results view for a submitted query.
    ViewQuery { query_id: String },
}

impl Route {
    /// The path string for this route, matching the web front end's URLs.
    /// Used for the status line and the navigation log.
    pub fn path(&self) -> String {
        match self {
            Route::SubmitForm => "/".to_string(),
            Route::ViewQuery { query_id } => format!("/viewQuery?query_id={query_id}"),
        }
    }
}

pub struct App {
    pub service: Arc<dyn QueryService>,
    /// Session identifier attached to every submission. Injected at
    /// construction so the source is an explicit, testable seam.
    pub user_id: String,
    pub route: Route,
    pub is_submitting: bool,
    /// The record shown on the results view, once fetched.
    pub current_query: Option<QueryRecord>,
    pub error: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(service: Arc<dyn QueryService>, user_id: String) -> Self {
        Self {
            service,
            user_id,
            route: Route::SubmitForm,
            is_submitting: false,
            current_query: None,
            error: None,
            status_message: String::from("Solaris AI"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.route, Route::SubmitForm);
        assert!(!app.is_submitting);
        assert!(app.current_query.is_none());
        assert!(app.error.is_none());
        assert_eq!(app.user_id, "test-session");
    }

    #[test]
    fn test_route_path() {
        assert_eq!(Route::SubmitForm.path(), "/");
        let route = Route::ViewQuery {
            query_id: "abc123".to_string(),
        };
        assert_eq!(route.path(), "/viewQuery?query_id=abc123");
    }
}
