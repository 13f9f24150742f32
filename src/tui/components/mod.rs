//! # TUI Components
//!
//! Components follow two patterns, mirroring a React component tree:
//!
//! - **Stateless (props-based)**: `TitleBar`, `QueryView` — receive all
//!   data as struct fields, render what they're given.
//! - **Stateful (event-driven)**: `QueryForm` — owns the draft buffer and
//!   cursor, emits high-level `FormEvent`s to the event loop.
//!
//! Each component file co-locates its state, event types, rendering, and
//! tests.

pub mod query_form;
pub mod query_view;
pub mod title_bar;

pub use query_form::{FormEvent, QueryForm};
pub use query_view::QueryView;
pub use title_bar::TitleBar;
