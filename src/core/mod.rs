//! # Core Application Logic
//!
//! Solaris's business logic. It knows nothing about the terminal or any
//! specific UI technology.
//!
//! - [`state`]: the `App` struct — application state and routing in one place
//! - [`action`]: the `Action` enum and `update()` reducer — everything that
//!   can happen in the app
//! - [`config`]: TOML config loading with a defaults → file → env → CLI
//!   override hierarchy
//! - [`session`]: the persisted per-installation session identifier
//!
//! State changes only happen through `update(app, action)`. I/O happens in
//! the tui adapter, driven by the `Effect` values the reducer returns.

pub mod action;
pub mod config;
pub mod session;
pub mod state;
