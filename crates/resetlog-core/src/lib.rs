//! Reset history log: storage, rendering and table sync.
//!
//! This crate records every prestige-style reset a player performs, keeps
//! the most recent ones per category, and renders them into a fixed-width
//! row model that a UI adapter can show.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `resetlog-config.yaml` into
//!   strongly-typed structs.
//! - [`store`] -- [`HistoryStore`], the bounded per-category log.
//! - [`registry`] -- Gain field icons, titles, formatters and visibility.
//! - [`extras`] -- Kind-specific extra cells (ant multiplier, corruptions).
//! - [`render`] -- [`render_row`] and the column budgets.
//! - [`sync`] -- Incremental and full table updates.
//! - [`view`] -- [`HistoryView`] and [`HistorySurface`] presentation seams.
//! - [`display`] -- Per-second display mode and its indicator.
//! - [`session`] -- [`HistorySession`], which ties the above together.
//! - [`format`] -- [`NumberFormat`] trait and [`ShortNumberFormat`].
//! - [`duration`] -- Short duration strings.
//! - [`game`] -- [`GameQueries`] trait and [`StaticGameState`].
//! - [`error`] -- [`HistoryError`].
//!
//! [`HistoryStore`]: store::HistoryStore
//! [`render_row`]: render::render_row
//! [`HistoryView`]: view::HistoryView
//! [`HistorySurface`]: view::HistorySurface
//! [`HistorySession`]: session::HistorySession
//! [`NumberFormat`]: format::NumberFormat
//! [`ShortNumberFormat`]: format::ShortNumberFormat
//! [`GameQueries`]: game::GameQueries
//! [`StaticGameState`]: game::StaticGameState
//! [`HistoryError`]: error::HistoryError

pub mod config;
pub mod display;
pub mod duration;
pub mod error;
pub mod extras;
pub mod format;
pub mod game;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;

pub use error::HistoryError;
