//! # agility-compe: Agility Competition Registration
//!
//! Entry registration for agility trials plus a standalone score-entry grid.
//!
//! - **Accounts**: sign-in / sign-up against a hosted auth provider
//! - **Dog registrations**: up to four dogs per owner, each with class and events
//! - **Score entry**: a per-session table whose `penalty` column is derived
//!   from faults and refusals, with Parquet snapshots
//!
//! Accounts and records live in a remote backend; this crate owns the
//! session state, validation, and the score table.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use agility_compe::app::{Action, App, View};
//! use agility_compe::auth::MemoryAuthService;
//! use agility_compe::config::Config;
//! use agility_compe::registry::MemoryRecordStore;
//! use agility_compe::session::SessionId;
//!
//! # async fn example() -> agility_compe::Result<()> {
//! let app = App::new(Config::from_env()?, MemoryAuthService::new(), MemoryRecordStore::new());
//! let session = SessionId::new("browser-1");
//!
//! let View::Scores(view) = app.handle(&session, Action::ShowScores).await else {
//!     return Ok(());
//! };
//! let mut candidate = view.table;
//! if let Some(row) = candidate.row_mut(0) {
//!     row.faults = 2;
//! }
//! app.handle(&session, Action::ComputeScores(candidate)).await;
//! app.handle(&session, Action::SaveScores).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod messages;
pub mod registry;
pub mod score;
pub mod session;

pub use error::{Error, Result};
