// Library root
// -----------
// This crate exposes the building blocks of the movie database CLI. The
// binary (`main.rs`) wires them together and hands them to the menu loop.
//
// Module responsibilities:
// - `storage`: the SQLite `movies` table (list/get/add/delete/update).
// - `api`: blocking OMDb client used to look up new movies.
// - `website`: renders the stored movies into the static HTML template.
// - `stats`, `search`, `histogram`: pure helpers behind the menu actions.
// - `ui`: the numbered menu and its handlers.
// - `config`, `logger`, `error`: ambient plumbing.
pub mod api;
pub mod config;
pub mod error;
pub mod histogram;
pub mod logger;
pub mod movie;
pub mod search;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod website;

pub use error::{MovieError, Result};
pub use movie::Movie;
pub use storage::MovieStore;
