//! # Storage Module
//!
//! Handles all data persistence operations for the academy tracker.
//!
//! The domain layer works against the repository traits in [`traits`];
//! the concrete implementation is the SQLite backend in [`sqlite`]. The
//! implementation can be swapped without affecting domain or IO layers.

pub mod sqlite;
pub mod traits;

pub use sqlite::db::DbConnection;
pub use traits::*;
