//! Domain types shared by the vrobjects crates.
//!
//! Nothing in here performs I/O: the database layer lives in `vrobjects_db`
//! and the HTTP surface in `vrobjects_api`.

pub mod error;
pub mod types;
pub mod uploads;
