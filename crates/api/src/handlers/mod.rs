//! Request handlers.
//!
//! Handlers delegate to `ModelRecordRepo` for records and to the storage
//! directories for files, and map every failure through [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod assets;
pub mod model_record;
pub mod uploads;
