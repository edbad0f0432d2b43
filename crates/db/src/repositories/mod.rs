//! Repository layer: one zero-sized struct per table, all methods async.

mod model_record_repo;

pub use model_record_repo::ModelRecordRepo;
