//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod population_repo;
pub mod report_repo;

pub use population_repo::PopulationRepo;
pub use report_repo::ReportRepo;
