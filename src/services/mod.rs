pub mod submission;
pub mod summary;
