pub mod result_log_repository;
pub mod user_repository;

pub use result_log_repository::{CsvResultLogRepository, ResultLogEntry, ResultLogRepository};
pub use user_repository::{JsonUserRepository, UserRepository};
