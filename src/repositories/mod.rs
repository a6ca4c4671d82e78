pub mod history_repository;

pub use history_repository::{identities_for, HistoryRepository, JsonHistoryRepository};
