pub mod stats_dto;
pub use stats_dto::{HistoryOverview, StatsReport, TopicStats};
