pub mod cache;
pub mod dataset;
pub mod export;
pub mod joiner;
pub mod list_literal;
pub mod normalizer;
pub mod query;
pub mod rankings;

pub use crate::domain::model::{EnrichedUniversity, RankingEntry, RawTable, University};
pub use crate::domain::ports::{ConfigProvider, Storage, TextEncoding};
pub use crate::utils::error::Result;
