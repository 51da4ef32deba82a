pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::AppConfig;
pub use core::{dataset::Dataset, query::QueryEngine};
pub use utils::error::{ExplorerError, Result};
