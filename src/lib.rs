pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpApiClient;
pub use config::{AppConfig, ApiSettings};
pub use utils::error::{HrError, Result};
