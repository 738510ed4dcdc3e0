pub mod alerts;
pub mod config;
pub mod extractor;
pub mod history;
pub mod models;
pub mod normalizer;
pub mod scraper;
pub mod sentiment;
pub mod storage;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
