pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{Ban, BanOption, DecisionAction, Report, ReportStatus, ReviewSnapshot};
pub use services::ModerationService;
