pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use api::{HttpApiClient, KnowledgeBaseApi};
pub use config::{AppConfig, TotalEstimate};
pub use error::{Error, Result};
