mod environment;
mod error;
mod storage_config;

pub use environment::{Environment, DEFAULT_PRESIGNED_URL_EXPIRY_SECS};
pub use error::AppError;
pub use storage_config::StorageConfig;
