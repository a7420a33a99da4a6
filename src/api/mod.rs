mod api_error;
mod models;
mod rest;
mod source;

pub use api_error::ApiError;
pub use rest::RestSource;
pub use source::{GridSource, OfflineSource};
