// errors.rs
use crate::inventory::InventoryError;
use astra::Response;
use thiserror::Error;

/// Errors a request can end in. Upstream and config failures never get here:
/// the loader degrades to demo data and `main` exits on bad config.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::InternalError => 500,
        }
    }
}

impl From<InventoryError> for ServerError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::UnitNotFound(_) | InventoryError::ContainerNotFound(_) => {
                ServerError::NotFound
            }
            InventoryError::UnknownPreset(_) => ServerError::BadRequest(err.to_string()),
        }
    }
}
