use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("A category fetch is already in progress")]
    FetchInFlight,

    #[error("Categories accessed outside of a mounted CategoriesProvider")]
    OutOfScope,
}

impl StoreError {
    /// The underlying fetch failure, if this error came from the network.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            StoreError::Fetch(err) => Some(err),
            _ => None,
        }
    }
}
