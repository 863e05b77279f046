use thiserror::Error;

/// Errors raised while building shared model values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid site id: {0:?}")]
    InvalidSiteId(String),
}
