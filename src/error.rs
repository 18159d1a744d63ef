use crate::forecast::error::{ParameterValidationError, PayloadValidationError};
use crate::transport::error::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenMeteoError {
    #[error(transparent)]
    Parameter(#[from] ParameterValidationError),

    #[error(transparent)]
    Payload(#[from] PayloadValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
