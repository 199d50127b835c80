use thiserror::Error;

use super::{ExceptionCode, FrameError};

/// The single error type returned by every client operation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an exception ADU.
    #[error("modbus exception on function {function:#04x}: {code}")]
    Exception { function: u8, code: ExceptionCode },

    /// Framing, CRC, or length checks on the response ADU failed. The
    /// stream is now desynchronized and must be closed by the caller.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A request argument was out of range; raised before any I/O.
    #[error("illegal data value: {0}")]
    IllegalDataValue(String),

    /// The underlying stream returned an I/O error.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// `url::connect` was given a scheme it does not know how to route.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// A transaction was already in flight on this client.
    #[error("client is busy with another transaction")]
    Busy,
}

impl ClientError {
    pub fn illegal_data_value(details: impl Into<String>) -> Self {
        Self::IllegalDataValue(details.into())
    }

    pub fn exception(function: u8, code: ExceptionCode) -> Self {
        Self::Exception { function, code }
    }
}
