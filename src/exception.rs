//! Exception detection: inspects the first two bytes of a response PDU
//! and raises a typed error if the server reported an exception, before
//! the transaction driver reads anything beyond the exception-sized
//! prefix.

use crate::errors::{ClientError, ExceptionCode};
use crate::pdu::constants::EXCEPTION_BIT;

/// Cheap peek at a raw function-code byte, before any framing/CRC
/// validation of the ADU it came from. Used only to decide which way
/// to branch (exception vs. success); the actual exception code is
/// never trusted until the ADU carrying it has been validated.
pub fn is_exception(function_byte: u8) -> bool {
    function_byte & EXCEPTION_BIT != 0
}

/// Decodes an already-confirmed exception PDU (`pdu[0]` has the high bit
/// set) into the typed error it carries. Callers that haven't already
/// checked [`is_exception`] should use [`check`] instead.
pub fn decode(pdu: &[u8]) -> Result<ClientError, ClientError> {
    let &function = pdu
        .first()
        .ok_or_else(|| ClientError::illegal_data_value("empty response PDU"))?;
    let original_function = function & !EXCEPTION_BIT;
    let code_byte = *pdu
        .get(1)
        .ok_or_else(|| ClientError::illegal_data_value("truncated exception PDU"))?;
    let code = ExceptionCode::from_u8(code_byte).ok_or_else(|| {
        ClientError::illegal_data_value(format!("unknown exception code {code_byte:#04x}"))
    })?;
    Ok(ClientError::exception(original_function, code))
}

/// `pdu` must be at least the two leading bytes of the response PDU.
/// Returns `Ok(())` when the response is not an exception.
pub fn check(pdu: &[u8]) -> Result<(), ClientError> {
    let &function = pdu
        .first()
        .ok_or_else(|| ClientError::illegal_data_value("empty response PDU"))?;
    if !is_exception(function) {
        return Ok(());
    }
    Err(decode(pdu)?)
}
