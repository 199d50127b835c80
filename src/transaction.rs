//! The request/response state machine shared by both protocol variants:
//! write the request, read the short exception-sized prefix, classify,
//! read the remainder only if the response was not an exception.

use tracing::{debug, trace};

use crate::codec::AduCodec;
use crate::errors::ClientError;
use crate::exception;
use crate::stream::AsyncStream;

pub async fn transact<C, S>(
    stream: &mut S,
    unit_id: u8,
    transaction_id: u16,
    request_pdu: &[u8],
) -> Result<Vec<u8>, ClientError>
where
    C: AduCodec,
    S: AsyncStream,
{
    let (adu, meta) = C::frame_request(unit_id, request_pdu, transaction_id);
    trace!(unit_id, transaction_id, adu = ?hex::encode(&adu), "writing request ADU");
    stream.write_all(&adu).await.map_err(ClientError::Transport)?;

    // `EXCEPTION_ADU_SIZE` is sized so that it equals the *complete*
    // ADU in the exception case (for RTU, address + 2 PDU bytes + CRC;
    // for TCP, the full MBAP header + 2 PDU bytes). That lets the
    // exception branch below run this prefix through the codec's own
    // `parse_response_adu` — CRC and header checks included — instead
    // of trusting an unvalidated exception code straight off the wire.
    let prefix = stream
        .read_exactly(C::EXCEPTION_ADU_SIZE)
        .await
        .map_err(ClientError::Transport)?;

    let function_byte = *prefix.get(C::PDU_OFFSET).ok_or_else(|| {
        ClientError::illegal_data_value("exception-sized prefix shorter than the PDU offset")
    })?;

    if exception::is_exception(function_byte) {
        let exception_pdu = C::parse_response_adu(&prefix, &meta)?;
        let err = exception::decode(&exception_pdu)?;
        debug!(unit_id, transaction_id, %err, "server returned an exception response");
        return Err(err);
    }

    let total_size = C::total_adu_size(request_pdu)?;
    let remainder_len = total_size.saturating_sub(prefix.len());
    let remainder = stream
        .read_exactly(remainder_len)
        .await
        .map_err(ClientError::Transport)?;

    let mut adu = prefix;
    adu.extend_from_slice(&remainder);
    trace!(unit_id, transaction_id, adu = ?hex::encode(&adu), "received response ADU");
    C::parse_response_adu(&adu, &meta)
}
