//! Per-protocol-variant ADU framing. Both codecs are zero-sized marker
//! types; all state (the TCP transaction-id counter) lives on the
//! client, not the codec.

pub mod rtu;
pub mod tcp;

use crate::errors::ClientError;

pub trait AduCodec {
    /// Data carried from `frame_request` to `parse_response_adu`, needed
    /// to validate that the response belongs to this request.
    type Meta: Send;

    /// Byte offset of the PDU within the ADU (7 for TCP's MBAP header, 1
    /// for RTU's single address byte).
    const PDU_OFFSET: usize;

    /// Size of a complete *exception* response ADU: framing + the 2-byte
    /// exception PDU (+ trailer, for variants that have one). This is
    /// not simply `PDU_OFFSET + 2` — RTU's CRC trailer sits after the
    /// PDU, so its exception ADU is `PDU_OFFSET + 2 + CRC_LEN`, not
    /// `PDU_OFFSET + 2`. The transaction driver reads exactly this many
    /// bytes before deciding whether the response was an exception, and
    /// (since this size equals the *whole* exception ADU) runs that
    /// prefix through `parse_response_adu` to validate its framing/CRC
    /// before trusting the exception code it carries.
    const EXCEPTION_ADU_SIZE: usize;

    fn frame_request(unit_id: u8, pdu: &[u8], transaction_id: u16) -> (Vec<u8>, Self::Meta);

    /// Total ADU length (framing + PDU + trailer) once the request is known.
    fn total_adu_size(request_pdu: &[u8]) -> Result<usize, ClientError>;

    /// Validates framing/CRC on the full response ADU and returns the response PDU.
    fn parse_response_adu(adu: &[u8], meta: &Self::Meta) -> Result<Vec<u8>, ClientError>;
}
