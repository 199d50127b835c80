//! Modbus/TCP framing: the 7-byte MBAP header plus PDU.

use tracing::debug;

use crate::errors::{ClientError, FrameError, FrameFormatKind};
use crate::pdu;

use super::AduCodec;

const MBAP_LEN: usize = 7;

pub struct TcpMeta {
    pub transaction_id: u16,
    pub unit_id: u8,
}

pub struct TcpCodec;

impl AduCodec for TcpCodec {
    type Meta = TcpMeta;
    const PDU_OFFSET: usize = MBAP_LEN;
    const EXCEPTION_ADU_SIZE: usize = MBAP_LEN + 2;

    fn frame_request(unit_id: u8, pdu: &[u8], transaction_id: u16) -> (Vec<u8>, Self::Meta) {
        let mut adu = Vec::with_capacity(MBAP_LEN + pdu.len());
        adu.extend_from_slice(&transaction_id.to_be_bytes());
        adu.extend_from_slice(&0u16.to_be_bytes()); // protocol id
        let length = (pdu.len() + 1) as u16; // unit id + pdu
        adu.extend_from_slice(&length.to_be_bytes());
        adu.push(unit_id);
        adu.extend_from_slice(pdu);
        (
            adu,
            TcpMeta {
                transaction_id,
                unit_id,
            },
        )
    }

    fn total_adu_size(request_pdu: &[u8]) -> Result<usize, ClientError> {
        Ok(MBAP_LEN + pdu::response_pdu_size(request_pdu)?)
    }

    fn parse_response_adu(adu: &[u8], meta: &Self::Meta) -> Result<Vec<u8>, ClientError> {
        if adu.len() < MBAP_LEN {
            return Err(FrameError::Size {
                kind: crate::errors::FrameSizeKind::TooShort,
                details: format!("MBAP header needs {MBAP_LEN} bytes, got {}", adu.len()),
            }
            .into());
        }
        let transaction_id = u16::from_be_bytes([adu[0], adu[1]]);
        let protocol_id = u16::from_be_bytes([adu[2], adu[3]]);
        let length = u16::from_be_bytes([adu[4], adu[5]]);
        let unit_id = adu[6];
        let pdu = &adu[MBAP_LEN..];

        if protocol_id != 0 {
            return Err(FrameError::Format {
                kind: FrameFormatKind::InvalidHeader,
                details: format!("protocol id {protocol_id} is not 0"),
            }
            .into());
        }
        if transaction_id != meta.transaction_id {
            debug!(
                expected = meta.transaction_id,
                got = transaction_id,
                "MBAP transaction id mismatch"
            );
            return Err(FrameError::Format {
                kind: FrameFormatKind::UnexpectedResponse,
                details: format!(
                    "transaction id {transaction_id} does not match request {}",
                    meta.transaction_id
                ),
            }
            .into());
        }
        if unit_id != meta.unit_id {
            return Err(FrameError::Format {
                kind: FrameFormatKind::UnexpectedResponse,
                details: format!("unit id {unit_id} does not match request {}", meta.unit_id),
            }
            .into());
        }
        if length as usize != 1 + pdu.len() {
            return Err(FrameError::Format {
                kind: FrameFormatKind::InvalidHeader,
                details: format!(
                    "MBAP length {length} does not match 1 + pdu length {}",
                    pdu.len()
                ),
            }
            .into());
        }

        Ok(pdu.to_vec())
    }
}
