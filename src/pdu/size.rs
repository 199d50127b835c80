//! Response-size oracle: given a request PDU, predicts the exact byte
//! length of the corresponding successful response PDU, so the transaction
//! driver knows how much more to read after the exception-sized prefix.

use crate::errors::ClientError;

use super::constants::*;

pub fn response_pdu_size(request_pdu: &[u8]) -> Result<usize, ClientError> {
    let &function = request_pdu
        .first()
        .ok_or_else(|| ClientError::illegal_data_value("empty request PDU"))?;
    let quantity = request_pdu
        .get(3..5)
        .map(|w| u16::from_be_bytes([w[0], w[1]]))
        .ok_or_else(|| ClientError::illegal_data_value("request PDU missing quantity field"))?;

    let size = match function {
        READ_COILS | READ_DISCRETE_INPUTS => 2 + (quantity as usize + 7) / 8,
        READ_HOLDING_REGISTERS | READ_INPUT_REGISTERS => 2 + quantity as usize * 2,
        WRITE_SINGLE_COIL | WRITE_SINGLE_REGISTER | WRITE_MULTIPLE_COILS
        | WRITE_MULTIPLE_REGISTERS => 5,
        other => {
            return Err(ClientError::illegal_data_value(format!(
                "unsupported function code {other:#04x}"
            )))
        }
    };
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_coils_size_rounds_up_to_whole_bytes() {
        let req = crate::pdu::request::read_coils(0, 3).unwrap();
        assert_eq!(response_pdu_size(&req).unwrap(), 3);
    }

    #[test]
    fn read_registers_size_is_two_bytes_per_register() {
        let req = crate::pdu::request::read_holding_registers(0, 2).unwrap();
        assert_eq!(response_pdu_size(&req).unwrap(), 6);
    }

    #[test]
    fn write_responses_are_five_byte_echoes() {
        let req = crate::pdu::request::write_single_coil(7, true);
        assert_eq!(response_pdu_size(&req).unwrap(), 5);
    }
}
