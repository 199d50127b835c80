//! Response PDU parsers.
//!
//! Parsers take both the response PDU and the request that produced it,
//! since the wire response for bit reads carries only a byte count, not
//! the original quantity.

use crate::errors::ClientError;

fn expect_function(pdu: &[u8], function: u8) -> Result<(), ClientError> {
    match pdu.first() {
        Some(&fc) if fc == function => Ok(()),
        Some(&fc) => Err(ClientError::illegal_data_value(format!(
            "unexpected function code {fc:#04x}, expected {function:#04x}"
        ))),
        None => Err(ClientError::illegal_data_value("empty response PDU")),
    }
}

/// Unpacks LSB-first packed bits back into `quantity` booleans.
pub fn unpack_bits(packed: &[u8], quantity: usize) -> Vec<bool> {
    (0..quantity)
        .map(|i| packed[i / 8] & (1 << (i % 8)) != 0)
        .collect()
}

fn parse_bits(pdu: &[u8], function: u8, quantity: u16) -> Result<Vec<bool>, ClientError> {
    expect_function(pdu, function)?;
    let byte_count = *pdu
        .get(1)
        .ok_or_else(|| ClientError::illegal_data_value("missing byte count"))? as usize;
    let expected = (quantity as usize + 7) / 8;
    if byte_count != expected {
        return Err(ClientError::illegal_data_value(format!(
            "byte count {byte_count} does not match quantity {quantity}"
        )));
    }
    let data = pdu.get(2..2 + byte_count).ok_or_else(|| {
        ClientError::illegal_data_value("response shorter than its own byte count")
    })?;
    Ok(unpack_bits(data, quantity as usize))
}

pub fn parse_read_coils(pdu: &[u8], quantity: u16) -> Result<Vec<bool>, ClientError> {
    parse_bits(pdu, super::constants::READ_COILS, quantity)
}

pub fn parse_read_discrete_inputs(pdu: &[u8], quantity: u16) -> Result<Vec<bool>, ClientError> {
    parse_bits(pdu, super::constants::READ_DISCRETE_INPUTS, quantity)
}

fn parse_registers(pdu: &[u8], function: u8, quantity: u16) -> Result<Vec<u16>, ClientError> {
    expect_function(pdu, function)?;
    let byte_count = *pdu
        .get(1)
        .ok_or_else(|| ClientError::illegal_data_value("missing byte count"))? as usize;
    if byte_count != quantity as usize * 2 {
        return Err(ClientError::illegal_data_value(format!(
            "byte count {byte_count} does not match quantity {quantity}"
        )));
    }
    let data = pdu.get(2..2 + byte_count).ok_or_else(|| {
        ClientError::illegal_data_value("response shorter than its own byte count")
    })?;
    Ok(data.chunks_exact(2).map(|w| u16::from_be_bytes([w[0], w[1]])).collect())
}

pub fn parse_read_holding_registers(pdu: &[u8], quantity: u16) -> Result<Vec<u16>, ClientError> {
    parse_registers(pdu, super::constants::READ_HOLDING_REGISTERS, quantity)
}

pub fn parse_read_input_registers(pdu: &[u8], quantity: u16) -> Result<Vec<u16>, ClientError> {
    parse_registers(pdu, super::constants::READ_INPUT_REGISTERS, quantity)
}

/// Write-single responses echo the request PDU verbatim; returns the
/// echoed value (coil boolean as `0xFF00`/`0x0000`, or the register word).
pub fn parse_write_single(pdu: &[u8], request: &[u8]) -> Result<u16, ClientError> {
    if pdu != request {
        return Err(ClientError::illegal_data_value(
            "write-single response does not echo the request",
        ));
    }
    Ok(u16::from_be_bytes([pdu[3], pdu[4]]))
}

/// Write-multiple responses echo `function, start, quantity`; returns the quantity written.
pub fn parse_write_multiple(pdu: &[u8], function: u8) -> Result<u16, ClientError> {
    expect_function(pdu, function)?;
    let quantity = pdu
        .get(3..5)
        .map(|w| u16::from_be_bytes([w[0], w[1]]))
        .ok_or_else(|| ClientError::illegal_data_value("truncated write-multiple response"))?;
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_read_coils_response() {
        let pdu = [0x01, 0x01, 0b0000_0101];
        assert_eq!(parse_read_coils(&pdu, 3).unwrap(), vec![true, false, true]);
    }

    #[test]
    fn parses_read_holding_registers_response() {
        let pdu = [0x03, 0x04, 0x12, 0x34, 0xAB, 0xCD];
        assert_eq!(
            parse_read_holding_registers(&pdu, 2).unwrap(),
            vec![0x1234, 0xABCD]
        );
    }

    #[test]
    fn rejects_byte_count_mismatch() {
        let pdu = [0x03, 0x02, 0x12, 0x34];
        assert!(parse_read_holding_registers(&pdu, 2).is_err());
    }

    #[test]
    fn parses_write_multiple_echo() {
        let pdu = [0x10, 0x00, 0x01, 0x00, 0x04];
        assert_eq!(parse_write_multiple(&pdu, 0x10).unwrap(), 4);
    }
}
