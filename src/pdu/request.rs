//! Request PDU builders.
//!
//! Every builder validates its arguments against the protocol's quantity
//! limits before touching the wire; an out-of-range argument is rejected
//! here, synchronously, as `ClientError::IllegalDataValue`.

use crate::errors::ClientError;

use super::constants::*;

fn check_quantity(quantity: u16, max: u16) -> Result<(), ClientError> {
    if quantity == 0 || quantity > max {
        return Err(ClientError::illegal_data_value(format!(
            "quantity {quantity} out of range 1..={max}"
        )));
    }
    Ok(())
}

fn read_request(function: u8, start: u16, quantity: u16, max: u16) -> Result<Vec<u8>, ClientError> {
    check_quantity(quantity, max)?;
    let mut pdu = Vec::with_capacity(5);
    pdu.push(function);
    pdu.extend_from_slice(&start.to_be_bytes());
    pdu.extend_from_slice(&quantity.to_be_bytes());
    Ok(pdu)
}

pub fn read_coils(start: u16, quantity: u16) -> Result<Vec<u8>, ClientError> {
    read_request(READ_COILS, start, quantity, MAX_READ_COILS)
}

pub fn read_discrete_inputs(start: u16, quantity: u16) -> Result<Vec<u8>, ClientError> {
    read_request(READ_DISCRETE_INPUTS, start, quantity, MAX_READ_COILS)
}

pub fn read_holding_registers(start: u16, quantity: u16) -> Result<Vec<u8>, ClientError> {
    read_request(READ_HOLDING_REGISTERS, start, quantity, MAX_READ_REGISTERS)
}

pub fn read_input_registers(start: u16, quantity: u16) -> Result<Vec<u8>, ClientError> {
    read_request(READ_INPUT_REGISTERS, start, quantity, MAX_READ_REGISTERS)
}

pub fn write_single_coil(address: u16, value: bool) -> Vec<u8> {
    let raw = if value { COIL_ON } else { COIL_OFF };
    let mut pdu = Vec::with_capacity(5);
    pdu.push(WRITE_SINGLE_COIL);
    pdu.extend_from_slice(&address.to_be_bytes());
    pdu.extend_from_slice(&raw.to_be_bytes());
    pdu
}

pub fn write_single_register(address: u16, value: u16) -> Vec<u8> {
    let mut pdu = Vec::with_capacity(5);
    pdu.push(WRITE_SINGLE_REGISTER);
    pdu.extend_from_slice(&address.to_be_bytes());
    pdu.extend_from_slice(&value.to_be_bytes());
    pdu
}

/// Packs coil values LSB-first into bytes, the wire encoding for FC 0F.
pub fn pack_bits(values: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; (values.len() + 7) / 8];
    for (i, &bit) in values.iter().enumerate() {
        if bit {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    bytes
}

pub fn write_multiple_coils(start: u16, values: &[bool]) -> Result<Vec<u8>, ClientError> {
    let quantity = values.len();
    if quantity == 0 || quantity > MAX_WRITE_COILS as usize {
        return Err(ClientError::illegal_data_value(format!(
            "quantity {quantity} out of range 1..={MAX_WRITE_COILS}"
        )));
    }
    let packed = pack_bits(values);
    let mut pdu = Vec::with_capacity(6 + packed.len());
    pdu.push(WRITE_MULTIPLE_COILS);
    pdu.extend_from_slice(&start.to_be_bytes());
    pdu.extend_from_slice(&(quantity as u16).to_be_bytes());
    pdu.push(packed.len() as u8);
    pdu.extend_from_slice(&packed);
    Ok(pdu)
}

pub fn write_multiple_registers(start: u16, values: &[u16]) -> Result<Vec<u8>, ClientError> {
    let quantity = values.len();
    if quantity == 0 || quantity > MAX_WRITE_REGISTERS as usize {
        return Err(ClientError::illegal_data_value(format!(
            "quantity {quantity} out of range 1..={MAX_WRITE_REGISTERS}"
        )));
    }
    let mut pdu = Vec::with_capacity(6 + quantity * 2);
    pdu.push(WRITE_MULTIPLE_REGISTERS);
    pdu.extend_from_slice(&start.to_be_bytes());
    pdu.extend_from_slice(&(quantity as u16).to_be_bytes());
    pdu.push((quantity * 2) as u8);
    for value in values {
        pdu.extend_from_slice(&value.to_be_bytes());
    }
    Ok(pdu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_request_matches_wire_layout() {
        assert_eq!(
            read_holding_registers(0x006B, 3).unwrap(),
            vec![0x03, 0x00, 0x6B, 0x00, 0x03]
        );
    }

    #[test]
    fn zero_quantity_is_rejected_before_any_io() {
        assert!(matches!(
            read_coils(0, 0),
            Err(ClientError::IllegalDataValue(_))
        ));
    }

    #[test]
    fn write_single_coil_encodes_on_off_sentinels() {
        assert_eq!(
            write_single_coil(0x0007, true),
            vec![0x05, 0x00, 0x07, 0xFF, 0x00]
        );
        assert_eq!(
            write_single_coil(0x0007, false),
            vec![0x05, 0x00, 0x07, 0x00, 0x00]
        );
    }

    #[test]
    fn pack_bits_is_lsb_first() {
        assert_eq!(pack_bits(&[true, false, true, true]), vec![0b0000_1101]);
    }

    #[test]
    fn write_multiple_coils_matches_wire_layout() {
        let pdu = write_multiple_coils(1, &[true, false, true, true]).unwrap();
        assert_eq!(pdu, vec![0x0F, 0x00, 0x01, 0x00, 0x04, 0x01, 0x0D]);
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let values = vec![0u16; MAX_WRITE_REGISTERS as usize + 1];
        assert!(write_multiple_registers(0, &values).is_err());
    }
}
