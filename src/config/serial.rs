use serde::{Deserialize, Serialize};

use super::types::{DataBits, Parity, StopBits};

/// Settings for dialing a local serial device, handed to
/// [`RtuClient::open`](crate::client::rtu::RtuClient::open).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialSettings {
    pub device: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            data_bits: DataBits::default(),
            parity: Parity::default(),
            stop_bits: StopBits::default(),
        }
    }
}

impl SerialSettings {
    pub fn description(&self) -> String {
        format!(
            "{} ({} baud, {} data bits, {} parity, {} stop bits)",
            self.device, self.baud_rate, self.data_bits, self.parity, self.stop_bits
        )
    }
}
