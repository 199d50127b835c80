//! Minimal Modbus RTU usage: read two holding registers from a local
//! serial device, interpreting them as signed 16-bit integers.

use modbus_async_client::{ClientOptions, RtuClient, SerialSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = SerialSettings {
        device: "/dev/ttyUSB0".to_string(),
        baud_rate: 19200,
        ..SerialSettings::default()
    };
    let options = ClientOptions {
        signed_registers: true,
        unit_id: 1,
    };

    let mut client = RtuClient::open(&settings, options)?;
    let registers = client.read_holding_registers(0, 2).await?;
    println!("registers: {registers:?}");

    Ok(())
}
