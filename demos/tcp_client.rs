//! Minimal Modbus/TCP usage: write four coils, then read them back.
//!
//! Run against any Modbus/TCP simulator listening on 127.0.0.1:15020.

use modbus_async_client::{ClientOptions, TcpClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut client = TcpClient::connect("127.0.0.1:15020", ClientOptions::default()).await?;

    let values = [true, false, true, true];
    let written = client.write_multiple_coils(1, &values).await?;
    assert_eq!(written as usize, values.len());
    println!("wrote {written} coils");

    let read_back = client.read_coils(1, values.len() as u16).await?;
    assert_eq!(read_back, values);
    println!("read back {read_back:?}");

    Ok(())
}
