//! End-to-end scenarios over an in-process duplex stream standing in for
//! a real TCP socket.

use modbus_async_client::{Client, ClientError, ClientOptions};
use modbus_async_client::codec::tcp::TcpCodec;
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};

type TestClient = Client<TcpCodec, tokio::io::DuplexStream>;

#[tokio::test]
async fn read_coils_returns_the_servers_bit_pattern() {
    let (client_side, mut server_side) = duplex(256);
    let mut client: TestClient = Client::new(client_side, ClientOptions::default());

    let server = tokio::spawn(async move {
        let mut request = [0u8; 12];
        server_side.read_exact(&mut request).await.unwrap();
        assert_eq!(
            request,
            [0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x01, 0x01, 0x00, 0x00, 0x00, 0x03]
        );
        server_side
            .write_all(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x01, 0x01, 0x05])
            .await
            .unwrap();
    });

    let bits = client.read_coils(0, 3).await.unwrap();
    assert_eq!(bits, vec![true, false, true]);
    server.await.unwrap();
}

#[tokio::test]
async fn write_multiple_coils_returns_the_quantity_written() {
    let (client_side, mut server_side) = duplex(256);
    let mut client: TestClient = Client::new(client_side, ClientOptions::default());

    let server = tokio::spawn(async move {
        let mut request = vec![0u8; 14];
        server_side.read_exact(&mut request).await.unwrap();
        server_side
            .write_all(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x01, 0x0F, 0x00, 0x01, 0x00, 0x04])
            .await
            .unwrap();
    });

    let written = client
        .write_multiple_coils(1, &[true, false, true, true])
        .await
        .unwrap();
    assert_eq!(written, 4);
    server.await.unwrap();
}

#[tokio::test]
async fn exception_response_is_decoded_without_over_reading() {
    let (client_side, mut server_side) = duplex(256);
    let mut client: TestClient = Client::new(client_side, ClientOptions::default());

    let server = tokio::spawn(async move {
        let mut request = vec![0u8; 12];
        server_side.read_exact(&mut request).await.unwrap();
        server_side
            .write_all(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x03, 0x01, 0x83, 0x02])
            .await
            .unwrap();
        // Never writing a remainder: if the driver tried to read beyond
        // the exception prefix, it would hang here instead of returning.
    });

    let err = client.read_holding_registers(0, 3).await.unwrap_err();
    assert!(matches!(err, ClientError::Exception { .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn zero_quantity_is_rejected_before_any_byte_is_written() {
    let (client_side, mut server_side) = duplex(256);
    let mut client: TestClient = Client::new(client_side, ClientOptions::default());

    let err = client.read_coils(0, 0).await.unwrap_err();
    assert!(matches!(err, ClientError::IllegalDataValue(_)));

    // Confirm nothing was written: a read with a short timeout would hang
    // forever if bytes had actually landed on the wire, so just verify
    // the server side has nothing buffered.
    let mut probe = [0u8; 1];
    let result =
        tokio::time::timeout(std::time::Duration::from_millis(20), server_side.read(&mut probe))
            .await;
    assert!(result.is_err(), "expected a timeout, got data on the wire");
}
