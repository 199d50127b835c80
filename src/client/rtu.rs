use tokio_serial::SerialPortBuilderExt;

use crate::codec::rtu::RtuCodec;
use crate::config::{ClientOptions, SerialSettings};
use crate::errors::ClientError;

use super::generic::Client;

pub type RtuClient = Client<RtuCodec, tokio_serial::SerialStream>;

impl RtuClient {
    /// Opens the local serial device described by `settings`.
    pub fn open(settings: &SerialSettings, options: ClientOptions) -> Result<Self, ClientError> {
        let stream = tokio_serial::new(&settings.device, settings.baud_rate)
            .data_bits(settings.data_bits.into())
            .parity(settings.parity.into())
            .stop_bits(settings.stop_bits.into())
            .open_native_async()
            .map_err(|err| ClientError::Transport(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
        Ok(Client::new(stream, options))
    }

    /// RFC 2217 / serial-over-TCP: a terminal server transparently relays
    /// raw serial bytes over a plain TCP connection, so the RTU codec
    /// (address + PDU + CRC) runs unchanged over a [`TcpStream`].
    pub async fn connect_tcp(
        addr: impl tokio::net::ToSocketAddrs,
        options: ClientOptions,
    ) -> Result<Client<RtuCodec, tokio::net::TcpStream>, ClientError> {
        let stream = tokio::net::TcpStream::connect(addr)
            .await
            .map_err(ClientError::Transport)?;
        Ok(Client::new(stream, options))
    }
}
