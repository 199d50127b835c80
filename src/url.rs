//! Thin scheme-matching factory. Not part of the protocol engine: this
//! is the one piece of transport routing the crate takes on as a
//! caller convenience, kept deliberately small.

use tokio::net::TcpStream;

use crate::client::generic::Client;
use crate::client::{RtuClient, TcpClient};
use crate::codec::rtu::RtuCodec;
use crate::config::{ClientOptions, SerialSettings};
use crate::errors::ClientError;
use crate::stream::AsyncStream;

const DEFAULT_TCP_PORT: u16 = 502;

pub enum Connection {
    Tcp(TcpClient),
    Rtu(Client<RtuCodec, Box<dyn AsyncStream>>),
}

/// Routes a URL to the matching client. `tcp://host[:502]` dials TCP/MBAP;
/// `serial://<device>` opens a local serial port; `serial-tcp://host:port`
/// and `rfc2217://host:port` both dial a plain TCP socket and run the RTU
/// codec over it, since an RFC 2217 terminal server transparently relays
/// raw serial bytes. Any other scheme, including the recognized but
/// unimplemented `serial-tango://`, is rejected.
pub async fn connect(url: &str, options: ClientOptions) -> Result<Connection, ClientError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| ClientError::UnsupportedScheme(url.to_string()))?;

    match scheme {
        "tcp" => {
            let addr = with_default_port(rest, DEFAULT_TCP_PORT);
            Ok(Connection::Tcp(TcpClient::connect(addr, options).await?))
        }
        "serial" => {
            let settings = SerialSettings {
                device: rest.to_string(),
                ..SerialSettings::default()
            };
            let client = RtuClient::open(&settings, options)?;
            Ok(Connection::Rtu(Client::new(
                Box::new(client.into_inner()) as Box<dyn AsyncStream>,
                options,
            )))
        }
        "serial-tcp" | "rfc2217" => {
            let stream = TcpStream::connect(rest).await.map_err(ClientError::Transport)?;
            Ok(Connection::Rtu(Client::new(
                Box::new(stream) as Box<dyn AsyncStream>,
                options,
            )))
        }
        "serial-tango" => Err(ClientError::UnsupportedScheme(format!(
            "{scheme} has no transport binding in this crate"
        ))),
        other => Err(ClientError::UnsupportedScheme(other.to_string())),
    }
}

fn with_default_port(host: &str, port: u16) -> String {
    if host.rsplit(':').next().and_then(|p| p.parse::<u16>().ok()).is_some() {
        host.to_string()
    } else {
        format!("{host}:{port}")
    }
}
