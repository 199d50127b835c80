use tokio::net::{TcpStream, ToSocketAddrs};

use crate::codec::tcp::TcpCodec;
use crate::config::ClientOptions;
use crate::errors::ClientError;

use super::generic::Client;

pub type TcpClient = Client<TcpCodec, TcpStream>;

impl TcpClient {
    /// Dials `addr` directly. The transaction engine itself never assumes
    /// anything beyond [`AsyncStream`](crate::stream::AsyncStream) — this
    /// is a convenience constructor for the common case of owning the
    /// whole socket.
    pub async fn connect(addr: impl ToSocketAddrs, options: ClientOptions) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await.map_err(ClientError::Transport)?;
        stream.set_nodelay(true).map_err(ClientError::Transport)?;
        Ok(Client::new(stream, options))
    }
}
