//! Normalizes whatever bidirectional byte stream the caller hands us
//! into one uniform surface the transaction driver can suspend on.

use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

#[async_trait::async_trait]
pub trait AsyncStream: Send {
    async fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;
    async fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>>;
    async fn close(&mut self) -> io::Result<()>;
}

#[async_trait::async_trait]
impl<T> AsyncStream for T
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        AsyncWriteExt::write_all(self, buf).await?;
        AsyncWriteExt::flush(self).await
    }

    async fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        AsyncReadExt::read_exact(self, &mut buf).await?;
        Ok(buf)
    }

    async fn close(&mut self) -> io::Result<()> {
        AsyncWriteExt::shutdown(self).await
    }
}

/// Joins a split reader/writer pair (as returned by e.g.
/// `tokio::net::TcpStream::into_split`) into a single [`AsyncStream`].
pub struct JoinedStream<R, W> {
    inner: io::Join<R, W>,
}

impl<R, W> JoinedStream<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            inner: io::join(reader, writer),
        }
    }
}

#[async_trait::async_trait]
impl<R, W> AsyncStream for JoinedStream<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        AsyncStream::write_all(&mut self.inner, buf).await
    }

    async fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>> {
        AsyncStream::read_exactly(&mut self.inner, n).await
    }

    async fn close(&mut self) -> io::Result<()> {
        AsyncStream::close(&mut self.inner).await
    }
}

#[async_trait::async_trait]
impl AsyncStream for Box<dyn AsyncStream> {
    async fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        (**self).write_all(buf).await
    }

    async fn read_exactly(&mut self, n: usize) -> io::Result<Vec<u8>> {
        (**self).read_exactly(n).await
    }

    async fn close(&mut self) -> io::Result<()> {
        (**self).close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplex_round_trips_through_the_blanket_impl() {
        let (mut a, mut b) = io::duplex(64);
        AsyncStream::write_all(&mut a, b"hello").await.unwrap();
        let got = AsyncStream::read_exactly(&mut b, 5).await.unwrap();
        assert_eq!(got, b"hello");
    }

    #[tokio::test]
    async fn scripted_mock_stream_is_read_in_the_exact_chunks_requested() {
        let mut mock = tokio_test::io::Builder::new()
            .write(&[0x01, 0x03, 0x00, 0x00, 0x00, 0x02])
            .read(&[0x01, 0x03])
            .read(&[0x04, 0x12, 0x34, 0xAB, 0xCD])
            .build();

        AsyncStream::write_all(&mut mock, &[0x01, 0x03, 0x00, 0x00, 0x00, 0x02])
            .await
            .unwrap();
        let prefix = AsyncStream::read_exactly(&mut mock, 2).await.unwrap();
        assert_eq!(prefix, vec![0x01, 0x03]);
        let rest = AsyncStream::read_exactly(&mut mock, 5).await.unwrap();
        assert_eq!(rest, vec![0x04, 0x12, 0x34, 0xAB, 0xCD]);
    }

    #[tokio::test]
    async fn read_exactly_errors_on_premature_eof() {
        let (a, mut b) = io::duplex(64);
        drop(a);
        let err = AsyncStream::read_exactly(&mut b, 5).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
