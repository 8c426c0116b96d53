//! Buffered stream carrying protocol messages.
//!
//! Messages written with [`Stream::send`] stay in the write buffer until
//! something flushes it, so they ride along with whatever is sent next.
//! [`Stream::send_flush`] puts the message on the wire right away.
use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};
use tracing::trace;

use std::io::ErrorKind;

use super::messages::{ErrorResponse, Message, Protocol};
use super::Error;

/// A network socket.
#[derive(Debug)]
pub struct Stream<S> {
    inner: BufStream<S>,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Stream<S> {
    /// Wrap a socket.
    pub fn new(stream: S) -> Self {
        Self {
            inner: BufStream::new(stream),
        }
    }

    /// Queue a message. It goes out with the next flush.
    pub async fn send(&mut self, message: &impl Protocol) -> Result<usize, Error> {
        let bytes = message.to_bytes()?;
        eof(self.inner.write_all(&bytes).await)?;
        trace!("<-- {:?}", message);

        Ok(bytes.len())
    }

    /// Send a message and flush the buffer, ensuring
    /// it is sent immediately.
    pub async fn send_flush(&mut self, message: &impl Protocol) -> Result<usize, Error> {
        let sent = self.send(message).await?;
        self.flush().await?;

        Ok(sent)
    }

    /// Flush everything queued so far.
    pub async fn flush(&mut self) -> Result<(), Error> {
        eof(self.inner.flush().await)
    }

    /// Read one message.
    pub async fn read(&mut self) -> Result<Message, Error> {
        let code = eof(self.inner.read_u8().await)?;
        let len = eof(self.inner.read_i32().await)?;

        // Length includes itself.
        if len < 4 {
            return Err(Error::UnexpectedEof);
        }

        let mut bytes = BytesMut::with_capacity(len as usize + 1);
        bytes.put_u8(code);
        bytes.put_i32(len);
        bytes.resize(len as usize + 1, 0);
        eof(self.inner.read_exact(&mut bytes[5..]).await)?;

        Ok(Message::new(bytes.freeze()))
    }

    /// Send an error and flush. The caller is expected
    /// to close the connection afterwards.
    pub async fn fatal(&mut self, error: ErrorResponse) -> Result<(), Error> {
        self.send_flush(&error).await?;
        Ok(())
    }
}

fn eof<T>(result: std::io::Result<T>) -> Result<T, Error> {
    match result {
        Ok(val) => Ok(val),
        Err(err) => {
            if err.kind() == ErrorKind::UnexpectedEof {
                Err(Error::UnexpectedEof)
            } else {
                Err(Error::Io(err))
            }
        }
    }
}
