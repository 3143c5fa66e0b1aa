//! Async transport over tokio streams.
//!
//! Same wire behaviour as the blocking service. A cancelled future may
//! leave a partial frame on the stream; callers should drop the connection
//! rather than reuse it.

use crate::domain::envelope::CHALLENGE_LEN;
use crate::domain::errors::ChannelError;
use crate::ports::outbound::Clock;
use crate::service::{new_challenge, SecureChannel};
use shared_types::{check_frame_len, FrameError, LENGTH_PREFIX_SIZE};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

impl<C: Clock> SecureChannel<C> {
    /// Async counterpart of `SecureChannelApi::send`.
    pub async fn send_async<S>(&self, stream: &mut S, payload: &[u8]) -> Result<(), ChannelError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let challenge = if self.echoes_challenge() {
            let mut challenge = [0u8; CHALLENGE_LEN];
            stream.read_exact(&mut challenge).await?;
            Some(challenge)
        } else {
            None
        };

        let ciphertext = self.seal(payload, challenge.as_ref())?;
        let len = u32::try_from(ciphertext.len()).map_err(|_| ChannelError::FrameTooLarge {
            len: ciphertext.len(),
            max: u32::MAX as usize,
        })?;

        stream.write_all(&len.to_be_bytes()).await?;
        stream.write_all(&ciphertext).await?;
        stream.flush().await?;
        self.record_sent(payload.len(), ciphertext.len());
        Ok(())
    }

    /// Async counterpart of `SecureChannelApi::receive`.
    pub async fn receive_async<S>(&self, stream: &mut S) -> Result<Vec<u8>, ChannelError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let challenge = new_challenge();
        stream.write_all(&challenge).await?;
        stream.flush().await?;

        let ciphertext = match self.read_frame_async(stream).await {
            Ok(ciphertext) => ciphertext,
            Err(err) => {
                self.record_rejection(&err);
                return Err(err);
            }
        };
        self.open(&ciphertext, &challenge)
    }

    async fn read_frame_async<S>(&self, stream: &mut S) -> Result<Vec<u8>, ChannelError>
    where
        S: AsyncRead + Unpin,
    {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        stream.read_exact(&mut prefix).await?;
        let len = u32::from_be_bytes(prefix) as usize;
        check_frame_len(len, self.config().max_frame_len).map_err(ChannelError::from)?;

        let mut buffer = vec![0u8; len];
        stream
            .read_exact(&mut buffer)
            .await
            .map_err(FrameError::Io)?;
        Ok(buffer)
    }
}
