//! Checksum calculation for content-addressed output names.
//!
//! A [`ChecksumCalculator`] consumes an input stream, produces a digest and
//! hands back a stream that replays the very same bytes. The digest is known
//! before any byte of the replay stream is consumed, so the writer can embed
//! it into the output path before opening the write target, and the input is
//! never read twice.

mod hash;

pub use hash::ContentHash;

use std::future::Future;
use std::io::{self, Cursor};
use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 64 * 1024;

/// Digest plus the replayed input.
#[derive(Debug)]
pub struct Checksummed<S> {
    /// Hex digest of the full input.
    pub checksum: String,
    /// The input bytes, unchanged, ready for the write target.
    pub stream: S,
}

/// Capability: digest a byte stream while forwarding it.
pub trait ChecksumCalculator: Send + Sync {
    /// Stream type handing the original bytes downstream.
    type Stream: AsyncRead + Unpin + Send;

    /// Read `input` to the end, returning its digest and a replay stream.
    ///
    /// Fails with the underlying I/O error if the input stream fails.
    fn calculate<R>(
        &self,
        input: R,
    ) -> impl Future<Output = io::Result<Checksummed<Self::Stream>>> + Send
    where
        R: AsyncRead + Unpin + Send;
}

/// Blake3 checksum calculator buffering the input in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Checksum;

impl ChecksumCalculator for Blake3Checksum {
    type Stream = Cursor<Vec<u8>>;

    async fn calculate<R>(&self, mut input: R) -> io::Result<Checksummed<Self::Stream>>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut hasher = blake3::Hasher::new();
        let mut body = Vec::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let n = input.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            body.extend_from_slice(&buffer[..n]);
        }

        Ok(Checksummed {
            checksum: ContentHash::from(hasher.finalize()).to_hex(),
            stream: Cursor::new(body),
        })
    }
}
