use sha2::{Digest, Sha256};
use std::io::{Result, Write};

/// Forwards writes to `inner` while feeding the same bytes into a SHA-256.
pub struct HashingForward<'a, W: Write> {
    inner: W,
    hasher: &'a mut Sha256,
    // Total bytes accepted by `inner`
    pub counted: u64,
}

impl<'a, W: Write> HashingForward<'a, W> {
    pub fn new(inner: W, hasher: &'a mut Sha256) -> Self {
        Self {
            inner,
            hasher,
            counted: 0,
        }
    }
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<'a, W: Write> Write for HashingForward<'a, W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        // Only hash what the inner writer actually took.
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.counted += n as u64;
        Ok(n)
    }
    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}
