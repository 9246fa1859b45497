//! Token string generation

use rand::rngs::OsRng;
use rand::RngCore;

use sl_shared::config::session::MIN_TOKEN_BYTES;

/// Source of candidate token strings
pub trait TokenGenerator: Send + Sync {
    /// Produce a new candidate token
    fn generate(&self) -> String;
}

/// Hex-encoded bytes from the operating system RNG
///
/// Never fewer than 16 bytes (128 bits) per token.
#[derive(Debug, Clone)]
pub struct RandomTokenGenerator {
    bytes: usize,
}

impl RandomTokenGenerator {
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(MIN_TOKEN_BYTES),
        }
    }

    /// Random bytes drawn per token
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new(32)
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        OsRng.fill_bytes(&mut buf);
        hex::encode(buf)
    }
}
