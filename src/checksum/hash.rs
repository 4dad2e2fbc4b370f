//! Content hash type (blake3 output).

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a byte slice in one shot.
    pub fn of(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl From<blake3::Hash> for ContentHash {
    fn from(hash: blake3::Hash) -> Self {
        Self(*hash.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_of_differs() {
        assert_ne!(ContentHash::of(b"a"), ContentHash::of(b"b"));
        assert_eq!(ContentHash::of(b"a").to_hex().len(), 64);
    }

    #[test]
    fn test_streamed_hash_matches_one_shot() {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"body { ");
        hasher.update(b"color: red }");
        assert_eq!(ContentHash::from(hasher.finalize()), ContentHash::of(b"body { color: red }"));
    }
}
