//! One-way hashing for data leaving the process
//!
//! Attribution providers receive phone identifiers only as SHA-256 digests;
//! the raw number never crosses that boundary.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of the input.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_phone_digest_is_lowercase_hex() {
        let digest = sha256_hex("01012345678");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
        assert_eq!(
            digest,
            "e60124f2fe2045215abda1ae912aa80bb66dab5fc231a758387682c9c0e70c01"
        );
    }
}
