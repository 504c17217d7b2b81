//! Password digests exposed to callers.
//!
//! [`fast_hash_password`] is the djb2 placeholder that the operation table
//! promises. It is NOT a cryptographic hash: it is fast, collision-prone and
//! unsuitable for storing real credentials. [`sha256_hex`] is the stronger
//! fallback digest, available to tooling but not to the operation table.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::OpsError;

/// Width in hex characters of a [`fast_hash_password`] digest.
pub const FAST_DIGEST_WIDTH: usize = 16;

const DJB2_SEED: u64 = 5381;

/// djb2 over `salt ‖ password`, rendered as 16 lowercase hex characters.
///
/// Bytes are taken as unsigned and the state wraps at 64 bits, so the digest
/// is identical on every platform and across process restarts.
pub fn fast_hash_password(password: &str, salt: &str) -> String {
    let hash = salt
        .bytes()
        .chain(password.bytes())
        .fold(DJB2_SEED, |hash, byte| {
            // hash * 33 + byte
            (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
        });
    format!("{:016x}", hash)
}

/// SHA-256 of `salt ‖ password` as 64 lowercase hex characters.
pub fn sha256_hex(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    #[default]
    Djb2,
    Sha256,
}

impl HashAlgorithm {
    pub fn digest(self, password: &str, salt: &str) -> String {
        match self {
            HashAlgorithm::Djb2 => fast_hash_password(password, salt),
            HashAlgorithm::Sha256 => sha256_hex(password, salt),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Djb2 => f.write_str("djb2"),
            HashAlgorithm::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "djb2" | "fast" => Ok(HashAlgorithm::Djb2),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            other => Err(OpsError::Config(format!(
                "unknown hash algorithm '{}' (expected 'djb2' or 'sha256')",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_hash_known_values() {
        assert_eq!(fast_hash_password("pw", "salt"), "000006531b38c340");
        assert_eq!(fast_hash_password("password", "s"), "0377d8f1e246e04b");
        // Empty input leaves the seed untouched
        assert_eq!(fast_hash_password("", ""), "0000000000001505");
    }

    #[test]
    fn test_fast_hash_treats_bytes_as_unsigned() {
        // "ü" is 0xC3 0xBC; sign-extended bytes would give 0000000000596224
        assert_eq!(fast_hash_password("", "ü"), "0000000000598424");
        assert_eq!(fast_hash_password("ü", ""), "0000000000598424");
    }

    #[test]
    fn test_fast_hash_is_fixed_width_lowercase_hex() {
        let long = "x".repeat(4096);
        for (password, salt) in [("pw", "salt"), ("", ""), (long.as_str(), "ü")] {
            let digest = fast_hash_password(password, salt);
            assert_eq!(digest.len(), FAST_DIGEST_WIDTH);
            assert!(digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_fast_hash_depends_on_salt() {
        assert_ne!(
            fast_hash_password("pw", "salt"),
            fast_hash_password("pw", "salt2")
        );
    }

    #[test]
    fn test_fast_hash_only_sees_concatenation() {
        // Documented weakness: the boundary between salt and password is lost
        assert_eq!(
            fast_hash_password("tpw", "sal"),
            fast_hash_password("pw", "salt")
        );
    }

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex("pw", "salt"),
            "21baed949b716c49cbf7d8fe79412f1dc104745650a32081ae0be0b967aeb7f3"
        );
    }

    #[test]
    fn test_algorithm_dispatch() {
        assert_eq!(
            HashAlgorithm::Djb2.digest("pw", "salt"),
            fast_hash_password("pw", "salt")
        );
        assert_eq!(HashAlgorithm::Sha256.digest("pw", "salt").len(), 64);
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }
}
