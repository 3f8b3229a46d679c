//! API key verification.

use crate::error::ApiError;
use sha2::{Digest, Sha256};

/// Verifies the shared API key presented by callers.
///
/// Only the SHA-256 digest of the configured secret is kept. Candidates are
/// hashed and compared digest to digest in constant time.
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    expected: Option<[u8; 32]>,
}

impl ApiKeyGate {
    /// Creates a gate for `api_key`; `None` disables the check.
    #[must_use]
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            expected: api_key.map(hash_key),
        }
    }

    /// A gate that lets every request through.
    #[must_use]
    pub fn disabled() -> Self {
        Self { expected: None }
    }

    /// Whether a key is required.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Checks the value of the API key header.
    ///
    /// # Errors
    /// [`ApiError::Unauthorized`] when the header is absent and
    /// [`ApiError::Forbidden`] when it does not match.
    pub fn check(&self, presented: Option<&str>) -> Result<(), ApiError> {
        let Some(expected) = &self.expected else {
            return Ok(());
        };
        let presented = presented.ok_or(ApiError::Unauthorized)?;

        if constant_time_eq(&hash_key(presented), expected) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

fn hash_key(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_accepts_matching_key() {
        let gate = ApiKeyGate::new(Some("s3cret"));
        assert!(gate.is_enabled());
        assert!(gate.check(Some("s3cret")).is_ok());
    }

    #[test]
    fn test_gate_missing_key() {
        let gate = ApiKeyGate::new(Some("s3cret"));
        assert!(matches!(gate.check(None), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn test_gate_wrong_key() {
        let gate = ApiKeyGate::new(Some("s3cret"));
        assert!(matches!(gate.check(Some("guess")), Err(ApiError::Forbidden)));
        assert!(matches!(gate.check(Some("")), Err(ApiError::Forbidden)));
    }

    #[test]
    fn test_gate_is_exact() {
        let gate = ApiKeyGate::new(Some("s3cret"));
        assert!(matches!(gate.check(Some("S3CRET")), Err(ApiError::Forbidden)));
        assert!(matches!(gate.check(Some(" s3cret")), Err(ApiError::Forbidden)));
        assert!(matches!(gate.check(Some("s3cret ")), Err(ApiError::Forbidden)));
    }

    #[test]
    fn test_disabled_gate() {
        let gate = ApiKeyGate::disabled();
        assert!(!gate.is_enabled());
        assert!(gate.check(None).is_ok());
        assert!(gate.check(Some("anything")).is_ok());
        assert!(!ApiKeyGate::new(None).is_enabled());
    }

    #[test]
    fn test_hash_key_is_sha256() {
        let digest = hash_key("abc");
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        assert_eq!(
            hex,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
