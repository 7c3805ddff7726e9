//! Posting key handling.
//!
//! # Security
//! - Keys are loaded ONLY from environment variables or explicit input
//! - Keys are never logged or serialized
//! - Signing itself is delegated to an external [`Broadcaster`](crate::blockchain::transaction::Broadcaster)

use crate::blockchain::types::{ClientError, ClientResult};

/// Environment variable name for the posting key.
pub const POSTING_KEY_ENV_VAR: &str = "VOTING_POSTING_KEY";

/// A WIF-encoded private posting key.
#[derive(Clone, PartialEq, Eq)]
pub struct PostingKey(String);

impl PostingKey {
    /// Wrap a WIF string.
    ///
    /// Only the shape is checked (non-empty, base58 alphabet); the signer
    /// validates the key itself.
    pub fn from_wif(wif: &str) -> ClientResult<Self> {
        let wif = wif.trim();
        const BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
        if wif.is_empty() || !wif.chars().all(|c| BASE58.contains(c)) {
            return Err(ClientError::Setup("Invalid posting key format".to_string()));
        }
        Ok(Self(wif.to_string()))
    }

    /// Load the key from `VOTING_POSTING_KEY`.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Load the key through `lookup`, which resolves environment variable names.
    pub fn from_env_with<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wif = lookup(POSTING_KEY_ENV_VAR).ok_or_else(|| {
            ClientError::Setup(format!(
                "Environment variable {} not set",
                POSTING_KEY_ENV_VAR
            ))
        })?;
        Self::from_wif(&wif)
    }

    /// Expose the WIF to a signer.
    pub fn expose_wif(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PostingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PostingKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = PostingKey::from_wif("5JfakeKeyForTests").unwrap();
        assert_eq!(format!("{:?}", key), "PostingKey(<redacted>)");
        assert_eq!(key.expose_wif(), "5JfakeKeyForTests");
    }

    #[test]
    fn test_rejects_bad_shape() {
        assert!(PostingKey::from_wif("").is_err());
        assert!(PostingKey::from_wif("0OIl").is_err());
    }

    #[test]
    fn test_from_env_reads_posting_key_variable() {
        let key = PostingKey::from_env_with(|name| {
            (name == POSTING_KEY_ENV_VAR).then(|| " 5JfakeKeyForTests\n".to_string())
        })
        .unwrap();
        assert_eq!(key.expose_wif(), "5JfakeKeyForTests");
    }

    #[test]
    fn test_from_env_unset_is_setup_error() {
        match PostingKey::from_env_with(|_| None) {
            Err(ClientError::Setup(message)) => assert!(message.contains(POSTING_KEY_ENV_VAR)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_from_env_rejects_malformed_value() {
        assert!(PostingKey::from_env_with(|_| Some("not-a-key!".to_string())).is_err());
    }
}
