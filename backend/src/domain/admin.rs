//! Shared-secret gate for administrative pages.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Errors raised while constructing an [`AdminGate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminGateError {
    /// The configured secret is empty or whitespace.
    #[error("admin key must not be blank")]
    BlankSecret,
}

/// Compares presented tokens against the server-held admin key.
///
/// The key is read once at start-up and kept in zeroizing memory. `Debug`
/// prints only the fingerprint.
#[derive(Clone)]
pub struct AdminGate {
    secret: Zeroizing<String>,
}

impl AdminGate {
    /// Wrap the configured admin key.
    pub fn new(secret: impl Into<String>) -> Result<Self, AdminGateError> {
        let secret = Zeroizing::new(secret.into());
        if secret.trim().is_empty() {
            return Err(AdminGateError::BlankSecret);
        }
        Ok(Self { secret })
    }

    /// `true` when `token` matches the admin key exactly.
    ///
    /// # Examples
    /// ```
    /// use cafes::domain::AdminGate;
    ///
    /// let gate = AdminGate::new("s3cret").expect("non-blank key");
    /// assert!(gate.is_admin(Some("s3cret")));
    /// assert!(!gate.is_admin(Some("S3CRET")));
    /// assert!(!gate.is_admin(None));
    /// ```
    #[must_use]
    pub fn is_admin(&self, token: Option<&str>) -> bool {
        token.is_some_and(|token| token == self.secret.as_str())
    }

    /// Truncated SHA-256 fingerprint of the key, safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.secret.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}
