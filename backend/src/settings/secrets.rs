//! Secret material read from the process environment.
//!
//! The session secret seeds the cookie signing/encryption key used for CSRF
//! tokens; the admin key unlocks the delete and add affordances. Both are
//! required. Secret bytes are zeroized once the derived values are built.

use actix_web::cookie::Key;
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{AdminGate, AdminGateError};

pub(crate) const SESSION_SECRET_ENV: &str = "CAFES_SESSION_SECRET";
pub(crate) const ADMIN_KEY_ENV: &str = "CAFES_ADMIN_KEY";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SESSION_SECRET_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing cookie toggle and warn.
    Debug,
    /// Release builds require every toggle explicitly.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cafes::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Secrets and cookie toggles needed before the listener starts.
pub struct Secrets {
    /// Signing and encryption key for the session cookie.
    pub session_key: Key,
    /// Whether the session cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// Gate for admin-only affordances.
    pub admin: AdminGate,
}

/// Errors raised while reading secrets.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The session secret is too short to derive a cookie key.
    #[error("{SESSION_SECRET_ENV} too short: need >= {min_len} bytes, got {length}")]
    SessionSecretTooShort { length: usize, min_len: usize },
    /// The admin key is present but blank.
    #[error("invalid {ADMIN_KEY_ENV}: {0}")]
    AdminKey(#[from] AdminGateError),
}

/// Read every secret from `env`.
///
/// # Examples
///
/// ```rust
/// use cafes::settings::{BuildMode, secrets_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "CAFES_SESSION_SECRET" => Some("s".repeat(64)),
///     "CAFES_ADMIN_KEY" => Some("letmein".to_owned()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     _ => None,
/// });
///
/// let secrets = secrets_from_env(&env, BuildMode::Release).expect("valid secrets");
/// assert!(secrets.cookie_secure);
/// assert!(secrets.admin.is_admin(Some("letmein")));
/// ```
pub fn secrets_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Secrets, SettingsError> {
    let session_key = session_key_from_env(env)?;
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    let admin = admin_gate_from_env(env)?;
    Ok(Secrets {
        session_key,
        cookie_secure,
        admin,
    })
}

fn session_key_from_env<E: Env>(env: &E) -> Result<Key, SettingsError> {
    let secret = env
        .string(SESSION_SECRET_ENV)
        .map(Zeroizing::new)
        .ok_or(SettingsError::MissingEnv {
            name: SESSION_SECRET_ENV,
        })?;
    let length = secret.len();
    if length < SESSION_SECRET_MIN_LEN {
        return Err(SettingsError::SessionSecretTooShort {
            length,
            min_len: SESSION_SECRET_MIN_LEN,
        });
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SettingsError> {
    match env.string(COOKIE_SECURE_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None if mode.is_debug() => {
                warn!(value = %value, "invalid SESSION_COOKIE_SECURE; defaulting to secure");
                Ok(true)
            }
            None => Err(SettingsError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value,
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => {
            warn!("SESSION_COOKIE_SECURE not set; defaulting to secure");
            Ok(true)
        }
        None => Err(SettingsError::MissingEnv {
            name: COOKIE_SECURE_ENV,
        }),
    }
}

fn admin_gate_from_env<E: Env>(env: &E) -> Result<AdminGate, SettingsError> {
    let secret = env.string(ADMIN_KEY_ENV).ok_or(SettingsError::MissingEnv {
        name: ADMIN_KEY_ENV,
    })?;
    Ok(AdminGate::new(secret)?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Truncated SHA-256 fingerprint of the session key's signing material.
///
/// Logged at startup so operators can tell which key is active without
/// exposing it.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
