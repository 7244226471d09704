//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::Key;

/// Listener and session cookie configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from the session key and listener.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
        }
    }
}
