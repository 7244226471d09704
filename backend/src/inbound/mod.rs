//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTML page handlers live under [`http`].

pub mod http;
