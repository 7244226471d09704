//! Cafe directory backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
