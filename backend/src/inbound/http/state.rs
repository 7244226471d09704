//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use chrono::Datelike;
use mockable::Clock;

use crate::domain::AdminGate;
use crate::domain::ports::{CafesCommand, CafesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cafes: Arc<dyn CafesQuery>,
    pub cafes_command: Arc<dyn CafesCommand>,
    pub admin: AdminGate,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the cafe ports, the admin gate and a clock.
    pub fn new(
        cafes: Arc<dyn CafesQuery>,
        cafes_command: Arc<dyn CafesCommand>,
        admin: AdminGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cafes,
            cafes_command,
            admin,
            clock,
        }
    }

    /// Year shown in page footers.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.clock.utc().year()
    }
}
