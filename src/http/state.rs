//! Application state for the HTTP server.

use std::sync::Arc;

use crate::scheduler::ScheduleStore;
use crate::timeline::TimelineProjector;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The schedule store; sole writer of schedule entries
    pub store: Arc<ScheduleStore>,
    /// Timeline projection for the configured window
    pub projector: TimelineProjector,
}

impl AppState {
    /// Create a new application state around a store.
    pub fn new(store: Arc<ScheduleStore>, projector: TimelineProjector) -> Self {
        Self { store, projector }
    }
}
