//! Scheduling core: runtime aggregation, overlap detection and the entry store.
//!
//! # Data Flow
//!
//! ```text
//! create/update ──► ScheduleStore ──► OverlapDetector ──► RuntimeAggregator ──► Catalog
//!                        │                  │
//!                        │◄── Conflict ─────┘
//!                        ▼
//!                   commit (same write lock as the check)
//! ```
//!
//! # Invariants
//!
//! - No two entries in the same venue and day occupy intersecting
//!   half-open intervals at the moment either of them was written.
//! - Intervals are recomputed from current catalog runtimes on every check.
//! - Editing a work's runtime in the catalog does not re-validate existing
//!   entries; the next placement-touching write in that slot sees it.

mod overlap;
mod runtime;
mod store;

pub use overlap::{Conflict, OverlapCheck, OverlapDetector};
pub use runtime::RuntimeAggregator;
pub use store::{ContentSummary, ScheduleFilter, ScheduleStore, ScheduledItem};
