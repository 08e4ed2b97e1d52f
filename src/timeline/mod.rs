//! Visual timeline: projection of entries onto venue lanes and drag rescheduling.
//!
//! | Type | Role |
//! |------|------|
//! | [`TimelineWindow`] | Visible hours and snapping step (08:00–24:00, 15 min by default) |
//! | [`TimelineProjector`] | time ↔ lane fraction, boxes and lanes |
//! | [`DragRescheduler`] | Idle / Dragging / Dropped / Cancelled state machine |
//!
//! The drag controller never writes directly: a drop goes through
//! [`ScheduleStore::update`](crate::scheduler::ScheduleStore::update) and is
//! subject to the same overlap check as any other write.

mod drag;
mod projector;

pub use drag::{
    DragRescheduler, DragSession, DragState, DragTarget, DropOutcome, DropRequest, Preview, Revert,
};
pub use projector::{TimelineBox, TimelineProjector, TimelineWindow, VenueLane};
