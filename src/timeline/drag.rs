//! Drag-to-reschedule interaction state machine.
//!
//! ```text
//!          begin                release
//! Idle ───────────► Dragging ───────────► Dropped ──resolve──► Idle
//!   ▲                  │ leave / cancel
//!   └──── reset ◄── Cancelled
//! ```
//!
//! Pointer positions are fractions of the lane width. The grab offset
//! (pointer minus the box's left edge) is captured on `begin` so the box
//! does not jump under the pointer. Until the pointer leaves the grab
//! position the preview keeps the original start, even when that start lies
//! outside the window.
//!
//! Only one drag session exists at a time. A released drop stays in flight
//! until [`DragRescheduler::resolve`] is called with the store's answer;
//! during that time the same entry cannot be dragged again, other entries can.

use std::collections::HashSet;

use chrono::NaiveTime;
use tracing::debug;

use crate::error::{DragError, ScheduleError};
use crate::models::time::{format_minutes, minute_of_day};
use crate::models::{EntryId, EntryPatch, Interval, VenueId};
use crate::scheduler::{ScheduleStore, ScheduledItem};

use super::projector::TimelineProjector;

/// The entry being dragged, captured when the drag starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragTarget {
    pub entry_id: EntryId,
    pub venue_id: VenueId,
    pub original_start: NaiveTime,
    /// Total occupied minutes, used to size the ghost.
    pub duration_minutes: u32,
}

impl DragTarget {
    /// Captures the drag target from a listed item.
    pub fn from_item(item: &ScheduledItem) -> Self {
        Self {
            entry_id: item.entry.id,
            venue_id: item.entry.venue_id.clone(),
            original_start: item.entry.start_time,
            duration_minutes: item.total_minutes,
        }
    }
}

/// Live state of an active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Pointer position at grab time.
    pub grab_pointer: f64,
    /// Pointer position minus the box's left edge at grab time.
    pub grab_offset: f64,
    pub preview_start: NaiveTime,
}

/// Ghost box shown while dragging. Always in the target's own venue.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub entry_id: EntryId,
    pub venue_id: VenueId,
    pub start: NaiveTime,
    /// `HH:MM`.
    pub end: String,
    pub left: f64,
    pub width: f64,
}

/// A released drag waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    pub entry_id: EntryId,
    pub original_start: NaiveTime,
    pub new_start: NaiveTime,
}

impl DropRequest {
    /// The store update that moves the entry.
    pub fn patch(&self) -> EntryPatch {
        EntryPatch::start_at(self.new_start)
    }

    /// Whether the drop landed on the original time.
    pub fn is_unmoved(&self) -> bool {
        self.new_start == self.original_start
    }
}

/// A cancelled drag: the entry stays where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revert {
    pub entry_id: EntryId,
    pub original_start: NaiveTime,
}

/// Drag state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
    Dropped(DropRequest),
    Cancelled(Revert),
}

/// Result of a committed (or refused) drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The store accepted the move.
    Committed(ScheduledItem),
    /// The store refused the move; the entry snaps back to `original_start`.
    Rejected {
        entry_id: EntryId,
        original_start: NaiveTime,
        /// Operator-facing reason.
        message: String,
    },
}

impl DropOutcome {
    /// Whether the move was persisted.
    pub fn is_committed(&self) -> bool {
        matches!(self, DropOutcome::Committed(_))
    }
}

/// Drag-to-reschedule controller.
#[derive(Debug, Default)]
pub struct DragRescheduler {
    projector: TimelineProjector,
    state: DragState,
    in_flight: HashSet<EntryId>,
}

impl DragRescheduler {
    /// Creates an idle controller over a projector.
    pub fn new(projector: TimelineProjector) -> Self {
        Self {
            projector,
            state: DragState::Idle,
            in_flight: HashSet::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a drop of `entry_id` is waiting for the store.
    pub fn is_pending(&self, entry_id: EntryId) -> bool {
        self.in_flight.contains(&entry_id)
    }

    /// Starts dragging `target` with the pointer at `pointer`.
    ///
    /// # Errors
    /// - `SessionActive` if another drag is in progress.
    /// - `CommitPending` if a drop of this entry has not been resolved yet.
    pub fn begin(&mut self, target: DragTarget, pointer: f64) -> Result<Preview, DragError> {
        if let DragState::Dragging(session) = &self.state {
            return Err(DragError::SessionActive(session.target.entry_id));
        }
        if self.in_flight.contains(&target.entry_id) {
            return Err(DragError::CommitPending(target.entry_id));
        }

        let left = self
            .projector
            .unclamped_fraction(minute_of_day(target.original_start));
        let session = DragSession {
            grab_pointer: pointer,
            grab_offset: pointer - left,
            preview_start: target.original_start,
            target,
        };
        debug!(entry_id = %session.target.entry_id, offset = session.grab_offset, "drag started");
        let preview = self.preview_of(&session);
        self.state = DragState::Dragging(session);
        Ok(preview)
    }

    /// Re-derives the candidate start from the pointer and returns the ghost.
    pub fn pointer_move(&mut self, pointer: f64) -> Result<Preview, DragError> {
        let projector = self.projector;
        let DragState::Dragging(session) = &mut self.state else {
            return Err(DragError::NotDragging);
        };
        session.preview_start = if pointer == session.grab_pointer {
            session.target.original_start
        } else {
            projector.position_to_time(pointer - session.grab_offset)
        };
        let session = session.clone();
        Ok(self.preview_of(&session))
    }

    /// Pointer released over the lane: the drop becomes in flight.
    pub fn release(&mut self) -> Result<DropRequest, DragError> {
        let DragState::Dragging(session) = &self.state else {
            return Err(DragError::NotDragging);
        };
        let request = DropRequest {
            entry_id: session.target.entry_id,
            original_start: session.target.original_start,
            new_start: session.preview_start,
        };
        self.in_flight.insert(request.entry_id);
        self.state = DragState::Dropped(request.clone());
        debug!(
            entry_id = %request.entry_id,
            from = %request.original_start,
            to = %request.new_start,
            "drag released"
        );
        Ok(request)
    }

    /// Pointer left the interactive surface.
    pub fn leave(&mut self) -> Result<Revert, DragError> {
        self.cancel()
    }

    /// Abandons the drag without touching the store.
    pub fn cancel(&mut self) -> Result<Revert, DragError> {
        let DragState::Dragging(session) = &self.state else {
            return Err(DragError::NotDragging);
        };
        let revert = Revert {
            entry_id: session.target.entry_id,
            original_start: session.target.original_start,
        };
        self.state = DragState::Cancelled(revert.clone());
        Ok(revert)
    }

    /// Feeds back the store's answer for an in-flight drop.
    ///
    /// # Errors
    /// `NoPendingCommit` if no drop of `entry_id` is in flight.
    pub fn resolve(
        &mut self,
        request: &DropRequest,
        result: Result<ScheduledItem, ScheduleError>,
    ) -> Result<DropOutcome, DragError> {
        if !self.in_flight.remove(&request.entry_id) {
            return Err(DragError::NoPendingCommit(request.entry_id));
        }
        if matches!(&self.state, DragState::Dropped(r) if r.entry_id == request.entry_id) {
            self.state = DragState::Idle;
        }

        Ok(match result {
            Ok(item) => DropOutcome::Committed(item),
            Err(err) => DropOutcome::Rejected {
                entry_id: request.entry_id,
                original_start: request.original_start,
                message: err.to_string(),
            },
        })
    }

    /// Releases the drag and commits it synchronously against `store`.
    pub fn drop_and_commit(&mut self, store: &ScheduleStore) -> Result<DropOutcome, DragError> {
        let request = self.release()?;
        let result = store.update(request.entry_id, request.patch());
        self.resolve(&request, result)
    }

    /// Returns to `Idle` after a cancel or a finished drop.
    ///
    /// Does nothing while a drag is active. In-flight drops stay pending.
    pub fn reset(&mut self) {
        if !matches!(self.state, DragState::Dragging(_)) {
            self.state = DragState::Idle;
        }
    }

    fn preview_of(&self, session: &DragSession) -> Preview {
        let interval = Interval::from_start(
            minute_of_day(session.preview_start),
            session.target.duration_minutes,
        );
        let (left, width) = self.projector.span(&interval);
        Preview {
            entry_id: session.target.entry_id,
            venue_id: session.target.venue_id.clone(),
            start: session.preview_start,
            end: format_minutes(interval.end),
            left,
            width,
        }
    }
}
