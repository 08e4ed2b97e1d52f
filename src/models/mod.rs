//! Festival scheduling domain models.
//!
//! Provides the data types for venues, schedulable content and schedule
//! entries. Venues, works and groups are supplied by the catalog subsystem
//! and never mutated here; [`ScheduleEntry`] is the only entity the
//! scheduler creates or changes.
//!
//! # Domain Mappings
//!
//! | fest-schedule | Film festival | Theatre festival | Conference |
//! |---------------|---------------|------------------|------------|
//! | Venue | Cinema screen | Stage | Room |
//! | Work | Film | Play | Talk |
//! | Group | Shorts block | Double bill | Session |
//! | ScheduleEntry | Screening | Performance | Slot |

mod content;
mod entry;
mod ids;
mod interval;
mod text;
pub mod time;
mod venue;

pub use content::{Group, GroupMember, Work};
pub use entry::{EntryContent, EntryDraft, EntryPatch, Placement, ScheduleEntry, SlotKey};
pub use ids::{EditionId, EntryId, GroupId, VenueId, WorkId};
pub use interval::Interval;
pub use text::LocalizedText;
pub use venue::Venue;
