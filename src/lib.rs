//! Festival program scheduling.
//!
//! Places works and groups of works into venues across festival days and
//! guarantees that no venue is ever double-booked.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Venue`, `Work`, `Group`, `ScheduleEntry`,
//!   `EntryContent`, `EntryDraft`, `EntryPatch`, `Interval`
//! - **`catalog`**: Read-only access to venues, works and groups
//! - **`validation`**: Catalog seed integrity checks (duplicate IDs, dangling members)
//! - **`scheduler`**: Runtime aggregation, overlap detection, the entry store
//! - **`timeline`**: Time ↔ lane projection and drag rescheduling
//! - **`config`**: TOML configuration
//! - **`http`**: REST API (feature `http-server`)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::{NaiveDate, NaiveTime};
//! use fest_schedule::catalog::InMemoryCatalog;
//! use fest_schedule::models::{EntryDraft, Venue, Work};
//! use fest_schedule::scheduler::ScheduleStore;
//!
//! let catalog = InMemoryCatalog::new()
//!     .with_venue(Venue::new("V", "Main hall"))
//!     .with_work(Work::new("A", "Work A", 90))
//!     .with_work(Work::new("B", "Work B", 30));
//! let store = ScheduleStore::new(Arc::new(catalog));
//!
//! let day = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//!
//! store.create(EntryDraft::at("V", day, at(10, 0)).with_work("A")).unwrap();
//! // Back-to-back is fine.
//! assert!(store.create(EntryDraft::at("V", day, at(11, 30)).with_work("B")).is_ok());
//! // Overlapping is not.
//! assert!(store.create(EntryDraft::at("V", day, at(11, 0)).with_work("B")).is_err());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod timeline;
pub mod validation;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ConfigError, DragError, ScheduleError, ScheduleResult};
