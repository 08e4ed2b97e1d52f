//! HTTP server module.
//!
//! Exposes the schedule store as a REST API over axum.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing (camelCase JSON, YYYY-MM-DD, HH:MM)    │
//! │  - ScheduleError → 400 / 404 with {error, code, conflict} │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  ScheduleStore                                            │
//! │  - Atomic overlap check + commit                          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Catalog (venues, works, groups; read-only)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | POST | `/schedule` | 201 entry / 400 |
//! | GET | `/schedule?editionId=&day=&venueId=` | entries |
//! | GET | `/schedule/{id}` | entry / 404 |
//! | PUT | `/schedule/{id}` | entry / 400 / 404 |
//! | DELETE | `/schedule/{id}` | `{deleted, id}` / 404 |
//! | POST | `/schedule/check-overlap` | `{hasOverlap, conflictDetails?}` |
//! | GET | `/schedule/timeline?day=&venueId=&editionId=` | venue lanes |
//! | GET | `/health` | status |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
