//! HTTP handlers for the REST API.
//!
//! Each handler parses the wire format and delegates to the
//! [`ScheduleStore`](crate::scheduler::ScheduleStore). Store calls are
//! synchronous and never hold a lock across an `.await`, so a dropped
//! request cannot leave a partially applied write.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::dto::{
    CheckOverlapResponse, DeleteResponse, EntryListResponse, EntryRequest, EntryResponse,
    HealthResponse, ListQuery, TimelineQuery, TimelineResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::error::ScheduleError;
use crate::models::time::format_window_bound;
use crate::models::EntryId;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn path<T>(param: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries: state.store.len(),
    }))
}

// =============================================================================
// Schedule CRUD
// =============================================================================

/// POST /schedule
///
/// Creates an entry. 201 with the entry, 400 on validation or overlap.
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryResponse>), AppError> {
    let draft = body(payload)?.into_draft()?;
    let item = state.store.create(draft)?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// PUT /schedule/{id}
///
/// Partial update; unspecified fields keep their stored values.
pub async fn update_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> HandlerResult<EntryResponse> {
    let id = EntryId::new(path(id)?);
    let patch = body(payload)?.into_patch()?;
    let item = state.store.update(id, patch)?;
    Ok(Json(item.into()))
}

/// DELETE /schedule/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> HandlerResult<DeleteResponse> {
    let removed = state.store.delete(EntryId::new(path(id)?))?;
    Ok(Json(DeleteResponse {
        deleted: true,
        id: removed.id,
    }))
}

/// GET /schedule/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> HandlerResult<EntryResponse> {
    let item = state.store.get(EntryId::new(path(id)?))?;
    Ok(Json(item.into()))
}

/// GET /schedule?editionId=&day=&venueId=
///
/// Ordered by day, start time, then venue sort position.
pub async fn list_entries(
    State(state): State<AppState>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> HandlerResult<EntryListResponse> {
    let filter = query(params)?.into_filter()?;
    let entries: Vec<EntryResponse> = state
        .store
        .list(&filter)
        .into_iter()
        .map(Into::into)
        .collect();
    let total = entries.len();

    Ok(Json(EntryListResponse { entries, total }))
}

/// POST /schedule/check-overlap
///
/// Dry run of a create (or of an edit, with `excludeEntryId`). Never writes.
pub async fn check_overlap(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> HandlerResult<CheckOverlapResponse> {
    let request = body(payload)?;
    let exclude = request.exclude_entry_id.map(EntryId::new);
    let draft = request.into_draft()?;
    let check = state.store.check_overlap(&draft, exclude)?;
    Ok(Json(check.into()))
}

// =============================================================================
// Timeline
// =============================================================================

/// GET /schedule/timeline?day=&venueId=&editionId=
///
/// One lane per venue for the requested day.
pub async fn get_timeline(
    State(state): State<AppState>,
    params: Result<Query<TimelineQuery>, QueryRejection>,
) -> HandlerResult<TimelineResponse> {
    let filter = query(params)?.into_filter()?;
    let day = filter
        .day
        .ok_or_else(|| ScheduleError::InvalidPlacement("day is required".into()))?;

    let items = state.store.list(&filter);
    let mut venues = state.store.catalog().venues();
    if let Some(venue_id) = &filter.venue_id {
        venues.retain(|v| &v.id == venue_id);
    }

    let window = state.projector.window();
    Ok(Json(TimelineResponse {
        day,
        window_start: format_window_bound(window.start_minute()),
        window_end: format_window_bound(window.end_minute()),
        step_minutes: window.step_minutes(),
        lanes: state.projector.lanes(&items, &venues),
    }))
}
