//! Event endpoints
//!
//! These back a browser calendar widget: selecting a slot posts a new event,
//! selecting an event fetches, updates or deletes it. Every event is returned
//! with its past/upcoming status and style hook.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use evtrack_core::flow::{CreationFlow, EditFlow, EditOutcome};
use evtrack_core::{Event, EventId, EventStyle, Filter, TrackerError, filter_events};

use crate::routes::{ApiJson, ApiPath, ApiQuery, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// An event as returned by the API
#[derive(Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub is_past: bool,
    pub style: EventStyle,
}

impl EventView {
    fn new(event: &Event, now: DateTime<Utc>) -> Self {
        EventView {
            event: event.clone(),
            is_past: event.is_past(now),
            style: EventStyle::for_event(event, now),
        }
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub filter: Option<Filter>,
}

/// GET /events?filter=all|past|upcoming - List events in store order
async fn list_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<EventView>>, AppError> {
    let now = Utc::now();
    let store = state.store()?;

    let events = filter_events(store.list(), query.filter.unwrap_or_default(), now)
        .into_iter()
        .map(|event| EventView::new(event, now))
        .collect();

    Ok(Json(events))
}

/// GET /events/:id - A single event
async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EventId>,
) -> Result<Json<EventView>, AppError> {
    let store = state.store()?;
    let event = store.get(id).ok_or(TrackerError::NotFound(id))?;

    Ok(Json(EventView::new(event, Utc::now())))
}

/// Request body for creating an event
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    /// The selected slot. Defaults to now.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// POST /events - Create an event on the selected slot
async fn create_event(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventView>), AppError> {
    let now = Utc::now();
    let mut store = state.store()?;

    let mut flow = CreationFlow::new();
    if let Some(date) = req.date {
        flow.select_slot(date);
    }

    let event = flow.confirm(&mut *store, &req.title, req.location, now)?;
    tracing::info!(id = %event.id, "created event");

    Ok((StatusCode::CREATED, Json(EventView::new(event, now))))
}

/// Request body for editing an event. Absent fields keep their value;
/// an empty location clears it.
#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub location: Option<String>,
}

/// PUT /events/:id - Save the edit form
async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EventId>,
    ApiJson(req): ApiJson<UpdateEventRequest>,
) -> Result<Json<EventView>, AppError> {
    let mut store = state.store()?;
    let event = store.get(id).ok_or(TrackerError::NotFound(id))?;

    let mut flow = EditFlow::new();
    flow.begin(event);

    if let Some(form) = flow.form_mut() {
        if let Some(title) = req.title {
            form.title = title;
        }
        if let Some(location) = req.location {
            form.location = location;
        }
    }

    match flow.save(&mut *store)? {
        Some(EditOutcome::Saved(event)) => {
            tracing::info!(%id, "updated event");
            Ok(Json(EventView::new(&event, Utc::now())))
        }
        _ => Err(TrackerError::NotFound(id).into()),
    }
}

/// DELETE /events/:id - Remove an event (no-op if already gone)
async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EventId>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store()?;

    if store.remove(id).is_some() {
        tracing::info!(%id, "deleted event");
    }

    Ok(StatusCode::NO_CONTENT)
}
