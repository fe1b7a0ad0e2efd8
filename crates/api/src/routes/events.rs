//! Ledger query and notification intake endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::TransactionId;
use event_store::{EventFilters, EventStore, SagaEvent};
use saga::SagaProgress;

use crate::AppState;
use crate::error::ApiError;

/// GET /api/event?orderId=..&transactionId=..: latest event for a key.
#[tracing::instrument(skip(state))]
pub async fn find<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(filters): Query<EventFilters>,
) -> Result<Json<SagaEvent>, ApiError> {
    let event = state.events.find_by_filters(&filters).await?;
    Ok(Json(event))
}

/// GET /api/event/all: every event, most recent first.
#[tracing::instrument(skip(state))]
pub async fn list_all<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<SagaEvent>>, ApiError> {
    let events = state.events.list_all().await?;
    Ok(Json(events))
}

/// GET /api/event/{transactionId}/progress: summary of one saga.
#[tracing::instrument(skip(state))]
pub async fn progress<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<SagaProgress>, ApiError> {
    let progress = state
        .events
        .progress(&TransactionId::new(transaction_id))
        .await?;
    Ok(Json(progress))
}

/// POST /api/event/notify: a participant reports a step outcome.
#[tracing::instrument(skip(state, event))]
pub async fn notify<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(event): Json<SagaEvent>,
) -> Result<(StatusCode, Json<SagaEvent>), ApiError> {
    if event.order_id.is_blank() || event.transaction_id.is_blank() {
        return Err(ApiError::BadRequest(
            "orderId and transactionId must be informed".to_string(),
        ));
    }

    let stored = state.events.record_completion(event).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}
