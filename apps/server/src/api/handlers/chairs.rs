//! Chair endpoint handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    conditions::ChairSearchCondition,
    models::{Chair, ChairListResponse, ChairSearchResponse, ContactRequest},
    services::ChairSearchParams,
    state::AppState,
    Error, Result,
};

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<ChairSearchParams>,
) -> Result<Json<ChairSearchResponse>> {
    Ok(Json(state.chairs.search(&params).await?))
}

pub async fn search_condition(State(state): State<AppState>) -> Json<ChairSearchCondition> {
    Json(state.chairs.conditions().clone())
}

pub async fn low_priced(State(state): State<AppState>) -> Json<ChairListResponse> {
    Json(ChairListResponse {
        chairs: state.chairs.low_priced().as_ref().clone(),
    })
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Chair>> {
    Ok(Json(state.chairs.detail(id).await?))
}

pub async fn buy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(contact): Json<ContactRequest>,
) -> Result<StatusCode> {
    if contact.email.is_empty() {
        return Err(Error::InvalidArgument("email is required".to_string()));
    }
    state.chairs.buy(id).await?;
    Ok(StatusCode::OK)
}

/// Bulk ingest. Expects a multipart field named `chairs` holding
/// headerless CSV.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidArgument(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("chairs") {
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::InvalidArgument(format!("unreadable upload: {e}")))?;
            state.chairs.ingest(&data).await?;
            return Ok(StatusCode::CREATED);
        }
    }
    Err(Error::InvalidArgument(
        "missing multipart field: chairs".to_string(),
    ))
}
