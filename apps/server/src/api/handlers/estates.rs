//! Estate endpoint handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    conditions::EstateSearchCondition,
    models::{ContactRequest, Coordinates, Estate, EstateListResponse, EstateSearchResponse},
    services::EstateSearchParams,
    state::AppState,
    Error, Result,
};

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<EstateSearchParams>,
) -> Result<Json<EstateSearchResponse>> {
    Ok(Json(state.estates.search(&params).await?))
}

pub async fn search_condition(State(state): State<AppState>) -> Json<EstateSearchCondition> {
    Json(state.estates.conditions().clone())
}

pub async fn low_priced(State(state): State<AppState>) -> Json<EstateListResponse> {
    Json(EstateListResponse {
        estates: state.estates.low_priced().as_ref().clone(),
    })
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Estate>> {
    Ok(Json(state.estates.detail(id).await?))
}

/// Polygon area search.
pub async fn area_search(
    State(state): State<AppState>,
    Json(polygon): Json<Coordinates>,
) -> Result<Json<EstateSearchResponse>> {
    Ok(Json(state.estates.area_search(&polygon).await?))
}

/// Record a document request for an estate. The estate must exist.
pub async fn request_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(contact): Json<ContactRequest>,
) -> Result<StatusCode> {
    if contact.email.is_empty() {
        return Err(Error::InvalidArgument("email is required".to_string()));
    }
    state.estates.detail(id).await?;
    Ok(StatusCode::OK)
}

/// Estates whose door admits the given chair. An unknown chair id is a
/// client error, not a missing resource.
pub async fn recommended_for_chair(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EstateListResponse>> {
    let chair = state
        .chairs
        .find(id)
        .await?
        .ok_or_else(|| Error::InvalidArgument(format!("unknown chair: {id}")))?;
    let estates = state.estates.fitting_chair(&chair).await?;
    Ok(Json(EstateListResponse { estates }))
}

/// Bulk ingest. Expects a multipart field named `estates` holding
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
        if field.name() == Some("estates") {
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::InvalidArgument(format!("unreadable upload: {e}")))?;
            state.estates.ingest(&data).await?;
            return Ok(StatusCode::CREATED);
        }
    }
    Err(Error::InvalidArgument(
        "missing multipart field: estates".to_string(),
    ))
}
