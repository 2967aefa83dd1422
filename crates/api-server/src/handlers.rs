use crate::dto::{AdminCheckResponse, ChatRequest, SearchParams, StatusResponse};
use crate::error::ApiError;
use crate::{AppState, ADMIN_KEY_HEADER};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use domain::{ChatQueryResult, DeletedDonor, Donor, DonorMatch, DonorProfile, DonorSubmission, SearchCriteria};

fn admin_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
}

pub async fn search_donors(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<DonorMatch>>, ApiError> {
    let criteria = SearchCriteria::from(params);
    let donors = state.donor_app.search_service.search(&criteria).await?;
    Ok(Json(donors))
}

pub async fn register_donor(
    State(state): State<AppState>,
    payload: Result<Json<DonorSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(submission) = payload?;
    let donor = state.donor_app.registration_service.register(submission).await?;
    Ok((StatusCode::CREATED, Json(donor)))
}

pub async fn chat_query(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatQueryResult>, ApiError> {
    let Json(request) = payload?;
    let result = state.donor_app.chat_service.answer(&request.query).await?;
    Ok(Json(result))
}

pub async fn admin_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminCheckResponse>, ApiError> {
    state.donor_app.admin_service.authorize(admin_key(&headers))?;
    Ok(Json(AdminCheckResponse { ok: true }))
}

pub async fn admin_list_donors(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Donor>>, ApiError> {
    let donors = state
        .donor_app
        .admin_service
        .list_donors(admin_key(&headers))
        .await?;
    Ok(Json(donors))
}

pub async fn admin_update_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<DonorProfile>, JsonRejection>,
) -> Result<Json<Donor>, ApiError> {
    // Credential first, so an anonymous caller learns nothing from body errors.
    state.donor_app.admin_service.authorize(admin_key(&headers))?;
    let Json(profile) = payload?;

    let donor = state
        .donor_app
        .admin_service
        .update_donor(admin_key(&headers), &id, profile)
        .await?;
    Ok(Json(donor))
}

pub async fn admin_delete_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeletedDonor>, ApiError> {
    let deleted = state
        .donor_app
        .admin_service
        .delete_donor(admin_key(&headers), &id)
        .await?;
    Ok(Json(deleted))
}

pub async fn system_status(State(state): State<AppState>) -> impl IntoResponse {
    let status = StatusResponse {
        message: "Blood Connect API Server is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.environment.clone(),
    };
    Json(status)
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
