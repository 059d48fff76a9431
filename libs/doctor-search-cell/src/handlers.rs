use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, RawQuery, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{CriteriaUpdate, DirectoryStatus, SuggestionItem};
use crate::page::{render_page, PageContext};
use crate::router::DoctorSearchState;
use crate::services::filter::{apply_criteria, filter_speciality_options, speciality_options};
use crate::services::query::{
    apply_update, location_with_query, query_pairs, query_string_to_criteria, SEARCH_PARAM,
};
use crate::services::suggestions::suggest;

pub const SUGGESTIONS_PATH: &str = "/api/suggestions";

pub const TEXT_PARAM: &str = "q";

/// Last `q` value in the query string, empty when absent.
fn text_param(raw: Option<&str>) -> String {
    query_pairs(raw.unwrap_or(""))
        .into_iter()
        .rev()
        .find(|(key, _)| key == TEXT_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default()
}

#[axum::debug_handler]
pub async fn search_page(
    State(state): State<Arc<DoctorSearchState>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let query = uri.query().unwrap_or("");

    // A plain form submit with an empty box sends `search=`.
    if has_blank_search(query) {
        let target = location_with_query(
            uri.path(),
            &apply_update(query, &CriteriaUpdate::search(String::new())),
        );
        debug!("Dropping blank search parameter, redirecting to {}", target);
        return Redirect::to(&target).into_response();
    }

    let snapshot = state.directory.snapshot().await;
    debug!("Rendering search page for {}", uri);

    Html(render_page(&PageContext {
        path: uri.path(),
        query,
        status: &snapshot.status,
        doctors: &snapshot.doctors,
        suggestions_url: SUGGESTIONS_PATH,
        suggestion_grace_ms: state.config.suggestion_dismiss_delay.as_millis(),
    }))
    .into_response()
}

fn has_blank_search(query: &str) -> bool {
    query_pairs(query)
        .into_iter()
        .rev()
        .find(|(key, _)| key == SEARCH_PARAM)
        .is_some_and(|(_, value)| value.is_empty())
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<DoctorSearchState>>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    let snapshot = state.directory.snapshot().await;
    let criteria = query_string_to_criteria(query.as_deref().unwrap_or(""));
    let doctors = apply_criteria(&snapshot.doctors, &criteria);

    Json(json!({
        "status": snapshot.status,
        "total": doctors.len(),
        "doctors": doctors,
        "specialities": speciality_options(&snapshot.doctors),
        "criteria": criteria,
    }))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DoctorSearchState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.directory.snapshot().await;

    match &snapshot.status {
        DirectoryStatus::Loading => {
            return Err(AppError::Unavailable("Doctor directory is still loading".to_string()))
        }
        DirectoryStatus::Failed { reason } => return Err(AppError::ExternalService(reason.clone())),
        DirectoryStatus::Ready => {}
    }

    let doctor = snapshot
        .doctors
        .iter()
        .find(|d| d.id == doctor_id)
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn suggest_doctors(
    State(state): State<Arc<DoctorSearchState>>,
    RawQuery(raw): RawQuery,
) -> Json<Value> {
    let snapshot = state.directory.snapshot().await;
    let text = text_param(raw.as_deref());
    let suggestions: Vec<SuggestionItem> = suggest(&snapshot.doctors, &text)
        .into_iter()
        .map(SuggestionItem::from)
        .collect();

    Json(json!({ "suggestions": suggestions }))
}

/// Speciality options narrowed by `q`. Selected specialities passed as
/// `speciality` parameters are always kept.
#[axum::debug_handler]
pub async fn list_specialities(
    State(state): State<Arc<DoctorSearchState>>,
    RawQuery(raw): RawQuery,
) -> Json<Value> {
    let snapshot = state.directory.snapshot().await;
    let selected = query_string_to_criteria(raw.as_deref().unwrap_or("")).specialities;
    let options = speciality_options(&snapshot.doctors);
    let specialities = filter_speciality_options(&options, &text_param(raw.as_deref()), &selected);

    Json(json!({ "specialities": specialities }))
}
