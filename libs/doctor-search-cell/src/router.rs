use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;
use crate::services::loader::DoctorDirectory;

pub struct DoctorSearchState {
    pub config: Arc<AppConfig>,
    pub directory: DoctorDirectory,
}

impl DoctorSearchState {
    pub fn new(config: Arc<AppConfig>, directory: DoctorDirectory) -> Arc<Self> {
        Arc::new(Self { config, directory })
    }
}

pub fn doctor_search_routes(state: Arc<DoctorSearchState>) -> Router {
    let api_routes = Router::new()
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route("/suggestions", get(handlers::suggest_doctors))
        .route("/specialities", get(handlers::list_specialities));

    Router::new()
        .route("/", get(handlers::search_page))
        .route("/healthz", get(|| async { "Doctor search is running!" }))
        .nest("/api", api_routes)
        .with_state(state)
}
