use std::sync::Arc;

use axum::Router;

use doctor_search_cell::{doctor_search_routes, DoctorSearchState};

pub fn create_router(state: Arc<DoctorSearchState>) -> Router {
    Router::new().merge(doctor_search_routes(state))
}
