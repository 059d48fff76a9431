pub mod handlers;
pub mod models;
pub mod page;
pub mod router;
pub mod services;

pub use models::*;
pub use router::{doctor_search_routes, DoctorSearchState};
pub use services::*;
