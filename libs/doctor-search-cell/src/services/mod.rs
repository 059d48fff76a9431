pub mod filter;
pub mod loader;
pub mod query;
pub mod session;
pub mod suggestions;

pub use filter::{apply_criteria, extract_number, filter_speciality_options, speciality_options};
pub use loader::{DirectorySnapshot, DoctorDirectory, DoctorSource, HttpDoctorSource};
pub use query::{apply_update, criteria_to_query_string, query_string_to_criteria};
pub use session::SearchSession;
pub use suggestions::{suggest, SuggestionPanel};
