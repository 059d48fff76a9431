// libs/doctor-search-cell/tests/session_test.rs

use std::time::{Duration, Instant};

use doctor_search_cell::models::{ConsultMode, Doctor, SearchCriteria, SortBy};
use doctor_search_cell::services::session::SearchSession;
use shared_utils::test_utils::MockDirectoryResponses;

const GRACE: Duration = Duration::from_millis(200);

fn sample_doctors() -> Vec<Doctor> {
    serde_json::from_value(MockDirectoryResponses::sample_directory()).unwrap()
}

fn names(doctors: &[Doctor]) -> Vec<String> {
    doctors.iter().map(|d| d.name.clone()).collect()
}

#[test]
fn test_initial_url_populates_criteria() {
    let session = SearchSession::open(
        "/?search=an&consultMode=Video+Consultation&speciality=Dermatologist&sortBy=experience",
        GRACE,
    );

    assert_eq!(
        session.criteria(),
        &SearchCriteria {
            search: "an".to_string(),
            consult_mode: Some(ConsultMode::Video),
            specialities: vec!["Dermatologist".to_string()],
            sort_by: Some(SortBy::Experience),
        }
    );
    assert_eq!(
        names(&session.view(&sample_doctors())),
        vec!["Dr. Anil Kumar", "Dr. Anita Rao"]
    );
}

#[test]
fn test_filter_changes_replace_the_history_entry() {
    let mut session = SearchSession::open("/", GRACE);

    session.set_sort(Some(SortBy::Fees));
    session.set_consult_mode(Some(ConsultMode::InClinic));
    session.toggle_speciality("Dentist");
    session.toggle_speciality("Orthopaedic");

    assert_eq!(session.history_len(), 1);
    assert_eq!(
        session.url(),
        "/?sortBy=fees&consultMode=In-clinic+Consultation&speciality=Dentist&speciality=Orthopaedic"
    );
    assert_eq!(
        names(&session.view(&sample_doctors())),
        vec!["Dr. Rahul Mehta", "Dr. Sameer Khan"]
    );
}

#[test]
fn test_toggling_a_selected_speciality_removes_it() {
    let mut session = SearchSession::open("/?speciality=Dentist&speciality=Orthopaedic", GRACE);

    session.toggle_speciality("Dentist");
    assert_eq!(session.url(), "/?speciality=Orthopaedic");

    session.toggle_speciality("Orthopaedic");
    assert_eq!(session.url(), "/");
    assert!(session.criteria().specialities.is_empty());
}

#[test]
fn test_choosing_all_consultation_modes_removes_the_parameter() {
    let mut session = SearchSession::open("/?consultMode=Video+Consultation&sortBy=fees", GRACE);
    session.set_consult_mode(None);

    assert_eq!(session.url(), "/?sortBy=fees");
    assert_eq!(session.criteria().consult_mode, None);
}

#[test]
fn test_back_and_forward_resync_criteria() {
    let mut session = SearchSession::open("/?sortBy=fees", GRACE);
    session.navigate("/?speciality=Dentist");
    session.set_consult_mode(Some(ConsultMode::InClinic));
    assert_eq!(session.history_len(), 2);

    assert!(session.back());
    assert_eq!(session.criteria().sort_by, Some(SortBy::Fees));
    assert!(session.criteria().specialities.is_empty());
    assert_eq!(session.criteria().consult_mode, None);

    assert!(session.forward());
    assert_eq!(session.criteria().specialities, vec!["Dentist"]);
    assert_eq!(session.criteria().consult_mode, Some(ConsultMode::InClinic));

    assert!(!session.forward());
}

#[test]
fn test_clear_all_drops_every_parameter_and_pushes() {
    let mut session = SearchSession::open(
        "/doctors?search=an&ref=newsletter&speciality=Dentist&sortBy=fees",
        GRACE,
    );

    session.clear_all();

    assert_eq!(session.url(), "/doctors");
    assert!(session.criteria().is_empty());
    assert_eq!(session.history_len(), 2);

    assert!(session.back());
    assert_eq!(session.criteria().search, "an");
}

#[test]
fn test_clear_all_from_any_state() {
    let starts = [
        "/",
        "/?search=x",
        "/?consultMode=In-clinic+Consultation&speciality=A&speciality=B",
        "/?unknown=1&sortBy=experience",
    ];
    for start in starts {
        let mut session = SearchSession::open(start, GRACE);
        session.clear_all();
        assert_eq!(session.url(), "/");
        assert_eq!(session.criteria(), &SearchCriteria::default());
    }
}

#[test]
fn test_typing_filters_without_touching_the_url() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/?sortBy=fees", GRACE);

    session.type_search("ana", &doctors);

    assert_eq!(session.url(), "/?sortBy=fees");
    assert_eq!(names(&session.view(&doctors)), vec!["Dr. Ananya Iyer"]);
}

#[test]
fn test_submit_commits_search_and_hides_suggestions() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/?sortBy=fees", GRACE);

    session.type_search("an", &doctors);
    assert!(session.suggestions().is_visible());

    session.submit_search();

    assert!(!session.suggestions().is_visible());
    assert_eq!(session.url(), "/?sortBy=fees&search=an");
    assert_eq!(session.history_len(), 1);
}

#[test]
fn test_suggestions_come_from_the_raw_list() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/?speciality=Orthopaedic", GRACE);

    session.type_search("an", &doctors);

    // The view is narrowed to orthopaedics but suggestions are not.
    let suggested: Vec<&str> = session.suggestions().items().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(suggested, vec!["Dr. Anita Rao", "Dr. Anil Kumar", "Dr. Ananya Iyer"]);
    assert_eq!(names(&session.view(&doctors)), vec!["Dr. Sameer Khan"]);
}

#[test]
fn test_blank_input_hides_suggestions() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/", GRACE);

    session.type_search("an", &doctors);
    session.type_search("   ", &doctors);

    assert!(!session.suggestions().is_visible());
    assert!(session.suggestions().items().is_empty());
}

#[test]
fn test_selecting_a_suggestion_within_the_grace_period() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/?consultMode=Video+Consultation", GRACE);
    let start = Instant::now();

    session.type_search("anil", &doctors);
    session.blur_search(start);
    session.tick(start + Duration::from_millis(150));

    assert!(session.select_suggestion("Dr. Anil Kumar"));
    assert_eq!(session.criteria().search, "Dr. Anil Kumar");
    assert_eq!(session.url(), "/?consultMode=Video+Consultation&search=Dr.+Anil+Kumar");
    assert!(!session.suggestions().is_visible());
    assert_eq!(names(&session.view(&doctors)), vec!["Dr. Anil Kumar"]);
}

#[test]
fn test_suggestions_dismissed_after_the_grace_period() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/", GRACE);
    let start = Instant::now();

    session.type_search("anil", &doctors);
    session.blur_search(start);
    session.tick(start + GRACE);

    assert!(!session.suggestions().is_visible());
    assert!(!session.select_suggestion("Dr. Anil Kumar"));
    assert_eq!(session.url(), "/");
}

#[test]
fn test_typing_after_blur_cancels_the_dismissal() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/", GRACE);
    let start = Instant::now();

    session.type_search("an", &doctors);
    session.blur_search(start);
    session.type_search("ani", &doctors);
    session.tick(start + Duration::from_secs(1));

    assert!(session.suggestions().is_visible());
    assert!(session.select_suggestion("Dr. Anita Rao"));
    assert_eq!(session.url(), "/?search=Dr.+Anita+Rao");
}

#[test]
fn test_selecting_an_unlisted_name_is_ignored() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/", GRACE);

    session.type_search("anil", &doctors);

    assert!(!session.select_suggestion("Dr. Sameer Khan"));
    assert!(session.suggestions().is_visible());
}

#[test]
fn test_url_change_discards_uncommitted_search_text() {
    let doctors = sample_doctors();
    let mut session = SearchSession::open("/?search=rahul", GRACE);

    session.type_search("sam", &doctors);
    session.set_sort(Some(SortBy::Experience));

    assert_eq!(session.criteria().search, "rahul");
    assert_eq!(session.url(), "/?search=rahul&sortBy=experience");
}

#[test]
fn test_zero_matches_is_a_valid_view() {
    let doctors = sample_doctors();
    let session = SearchSession::open("/?search=zzz", GRACE);

    assert!(session.view(&doctors).is_empty());
    assert_eq!(session.speciality_options(&doctors).len(), 6);
}
