// libs/doctor-search-cell/tests/filter_test.rs

use doctor_search_cell::models::{ConsultMode, Doctor, SearchCriteria, SortBy};
use doctor_search_cell::services::filter::{apply_criteria, extract_number, speciality_options};
use shared_utils::test_utils::{MockDirectoryResponses, TestDoctor};

fn doctors_from(value: serde_json::Value) -> Vec<Doctor> {
    serde_json::from_value(value).unwrap()
}

fn names(doctors: &[Doctor]) -> Vec<&str> {
    doctors.iter().map(|d| d.name.as_str()).collect()
}

fn criteria_grid(doctors: &[Doctor]) -> Vec<SearchCriteria> {
    let options = speciality_options(doctors);
    let selections: Vec<Vec<String>> = vec![
        Vec::new(),
        options.iter().take(1).cloned().collect(),
        options.iter().skip(1).take(2).cloned().collect(),
        options.clone(),
    ];

    let mut grid = Vec::new();
    for search in ["", "an", "DR. A", "zzz"] {
        for mode in [None, Some(ConsultMode::Video), Some(ConsultMode::InClinic)] {
            for specialities in &selections {
                for sort_by in [None, Some(SortBy::Fees), Some(SortBy::Experience)] {
                    grid.push(SearchCriteria {
                        search: search.to_string(),
                        consult_mode: mode,
                        specialities: specialities.clone(),
                        sort_by,
                    });
                }
            }
        }
    }
    grid
}

#[test]
fn test_scenario_sort_by_fees() {
    let doctors = doctors_from(MockDirectoryResponses::alice_and_bob());
    let criteria = SearchCriteria {
        sort_by: Some(SortBy::Fees),
        ..Default::default()
    };
    assert_eq!(names(&apply_criteria(&doctors, &criteria)), vec!["Dr. Bob", "Dr. Alice"]);
}

#[test]
fn test_scenario_sort_by_experience() {
    let doctors = doctors_from(MockDirectoryResponses::alice_and_bob());
    let criteria = SearchCriteria {
        sort_by: Some(SortBy::Experience),
        ..Default::default()
    };
    assert_eq!(names(&apply_criteria(&doctors, &criteria)), vec!["Dr. Bob", "Dr. Alice"]);
}

#[test]
fn test_scenario_consult_mode() {
    let doctors = doctors_from(MockDirectoryResponses::alice_and_bob());

    let video = SearchCriteria {
        consult_mode: Some(ConsultMode::Video),
        ..Default::default()
    };
    assert_eq!(names(&apply_criteria(&doctors, &video)), vec!["Dr. Alice"]);

    let clinic = SearchCriteria {
        consult_mode: Some(ConsultMode::InClinic),
        ..Default::default()
    };
    assert_eq!(names(&apply_criteria(&doctors, &clinic)), vec!["Dr. Bob"]);
}

#[test]
fn test_scenario_speciality() {
    let doctors = doctors_from(MockDirectoryResponses::alice_and_bob());
    let criteria = SearchCriteria {
        specialities: vec!["Dentist".to_string()],
        ..Default::default()
    };
    assert_eq!(names(&apply_criteria(&doctors, &criteria)), vec!["Dr. Bob"]);
}

#[test]
fn test_scenario_search() {
    let doctors = doctors_from(MockDirectoryResponses::alice_and_bob());

    let ali = SearchCriteria {
        search: "ali".to_string(),
        ..Default::default()
    };
    assert_eq!(names(&apply_criteria(&doctors, &ali)), vec!["Dr. Alice"]);

    let none = SearchCriteria {
        search: "zzz".to_string(),
        ..Default::default()
    };
    assert!(apply_criteria(&doctors, &none).is_empty());
}

#[test]
fn test_empty_criteria_preserves_fetch_order() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    let view = apply_criteria(&doctors, &SearchCriteria::default());
    assert_eq!(view, doctors);
}

#[test]
fn test_specialities_match_any_selected() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    let criteria = SearchCriteria {
        specialities: vec!["Dentist".to_string(), "Orthopaedic".to_string()],
        ..Default::default()
    };
    assert_eq!(
        names(&apply_criteria(&doctors, &criteria)),
        vec!["Dr. Rahul Mehta", "Dr. Sameer Khan"]
    );
}

#[test]
fn test_predicates_combine_with_and() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    let criteria = SearchCriteria {
        search: "an".to_string(),
        consult_mode: Some(ConsultMode::Video),
        specialities: vec!["Dermatologist".to_string()],
        sort_by: Some(SortBy::Experience),
    };
    assert_eq!(
        names(&apply_criteria(&doctors, &criteria)),
        vec!["Dr. Anil Kumar", "Dr. Anita Rao"]
    );
}

#[test]
fn test_filtering_is_idempotent() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    for criteria in criteria_grid(&doctors) {
        let once = apply_criteria(&doctors, &criteria);
        let twice = apply_criteria(&once, &criteria);
        assert_eq!(once, twice, "not idempotent for {:?}", criteria);
    }
}

#[test]
fn test_fee_sort_is_non_decreasing() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    for mut criteria in criteria_grid(&doctors) {
        criteria.sort_by = Some(SortBy::Fees);
        let view = apply_criteria(&doctors, &criteria);
        for pair in view.windows(2) {
            assert!(extract_number(&pair[0].fees) <= extract_number(&pair[1].fees));
        }
    }
}

#[test]
fn test_experience_sort_is_non_increasing() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    for mut criteria in criteria_grid(&doctors) {
        criteria.sort_by = Some(SortBy::Experience);
        let view = apply_criteria(&doctors, &criteria);
        for pair in view.windows(2) {
            assert!(extract_number(&pair[0].experience) >= extract_number(&pair[1].experience));
        }
    }
}

#[test]
fn test_sorts_are_stable() {
    // Rahul and Anil share a fee; fetch order must hold between them.
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    let criteria = SearchCriteria {
        sort_by: Some(SortBy::Fees),
        ..Default::default()
    };
    assert_eq!(
        names(&apply_criteria(&doctors, &criteria)),
        vec![
            "Dr. Ananya Iyer",
            "Dr. Rahul Mehta",
            "Dr. Anil Kumar",
            "Dr. Anita Rao",
            "Dr. Sameer Khan"
        ]
    );

    let tied = doctors_from(MockDirectoryResponses::doctors(&[
        TestDoctor::new("1", "Dr. First").experience("5 Years"),
        TestDoctor::new("2", "Dr. Second").experience("7 Years"),
        TestDoctor::new("3", "Dr. Third").experience("5 years"),
    ]));
    let criteria = SearchCriteria {
        sort_by: Some(SortBy::Experience),
        ..Default::default()
    };
    assert_eq!(
        names(&apply_criteria(&tied, &criteria)),
        vec!["Dr. Second", "Dr. First", "Dr. Third"]
    );
}

#[test]
fn test_speciality_options_are_distinct_in_first_seen_order() {
    let doctors = doctors_from(MockDirectoryResponses::sample_directory());
    assert_eq!(
        speciality_options(&doctors),
        vec![
            "Dermatologist",
            "Cosmetologist",
            "Dentist",
            "General Physician",
            "Gynaecologist and Obstetrician",
            "Orthopaedic"
        ]
    );

    let mut reversed = doctors.clone();
    reversed.reverse();
    let mut forward = speciality_options(&doctors);
    let mut backward = speciality_options(&reversed);
    forward.sort();
    backward.sort();
    assert_eq!(forward, backward);

    assert!(speciality_options(&[]).is_empty());
}

#[test]
fn test_derived_doctor_fields() {
    let doctors = doctors_from(MockDirectoryResponses::alice_and_bob());
    assert_eq!(doctors[0].qualifications(), "MBBS");
    assert_eq!(doctors[0].avatar_url(), "https://via.placeholder.com/80?text=A");

    let mut bob = doctors[1].clone();
    bob.photo = Some("https://cdn.example.com/bob.png".to_string());
    assert_eq!(bob.avatar_url(), "https://cdn.example.com/bob.png");

    bob.doctor_introduction = "No commas here".to_string();
    assert_eq!(bob.qualifications(), "");
}
