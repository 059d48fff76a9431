use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{Doctor, SearchCriteria, SortBy};

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("static pattern is valid"));

/// First run of ASCII digits in `text`, or 0 when there is none.
///
/// "₹500" yields 500 and "13 Years of experience" yields 13. Runs too long
/// for a `u64` saturate.
pub fn extract_number(text: &str) -> u64 {
    FIRST_NUMBER
        .find(text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

pub fn matches_name(doctor: &Doctor, query: &str) -> bool {
    query.is_empty() || doctor.name.to_lowercase().contains(&query.to_lowercase())
}

fn matches_specialities(doctor: &Doctor, selected: &[String]) -> bool {
    selected.is_empty()
        || doctor
            .speciality_names()
            .any(|name| selected.iter().any(|s| s == name))
}

pub fn matches(doctor: &Doctor, criteria: &SearchCriteria) -> bool {
    matches_name(doctor, &criteria.search)
        && criteria.consult_mode.map_or(true, |mode| mode.admits(doctor))
        && matches_specialities(doctor, &criteria.specialities)
}

/// Stable sort by the given key. Fees ascend, experience descends.
pub fn sort_doctors(doctors: &mut [Doctor], sort_by: SortBy) {
    match sort_by {
        SortBy::Fees => doctors.sort_by_key(|d| extract_number(&d.fees)),
        SortBy::Experience => doctors.sort_by(|a, b| {
            extract_number(&b.experience).cmp(&extract_number(&a.experience))
        }),
    }
}

/// Derives the displayed subset of `doctors` for `criteria`.
pub fn apply_criteria(doctors: &[Doctor], criteria: &SearchCriteria) -> Vec<Doctor> {
    let mut filtered: Vec<Doctor> = doctors
        .iter()
        .filter(|doctor| matches(doctor, criteria))
        .cloned()
        .collect();

    if let Some(sort_by) = criteria.sort_by {
        sort_doctors(&mut filtered, sort_by);
    }

    debug!(
        "Filtered {} doctors down to {} (sort: {:?})",
        doctors.len(),
        filtered.len(),
        criteria.sort_by
    );

    filtered
}

/// Distinct speciality names across `doctors`, in first-seen order.
pub fn speciality_options(doctors: &[Doctor]) -> Vec<String> {
    let mut seen = HashSet::new();
    doctors
        .iter()
        .flat_map(|doctor| doctor.speciality_names())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Narrows the speciality option list to names containing `query`
/// (case-insensitive). Names in `selected` always stay listed.
pub fn filter_speciality_options(options: &[String], query: &str, selected: &[String]) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.to_vec();
    }

    options
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle) || selected.contains(*name))
        .cloned()
        .collect()
}
