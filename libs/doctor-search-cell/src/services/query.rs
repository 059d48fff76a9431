use url::form_urlencoded;

use crate::models::{ConsultMode, CriteriaUpdate, SearchCriteria, SortBy};

pub const SEARCH_PARAM: &str = "search";
pub const CONSULT_MODE_PARAM: &str = "consultMode";
pub const SPECIALITY_PARAM: &str = "speciality";
pub const SORT_BY_PARAM: &str = "sortBy";

/// Decoded key/value pairs of a query string, in order.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn serialize_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Reads the widget's criteria out of a query string.
///
/// Single-valued keys take their last occurrence, `speciality` collects
/// every occurrence in order. Empty or unrecognised values read as absent.
pub fn query_string_to_criteria(query: &str) -> SearchCriteria {
    let mut criteria = SearchCriteria::default();

    for (key, value) in query_pairs(query) {
        match key.as_str() {
            SEARCH_PARAM => criteria.search = value,
            CONSULT_MODE_PARAM => criteria.consult_mode = ConsultMode::from_param(&value),
            SORT_BY_PARAM => criteria.sort_by = SortBy::from_param(&value),
            SPECIALITY_PARAM if !value.is_empty() => criteria.specialities.push(value),
            _ => {}
        }
    }

    criteria
}

/// Encodes `criteria` as a query string, omitting empty fields.
pub fn criteria_to_query_string(criteria: &SearchCriteria) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();

    if !criteria.search.is_empty() {
        pairs.push((SEARCH_PARAM, criteria.search.as_str()));
    }
    if let Some(mode) = criteria.consult_mode {
        pairs.push((CONSULT_MODE_PARAM, mode.as_str()));
    }
    for name in criteria.specialities.iter().filter(|s| !s.is_empty()) {
        pairs.push((SPECIALITY_PARAM, name.as_str()));
    }
    if let Some(sort) = criteria.sort_by {
        pairs.push((SORT_BY_PARAM, sort.as_str()));
    }

    serialize_pairs(pairs)
}

/// Overwrites the first occurrence of `key` in place and drops the rest,
/// appending when absent. An empty value removes every occurrence.
fn set_single(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    if value.is_empty() {
        pairs.retain(|(k, _)| k != key);
        return;
    }

    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || index == first;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

fn set_multi(pairs: &mut Vec<(String, String)>, key: &str, values: &[String]) {
    pairs.retain(|(k, _)| k != key);
    pairs.extend(
        values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| (key.to_string(), v.clone())),
    );
}

/// Applies a partial update to an existing query string.
///
/// Keys the update does not name, including parameters the widget does not
/// model, keep their values and positions.
pub fn apply_update(query: &str, update: &CriteriaUpdate) -> String {
    let mut pairs = query_pairs(query);

    if let Some(search) = &update.search {
        set_single(&mut pairs, SEARCH_PARAM, search);
    }
    if let Some(mode) = update.consult_mode {
        set_single(&mut pairs, CONSULT_MODE_PARAM, mode.map_or("", |m| m.as_str()));
    }
    if let Some(names) = &update.specialities {
        set_multi(&mut pairs, SPECIALITY_PARAM, names);
    }
    if let Some(sort) = update.sort_by {
        set_single(&mut pairs, SORT_BY_PARAM, sort.map_or("", |s| s.as_str()));
    }

    serialize_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// `path` alone when `query` is empty, otherwise `path?query`.
pub fn location_with_query(path: &str, query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Splits a URL path reference into its path and query, dropping any
/// fragment. A missing path reads as `/`.
pub fn split_location(location: &str) -> (String, String) {
    let location = location.split('#').next().unwrap_or("");
    let (path, query) = match location.split_once('?') {
        Some((path, query)) => (path, query),
        None => (location, ""),
    };
    let path = if path.is_empty() { "/" } else { path };
    (path.to_string(), query.to_string())
}
