use std::time::{Duration, Instant};

use tracing::debug;

use crate::models::{ConsultMode, CriteriaUpdate, Doctor, SearchCriteria, SortBy};
use crate::services::filter::{apply_criteria, speciality_options};
use crate::services::query::{apply_update, location_with_query, query_string_to_criteria, split_location};
use crate::services::suggestions::SuggestionPanel;

/// One open search page: its URL, browser history, criteria and the
/// suggestion dropdown.
///
/// The URL is the source of truth. Any change to the current query string
/// overwrites the criteria; user-driven edits write back into the query
/// string by replacing the current history entry.
#[derive(Debug, Clone)]
pub struct SearchSession {
    path: String,
    query: String,
    entries: Vec<String>,
    cursor: usize,
    criteria: SearchCriteria,
    suggestions: SuggestionPanel,
}

impl SearchSession {
    pub fn open(location: &str, suggestion_grace: Duration) -> Self {
        let (path, query) = split_location(location);
        let url = location_with_query(&path, &query);
        let mut session = Self {
            path,
            query,
            entries: vec![url],
            cursor: 0,
            criteria: SearchCriteria::default(),
            suggestions: SuggestionPanel::new(suggestion_grace),
        };
        session.sync_from_url();
        session
    }

    pub fn url(&self) -> String {
        location_with_query(&self.path, &self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn suggestions(&self) -> &SuggestionPanel {
        &self.suggestions
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Full navigation: adds a history entry and reads the new URL.
    pub fn navigate(&mut self, location: &str) {
        let (path, query) = split_location(location);
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location_with_query(&path, &query));
        self.cursor = self.entries.len() - 1;
        self.path = path;
        self.query = query;
        self.sync_from_url();
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.restore_entry();
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        self.restore_entry();
        true
    }

    /// A keystroke in the search box. Filters immediately; the URL only
    /// changes on submit or when a suggestion is picked.
    pub fn type_search(&mut self, text: &str, doctors: &[Doctor]) {
        self.criteria.search = text.to_string();
        self.suggestions.refresh(doctors, text);
    }

    pub fn blur_search(&mut self, now: Instant) {
        self.suggestions.blur(now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.suggestions.tick(now);
    }

    /// Picks a suggestion from the visible dropdown. Returns false when the
    /// dropdown is hidden or does not list `name`.
    pub fn select_suggestion(&mut self, name: &str) -> bool {
        if !self.suggestions.is_visible() || !self.suggestions.contains(name) {
            return false;
        }
        self.criteria.search = name.to_string();
        self.suggestions.dismiss();
        self.commit(CriteriaUpdate::search(name));
        true
    }

    pub fn submit_search(&mut self) {
        self.suggestions.dismiss();
        let search = self.criteria.search.clone();
        self.commit(CriteriaUpdate::search(search));
    }

    pub fn set_consult_mode(&mut self, mode: Option<ConsultMode>) {
        self.commit(CriteriaUpdate::consult_mode(mode));
    }

    pub fn toggle_speciality(&mut self, name: &str) {
        let updated = self.criteria.toggled_specialities(name);
        self.commit(CriteriaUpdate::specialities(updated));
    }

    pub fn set_sort(&mut self, sort: Option<SortBy>) {
        self.commit(CriteriaUpdate::sort_by(sort));
    }

    /// Resets every criterion and navigates to the bare path, dropping
    /// parameters the widget does not know about as well.
    pub fn clear_all(&mut self) {
        self.criteria = SearchCriteria::default();
        let path = self.path.clone();
        self.navigate(&path);
    }

    pub fn view(&self, doctors: &[Doctor]) -> Vec<Doctor> {
        apply_criteria(doctors, &self.criteria)
    }

    pub fn speciality_options(&self, doctors: &[Doctor]) -> Vec<String> {
        speciality_options(doctors)
    }

    fn commit(&mut self, update: CriteriaUpdate) {
        update.apply_to(&mut self.criteria);
        let query = apply_update(&self.query, &update);
        if query == self.query {
            return;
        }

        self.query = query;
        self.entries[self.cursor] = location_with_query(&self.path, &self.query);
        debug!("Replaced history entry with {}", self.entries[self.cursor]);
        self.sync_from_url();
    }

    fn restore_entry(&mut self) {
        let (path, query) = split_location(&self.entries[self.cursor]);
        self.path = path;
        self.query = query;
        self.sync_from_url();
    }

    fn sync_from_url(&mut self) {
        self.criteria = query_string_to_criteria(&self.query);
    }
}
