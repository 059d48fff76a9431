use std::time::{Duration, Instant};

use tracing::debug;

use crate::models::{Doctor, SuggestionItem};
use crate::services::filter::matches_name;

pub const SUGGESTION_LIMIT: usize = 3;

/// Up to three doctors whose name contains `query`, in directory order.
/// A blank query suggests nothing.
pub fn suggest<'a>(doctors: &'a [Doctor], query: &str) -> Vec<&'a Doctor> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    doctors
        .iter()
        .filter(|doctor| matches_name(doctor, query))
        .take(SUGGESTION_LIMIT)
        .collect()
}

/// The dropdown under the search box.
///
/// Blurring the input does not hide the panel straight away: dismissal is
/// scheduled `grace` later so a click on an item still lands.
#[derive(Debug, Clone)]
pub struct SuggestionPanel {
    items: Vec<SuggestionItem>,
    shown: bool,
    dismiss_at: Option<Instant>,
    grace: Duration,
}

impl SuggestionPanel {
    pub fn new(grace: Duration) -> Self {
        Self {
            items: Vec::new(),
            shown: false,
            dismiss_at: None,
            grace,
        }
    }

    /// Recomputes the items for the text currently in the search box.
    pub fn refresh(&mut self, doctors: &[Doctor], query: &str) {
        self.dismiss_at = None;
        self.items = suggest(doctors, query).into_iter().map(SuggestionItem::from).collect();
        self.shown = !query.trim().is_empty();
        debug!("{} suggestions for {:?}", self.items.len(), query);
    }

    pub fn blur(&mut self, now: Instant) {
        if self.shown {
            self.dismiss_at = Some(now + self.grace);
        }
    }

    /// Applies a scheduled dismissal once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.dismiss_at.is_some_and(|deadline| now >= deadline) {
            self.dismiss();
        }
    }

    pub fn dismiss(&mut self) {
        self.shown = false;
        self.dismiss_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.shown && !self.items.is_empty()
    }

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}
