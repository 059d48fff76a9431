use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PLACEHOLDER_AVATAR_BASE: &str = "https://via.placeholder.com/80?text=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_initials: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub doctor_introduction: String,
    #[serde(default)]
    pub specialities: Vec<Speciality>,
    #[serde(default)]
    pub fees: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub languages: Vec<String>,
    pub clinic: Clinic,
    #[serde(default)]
    pub video_consult: bool,
    #[serde(default)]
    pub in_clinic: bool,
}

impl Doctor {
    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|s| s.name.as_str())
    }

    /// Second comma-separated segment of the introduction, e.g. "MBBS" in
    /// "Dr. A, MBBS, practising in Pune".
    pub fn qualifications(&self) -> &str {
        self.doctor_introduction
            .split(',')
            .nth(1)
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn avatar_url(&self) -> String {
        match self.photo.as_deref() {
            Some(photo) if !photo.trim().is_empty() => photo.to_string(),
            _ => format!("{}{}", PLACEHOLDER_AVATAR_BASE, self.name_initials),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub name: String,
    pub address: ClinicAddress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicAddress {
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultMode {
    #[serde(rename = "Video Consultation")]
    Video,
    #[serde(rename = "In-clinic Consultation")]
    InClinic,
}

impl ConsultMode {
    pub const ALL: [ConsultMode; 2] = [ConsultMode::Video, ConsultMode::InClinic];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultMode::Video => "Video Consultation",
            ConsultMode::InClinic => "In-clinic Consultation",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "Video Consultation" => Some(ConsultMode::Video),
            "In-clinic Consultation" => Some(ConsultMode::InClinic),
            _ => None,
        }
    }

    pub fn admits(&self, doctor: &Doctor) -> bool {
        match self {
            ConsultMode::Video => doctor.video_consult,
            ConsultMode::InClinic => doctor.in_clinic,
        }
    }
}

impl fmt::Display for ConsultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Fees,
    Experience,
}

impl SortBy {
    pub const ALL: [SortBy; 2] = [SortBy::Fees, SortBy::Experience];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Fees => "fees",
            SortBy::Experience => "experience",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortBy::Fees),
            "experience" => Some(SortBy::Experience),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Fees => "Price: Low-High",
            SortBy::Experience => "Experience: Most Experience first",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current search, consultation mode, selected specialities and sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub search: String,
    pub consult_mode: Option<ConsultMode>,
    pub specialities: Vec<String>,
    pub sort_by: Option<SortBy>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.consult_mode.is_none()
            && self.specialities.is_empty()
            && self.sort_by.is_none()
    }

    pub fn has_speciality(&self, name: &str) -> bool {
        self.specialities.iter().any(|s| s == name)
    }

    /// Selection with `name` added at the end, or removed if present.
    pub fn toggled_specialities(&self, name: &str) -> Vec<String> {
        if self.has_speciality(name) {
            self.specialities.iter().filter(|s| *s != name).cloned().collect()
        } else {
            let mut updated = self.specialities.clone();
            updated.push(name.to_string());
            updated
        }
    }
}

/// Partial update of the URL state. `None` leaves a key untouched; an
/// empty value removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaUpdate {
    pub search: Option<String>,
    pub consult_mode: Option<Option<ConsultMode>>,
    pub specialities: Option<Vec<String>>,
    pub sort_by: Option<Option<SortBy>>,
}

impl CriteriaUpdate {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn consult_mode(mode: Option<ConsultMode>) -> Self {
        Self {
            consult_mode: Some(mode),
            ..Default::default()
        }
    }

    pub fn specialities(names: Vec<String>) -> Self {
        Self {
            specialities: Some(names),
            ..Default::default()
        }
    }

    pub fn sort_by(sort: Option<SortBy>) -> Self {
        Self {
            sort_by: Some(sort),
            ..Default::default()
        }
    }

    pub fn apply_to(&self, criteria: &mut SearchCriteria) {
        if let Some(search) = &self.search {
            criteria.search = search.clone();
        }
        if let Some(mode) = self.consult_mode {
            criteria.consult_mode = mode;
        }
        if let Some(names) = &self.specialities {
            criteria.specialities = names.clone();
        }
        if let Some(sort) = self.sort_by {
            criteria.sort_by = sort;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DirectoryStatus {
    Loading,
    Ready,
    Failed { reason: String },
}

impl DirectoryStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, DirectoryStatus::Loading)
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Doctor directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Doctor directory returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Doctor directory payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionItem {
    pub id: String,
    pub name: String,
}

impl From<&Doctor> for SuggestionItem {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        }
    }
}
