use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;

use crate::models::{DirectoryError, DirectoryStatus, Doctor};

#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DirectoryError>;
}

/// Fetches the directory from the configured HTTP endpoint.
pub struct HttpDoctorSource {
    client: Client,
    url: String,
}

impl HttpDoctorSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.doctor_directory_url.clone(),
        }
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DirectoryError> {
        debug!("Fetching doctor directory from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let doctors: Vec<Doctor> = serde_json::from_slice(&bytes)?;
        Ok(doctors)
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub status: DirectoryStatus,
    pub doctors: Arc<Vec<Doctor>>,
}

#[derive(Debug)]
struct DirectoryState {
    status: DirectoryStatus,
    doctors: Arc<Vec<Doctor>>,
}

/// The in-memory doctor list, filled by a single load.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    state: Arc<RwLock<DirectoryState>>,
    started: Arc<AtomicBool>,
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorDirectory {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState {
                status: DirectoryStatus::Loading,
                doctors: Arc::new(Vec::new()),
            })),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A directory that is already loaded with `doctors`.
    pub fn ready(doctors: Vec<Doctor>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState {
                status: DirectoryStatus::Ready,
                doctors: Arc::new(doctors),
            })),
            started: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Fetches the list once. Later calls return without fetching.
    ///
    /// A failed fetch leaves an empty list and a `Failed` status; it is
    /// not retried.
    pub async fn load(&self, source: &dyn DoctorSource) {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Doctor directory load already started, skipping");
            return;
        }

        let (status, doctors) = match source.fetch_doctors().await {
            Ok(doctors) => {
                info!("Loaded {} doctors", doctors.len());
                (DirectoryStatus::Ready, doctors)
            }
            Err(e) => {
                error!("Error fetching doctor directory: {}", e);
                (DirectoryStatus::Failed { reason: e.to_string() }, Vec::new())
            }
        };

        let mut state = self.state.write().await;
        state.status = status;
        state.doctors = Arc::new(doctors);
    }

    pub fn spawn_load(&self, source: Arc<dyn DoctorSource>) -> JoinHandle<()> {
        let directory = self.clone();
        tokio::spawn(async move {
            directory.load(source.as_ref()).await;
        })
    }

    pub async fn snapshot(&self) -> DirectorySnapshot {
        let state = self.state.read().await;
        DirectorySnapshot {
            status: state.status.clone(),
            doctors: Arc::clone(&state.doctors),
        }
    }
}
