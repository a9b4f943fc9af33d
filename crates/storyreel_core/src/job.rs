//! Asynchronous image generation jobs.

use serde::{Deserialize, Serialize};

/// Lifecycle of a [`GenerationJob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobState {
    /// Accepted by the backend, not yet polled
    Submitted,
    /// Polled at least once, still running
    Pending,
    /// Finished with a result URL
    Ready,
    /// Finished unsuccessfully
    Failed,
}

/// What a single poll reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    /// Still running
    Pending,
    /// Finished; the image can be downloaded from `url`
    Ready {
        /// Result location
        url: String,
    },
    /// Backend gave up on the job
    Failed {
        /// Backend-reported reason
        reason: String,
    },
}

/// One scene image request tracked through submit and poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationJob {
    index: usize,
    id: String,
    state: JobState,
    result_url: Option<String>,
}

impl GenerationJob {
    /// Record a freshly submitted job for scene `index`.
    pub fn submitted(index: usize, id: impl Into<String>) -> Self {
        Self {
            index,
            id: id.into(),
            state: JobState::Submitted,
            result_url: None,
        }
    }

    /// Scene index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Backend job id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current state.
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Result URL once ready.
    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    /// Fold a poll result into the job.
    ///
    /// Terminal states are sticky.
    pub fn observe(&mut self, status: &JobStatus) {
        if matches!(self.state, JobState::Ready | JobState::Failed) {
            return;
        }
        match status {
            JobStatus::Pending => self.state = JobState::Pending,
            JobStatus::Ready { url } => {
                self.state = JobState::Ready;
                self.result_url = Some(url.clone());
            }
            JobStatus::Failed { .. } => self.state = JobState::Failed,
        }
    }
}
