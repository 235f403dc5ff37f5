use crate::error::{Result, UploadError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A local file the user picked. The name is the identity used by the
/// progress and error indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .ok_or_else(|| UploadError::InvalidFileName(path.display().to_string()))?
            .to_str()
            .ok_or_else(|| UploadError::InvalidFileName(path.display().to_string()))?
            .to_string();
        let size = fs::metadata(path)?.len();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            size,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Uploading,
    Success,
    Duplicate(String),
    Error(String),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Success | TaskState::Duplicate(_) | TaskState::Error(_)
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            TaskState::Duplicate(message) | TaskState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Per-file state machine: pending -> uploading -> success | duplicate | error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub name: String,
    pub progress: u8,
    pub state: TaskState,
}

impl UploadTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progress: 0,
            state: TaskState::Pending,
        }
    }

    pub fn start(&mut self) {
        if self.state == TaskState::Pending {
            self.state = TaskState::Uploading;
        }
    }

    /// Ignored once the task is terminal.
    pub fn set_progress(&mut self, percent: u8) {
        if !self.state.is_terminal() {
            self.progress = percent.min(100);
        }
    }

    pub fn succeed(&mut self) {
        self.progress = 100;
        self.state = TaskState::Success;
    }

    pub fn mark_duplicate(&mut self, message: impl Into<String>) {
        self.progress = 100;
        self.state = TaskState::Duplicate(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.progress = 100;
        self.state = TaskState::Error(message.into());
    }

    pub fn is_failure(&self) -> bool {
        self.state.error_message().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Success,
    Duplicated,
    Other(String),
}

impl From<&str> for UploadStatus {
    fn from(status: &str) -> Self {
        match status {
            "success" => UploadStatus::Success,
            "duplicated" => UploadStatus::Duplicated,
            other => UploadStatus::Other(other.to_string()),
        }
    }
}

/// Body of a 2xx reply from the upload endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    track_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub status: UploadStatus,
    pub message: String,
    pub track_id: Option<String>,
}

impl UploadResult {
    pub fn success() -> Self {
        Self {
            status: UploadStatus::Success,
            message: String::new(),
            track_id: None,
        }
    }

    pub fn duplicated() -> Self {
        Self {
            status: UploadStatus::Duplicated,
            message: String::new(),
            track_id: None,
        }
    }

    pub fn failure(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::from(status),
            message: message.into(),
            track_id: None,
        }
    }
}

impl From<UploadResponse> for UploadResult {
    fn from(response: UploadResponse) -> Self {
        Self {
            status: UploadStatus::from(response.status.as_str()),
            message: response.message,
            track_id: response.track_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionCode {
    FileInvalidType,
    FileTooLarge,
    Other(String),
}

impl RejectionCode {
    pub fn as_str(&self) -> &str {
        match self {
            RejectionCode::FileInvalidType => "file-invalid-type",
            RejectionCode::FileTooLarge => "file-too-large",
            RejectionCode::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub code: RejectionCode,
    pub message: String,
}

/// A file the picker refused before any network interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRejection {
    pub file: SelectedFile,
    pub errors: Vec<ValidationFailure>,
}
