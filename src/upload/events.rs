use super::index::IndexUpdate;
use super::refresh::DocumentSummary;
use super::types::UploadTask;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: NotificationId,
    pub kind: ToastKind,
    pub message: String,
}

/// Everything the upload worker reports back to the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    BatchStarted { names: Vec<String> },
    Index(IndexUpdate),
    TaskFinished(UploadTask),
    Toast(Toast),
    DocumentsRefreshed(DocumentSummary),
    BatchFinished { has_successful_upload: bool },
}
