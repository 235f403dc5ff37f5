use super::events::{Toast, UploadEvent};
use super::index::{IndexUpdate, UploadIndex};
use super::refresh::DocumentSummary;
use super::rejection;
use super::types::{FileRejection, SelectedFile};
use crate::error::{Result, UploadError};

/// State behind the upload dialog: visibility, session flags, the file list
/// and the per-file indexes. Only mutated on the UI thread.
#[derive(Debug, Default)]
pub struct UploadSession {
    open: bool,
    is_uploading: bool,
    has_successful_upload: bool,
    files: Vec<SelectedFile>,
    index: UploadIndex,
    toasts: Vec<Toast>,
    documents: Option<DocumentSummary>,
}

impl UploadSession {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn has_successful_upload(&self) -> bool {
        self.has_successful_upload
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn index(&self) -> &UploadIndex {
        &self.index
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn documents(&self) -> Option<&DocumentSummary> {
        self.documents.as_ref()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Refused while a batch is running. Closing wipes the file list and both
    /// indexes.
    pub fn request_close(&mut self) -> bool {
        if self.is_uploading {
            return false;
        }
        self.files.clear();
        self.index.clear();
        self.open = false;
        true
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    fn show_files<'a>(&mut self, files: impl IntoIterator<Item = &'a SelectedFile>) {
        for file in files {
            match self.files.iter_mut().find(|f| f.name == file.name) {
                Some(existing) => *existing = file.clone(),
                None => self.files.push(file.clone()),
            }
        }
    }

    /// Marks the session busy before the worker starts so a second
    /// submission is refused straight away.
    pub fn begin_batch(&mut self, files: &[SelectedFile]) -> Result<()> {
        if self.is_uploading {
            return Err(UploadError::BatchInProgress);
        }
        self.is_uploading = true;
        self.has_successful_upload = false;
        self.show_files(files);
        Ok(())
    }

    pub fn add_rejections(&mut self, rejections: &[FileRejection]) {
        self.show_files(rejections.iter().map(|r| &r.file));
        for update in rejection::process_rejections(rejections) {
            self.index.apply(update);
        }
    }

    pub fn apply_index(&mut self, update: IndexUpdate) {
        self.index.apply(update);
    }

    pub fn apply(&mut self, event: UploadEvent) {
        match event {
            UploadEvent::BatchStarted { .. } => {
                self.is_uploading = true;
                self.has_successful_upload = false;
            }
            UploadEvent::Index(update) => self.index.apply(update),
            UploadEvent::TaskFinished(_) => {}
            UploadEvent::Toast(toast) => {
                match self.toasts.iter_mut().find(|t| t.id == toast.id) {
                    Some(existing) => *existing = toast,
                    None => self.toasts.push(toast),
                }
            }
            UploadEvent::DocumentsRefreshed(summary) => self.documents = Some(summary),
            UploadEvent::BatchFinished {
                has_successful_upload,
            } => {
                self.is_uploading = false;
                self.has_successful_upload = has_successful_upload;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::events::ToastKind;
    use std::path::PathBuf;

    fn file(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            size: 10,
        }
    }

    fn failed(name: &str) -> UploadEvent {
        UploadEvent::Index(IndexUpdate::Failed {
            name: name.to_string(),
            message: "bad".to_string(),
        })
    }

    #[test]
    fn close_is_refused_while_uploading() {
        let mut session = UploadSession::default();
        session.open();
        session.begin_batch(&[file("a.pdf")]).unwrap();
        session.apply(failed("a.pdf"));

        assert!(!session.request_close());
        assert!(session.is_open());
        assert_eq!(session.index().error("a.pdf"), Some("bad"));
        assert_eq!(session.files().len(), 1);
    }

    #[test]
    fn close_when_idle_clears_indexes() {
        let mut session = UploadSession::default();
        session.open();
        session.apply(failed("a.pdf"));

        assert!(session.request_close());
        assert!(!session.is_open());
        assert!(session.index().is_empty());
        assert!(session.files().is_empty());

        session.open();
        assert!(session.index().is_empty());
    }

    #[test]
    fn second_batch_is_refused_while_busy() {
        let mut session = UploadSession::default();
        session.begin_batch(&[file("a.pdf")]).unwrap();
        assert!(matches!(
            session.begin_batch(&[file("b.pdf")]),
            Err(UploadError::BatchInProgress)
        ));

        session.apply(UploadEvent::BatchFinished {
            has_successful_upload: true,
        });
        assert!(!session.is_uploading());
        assert!(session.has_successful_upload());
        assert!(session.begin_batch(&[file("b.pdf")]).is_ok());
    }

    #[test]
    fn toasts_update_in_place() {
        let mut session = UploadSession::default();
        for kind in [ToastKind::Loading, ToastKind::Error] {
            session.apply(UploadEvent::Toast(Toast {
                id: 4,
                kind,
                message: "x".to_string(),
            }));
        }
        assert_eq!(session.toasts().len(), 1);
        assert_eq!(session.toasts()[0].kind, ToastKind::Error);

        session.dismiss_toast(4);
        assert!(session.toasts().is_empty());
    }

    #[test]
    fn reselected_file_replaces_list_entry() {
        let mut session = UploadSession::default();
        session.begin_batch(&[file("a.pdf")]).unwrap();
        session.apply(UploadEvent::BatchFinished {
            has_successful_upload: false,
        });
        let mut bigger = file("a.pdf");
        bigger.size = 99;
        session.begin_batch(&[bigger]).unwrap();

        assert_eq!(session.files().len(), 1);
        assert_eq!(session.files()[0].size, 99);
    }
}
