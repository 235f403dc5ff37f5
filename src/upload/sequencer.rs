use super::events::{NotificationId, UploadEvent};
use super::index::IndexUpdate;
use super::messages;
use super::notify::Notifier;
use super::ordering;
use super::refresh::Refresher;
use super::transport::{ProgressCallback, Transport};
use super::types::{SelectedFile, TaskState, UploadStatus, UploadTask};
use crate::error::Result;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Tasks in the order they were uploaded.
    pub tasks: Vec<UploadTask>,
    pub has_successful_upload: bool,
}

impl BatchOutcome {
    pub fn failed(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_failure()).count()
    }
}

/// Uploads a batch of files one at a time and reports the aggregate result.
pub struct UploadSequencer {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    refresher: Option<Arc<dyn Refresher>>,
    events: Sender<UploadEvent>,
}

impl UploadSequencer {
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        events: Sender<UploadEvent>,
    ) -> Self {
        Self {
            transport,
            notifier,
            refresher: None,
            events,
        }
    }

    pub fn with_refresher(mut self, refresher: Arc<dyn Refresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    fn emit(&self, event: UploadEvent) {
        self.events.send(event).unwrap_or_default();
    }

    /// Runs the whole batch. `BatchFinished` is always the last event sent,
    /// even when the batch aborts before every file was attempted.
    pub async fn submit_batch(
        &self,
        files: Vec<SelectedFile>,
        multimodal: bool,
    ) -> Result<BatchOutcome> {
        let names: Vec<String> = files.iter().map(|file| file.name.clone()).collect();
        log::info!(
            "Starting upload of {} files (multimodal: {})",
            names.len(),
            multimodal
        );

        self.emit(UploadEvent::BatchStarted {
            names: names.clone(),
        });
        self.emit(UploadEvent::Index(IndexUpdate::ClearErrors(names)));

        let mut toast = None;
        let mut outcome = BatchOutcome::default();
        let result = self.run_batch(files, multimodal, &mut toast, &mut outcome).await;

        match &result {
            Ok(()) => log::info!(
                "Upload batch finished: {} files, {} failed",
                outcome.tasks.len(),
                outcome.failed()
            ),
            Err(err) => {
                log::error!("Unexpected error during upload: {}", err);
                if let Some(id) = toast {
                    let message = messages::general_error(&err.user_message());
                    if let Err(notify_err) = self.notifier.error(id, &message) {
                        log::error!("Failed to report upload error: {}", notify_err);
                    }
                }
            }
        }

        self.emit(UploadEvent::BatchFinished {
            has_successful_upload: outcome.has_successful_upload,
        });

        result.map(|()| outcome)
    }

    /// Tasks land in `outcome` as they finish, so a later failure keeps them.
    async fn run_batch(
        &self,
        mut files: Vec<SelectedFile>,
        multimodal: bool,
        toast: &mut Option<NotificationId>,
        outcome: &mut BatchOutcome,
    ) -> Result<()> {
        let id = self.notifier.start(messages::BATCH_UPLOADING)?;
        *toast = Some(id);

        ordering::sort_files(&mut files);

        for file in &files {
            let task = self.upload_one(file, multimodal).await;
            if task.state == TaskState::Success {
                outcome.has_successful_upload = true;
            }
            self.emit(UploadEvent::TaskFinished(task.clone()));
            outcome.tasks.push(task);
        }

        let notified = if outcome.failed() > 0 {
            self.notifier.error(id, messages::BATCH_ERROR)
        } else {
            self.notifier.success(id, messages::BATCH_SUCCESS)
        };

        if outcome.has_successful_upload {
            if let Some(refresher) = &self.refresher {
                if let Err(err) = refresher.refresh().await {
                    log::error!("Error refreshing documents: {}", err);
                }
            }
        }

        notified
    }

    async fn upload_one(&self, file: &SelectedFile, multimodal: bool) -> UploadTask {
        let mut task = UploadTask::new(file.name.clone());
        self.emit(UploadEvent::Index(IndexUpdate::Progress {
            name: file.name.clone(),
            percent: 0,
        }));
        task.start();

        let last_progress = Arc::new(AtomicU8::new(0));
        let on_progress: ProgressCallback = {
            let sender = self.events.clone();
            let name = file.name.clone();
            let last_progress = last_progress.clone();
            Arc::new(move |percent: u8| {
                let percent = percent.min(100);
                log::debug!("Uploading {}: {}%", name, percent);
                last_progress.store(percent, Ordering::Relaxed);
                sender
                    .send(UploadEvent::Index(IndexUpdate::Progress {
                        name: name.clone(),
                        percent,
                    }))
                    .unwrap_or_default();
            })
        };

        let result = self.transport.upload(file, on_progress, multimodal).await;
        task.set_progress(last_progress.load(Ordering::Relaxed));

        match result {
            Ok(result) => match result.status {
                UploadStatus::Success => task.succeed(),
                UploadStatus::Duplicated => task.mark_duplicate(messages::DUPLICATE_FILE),
                UploadStatus::Other(status) => {
                    log::warn!("Upload of {} returned {}: {}", file.name, status, result.message);
                    task.fail(result.message);
                }
            },
            Err(err) => {
                log::error!("Upload failed for {}: {}", file.name, err);
                task.fail(err.user_message());
            }
        }

        match task.state.error_message() {
            Some(message) => self.emit(UploadEvent::Index(IndexUpdate::Failed {
                name: task.name.clone(),
                message: message.to_string(),
            })),
            None => self.emit(UploadEvent::Index(IndexUpdate::Progress {
                name: task.name.clone(),
                percent: task.progress,
            })),
        }

        task
    }
}
