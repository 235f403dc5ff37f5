use crate::upload::{ChannelNotifier, IndexUpdate, TaskState, UploadEvent, UploadSession};
use derivative::Derivative;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum ActionProgress {
    NotStarted,
    Uploading {
        total: usize,
        processed: usize,
        successful: usize,
        failed: usize,
        current_percent: u8,
    },
    Completed {
        total: usize,
        successful: usize,
        failed: usize,
    },
}

impl Default for ActionProgress {
    fn default() -> Self {
        Self::NotStarted
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct AppState {
    pub session: UploadSession,
    pub progress: ActionProgress,
    pub current_file: Option<String>,
    pub use_multimodal: bool,
    pub show_details: bool,
    pub error_message: Option<String>,
    #[derivative(Debug = "ignore")]
    pub notifier: Arc<ChannelNotifier>,
    #[derivative(Debug = "ignore")]
    pub event_sender: Sender<UploadEvent>,
    #[derivative(Debug = "ignore")]
    event_receiver: Receiver<UploadEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        let (event_sender, event_receiver) = channel();
        Self {
            session: UploadSession::default(),
            progress: ActionProgress::default(),
            current_file: None,
            use_multimodal: false,
            show_details: true,
            error_message: None,
            notifier: Arc::new(ChannelNotifier::new(event_sender.clone())),
            event_sender,
            event_receiver,
        }
    }
}

impl AppState {
    /// Applies every pending worker event. Returns whether anything changed.
    pub fn drain_events(&mut self) -> bool {
        let mut had_updates = false;
        while let Ok(event) = self.event_receiver.try_recv() {
            had_updates = true;
            self.track(&event);
            self.session.apply(event);
        }
        had_updates
    }

    fn track(&mut self, event: &UploadEvent) {
        match event {
            UploadEvent::BatchStarted { names } => {
                self.error_message = None;
                self.current_file = None;
                self.progress = ActionProgress::Uploading {
                    total: names.len(),
                    processed: 0,
                    successful: 0,
                    failed: 0,
                    current_percent: 0,
                };
            }
            UploadEvent::Index(IndexUpdate::Progress { name, percent }) => {
                if let ActionProgress::Uploading {
                    current_percent, ..
                } = &mut self.progress
                {
                    *current_percent = *percent;
                    self.current_file = Some(name.clone());
                }
            }
            UploadEvent::TaskFinished(task) => {
                if let ActionProgress::Uploading {
                    processed,
                    successful,
                    failed,
                    current_percent,
                    ..
                } = &mut self.progress
                {
                    *processed += 1;
                    *current_percent = 0;
                    match task.state {
                        TaskState::Success => *successful += 1,
                        _ => *failed += 1,
                    }
                }
            }
            UploadEvent::BatchFinished { .. } => {
                if let ActionProgress::Uploading {
                    total,
                    successful,
                    failed,
                    ..
                } = self.progress
                {
                    self.progress = ActionProgress::Completed {
                        total,
                        successful,
                        failed,
                    };
                    if failed > 0 {
                        self.error_message = Some(format!(
                            "{} of {} files failed. Check details for more information.",
                            failed, total
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    pub fn reset_progress(&mut self) {
        self.progress = ActionProgress::NotStarted;
        self.current_file = None;
        self.error_message = None;
    }

    pub fn get_progress_percentage(&self) -> f32 {
        match &self.progress {
            ActionProgress::NotStarted => 0.0,
            ActionProgress::Uploading {
                total,
                processed,
                current_percent,
                ..
            } => {
                if *total == 0 {
                    0.0
                } else {
                    (*processed as f32 + *current_percent as f32 / 100.0) / (*total as f32)
                }
            }
            ActionProgress::Completed { .. } => 1.0,
        }
    }

    pub fn get_status_text(&self) -> String {
        match &self.progress {
            ActionProgress::NotStarted => String::new(),
            ActionProgress::Uploading {
                total,
                processed,
                successful,
                failed,
                ..
            } => format!(
                "Progress: {}/{} files | ✅ Success: {} | ❌ Failed: {}",
                processed, total, successful, failed
            ),
            ActionProgress::Completed {
                total,
                successful,
                failed,
            } => format!(
                "Final Status: {}/{} files | ✅ Success: {} | ❌ Failed: {}",
                total, total, successful, failed
            ),
        }
    }
}
