mod state;
mod ui;

use crate::error::{Result, UploadError};
use crate::upload::{
    messages, ChannelNotifier, DocumentsRefresher, FilePicker, HttpTransport, Notifier,
    PickerConfig, Refresher, SelectedFile, UploadEvent, UploadSequencer,
};
use crate::utils::server_config::ServerConfig;
use eframe::{egui, App};
pub use state::{ActionProgress, AppState};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct DocumentUploader {
    server_url: String,
    api_key: String,
    picker: FilePicker,
    state: AppState,
}

impl DocumentUploader {
    pub fn new(config: ServerConfig) -> Result<Self> {
        log::info!("Initializing document uploader for {}", config.base_url);
        Ok(Self {
            server_url: config.base_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            picker: FilePicker::new(PickerConfig::default())?,
            state: AppState::default(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig::new(&self.server_url, &self.api_key)
    }

    pub fn open_dialog(&mut self) {
        self.state.session.open();
    }

    pub fn close_dialog(&mut self) -> bool {
        if self.state.session.request_close() {
            self.state.reset_progress();
            true
        } else {
            log::debug!("Dialog close refused while uploading");
            false
        }
    }

    pub fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new().pick_files() {
            self.handle_paths(paths);
        }
    }

    pub fn pick_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            let paths = self.picker.collect_folder(&folder);
            log::info!("Found {} files in {}", paths.len(), folder.display());
            self.handle_paths(paths);
        }
    }

    /// Rejected files are recorded right away; accepted files start a batch.
    pub fn handle_paths(&mut self, paths: Vec<PathBuf>) {
        if self.state.session.is_uploading() {
            log::warn!("Ignoring selection while a batch is uploading");
            return;
        }

        let selection = self.picker.validate(&paths);
        if !selection.rejected.is_empty() {
            self.state.session.add_rejections(&selection.rejected);
        }
        if !selection.accepted.is_empty() {
            self.start_upload(selection.accepted);
        }
    }

    fn build_sequencer(
        config: ServerConfig,
        notifier: Arc<ChannelNotifier>,
        sender: Sender<UploadEvent>,
    ) -> Result<UploadSequencer> {
        let transport = HttpTransport::new(config.clone())?;
        let refresher = DocumentsRefresher::new(config, sender.clone())?;
        Ok(UploadSequencer::new(Arc::new(transport), notifier, sender)
            .with_refresher(Arc::new(refresher)))
    }

    /// Ends a batch that never reached the sequencer.
    fn abort_batch(notifier: &ChannelNotifier, sender: &Sender<UploadEvent>, err: UploadError) {
        log::error!("Unexpected error during upload: {}", err);
        let message = messages::general_error(&err.user_message());
        if let Err(notify_err) = notifier
            .start(&message)
            .and_then(|id| notifier.error(id, &message))
        {
            log::error!("Failed to report upload error: {}", notify_err);
        }
        sender
            .send(UploadEvent::BatchFinished {
                has_successful_upload: false,
            })
            .unwrap_or_default();
    }

    pub fn start_upload(&mut self, files: Vec<SelectedFile>) {
        if let Err(e) = self.state.session.begin_batch(&files) {
            log::warn!("{}", e);
            self.state.error_message = Some(e.to_string());
            return;
        }

        let config = self.server_config();
        let notifier = self.state.notifier.clone();
        let sender = self.state.event_sender.clone();
        let multimodal = self.state.use_multimodal;

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    Self::abort_batch(&notifier, &sender, UploadError::Runtime(e.to_string()));
                    return;
                }
            };

            rt.block_on(async {
                match Self::build_sequencer(config, notifier.clone(), sender.clone()) {
                    Ok(sequencer) => {
                        // errors are already reported through the notifier
                        let _ = sequencer.submit_batch(files, multimodal).await;
                    }
                    Err(e) => Self::abort_batch(&notifier, &sender, e),
                }
            });
        });
    }

    pub fn refresh_documents(&self) {
        let config = self.server_config();
        let sender = self.state.event_sender.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to start async runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                let result = match DocumentsRefresher::new(config, sender) {
                    Ok(refresher) => refresher.refresh().await,
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    log::error!("Error refreshing documents: {}", e);
                }
            });
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.drain_events() || self.state.session.is_uploading() {
            ctx.request_repaint();
        }
    }
}

impl App for DocumentUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
