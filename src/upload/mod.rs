mod events;
mod index;
pub mod messages;
mod notify;
pub mod ordering;
mod picker;
mod refresh;
mod rejection;
mod sequencer;
mod session;
mod transport;
mod types;

pub use events::{NotificationId, Toast, ToastKind, UploadEvent};
pub use index::{IndexUpdate, UploadIndex};
pub use notify::{ChannelNotifier, Notifier};
pub use picker::{FilePicker, PickerConfig, Selection, MAX_FILE_SIZE};
pub use refresh::{DocumentSummary, DocumentsRefresher, Refresher};
pub use rejection::{process_rejections, rejection_message};
pub use sequencer::{BatchOutcome, UploadSequencer};
pub use session::UploadSession;
pub use transport::{HttpTransport, ProgressCallback, Transport};
pub use types::{
    FileRejection, RejectionCode, SelectedFile, TaskState, UploadResult, UploadStatus, UploadTask,
    ValidationFailure,
};
