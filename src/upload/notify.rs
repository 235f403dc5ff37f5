use super::events::{NotificationId, Toast, ToastKind, UploadEvent};
use crate::error::{Result, UploadError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

/// One notification per batch: started, then updated in place.
pub trait Notifier: Send + Sync {
    fn start(&self, message: &str) -> Result<NotificationId>;
    fn success(&self, id: NotificationId, message: &str) -> Result<()>;
    fn error(&self, id: NotificationId, message: &str) -> Result<()>;
}

/// Sends toasts to the UI thread over the upload event channel.
pub struct ChannelNotifier {
    sender: Sender<UploadEvent>,
    next_id: AtomicU64,
}

impl ChannelNotifier {
    pub fn new(sender: Sender<UploadEvent>) -> Self {
        Self {
            sender,
            next_id: AtomicU64::new(1),
        }
    }

    fn send(&self, id: NotificationId, kind: ToastKind, message: &str) -> Result<()> {
        self.sender
            .send(UploadEvent::Toast(Toast {
                id,
                kind,
                message: message.to_string(),
            }))
            .map_err(|_| UploadError::ChannelClosed)
    }
}

impl Notifier for ChannelNotifier {
    fn start(&self, message: &str) -> Result<NotificationId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.send(id, ToastKind::Loading, message)?;
        Ok(id)
    }

    fn success(&self, id: NotificationId, message: &str) -> Result<()> {
        self.send(id, ToastKind::Success, message)
    }

    fn error(&self, id: NotificationId, message: &str) -> Result<()> {
        self.send(id, ToastKind::Error, message)
    }
}
