use super::index::IndexUpdate;
use super::messages;
use super::types::{FileRejection, RejectionCode};

/// Message shown for a rejected file. Unsupported types get one stable
/// message no matter how the picker phrased the failure.
pub fn rejection_message(rejection: &FileRejection) -> String {
    match rejection.errors.first() {
        Some(failure)
            if failure.code == RejectionCode::FileInvalidType
                || failure.message.contains(RejectionCode::FileInvalidType.as_str()) =>
        {
            messages::UNSUPPORTED_TYPE.to_string()
        }
        Some(failure) if !failure.message.is_empty() => failure.message.clone(),
        _ => messages::file_rejected(&rejection.file.name),
    }
}

/// Turns picker rejections into terminal error entries. Only the files in
/// `rejections` are touched.
pub fn process_rejections(rejections: &[FileRejection]) -> Vec<IndexUpdate> {
    rejections
        .iter()
        .map(|rejection| {
            let message = rejection_message(rejection);
            log::warn!("Rejected {}: {}", rejection.file.name, message);
            IndexUpdate::Failed {
                name: rejection.file.name.clone(),
                message,
            }
        })
        .collect()
}
