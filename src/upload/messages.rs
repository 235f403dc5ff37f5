//! User-facing text for upload outcomes.

pub const UNSUPPORTED_TYPE: &str = "Unsupported file type";
pub const DUPLICATE_FILE: &str = "File name already exists in server cache";
pub const BATCH_UPLOADING: &str = "Uploading files...";
pub const BATCH_SUCCESS: &str = "Upload completed successfully";
pub const BATCH_ERROR: &str = "Some files failed to upload";

pub fn file_rejected(name: &str) -> String {
    format!("File {} was rejected", name)
}

pub fn general_error(error: &str) -> String {
    format!("Upload failed\n{}", error)
}
