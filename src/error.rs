use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status. `detail` holds the JSON
    /// `detail` field when the body carried one.
    #[error("Upload failed with status: {status}")]
    Http {
        status: StatusCode,
        detail: Option<String>,
        body: String,
    },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Invalid header value for {0}")]
    InvalidHeader(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Notification channel closed")]
    ChannelClosed,

    #[error("A batch is already uploading")]
    BatchInProgress,

    #[error("Failed to start async runtime: {0}")]
    Runtime(String),
}

impl UploadError {
    /// Builds an HTTP error from a raw response body, pulling out a string
    /// `detail` field if the body is JSON.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(|detail| detail.as_str())
                    .map(str::to_string)
            });

        UploadError::Http {
            status,
            detail,
            body,
        }
    }

    /// Message shown next to the file. A 400 with a `detail` field wins over
    /// everything else.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Http {
                status,
                detail: Some(detail),
                ..
            } if *status == StatusCode::BAD_REQUEST => detail.clone(),
            UploadError::Http {
                status,
                detail: Some(detail),
                ..
            } => format!("{}: {}", status, detail),
            UploadError::Http { status, body, .. } if !body.trim().is_empty() => {
                format!("{}: {}", status, body.trim())
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_detail_is_used_verbatim() {
        let err = UploadError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"bad pdf"}"#.to_string(),
        );
        assert_eq!(err.user_message(), "bad pdf");
    }

    #[test]
    fn other_status_keeps_the_status_code() {
        let err = UploadError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail":"pipeline busy"}"#.to_string(),
        );
        assert_eq!(
            err.user_message(),
            "500 Internal Server Error: pipeline busy"
        );
    }

    #[test]
    fn non_json_body_falls_back_to_raw_text() {
        let err = UploadError::from_response(StatusCode::BAD_REQUEST, "nope".to_string());
        assert_eq!(err.user_message(), "400 Bad Request: nope");
    }

    #[test]
    fn empty_body_uses_display() {
        let err = UploadError::from_response(StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.user_message(), "Upload failed with status: 502 Bad Gateway");
    }

    #[test]
    fn non_string_detail_is_ignored() {
        let err = UploadError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":[{"loc":["file"]}]}"#.to_string(),
        );
        match &err {
            UploadError::Http { detail, .. } => assert!(detail.is_none()),
            _ => panic!("expected http error"),
        }
    }
}
