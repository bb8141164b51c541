//! Wire types for the remote question-answering API.

use serde::{Deserialize, Serialize};

/// Answer used when `/ask` succeeds but carries no `answer` field.
pub const NO_RESPONSE_ANSWER: &str = "No response received";

// =============================================================================
// Upload
// =============================================================================

/// A file selected by the user, held in memory until it is uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// Original filename as reported by the browser.
    pub name: String,
    /// MIME type, if the browser sent one.
    pub content_type: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// MIME type to send upstream: the browser's value, else a guess from the name.
    pub fn mime_type(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.name)
                .first_or_octet_stream()
                .to_string()
        })
    }
}

impl std::fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Response from `POST /upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Name under which the service stored the file.
    #[serde(default)]
    pub filename: Option<String>,
}

// =============================================================================
// Ask
// =============================================================================

/// Request body for `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question text.
    pub text: String,
    /// Filename returned by the last successful upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Response from `POST /ask`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AskResponse {
    /// The answer text, or [`NO_RESPONSE_ANSWER`] when the service sent none
    /// or an empty one.
    pub fn into_answer(self) -> String {
        self.answer
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_ANSWER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_omits_missing_file() {
        let req = AskRequest {
            text: "life?".into(),
            file: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "text": "life?" })
        );
    }

    #[test]
    fn ask_request_includes_uploaded_file() {
        let req = AskRequest {
            text: "summary?".into(),
            file: Some("a.txt".into()),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""file":"a.txt""#));
    }

    #[test]
    fn ask_response_falls_back_when_answer_missing() {
        let resp: AskResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.into_answer(), NO_RESPONSE_ANSWER);

        let resp: AskResponse = serde_json::from_str(r#"{"answer":null}"#).unwrap();
        assert_eq!(resp.into_answer(), NO_RESPONSE_ANSWER);

        let resp: AskResponse = serde_json::from_str(r#"{"answer":""}"#).unwrap();
        assert_eq!(resp.into_answer(), NO_RESPONSE_ANSWER);

        let resp: AskResponse = serde_json::from_str(r#"{"answer":"42"}"#).unwrap();
        assert_eq!(resp.into_answer(), "42");
    }

    #[test]
    fn upload_response_tolerates_extra_fields() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"filename":"a.pdf","size":12}"#).unwrap();
        assert_eq!(resp.filename.as_deref(), Some("a.pdf"));
    }

    #[test]
    fn pending_file_guesses_mime_from_name() {
        let file = PendingFile::new("report.pdf", b"%PDF".to_vec());
        assert_eq!(file.mime_type(), "application/pdf");

        let file = PendingFile::new("blob", Vec::new());
        assert_eq!(file.mime_type(), "application/octet-stream");

        let file = PendingFile::new("notes", Vec::new()).with_content_type("text/plain");
        assert_eq!(file.mime_type(), "text/plain");
    }
}
