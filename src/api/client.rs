//! HTTP client for the remote question-answering service.

use async_trait::async_trait;
use url::Url;

use super::error::{ApiError, Result};
use super::types::{AskRequest, AskResponse, PendingFile, UploadResponse};

/// The two calls the chat page makes against the remote service.
///
/// [`HttpQaApi`] is the production implementation; tests substitute
/// scripted fakes.
#[async_trait]
pub trait QaApi: Send + Sync + std::fmt::Debug {
    /// `POST {apiBase}/upload` with the file as multipart field `file`.
    async fn upload(&self, file: &PendingFile) -> Result<UploadResponse>;

    /// `POST {apiBase}/ask` with a JSON body.
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse>;
}

/// [`QaApi`] over HTTP.
///
/// # Example
///
/// ```rust,no_run
/// use chat_us::api::{AskRequest, HttpQaApi, QaApi};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = HttpQaApi::new("http://localhost:8000")?;
/// let answer = api
///     .ask(&AskRequest { text: "What is this document about?".into(), file: None })
///     .await?
///     .into_answer();
/// println!("{answer}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpQaApi {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpQaApi {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = parse_base_url(base_url.as_ref())?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` as a segment, keeping any path already on the base URL.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
        }
        url
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl QaApi for HttpQaApi {
    async fn upload(&self, file: &PendingFile) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type())?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        let response = self
            .http
            .post(self.endpoint("ask"))
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

/// Validate an `apiBase` value: absolute http(s) URL that can carry a path.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!(
            "{raw}: expected an http(s) URL"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_to_root() {
        let api = HttpQaApi::new("http://localhost:8000").unwrap();
        assert_eq!(api.endpoint("ask").as_str(), "http://localhost:8000/ask");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = HttpQaApi::new("http://example.com/api").unwrap();
        assert_eq!(
            api.endpoint("upload").as_str(),
            "http://example.com/api/upload"
        );

        let api = HttpQaApi::new("http://example.com/api/").unwrap();
        assert_eq!(
            api.endpoint("upload").as_str(),
            "http://example.com/api/upload"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpQaApi::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpQaApi::new("mailto:someone@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpQaApi::new("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
