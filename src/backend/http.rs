//! reqwest implementation of [`Backend`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::multipart::{Form, Part};

use super::types::{ChatRequest, ChatResponse, ListResponse, UploadResponse, server_message};
use super::{Backend, BackendError};
use crate::core::types::Document;

const PDF_MIME: &str = "application/pdf";

pub struct HttpBackend {
    base: Url,
    base_display: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base = Url::parse(base_url)
            .map_err(|e| BackendError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(BackendError::Config(format!(
                "base URL {base_url:?} cannot carry a path"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self {
            base_display: base_url.trim_end_matches('/').to_string(),
            base,
            client,
        })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-2xx response into `BackendError::Api`, keeping any server message.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        debug!("Backend response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Backend error: {} - {}", status, body);
        Err(BackendError::Api {
            status: status.as_u16(),
            message: server_message(&body),
        })
    }

    async fn build_form(files: &[PathBuf]) -> Result<Form, BackendError> {
        let mut form = Form::new();
        for path in files {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| BackendError::Io(format!("{}: {}", path.display(), e)))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            debug!("Attaching {} ({} bytes)", filename, bytes.len());
            let part = Part::bytes(bytes)
                .file_name(filename)
                .mime_str(PDF_MIME)
                .map_err(|e| BackendError::Config(e.to_string()))?;
            form = form.part("files", part);
        }
        Ok(form)
    }
}

fn network_error(e: reqwest::Error) -> BackendError {
    BackendError::Network(e.to_string())
}

fn parse_error(e: reqwest::Error) -> BackendError {
    BackendError::Parse(e.to_string())
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_display
    }

    async fn upload(&self, files: &[PathBuf]) -> Result<UploadResponse, BackendError> {
        let url = self.endpoint(&["upload"])?;
        let names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        info!("Uploading {} file(s): {:?}", files.len(), names);

        let form = Self::build_form(files).await?;
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::check_status(response).await?;

        let body: UploadResponse = response.json().await.map_err(parse_error)?;
        info!(
            "Upload response: success={}, files={}",
            body.success,
            body.files.len()
        );
        Ok(body)
    }

    async fn delete(&self, name: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["pdf", name])?;
        info!("Deleting document {}", name);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(network_error)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        let url = self.endpoint(&["chat"])?;
        info!(
            "Chat request: {} chars, {} document filter(s)",
            request.text.len(),
            request.pdf_ids.len()
        );
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::check_status(response).await?;

        let body: ChatResponse = response.json().await.map_err(parse_error)?;
        debug!(
            "Chat response: {} chars, {} source(s)",
            body.response.len(),
            body.sources.as_ref().map_or(0, Vec::len)
        );
        Ok(body)
    }

    async fn list(&self) -> Result<Vec<Document>, BackendError> {
        let url = self.endpoint(&["pdfs"])?;
        info!("Listing documents");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::check_status(response).await?;

        let body: ListResponse = response.json().await.map_err(parse_error)?;
        Ok(body.into_documents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let b = backend("http://localhost:8000");
        assert_eq!(
            b.endpoint(&["chat"]).unwrap().as_str(),
            "http://localhost:8000/chat"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let b = backend("http://example.com/api/");
        assert_eq!(
            b.endpoint(&["upload"]).unwrap().as_str(),
            "http://example.com/api/upload"
        );
    }

    #[test]
    fn test_endpoint_encodes_document_name() {
        let b = backend("http://localhost:8000");
        assert_eq!(
            b.endpoint(&["pdf", "my report/v2.pdf"]).unwrap().as_str(),
            "http://localhost:8000/pdf/my%20report%2Fv2.pdf"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            HttpBackend::new("not a url", Duration::from_secs(1)),
            Err(BackendError::Config(_))
        ));
    }

    #[test]
    fn test_base_url_display_trims_slash() {
        assert_eq!(backend("http://localhost:8000/").base_url(), "http://localhost:8000");
    }
}
