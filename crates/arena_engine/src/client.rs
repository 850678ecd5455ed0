use std::time::Duration;

use arena_core::{Document, EngineId, ParseResponse};
use engine_logging::engine_debug;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::{FailureKind, InvokeError};

const PARSE_PATH: &str = "/api/v1/parse";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// First page to parse, forwarded as `start_page` when set.
    pub start_page: Option<u32>,
    pub max_pages: Option<u32>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            start_page: None,
            max_pages: None,
        }
    }
}

/// One request for one engine against one document. Exactly one attempt.
#[async_trait::async_trait]
pub trait EngineClient: Send + Sync {
    async fn invoke(
        &self,
        document: &Document,
        engine: EngineId,
    ) -> Result<ParseResponse, InvokeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestEngineClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestEngineClient {
    pub fn new(settings: ClientSettings) -> Result<Self, InvokeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| InvokeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!("{}{PARSE_PATH}", self.settings.base_url.trim_end_matches('/'))
    }

    fn build_form(&self, document: &Document, engine: EngineId) -> Result<Form, InvokeError> {
        let file = Part::bytes(document.content().to_vec())
            .file_name(document.name().to_string())
            .mime_str("application/pdf")
            .map_err(map_reqwest_error)?;
        let mut form = Form::new()
            .part("file", file)
            .text("parser_type", engine.as_str());
        if let Some(start_page) = self.settings.start_page {
            form = form.text("start_page", start_page.to_string());
        }
        if let Some(max_pages) = self.settings.max_pages {
            form = form.text("max_pages", max_pages.to_string());
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl EngineClient for ReqwestEngineClient {
    async fn invoke(
        &self,
        document: &Document,
        engine: EngineId,
    ) -> Result<ParseResponse, InvokeError> {
        if document.is_empty() {
            return Err(InvokeError::new(
                FailureKind::EmptyDocument,
                format!("{} is empty", document.name()),
            ));
        }

        let form = self.build_form(document, engine)?;
        engine_debug!(
            "POST {} engine={} file={} bytes={}",
            self.endpoint(),
            engine,
            document.name(),
            document.size()
        );

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(application_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(|err| {
            InvokeError::new(
                FailureKind::InvalidResponse,
                format!("Unexpected response from {engine}: {err}"),
            )
        })
    }
}

/// Uses the engine's `detail` field when present, otherwise a generic status message.
fn application_error(status: StatusCode, body: &[u8]) -> InvokeError {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(serde_json::Value::take))
        .and_then(|detail| match detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.is_empty() => None,
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        });

    let message = detail.unwrap_or_else(|| {
        match status.canonical_reason() {
            Some(reason) => format!("Failed to process PDF: {reason}"),
            None => format!("Failed to process PDF: {}", status.as_str()),
        }
    });
    InvokeError::new(
        FailureKind::Application {
            status: status.as_u16(),
        },
        message,
    )
}

fn map_reqwest_error(err: reqwest::Error) -> InvokeError {
    if err.is_timeout() {
        return InvokeError::new(FailureKind::Timeout, err.to_string());
    }
    InvokeError::new(FailureKind::Network, err.to_string())
}
