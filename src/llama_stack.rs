use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{
    ChatCompletionRequest, ChatCompletionResponse, InferenceService, ModelDescriptor, ModelList,
};

const MODELS_PATH: &str = "/v1/models";
const CHAT_COMPLETION_PATH: &str = "/v1/inference/chat-completion";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// HTTP client for a Llama Stack server.
pub struct LlamaStackClient {
    client: Client,
    base_url: String,
}

impl LlamaStackClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = ClientBuilder::new().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Status { status, body });
    }
    Ok(response.json().await?)
}

impl InferenceService for LlamaStackClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, RemoteError> {
        let url = self.url(MODELS_PATH);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        let models: ModelList = decode(response).await?;
        Ok(models.into())
    }

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, RemoteError> {
        let url = self.url(CHAT_COMPLETION_PATH);
        log::debug!("POST {url} model_id={}", request.model_id);
        let response = self.client.post(&url).json(request).send().await?;
        decode(response).await
    }
}
