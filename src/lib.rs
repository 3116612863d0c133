#![allow(async_fn_in_trait)]

pub mod cli;
pub mod config;
pub mod llama_stack;
mod logger;
pub mod model;
mod prompts;

use std::io::Write;

use config::Config;
use llama_stack::{LlamaStackClient, RemoteError};
use model::{ChatCompletionRequest, InferenceService, Message, ModelDescriptor};
use thiserror::Error;

pub const MODELS_HEADER: &str = "--- Available models: ---";

#[derive(Debug, Error)]
pub enum InvokerError {
    #[error("missing configuration: environment variable {0} is not set")]
    MissingConfiguration(&'static str),
    #[error("remote call failed: {0}")]
    RemoteCall(#[from] RemoteError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// The conversation sent for every completion, system turn first.
pub fn chat_request(model_id: impl Into<String>) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model_id: model_id.into(),
        messages: vec![
            Message::system(prompts::SYSTEM_PROMPT),
            Message::user(prompts::USER_PROMPT),
        ],
    }
}

fn model_lines(models: Vec<ModelDescriptor>) -> impl Iterator<Item = String> {
    models
        .into_iter()
        .map(|model| format!("- {}", model.identifier))
}

/// Lists the models, then asks `model_id` for a completion, writing both to `out`.
pub async fn run_inference<S, W>(
    service: &S,
    model_id: &str,
    out: &mut W,
) -> Result<(), InvokerError>
where
    S: InferenceService,
    W: Write,
{
    let models = service.list_models().await?;
    log::debug!("server reported {} model(s)", models.len());

    writeln!(out, "{MODELS_HEADER}")?;
    for line in model_lines(models) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    out.flush()?;

    let response = service.chat_completion(&chat_request(model_id)).await?;
    let message = response.completion_message;
    if let Some(stop_reason) = &message.stop_reason {
        log::debug!("completion stopped: {stop_reason}");
    }

    writeln!(out, "{}", message.content.text())?;
    out.flush()?;
    Ok(())
}

/// Connects to the server described by `config` and runs the invoker flow.
#[allow(clippy::missing_errors_doc)]
pub async fn invoke<W: Write>(config: &Config, out: &mut W) -> Result<(), InvokerError> {
    let client = LlamaStackClient::new(config.base_url())?;
    log::info!(
        "using Llama Stack at {} with model {}",
        client.base_url(),
        config.model_id
    );
    run_inference(&client, &config.model_id, out).await
}
