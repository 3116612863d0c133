use serde::{Deserialize, Serialize};

use crate::llama_stack::RemoteError;

/// The two remote operations the invoker consumes.
pub trait InferenceService {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, RemoteError>;

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, RemoteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelDescriptor {
    pub identifier: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub provider_resource_id: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
}

/// `GET /v1/models` answers with either a bare array or a `data` envelope
/// depending on the server release.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ModelList {
    Envelope { data: Vec<ModelDescriptor> },
    Bare(Vec<ModelDescriptor>),
}

impl From<ModelList> for Vec<ModelDescriptor> {
    fn from(value: ModelList) -> Self {
        match value {
            ModelList::Envelope { data } => data,
            ModelList::Bare(models) => models,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCompletionRequest {
    pub model_id: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub completion_message: CompletionMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub role: Option<Role>,
    pub content: Content,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Items(Vec<ContentItem>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl Content {
    /// Plain text of the content; non-text items contribute nothing.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Items(items) => items
                .iter()
                .filter_map(|item| match item {
                    ContentItem::Text { text } => Some(text.as_str()),
                    ContentItem::Other => None,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ChatCompletionResponse, Content, Message, ModelDescriptor, ModelList, Role};

    #[test]
    fn models_accept_envelope_and_bare_array() {
        let envelope: ModelList = serde_json::from_value(json!({
            "data": [
                {"identifier": "meta-llama/Llama-3.2-3B-Instruct", "provider_id": "ollama", "model_type": "llm"},
                {"identifier": "all-MiniLM-L6-v2", "model_type": "embedding", "metadata": {"embedding_dimension": 384}}
            ]
        }))
        .unwrap();
        let models: Vec<ModelDescriptor> = envelope.into();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].identifier, "meta-llama/Llama-3.2-3B-Instruct");
        assert_eq!(models[0].provider_id.as_deref(), Some("ollama"));
        assert_eq!(models[1].model_type.as_deref(), Some("embedding"));

        let bare: ModelList = serde_json::from_value(json!([{"identifier": "only"}])).unwrap();
        let models: Vec<ModelDescriptor> = bare.into();
        assert_eq!(models[0].identifier, "only");
        assert_eq!(models[0].provider_id, None);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let value = serde_json::to_value(Message::system("be nice")).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "be nice"}));
        let role: Role = serde_json::from_value(json!("assistant")).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn string_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "completion_message": {
                "role": "assistant",
                "content": "Semicolons fall",
                "stop_reason": "end_of_turn",
                "tool_calls": []
            },
            "logprobs": null
        }))
        .unwrap();
        assert_eq!(response.completion_message.content.text(), "Semicolons fall");
        assert_eq!(
            response.completion_message.stop_reason.as_deref(),
            Some("end_of_turn")
        );
    }

    #[test]
    fn interleaved_content_keeps_text_items_only() {
        let content: Content = serde_json::from_value(json!([
            {"type": "text", "text": "Bugs hide "},
            {"type": "image", "image": {"url": {"uri": "https://example.invalid/a.png"}}},
            {"type": "text", "text": "in the night"}
        ]))
        .unwrap();
        assert_eq!(content.text(), "Bugs hide in the night");
    }
}
