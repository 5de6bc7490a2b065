//! Boundary to the OpenGradient SDK.
//!
//! The provider never talks to the network itself; it calls an
//! [`OpenGradientSdk`] client supplied by the host at construction time.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tensors produced by a model run, as stored by a workflow contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    #[serde(default)]
    pub numbers: HashMap<String, f64>,
    #[serde(default)]
    pub strings: HashMap<String, String>,
    #[serde(default)]
    pub jsons: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model_cid: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub chat_output: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Authenticated OpenGradient client.
///
/// Implementations must be safe for concurrent read-only use; the provider
/// shares one client across all of its actions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenGradientSdk: Send + Sync {
    /// Read the latest result stored by a workflow contract.
    async fn read_workflow_result(&self, contract_address: &str) -> Result<ModelOutput>;

    /// Run a chat completion on a hosted LLM.
    async fn llm_chat(&self, request: ChatRequest) -> Result<ChatCompletion>;
}
