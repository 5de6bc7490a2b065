//! Aggregation of several providers behind one tool list.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::actions::ToolDefinition;
use crate::error::{DispatchError, ProviderError};
use crate::network::Network;
use crate::provider::ActionProvider;

/// The set of providers available to an agent on a given network.
pub struct AgentToolkit {
    providers: Vec<Arc<dyn ActionProvider>>,
    owners: HashMap<String, usize>,
}

impl AgentToolkit {
    /// Keep the providers that support `network` and index their actions.
    ///
    /// Action names must be unique across the kept providers.
    pub fn new(
        network: Network,
        providers: Vec<Arc<dyn ActionProvider>>,
    ) -> Result<Self, ProviderError> {
        let mut kept = Vec::with_capacity(providers.len());
        let mut owners = HashMap::new();

        for provider in providers {
            if !provider.supports_network(&network) {
                tracing::warn!(
                    provider = provider.name(),
                    protocol_family = %network.protocol_family,
                    "provider does not support network, skipping"
                );
                continue;
            }
            for meta in provider.actions() {
                if owners.insert(meta.name.clone(), kept.len()).is_some() {
                    return Err(ProviderError::DuplicateAction(meta.name));
                }
            }
            kept.push(provider);
        }

        Ok(Self {
            providers: kept,
            owners,
        })
    }

    pub fn providers(&self) -> &[Arc<dyn ActionProvider>] {
        &self.providers
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.providers
            .iter()
            .flat_map(|p| p.tool_definitions())
            .collect()
    }

    /// Route a tool call to the provider that owns `action`.
    pub async fn dispatch(&self, action: &str, input: Value) -> Result<String, DispatchError> {
        let provider = self
            .owners
            .get(action)
            .and_then(|&i| self.providers.get(i))
            .ok_or_else(|| DispatchError::UnknownAction {
                provider: "toolkit".to_string(),
                action: action.to_string(),
            })?;
        provider.dispatch(action, input).await
    }
}
