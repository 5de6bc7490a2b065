use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use agent_actions_core::{
    ActionMetadata, ActionProvider, ActionRegistry, DispatchError, Network, NetworkPolicy,
    ProviderError,
};

use crate::config::{Credentials, OpenGradientConfig};
use crate::prompt_actions::register_prompt_actions;
use crate::sdk::OpenGradientSdk;
use crate::session::OpenGradientSession;
use crate::workflow_actions::register_workflow_actions;

pub const PROVIDER_NAME: &str = "opengradient";

/// Exposes OpenGradient workflow reads and hosted LLMs as agent actions.
///
/// All networks are supported by default; use [`with_network_policy`] to
/// restrict an instance (e.g. to EVM chains).
///
/// [`with_network_policy`]: OpenGradientActionProvider::with_network_policy
pub struct OpenGradientActionProvider {
    session: OpenGradientSession,
    registry: ActionRegistry<OpenGradientSession>,
    network_policy: NetworkPolicy,
}

impl OpenGradientActionProvider {
    /// Resolve credentials from `config` (falling back to the environment)
    /// and initialize the SDK client with `init`.
    pub fn new<F>(config: OpenGradientConfig, init: F) -> Result<Self, ProviderError>
    where
        F: FnOnce(&Credentials) -> anyhow::Result<Arc<dyn OpenGradientSdk>>,
    {
        Self::with_credentials(config.resolve()?, init)
    }

    /// Build from already-resolved credentials.
    pub fn with_credentials<F>(credentials: Credentials, init: F) -> Result<Self, ProviderError>
    where
        F: FnOnce(&Credentials) -> anyhow::Result<Arc<dyn OpenGradientSdk>>,
    {
        let client = init(&credentials).map_err(|e| ProviderError::ClientInit {
            provider: "OpenGradient",
            source: e.into(),
        })?;

        let mut registry = ActionRegistry::new();
        register_workflow_actions(&mut registry)?;
        register_prompt_actions(&mut registry)?;

        tracing::info!(
            provider = PROVIDER_NAME,
            actions = registry.len(),
            "initialized action provider"
        );

        Ok(Self {
            session: OpenGradientSession::new(client),
            registry,
            network_policy: NetworkPolicy::Any,
        })
    }

    pub fn with_network_policy(mut self, policy: NetworkPolicy) -> Self {
        self.network_policy = policy;
        self
    }
}

#[async_trait]
impl ActionProvider for OpenGradientActionProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn actions(&self) -> Vec<ActionMetadata> {
        self.registry.metadata()
    }

    fn supports_network(&self, network: &Network) -> bool {
        self.network_policy.supports(network)
    }

    async fn dispatch(&self, action: &str, input: Value) -> Result<String, DispatchError> {
        self.registry
            .execute(PROVIDER_NAME, action, &self.session, input)
            .await
    }
}

/// Create a provider using credentials from the environment.
pub fn opengradient_action_provider<F>(init: F) -> Result<OpenGradientActionProvider, ProviderError>
where
    F: FnOnce(&Credentials) -> anyhow::Result<Arc<dyn OpenGradientSdk>>,
{
    OpenGradientActionProvider::new(OpenGradientConfig::default(), init)
}
