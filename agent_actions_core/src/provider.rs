use async_trait::async_trait;
use serde_json::Value;

use crate::actions::{ActionMetadata, ToolDefinition};
use crate::error::DispatchError;
use crate::network::Network;

/// A named group of actions sharing one session (credentials, SDK client).
///
/// Providers are built once per agent session and hold no per-call state.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Metadata for every action, in declaration order.
    fn actions(&self) -> Vec<ActionMetadata>;

    fn supports_network(&self, network: &Network) -> bool;

    /// Run `action` with raw tool-call arguments.
    ///
    /// Returns `Err` only when no action of that name exists. Validation and
    /// remote failures come back as `Ok("Error ...")`.
    async fn dispatch(&self, action: &str, input: Value) -> Result<String, DispatchError>;

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.actions()
            .iter()
            .map(ActionMetadata::tool_definition)
            .collect()
    }
}
