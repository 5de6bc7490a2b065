pub mod actions;
pub mod error;
pub mod network;
pub mod provider;
pub mod schema;
pub mod toolkit;

pub use actions::{invoke, Action, ActionExample, ActionMetadata, ActionRegistry, ToolDefinition};
pub use error::{ActionError, DispatchError, ProviderError, SchemaError};
pub use network::{Network, NetworkPolicy};
pub use provider::ActionProvider;
pub use schema::{FieldSpec, FieldType, InputSchema, ValidatedArgs};
pub use toolkit::AgentToolkit;
