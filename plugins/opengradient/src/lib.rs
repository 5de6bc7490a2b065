//! OpenGradient action provider.
//!
//! Reads model results stored by OpenGradient workflow contracts and prompts
//! LLMs hosted on the network, exposing both as agent actions.

pub mod config;
pub mod constants;
pub mod prompt_actions;
pub mod provider;
pub mod sdk;
pub mod session;
pub mod workflow_actions;

pub use config::{Credentials, OpenGradientConfig};
pub use constants::{Forecast, HostedModel};
pub use provider::{opengradient_action_provider, OpenGradientActionProvider, PROVIDER_NAME};
pub use sdk::{ChatCompletion, ChatMessage, ChatRequest, ModelOutput, OpenGradientSdk};
pub use session::OpenGradientSession;
