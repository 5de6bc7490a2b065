use std::sync::Arc;

use crate::sdk::OpenGradientSdk;

/// Session state shared by every OpenGradient action: the authenticated
/// SDK client.
#[derive(Clone)]
pub struct OpenGradientSession {
    pub client: Arc<dyn OpenGradientSdk>,
}

impl OpenGradientSession {
    pub fn new(client: Arc<dyn OpenGradientSdk>) -> Self {
        Self { client }
    }
}
