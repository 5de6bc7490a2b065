use serde::{Deserialize, Serialize};

/// Network the agent is operating on. Owned by the host framework; providers
/// only read it to answer support queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub protocol_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
}

impl Network {
    pub fn new(protocol_family: impl Into<String>) -> Self {
        Self {
            protocol_family: protocol_family.into(),
            network_id: None,
            chain_id: None,
        }
    }

    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }
}

/// Which networks a provider instance declares support for.
///
/// This is configuration chosen per provider, not derived from its actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NetworkPolicy {
    /// Every network is supported.
    #[default]
    Any,
    /// Only networks of the given protocol family, e.g. `"evm"`.
    ProtocolFamily(String),
}

impl NetworkPolicy {
    pub fn evm() -> Self {
        NetworkPolicy::ProtocolFamily("evm".to_string())
    }

    pub fn supports(&self, network: &Network) -> bool {
        match self {
            NetworkPolicy::Any => true,
            NetworkPolicy::ProtocolFamily(family) => network.protocol_family == *family,
        }
    }
}
