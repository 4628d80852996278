use async_trait::async_trait;
use thiserror::Error;

use crate::blueprint::AgentBlueprint;

pub const MOCK_AGENT_ID: &str = "mock-agent-id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentId(pub String);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("voice platform request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("voice platform rejected the agent definition: {status} {detail}")]
    Rejected { status: u16, detail: String },
    #[error("voice platform response had no agent id")]
    MissingAgentId,
}

/// One-shot agent setup against the hosted voice platform. Implementations
/// are selected at startup; business logic only ever sees this trait.
#[async_trait]
pub trait VoiceAgentProvisioner: Send + Sync {
    async fn provision(&self, blueprint: &AgentBlueprint) -> Result<AgentId, ProvisionError>;

    /// Short label for logs and readiness payloads.
    fn mode(&self) -> &'static str;
}

/// Stand-in used when no API key is configured.
#[derive(Default)]
pub struct NoopProvisioner;

#[async_trait]
impl VoiceAgentProvisioner for NoopProvisioner {
    async fn provision(&self, _blueprint: &AgentBlueprint) -> Result<AgentId, ProvisionError> {
        Ok(AgentId(MOCK_AGENT_ID.to_string()))
    }

    fn mode(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use crate::blueprint::AgentBlueprint;

    use super::{NoopProvisioner, VoiceAgentProvisioner, MOCK_AGENT_ID};

    #[tokio::test]
    async fn noop_provisioner_returns_the_fixed_mock_id() {
        let provisioner = NoopProvisioner;
        let blueprint = AgentBlueprint::negotiation_default(&[], None);

        let agent_id = provisioner.provision(&blueprint).await.expect("noop cannot fail");

        assert_eq!(agent_id.0, MOCK_AGENT_ID);
        assert_eq!(provisioner.mode(), "noop");
    }
}
