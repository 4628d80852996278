use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;

use haggle_core::config::VoiceConfig;

use crate::blueprint::AgentBlueprint;
use crate::provisioner::{AgentId, ProvisionError, VoiceAgentProvisioner};

/// Real client for the Omnidimension hosted voice platform.
pub struct OmnidimensionProvisioner {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(Debug, Deserialize)]
struct CreateAgentResponse {
    id: Option<serde_json::Value>,
}

impl OmnidimensionProvisioner {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self { client: Client::new(), base_url: base_url.into(), api_key }
    }

    /// Builds a provisioner from validated voice config. Returns `None` when
    /// voice is disabled or no key is present; the caller falls back to the
    /// no-op implementation.
    pub fn from_config(config: &VoiceConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let api_key = config.api_key.clone()?;
        Some(Self::new(config.base_url.clone(), api_key))
    }
}

/// Agent creation endpoint is `{base_url}/v1/agents`; the base URL may carry
/// a trailing slash.
fn create_agent_url(base_url: &str) -> String {
    format!("{}/v1/agents", base_url.trim_end_matches('/'))
}

#[async_trait]
impl VoiceAgentProvisioner for OmnidimensionProvisioner {
    async fn provision(&self, blueprint: &AgentBlueprint) -> Result<AgentId, ProvisionError> {
        let url = create_agent_url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(blueprint)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProvisionError::Rejected { status: status.as_u16(), detail });
        }

        let payload: CreateAgentResponse = response.json().await?;
        let agent_id = match payload.id {
            Some(serde_json::Value::String(id)) => id,
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => return Err(ProvisionError::MissingAgentId),
        };

        info!(
            event_name = "voice.agent.provisioned",
            agent_id = %agent_id,
            "voice agent created on the hosted platform"
        );

        Ok(AgentId(agent_id))
    }

    fn mode(&self) -> &'static str {
        "omnidimension"
    }
}

#[cfg(test)]
mod tests {
    use haggle_core::config::VoiceConfig;

    use super::OmnidimensionProvisioner;

    fn voice_config(enabled: bool, api_key: Option<&str>) -> VoiceConfig {
        VoiceConfig {
            enabled,
            api_key: api_key.map(|key| key.to_string().into()),
            base_url: "https://backend.omnidim.io/api".to_string(),
            webhook_url: None,
            email_recipients: Vec::new(),
        }
    }

    #[test]
    fn agent_creation_url_targets_v1_agents() {
        assert_eq!(
            super::create_agent_url("https://backend.omnidim.io/api"),
            "https://backend.omnidim.io/api/v1/agents"
        );
        assert_eq!(
            super::create_agent_url("https://backend.omnidim.io/api/"),
            "https://backend.omnidim.io/api/v1/agents"
        );
    }

    #[test]
    fn from_config_requires_enabled_and_a_key() {
        assert!(OmnidimensionProvisioner::from_config(&voice_config(false, Some("key"))).is_none());
        assert!(OmnidimensionProvisioner::from_config(&voice_config(true, None)).is_none());
        assert!(OmnidimensionProvisioner::from_config(&voice_config(true, Some("key"))).is_some());
    }
}
