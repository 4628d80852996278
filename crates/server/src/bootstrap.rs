use std::sync::Arc;

use haggle_agent::{
    AgentBlueprint, NoopProvisioner, OmnidimensionProvisioner, VoiceAgentProvisioner,
};
use haggle_core::config::{AppConfig, ConfigError, LoadOptions};
use haggle_core::{NegotiationEngine, Seller};
use thiserror::Error;
use tracing::{info, warn};

use crate::deals::DealsState;
use crate::health::HealthState;

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Vec<Seller>>,
    pub engine: Arc<NegotiationEngine>,
    pub provisioner: Arc<dyn VoiceAgentProvisioner>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = Arc::new(config.catalog());
    let engine = Arc::new(NegotiationEngine::new(config.negotiation.policy()));

    let provisioner: Arc<dyn VoiceAgentProvisioner> =
        match OmnidimensionProvisioner::from_config(&config.voice) {
            Some(real) => Arc::new(real),
            None => Arc::new(NoopProvisioner),
        };
    info!(
        event_name = "system.bootstrap.provisioner_selected",
        correlation_id = "bootstrap",
        provisioner_mode = provisioner.mode(),
        "voice agent provisioner selected"
    );

    spawn_agent_provisioning(&config, Arc::clone(&provisioner));

    Ok(Application { config, catalog, engine, provisioner })
}

/// Fire-and-forget: the hosted agent setup never blocks startup and its
/// outcome is only logged.
fn spawn_agent_provisioning(config: &AppConfig, provisioner: Arc<dyn VoiceAgentProvisioner>) {
    let blueprint = AgentBlueprint::negotiation_default(
        &config.voice.email_recipients,
        config.voice.webhook_url.as_deref(),
    );

    tokio::spawn(async move {
        match provisioner.provision(&blueprint).await {
            Ok(agent_id) => info!(
                event_name = "voice.bootstrap.agent_ready",
                correlation_id = "bootstrap",
                agent_id = %agent_id,
                "voice agent bootstrap finished"
            ),
            Err(error) => warn!(
                event_name = "voice.bootstrap.failed",
                correlation_id = "bootstrap",
                error = %error,
                "voice agent bootstrap failed; continuing without a hosted agent"
            ),
        }
    });
}

impl Application {
    pub fn deals_state(&self) -> DealsState {
        DealsState {
            catalog: Arc::clone(&self.catalog),
            engine: Arc::clone(&self.engine),
            top_k: self.config.negotiation.top_k,
        }
    }

    pub fn health_state(&self) -> HealthState {
        HealthState {
            catalog: Arc::clone(&self.catalog),
            provisioner_mode: self.provisioner.mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use haggle_core::config::{ConfigOverrides, LoadOptions};
    use haggle_core::{Availability, Seller};

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_defaults_to_the_noop_provisioner_and_demo_catalog() {
        let app = bootstrap(LoadOptions::default()).expect("bootstrap should succeed");

        assert_eq!(app.provisioner.mode(), "noop");
        assert_eq!(app.catalog.len(), 5);
        assert_eq!(app.config.negotiation.top_k, 3);
    }

    #[tokio::test]
    async fn bootstrap_honors_a_custom_catalog_override() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                sellers: Some(vec![Seller {
                    name: "BackroomKicks".to_string(),
                    base_price: 310,
                    delivery_days: 6,
                    availability: Availability::InStock,
                    contact_number: "5550001111".to_string(),
                }]),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("bootstrap should succeed");

        assert_eq!(app.catalog.len(), 1);
        assert_eq!(app.catalog[0].name, "BackroomKicks");
    }
}
