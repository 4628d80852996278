use haggle_agent::{
    AgentBlueprint, NoopProvisioner, OmnidimensionProvisioner, VoiceAgentProvisioner,
};
use haggle_core::config::{AppConfig, LoadOptions};

use crate::commands::{CommandResult, ErrorClass};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "provision",
                ErrorClass::ConfigValidation,
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "provision",
                ErrorClass::RuntimeInit,
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let provisioner: Box<dyn VoiceAgentProvisioner> =
        match OmnidimensionProvisioner::from_config(&config.voice) {
            Some(real) => Box::new(real),
            None => Box::new(NoopProvisioner),
        };

    let blueprint = AgentBlueprint::negotiation_default(
        &config.voice.email_recipients,
        config.voice.webhook_url.as_deref(),
    );

    match runtime.block_on(provisioner.provision(&blueprint)) {
        Ok(agent_id) => CommandResult::success(
            "provision",
            format!("voice agent ready ({}): {agent_id}", provisioner.mode()),
        ),
        Err(error) => CommandResult::failure(
            "provision",
            ErrorClass::Provisioning,
            format!("voice agent bootstrap failed: {error}"),
            4,
        ),
    }
}
