use serde::{Deserialize, Serialize};

/// The full agent definition submitted to the hosted voice platform on
/// provisioning. Field names follow the platform's JSON contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentBlueprint {
    pub name: String,
    pub welcome_message: String,
    pub context_breakdown: Vec<ContextSection>,
    pub transcriber: TranscriberSettings,
    pub model: ModelSettings,
    pub voice: VoiceSettings,
    pub post_call_actions: PostCallActions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSection {
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriberSettings {
    pub provider: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub provider: String,
    pub voice_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCallActions {
    pub email: EmailAction,
    pub webhook: WebhookAction,
    pub extracted_variables: Vec<ExtractedVariable>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAction {
    pub enabled: bool,
    pub recipients: Vec<String>,
    pub include: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAction {
    pub enabled: bool,
    pub url: Option<String>,
    pub include: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedVariable {
    pub key: String,
    pub prompt: String,
}

impl AgentBlueprint {
    /// The fixed sneaker-negotiation persona. Email recipients and the
    /// post-call webhook come from configuration rather than being baked in.
    pub fn negotiation_default(
        email_recipients: &[String],
        webhook_url: Option<&str>,
    ) -> Self {
        Self {
            name: "Price Negotiation Agent".to_string(),
            welcome_message: "Hello! This is Knight calling about your sneaker listing."
                .to_string(),
            context_breakdown: vec![
                ContextSection {
                    title: "Agent Intro".to_string(),
                    body: "Explain you're calling to negotiate sneaker prices.".to_string(),
                },
                ContextSection {
                    title: "Negotiate".to_string(),
                    body: "Ask for a discount or faster delivery.".to_string(),
                },
            ],
            transcriber: TranscriberSettings {
                provider: "deepgram_stream".to_string(),
                model: "nova-3".to_string(),
            },
            model: ModelSettings { model: "gpt-4o-mini".to_string(), temperature: 0.7 },
            voice: VoiceSettings {
                provider: "eleven_labs".to_string(),
                voice_id: "JBFqnCBsd6RMkjVDRZzb".to_string(),
            },
            post_call_actions: PostCallActions {
                email: EmailAction {
                    enabled: !email_recipients.is_empty(),
                    recipients: email_recipients.to_vec(),
                    include: vec!["summary".to_string(), "extracted_variables".to_string()],
                    subject: "Negotiation Summary".to_string(),
                    body: "Here's the deal summary from the latest negotiation call."
                        .to_string(),
                },
                webhook: WebhookAction {
                    enabled: webhook_url.is_some(),
                    url: webhook_url.map(str::to_string),
                    include: vec!["extracted_variables".to_string()],
                },
                extracted_variables: vec![
                    ExtractedVariable {
                        key: "reseller_name".to_string(),
                        prompt: "What is the reseller's name?".to_string(),
                    },
                    ExtractedVariable {
                        key: "final_price".to_string(),
                        prompt: "What is the final agreed price?".to_string(),
                    },
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AgentBlueprint;

    #[test]
    fn default_blueprint_serializes_to_the_platform_contract() {
        let recipients = vec!["deals@example.com".to_string()];
        let blueprint =
            AgentBlueprint::negotiation_default(&recipients, Some("https://hooks.example.com/x"));

        let json = serde_json::to_value(&blueprint).expect("serialize");

        assert_eq!(json["name"], "Price Negotiation Agent");
        assert_eq!(json["transcriber"]["provider"], "deepgram_stream");
        assert_eq!(json["model"]["model"], "gpt-4o-mini");
        assert_eq!(json["voice"]["provider"], "eleven_labs");
        assert_eq!(json["post_call_actions"]["email"]["enabled"], true);
        assert_eq!(json["post_call_actions"]["webhook"]["url"], "https://hooks.example.com/x");
        assert_eq!(
            json["post_call_actions"]["extracted_variables"][0]["key"],
            "reseller_name"
        );
    }

    #[test]
    fn actions_disable_when_targets_are_missing() {
        let blueprint = AgentBlueprint::negotiation_default(&[], None);

        assert!(!blueprint.post_call_actions.email.enabled);
        assert!(!blueprint.post_call_actions.webhook.enabled);
        assert!(blueprint.post_call_actions.webhook.url.is_none());
    }
}
