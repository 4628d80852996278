use haggle_core::config::{AppConfig, LoadOptions};
use haggle_core::{rank_top, NegotiationEngine, Offer, ThreadRngSource};

use crate::commands::{CommandResult, ErrorClass};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "simulate",
                ErrorClass::ConfigValidation,
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let engine = NegotiationEngine::new(config.negotiation.policy());
    let catalog = config.catalog();
    let mut rng = ThreadRngSource;

    let offers = engine.negotiate_all(&catalog, &mut rng);
    let top = rank_top(&offers, config.negotiation.top_k);

    CommandResult { exit_code: 0, output: render_transcript(&offers, &top) }
}

/// Human-readable call-by-call transcript plus the ranked summary. Purely
/// cosmetic output; nothing downstream parses it.
fn render_transcript(offers: &[Offer], top: &[Offer]) -> String {
    let mut lines = Vec::new();

    for offer in offers {
        lines.push(String::new());
        lines.push(format!("Calling {} at {}...", offer.seller_name, offer.contact_number));
        lines.push(format!(
            "{}: Price is ${}, delivery in {} days.",
            offer.seller_name, offer.original_price, offer.delivery_days
        ));

        if offer.attempted() {
            lines.push("Agent: Can you offer a better price?".to_string());
            if offer.successful() {
                lines.push(format!(
                    "{}: Okay, new price is ${}.",
                    offer.seller_name, offer.negotiated_price
                ));
            } else {
                lines.push(format!("{}: Sorry, no discount available.", offer.seller_name));
            }
        } else {
            lines.push("Agent: That price works, no haggling needed.".to_string());
        }
    }

    lines.push(String::new());
    lines.push(format!("Top {} Offers:", top.len()));
    for offer in top {
        lines.push(String::new());
        lines.push(format!("Seller: {}", offer.seller_name));
        lines.push(format!("Final Price: ${}", offer.negotiated_price));
        lines.push(format!("Delivery: {} days", offer.delivery_days));
        lines.push(format!("Confirmation: {}", offer.confirmation_code));
    }

    lines.join("\n")
}
