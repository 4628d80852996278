use serde::{Deserialize, Serialize};

use crate::domain::offer::{NegotiationOutcome, Offer};
use crate::domain::seller::Seller;
use crate::negotiation::rng::RandomSource;

pub const DEFAULT_THRESHOLD: u32 = 275;
pub const DEFAULT_DISCOUNT_MIN: u32 = 5;
pub const DEFAULT_DISCOUNT_MAX: u32 = 15;

const CONFIRMATION_CODE_MIN: u32 = 1000;
const CONFIRMATION_CODE_MAX: u32 = 9999;

/// Knobs for the discount simulation. A discount is attempted only when the
/// base price strictly exceeds `threshold`; a successful attempt knocks off a
/// uniform amount from `[discount_min, discount_max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationPolicy {
    pub threshold: u32,
    pub discount_min: u32,
    pub discount_max: u32,
}

impl Default for NegotiationPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            discount_min: DEFAULT_DISCOUNT_MIN,
            discount_max: DEFAULT_DISCOUNT_MAX,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NegotiationEngine {
    policy: NegotiationPolicy,
}

impl NegotiationEngine {
    pub fn new(policy: NegotiationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &NegotiationPolicy {
        &self.policy
    }

    /// Runs one simulated call against a seller. The seller record itself is
    /// never modified; all results land on the returned offer.
    pub fn negotiate(&self, seller: &Seller, rng: &mut dyn RandomSource) -> Offer {
        let original_price = seller.base_price;
        let mut negotiated_price = original_price;

        let outcome = if original_price > self.policy.threshold {
            if rng.next_bool() {
                let discount =
                    rng.next_in_range(self.policy.discount_min, self.policy.discount_max);
                negotiated_price = original_price.saturating_sub(discount);
                NegotiationOutcome::Discounted { discount }
            } else {
                NegotiationOutcome::Refused
            }
        } else {
            NegotiationOutcome::Skipped
        };

        let code = rng.next_in_range(CONFIRMATION_CODE_MIN, CONFIRMATION_CODE_MAX);

        Offer {
            seller_name: seller.name.clone(),
            original_price,
            negotiated_price,
            delivery_days: seller.delivery_days,
            availability: seller.availability,
            contact_number: seller.contact_number.clone(),
            outcome,
            confirmation_code: format!("SIM-ORD{code}"),
        }
    }

    /// One full generation pass: one fresh offer per catalog entry, in
    /// catalog order.
    pub fn negotiate_all(&self, sellers: &[Seller], rng: &mut dyn RandomSource) -> Vec<Offer> {
        sellers.iter().map(|seller| self.negotiate(seller, rng)).collect()
    }
}
