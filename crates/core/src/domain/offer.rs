use serde::{Deserialize, Serialize};

use crate::domain::seller::Availability;

/// How a negotiation pass ended for one seller.
///
/// `Skipped` means the base price never crossed the negotiation threshold,
/// `Refused` means the seller was asked and declined, `Discounted` carries
/// the amount knocked off the original price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum NegotiationOutcome {
    Skipped,
    Refused,
    Discounted { discount: u32 },
}

/// One seller's result from a generation pass. Created fresh on every pass
/// from the immutable catalog; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub seller_name: String,
    pub original_price: u32,
    pub negotiated_price: u32,
    pub delivery_days: u32,
    pub availability: Availability,
    pub contact_number: String,
    pub outcome: NegotiationOutcome,
    pub confirmation_code: String,
}

impl Offer {
    pub fn attempted(&self) -> bool {
        !matches!(self.outcome, NegotiationOutcome::Skipped)
    }

    pub fn successful(&self) -> bool {
        matches!(self.outcome, NegotiationOutcome::Discounted { .. })
    }

    pub fn discount(&self) -> u32 {
        self.original_price - self.negotiated_price
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::seller::Availability;

    use super::{NegotiationOutcome, Offer};

    fn offer(outcome: NegotiationOutcome, negotiated_price: u32) -> Offer {
        Offer {
            seller_name: "StreetSole".to_string(),
            original_price: 299,
            negotiated_price,
            delivery_days: 1,
            availability: Availability::InStock,
            contact_number: "8976892362".to_string(),
            outcome,
            confirmation_code: "SIM-ORD1234".to_string(),
        }
    }

    #[test]
    fn outcome_accessors_recover_the_two_flags() {
        let skipped = offer(NegotiationOutcome::Skipped, 299);
        assert!(!skipped.attempted());
        assert!(!skipped.successful());

        let refused = offer(NegotiationOutcome::Refused, 299);
        assert!(refused.attempted());
        assert!(!refused.successful());

        let discounted = offer(NegotiationOutcome::Discounted { discount: 9 }, 290);
        assert!(discounted.attempted());
        assert!(discounted.successful());
        assert_eq!(discounted.discount(), 9);
    }
}
