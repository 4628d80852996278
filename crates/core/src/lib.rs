pub mod catalog;
pub mod config;
pub mod domain;
pub mod negotiation;

pub use domain::offer::{NegotiationOutcome, Offer};
pub use domain::seller::{Availability, Seller};
pub use negotiation::engine::{NegotiationEngine, NegotiationPolicy};
pub use negotiation::ranking::{rank_top, OfferFilter, DEFAULT_TOP_K};
pub use negotiation::rng::{RandomSource, ThreadRngSource};
