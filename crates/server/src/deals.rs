use std::sync::Arc;

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use haggle_core::{rank_top, NegotiationEngine, Offer, OfferFilter, Seller, ThreadRngSource};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

const DEFAULT_PRODUCT: &str = "sneakers";

#[derive(Clone)]
pub struct DealsState {
    pub catalog: Arc<Vec<Seller>>,
    pub engine: Arc<NegotiationEngine>,
    pub top_k: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct DealsQuery {
    pub product: Option<String>,
    pub max_price: Option<u32>,
    pub max_days: Option<u32>,
}

/// Wire shape of one offer, matching the public JSON contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OfferView {
    pub seller_name: String,
    pub original_price: u32,
    pub negotiated_price: u32,
    pub delivery_time_days: u32,
    pub availability: String,
    pub contact_number: String,
    pub negotiation_attempted: bool,
    pub negotiation_successful: bool,
    pub order_confirmation: String,
}

impl From<&Offer> for OfferView {
    fn from(offer: &Offer) -> Self {
        Self {
            seller_name: offer.seller_name.clone(),
            original_price: offer.original_price,
            negotiated_price: offer.negotiated_price,
            delivery_time_days: offer.delivery_days,
            availability: offer.availability.label().to_string(),
            contact_number: offer.contact_number.clone(),
            negotiation_attempted: offer.attempted(),
            negotiation_successful: offer.successful(),
            order_confirmation: offer.confirmation_code.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DealsResponse {
    pub product_searched: String,
    pub top_3_deals: Vec<OfferView>,
    pub all_offers: Vec<OfferView>,
}

pub fn router(state: DealsState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get-sneaker-deals", get(get_deals))
        .with_state(state)
}

async fn index() -> &'static str {
    "haggle-server is running. Try /get-sneaker-deals"
}

/// One synchronous generate -> filter -> rank pass per request. Nothing is
/// shared across requests beyond the read-only catalog.
pub async fn get_deals(
    State(state): State<DealsState>,
    Query(query): Query<DealsQuery>,
) -> Json<DealsResponse> {
    let correlation_id = Uuid::new_v4();
    let product = query.product.unwrap_or_else(|| DEFAULT_PRODUCT.to_string());

    let mut rng = ThreadRngSource;
    let offers = state.engine.negotiate_all(&state.catalog, &mut rng);

    let filter = OfferFilter { max_price: query.max_price, max_days: query.max_days };
    let filtered = filter.apply(offers);
    let top = rank_top(&filtered, state.top_k);

    info!(
        event_name = "deals.request.completed",
        correlation_id = %correlation_id,
        product = %product,
        offers_total = state.catalog.len(),
        offers_after_filter = filtered.len(),
        offers_ranked = top.len(),
        "deal generation pass finished"
    );

    Json(DealsResponse {
        product_searched: product,
        top_3_deals: top.iter().map(OfferView::from).collect(),
        all_offers: filtered.iter().map(OfferView::from).collect(),
    })
}
