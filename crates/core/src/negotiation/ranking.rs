use crate::domain::offer::Offer;

pub const DEFAULT_TOP_K: usize = 3;

/// Ceilings applied before ranking. A `None` ceiling keeps everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OfferFilter {
    pub max_price: Option<u32>,
    pub max_days: Option<u32>,
}

impl OfferFilter {
    pub fn apply(&self, offers: Vec<Offer>) -> Vec<Offer> {
        offers
            .into_iter()
            .filter(|offer| {
                self.max_price.map_or(true, |ceiling| offer.negotiated_price <= ceiling)
                    && self.max_days.map_or(true, |ceiling| offer.delivery_days <= ceiling)
            })
            .collect()
    }
}

/// Top-K by (negotiated price, delivery days) ascending. The sort is stable,
/// so exact ties keep their input order.
pub fn rank_top(offers: &[Offer], k: usize) -> Vec<Offer> {
    let mut ranked = offers.to_vec();
    ranked.sort_by_key(|offer| (offer.negotiated_price, offer.delivery_days));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use crate::domain::offer::{NegotiationOutcome, Offer};
    use crate::domain::seller::Availability;

    use super::{rank_top, OfferFilter, DEFAULT_TOP_K};

    fn offer(name: &str, negotiated_price: u32, delivery_days: u32) -> Offer {
        Offer {
            seller_name: name.to_string(),
            original_price: negotiated_price,
            negotiated_price,
            delivery_days,
            availability: Availability::InStock,
            contact_number: "0000000000".to_string(),
            outcome: NegotiationOutcome::Skipped,
            confirmation_code: "SIM-ORD1000".to_string(),
        }
    }

    #[test]
    fn ranks_by_price_then_delivery_days() {
        let offers = vec![
            offer("SneakerXpress", 280, 2),
            offer("QuickKicks", 270, 4),
            offer("StreetSole", 290, 1),
            offer("ShoeResellHub", 275, 3),
            offer("KickSmart", 275, 2),
        ];

        let top = rank_top(&offers, DEFAULT_TOP_K);

        let names: Vec<&str> = top.iter().map(|offer| offer.seller_name.as_str()).collect();
        assert_eq!(names, vec!["QuickKicks", "KickSmart", "ShoeResellHub"]);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let offers = vec![offer("first", 275, 3), offer("second", 275, 3), offer("third", 275, 3)];

        let top = rank_top(&offers, 3);

        let names: Vec<&str> = top.iter().map(|offer| offer.seller_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn k_larger_than_input_returns_everything() {
        let offers = vec![offer("a", 280, 2), offer("b", 270, 4)];
        assert_eq!(rank_top(&offers, 10).len(), 2);
        assert!(rank_top(&[], DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn price_ceiling_drops_offers_above_it() {
        let offers = vec![
            offer("SneakerXpress", 280, 2),
            offer("QuickKicks", 270, 4),
            offer("StreetSole", 299, 1),
            offer("ShoeResellHub", 275, 3),
            offer("KickSmart", 285, 2),
        ];

        let filter = OfferFilter { max_price: Some(275), max_days: None };
        let kept = filter.apply(offers);

        let names: Vec<&str> = kept.iter().map(|offer| offer.seller_name.as_str()).collect();
        assert_eq!(names, vec!["QuickKicks", "ShoeResellHub"]);
    }

    #[test]
    fn delivery_ceiling_and_no_filter_behave() {
        let offers = vec![offer("fast", 280, 1), offer("slow", 270, 5)];

        let days_only = OfferFilter { max_price: None, max_days: Some(2) };
        assert_eq!(days_only.apply(offers.clone()).len(), 1);

        let unfiltered = OfferFilter::default();
        assert_eq!(unfiltered.apply(offers).len(), 2);
    }
}
