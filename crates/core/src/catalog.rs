use crate::domain::seller::{Availability, Seller};

/// Canonical demo catalog: five fixed sneaker resellers, all in stock.
const DEMO_SELLERS: &[(&str, u32, u32, &str)] = &[
    ("SneakerXpress", 280, 2, "9525996352"),
    ("QuickKicks", 270, 4, "9832939291"),
    ("StreetSole", 299, 1, "8976892362"),
    ("ShoeResellHub", 275, 3, "7692385467"),
    ("KickSmart", 285, 2, "8924093178"),
];

pub fn demo_sellers() -> Vec<Seller> {
    DEMO_SELLERS
        .iter()
        .map(|(name, base_price, delivery_days, contact_number)| Seller {
            name: (*name).to_string(),
            base_price: *base_price,
            delivery_days: *delivery_days,
            availability: Availability::InStock,
            contact_number: (*contact_number).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::domain::seller::Availability;

    use super::demo_sellers;

    #[test]
    fn demo_catalog_has_the_five_canonical_sellers() {
        let sellers = demo_sellers();
        assert_eq!(sellers.len(), 5);

        let prices: Vec<u32> = sellers.iter().map(|seller| seller.base_price).collect();
        assert_eq!(prices, vec![280, 270, 299, 275, 285]);
        assert!(sellers.iter().all(|seller| seller.availability == Availability::InStock));
    }
}
