use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// A reseller record. Catalog entries are immutable; negotiation never
/// writes back to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub name: String,
    pub base_price: u32,
    pub delivery_days: u32,
    pub availability: Availability,
    pub contact_number: String,
}
