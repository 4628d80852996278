pub mod offer;
pub mod seller;
