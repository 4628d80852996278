pub mod engine;
pub mod ranking;
pub mod rng;
