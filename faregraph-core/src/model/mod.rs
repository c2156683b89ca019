//! Data model for the transit fare network.

mod fare;
mod network;
mod station;

pub use fare::{Fare, FareInfo, FarePolicy, ParseFareError};
pub use network::FareNetwork;
pub use station::Station;
