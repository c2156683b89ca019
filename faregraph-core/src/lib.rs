//! Cheapest-fare routing over multi-line transit networks.
//!
//! The crate models a transit system as an undirected graph whose nodes are
//! station identities and whose edges carry one fare per policy (stored
//! value card and single journey ticket), then answers point-to-point
//! cheapest-route queries for both policies independently.
//!
//! Data flows one way: the [`loading`] layer parses a fare directory (text
//! files or a JSON index) into a [`loading::FareDirectory`], the builder
//! expands it into a [`FareNetwork`], and the network then serves read-only
//! [`FareNetwork::shortest_paths`] queries for the life of the process.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{Fare, FareInfo, FareNetwork, FarePolicy, Station};
pub use routing::{Journey, JourneyFares};
