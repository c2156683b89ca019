//! Shortest-path queries over the fare network.

pub(crate) mod dijkstra;
mod journey;

pub use journey::{Journey, JourneyFares};
