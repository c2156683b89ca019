//! The in-memory fare network.

use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::Error;
use crate::model::{FareInfo, FarePolicy, Station};
use crate::routing::{JourneyFares, dijkstra};

/// Undirected graph of stations with one fare-weight pair per edge.
///
/// The loading layer builds a network once; afterwards it is only read.
/// Queries keep all working state local, so a `&FareNetwork` can be shared
/// freely across threads. A rebuild produces a new value instead of mutating
/// a network that is already serving queries.
#[derive(Debug, Clone, Default)]
pub struct FareNetwork {
    pub(crate) graph: UnGraph<Station, FareInfo>,
    nodes: HashMap<Station, NodeIndex>,
}

impl FareNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the station if new and returns its node index. Idempotent:
    /// a station registered earlier, directly or via an edge, keeps its
    /// original index.
    pub fn ensure_node(&mut self, station: &Station) -> NodeIndex {
        if let Some(&node) = self.nodes.get(station) {
            return node;
        }
        let node = self.graph.add_node(station.clone());
        self.nodes.insert(station.clone(), node);
        node
    }

    pub(crate) fn node(&self, station: &Station) -> Option<NodeIndex> {
        self.nodes.get(station).copied()
    }

    pub(crate) fn station(&self, node: NodeIndex) -> &Station {
        &self.graph[node]
    }

    /// Stores `fares` for the unordered pair `(a, b)`, registering both
    /// endpoints as needed. A later write for the same pair replaces the
    /// earlier weights.
    pub fn add_edge(&mut self, a: &Station, b: &Station, fares: FareInfo) {
        let (na, nb) = (self.ensure_node(a), self.ensure_node(b));
        self.graph.update_edge(na, nb, fares);
    }

    /// Links two stations at zero fare. A transfer replaces any priced edge
    /// between the same pair: moving between the two stations is free even
    /// when the line matrix also quotes a fare for them.
    ///
    /// # Errors
    ///
    /// Both endpoints must already be registered by some line matrix;
    /// otherwise [`Error::UnknownStation`] names the missing one.
    pub fn add_transfer(&mut self, a: &Station, b: &Station) -> Result<(), Error> {
        let na = self.node(a).ok_or_else(|| Error::UnknownStation(a.clone()))?;
        let nb = self.node(b).ok_or_else(|| Error::UnknownStation(b.clone()))?;
        self.graph.update_edge(na, nb, FareInfo::TRANSFER);
        Ok(())
    }

    /// The weight pair on the direct edge between two stations, if any.
    pub fn fare_between(&self, a: &Station, b: &Station) -> Option<FareInfo> {
        let (na, nb) = (self.node(a)?, self.node(b)?);
        self.graph.find_edge(na, nb).map(|edge| self.graph[edge])
    }

    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All registered stations, in first-registration order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights()
    }

    /// Cheapest total and route from `from` to `to`, computed independently
    /// for each fare policy. The two weight sets can rank edges differently,
    /// so the two journeys may take different routes.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStation`] if either endpoint was never registered,
    /// [`Error::NoPath`] if the destination is unreachable.
    pub fn shortest_paths(&self, from: &Station, to: &Station) -> Result<JourneyFares, Error> {
        let source = self
            .node(from)
            .ok_or_else(|| Error::UnknownStation(from.clone()))?;
        let target = self
            .node(to)
            .ok_or_else(|| Error::UnknownStation(to.clone()))?;

        // Same station: zero fare, no traversal.
        if source == target {
            return Ok(JourneyFares::at_station(from));
        }

        Ok(JourneyFares {
            stored_value: dijkstra::cheapest_path(self, source, target, FarePolicy::StoredValueCard)?,
            single_journey: dijkstra::cheapest_path(
                self,
                source,
                target,
                FarePolicy::SingleJourneyTicket,
            )?,
        })
    }
}
