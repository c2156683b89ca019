//! Traced Dijkstra over the fare network, one fare policy per run.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::error::Error;
use crate::model::{Fare, FareNetwork, FarePolicy, Station};
use crate::routing::Journey;

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: Fare,
    node: NodeIndex,
}

// Min-heap by cost (reversed from standard Rust BinaryHeap)
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `source` to `target` under one fare policy.
///
/// Binary-heap Dijkstra with lazy deletion. The run exits as soon as the
/// target pops off the heap; with non-negative weights the popped distance
/// is already final. Negative weights coming from malformed fare tables are
/// treated as absent edges. Relaxation is strictly-better only, so on a tie
/// the first-discovered predecessor stands and the reported route is
/// deterministic under the fixed adjacency iteration order.
pub(crate) fn cheapest_path(
    network: &FareNetwork,
    source: NodeIndex,
    target: NodeIndex,
    policy: FarePolicy,
) -> Result<Journey, Error> {
    let estimated = network.station_count().min(1024);
    let mut distances: HashMap<NodeIndex, Fare> = HashMap::with_capacity(estimated);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated);
    let mut heap = BinaryHeap::with_capacity(estimated / 4 + 1);

    distances.insert(source, Fare::ZERO);
    heap.push(State {
        cost: Fare::ZERO,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            let stations = reconstruct(network, &predecessors, source, target)?;
            return Ok(Journey {
                total: cost,
                stations,
            });
        }

        // Stale heap entry for a node already settled cheaper.
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in network.graph.edges(node) {
            let weight = edge.weight().fare(policy);
            if weight.is_negative() {
                continue;
            }
            let next = edge.target();
            let next_cost = cost + weight;

            match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    Err(Error::NoPath {
        from: network.station(source).clone(),
        to: network.station(target).clone(),
    })
}

/// Walks predecessor links back from the settled target, then reverses.
///
/// A settled target always has an unbroken chain to the source; a gap here
/// is a relaxation bug and is reported as its own error, distinct from a
/// disconnected network.
fn reconstruct(
    network: &FareNetwork,
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<Vec<Station>, Error> {
    let mut nodes = vec![target];
    let mut current = target;
    while current != source {
        match predecessors.get(&current) {
            Some(&prev) => {
                nodes.push(prev);
                current = prev;
            }
            None => return Err(Error::Reconstruction(network.station(current).clone())),
        }
    }
    nodes.reverse();
    Ok(nodes
        .into_iter()
        .map(|node| network.station(node).clone())
        .collect())
}
