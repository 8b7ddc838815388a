//! Router entity: name, neighbor names and routing table

use crate::table::{Distance, RouteStatus, RoutingTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A simulated router.
///
/// Neighbors are stored by name only; the owning [`crate::Registry`]
/// resolves them when a table is propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    /// Router name, unique within a registry
    name: String,
    /// Neighbor names in insertion order (duplicates are kept)
    neighbors: Vec<String>,
    /// Known networks and their distances
    table: RoutingTable,
}

impl Router {
    /// Create a router with no neighbors and an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            neighbors: Vec::new(),
            table: RoutingTable::new(),
        }
    }

    /// Router name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a neighbor name.
    ///
    /// Not idempotent: adding the same peer twice lists it twice.
    /// The relationship is one-directional.
    pub fn add_neighbor(&mut self, peer: impl Into<String>) {
        let peer = peer.into();
        debug!("Router {} added neighbor {}", self.name, peer);
        self.neighbors.push(peer);
    }

    /// Attach a network at the given distance, overwriting any previous entry
    pub fn add_network(&mut self, network: impl Into<String>, distance: Distance) {
        let network = network.into();
        debug!("Router {} set {} at distance {}", self.name, network, distance);
        self.table.insert(network, distance);
    }

    /// Merge a routing table received from a neighbor.
    ///
    /// Returns the number of networks learned from the snapshot.
    pub fn receive_routing_table(&mut self, snapshot: &RoutingTable) -> usize {
        let learned = self.table.merge(snapshot);
        debug!(
            "Router {} received {} entries, learned {}",
            self.name,
            snapshot.len(),
            learned
        );
        learned
    }

    /// Check whether this router knows a route to a network
    pub fn has_route(&self, network: &str) -> RouteStatus {
        self.table.status(network)
    }

    /// Neighbor names in insertion order
    pub fn neighbors(&self) -> &[String] {
        &self.neighbors
    }

    /// Check if a peer is listed as neighbor
    pub fn is_neighbor(&self, peer: &str) -> bool {
        self.neighbors.iter().any(|n| n == peer)
    }

    /// Read-only view of the routing table
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Value copy of the routing table taken now
    pub fn table_snapshot(&self) -> RoutingTable {
        self.table.clone()
    }

    /// Stable textual rendering of neighbors and table entries
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.name)?;

        let mut neighbors: Vec<&str> = self.neighbors.iter().map(String::as_str).collect();
        neighbors.sort_unstable();
        if neighbors.is_empty() {
            writeln!(f, "    N:")?;
        } else {
            writeln!(f, "    N: {}", neighbors.join(", "))?;
        }

        if self.table.is_empty() {
            write!(f, "    R:")
        } else {
            let entries: Vec<String> = self
                .table
                .iter()
                .map(|(network, distance)| format!("{}:{}", network, distance))
                .collect();
            write!(f, "    R: {}", entries.join(", "))
        }
    }
}
