//! Per-router routing table with first-claim-wins merging

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hop count to a network. Zero means the network is directly attached.
pub type Distance = u32;

/// Reachability of a network from a single router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    /// The router is directly attached to the network (distance 0)
    EdgeRouter,
    /// The network was learned and is this many hops away
    Reachable(Distance),
    /// The router has no entry for the network
    Unknown,
}

impl RouteStatus {
    /// Derive the status from an optional table entry
    pub fn from_distance(distance: Option<Distance>) -> Self {
        match distance {
            Some(0) => RouteStatus::EdgeRouter,
            Some(hops) => RouteStatus::Reachable(hops),
            None => RouteStatus::Unknown,
        }
    }

    /// Check whether the network can be reached at all
    pub fn is_known(&self) -> bool {
        !matches!(self, RouteStatus::Unknown)
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStatus::EdgeRouter => write!(f, "edge router"),
            RouteStatus::Reachable(1) => write!(f, "1 hop away"),
            RouteStatus::Reachable(hops) => write!(f, "{} hops away", hops),
            RouteStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Network id -> distance mapping owned by one router.
///
/// Entries are kept ordered by network id so that rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    entries: BTreeMap<String, Distance>,
}

impl RoutingTable {
    /// Create an empty routing table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance to a network, replacing any previous entry
    pub fn insert(&mut self, network: impl Into<String>, distance: Distance) -> Option<Distance> {
        self.entries.insert(network.into(), distance)
    }

    /// Merge a neighbor's snapshot.
    ///
    /// Networks not yet present are added one hop further away than the
    /// sender reported. Present networks are left untouched regardless of
    /// the advertised distance. Returns the number of entries learned.
    pub fn merge(&mut self, snapshot: &RoutingTable) -> usize {
        let mut learned = 0;
        for (network, distance) in &snapshot.entries {
            if !self.entries.contains_key(network) {
                self.entries
                    .insert(network.clone(), distance.saturating_add(1));
                learned += 1;
            }
        }
        learned
    }

    /// Get the distance to a network
    pub fn distance(&self, network: &str) -> Option<Distance> {
        self.entries.get(network).copied()
    }

    /// Get the reachability status of a network
    pub fn status(&self, network: &str) -> RouteStatus {
        RouteStatus::from_distance(self.distance(network))
    }

    /// Check if the table has an entry for a network
    pub fn contains(&self, network: &str) -> bool {
        self.entries.contains_key(network)
    }

    /// Iterate entries ordered by network id
    pub fn iter(&self) -> impl Iterator<Item = (&str, Distance)> {
        self.entries.iter().map(|(network, distance)| (network.as_str(), *distance))
    }

    /// Number of networks in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Distance)> for RoutingTable {
    fn from_iter<T: IntoIterator<Item = (N, Distance)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, d)| (n.into(), d)).collect(),
        }
    }
}
