//! Router registry, propagation and reachability queries

use crate::error::{Result, RoutingError};
use crate::router::Router;
use crate::table::{Distance, RouteStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Dense index of a router inside a [`Registry`]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouterId(pub usize);

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a single propagation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationReport {
    /// Name of the sending router
    pub sender: String,
    /// Number of neighbors that received the snapshot
    pub delivered: usize,
    /// Total number of table entries learned across all neighbors
    pub learned: usize,
    /// Neighbor names that did not resolve to a router
    pub skipped: Vec<String>,
}

impl PropagationReport {
    fn new(sender: &str) -> Self {
        Self {
            sender: sender.to_string(),
            delivered: 0,
            learned: 0,
            skipped: Vec::new(),
        }
    }
}

/// Owning collection of routers, indexed by name.
///
/// Routers are stored in creation order and only ever reference each
/// other by name, so there are no ownership edges between them.
#[derive(Debug, Default)]
pub struct Registry {
    /// Routers in creation order
    routers: Vec<Router>,
    /// Name -> position in `routers`
    index: HashMap<String, RouterId>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store an empty router
    pub fn create_router(&mut self, name: impl Into<String>) -> Result<RouterId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(RoutingError::NameTaken(name));
        }

        let id = RouterId(self.routers.len());
        debug!("Created router {} with id {}", name, id);
        self.index.insert(name.clone(), id);
        self.routers.push(Router::new(name));
        Ok(id)
    }

    /// Resolve a router name to its id
    pub fn resolve(&self, name: &str) -> Result<RouterId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RoutingError::NotFound(name.to_string()))
    }

    /// Get a router by name
    pub fn get(&self, name: &str) -> Option<&Router> {
        self.index.get(name).map(|id| &self.routers[id.0])
    }

    /// Get a mutable router by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Router> {
        match self.index.get(name) {
            Some(id) => self.routers.get_mut(id.0),
            None => None,
        }
    }

    fn router(&self, name: &str) -> Result<&Router> {
        self.get(name)
            .ok_or_else(|| RoutingError::NotFound(name.to_string()))
    }

    fn router_mut(&mut self, name: &str) -> Result<&mut Router> {
        self.get_mut(name)
            .ok_or_else(|| RoutingError::NotFound(name.to_string()))
    }

    /// Check if a router exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of routers
    pub fn len(&self) -> usize {
        self.routers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Iterate routers in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Router> {
        self.routers.iter()
    }

    /// Router names in creation order
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|r| r.name().to_string()).collect()
    }

    /// Make two routers neighbors of each other.
    ///
    /// Both names must resolve before either router is modified.
    pub fn connect(&mut self, a: &str, b: &str) -> Result<()> {
        self.resolve(a)?;
        self.resolve(b)?;

        self.router_mut(a)?.add_neighbor(b);
        self.router_mut(b)?.add_neighbor(a);
        info!("Connected {} <-> {}", a, b);
        Ok(())
    }

    /// Attach a network to a router, overwriting any previous distance
    pub fn add_network(&mut self, router: &str, network: &str, distance: Distance) -> Result<()> {
        self.router_mut(router)?.add_network(network, distance);
        Ok(())
    }

    /// Push a snapshot of the sender's table to each of its neighbors.
    ///
    /// The snapshot is taken once before any neighbor is updated. Every
    /// neighbor receives the same table, even when the sender lists itself.
    pub fn propagate(&mut self, sender: &str) -> Result<PropagationReport> {
        let (snapshot, neighbors) = {
            let router = self.router(sender)?;
            (router.table_snapshot(), router.neighbors().to_vec())
        };

        let mut report = PropagationReport::new(sender);
        for neighbor in neighbors {
            match self.get_mut(&neighbor) {
                Some(receiver) => {
                    report.learned += receiver.receive_routing_table(&snapshot);
                    report.delivered += 1;
                }
                None => {
                    warn!("Router {} lists unknown neighbor {}, skipping", sender, neighbor);
                    report.skipped.push(neighbor);
                }
            }
        }

        info!(
            "Router {} sent {} entries to {} neighbors ({} learned)",
            sender,
            snapshot.len(),
            report.delivered,
            report.learned
        );
        Ok(report)
    }

    /// Ask whether a router can reach a network
    pub fn query(&self, router: &str, network: &str) -> Result<RouteStatus> {
        Ok(self.router(router)?.has_route(network))
    }

    /// Render one router
    pub fn describe(&self, router: &str) -> Result<String> {
        Ok(self.router(router)?.describe())
    }

    /// Render every router in creation order
    pub fn describe_all(&self) -> Vec<String> {
        self.iter().map(Router::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> Registry {
        let mut registry = Registry::new();
        for name in names {
            registry.create_router(*name).unwrap();
        }
        registry
    }

    #[test]
    fn test_create_router() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        let a = registry.create_router("A").unwrap();
        let b = registry.create_router("B").unwrap();
        assert_eq!(a, RouterId(0));
        assert_eq!(b, RouterId(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("B"), Ok(b));
        let names: Vec<&str> = registry.iter().map(Router::name).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert_eq!(
            registry.create_router("A"),
            Err(RoutingError::NameTaken("A".to_string()))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolve() {
        let registry = registry_with(&["A"]);
        assert_eq!(registry.resolve("A"), Ok(RouterId(0)));
        assert_eq!(
            registry.resolve("Z"),
            Err(RoutingError::NotFound("Z".to_string()))
        );
    }

    #[test]
    fn test_connect_symmetric() {
        let mut registry = registry_with(&["A", "B"]);
        registry.connect("A", "B").unwrap();

        assert!(registry.get("A").unwrap().is_neighbor("B"));
        assert!(registry.get("B").unwrap().is_neighbor("A"));
    }

    #[test]
    fn test_connect_missing_router_changes_nothing() {
        let mut registry = registry_with(&["A"]);

        assert_eq!(
            registry.connect("A", "B"),
            Err(RoutingError::NotFound("B".to_string()))
        );
        assert!(registry.get("A").unwrap().neighbors().is_empty());

        assert_eq!(
            registry.connect("X", "A"),
            Err(RoutingError::NotFound("X".to_string()))
        );
    }

    #[test]
    fn test_add_neighbor_is_directional() {
        let mut registry = registry_with(&["A", "B"]);
        registry.get_mut("A").unwrap().add_neighbor("B");

        assert!(registry.get("A").unwrap().is_neighbor("B"));
        assert!(!registry.get("B").unwrap().is_neighbor("A"));
    }

    #[test]
    fn test_propagate_single_hop() {
        let mut registry = registry_with(&["A", "B", "C"]);
        registry.connect("A", "B").unwrap();
        registry.connect("B", "C").unwrap();
        registry.add_network("A", "net1", 0).unwrap();

        let report = registry.propagate("A").unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(report.learned, 1);
        assert!(report.skipped.is_empty());

        assert_eq!(registry.query("B", "net1"), Ok(RouteStatus::Reachable(1)));
        // One hop per step: C has not heard of net1 yet
        assert_eq!(registry.query("C", "net1"), Ok(RouteStatus::Unknown));

        registry.propagate("B").unwrap();
        assert_eq!(registry.query("C", "net1"), Ok(RouteStatus::Reachable(2)));
        // Back-propagation does not overwrite the edge entry
        assert_eq!(registry.query("A", "net1"), Ok(RouteStatus::EdgeRouter));
    }

    #[test]
    fn test_propagate_first_claim_wins() {
        let mut registry = registry_with(&["A", "B", "C"]);
        registry.connect("A", "C").unwrap();
        registry.connect("B", "C").unwrap();
        registry.add_network("A", "net", 5).unwrap();
        registry.add_network("B", "net", 0).unwrap();

        registry.propagate("A").unwrap();
        registry.propagate("B").unwrap();
        assert_eq!(registry.query("C", "net"), Ok(RouteStatus::Reachable(6)));
    }

    #[test]
    fn test_propagate_duplicate_and_unknown_neighbors() {
        let mut registry = registry_with(&["A", "B"]);
        registry.add_network("A", "net1", 0).unwrap();
        {
            let a = registry.get_mut("A").unwrap();
            a.add_neighbor("B");
            a.add_neighbor("B");
            a.add_neighbor("ghost");
        }

        let report = registry.propagate("A").unwrap();
        assert_eq!(report.delivered, 2);
        assert_eq!(report.learned, 1);
        assert_eq!(report.skipped, vec!["ghost".to_string()]);
        assert_eq!(registry.query("B", "net1"), Ok(RouteStatus::Reachable(1)));
    }

    #[test]
    fn test_propagate_to_self_is_noop() {
        let mut registry = registry_with(&["A"]);
        registry.add_network("A", "net1", 0).unwrap();
        registry.get_mut("A").unwrap().add_neighbor("A");

        let report = registry.propagate("A").unwrap();
        assert_eq!(report.learned, 0);
        assert_eq!(registry.query("A", "net1"), Ok(RouteStatus::EdgeRouter));
    }

    #[test]
    fn test_unknown_router_errors() {
        let mut registry = registry_with(&["A"]);
        let missing = RoutingError::NotFound("Z".to_string());

        assert_eq!(registry.propagate("Z").unwrap_err(), missing);
        assert_eq!(registry.query("Z", "net1").unwrap_err(), missing);
        assert_eq!(registry.add_network("Z", "net1", 0).unwrap_err(), missing);
        assert_eq!(registry.describe("Z").unwrap_err(), missing);
    }

    #[test]
    fn test_describe_all_in_creation_order() {
        let mut registry = registry_with(&["B", "A"]);
        registry.connect("A", "B").unwrap();

        let rendered = registry.describe_all();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("  B\n"));
        assert!(rendered[1].starts_with("  A\n"));
        assert_eq!(registry.names(), vec!["B".to_string(), "A".to_string()]);
    }
}
