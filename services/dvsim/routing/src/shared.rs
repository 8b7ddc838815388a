//! Coarse-locked registry handle for multi-task hosts

use crate::error::Result;
use crate::registry::{PropagationReport, Registry, RouterId};
use crate::table::{Distance, RouteStatus};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to a registry behind a single lock.
///
/// Every method holds the lock for the whole operation, so a propagation
/// step is never observed half-applied.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// Wrap an existing registry
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Create a router
    pub async fn create_router(&self, name: &str) -> Result<RouterId> {
        self.inner.lock().await.create_router(name)
    }

    /// Check if a router exists
    pub async fn contains(&self, name: &str) -> bool {
        self.inner.lock().await.contains(name)
    }

    /// Connect two routers symmetrically
    pub async fn connect(&self, a: &str, b: &str) -> Result<()> {
        self.inner.lock().await.connect(a, b)
    }

    /// Attach a network to a router
    pub async fn add_network(&self, router: &str, network: &str, distance: Distance) -> Result<()> {
        self.inner.lock().await.add_network(router, network, distance)
    }

    /// Push the sender's table to its neighbors
    pub async fn propagate(&self, sender: &str) -> Result<PropagationReport> {
        self.inner.lock().await.propagate(sender)
    }

    /// Reachability query
    pub async fn query(&self, router: &str, network: &str) -> Result<RouteStatus> {
        self.inner.lock().await.query(router, network)
    }

    /// Render one router
    pub async fn describe(&self, router: &str) -> Result<String> {
        self.inner.lock().await.describe(router)
    }

    /// Render all routers in creation order
    pub async fn describe_all(&self) -> Vec<String> {
        self.inner.lock().await.describe_all()
    }

    /// Router names in creation order
    pub async fn router_names(&self) -> Vec<String> {
        self.inner.lock().await.names()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
