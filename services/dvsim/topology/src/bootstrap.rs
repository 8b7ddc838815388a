//! Two-pass registry construction from topology records

use crate::error::BootstrapError;
use crate::record::{parse_records, TopologyRecord};
use dvsim_routing::{Registry, RoutingError};
use std::path::Path;
use tracing::{debug, info};

/// Build a registry from parsed records.
///
/// Pass one creates every router and attaches its network. Pass two
/// resolves neighbor names, which may refer to routers defined on later
/// lines. Neighbor links are one-directional, exactly as listed.
pub fn build_registry(records: &[TopologyRecord]) -> Result<Registry, BootstrapError> {
    let mut registry = Registry::new();

    for record in records {
        registry
            .create_router(record.name.as_str())
            .map_err(|err| match err {
                RoutingError::NameTaken(name) => BootstrapError::DuplicateRouter {
                    line: record.line,
                    name,
                },
                other => BootstrapError::Registry(other),
            })?;

        if let Some(attachment) = &record.network {
            registry.add_network(&record.name, &attachment.network, attachment.distance)?;
        }
    }

    for record in records {
        if let Some(neighbor) = record.neighbors.iter().find(|n| !registry.contains(n)) {
            return Err(BootstrapError::UnknownNeighbor {
                line: record.line,
                router: record.name.clone(),
                neighbor: neighbor.clone(),
            });
        }

        let router = registry
            .get_mut(&record.name)
            .ok_or_else(|| RoutingError::NotFound(record.name.clone()))?;
        for neighbor in &record.neighbors {
            router.add_neighbor(neighbor.as_str());
        }
        debug!(
            "Router {} bootstrapped with {} neighbors",
            record.name,
            record.neighbors.len()
        );
    }

    Ok(registry)
}

/// Parse topology text and build a registry from it
pub fn load_str(input: &str) -> Result<Registry, BootstrapError> {
    let records = parse_records(input)?;
    build_registry(&records)
}

/// Read a topology file and build a registry from it
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Registry, BootstrapError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| BootstrapError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let registry = load_str(&content)?;
    info!("Loaded {} routers from {:?}", registry.len(), path);
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvsim_routing::RouteStatus;

    #[test]
    fn test_forward_references() {
        let registry = load_str("A!B;C!net1:0\nB!C!\nC!!net2:2\n").unwrap();

        assert_eq!(registry.names(), vec!["A", "B", "C"]);
        assert_eq!(registry.get("A").unwrap().neighbors(), &["B", "C"]);
        assert_eq!(registry.get("B").unwrap().neighbors(), &["C"]);
        assert!(registry.get("C").unwrap().neighbors().is_empty());

        assert_eq!(registry.query("A", "net1"), Ok(RouteStatus::EdgeRouter));
        assert_eq!(registry.query("C", "net2"), Ok(RouteStatus::Reachable(2)));
    }

    #[test]
    fn test_neighbors_are_directional() {
        let registry = load_str("A!B!\nB!!\n").unwrap();
        assert!(registry.get("A").unwrap().is_neighbor("B"));
        assert!(!registry.get("B").unwrap().is_neighbor("A"));
    }

    #[test]
    fn test_duplicate_neighbors_preserved() {
        let registry = load_str("A!B;B!\nB!!\n").unwrap();
        assert_eq!(registry.get("A").unwrap().neighbors().len(), 2);
    }

    #[test]
    fn test_duplicate_router() {
        let err = load_str("A!!\nB!!\nA!!net:1\n").unwrap_err();
        match err {
            BootstrapError::DuplicateRouter { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_neighbor() {
        let err = load_str("A!B;Z!\nB!!\n").unwrap_err();
        match err {
            BootstrapError::UnknownNeighbor { line, router, neighbor } => {
                assert_eq!(line, 1);
                assert_eq!(router, "A");
                assert_eq!(neighbor, "Z");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_line_fails_whole_file() {
        assert!(load_str("A!!\nbroken\nB!!\n").is_err());
    }

    #[test]
    fn test_empty_input() {
        let registry = load_str("").unwrap();
        assert!(registry.is_empty());
    }
}
