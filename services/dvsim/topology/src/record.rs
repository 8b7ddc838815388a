//! Topology record parsing

use crate::error::BootstrapError;
use dvsim_routing::Distance;

/// Separator between the name, neighbor and network fields
pub const FIELD_SEPARATOR: char = '!';

/// Separator between neighbor names
pub const NEIGHBOR_SEPARATOR: char = ';';

/// Separator between network id and distance
pub const NETWORK_SEPARATOR: char = ':';

/// Network attached to a router at bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAttachment {
    /// Network id
    pub network: String,
    /// Distance in hops
    pub distance: Distance,
}

/// One parsed line of a topology file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyRecord {
    /// 1-based line number in the source
    pub line: usize,
    /// Router name
    pub name: String,
    /// Neighbor names in file order
    pub neighbors: Vec<String>,
    /// Optional attached network
    pub network: Option<NetworkAttachment>,
}

impl TopologyRecord {
    /// Parse a single `name!neighbors!network:distance` line.
    ///
    /// Trailing whitespace is ignored.
    pub fn parse(line: usize, text: &str) -> Result<Self, BootstrapError> {
        let fields: Vec<&str> = text.trim_end().split(FIELD_SEPARATOR).collect();
        if fields.len() != 3 {
            return Err(BootstrapError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let name = fields[0];
        if name.is_empty() {
            return Err(BootstrapError::EmptyName { line });
        }

        let neighbors = if fields[1].is_empty() {
            Vec::new()
        } else {
            let names: Vec<String> = fields[1]
                .split(NEIGHBOR_SEPARATOR)
                .map(str::to_string)
                .collect();
            if names.iter().any(String::is_empty) {
                return Err(BootstrapError::EmptyNeighbor { line });
            }
            names
        };

        let network = if fields[2].is_empty() {
            None
        } else {
            Some(parse_network(line, fields[2])?)
        };

        Ok(Self {
            line,
            name: name.to_string(),
            neighbors,
            network,
        })
    }
}

fn parse_network(line: usize, field: &str) -> Result<NetworkAttachment, BootstrapError> {
    let (network, distance) = match field.split_once(NETWORK_SEPARATOR) {
        Some((network, distance)) if !network.is_empty() => (network, distance),
        _ => {
            return Err(BootstrapError::MalformedNetwork {
                line,
                field: field.to_string(),
            })
        }
    };

    let distance = distance
        .parse::<Distance>()
        .map_err(|_| BootstrapError::InvalidDistance {
            line,
            value: distance.to_string(),
        })?;

    Ok(NetworkAttachment {
        network: network.to_string(),
        distance,
    })
}

/// Parse every non-blank line of a topology file
pub fn parse_records(input: &str) -> Result<Vec<TopologyRecord>, BootstrapError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| TopologyRecord::parse(idx + 1, text))
        .collect()
}
