use std::fmt;

use thiserror::Error;

/// Convenient result alias for the skymesh library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of a route request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a requested endpoint id is absent from the node set.
    #[error("{endpoint} node not found: {id}")]
    NodeNotFound { id: String, endpoint: Endpoint },

    /// Raised when both endpoints exist but no relay chain links them under
    /// the current range budgets.
    #[error("no path between {src} and {dst}")]
    NoPathFound { src: String, dst: String },

    /// Raised when two drones in the roster share an identifier.
    #[error("duplicate drone id: {id}")]
    DuplicateDroneId { id: String },

    /// Raised when a drone claims the reserved control-node identifier.
    #[error("drone id {id} collides with the reserved control identifier")]
    ReservedDroneId { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_not_found_names_the_missing_endpoint() {
        let src = Error::NodeNotFound {
            id: "d7".to_string(),
            endpoint: Endpoint::Source,
        };
        assert_eq!(src.to_string(), "source node not found: d7");

        let dst = Error::NodeNotFound {
            id: "d9".to_string(),
            endpoint: Endpoint::Destination,
        };
        assert_eq!(dst.to_string(), "destination node not found: d9");
    }
}
