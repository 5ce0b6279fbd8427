pub mod adjacency_list;
pub mod adjacency_matrix;
pub mod edge_list;
pub mod json;

use std::fmt;
use std::str::FromStr;

use crate::data_structures::GraphError;

/// All graph formats are 1-based on disk, which keeps the `0` terminator
/// of the adjacency-list lines and the `0 0` terminator of the edge-list
/// format unambiguous.
#[derive(Debug)]
pub enum IoError {
    CannotWrite(String, String),
    CannotRead(String, String),
    CannotParse(String, String),
    InvalidGraph(String, GraphError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err = match self {
            IoError::CannotWrite(what, why) => format!("Couldn't write to {}: {}", what, why),
            IoError::CannotRead(what, why) => format!("Couldn't read from {}: {}", what, why),
            IoError::CannotParse(what, why) => format!("Couldn't parse {}: {}", what, why),
            IoError::InvalidGraph(what, why) => {
                format!("Graph from {} is not usable: {}", what, why)
            }
        };
        write!(f, "{err}")
    }
}

impl std::error::Error for IoError {}

fn parse_token<T: FromStr>(token: &str, context: &str) -> Result<T, IoError> {
    token.parse().map_err(|_| {
        IoError::CannotParse(
            String::from(context),
            format!("invalid token {:?}", token),
        )
    })
}

/// Dedup the (1-based normalized) undirected edges read from a file into
/// 0-based pairs; writers emit each edge at both endpoints, so readers
/// must fold the two mentions back into one.
fn collect_undirected(edges: impl IntoIterator<Item = (usize, usize)>) -> Vec<(usize, usize)> {
    let mut normalized: Vec<(usize, usize)> = edges
        .into_iter()
        .map(|(u, v)| (u.min(v), u.max(v)))
        .collect();
    normalized.sort_unstable();
    normalized.dedup();
    normalized
}
