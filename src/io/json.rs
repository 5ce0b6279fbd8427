//! JSON graph descriptions: `{ "n": 4, "edges": [[0, 1], [2, 3]] }`.
//!
//! Unlike the text formats this one is 0-based, since it needs no
//! in-band terminators.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::data_structures::{Graph, GraphError};

use super::IoError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphDescription {
    pub n: usize,
    pub edges: Vec<(usize, usize)>,
}

impl From<&Graph> for GraphDescription {
    fn from(g: &Graph) -> Self {
        Self {
            n: g.order(),
            edges: g.edges().to_vec(),
        }
    }
}

impl TryFrom<&GraphDescription> for Graph {
    type Error = GraphError;

    fn try_from(description: &GraphDescription) -> Result<Self, Self::Error> {
        let mut g = Graph::with_capacity(
            description.n,
            (3 * description.n.max(1)).max(description.edges.len()),
        );
        g.add_edges(&description.edges)?;
        Ok(g)
    }
}

pub fn write_json(g: &Graph, out: &mut impl Write) -> Result<(), IoError> {
    serde_json::to_writer(out, &GraphDescription::from(g))
        .map_err(|why| IoError::CannotWrite(String::from("json graph"), why.to_string()))
}

pub fn read_json(input: &mut impl BufRead) -> Result<Graph, IoError> {
    let context = "json graph";
    let description: GraphDescription = serde_json::from_reader(input)
        .map_err(|why| IoError::CannotParse(String::from(context), why.to_string()))?;
    Graph::try_from(&description)
        .map_err(|why| IoError::InvalidGraph(String::from(context), why))
}

#[cfg(test)]
mod test {
    use std::io::BufReader;

    use super::*;

    #[test]
    fn test_round_trip() {
        let mut g = Graph::new(4);
        g.add_edges(&[(0, 1), (1, 2), (2, 3)]).unwrap();

        let mut buffer = Vec::new();
        write_json(&g, &mut buffer).unwrap();
        let read = read_json(&mut BufReader::new(buffer.as_slice())).unwrap();

        assert_eq!(read.order(), 4);
        assert_eq!(read.edges(), g.edges());
    }

    #[test]
    fn test_reject_invalid_graph() {
        let text = r#"{"n": 2, "edges": [[0, 0]]}"#;
        assert!(read_json(&mut BufReader::new(text.as_bytes())).is_err());
    }
}
