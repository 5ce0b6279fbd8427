//! Adjacency-list graph format.
//!
//! ```text
//! N=5
//! 1: 2 3 0
//! 2: 1 0
//! ...
//! ```
//!
//! One line per vertex: the 1-based vertex id, a colon, its neighbors in
//! adjacency-list order and a terminating `0`. Written after a successful
//! embedding, the neighbor order of each line is the rotation of the
//! combinatorial embedding.

use std::io::{BufRead, Write};

use crate::data_structures::Graph;

use super::{collect_undirected, parse_token, IoError};

pub fn write_adjacency_list(g: &Graph, out: &mut impl Write) -> Result<(), IoError> {
    let describe = |why: std::io::Error| {
        IoError::CannotWrite(String::from("adjacency list"), why.to_string())
    };

    writeln!(out, "N={}", g.order()).map_err(describe)?;
    for v in 0..g.order() {
        write!(out, "{}:", v + 1).map_err(describe)?;
        for arc in g.adjacency_arcs(v) {
            write!(out, " {}", g.neighbor(arc) + 1).map_err(describe)?;
        }
        writeln!(out, " 0").map_err(describe)?;
    }
    Ok(())
}

pub fn read_adjacency_list(input: &mut impl BufRead) -> Result<Graph, IoError> {
    let context = "adjacency list";
    let mut lines = input.lines();

    let header = lines
        .next()
        .ok_or_else(|| IoError::CannotParse(String::from(context), String::from("empty input")))?
        .map_err(|why| IoError::CannotRead(String::from(context), why.to_string()))?;
    let n: usize = parse_token(
        header.trim().strip_prefix("N=").ok_or_else(|| {
            IoError::CannotParse(String::from(context), String::from("missing N= header"))
        })?,
        context,
    )?;

    let mut edges = Vec::new();
    for line in lines {
        let line = line.map_err(|why| IoError::CannotRead(String::from(context), why.to_string()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (id, rest) = line.split_once(':').ok_or_else(|| {
            IoError::CannotParse(String::from(context), format!("missing colon in {:?}", line))
        })?;
        let u: usize = parse_token(id.trim(), context)?;
        if u == 0 {
            return Err(IoError::CannotParse(
                String::from(context),
                String::from("vertex ids are 1-based"),
            ));
        }
        for token in rest.split_whitespace() {
            let v: usize = parse_token(token, context)?;
            if v == 0 {
                break;
            }
            edges.push((u - 1, v - 1));
        }
    }

    build_graph(n, edges, context)
}

pub(super) fn build_graph(
    n: usize,
    edges: Vec<(usize, usize)>,
    context: &str,
) -> Result<Graph, IoError> {
    let edges = collect_undirected(edges);
    let mut g = Graph::with_capacity(n, (3 * n.max(1)).max(edges.len()));
    g.add_edges(&edges)
        .map_err(|why| IoError::InvalidGraph(String::from(context), why))?;
    Ok(g)
}

#[cfg(test)]
mod test {
    use std::io::BufReader;

    use super::*;

    #[test]
    fn test_round_trip() {
        let mut g = Graph::new(4);
        g.add_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();

        let mut buffer = Vec::new();
        write_adjacency_list(&g, &mut buffer).unwrap();
        let read = read_adjacency_list(&mut BufReader::new(buffer.as_slice())).unwrap();

        assert_eq!(read.order(), 4);
        crate::helpers::assert_same_edges(
            read.edges().iter().copied(),
            g.edges().iter().copied(),
        );
    }

    #[test]
    fn test_read_known_text() {
        let text = "N=3\n1: 2 3 0\n2: 1 0\n3: 1 0\n";
        let g = read_adjacency_list(&mut BufReader::new(text.as_bytes())).unwrap();

        assert_eq!(g.order(), 3);
        assert_eq!(g.edges(), [(0, 1), (0, 2)]);
    }

    #[test]
    fn test_reject_missing_header() {
        let text = "1: 2 0\n";
        assert!(read_adjacency_list(&mut BufReader::new(text.as_bytes())).is_err());
    }
}
