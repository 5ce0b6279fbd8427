//! Adjacency-matrix graph format: the vertex count on the first line,
//! then an N x N matrix of space-separated `0`/`1` entries.

use std::io::{BufRead, Write};

use crate::data_structures::Graph;

use super::{adjacency_list::build_graph, parse_token, IoError};

pub fn write_adjacency_matrix(g: &Graph, out: &mut impl Write) -> Result<(), IoError> {
    let describe = |why: std::io::Error| {
        IoError::CannotWrite(String::from("adjacency matrix"), why.to_string())
    };

    let n = g.order();
    let mut matrix = vec![vec![false; n]; n];
    for &(u, v) in g.edges() {
        matrix[u][v] = true;
        matrix[v][u] = true;
    }

    writeln!(out, "{}", n).map_err(describe)?;
    for row in &matrix {
        let line: Vec<&str> = row.iter().map(|&set| if set { "1" } else { "0" }).collect();
        writeln!(out, "{}", line.join(" ")).map_err(describe)?;
    }
    Ok(())
}

pub fn read_adjacency_matrix(input: &mut impl BufRead) -> Result<Graph, IoError> {
    let context = "adjacency matrix";
    let mut lines = input.lines();

    let header = lines
        .next()
        .ok_or_else(|| IoError::CannotParse(String::from(context), String::from("empty input")))?
        .map_err(|why| IoError::CannotRead(String::from(context), why.to_string()))?;
    let n: usize = parse_token(header.trim(), context)?;

    let mut edges = Vec::new();
    for u in 0..n {
        let line = lines
            .next()
            .ok_or_else(|| {
                IoError::CannotParse(String::from(context), format!("missing row {}", u + 1))
            })?
            .map_err(|why| IoError::CannotRead(String::from(context), why.to_string()))?;
        let entries: Vec<&str> = line.split_whitespace().collect();
        if entries.len() != n {
            return Err(IoError::CannotParse(
                String::from(context),
                format!("row {} has {} entries, expected {}", u + 1, entries.len(), n),
            ));
        }
        for (v, &entry) in entries.iter().enumerate() {
            match entry {
                "0" => {}
                "1" => {
                    if u < v {
                        edges.push((u, v));
                    }
                }
                other => {
                    return Err(IoError::CannotParse(
                        String::from(context),
                        format!("matrix entry {:?} is not 0 or 1", other),
                    ))
                }
            }
        }
    }

    build_graph(n, edges, context)
}

#[cfg(test)]
mod test {
    use std::io::BufReader;

    use super::*;

    #[test]
    fn test_round_trip() {
        let mut g = Graph::new(3);
        g.add_edges(&[(0, 1), (1, 2)]).unwrap();

        let mut buffer = Vec::new();
        write_adjacency_matrix(&g, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer.clone()).unwrap(),
            "3\n0 1 0\n1 0 1\n0 1 0\n"
        );

        let read = read_adjacency_matrix(&mut BufReader::new(buffer.as_slice())).unwrap();
        assert_eq!(read.edges(), g.edges());
    }

    #[test]
    fn test_reject_ragged_matrix() {
        let text = "2\n0 1\n1\n";
        assert!(read_adjacency_matrix(&mut BufReader::new(text.as_bytes())).is_err());
    }
}
