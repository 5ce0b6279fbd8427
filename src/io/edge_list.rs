//! ASCII edge-list format: the vertex count on the first line, one
//! 1-based `u v` pair per line, terminated by `0 0`.

use std::io::{BufRead, Write};

use crate::data_structures::Graph;

use super::{adjacency_list::build_graph, parse_token, IoError};

pub fn write_edge_list(g: &Graph, out: &mut impl Write) -> Result<(), IoError> {
    let describe =
        |why: std::io::Error| IoError::CannotWrite(String::from("edge list"), why.to_string());

    writeln!(out, "{}", g.order()).map_err(describe)?;
    for &(u, v) in g.edges() {
        writeln!(out, "{} {}", u + 1, v + 1).map_err(describe)?;
    }
    writeln!(out, "0 0").map_err(describe)?;
    Ok(())
}

pub fn read_edge_list(input: &mut impl BufRead) -> Result<Graph, IoError> {
    let context = "edge list";
    let mut lines = input.lines();

    let header = lines
        .next()
        .ok_or_else(|| IoError::CannotParse(String::from(context), String::from("empty input")))?
        .map_err(|why| IoError::CannotRead(String::from(context), why.to_string()))?;
    let n: usize = parse_token(header.trim(), context)?;

    let mut edges = Vec::new();
    for line in lines {
        let line = line.map_err(|why| IoError::CannotRead(String::from(context), why.to_string()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (u, v) = line.split_once(char::is_whitespace).ok_or_else(|| {
            IoError::CannotParse(String::from(context), format!("expected a pair, got {:?}", line))
        })?;
        let u: usize = parse_token(u.trim(), context)?;
        let v: usize = parse_token(v.trim(), context)?;
        if u == 0 && v == 0 {
            break;
        }
        if u == 0 || v == 0 {
            return Err(IoError::CannotParse(
                String::from(context),
                format!("vertex ids are 1-based, got {} {}", u, v),
            ));
        }
        edges.push((u - 1, v - 1));
    }

    build_graph(n, edges, context)
}

#[cfg(test)]
mod test {
    use std::io::BufReader;

    use super::*;

    #[test]
    fn test_round_trip() {
        let mut g = Graph::new(4);
        g.add_edges(&[(0, 1), (2, 3)]).unwrap();

        let mut buffer = Vec::new();
        write_edge_list(&g, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "4\n1 2\n3 4\n0 0\n");

        let read = read_edge_list(&mut BufReader::new(buffer.as_slice())).unwrap();
        assert_eq!(read.order(), 4);
        assert_eq!(read.edges(), g.edges());
    }

    #[test]
    fn test_terminator_stops_parsing() {
        let text = "3\n1 2\n0 0\n2 3\n";
        let g = read_edge_list(&mut BufReader::new(text.as_bytes())).unwrap();
        assert_eq!(g.edges(), [(0, 1)]);
    }
}
