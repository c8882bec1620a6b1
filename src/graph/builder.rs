use crate::{Error, ErrorKind, Graph};
use std::fs::File;
use std::io::{BufRead, BufReader};

/**
Constructors that read graphs from whitespace-separated tabular files.

Three kinds of graph are built here:

* an ordinary weighted graph from an edges file (`v w [weight]`),
* a two-sided compacted de Bruijn graph from a unitigs file
  (`id sequence`) plus an edges file (`from to edge_type [overlap]`),
* an edge-induced cdBG subgraph for a single genome, used as the input to
  path compression.

Malformed rows abort with the offending line number. Edge rows whose
overlap field is present and non-zero are skipped: only links matching the
k-mer context count as edges.
*/

/**
Builds an ordinary weighted graph from an edges file.

Rows are `v w [weight]`; a missing or non-numeric weight defaults to
`1.0`. The graph is sized to the largest id seen. With `one_based`, input
ids are shifted down by one.

# Examples

```no_run
use dbgdist::graph::builder;
let graph = builder::from_edges_file("graph.edges", false).unwrap();
```
*/
pub fn from_edges_file(edges_file: &str, one_based: bool) -> Result<Graph, Error> {
    let mut graph = Graph::new(one_based, false);
    let mut edges = vec![];
    let mut max_v = 0;
    for (line_number, line) in read_lines(edges_file)?.enumerate() {
        let line = read_line(line, edges_file)?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::malformed_line(
                edges_file,
                line_number + 1,
                "expected at least two fields: v w [weight]",
            ));
        }
        let v = parse_id(fields[0], one_based, edges_file, line_number + 1)?;
        let w = parse_id(fields[1], one_based, edges_file, line_number + 1)?;
        let weight = fields
            .get(2)
            .and_then(|f| f.parse::<f64>().ok())
            .unwrap_or(1.0);
        max_v = max_v.max(v).max(w);
        edges.push((v, w, weight));
    }
    graph.resize(max_v + 1);
    for (v, w, weight) in edges {
        graph.add_edge(v, w, weight);
    }
    Ok(graph)
}

/**
Builds a two-sided compacted de Bruijn graph.

The unitigs file (`id sequence`) allocates one two-sided vertex per row
with a self-edge weight of `sequence length - k`; a negative weight means
the k-mer length is wrong and is an error. The edges file rows are
`from to edge_type [overlap]` where `edge_type` is two characters over
`{F, R}`: `F*` attaches the link to `from`'s right port and `*R` attaches
it to `to`'s right port. Link weights are `1.0` by definition. An edge
naming a unitig the unitigs file never defined is an error.
*/
pub fn cdbg_from_files(
    unitigs_file: &str,
    edges_file: &str,
    k: usize,
    one_based: bool,
) -> Result<Graph, Error> {
    let mut graph = Graph::new(one_based, true);
    for (line_number, line) in read_lines(unitigs_file)?.enumerate() {
        let line = read_line(line, unitigs_file)?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::malformed_line(
                unitigs_file,
                line_number + 1,
                "expected two fields: id sequence",
            ));
        }
        let self_edge_weight = fields[1].len() as f64 - k as f64;
        if self_edge_weight < 0.0 {
            return Err(Error::malformed_line(
                unitigs_file,
                line_number + 1,
                format!(
                    "negative self-edge weight {} -- wrong k-mer length?",
                    self_edge_weight
                ),
            ));
        }
        graph.add_two_sided_node(self_edge_weight);
    }

    for (line_number, line) in read_lines(edges_file)?.enumerate() {
        let line = read_line(line, edges_file)?;
        if let Some((v, w)) = parse_cdbg_edge(&line, edges_file, line_number + 1, one_based)? {
            if v >= graph.size() || w >= graph.size() {
                return Err(Error::new(
                    ErrorKind::MissingReference,
                    format!(
                        "{}, line {}: edge references a unitig that was never defined",
                        edges_file,
                        line_number + 1
                    ),
                ));
            }
            graph.add_edge(v, w, 1.0);
        }
    }
    Ok(graph)
}

/**
Builds the edge-induced cdBG subgraph described by a single genome's edges
file.

The subgraph starts empty and is sized to the largest port referenced
(rounded up to a full port pair). Before each edge is added, an endpoint
whose vertex has no edges yet first receives its self-edge from the parent
cdBG, preserving the intrinsic vertex length inside the subgraph. An edges
file with no usable rows is an error: the subgraph would be empty.
*/
pub fn cdbg_subgraph_from_file(cdbg: &Graph, edges_file: &str) -> Result<Graph, Error> {
    if !cdbg.two_sided() {
        return Err(Error::new(
            ErrorKind::ConstructionFailure,
            "a cdBG subgraph requires a two-sided parent graph",
        ));
    }
    let mut graph = Graph::new(cdbg.one_based(), false);
    let mut edges = vec![];
    let mut max_v = 0;
    for (line_number, line) in read_lines(edges_file)?.enumerate() {
        let line = read_line(line, edges_file)?;
        if let Some((v, w)) =
            parse_cdbg_edge(&line, edges_file, line_number + 1, cdbg.one_based())?
        {
            if v >= cdbg.size() || w >= cdbg.size() {
                return Err(Error::new(
                    ErrorKind::MissingReference,
                    format!(
                        "{}, line {}: edge references a unitig that was never defined",
                        edges_file,
                        line_number + 1
                    ),
                ));
            }
            max_v = max_v.max(v).max(w);
            edges.push((v, w));
        }
    }
    if edges.is_empty() {
        return Err(Error::new(
            ErrorKind::MissingReference,
            format!("{}: single genome graph edges file has no edges", edges_file),
        ));
    }
    graph.resize((max_v | 1) + 1);

    for (v, w) in edges {
        // Carry the self-edges over from the parent graph.
        if graph.degree(v) == 0 {
            graph.add_edge(v, graph.other_side(v), cdbg.self_edge_weight(v));
        }
        if graph.degree(w) == 0 {
            graph.add_edge(w, graph.other_side(w), cdbg.self_edge_weight(w));
        }
        graph.add_edge(v, w, 1.0);
    }
    Ok(graph)
}

/// Parses a cdBG edge row into its two ports, or `None` for a row whose
/// overlap disqualifies it.
fn parse_cdbg_edge(
    line: &str,
    file: &str,
    line_number: usize,
    one_based: bool,
) -> Result<Option<(usize, usize)>, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(Error::malformed_line(
            file,
            line_number,
            "expected at least three fields: from to edge_type [overlap]",
        ));
    }
    if fields.len() >= 4 {
        let overlap = fields[3].parse::<i64>().map_err(|_| {
            Error::malformed_line(file, line_number, format!("invalid overlap {:?}", fields[3]))
        })?;
        if overlap != 0 {
            return Ok(None); // Overlapping links are not k-mer context edges.
        }
    }
    let from = parse_id(fields[0], one_based, file, line_number)?;
    let to = parse_id(fields[1], one_based, file, line_number)?;
    let edge_type = fields[2].as_bytes();
    if edge_type.len() != 2 {
        return Err(Error::malformed_line(
            file,
            line_number,
            format!("invalid edge type {:?}", fields[2]),
        ));
    }
    // An F* link leaves from's right port; a *R link enters to's right port.
    let v = 2 * from + (edge_type[0] == b'F') as usize;
    let w = 2 * to + (edge_type[1] == b'R') as usize;
    Ok(Some((v, w)))
}

fn parse_id(field: &str, one_based: bool, file: &str, line_number: usize) -> Result<usize, Error> {
    field
        .parse::<usize>()
        .ok()
        .and_then(|id| id.checked_sub(one_based as usize))
        .ok_or_else(|| {
            Error::malformed_line(file, line_number, format!("invalid node id {:?}", field))
        })
}

pub(crate) fn read_lines(file: &str) -> Result<std::io::Lines<BufReader<File>>, Error> {
    let f = File::open(file).map_err(|e| {
        Error::new(ErrorKind::MissingReference, format!("can't open {}: {}", file, e))
    })?;
    Ok(BufReader::new(f).lines())
}

pub(crate) fn read_line(line: std::io::Result<String>, file: &str) -> Result<String, Error> {
    line.map_err(|e| {
        Error::new(
            ErrorKind::MissingReference,
            format!("can't read {}: {}", file, e),
        )
    })
}
