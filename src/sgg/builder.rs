use super::SingleGenomeGraph;
use crate::graph::builder::cdbg_subgraph_from_file;
use crate::types::NODE_ABSENT;
use crate::{Error, ErrorKind, Graph};

/**
Builds a path-compressed single genome graph from the edge-induced cdBG
subgraph described by `edges_file`.

A DFS walks the subgraph. Chains of degree-2 ports are contracted into
[CompressedPath](struct.CompressedPath.html)s carrying prefix sums of the
chain weights; every other reachable port becomes a non-path node of the
compressed graph. Interior ports never appear in the compressed adjacency;
a chain that loops back onto its own start node is registered as a closed
path without a macro-edge.

# Arguments

* `cdbg`: the two-sided parent graph; supplies self-edge weights.
* `edges_file`: the single genome's edges file.
*/
pub fn build_sgg(cdbg: &Graph, edges_file: &str) -> Result<SingleGenomeGraph, Error> {
    let subgraph = cdbg_subgraph_from_file(cdbg, edges_file)?;
    compress_subgraph(&subgraph)
}

/**
Compresses an edge-induced subgraph into a
[SingleGenomeGraph](struct.SingleGenomeGraph.html); ids of the subgraph
become the "original" port ids of the result. A subgraph with no connected
ports compresses to nothing, which is an error.
*/
pub fn compress_subgraph(subgraph: &Graph) -> Result<SingleGenomeGraph, Error> {
    let mut sgg = SingleGenomeGraph::default();
    sgg.resize_node_map(subgraph.size());

    let mut visited = vec![false; subgraph.size()];

    for v in 0..subgraph.size() {
        if visited[v] || subgraph.degree(v) == 0 {
            continue;
        }
        add_and_map_node(&mut sgg, v)?;
        visited[v] = true;
        let mut stack = vec![];
        push_neighbors(subgraph, &mut stack, v);
        while let Some((parent, mut w, mut weight)) = stack.pop() {
            if visited[w] {
                // The edge might not have been added yet; re-adding is a no-op.
                if !sgg.is_on_path(w) {
                    let (pv, pw) = (sgg.mapped_idx(parent), sgg.mapped_idx(w));
                    sgg.add_edge(pv, pw, weight);
                }
                continue;
            }
            if subgraph.degree(w) == 2 {
                // Contract the chain into a single edge, updating w and weight.
                let (end, total) = process_path(&mut sgg, subgraph, &mut visited, parent, w, weight)?;
                w = end;
                weight = total;
                if w == parent {
                    continue; // Chain looped back onto its start.
                }
            }
            if !sgg.is_mapped(w) {
                add_and_map_node(&mut sgg, w)?;
            }
            let (pv, pw) = (sgg.mapped_idx(parent), sgg.mapped_idx(w));
            sgg.add_edge(pv, pw, weight);
            push_neighbors(subgraph, &mut stack, w);
            visited[w] = true;
        }
    }

    if sgg.size() == 0 {
        return Err(Error::new(
            ErrorKind::ConstructionFailure,
            "single genome graph has no nodes",
        ));
    }
    Ok(sgg)
}

fn push_neighbors(
    subgraph: &Graph,
    stack: &mut Vec<(usize, usize, f64)>,
    original_idx: usize,
) {
    for &(neighbor_idx, weight) in subgraph.neighbors(original_idx) {
        stack.push((original_idx, neighbor_idx, weight));
    }
}

/// Registers a non-path node: the next free compressed id.
fn add_and_map_node(sgg: &mut SingleGenomeGraph, original_idx: usize) -> Result<(), Error> {
    map_node(sgg, original_idx, NODE_ABSENT, sgg.size())?;
    sgg.add_node();
    Ok(())
}

fn map_node(
    sgg: &mut SingleGenomeGraph,
    original_idx: usize,
    path_idx: usize,
    mapped_idx: usize,
) -> Result<(), Error> {
    if original_idx >= sgg.node_map_len() {
        return Err(Error::new(
            ErrorKind::CapacityUnset,
            format!(
                "node map holds {} ports but port {} was mapped",
                sgg.node_map_len(),
                original_idx
            ),
        ));
    }
    sgg.set_node_map(original_idx, path_idx, mapped_idx);
    Ok(())
}

/**
Walks a degree-2 chain starting at `w` (entered from `path_start_node`
with edge weight `weight`) until it reaches a port of degree != 2 or an
already-mapped port. Interior ports are mapped onto a new path with
accumulated prefix sums. Returns the walk's final port and the total
chain weight.
*/
fn process_path(
    sgg: &mut SingleGenomeGraph,
    subgraph: &Graph,
    visited: &mut [bool],
    path_start_node: usize,
    mut w: usize,
    mut weight: f64,
) -> Result<(usize, f64), Error> {
    let mut nodes_in_path = vec![w];
    let mut prefix_sums = vec![weight];
    let mut prev_node = path_start_node;

    while subgraph.degree(w) == 2 {
        let neighbors = subgraph.neighbors(w);
        let &(next, next_weight) = if neighbors[0].0 == prev_node {
            &neighbors[1]
        } else {
            &neighbors[0]
        };
        prev_node = w;
        w = next;
        weight = next_weight + prefix_sums[prefix_sums.len() - 1];
        nodes_in_path.push(w);
        prefix_sums.push(weight);
        if sgg.is_mapped(w) {
            break; // Reached the end of the chain, or found a loop.
        }
    }

    let new_path_idx = sgg.n_paths();
    for (i, &interior) in nodes_in_path[..nodes_in_path.len() - 1].iter().enumerate() {
        visited[interior] = true;
        map_node(sgg, interior, new_path_idx, i)?;
    }

    // The end node is added and mapped by the caller right after this
    // returns, so the next free compressed id is safe to use here.
    let mapped_path_end_node = if sgg.is_mapped(w) {
        sgg.mapped_idx(w)
    } else {
        sgg.size()
    };
    let mapped_start = sgg.mapped_idx(path_start_node);
    sgg.add_new_path(mapped_start, mapped_path_end_node, prefix_sums);
    Ok((w, weight))
}
