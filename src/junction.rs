use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::edge::{Edge, Stage};

/// Position of an edge in the working edge arena.
pub type EdgeId = usize;

/// Edge payload: where the edge lives in the arena and which leg it is.
#[derive(Debug, Clone, Copy)]
struct Incidence {
    position: EdgeId,
    stage: Stage,
}

/// All edges that must balance at one warehouse.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionGroup {
    pub junction: String,
    /// Arena positions, ascending.
    pub members: Vec<EdgeId>,
}

impl JunctionGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Site graph over an edge arena, built once per reconciliation.
///
/// Nodes are site ids, graph edges carry arena positions. A warehouse's
/// group is its incoming supply edges plus its outgoing distribution edges,
/// so every arena edge lands in exactly one group.
pub struct JunctionIndex {
    graph: DiGraph<String, Incidence>,
    /// Map from site id → NodeIndex for fast lookup.
    node_map: HashMap<String, NodeIndex>,
    /// Junction nodes in order of first appearance.
    junctions: Vec<NodeIndex>,
}

impl JunctionIndex {
    pub fn build(edges: &[Edge]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();
        let mut junctions = Vec::new();
        let mut seen = HashSet::new();

        let get_or_insert = |map: &mut HashMap<String, NodeIndex>,
                             g: &mut DiGraph<String, Incidence>,
                             id: &str|
         -> NodeIndex {
            *map.entry(id.to_string())
                .or_insert_with(|| g.add_node(id.to_string()))
        };

        for (position, edge) in edges.iter().enumerate() {
            let src = get_or_insert(&mut node_map, &mut graph, &edge.source_id);
            let dst = get_or_insert(&mut node_map, &mut graph, &edge.target_id);
            graph.add_edge(
                src,
                dst,
                Incidence {
                    position,
                    stage: edge.stage,
                },
            );

            let junction = match edge.stage {
                Stage::Supply => dst,
                Stage::Distribution => src,
            };
            if seen.insert(junction) {
                junctions.push(junction);
            }
        }

        Self {
            graph,
            node_map,
            junctions,
        }
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    pub fn groups(&self) -> Vec<JunctionGroup> {
        self.junctions
            .iter()
            .map(|&node| JunctionGroup {
                junction: self.graph[node].clone(),
                members: self.members(node),
            })
            .collect()
    }

    /// Group for a single site, if it acts as a junction.
    pub fn group(&self, site_id: &str) -> Option<JunctionGroup> {
        let &node = self.node_map.get(site_id)?;
        let members = self.members(node);
        if members.is_empty() {
            return None;
        }
        Some(JunctionGroup {
            junction: site_id.to_string(),
            members,
        })
    }

    fn members(&self, node: NodeIndex) -> Vec<EdgeId> {
        let inbound = self
            .graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| *e.weight())
            .filter(|inc| inc.stage == Stage::Supply);
        let outbound = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| *e.weight())
            .filter(|inc| inc.stage == Stage::Distribution);

        let mut members: Vec<EdgeId> = inbound.chain(outbound).map(|inc| inc.position).collect();
        members.sort_unstable();
        members
    }
}
