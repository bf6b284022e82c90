use serde::Serialize;

use crate::edge::Edge;
use crate::metrics::Metrics;

/// An ordered edge sequence plus the metrics derived from it.
///
/// Metrics are always recomputed from the edges; there is no way to build a
/// plan with totals that disagree with its edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowPlan {
    edges: Vec<Edge>,
    metrics: Metrics,
}

impl FlowPlan {
    pub fn new(edges: Vec<Edge>) -> Self {
        let metrics = Metrics::from_edges(&edges);
        Self { edges, metrics }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<Edge> for FlowPlan {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
