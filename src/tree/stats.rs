//! Per-kind node counts

use super::visit_pre_order;
use crate::parser::ast::{NodeKind, Program};
use rustc_hash::FxHashMap;
use std::fmt;

/// Node counts of one tree, gathered in a single pre-order walk
#[derive(Debug, Default, Clone)]
pub struct NodeStats {
    counts: FxHashMap<NodeKind, usize>,
    total: usize,
    max_depth: usize,
}

impl NodeStats {
    pub fn collect(program: &Program) -> Self {
        let mut stats = NodeStats::default();
        visit_pre_order(program, |node, depth| {
            *stats.counts.entry(node.kind()).or_default() += 1;
            stats.total += 1;
            stats.max_depth = stats.max_depth.max(depth);
        });
        stats
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Deepest indentation level of the dump
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Non-zero counts, in [`NodeKind::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, usize)> + '_ {
        NodeKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .filter(|(_, count)| *count > 0)
    }
}

impl fmt::Display for NodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes: {} (max depth {})", self.total, self.max_depth)?;
        for (kind, count) in self.iter() {
            writeln!(f, "  {:<12} {}", kind.label(), count)?;
        }
        Ok(())
    }
}
