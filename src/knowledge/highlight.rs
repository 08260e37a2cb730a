//! Visual emphasis overlays.
//!
//! An overlay only ever carries opacity, colour and line width. Node size is
//! not part of the types, so an overlay can be patched onto a running layout.

use std::collections::HashSet;

use super::graph::{EdgeStyle, GraphData};

/// Colour given to nodes outside the activation set.
pub const MUTED_COLOR: &str = "#cccccc";

const ACTIVE_OPACITY: f64 = 1.0;
const MUTED_NODE_OPACITY: f64 = 0.1;
const ACTIVE_EDGE_WIDTH: f64 = 2.0;
const MUTED_EDGE_OPACITY: f64 = 0.05;
const MUTED_EDGE_WIDTH: f64 = 1.0;

/// Which colour a node is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTint {
	/// The node's category colour.
	Category,
	/// [`MUTED_COLOR`].
	Muted,
}

/// Emphasis for one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Alpha in `0.0..=1.0`.
	pub opacity: f64,
	/// Colour choice.
	pub tint: NodeTint,
}

impl NodeStyle {
	/// Unhighlighted look.
	pub const BASELINE: NodeStyle = NodeStyle {
		opacity: ACTIVE_OPACITY,
		tint: NodeTint::Category,
	};

	const MUTED: NodeStyle = NodeStyle {
		opacity: MUTED_NODE_OPACITY,
		tint: NodeTint::Muted,
	};
}

/// Styles for every node and edge, index-aligned with
/// [`GraphData::nodes`] and [`GraphData::links`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualOverlay {
	/// One entry per node.
	pub nodes: Vec<NodeStyle>,
	/// One entry per link.
	pub edges: Vec<EdgeStyle>,
}

impl VisualOverlay {
	/// Whether every element is at its built style.
	pub fn is_baseline(&self, graph: &GraphData) -> bool {
		*self == clear_highlight(graph)
	}
}

/// The pristine look: category colours at full opacity, edges at the style
/// they were built with.
pub fn clear_highlight(graph: &GraphData) -> VisualOverlay {
	VisualOverlay {
		nodes: vec![NodeStyle::BASELINE; graph.nodes.len()],
		edges: graph.links.iter().map(|link| link.style).collect(),
	}
}

/// Emphasise `active` and fade everything else.
///
/// An edge is emphasised only when both of its endpoints are active. An
/// empty set is treated as a reset and yields [`clear_highlight`].
pub fn highlight(graph: &GraphData, active: &HashSet<String>) -> VisualOverlay {
	if active.is_empty() {
		return clear_highlight(graph);
	}

	let nodes = graph
		.nodes
		.keys()
		.map(|id| {
			if active.contains(id) {
				NodeStyle::BASELINE
			} else {
				NodeStyle::MUTED
			}
		})
		.collect();

	let edges = graph
		.links
		.iter()
		.map(|link| {
			let lit = active.contains(&link.source) && active.contains(&link.target);
			EdgeStyle {
				opacity: if lit { ACTIVE_OPACITY } else { MUTED_EDGE_OPACITY },
				width: if lit { ACTIVE_EDGE_WIDTH } else { MUTED_EDGE_WIDTH },
				..link.style
			}
		})
		.collect();

	VisualOverlay { nodes, edges }
}
