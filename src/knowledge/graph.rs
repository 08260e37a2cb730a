//! Turns paper records into a deduplicated node set and a relation edge list.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::category::{Category, infer_category};
use super::record::{EntityKind, PaperRecord};

/// Display size of paper nodes.
pub const PAPER_NODE_SIZE: f64 = 40.0;
/// Display size of entity nodes.
pub const ENTITY_NODE_SIZE: f64 = 15.0;

/// Per-edge rendering hints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Bend of the drawn curve, as a fraction of the edge length.
	pub curvature: f64,
	/// Line width in screen pixels.
	pub width: f64,
	/// Alpha in `0.0..=1.0`.
	pub opacity: f64,
}

impl EdgeStyle {
	/// The style every edge is built with and returns to on clear.
	pub const BASELINE: EdgeStyle = EdgeStyle {
		curvature: 0.2,
		width: 1.0,
		opacity: 0.6,
	};
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self::BASELINE
	}
}

/// A paper or an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Paper id or entity name. Unique within a graph.
	pub id: String,
	/// Display label: the title for papers, the id otherwise.
	pub name: String,
	/// Category assigned when the node was first created.
	pub category: Category,
	/// [`PAPER_NODE_SIZE`] or [`ENTITY_NODE_SIZE`].
	pub size: f64,
	/// Set only on paper nodes.
	pub paper: Option<Arc<PaperRecord>>,
}

impl GraphNode {
	/// Whether this node stands for a loaded paper record.
	pub fn is_paper(&self) -> bool {
		self.category == Category::Paper && self.paper.is_some()
	}
}

/// One relation, directed from `source` to `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// Id of the origin node.
	pub source: String,
	/// Id of the destination node.
	pub target: String,
	/// Relation type, e.g. `uses`.
	pub label: String,
	/// Baseline rendering hints.
	pub style: EdgeStyle,
}

/// Nodes keyed by id in first-insertion order, plus every relation edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes keyed by id.
	pub nodes: IndexMap<String, GraphNode>,
	/// Edges in relation order, duplicates included.
	pub links: Vec<GraphEdge>,
}

impl GraphData {
	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.get(id)
	}

	/// Ids one hop away from `id`, following edges in both directions.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		let mut out: Vec<&str> = Vec::new();
		for link in &self.links {
			let other = if link.source == id {
				&link.target
			} else if link.target == id {
				&link.source
			} else {
				continue;
			};
			if !out.contains(&other.as_str()) {
				out.push(other);
			}
		}
		out
	}

	fn ensure_node(&mut self, id: &str, known: &HashMap<&str, Category>) {
		if self.nodes.contains_key(id) {
			return;
		}
		let category = known
			.get(id)
			.copied()
			.unwrap_or_else(|| infer_category(id));
		self.nodes.insert(
			id.to_owned(),
			GraphNode {
				id: id.to_owned(),
				name: id.to_owned(),
				category,
				size: ENTITY_NODE_SIZE,
				paper: None,
			},
		);
	}
}

/// Build the graph for `papers`, processed in order.
///
/// A node's category is fixed by whichever paper first mentions it. Entities
/// only become nodes when a relation references them; appearing in a typed
/// array merely tells the builder which category to give them.
pub fn build_graph(papers: &[Arc<PaperRecord>]) -> GraphData {
	let mut graph = GraphData::default();

	for paper in papers {
		if !paper.paper_id.is_empty() && !graph.nodes.contains_key(&paper.paper_id) {
			graph.nodes.insert(
				paper.paper_id.clone(),
				GraphNode {
					id: paper.paper_id.clone(),
					name: paper.title.clone(),
					category: Category::Paper,
					size: PAPER_NODE_SIZE,
					paper: Some(Arc::clone(paper)),
				},
			);
		}

		// Later arrays overwrite earlier ones for the same label.
		let mut known: HashMap<&str, Category> = HashMap::new();
		for kind in EntityKind::ALL {
			for label in paper.labels(kind) {
				known.insert(label, kind.category());
			}
		}

		for relation in &paper.relations {
			graph.ensure_node(&relation.from, &known);
			graph.ensure_node(&relation.to, &known);
			graph.links.push(GraphEdge {
				source: relation.from.clone(),
				target: relation.to.clone(),
				label: relation.kind.clone(),
				style: EdgeStyle::BASELINE,
			});
		}
	}

	graph
}
