use crate::knowledge::{Category, EdgeStyle, GraphData, NodeStyle, NodeTint, VisualOverlay};
use crate::knowledge::highlight::MUTED_COLOR;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeOption {
	pub id: String,
	pub label: String,
	pub category: Category,
	pub size: f64,
	pub color: &'static str,
	pub opacity: f64,
}

impl NodeOption {
	pub fn radius(&self) -> f64 {
		self.size / 4.0
	}

	pub fn apply(&mut self, style: &NodeStyle) {
		self.opacity = style.opacity;
		self.color = match style.tint {
			NodeTint::Category => self.category.color(),
			NodeTint::Muted => MUTED_COLOR,
		};
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkOption {
	pub source: String,
	pub target: String,
	pub label: String,
	pub style: EdgeStyle,
}

/// Declarative description of everything the canvas draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphOptions {
	pub nodes: Vec<NodeOption>,
	pub links: Vec<LinkOption>,
}

impl GraphOptions {
	/// Merge an overlay into the current options. Only colour, opacity and
	/// line width change; ids, sizes and topology stay put. An overlay that
	/// does not line up with the options is ignored.
	pub fn merge(&mut self, overlay: &VisualOverlay) -> bool {
		if overlay.nodes.len() != self.nodes.len() || overlay.edges.len() != self.links.len() {
			return false;
		}
		for (node, style) in self.nodes.iter_mut().zip(&overlay.nodes) {
			node.apply(style);
		}
		for (link, style) in self.links.iter_mut().zip(&overlay.edges) {
			link.style = *style;
		}
		true
	}
}

impl From<&GraphData> for GraphOptions {
	fn from(graph: &GraphData) -> Self {
		Self {
			nodes: graph
				.nodes
				.values()
				.map(|node| NodeOption {
					id: node.id.clone(),
					label: node.name.clone(),
					category: node.category,
					size: node.size,
					color: node.category.color(),
					opacity: 1.0,
				})
				.collect(),
			links: graph
				.links
				.iter()
				.map(|link| LinkOption {
					source: link.source.clone(),
					target: link.target.clone(),
					label: link.label.clone(),
					style: link.style,
				})
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use proptest::prelude::*;

	use super::*;
	use crate::knowledge::{Session, clear_highlight, highlight};

	const CORPUS: &str = r#"[
		{"paper_id": "P1", "title": "T", "methods": ["UNet"],
		 "relations": [{"from": "P1", "to": "UNet", "type": "uses"},
		               {"from": "P1", "to": "MRI", "type": "uses"}]},
		{"paper_id": "P2", "title": "U", "datasets": ["ADNI"],
		 "relations": [{"from": "P2", "to": "ADNI", "type": "evaluated_on"},
		               {"from": "P2", "to": "UNet", "type": "extends"},
		               {"from": "UNet", "to": "UNet", "type": "refines"}]}
	]"#;

	fn options() -> (GraphData, GraphOptions) {
		let session = Session::from_json(
			r#"[{"paper_id": "P1", "title": "T",
				"relations": [{"from": "P1", "to": "MRI", "type": "uses"}]}]"#,
		)
		.unwrap();
		let graph = session.graph().clone();
		let options = GraphOptions::from(&graph);
		(graph, options)
	}

	#[test]
	fn translation_uses_category_palette() {
		let (_, options) = options();
		assert_eq!(options.nodes[0].color, Category::Paper.color());
		assert_eq!(options.nodes[1].color, Category::Modality.color());
		assert_eq!(options.nodes[0].radius(), 10.0);
		assert_eq!(options.links[0].label, "uses");
	}

	#[test]
	fn merge_then_clear_restores_palette() {
		let (graph, mut options) = options();
		let pristine = options.clone();
		assert!(options.merge(&highlight(&graph, &HashSet::from(["P1".to_string()]))));
		assert_eq!(options.nodes[1].color, MUTED_COLOR);
		assert_eq!(options.links[0].style.opacity, 0.05);
		assert!(options.merge(&clear_highlight(&graph)));
		assert_eq!(options, pristine);
	}

	proptest! {
		#[test]
		fn clear_after_any_highlight_restores_pristine_options(
			active in proptest::sample::subsequence(
				vec!["P1", "P2", "UNet", "MRI", "ADNI", "absent"],
				0..=6,
			),
		) {
			let graph = Session::from_json(CORPUS).unwrap().graph().clone();
			let pristine = GraphOptions::from(&graph);
			let active: HashSet<String> = active.into_iter().map(str::to_owned).collect();

			let mut options = pristine.clone();
			prop_assert!(options.merge(&highlight(&graph, &active)));
			let lit = graph
				.links
				.iter()
				.filter(|l| active.contains(&l.source) && active.contains(&l.target))
				.count();
			prop_assert_eq!(
				options.links.iter().filter(|l| l.style.width == 2.0).count(),
				lit
			);

			prop_assert!(options.merge(&clear_highlight(&graph)));
			prop_assert_eq!(options, pristine);
		}
	}
}
