//! The loaded dataset and the interactions on it.

use std::collections::HashSet;
use std::sync::Arc;

use super::category::Category;
use super::error::LoadError;
use super::graph::{GraphData, build_graph};
use super::highlight::{VisualOverlay, clear_highlight, highlight};
use super::record::{PaperRecord, parse_records};
use super::search::{FilterOutcome, filter_papers};
use super::selection::{Detail, select_node};

/// Events raised by the graph canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// A node was clicked.
	NodeClicked {
		/// Node id.
		id: String,
		/// Node category.
		category: Category,
		/// The record behind a paper node.
		paper: Option<Arc<PaperRecord>>,
	},
	/// An edge was clicked.
	EdgeClicked {
		/// Source node id.
		source: String,
		/// Target node id.
		target: String,
		/// Relation type.
		label: String,
	},
	/// A click that hit neither a node nor an edge.
	BackgroundClicked,
}

/// What to do with the details panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
	/// Leave it as it is.
	Keep,
	/// Close it.
	Hide,
	/// Open it with new contents.
	Show(Detail),
}

/// The complete visual response to one interaction. Each view supersedes
/// the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
	/// Details panel change.
	pub panel: Panel,
	/// `None` leaves the paper list as it is.
	pub papers: Option<Vec<Arc<PaperRecord>>>,
	/// Emphasis for the whole graph.
	pub overlay: VisualOverlay,
}

/// The loaded dataset and the graph built from it. Built once per load and
/// read by every interaction afterwards.
#[derive(Debug, Default)]
pub struct Session {
	papers: Vec<Arc<PaperRecord>>,
	graph: Arc<GraphData>,
}

impl Session {
	/// Take ownership of decoded records and build the graph.
	pub fn new(records: Vec<PaperRecord>) -> Self {
		let papers: Vec<Arc<PaperRecord>> = records.into_iter().map(Arc::new).collect();
		let graph = Arc::new(build_graph(&papers));
		Self { papers, graph }
	}

	/// Decode a dataset document and build its graph.
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		Ok(Self::new(parse_records(text)?))
	}

	/// Every loaded paper, in input order.
	pub fn papers(&self) -> &[Arc<PaperRecord>] {
		&self.papers
	}

	/// The graph built at load time.
	pub fn graph(&self) -> &GraphData {
		&self.graph
	}

	/// A handle to the graph for consumers that outlive a borrow.
	pub fn shared_graph(&self) -> Arc<GraphData> {
		Arc::clone(&self.graph)
	}

	/// See [`filter_papers`].
	pub fn filter(&self, keyword: &str) -> FilterOutcome {
		filter_papers(&self.papers, keyword)
	}

	/// See [`highlight`](super::highlight::highlight).
	pub fn highlight(&self, active: &HashSet<String>) -> VisualOverlay {
		highlight(&self.graph, active)
	}

	/// See [`clear_highlight`](super::highlight::clear_highlight).
	pub fn clear_highlight(&self) -> VisualOverlay {
		clear_highlight(&self.graph)
	}

	/// Search keystroke.
	pub fn search(&self, keyword: &str) -> View {
		let outcome = self.filter(keyword);
		View {
			panel: Panel::Keep,
			overlay: self.highlight(&outcome.active),
			papers: Some(outcome.papers),
		}
	}

	/// Close the inspector and return to the unfiltered view.
	pub fn dismiss(&self) -> View {
		View {
			panel: Panel::Hide,
			papers: Some(self.papers.clone()),
			overlay: self.clear_highlight(),
		}
	}

	/// React to a node click. Unknown ids produce no view.
	pub fn select(&self, id: &str) -> Option<View> {
		let node = self.graph.node(id)?;
		let selection = select_node(&self.graph, &self.papers, node);
		log::debug!(
			"selected {id:?} ({}), {} active nodes",
			node.category,
			selection.active.len()
		);
		Some(View {
			overlay: self.highlight(&selection.active),
			panel: Panel::Show(selection.detail),
			papers: selection.papers,
		})
	}

	/// Route a canvas event. Edge clicks change nothing.
	pub fn handle_event(&self, event: &GraphEvent) -> Option<View> {
		match event {
			GraphEvent::NodeClicked { id, .. } => self.select(id),
			GraphEvent::EdgeClicked { .. } => None,
			GraphEvent::BackgroundClicked => Some(self.dismiss()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::knowledge::highlight::NodeTint;

	const DATA: &str = r#"[
		{
			"paper_id": "P1",
			"title": "T",
			"methods": ["UNet"],
			"relations": [{"from": "P1", "to": "UNet", "type": "uses"}]
		},
		{
			"paper_id": "P2",
			"title": "Second",
			"methods": [{"name": "UNet"}],
			"relations": [{"from": "P2", "to": "UNet", "type": "extends"}]
		},
		{ "paper_id": "P3", "title": "Alone" }
	]"#;

	fn session() -> Session {
		Session::from_json(DATA).unwrap()
	}

	#[test]
	fn loads_and_builds_once() {
		let s = session();
		assert_eq!(s.papers().len(), 3);
		assert_eq!(s.graph().nodes.len(), 4);
		assert_eq!(s.graph().links.len(), 2);
	}

	#[test]
	fn rejects_non_array_document() {
		assert!(matches!(
			Session::from_json("{}"),
			Err(LoadError::Parse(_))
		));
	}

	#[test]
	fn paper_click_lights_neighbours_only() {
		let s = session();
		let view = s.select("P1").unwrap();
		assert!(matches!(view.panel, Panel::Show(Detail::Paper(_))));
		assert!(view.papers.is_none());
		let p1 = s.graph().nodes.get_index_of("P1").unwrap();
		let unet = s.graph().nodes.get_index_of("UNet").unwrap();
		assert_eq!(view.overlay.nodes[p1].tint, NodeTint::Muted);
		assert_eq!(view.overlay.nodes[unet].tint, NodeTint::Category);
	}

	#[test]
	fn isolated_paper_click_resets_highlight() {
		let s = session();
		let view = s.select("P3").unwrap();
		assert_eq!(view.overlay, s.clear_highlight());
	}

	#[test]
	fn entity_click_lists_mentioning_papers() {
		let s = session();
		let view = s.select("UNet").unwrap();
		let listed: Vec<_> = view
			.papers
			.unwrap()
			.iter()
			.map(|p| p.paper_id.clone())
			.collect();
		assert_eq!(listed, vec!["P1", "P2"]);
		assert!(view.overlay.nodes.iter().take(3).all(|n| n.opacity == 1.0));
		let p3 = s.graph().nodes.get_index_of("P3").unwrap();
		assert_eq!(view.overlay.nodes[p3].opacity, 0.1);
	}

	#[test]
	fn background_click_dismisses() {
		let s = session();
		let view = s.handle_event(&GraphEvent::BackgroundClicked).unwrap();
		assert_eq!(view.panel, Panel::Hide);
		assert_eq!(view.papers.map(|p| p.len()), Some(3));
		assert!(view.overlay.is_baseline(s.graph()));
		assert!(
			s.handle_event(&GraphEvent::EdgeClicked {
				source: "P1".into(),
				target: "UNet".into(),
				label: "uses".into(),
			})
			.is_none()
		);
		assert!(s.select("missing").is_none());
	}
}
