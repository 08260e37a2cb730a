//! What happens when a node is picked: the inspector contents, the paper
//! subset to list, and the nodes to emphasise.

use std::collections::HashSet;
use std::sync::Arc;

use super::category::Category;
use super::graph::{GraphData, GraphEdge, GraphNode};
use super::record::{EntityKind, PaperRecord};

const DOI_RESOLVER: &str = "https://doi.org/";
const TOOLTIP_AUTHORS: usize = 3;

/// Inspector fields for a paper.
#[derive(Clone, Debug, PartialEq)]
pub struct PaperDetail {
	/// Paper title.
	pub title: String,
	/// Authors joined by `, `.
	pub authors: String,
	/// `-` when the record has no DOI.
	pub doi: String,
	/// Link target for the DOI.
	pub doi_href: Option<String>,
	/// Subject area or `-`.
	pub category: String,
	/// Innovation descriptions, one per list item.
	pub innovations: Vec<String>,
	/// Method names joined by `, `, or `-`.
	pub methods: String,
	/// `name: value` pairs joined by `, `, or `-`.
	pub metrics: String,
}

impl PaperDetail {
	/// Format a record for display.
	pub fn from_paper(paper: &PaperRecord) -> Self {
		let doi_href = (!paper.doi.is_empty()).then(|| {
			if paper.doi.starts_with("http") {
				paper.doi.clone()
			} else {
				format!("{DOI_RESOLVER}{}", paper.doi)
			}
		});
		Self {
			title: paper.title.clone(),
			authors: paper.authors.join(", "),
			doi: or_dash(paper.doi.clone()),
			doi_href,
			category: or_dash(paper.category.clone()),
			innovations: paper
				.innovations
				.iter()
				.filter_map(|m| m.description())
				.map(str::to_owned)
				.collect(),
			methods: or_dash(join(paper.methods.iter().filter_map(|m| m.name()))),
			metrics: or_dash(
				paper
					.metrics
					.iter()
					.filter_map(|m| m.with_value())
					.collect::<Vec<_>>()
					.join(", "),
			),
		}
	}
}

/// Inspector fields for an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDetail {
	/// Entity name.
	pub name: String,
	/// Category of the node.
	pub category: Category,
}

/// Contents of the details panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Detail {
	/// A paper was picked.
	Paper(PaperDetail),
	/// An entity was picked.
	Entity(EntityDetail),
}

/// Result of clicking a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
	/// Panel contents.
	pub detail: Detail,
	/// Replacement for the paper list, if the click narrows it.
	pub papers: Option<Vec<Arc<PaperRecord>>>,
	/// Node ids to emphasise.
	pub active: HashSet<String>,
}

/// Paper click: show the paper and light up its direct neighbours.
/// Entity click: list the papers that mention the entity and light up those
/// papers together with the entity itself.
pub fn select_node(graph: &GraphData, papers: &[Arc<PaperRecord>], node: &GraphNode) -> Selection {
	match &node.paper {
		Some(paper) if node.category == Category::Paper => Selection {
			detail: Detail::Paper(PaperDetail::from_paper(paper)),
			papers: None,
			active: graph
				.neighbors(&node.id)
				.into_iter()
				.map(str::to_owned)
				.collect(),
		},
		_ => {
			let mentioning = papers_mentioning(papers, &node.name);
			let mut active: HashSet<String> =
				mentioning.iter().map(|p| p.paper_id.clone()).collect();
			active.insert(node.id.clone());
			Selection {
				detail: Detail::Entity(EntityDetail {
					name: node.name.clone(),
					category: node.category,
				}),
				papers: Some(mentioning),
				active,
			}
		}
	}
}

/// Papers whose method, task, modality, dataset or innovation arrays carry
/// an item naming `label`.
pub fn papers_mentioning(papers: &[Arc<PaperRecord>], label: &str) -> Vec<Arc<PaperRecord>> {
	const SEARCHED: [EntityKind; 5] = [
		EntityKind::Method,
		EntityKind::Task,
		EntityKind::Modality,
		EntityKind::Dataset,
		EntityKind::Innovation,
	];
	papers
		.iter()
		.filter(|paper| {
			SEARCHED
				.iter()
				.any(|&kind| paper.mentions(kind).iter().any(|m| m.refers_to(label)))
		})
		.cloned()
		.collect()
}

/// Hover text for a node.
pub fn node_tooltip(node: &GraphNode) -> String {
	let mut text = format!("{}\nType: {}", node.name, node.category);
	if let Some(paper) = node.paper.as_deref().filter(|_| node.is_paper()) {
		text.push_str(&format!("\nDOI: {}", paper.doi));
		if !paper.authors.is_empty() {
			let shown: Vec<&str> = paper
				.authors
				.iter()
				.take(TOOLTIP_AUTHORS)
				.map(String::as_str)
				.collect();
			text.push_str(&format!("\nAuthors: {}...", shown.join(", ")));
		}
	}
	text
}

/// Hover text for an edge.
pub fn edge_tooltip(edge: &GraphEdge) -> String {
	format!("{} --[{}]--> {}", edge.source, edge.label, edge.target)
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
	items.collect::<Vec<_>>().join(", ")
}

fn or_dash(text: String) -> String {
	if text.is_empty() { "-".into() } else { text }
}
