//! Keyword filtering of the paper list.

use std::collections::HashSet;
use std::sync::Arc;

use super::record::{EntityKind, PaperRecord};

/// Papers matched by a keyword and the node ids to emphasise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOutcome {
	/// Matching papers in input order.
	pub papers: Vec<Arc<PaperRecord>>,
	/// Empty when the keyword was blank.
	pub active: HashSet<String>,
}

/// Searchable text of a paper, space-joined.
///
/// Only title, DOI, authors, method, task and modality names, and innovation
/// descriptions are included. Datasets, anatomy and metrics are not.
pub fn search_text(paper: &PaperRecord) -> String {
	let mut parts = vec![paper.title.as_str(), paper.doi.as_str()];
	parts.extend(paper.authors.iter().map(String::as_str));
	for kind in [EntityKind::Method, EntityKind::Task, EntityKind::Modality] {
		parts.extend(paper.mentions(kind).iter().filter_map(|m| m.name()));
	}
	parts.extend(paper.innovations.iter().filter_map(|m| m.description()));
	parts.join(" ")
}

/// Case-insensitive substring search over [`search_text`]. Matched papers
/// and both ends of their relations that mention the keyword become active.
pub fn filter_papers(papers: &[Arc<PaperRecord>], keyword: &str) -> FilterOutcome {
	let keyword = keyword.trim().to_lowercase();
	if keyword.is_empty() {
		return FilterOutcome {
			papers: papers.to_vec(),
			active: HashSet::new(),
		};
	}

	let matched: Vec<Arc<PaperRecord>> = papers
		.iter()
		.filter(|paper| search_text(paper).to_lowercase().contains(&keyword))
		.cloned()
		.collect();

	let mut active = HashSet::new();
	for paper in &matched {
		active.insert(paper.paper_id.clone());
		for relation in &paper.relations {
			if relation.from.to_lowercase().contains(&keyword)
				|| relation.to.to_lowercase().contains(&keyword)
			{
				active.insert(relation.from.clone());
				active.insert(relation.to.clone());
			}
		}
	}

	log::debug!(
		"filter {keyword:?}: {} papers, {} active nodes",
		matched.len(),
		active.len()
	);
	FilterOutcome {
		papers: matched,
		active,
	}
}
