use std::collections::HashSet;
use std::sync::Arc;

use paper_graph_explorer::knowledge::{
	EdgeStyle, EntityMention, NodeTint, PaperRecord, Relation, build_graph, highlight,
};
use proptest::prelude::*;

// A small id space so papers, entities and relation endpoints collide often.
fn ident() -> impl Strategy<Value = String> {
	prop_oneof![
		"P[0-4]".prop_map(String::from),
		"(UNet|MRI scan|Dice|ADNI|CT|lesion detection|X)".prop_map(String::from),
	]
}

fn mention() -> impl Strategy<Value = EntityMention> {
	prop_oneof![
		ident().prop_map(EntityMention::PlainName),
		ident().prop_map(|name| EntityMention::NamedEntity {
			name,
			description: None,
			value: None,
		}),
		ident().prop_map(|description| EntityMention::DescribedEntity { description }),
	]
}

fn relation() -> impl Strategy<Value = Relation> {
	(ident(), ident(), "(uses|cites|evaluates)").prop_map(|(from, to, kind)| Relation {
		from,
		to,
		kind,
	})
}

fn paper() -> impl Strategy<Value = PaperRecord> {
	(
		"P[0-4]",
		proptest::collection::vec(mention(), 0..3),
		proptest::collection::vec(mention(), 0..3),
		proptest::collection::vec(mention(), 0..3),
		proptest::collection::vec(relation(), 0..5),
	)
		.prop_map(|(paper_id, methods, datasets, innovations, relations)| PaperRecord {
			title: format!("Title {paper_id}"),
			paper_id,
			methods,
			datasets,
			innovations,
			relations,
			..Default::default()
		})
}

fn papers() -> impl Strategy<Value = Vec<Arc<PaperRecord>>> {
	proptest::collection::vec(paper().prop_map(Arc::new), 0..6)
}

fn active_set() -> impl Strategy<Value = HashSet<String>> {
	proptest::collection::hash_set(ident(), 0..6)
}

proptest! {
	#[test]
	fn prop_node_ids_unique_and_edges_closed(papers in papers()) {
		let graph = build_graph(&papers);
		let mut seen = HashSet::new();
		for (key, node) in &graph.nodes {
			prop_assert_eq!(key, &node.id);
			prop_assert!(seen.insert(node.id.clone()));
		}
		for link in &graph.links {
			prop_assert!(graph.nodes.contains_key(&link.source));
			prop_assert!(graph.nodes.contains_key(&link.target));
		}
		let relation_count: usize = papers.iter().map(|p| p.relations.len()).sum();
		prop_assert_eq!(graph.links.len(), relation_count);
	}

	#[test]
	fn prop_build_is_deterministic(papers in papers()) {
		prop_assert_eq!(build_graph(&papers), build_graph(&papers));
	}

	#[test]
	fn prop_highlight_rule(papers in papers(), active in active_set()) {
		prop_assume!(!active.is_empty());
		let graph = build_graph(&papers);
		let overlay = highlight(&graph, &active);
		prop_assert_eq!(overlay.nodes.len(), graph.nodes.len());
		prop_assert_eq!(overlay.edges.len(), graph.links.len());

		for (id, style) in graph.nodes.keys().zip(&overlay.nodes) {
			if active.contains(id) {
				prop_assert_eq!(style.opacity, 1.0);
				prop_assert_eq!(style.tint, NodeTint::Category);
			} else {
				prop_assert_eq!(style.opacity, 0.1);
				prop_assert_eq!(style.tint, NodeTint::Muted);
			}
		}
		for (link, style) in graph.links.iter().zip(&overlay.edges) {
			let lit = active.contains(&link.source) && active.contains(&link.target);
			prop_assert_eq!(style.opacity, if lit { 1.0 } else { 0.05 });
			prop_assert_eq!(style.width, if lit { 2.0 } else { 1.0 });
			prop_assert_eq!(style.curvature, EdgeStyle::BASELINE.curvature);
		}
	}
}
