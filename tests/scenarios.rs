use std::collections::HashSet;

use paper_graph_explorer::knowledge::{
	Category, Detail, EdgeStyle, GraphEvent, NodeTint, Panel, Session, infer_category,
};

const DATA: &str = r#"[
	{
		"paper_id": "P1",
		"title": "T",
		"methods": ["UNet"],
		"relations": [{"from": "P1", "to": "UNet", "type": "uses"}]
	},
	{
		"paper_id": "P2",
		"title": "Brain MRI segmentation",
		"authors": ["Li", "Wang", "Zhao", "Chen"],
		"doi": "10.1000/xyz",
		"imaging_modalities": [{"name": "MRI"}],
		"datasets": ["BraTS"],
		"innovations": [{"description": "attention gating"}],
		"relations": [
			{"from": "P2", "to": "MRI", "type": "uses"},
			{"from": "P2", "to": "BraTS", "type": "evaluated_on"},
			{"from": "P2", "to": "UNet", "type": "extends"}
		]
	}
]"#;

fn session() -> Session {
	Session::from_json(DATA).unwrap()
}

#[test]
fn single_paper_builds_two_nodes_and_one_edge() {
	let session = Session::from_json(
		r#"[{"paper_id": "P1", "title": "T", "methods": ["UNet"],
			"relations": [{"from": "P1", "to": "UNet", "type": "uses"}]}]"#,
	)
	.unwrap();
	let graph = session.graph();

	let ids: Vec<&str> = graph.nodes.keys().map(String::as_str).collect();
	assert_eq!(ids, vec!["P1", "UNet"]);
	let p1 = graph.node("P1").unwrap();
	assert_eq!((p1.category, p1.size, p1.name.as_str()), (Category::Paper, 40.0, "T"));
	let unet = graph.node("UNet").unwrap();
	assert_eq!((unet.category, unet.size), (Category::Method, 15.0));

	assert_eq!(graph.links.len(), 1);
	let edge = &graph.links[0];
	assert_eq!(
		(edge.source.as_str(), edge.target.as_str(), edge.label.as_str()),
		("P1", "UNet", "uses")
	);
	assert_eq!(edge.style, EdgeStyle::BASELINE);
}

#[test]
fn empty_keyword_behaves_like_clear() {
	let session = session();
	let outcome = session.filter("");
	assert_eq!(outcome.papers.len(), 2);
	assert!(outcome.active.is_empty());
	assert_eq!(session.highlight(&outcome.active), session.clear_highlight());

	let view = session.search("   ");
	assert_eq!(view.panel, Panel::Keep);
	assert!(view.overlay.is_baseline(session.graph()));
}

#[test]
fn dataset_only_keyword_matches_nothing() {
	let session = session();
	assert!(session.graph().node("BraTS").is_some());
	let outcome = session.filter("brats");
	assert!(outcome.papers.is_empty());
	assert!(outcome.active.is_empty());
}

#[test]
fn keyword_lights_paper_and_matching_relation_ends() {
	let session = session();
	let view = session.search("mri");
	let listed: Vec<&str> = view
		.papers
		.as_deref()
		.unwrap()
		.iter()
		.map(|p| p.paper_id.as_str())
		.collect();
	assert_eq!(listed, vec!["P2"]);

	let graph = session.graph();
	let tint = |id: &str| view.overlay.nodes[graph.nodes.get_index_of(id).unwrap()].tint;
	assert_eq!(tint("P2"), NodeTint::Category);
	assert_eq!(tint("MRI"), NodeTint::Category);
	assert_eq!(tint("UNet"), NodeTint::Muted);
	assert_eq!(tint("P1"), NodeTint::Muted);
}

#[test]
fn innovation_description_is_searchable() {
	let outcome = session().filter("Attention");
	assert_eq!(outcome.papers.len(), 1);
	assert_eq!(outcome.papers[0].paper_id, "P2");
}

#[test]
fn category_inference_examples() {
	assert_eq!(infer_category("MRI scan"), Category::Modality);
	assert_eq!(infer_category("Dice coefficient"), Category::Metric);
	assert_eq!(infer_category(""), Category::Unknown);
}

#[test]
fn clicking_an_entity_lists_every_paper_that_mentions_it() {
	let session = session();
	let unet = session.graph().node("UNet").unwrap();
	let view = session
		.handle_event(&GraphEvent::NodeClicked {
			id: unet.id.clone(),
			category: unet.category,
			paper: None,
		})
		.unwrap();

	match &view.panel {
		Panel::Show(Detail::Entity(detail)) => {
			assert_eq!(detail.name, "UNet");
			assert_eq!(detail.category, Category::Method);
		}
		other => panic!("unexpected panel {other:?}"),
	}
	// P2 only mentions UNet through a relation, not in its methods array.
	let listed: Vec<&str> = view
		.papers
		.as_deref()
		.unwrap()
		.iter()
		.map(|p| p.paper_id.as_str())
		.collect();
	assert_eq!(listed, vec!["P1"]);
}

#[test]
fn clicking_a_paper_shows_its_details_and_neighbours() {
	let session = session();
	let p2 = session.graph().node("P2").unwrap();
	let view = session
		.handle_event(&GraphEvent::NodeClicked {
			id: p2.id.clone(),
			category: p2.category,
			paper: p2.paper.clone(),
		})
		.unwrap();

	let Panel::Show(Detail::Paper(detail)) = &view.panel else {
		panic!("expected paper details");
	};
	assert_eq!(detail.title, "Brain MRI segmentation");
	assert_eq!(detail.doi, "10.1000/xyz");
	assert_eq!(detail.innovations, vec!["attention gating".to_string()]);
	assert!(view.papers.is_none());

	let graph = session.graph();
	let expected: HashSet<&str> = ["MRI", "BraTS", "UNet"].into();
	for (id, style) in graph.nodes.keys().zip(&view.overlay.nodes) {
		assert_eq!(style.opacity == 1.0, expected.contains(id.as_str()), "{id}");
	}
}

#[test]
fn background_click_restores_everything() {
	let session = session();
	let _ = session.search("mri");
	let view = session.handle_event(&GraphEvent::BackgroundClicked).unwrap();
	assert_eq!(view.panel, Panel::Hide);
	assert_eq!(view.papers.map(|p| p.len()), Some(2));
	assert!(view.overlay.is_baseline(session.graph()));
}
