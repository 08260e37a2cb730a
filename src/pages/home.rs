use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use log::error;

use crate::components::details_panel::DetailsPanel;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::legend::Legend;
use crate::components::paper_list::PaperList;
use crate::components::search_box::SearchBox;
use crate::config::AppConfig;
use crate::knowledge::{Detail, GraphEvent, LoadError, Panel, Session, View};
use crate::loader::fetch_session;

#[derive(Clone, Debug)]
enum LoadState {
	Loading,
	Ready(Arc<Session>),
	Failed(LoadError),
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let query = use_query_map();
	let url = config
		.with_data_url(query.with_untracked(|q| q.get(AppConfig::DATA_PARAM)))
		.data_url;

	let load = RwSignal::new(LoadState::Loading);
	spawn_local(async move {
		let next = match fetch_session(&url).await {
			Ok(session) => LoadState::Ready(Arc::new(session)),
			Err(err) => {
				error!("{err}");
				LoadState::Failed(err)
			}
		};
		load.set(next);
	});

	move || match load.get() {
		LoadState::Loading => view! {
			<div id="loader" class="loader">
				<p>"Loading knowledge graph..."</p>
			</div>
		}
		.into_any(),
		LoadState::Failed(err) => view! {
			<div id="loader" class="loader load-error">
				<p>"Failed to load the dataset."</p>
				<p>{err.to_string()}</p>
			</div>
		}
		.into_any(),
		LoadState::Ready(session) => view! { <Explorer session=session /> }.into_any(),
	}
}

/// Search panel, graph and inspector for a loaded session.
#[component]
fn Explorer(session: Arc<Session>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let overlay = RwSignal::new(session.clear_highlight());
	let listed = RwSignal::new(session.papers().to_vec());
	let detail = RwSignal::new(None::<Detail>);

	// Every interaction replaces the previous view wholesale.
	let apply = move |view: View| {
		match view.panel {
			Panel::Keep => {}
			Panel::Hide => detail.set(None),
			Panel::Show(shown) => detail.set(Some(shown)),
		}
		if let Some(papers) = view.papers {
			listed.set(papers);
		}
		overlay.set(view.overlay);
	};

	let graph = session.shared_graph();
	let graph = Signal::derive(move || Arc::clone(&graph));

	let on_event = {
		let session = Arc::clone(&session);
		Callback::new(move |event: GraphEvent| {
			if let Some(view) = session.handle_event(&event) {
				apply(view);
			}
		})
	};
	let on_search = {
		let session = Arc::clone(&session);
		Callback::new(move |keyword: String| apply(session.search(&keyword)))
	};
	let on_select = {
		let session = Arc::clone(&session);
		Callback::new(move |paper_id: String| {
			if let Some(view) = session.select(&paper_id) {
				apply(view);
			}
		})
	};
	let on_close = Callback::new(move |_: ()| apply(session.dismiss()));

	view! {
		<div class="explorer">
			<aside class="sidebar">
				<SearchBox on_search=on_search />
				<PaperList papers=listed limit=config.list_limit on_select=on_select />
			</aside>
			<main class="graph-area">
				<ForceGraphCanvas data=graph overlay=overlay on_event=on_event />
				<div class="graph-overlay">
					<Legend />
				</div>
				<DetailsPanel detail=detail on_close=on_close />
			</main>
		</div>
	}
}
