use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::knowledge::{Detail, EntityDetail, PaperDetail};

fn paper_fields(detail: PaperDetail) -> impl IntoView {
	let PaperDetail {
		title,
		authors,
		doi,
		doi_href,
		category,
		innovations,
		methods,
		metrics,
	} = detail;
	let innovations = if innovations.is_empty() {
		view! { <li>"None"</li> }.into_any()
	} else {
		innovations
			.into_iter()
			.map(|text| view! { <li>{text}</li> })
			.collect_view()
			.into_any()
	};
	view! {
		<h2 id="detailTitle">{title}</h2>
		<p id="detailAuthors">{authors}</p>
		<p>
			"DOI: "
			<a id="detailDoi" href=doi_href target="_blank" rel="noopener">
				{doi}
			</a>
		</p>
		<p>"Category: " <span id="detailCategory">{category}</span></p>
		<h3>"Innovations"</h3>
		<ul id="detailInnovations">{innovations}</ul>
		<p>"Methods: " <span id="detailMethods">{methods}</span></p>
		<p>"Metrics: " <span id="detailMetrics">{metrics}</span></p>
	}
}

fn entity_fields(detail: EntityDetail) -> impl IntoView {
	view! {
		<h2 id="detailTitle">{detail.name}</h2>
		<p id="detailAuthors">{format!("Type: {}", detail.category)}</p>
		<p>"Category: " <span id="detailCategory">"-"</span></p>
		<ul id="detailInnovations"></ul>
		<p>"Methods: " <span id="detailMethods">"-"</span></p>
		<p>"Metrics: " <span id="detailMetrics">"-"</span></p>
	}
}

/// Inspector for the selected node. Hidden while `detail` is `None`.
#[component]
pub fn DetailsPanel(
	#[prop(into)] detail: Signal<Option<Detail>>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	move || {
		detail.get().map(|detail| {
			let body = match detail {
				Detail::Paper(paper) => paper_fields(paper).into_any(),
				Detail::Entity(entity) => entity_fields(entity).into_any(),
			};
			view! {
				<div id="detailsPanel" class="details-panel">
					<button
						id="closeDetailsBtn"
						class="close-btn"
						on:click=move |ev: MouseEvent| {
							ev.stop_propagation();
							on_close.run(());
						}
					>
						"×"
					</button>
					{body}
				</div>
			}
		})
	}
}
