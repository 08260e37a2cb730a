use std::sync::Arc;

use leptos::prelude::*;

use crate::knowledge::PaperRecord;

const UNTITLED: &str = "Untitled";
const UNKNOWN_AUTHORS: &str = "Unknown authors";

/// Title and author line for one list row.
fn entry_text(paper: &PaperRecord) -> (String, String) {
	let title = if paper.title.is_empty() {
		UNTITLED.to_owned()
	} else {
		paper.title.clone()
	};
	let authors = if paper.authors.is_empty() {
		UNKNOWN_AUTHORS.to_owned()
	} else {
		paper.authors.join(", ")
	};
	(title, authors)
}

/// Scrollable list of papers, capped at `limit` rows. Clicking a row selects
/// that paper's node.
#[component]
pub fn PaperList(
	#[prop(into)] papers: Signal<Vec<Arc<PaperRecord>>>,
	limit: usize,
	#[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
	view! {
		<div id="paperList" class="paper-list">
			{move || {
				let papers = papers.get();
				if papers.is_empty() {
					return view! { <div class="paper-empty">"No matching papers"</div> }.into_any();
				}
				papers
					.iter()
					.take(limit)
					.map(|paper| {
						let id = paper.paper_id.clone();
						let (title, authors) = entry_text(paper);
						view! {
							<div class="paper-item" on:click=move |_| on_select.run(id.clone())>
								<div class="paper-title">{title}</div>
								<div class="paper-authors">{authors}</div>
							</div>
						}
					})
					.collect_view()
					.into_any()
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_fields_get_placeholders() {
		let (title, authors) = entry_text(&PaperRecord::default());
		assert_eq!(title, UNTITLED);
		assert_eq!(authors, UNKNOWN_AUTHORS);

		let paper = PaperRecord {
			title: "T".into(),
			authors: vec!["A".into(), "B".into()],
			..Default::default()
		};
		assert_eq!(entry_text(&paper), ("T".to_owned(), "A, B".to_owned()));
	}
}
