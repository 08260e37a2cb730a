use leptos::prelude::*;

/// Keyword input. Fires on every keystroke.
#[component]
pub fn SearchBox(#[prop(into)] on_search: Callback<String>) -> impl IntoView {
	view! {
		<div class="search-box">
			<input
				id="searchInput"
				type="search"
				placeholder="Search title, author, DOI, method..."
				autocomplete="off"
				on:input=move |ev| on_search.run(event_target_value(&ev))
			/>
		</div>
	}
}
