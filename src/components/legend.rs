use leptos::prelude::*;

use crate::knowledge::Category;

#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<ul class="graph-legend">
			{Category::ALL
				.iter()
				.map(|category| {
					view! {
						<li>
							<span
								class="legend-swatch"
								style=format!("background-color: {};", category.color())
							/>
							{category.label()}
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}
