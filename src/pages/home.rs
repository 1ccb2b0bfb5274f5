use leptos::prelude::*;

use crate::components::force_graph::{
	ForceGraphCanvas, GraphData, GraphFilter, NodeKind, VisibleSet,
};
use crate::data::{demo_graph, demo_papers};

/// One toggle button per node kind present in `data`, except `fixed`.
#[component]
pub fn KindFilters(
	#[prop(into)] data: Signal<GraphData>,
	filter: RwSignal<GraphFilter>,
	#[prop(optional)] fixed: Option<NodeKind>,
) -> impl IntoView {
	let kinds = move || data.with(|d| VisibleSet::toggle_kinds(d, fixed));

	view! {
		<div class="kind-filters">
			<For
				each=kinds
				key=|kind| *kind
				children=move |kind| {
					view! {
						<button
							class="filter-button"
							class:active=move || filter.with(|f| f.shows(kind))
							on:click=move |_| filter.update(|f| f.toggle(kind))
						>
							{kind.plural()}
						</button>
					}
				}
			/>
		</div>
	}
}

/// Graph explorer over the built-in demo graph.
#[component]
pub fn Home() -> impl IntoView {
	let data = demo_graph();
	let papers = demo_papers(&data);
	let graph_data = Signal::stored(data);
	let filter = RwSignal::new(GraphFilter::default());
	let (dragging, set_dragging) = signal(false);

	let focus_buttons = papers
		.into_iter()
		.map(|(id, label)| {
			let target = id.clone();
			view! {
				<button
					class="focus-button"
					class:active=move || filter.with(|f| f.focus.as_deref() == Some(id.as_str()))
					on:click=move |_| filter.update(|f| f.focus = Some(target.clone()))
				>
					{label}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="graph-page">
			<aside class="graph-sidebar">
				<h2>"Explore Connections"</h2>
				<h3>"Filters"</h3>
				<KindFilters data=graph_data filter=filter />
				<h3>"Focus"</h3>
				<div class="focus-list">
					<button
						class="focus-button"
						class:active=move || filter.with(|f| f.focus.is_none())
						on:click=move |_| filter.update(|f| f.focus = None)
					>
						"All papers"
					</button>
					{focus_buttons}
				</div>
				<p class="hint">
					{move || {
						if dragging.get() {
							"Release to let the layout settle."
						} else {
							"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
						}
					}}
				</p>
			</aside>
			<div class="graph-area">
				<ForceGraphCanvas
					data=graph_data
					filter=filter
					on_drag_change=Callback::new(move |active: bool| set_dragging.set(active))
				/>
			</div>
		</div>
	}
}
