use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::{ApiConfig, fetch_graph};
use crate::components::force_graph::{ForceGraphCanvas, GraphData, GraphFilter, NodeKind};
use crate::pages::home::KindFilters;

/// Knowledge graph of one paper, loaded from the backend.
#[component]
pub fn PaperGraph() -> impl IntoView {
	let params = use_params_map();
	let paper_id = move || params.read().get("id").unwrap_or_default();

	let graph = LocalResource::new(move || {
		let id = paper_id();
		async move { fetch_graph(&ApiConfig::default(), &id).await }
	});

	let filter = RwSignal::new(GraphFilter::default());
	let graph_data = Signal::derive(move || match graph.get() {
		Some(Ok(data)) => data,
		_ => GraphData::default(),
	});

	// A new paper starts with every kind shown; papers have no toggle here.
	Effect::new(move |_| {
		paper_id();
		filter.set(GraphFilter::default());
	});

	let status = move || match graph.get() {
		None => Some("Loading graph visualization...".to_owned()),
		Some(Err(err)) => Some(err.to_string()),
		Some(Ok(_)) => None,
	};

	view! {
		<div class="graph-page">
			<aside class="graph-sidebar">
				<h2>"Knowledge Graph"</h2>
				<p class="paper-id">{paper_id}</p>
				<h3>"Filter by Type"</h3>
				<KindFilters data=graph_data filter=filter fixed=NodeKind::Paper />
				<button class="retry-button" on:click=move |_| graph.refetch()>
					"Reload"
				</button>
			</aside>
			<div class="graph-area">
				{move || status().map(|text| view! { <p class="graph-status">{text}</p> })}
				<ForceGraphCanvas data=graph_data filter=filter />
			</div>
		</div>
	}
}
