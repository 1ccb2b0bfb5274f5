//! Client for the paper graph endpoint of the backend.

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::components::force_graph::GraphData;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors from fetching a paper graph.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
	/// Not running in a browser window.
	#[error("no browser window available")]
	NoWindow,
	/// The request could not be built or sent.
	#[error("request failed: {0}")]
	Transport(String),
	/// The server answered with a non-success status.
	#[error("{url} returned HTTP {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// The body was not a graph document.
	#[error("malformed graph response: {0}")]
	Decode(String),
	/// The paper has no graph.
	#[error("no graph data available for this paper")]
	EmptyGraph,
}

impl From<JsValue> for ApiError {
	fn from(value: JsValue) -> Self {
		ApiError::Transport(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	/// Base URL without a trailing slash.
	pub base_url: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new(option_env!("PAPER_GRAPH_API_URL").unwrap_or(DEFAULT_BASE_URL))
	}
}

impl ApiConfig {
	/// Config for `base_url`; a trailing slash is dropped.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url: String = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_owned(),
		}
	}

	/// URL of the graph of paper `paper_id`, which must already be
	/// URI-component encoded.
	pub fn graph_url_encoded(&self, paper_id: &str) -> String {
		format!("{}/api/v1/papers/{}/graph", self.base_url, paper_id)
	}

	/// URL of the graph of paper `paper_id`.
	pub fn graph_url(&self, paper_id: &str) -> String {
		let encoded: String = js_sys::encode_uri_component(paper_id).into();
		self.graph_url_encoded(&encoded)
	}
}

/// Parse a graph response body.
pub fn parse_graph(body: &str) -> Result<GraphData, ApiError> {
	let data: GraphData =
		serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
	if data.nodes.is_empty() {
		return Err(ApiError::EmptyGraph);
	}
	Ok(data)
}

/// GET the graph of paper `paper_id`.
pub async fn fetch_graph(config: &ApiConfig, paper_id: &str) -> Result<GraphData, ApiError> {
	let window = web_sys::window().ok_or(ApiError::NoWindow)?;
	let url = config.graph_url(paper_id);
	debug!("GET {url}");

	let init = RequestInit::new();
	init.set_method("GET");
	let request = Request::new_with_str_and_init(&url, &init)?;
	request.headers().set("Accept", "application/json")?;

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await?
		.dyn_into()?;
	if !response.ok() {
		let err = ApiError::Status {
			url,
			status: response.status(),
		};
		error!("{err}");
		return Err(err);
	}

	let body = JsFuture::from(response.text()?)
		.await?
		.as_string()
		.ok_or_else(|| ApiError::Decode("body is not text".into()))?;
	parse_graph(&body).inspect_err(|err| error!("Graph for {paper_id}: {err}"))
}
