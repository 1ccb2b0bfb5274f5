//! Browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use paper_graph_canvas::api::ApiConfig;
use paper_graph_canvas::components::force_graph::frame::AnimationLoop;
use paper_graph_canvas::components::force_graph::set_drag_cursor;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, HtmlElement};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

async fn next_frames(n: usize) {
	for _ in 0..n {
		let promise = js_sys::Promise::new(&mut |resolve, _| {
			let _ = web_sys::window()
				.expect("window")
				.request_animation_frame(&resolve);
		});
		JsFuture::from(promise).await.expect("frame");
	}
}

#[wasm_bindgen_test]
async fn loop_runs_until_stopped() {
	let count = Rc::new(Cell::new(0));
	let counter = count.clone();
	let frames = AnimationLoop::start(move || counter.set(counter.get() + 1));

	next_frames(3).await;
	assert!(count.get() > 0);
	assert!(frames.is_running());

	frames.stop();
	frames.stop();
	let stopped_at = count.get();
	next_frames(3).await;
	assert_eq!(count.get(), stopped_at);
	assert!(!frames.is_running());
}

#[wasm_bindgen_test]
async fn dropping_the_loop_stops_it() {
	let count = Rc::new(Cell::new(0));
	let counter = count.clone();
	drop(AnimationLoop::start(move || counter.set(counter.get() + 1)));

	next_frames(3).await;
	assert_eq!(count.get(), 0);
}

#[wasm_bindgen_test]
fn graph_url_encodes_the_paper_id() {
	let config = ApiConfig::new("http://localhost:8000");
	assert_eq!(
		config.graph_url("a/b c"),
		"http://localhost:8000/api/v1/papers/a%2Fb%20c/graph"
	);
}

#[wasm_bindgen_test]
fn drag_cursor_follows_the_drag() {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.expect("document");
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.expect("canvas")
		.dyn_into()
		.expect("canvas element");
	document
		.body()
		.expect("body")
		.append_child(&canvas)
		.expect("mounted");
	let cursor = |canvas: &HtmlCanvasElement| {
		HtmlElement::style(canvas)
			.get_property_value("cursor")
			.expect("cursor")
	};

	set_drag_cursor(&canvas, true);
	assert_eq!(cursor(&canvas), "grabbing");

	set_drag_cursor(&canvas, false);
	assert_eq!(cursor(&canvas), "grab");

	canvas.remove();
}
