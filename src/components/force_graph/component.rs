use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::frame::AnimationLoop;
use super::render;
use super::simulation::SimulationParameters;
use super::state::ForceGraphState;
use super::types::GraphData;
use super::visibility::GraphFilter;

const FRAME_DT: f64 = 1.0 / 60.0;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

/// Resources tied to the mounted canvas.
struct Mounted {
	_frames: AnimationLoop,
	resize: Option<Closure<dyn FnMut()>>,
}

impl Drop for Mounted {
	fn drop(&mut self) {
		if let (Some(cb), Some(window)) = (&self.resize, web_sys::window()) {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn surface_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Show the grab or grabbing cursor on `canvas`.
pub fn set_drag_cursor(canvas: &HtmlCanvasElement, dragging: bool) {
	let cursor = if dragging { "grabbing" } else { "grab" };
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor);
}

/// Interactive force-directed graph on a canvas.
///
/// Replacing `data` rebuilds the simulation. Changing `filter` only changes
/// what is shown; the layout keeps running undisturbed.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into, default = Signal::stored(GraphFilter::default()))] filter: Signal<GraphFilter>,
	#[prop(optional)] params: Option<SimulationParameters>,
	#[prop(optional)] on_drag_change: Option<Callback<bool>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let params = params.unwrap_or_default();
	let state: SharedState = Rc::new(RefCell::new(None));
	let mounted = StoredValue::new_local(None::<Mounted>);

	let (state_init, params_init) = (state.clone(), params.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("Canvas 2d context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(
			&data.get_untracked(),
			&filter.get_untracked(),
			params_init.clone(),
			w,
			h,
		));

		let resize = fullscreen.then(|| {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			cb
		});

		let state_anim = state_init.clone();
		let frames = AnimationLoop::start(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
		});
		mounted.set_value(Some(Mounted {
			_frames: frames,
			resize,
		}));
	});

	on_cleanup(move || {
		mounted.try_update_value(|m| m.take());
	});

	let notify = move |dragging: bool| {
		if let Some(canvas) = canvas_ref.get_untracked() {
			set_drag_cursor(&canvas, dragging);
		}
		if let Some(cb) = on_drag_change {
			cb.run(dragging);
		}
	};

	let state_data = state.clone();
	Effect::new(move |prev: Option<()>| {
		let data = data.get();
		if prev.is_none() {
			return;
		}
		let drag_ended = state_data
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.rebuild(&data, &filter.get_untracked(), params.clone()));
		if drag_ended {
			notify(false);
		}
	});

	let state_filter = state.clone();
	Effect::new(move |_| {
		let filter = filter.get();
		if let Some(ref mut s) = *state_filter.borrow_mut() {
			s.set_filter(&filter);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = surface_point(canvas_ref, &ev) else {
			return;
		};
		let started = state_md
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.pointer_down(x, y));
		if started {
			notify(true);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = surface_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let ended = state_mu
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.pointer_up());
		if ended {
			notify(false);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let ended = state_ml
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.pointer_leave());
		if ended {
			notify(false);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = surface_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
