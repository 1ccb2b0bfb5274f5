use std::collections::HashSet;

use log::info;

use super::interaction::DragController;
use super::simulation::{Simulation, SimulationParameters};
use super::style::node_style;
use super::types::{GraphData, Vec2};
use super::visibility::{GraphFilter, VisibleSet};

/// Extra pick distance around a marker, in simulation units.
pub const HIT_PADDING: f64 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Scale `viewport` to fit a `width` x `height` surface, centered.
	pub fn fit(viewport: Vec2, width: f64, height: f64) -> Self {
		if viewport.x <= 0.0 || viewport.y <= 0.0 || width <= 0.0 || height <= 0.0 {
			return Self::default();
		}
		let k = (width / viewport.x).min(height / viewport.y);
		Self {
			x: (width - viewport.x * k) / 2.0,
			y: (height - viewport.y * k) / 2.0,
			k,
		}
	}

	fn is_valid(&self) -> bool {
		self.x.is_finite() && self.y.is_finite() && self.k.is_finite() && self.k > 0.0
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub sim: Simulation,
	pub visible: VisibleSet,
	pub transform: ViewTransform,
	pub drag: DragController,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	data: GraphData,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		filter: &GraphFilter,
		params: SimulationParameters,
		width: f64,
		height: f64,
	) -> Self {
		let transform = ViewTransform::fit(params.viewport, width, height);
		let sim = Simulation::from_data(data, params);
		let visible = VisibleSet::compute(data, filter);
		info!(
			"Graph loaded: {} nodes, {} edges, {} visible",
			sim.len(),
			data.edges.len(),
			visible.len()
		);

		Self {
			sim,
			visible,
			transform,
			drag: DragController::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			data: data.clone(),
		}
	}

	/// Replace the whole graph, keeping the surface size. Returns whether a
	/// drag was in progress; the new state starts idle.
	pub fn rebuild(
		&mut self,
		data: &GraphData,
		filter: &GraphFilter,
		params: SimulationParameters,
	) -> bool {
		let was_dragging = self.drag.dragged().is_some();
		*self = Self::new(data, filter, params, self.width, self.height);
		was_dragging
	}

	/// Recompute the visible subset. Positions and velocities are untouched.
	pub fn set_filter(&mut self, filter: &GraphFilter) {
		self.visible = VisibleSet::compute(&self.data, filter);
		let hovered = self.hover.node;
		if let Some(idx) = hovered {
			if !self.is_visible(idx) {
				self.set_hover(None);
			} else {
				self.hover.node = None;
				self.set_hover(Some(idx));
			}
		}
	}

	pub fn is_visible(&self, idx: usize) -> bool {
		self.sim
			.node(idx)
			.is_some_and(|node| self.visible.contains(&node.id))
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Option<Vec2> {
		if self.width <= 0.0 || self.height <= 0.0 || !self.transform.is_valid() {
			return None;
		}
		let point = Vec2::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		);
		point.is_finite().then_some(point)
	}

	/// Closest visible node under the pointer.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let point = self.screen_to_graph(sx, sy)?;
		self.sim
			.nodes()
			.iter()
			.enumerate()
			.filter(|(_, node)| self.visible.contains(&node.id))
			.map(|(idx, node)| (idx, (node.position - point).length(), node_style(node.kind)))
			.filter(|(_, dist, style)| *dist < style.radius + HIT_PADDING)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, ..)| idx)
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out.
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for (src, tgt) in self.visible.edges().iter().filter_map(|e| self.sim.resolve(e)) {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Pointer down in surface coordinates. Returns whether a drag started.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> bool {
		if self.drag.dragged().is_some() {
			return false;
		}
		let hit = self.node_at_position(sx, sy);
		if self.drag.press(hit) {
			let point = self.screen_to_graph(sx, sy);
			self.drag.drag_to(&mut self.sim, point);
			return true;
		}
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
		false
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.dragged().is_some() {
			let point = self.screen_to_graph(sx, sy);
			self.drag.drag_to(&mut self.sim, point);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		} else {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}
	}

	/// Pointer up. Returns whether a drag ended.
	pub fn pointer_up(&mut self) -> bool {
		self.pan.active = false;
		self.drag.release()
	}

	/// Pointer left the surface. Returns whether a drag ended.
	pub fn pointer_leave(&mut self) -> bool {
		self.set_hover(None);
		self.pointer_up()
	}

	/// Zoom about the pointer; positive `delta_y` zooms out.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.sim.step(self.visible.edges(), self.drag.dragged());
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.transform = ViewTransform::fit(self.sim.params().viewport, width, height);
	}
}
