use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::simulation::Simulation;
use super::state::ForceGraphState;
use super::style::{node_style, relation_rgb};
use super::types::Vec2;
use super::visibility::VisibleSet;

/// A line between two simulated nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkPrimitive<'a> {
	/// Simulation index of the source node.
	pub source: usize,
	/// Simulation index of the target node.
	pub target: usize,
	/// Source position.
	pub from: Vec2,
	/// Target position.
	pub to: Vec2,
	/// Relation name, used for the stroke tint.
	pub relation: Option<&'a str>,
}

/// A node marker. Hidden markers stay in the scene but are not drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPrimitive<'a> {
	/// Simulation index of the node.
	pub index: usize,
	/// Center.
	pub position: Vec2,
	/// Radius from the node kind.
	pub radius: f64,
	/// Fill from the node kind.
	pub color: &'static str,
	/// Text shown on hover.
	pub label: &'a str,
	/// Passes the current filter.
	pub visible: bool,
}

/// Drawable primitives for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene<'a> {
	/// One line per visible edge with both endpoints present.
	pub links: Vec<LinkPrimitive<'a>>,
	/// One marker per simulated node, indexed like the simulation.
	pub markers: Vec<MarkerPrimitive<'a>>,
}

/// Map simulated nodes and the visible subset to primitives.
pub fn project<'a>(sim: &'a Simulation, visible: &'a VisibleSet) -> Scene<'a> {
	let links = visible
		.edges()
		.iter()
		.filter_map(|edge| {
			let (source, target) = sim.resolve(edge)?;
			Some(LinkPrimitive {
				source,
				target,
				from: sim.node(source)?.position,
				to: sim.node(target)?.position,
				relation: edge.relation.as_deref(),
			})
		})
		.collect();

	let markers = sim
		.nodes()
		.iter()
		.enumerate()
		.map(|(index, node)| {
			let style = node_style(node.kind);
			MarkerPrimitive {
				index,
				position: node.position,
				radius: style.radius,
				color: style.color,
				label: &node.label,
				visible: visible.contains(&node.id),
			}
		})
		.collect();

	Scene { links, markers }
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Draw one frame of `state` onto `ctx`.
pub(crate) fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let scene = project(&state.sim, &state.visible);
	ctx.set_fill_style_str("#f8fafc");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, &scene, ctx);
	draw_nodes(state, &scene, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 4.0 / k, 8.0 / k, 7.0 / k);
	let dash_offset = -(state.flow_time * 6.0 / k) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for link in &scene.links {
		let (dx, dy) = (link.to.x - link.from.x, link.to.y - link.from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (r1, r2) = (
			scene.markers[link.source].radius,
			scene.markers[link.target].radius,
		);
		if dist <= r1 + r2 + arrow_size {
			continue;
		}

		let is_highlighted =
			state.is_highlighted(link.source) && state.is_highlighted(link.target);

		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let (edge_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};
		let (r, g, b) = relation_rgb(link.relation);
		let (ux, uy) = (dx / dist, dy / dist);
		let (x1, y1) = (link.from.x + ux * r1, link.from.y + uy * r1);
		let (tip_x, tip_y) = (link.to.x - ux * r2, link.to.y - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);

		ctx.set_line_width(width);
		ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {})", edge_alpha * 0.6));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {edge_alpha})"));
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(back_x, back_y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&format!("rgba({r}, {g}, {b}, {edge_alpha})"));
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &ForceGraphState, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("600 {}px sans-serif", 13.0 / k.max(0.5));

	for marker in scene.markers.iter().filter(|m| m.visible) {
		if has_highlight && state.is_highlighted(marker.index) {
			continue;
		}
		let (alpha, radius) = if has_highlight {
			(1.0 - 0.7 * t, marker.radius * (1.0 - 0.15 * t))
		} else {
			(1.0, marker.radius)
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(marker.position.x, marker.position.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(marker.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);
	}

	if !has_highlight {
		return;
	}

	for marker in scene.markers.iter().filter(|m| m.visible) {
		let idx = marker.index;
		if !state.is_highlighted(idx) {
			continue;
		}
		let (x, y) = (marker.position.x, marker.position.y);
		let is_hovered = state.is_hovered(idx);

		let (radius, glow_radius) = if is_hovered {
			(marker.radius * (1.0 + 0.2 * t), marker.radius + 4.0 + 6.0 * t)
		} else {
			(marker.radius, marker.radius + 2.0 * t)
		};

		if t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius)
			{
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(37, 99, 235, {})", alpha));
				let _ = gradient.add_color_stop(1.0, "rgba(37, 99, 235, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(marker.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.9 * t));
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		// Labels only appear on hover, above the marker.
		ctx.set_font(&font);
		ctx.set_text_align("center");
		ctx.set_line_width(3.0 / k);
		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", t));
		let _ = ctx.stroke_text(marker.label, x, y - radius - 8.0 / k);
		ctx.set_fill_style_str(&format!("rgba(31, 41, 55, {})", t));
		let _ = ctx.fill_text(marker.label, x, y - radius - 8.0 / k);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::simulation::SimulationParameters;
	use crate::components::force_graph::types::{GraphData, GraphEdge, GraphNode, NodeKind};
	use crate::components::force_graph::visibility::GraphFilter;
	use crate::data::demo_graph;

	#[test]
	fn dangling_edge_is_not_projected() {
		let data = GraphData {
			nodes: vec![GraphNode::new("1", "One", NodeKind::Paper).at(10.0, 20.0)],
			edges: vec![GraphEdge::new("missing", "1")],
		};
		let mut sim = Simulation::from_data(&data, SimulationParameters::default());
		// Step with the raw edge list as well: neither path may choke on it.
		sim.step(&data.edges, None);
		let visible = VisibleSet::all(&data);

		let scene = project(&sim, &visible);

		assert!(scene.links.is_empty());
		assert_eq!(scene.markers.len(), 1);
		assert!(scene.markers[0].visible);
	}

	#[test]
	fn hidden_nodes_keep_their_markers() {
		let data = demo_graph();
		let sim = Simulation::from_data(&data, SimulationParameters::default());
		let mut filter = GraphFilter::default();
		filter.toggle(NodeKind::Concept);
		let visible = VisibleSet::compute(&data, &filter);

		let scene = project(&sim, &visible);

		assert_eq!(scene.markers.len(), 6);
		let shown: Vec<&str> = scene
			.markers
			.iter()
			.filter(|m| m.visible)
			.map(|m| m.label)
			.collect();
		assert_eq!(
			shown,
			["Attention Is All You Need", "BERT", "Generative Adversarial Networks"]
		);
		assert!(scene.links.is_empty());
	}

	#[test]
	fn markers_follow_kind_style_and_positions() {
		let data = demo_graph();
		let sim = Simulation::from_data(&data, SimulationParameters::default());
		let visible = VisibleSet::all(&data);

		let scene = project(&sim, &visible);

		assert_eq!(scene.links.len(), 5);
		assert_eq!(scene.links[0].from, Vec2::new(200.0, 300.0));
		assert_eq!(scene.links[0].to, Vec2::new(450.0, 200.0));
		assert_eq!(scene.markers[0].radius, 12.0);
		assert_eq!(scene.markers[1].radius, 8.0);
		assert_eq!(scene.markers[1].color, "#14b8a6");
	}

	#[test]
	fn projection_does_not_touch_state() {
		let data = demo_graph();
		let sim = Simulation::from_data(&data, SimulationParameters::default());
		let visible = VisibleSet::all(&data);
		let before = sim.nodes().to_vec();

		let first = project(&sim, &visible);
		let second = project(&sim, &visible);

		assert_eq!(first, second);
		assert_eq!(sim.nodes(), before.as_slice());
	}
}
