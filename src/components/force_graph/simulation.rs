//! Force-directed layout simulation.
//!
//! Every node is simulated, visible or not, so positions stay put across
//! filter changes. Link forces only act along the edges passed to
//! [`Simulation::step`], which callers restrict to the visible subset.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, warn};

use super::types::{GraphData, GraphEdge, NodeKind, Vec2};

const SEED_RADIUS: f64 = 100.0;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Tunable physics constants.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
	/// Pairwise repulsion, applied as `repulsion / d²`.
	pub repulsion: f64,
	/// Spring constant of link forces.
	pub link_strength: f64,
	/// Rest length of link springs.
	pub ideal_link_distance: f64,
	/// Pull toward `center`, proportional to distance.
	pub centering: f64,
	/// Velocity decay per step, below 1.
	pub damping: f64,
	/// Pair distances are clamped to at least this.
	pub min_distance: f64,
	/// Point nodes are pulled toward.
	pub center: Vec2,
	/// Size of the simulation area the view is fitted to.
	pub viewport: Vec2,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			repulsion: 1500.0,
			link_strength: 0.1,
			ideal_link_distance: 180.0,
			centering: 0.005,
			damping: 0.95,
			min_distance: 1.0,
			center: Vec2::new(450.0, 400.0),
			viewport: Vec2::new(900.0, 800.0),
		}
	}
}

/// A simulated node.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	/// Unique key.
	pub id: String,
	/// Display text.
	pub label: String,
	/// Category.
	pub kind: NodeKind,
	/// Current position.
	pub position: Vec2,
	/// Current velocity, carried across steps.
	pub velocity: Vec2,
}

/// Positions and velocities of the full node set.
#[derive(Clone, Debug)]
pub struct Simulation {
	nodes: Vec<SimNode>,
	index: HashMap<String, usize>,
	forces: Vec<Vec2>,
	params: SimulationParameters,
}

impl Simulation {
	/// Build the state for a dataset. Duplicate ids keep their first record.
	pub fn from_data(data: &GraphData, params: SimulationParameters) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		let count = data.nodes.len().max(1) as f64;

		for (i, node) in data.nodes.iter().enumerate() {
			if index.contains_key(&node.id) {
				warn!("Duplicate node id {:?}, keeping the first record", node.id);
				continue;
			}
			let position = node.preset_position().unwrap_or_else(|| {
				params.center + Vec2::from_angle(i as f64 * 2.0 * PI / count) * SEED_RADIUS
			});
			index.insert(node.id.clone(), nodes.len());
			nodes.push(SimNode {
				id: node.id.clone(),
				label: node.label.clone(),
				kind: node.kind,
				position,
				velocity: Vec2::ZERO,
			});
		}

		let dangling = data
			.edges
			.iter()
			.filter(|e| !index.contains_key(&e.source) || !index.contains_key(&e.target))
			.count();
		if dangling > 0 {
			debug!("{dangling} edge(s) reference unknown nodes and will be skipped");
		}

		Self {
			forces: vec![Vec2::ZERO; nodes.len()],
			nodes,
			index,
			params,
		}
	}

	/// Current parameters.
	pub fn params(&self) -> &SimulationParameters {
		&self.params
	}

	/// All simulated nodes, in load order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Node at `idx`.
	pub fn node(&self, idx: usize) -> Option<&SimNode> {
		self.nodes.get(idx)
	}

	/// Index of the node with `id`.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Endpoint indices of `edge`, if both exist.
	pub fn resolve(&self, edge: &GraphEdge) -> Option<(usize, usize)> {
		Some((self.index_of(&edge.source)?, self.index_of(&edge.target)?))
	}

	/// Number of simulated nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// No nodes loaded.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Sum of squared velocities.
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes.iter().map(|n| n.velocity.length_squared()).sum()
	}

	/// Pin node `idx` at `point` with zero velocity.
	pub fn drag_to(&mut self, idx: usize, point: Vec2) {
		if !point.is_finite() {
			return;
		}
		if let Some(node) = self.nodes.get_mut(idx) {
			node.position = point;
			node.velocity = Vec2::ZERO;
		}
	}

	/// Advance one step. Links act along `edges` only; `dragged` is held in
	/// place with zero velocity.
	pub fn step(&mut self, edges: &[GraphEdge], dragged: Option<usize>) {
		let n = self.nodes.len();
		self.forces.clear();
		self.forces.resize(n, Vec2::ZERO);
		let p = &self.params;

		for i in 0..n {
			let a = self.nodes[i].position;
			for j in (i + 1)..n {
				let delta = self.nodes[j].position - a;
				let length = delta.length();
				let dir = if length > 0.0 {
					delta * (1.0 / length)
				} else {
					// Coincident pair: separate along a fixed per-pair direction.
					Vec2::from_angle((i * n + j) as f64 * GOLDEN_ANGLE)
				};
				let d = length.max(p.min_distance);
				let push = dir * (p.repulsion / (d * d));
				self.forces[i] -= push;
				self.forces[j] += push;
			}
			self.forces[i] += (p.center - a) * p.centering;
		}

		for edge in edges {
			let Some((s, t)) = self.resolve(edge) else {
				continue;
			};
			let delta = self.nodes[t].position - self.nodes[s].position;
			let d = delta.length();
			if d == 0.0 {
				continue;
			}
			let pull = delta * ((d - p.ideal_link_distance) * p.link_strength / d);
			self.forces[s] += pull;
			self.forces[t] -= pull;
		}

		for (i, (node, force)) in self.nodes.iter_mut().zip(&self.forces).enumerate() {
			if dragged == Some(i) {
				node.velocity = Vec2::ZERO;
				continue;
			}
			let velocity = (node.velocity + *force) * p.damping;
			let position = node.position + velocity;
			if velocity.is_finite() && position.is_finite() {
				node.velocity = velocity;
				node.position = position;
			} else {
				node.velocity = Vec2::ZERO;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphNode;

	fn pair(a: Vec2, b: Vec2) -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("a", "A", NodeKind::Paper).at(a.x, a.y),
				GraphNode::new("b", "B", NodeKind::Concept).at(b.x, b.y),
			],
			edges: vec![GraphEdge::new("a", "b")],
		}
	}

	fn distance(sim: &Simulation) -> f64 {
		(sim.nodes()[1].position - sim.nodes()[0].position).length()
	}

	#[test]
	fn linked_pair_settles_near_ideal_distance() {
		let data = pair(Vec2::new(200.0, 400.0), Vec2::new(700.0, 400.0));
		let mut sim = Simulation::from_data(&data, SimulationParameters::default());

		sim.step(&data.edges, None);
		let early = sim.kinetic_energy();
		for _ in 0..2000 {
			sim.step(&data.edges, None);
		}

		let ideal = sim.params().ideal_link_distance;
		assert!((distance(&sim) - ideal).abs() <= 5.0, "distance {}", distance(&sim));
		assert!(sim.kinetic_energy() < early);
		assert!(sim.kinetic_energy() < 1e-6);
	}

	#[test]
	fn coincident_nodes_stay_finite_and_separate() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A", NodeKind::Paper).at(300.0, 300.0),
				GraphNode::new("b", "B", NodeKind::Paper).at(300.0, 300.0),
			],
			edges: vec![],
		};
		let mut sim = Simulation::from_data(&data, SimulationParameters::default());

		for _ in 0..1000 {
			sim.step(&data.edges, None);
			for node in sim.nodes() {
				assert!(node.position.is_finite());
				assert!(node.velocity.is_finite());
			}
		}
		assert!(distance(&sim) > 1.0);
	}

	#[test]
	fn dangling_edge_is_skipped() {
		let data = GraphData {
			nodes: vec![GraphNode::new("1", "One", NodeKind::Paper).at(450.0, 400.0)],
			edges: vec![GraphEdge::new("missing", "1")],
		};
		let mut sim = Simulation::from_data(&data, SimulationParameters::default());
		sim.step(&data.edges, None);

		assert_eq!(sim.nodes()[0].position, Vec2::new(450.0, 400.0));
		assert_eq!(sim.resolve(&data.edges[0]), None);
	}

	#[test]
	fn repulsion_is_symmetric() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A", NodeKind::Paper).at(440.0, 400.0),
				GraphNode::new("b", "B", NodeKind::Paper).at(460.0, 400.0),
			],
			edges: vec![],
		};
		let mut sim = Simulation::from_data(&data, SimulationParameters::default());
		sim.step(&[], None);

		let (a, b) = (&sim.nodes()[0], &sim.nodes()[1]);
		assert!(a.velocity.x < 0.0 && b.velocity.x > 0.0);
		assert!((a.velocity.x + b.velocity.x).abs() < 1e-12);
		assert_eq!(a.velocity.y, 0.0);
	}

	#[test]
	fn dragged_node_is_not_integrated() {
		let data = pair(Vec2::new(200.0, 400.0), Vec2::new(700.0, 400.0));
		let mut sim = Simulation::from_data(&data, SimulationParameters::default());
		sim.drag_to(0, Vec2::new(100.0, 200.0));

		for _ in 0..10 {
			sim.step(&data.edges, Some(0));
		}

		assert_eq!(sim.nodes()[0].position, Vec2::new(100.0, 200.0));
		assert_eq!(sim.nodes()[0].velocity, Vec2::ZERO);
		assert_ne!(sim.nodes()[1].position, Vec2::new(700.0, 400.0));
	}

	#[test]
	fn hidden_links_exert_no_force() {
		let data = pair(Vec2::new(200.0, 400.0), Vec2::new(700.0, 400.0));
		let mut linked = Simulation::from_data(&data, SimulationParameters::default());
		let mut unlinked = linked.clone();

		linked.step(&data.edges, None);
		unlinked.step(&[], None);

		assert!(distance(&linked) < distance(&unlinked));
	}

	#[test]
	fn seeds_missing_positions_around_center() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A", NodeKind::Paper),
				GraphNode::new("b", "B", NodeKind::Paper),
				GraphNode::new("a", "Duplicate", NodeKind::Method),
			],
			edges: vec![],
		};
		let params = SimulationParameters::default();
		let sim = Simulation::from_data(&data, params.clone());

		assert_eq!(sim.len(), 2);
		assert_eq!(sim.node(0).map(|n| n.label.as_str()), Some("A"));
		for node in sim.nodes() {
			assert!(((node.position - params.center).length() - SEED_RADIUS).abs() < 1e-9);
		}
	}
}
