use log::debug;

use super::simulation::Simulation;
use super::types::Vec2;

/// Drag state of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
	/// No node grabbed.
	#[default]
	Idle,
	/// `node` follows the pointer.
	Dragging {
		/// Simulation index of the grabbed node.
		node: usize,
	},
}

/// Grabs at most one node at a time and writes pointer positions into it.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	state: DragState,
}

impl DragController {
	/// Current state.
	pub fn state(&self) -> DragState {
		self.state
	}

	/// The grabbed node, if any.
	pub fn dragged(&self) -> Option<usize> {
		match self.state {
			DragState::Dragging { node } => Some(node),
			DragState::Idle => None,
		}
	}

	/// Pointer down over `hit`. Returns whether a drag started. Ignored while
	/// another drag is active.
	pub fn press(&mut self, hit: Option<usize>) -> bool {
		match (self.state, hit) {
			(DragState::Idle, Some(node)) => {
				debug!("Drag start on node {node}");
				self.state = DragState::Dragging { node };
				true
			}
			_ => false,
		}
	}

	/// Move the grabbed node to `point`. `None` means the pointer could not be
	/// mapped into simulation space.
	pub fn drag_to(&self, sim: &mut Simulation, point: Option<Vec2>) {
		if let (DragState::Dragging { node }, Some(point)) = (self.state, point) {
			sim.drag_to(node, point);
		}
	}

	/// Pointer up or leave. Returns whether a drag ended.
	pub fn release(&mut self) -> bool {
		match std::mem::take(&mut self.state) {
			DragState::Dragging { node } => {
				debug!("Drag end on node {node}");
				true
			}
			DragState::Idle => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::simulation::SimulationParameters;
	use crate::data::demo_graph;

	fn sim() -> Simulation {
		Simulation::from_data(&demo_graph(), SimulationParameters::default())
	}

	#[test]
	fn drag_sets_position_and_zeroes_velocity() {
		let data = demo_graph();
		let mut sim = sim();
		let mut drag = DragController::default();
		for _ in 0..5 {
			sim.step(&data.edges, None);
		}

		assert!(drag.press(Some(0)));
		drag.drag_to(&mut sim, Some(Vec2::new(100.0, 200.0)));
		assert_eq!(sim.nodes()[0].position, Vec2::new(100.0, 200.0));
		assert_eq!(sim.nodes()[0].velocity, Vec2::ZERO);

		sim.step(&data.edges, drag.dragged());
		assert_eq!(sim.nodes()[0].position, Vec2::new(100.0, 200.0));

		assert!(drag.release());
		assert_eq!(sim.nodes()[0].velocity, Vec2::ZERO);
		sim.step(&data.edges, drag.dragged());
		assert_ne!(sim.nodes()[0].position, Vec2::new(100.0, 200.0));
	}

	#[test]
	fn second_press_keeps_first_drag() {
		let mut sim = sim();
		let mut drag = DragController::default();

		assert!(drag.press(Some(0)));
		assert!(!drag.press(Some(1)));
		assert_eq!(drag.dragged(), Some(0));

		drag.drag_to(&mut sim, Some(Vec2::new(10.0, 20.0)));
		assert_eq!(sim.nodes()[0].position, Vec2::new(10.0, 20.0));

		assert!(drag.release());
		assert!(drag.press(Some(1)));
		assert_eq!(drag.dragged(), Some(1));
	}

	#[test]
	fn unmapped_pointer_is_a_no_op() {
		let mut sim = sim();
		let before = sim.nodes()[0].position;
		let mut drag = DragController::default();

		drag.press(Some(0));
		drag.drag_to(&mut sim, None);

		assert_eq!(sim.nodes()[0].position, before);
	}

	#[test]
	fn press_on_background_and_idle_release_do_nothing() {
		let mut drag = DragController::default();
		assert!(!drag.press(None));
		assert!(!drag.release());
		assert_eq!(drag.state(), DragState::Idle);
	}
}
