//! Canvas force-directed graph: simulation, filtering, drawing and input.

mod component;
pub mod frame;
pub mod interaction;
pub mod render;
pub mod simulation;
mod state;
pub mod style;
mod types;
pub mod visibility;

pub use component::{ForceGraphCanvas, set_drag_cursor};
pub use simulation::{SimNode, Simulation, SimulationParameters};
pub use types::{GraphData, GraphEdge, GraphNode, NodeKind, Vec2};
pub use visibility::{GraphFilter, VisibleSet};
