//! Marker radius and color per node kind.

use super::types::NodeKind;

/// Visual record for one node kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Marker radius in simulation units.
	pub radius: f64,
	/// Fill color.
	pub color: &'static str,
}

/// Look up the style of a kind.
pub const fn node_style(kind: NodeKind) -> NodeStyle {
	match kind {
		NodeKind::Paper => NodeStyle {
			radius: 12.0,
			color: "#2563eb",
		},
		NodeKind::Author => NodeStyle {
			radius: 10.0,
			color: "#f59e0b",
		},
		NodeKind::Concept => NodeStyle {
			radius: 8.0,
			color: "#14b8a6",
		},
		NodeKind::Method => NodeStyle {
			radius: 8.0,
			color: "#6366f1",
		},
		NodeKind::Dataset => NodeStyle {
			radius: 8.0,
			color: "#ec4899",
		},
		NodeKind::Metric => NodeStyle {
			radius: 8.0,
			color: "#06b6d4",
		},
		NodeKind::Other => NodeStyle {
			radius: 8.0,
			color: "#64748b",
		},
	}
}

/// Stroke color (r, g, b) for an edge relation name.
pub fn relation_rgb(relation: Option<&str>) -> (u8, u8, u8) {
	match relation {
		Some("AUTHORED_BY" | "AUTHORED") => (245, 158, 11),
		Some("INTRODUCES") => (16, 185, 129),
		Some("PROPOSES") => (139, 92, 246),
		Some("EVALUATES_ON") => (236, 72, 153),
		Some("USES_METRIC") => (6, 182, 212),
		_ => (148, 163, 184),
	}
}
