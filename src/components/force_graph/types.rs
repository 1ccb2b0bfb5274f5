use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Deserializer};

/// Entity category of a graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
	/// A research paper.
	Paper,
	/// A paper author.
	Author,
	/// A concept introduced or used by a paper.
	Concept,
	/// A method proposed by a paper.
	Method,
	/// A dataset a paper evaluates on.
	Dataset,
	/// A metric a paper reports.
	Metric,
	/// Any category the client does not know about.
	Other,
}

impl NodeKind {
	/// Every kind, in display order.
	pub const ALL: [NodeKind; 7] = [
		NodeKind::Paper,
		NodeKind::Author,
		NodeKind::Concept,
		NodeKind::Method,
		NodeKind::Dataset,
		NodeKind::Metric,
		NodeKind::Other,
	];

	/// Parse a category name, ignoring ASCII case.
	pub fn parse(name: &str) -> Self {
		match name.to_ascii_lowercase().as_str() {
			"paper" => NodeKind::Paper,
			"author" => NodeKind::Author,
			"concept" => NodeKind::Concept,
			"method" => NodeKind::Method,
			"dataset" => NodeKind::Dataset,
			"metric" => NodeKind::Metric,
			_ => NodeKind::Other,
		}
	}

	/// Plural label for filter controls.
	pub fn plural(self) -> &'static str {
		match self {
			NodeKind::Paper => "Papers",
			NodeKind::Author => "Authors",
			NodeKind::Concept => "Concepts",
			NodeKind::Method => "Methods",
			NodeKind::Dataset => "Datasets",
			NodeKind::Metric => "Metrics",
			NodeKind::Other => "Other",
		}
	}
}

impl<'de> Deserialize<'de> for NodeKind {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let name = String::deserialize(deserializer)?;
		Ok(NodeKind::parse(&name))
	}
}

/// A node record as delivered by a dataset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique key.
	pub id: String,
	/// Display text.
	pub label: String,
	/// Category.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Pre-positioned x coordinate.
	#[serde(default)]
	pub x: Option<f64>,
	/// Pre-positioned y coordinate.
	#[serde(default)]
	pub y: Option<f64>,
}

impl GraphNode {
	/// Node without a preset position.
	pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind,
			x: None,
			y: None,
		}
	}

	/// Builder: preset position.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = Some(x);
		self.y = Some(y);
		self
	}

	pub(crate) fn preset_position(&self) -> Option<Vec2> {
		match (self.x, self.y) {
			(Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Vec2::new(x, y)),
			_ => None,
		}
	}
}

/// A relationship between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relation name such as `INTRODUCES`.
	#[serde(rename = "type", default)]
	pub relation: Option<String>,
}

impl GraphEdge {
	/// Edge without a relation name.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			relation: None,
		}
	}
}

/// Full node/edge set of one graph view.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// All nodes.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// All edges.
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

/// 2D vector in simulation space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	/// Horizontal component.
	pub x: f64,
	/// Vertical component.
	pub y: f64,
}

impl Vec2 {
	/// The zero vector.
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	/// Construct from components.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Unit vector at `angle` radians.
	pub fn from_angle(angle: f64) -> Self {
		Self::new(angle.cos(), angle.sin())
	}

	/// Euclidean length.
	pub fn length(self) -> f64 {
		self.x.hypot(self.y)
	}

	/// Squared length.
	pub fn length_squared(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	/// Both components finite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Vec2 {
	type Output = Vec2;

	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Vec2) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Vec2 {
	type Output = Vec2;

	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl SubAssign for Vec2 {
	fn sub_assign(&mut self, rhs: Vec2) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;

	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}
