//! Which part of the loaded graph is shown.

use std::collections::{BTreeSet, HashSet};

use super::types::{GraphData, GraphEdge, NodeKind};

/// Externally controlled view filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphFilter {
	/// Kinds that are hidden.
	pub hidden: HashSet<NodeKind>,
	/// Restrict the view to this node and its direct neighbors.
	pub focus: Option<String>,
}

impl GraphFilter {
	/// Flip whether `kind` is hidden.
	pub fn toggle(&mut self, kind: NodeKind) {
		if !self.hidden.remove(&kind) {
			self.hidden.insert(kind);
		}
	}

	/// Whether `kind` is shown.
	pub fn shows(&self, kind: NodeKind) -> bool {
		!self.hidden.contains(&kind)
	}
}

/// Visible node ids and the edges between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibleSet {
	ids: HashSet<String>,
	edges: Vec<GraphEdge>,
}

impl VisibleSet {
	/// Apply `filter` to `data`.
	pub fn compute(data: &GraphData, filter: &GraphFilter) -> Self {
		let focus = filter
			.focus
			.as_deref()
			.filter(|id| data.nodes.iter().any(|n| n.id == *id));

		let neighborhood: Option<HashSet<&str>> = focus.map(|root| {
			let mut around: HashSet<&str> = data
				.edges
				.iter()
				.filter_map(|e| {
					if e.source == root {
						Some(e.target.as_str())
					} else if e.target == root {
						Some(e.source.as_str())
					} else {
						None
					}
				})
				.collect();
			around.insert(root);
			around
		});

		let ids: HashSet<String> = data
			.nodes
			.iter()
			.filter(|n| filter.shows(n.kind))
			.filter(|n| {
				neighborhood
					.as_ref()
					.is_none_or(|around| around.contains(n.id.as_str()))
			})
			.map(|n| n.id.clone())
			.collect();

		let edges = data
			.edges
			.iter()
			.filter(|e| ids.contains(&e.source) && ids.contains(&e.target))
			.cloned()
			.collect();

		Self { ids, edges }
	}

	/// Everything in `data` visible.
	pub fn all(data: &GraphData) -> Self {
		Self::compute(data, &GraphFilter::default())
	}

	/// Kinds present in `data`, in display order.
	pub fn kinds(data: &GraphData) -> Vec<NodeKind> {
		data.nodes
			.iter()
			.map(|n| n.kind)
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	/// Kinds present in `data` that get a filter toggle. `fixed` is never
	/// offered, so it cannot be hidden.
	pub fn toggle_kinds(data: &GraphData, fixed: Option<NodeKind>) -> Vec<NodeKind> {
		let mut kinds = Self::kinds(data);
		kinds.retain(|kind| Some(*kind) != fixed);
		kinds
	}

	/// Whether node `id` is visible.
	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	/// Edges with both endpoints visible.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Number of visible nodes.
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// Nothing visible.
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::demo_graph;

	#[test]
	fn hiding_a_kind_drops_its_nodes_and_edges() {
		let data = demo_graph();
		let mut filter = GraphFilter::default();
		filter.toggle(NodeKind::Concept);

		let visible = VisibleSet::compute(&data, &filter);

		assert!(visible.contains("1"));
		assert!(!visible.contains("c1"));
		assert!(visible.edges().is_empty());
		assert_eq!(visible.len(), 3);
	}

	#[test]
	fn toggle_twice_restores() {
		let mut filter = GraphFilter::default();
		filter.toggle(NodeKind::Method);
		assert!(!filter.shows(NodeKind::Method));
		filter.toggle(NodeKind::Method);
		assert_eq!(filter, GraphFilter::default());
	}

	#[test]
	fn focus_limits_to_direct_neighbors() {
		let data = demo_graph();
		let filter = GraphFilter {
			focus: Some("1".into()),
			..GraphFilter::default()
		};

		let visible = VisibleSet::compute(&data, &filter);

		assert!(visible.contains("1"));
		assert!(visible.contains("c1"));
		assert!(visible.contains("c2"));
		assert!(!visible.contains("2"));
		assert_eq!(visible.edges().len(), 2);
	}

	#[test]
	fn unknown_focus_is_ignored() {
		let data = demo_graph();
		let filter = GraphFilter {
			focus: Some("nope".into()),
			..GraphFilter::default()
		};

		assert_eq!(VisibleSet::compute(&data, &filter), VisibleSet::all(&data));
	}

	#[test]
	fn edge_to_missing_node_is_never_visible() {
		let data = GraphData {
			nodes: vec![crate::components::force_graph::GraphNode::new(
				"1",
				"One",
				NodeKind::Paper,
			)],
			edges: vec![GraphEdge::new("missing", "1")],
		};

		assert!(VisibleSet::all(&data).edges().is_empty());
	}

	#[test]
	fn fixed_kind_gets_no_toggle() {
		let data = demo_graph();
		assert_eq!(
			VisibleSet::toggle_kinds(&data, Some(NodeKind::Paper)),
			vec![NodeKind::Concept]
		);
		assert_eq!(
			VisibleSet::toggle_kinds(&data, None),
			VisibleSet::kinds(&data)
		);
	}

	#[test]
	fn kinds_are_ordered_and_unique() {
		assert_eq!(
			VisibleSet::kinds(&demo_graph()),
			vec![NodeKind::Paper, NodeKind::Concept]
		);
	}
}
