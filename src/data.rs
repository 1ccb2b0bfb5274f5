//! Built-in demo graph.

use crate::components::force_graph::{GraphData, GraphEdge, GraphNode, NodeKind};

/// Two landmark papers and the concepts linking them.
pub fn demo_graph() -> GraphData {
	let nodes = vec![
		GraphNode::new("1", "Attention Is All You Need", NodeKind::Paper).at(200.0, 300.0),
		GraphNode::new("c1", "Transformer", NodeKind::Concept).at(450.0, 200.0),
		GraphNode::new("c2", "Self-Attention", NodeKind::Concept).at(450.0, 400.0),
		GraphNode::new("m1", "BERT", NodeKind::Paper).at(700.0, 300.0),
		GraphNode::new("2", "Generative Adversarial Networks", NodeKind::Paper).at(200.0, 600.0),
		GraphNode::new("c3", "GAN", NodeKind::Concept).at(450.0, 600.0),
	];
	let edges = vec![
		GraphEdge::new("1", "c1"),
		GraphEdge::new("1", "c2"),
		GraphEdge::new("m1", "c1"),
		GraphEdge::new("2", "c3"),
		GraphEdge::new("c3", "m1"),
	];
	GraphData { nodes, edges }
}

/// Papers of the demo graph as (id, label), for the focus selector.
pub fn demo_papers(data: &GraphData) -> Vec<(String, String)> {
	data.nodes
		.iter()
		.filter(|n| n.kind == NodeKind::Paper)
		.map(|n| (n.id.clone(), n.label.clone()))
		.collect()
}
