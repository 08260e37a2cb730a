use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::sync::Arc;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphOptions;
use crate::knowledge::{GraphData, GraphEvent, VisualOverlay};

pub const MIN_HIT_RADIUS: f64 = 6.0;
pub const EDGE_HIT_DISTANCE: f64 = 4.0;
const CURVE_SAMPLES: usize = 16;
/// Pointer travel, in screen pixels, below which a press counts as a click.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Position in [`GraphOptions::nodes`].
	pub slot: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
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
	pub node: Option<DefaultNodeIdx>,
	pub edge: Option<usize>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
	Node(usize),
	Edge(usize),
	Background,
}

/// Control point of the quadratic curve drawn for an edge.
pub fn curve_control(x1: f64, y1: f64, x2: f64, y2: f64, curvature: f64) -> (f64, f64) {
	let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
	let (dx, dy) = (x2 - x1, y2 - y1);
	(mx - dy * curvature, my + dx * curvature)
}

fn quad_point(p0: (f64, f64), c: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
	let u = 1.0 - t;
	(
		u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p1.0,
		u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p1.1,
	)
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub options: GraphOptions,
	pub data: Arc<GraphData>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub show_labels: bool,
	slots: HashMap<DefaultNodeIdx, usize>,
	/// Endpoints of every entry in `options.links`.
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	press: Option<Press>,
}

/// A pointer press that may still turn out to be a click.
#[derive(Clone, Copy, Debug)]
struct Press {
	x: f64,
	y: f64,
	/// Latched once the pointer leaves the click slop.
	travelled: bool,
}

impl ForceGraphState {
	pub fn new(
		data: Arc<GraphData>,
		params: SimulationParameters,
		width: f64,
		height: f64,
	) -> Self {
		let options = GraphOptions::from(data.as_ref());
		let mut graph = ForceGraph::new(params);
		let mut id_to_idx = HashMap::new();
		let mut slots = HashMap::with_capacity(options.nodes.len());
		let mut edges = Vec::with_capacity(options.links.len());

		for (i, node) in options.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / options.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo { slot: i },
			});
			id_to_idx.insert(node.id.as_str(), idx);
			slots.insert(idx, i);
		}

		// One spring per node pair, none for self-loops.
		let mut springs = HashSet::new();
		for link in &options.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				let pair = if src < tgt { (src, tgt) } else { (tgt, src) };
				if src != tgt && springs.insert(pair) {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			options,
			data,
			slots,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			show_labels: true,
			press: None,
		}
	}

	/// Patch emphasis styles onto the running layout. Positions, masses and
	/// springs are left alone.
	pub fn apply_overlay(&mut self, overlay: &VisualOverlay) {
		if !self.options.merge(overlay) {
			log::warn!(
				"overlay for {} nodes does not match graph of {}",
				overlay.nodes.len(),
				self.options.nodes.len()
			);
		}
	}

	pub fn edge_endpoints(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::with_capacity(self.slots.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn slot_of(&self, idx: DefaultNodeIdx) -> Option<usize> {
		self.slots.get(&idx).copied()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let radius = self
				.options
				.nodes
				.get(node.data.user_data.slot)
				.map_or(MIN_HIT_RADIUS, |n| n.radius().max(MIN_HIT_RADIUS));
			// Hit radius is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let p = self.screen_to_graph(sx, sy);
		let tolerance = EDGE_HIT_DISTANCE / self.transform.k;
		let positions = self.positions();
		self.edges
			.iter()
			.zip(&self.options.links)
			.position(|(&(src, tgt), link)| {
				if src == tgt {
					return false;
				}
				let (Some(&a), Some(&b)) = (positions.get(&src), positions.get(&tgt)) else {
					return false;
				};
				let c = curve_control(a.0, a.1, b.0, b.1, link.style.curvature);
				let mut prev = a;
				(1..=CURVE_SAMPLES).any(|i| {
					let next = quad_point(a, c, b, i as f64 / CURVE_SAMPLES as f64);
					let hit = segment_distance(p, prev, next) < tolerance;
					prev = next;
					hit
				})
			})
	}

	pub fn target_at(&self, sx: f64, sy: f64) -> Target {
		if let Some(slot) = self
			.node_at_position(sx, sy)
			.and_then(|idx| self.slot_of(idx))
		{
			Target::Node(slot)
		} else if let Some(edge) = self.edge_at_position(sx, sy) {
			Target::Edge(edge)
		} else {
			Target::Background
		}
	}

	pub fn event_for(&self, target: Target) -> Option<GraphEvent> {
		match target {
			Target::Node(slot) => {
				let (_, node) = self.data.nodes.get_index(slot)?;
				Some(GraphEvent::NodeClicked {
					id: node.id.clone(),
					category: node.category,
					paper: node.paper.clone(),
				})
			}
			Target::Edge(i) => {
				let link = self.options.links.get(i)?;
				Some(GraphEvent::EdgeClicked {
					source: link.source.clone(),
					target: link.target.clone(),
					label: link.label.clone(),
				})
			}
			Target::Background => Some(GraphEvent::BackgroundClicked),
		}
	}

	/// Remember where a press started so its release can be told apart from
	/// a drag.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.press = Some(Press {
			x: sx,
			y: sy,
			travelled: false,
		});
	}

	/// Finish a press. Returns the click target if the pointer barely moved.
	pub fn release(&mut self, sx: f64, sy: f64) -> Option<Target> {
		let press = self.press.take()?;
		let moved = ((sx - press.x).powi(2) + (sy - press.y).powi(2)).sqrt();
		(!press.travelled && moved <= CLICK_SLOP).then(|| self.target_at(sx, sy))
	}

	/// Drop the pending press along with any drag or pan.
	pub fn cancel_press(&mut self) {
		self.press = None;
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	/// Mouse down: start dragging the node under the pointer, or panning.
	pub fn grab(&mut self, sx: f64, sy: f64) {
		self.press(sx, sy);
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = sx;
			self.drag.start_y = sy;
			let (drag, graph) = (&mut self.drag, &self.graph);
			graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = sx;
			self.pan.start_y = sy;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	/// Mouse move while pressed. Nothing moves until the pointer has left the
	/// click slop; a dragged node is pinned where it is dropped.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(press) = self.press.as_mut() else {
			return;
		};
		if !press.travelled {
			let moved = ((sx - press.x).powi(2) + (sy - press.y).powi(2)).sqrt();
			if moved <= CLICK_SLOP {
				return;
			}
			press.travelled = true;
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (dx, dy) = (
				(sx - self.drag.start_x) / self.transform.k,
				(sy - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Mouse up. A press that never left the click slop becomes an event.
	pub fn finish(&mut self, sx: f64, sy: f64) -> Option<GraphEvent> {
		let clicked = self.release(sx, sy);
		self.cancel_press();
		clicked.and_then(|target| self.event_for(target))
	}

	pub fn is_grabbing(&self) -> bool {
		self.drag.active || self.pan.active
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
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
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
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
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::SimulationSettings;
	use crate::knowledge::Session;

	fn state() -> ForceGraphState {
		let session = Session::from_json(
			r#"[{"paper_id": "P1", "title": "T",
				"relations": [{"from": "P1", "to": "UNet", "type": "uses"},
				              {"from": "UNet", "to": "UNet", "type": "self"}]}]"#,
		)
		.unwrap();
		let data = Arc::new(session.graph().clone());
		ForceGraphState::new(data, SimulationSettings::default().into(), 800.0, 600.0)
	}

	#[test]
	fn keeps_every_link_including_self_loops() {
		let s = state();
		assert_eq!(s.options.nodes.len(), 2);
		assert_eq!(s.edge_endpoints().len(), 2);
	}

	#[test]
	fn overlay_leaves_sizes_alone() {
		let mut s = state();
		let sizes: Vec<f64> = s.options.nodes.iter().map(|n| n.size).collect();
		let active = HashSet::from(["P1".to_string()]);
		let overlay = crate::knowledge::highlight(&s.data, &active);
		s.apply_overlay(&overlay);
		assert_eq!(s.options.nodes[1].opacity, 0.1);
		assert_eq!(
			s.options.nodes.iter().map(|n| n.size).collect::<Vec<_>>(),
			sizes
		);
	}

	#[test]
	fn mismatched_overlay_is_ignored() {
		let mut s = state();
		let before = s.options.clone();
		s.apply_overlay(&VisualOverlay::default());
		assert_eq!(s.options, before);
	}

	#[test]
	fn short_press_is_a_click() {
		let mut s = state();
		// Far away from the initial ring of nodes.
		s.press(5.0, 5.0);
		assert_eq!(s.release(6.0, 5.0), Some(Target::Background));
		s.press(5.0, 5.0);
		assert_eq!(s.release(60.0, 5.0), None);
		assert_eq!(
			s.event_for(Target::Background),
			Some(GraphEvent::BackgroundClicked)
		);
	}

	fn node_state(s: &ForceGraphState, slot: usize) -> (f32, f32, bool) {
		let mut out = (0.0, 0.0, false);
		s.graph.visit_nodes(|node| {
			if node.data.user_data.slot == slot {
				out = (node.x(), node.y(), node.data.is_anchor);
			}
		});
		out
	}

	#[test]
	fn jitter_neither_moves_nor_pins_a_node() {
		let mut s = state();
		// P1 starts at graph (500, 300), which is screen (900, 600).
		let before = node_state(&s, 0);
		s.grab(900.0, 600.0);
		assert!(s.drag.active);
		s.drag_to(902.0, 601.0);
		assert_eq!(node_state(&s, 0), before);
		assert!(!before.2);
		match s.finish(902.0, 601.0) {
			Some(GraphEvent::NodeClicked { id, .. }) => assert_eq!(id, "P1"),
			other => panic!("unexpected event {other:?}"),
		}
		assert!(!s.is_grabbing());
	}

	#[test]
	fn real_drag_moves_and_pins_without_clicking() {
		let mut s = state();
		s.grab(900.0, 600.0);
		s.drag_to(950.0, 600.0);
		let (x, y, pinned) = node_state(&s, 0);
		assert_eq!((x, y), (550.0, 300.0));
		assert!(pinned);
		// Coming back inside the slop is still a drag.
		s.drag_to(901.0, 600.0);
		assert_eq!(s.finish(901.0, 600.0), None);
	}

	#[test]
	fn background_press_pans_after_slop() {
		let mut s = state();
		let start = (s.transform.x, s.transform.y);
		s.grab(5.0, 5.0);
		s.drag_to(7.0, 5.0);
		assert_eq!((s.transform.x, s.transform.y), start);
		s.drag_to(25.0, 5.0);
		assert_eq!((s.transform.x, s.transform.y), (start.0 + 20.0, start.1));
		assert_eq!(s.finish(25.0, 5.0), None);
	}

	#[test]
	fn resize_follows_the_container() {
		let mut s = state();
		s.resize(1024.0, 300.0);
		assert_eq!((s.width, s.height), (1024.0, 300.0));
	}

	#[test]
	fn node_event_carries_paper_payload() {
		let s = state();
		match s.event_for(Target::Node(0)) {
			Some(GraphEvent::NodeClicked { id, paper, .. }) => {
				assert_eq!(id, "P1");
				assert!(paper.is_some());
			}
			other => panic!("unexpected event {other:?}"),
		}
	}

	#[test]
	fn curve_control_offsets_perpendicular() {
		let (cx, cy) = curve_control(0.0, 0.0, 10.0, 0.0, 0.2);
		assert_eq!((cx, cy), (5.0, 2.0));
		assert!((segment_distance((5.0, 1.0), (0.0, 0.0), (10.0, 0.0)) - 1.0).abs() < 1e-9);
	}
}
