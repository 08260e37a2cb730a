use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{ForceGraphState, Target};
use crate::config::AppConfig;
use crate::knowledge::selection::{edge_tooltip, node_tooltip};
use crate::knowledge::{GraphData, GraphEvent, VisualOverlay};

#[derive(Clone, Debug, PartialEq)]
struct Tooltip {
	text: String,
	x: f64,
	y: f64,
}

/// The canvas fills its parent element.
fn parent_size(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
	let parent = canvas.parent_element()?;
	Some((parent.client_width() as f64, parent.client_height() as f64))
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed canvas for a [`GraphData`].
///
/// The layout is built once per `data` value. Changes to `overlay` are
/// merged into the live state without touching the simulation, and clicks
/// come back through `on_event`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Arc<GraphData>>,
	#[prop(into)] overlay: Signal<VisualOverlay>,
	#[prop(into)] on_event: Callback<GraphEvent>,
) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip = RwSignal::new(None::<Tooltip>);
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = parent_size(&canvas).unwrap_or((800.0, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas has no 2d context");
			return;
		};

		let data = data.get();
		let mut fresh = ForceGraphState::new(data, config.simulation.into(), w, h);
		fresh.show_labels = config.show_labels;
		fresh.apply_overlay(&overlay.get_untracked());
		info!(
			"graph canvas ready: {} nodes, {} links",
			fresh.options.nodes.len(),
			fresh.options.links.len()
		);
		*state_init.borrow_mut() = Some(fresh);

		if resize_cb_init.borrow().is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = parent_size(&canvas_resize) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// A rebuilt state reuses the running frame loop.
		if animate_init.borrow().is_some() {
			return;
		}
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_ov = state.clone();
	Effect::new(move |_| {
		let overlay = overlay.get();
		if let Some(ref mut s) = *state_ov.borrow_mut() {
			debug!("applying overlay");
			s.apply_overlay(&overlay);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.grab(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Update hover state when not dragging
			if !s.is_grabbing() {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
				s.hover.edge = match hovered {
					Some(_) => None,
					None => s.edge_at_position(x, y),
				};
				let text = match s.target_at(x, y) {
					Target::Node(slot) => s.data.nodes.get_index(slot).map(|(_, n)| node_tooltip(n)),
					Target::Edge(i) => s.data.links.get(i).map(edge_tooltip),
					Target::Background => None,
				};
				let next = text.map(|text| Tooltip {
					text,
					x: x + 12.0,
					y: y + 12.0,
				});
				if tooltip.get_untracked() != next {
					tooltip.set(next);
				}
			}

			s.drag_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);

		let event = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.finish(x, y),
			None => return,
		};

		if let Some(event) = event {
			debug!("graph event: {event:?}");
			on_event.run(event);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		tooltip.set(None);
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_press();
			s.hover.edge = None;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<div class="force-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="graph-tooltip"
								style=format!(
									"position: absolute; left: {}px; top: {}px; pointer-events: none; white-space: pre-line;",
									tip.x,
									tip.y,
								)
							>
								{tip.text}
							</div>
						}
					})
			}}
		</div>
	}
}
