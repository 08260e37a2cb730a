use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, curve_control};

const BACKGROUND: &str = "#1a1a2e";
const LABEL_MAX_CHARS: usize = 32;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn short_label(label: &str) -> String {
	if label.chars().count() <= LABEL_MAX_CHARS {
		label.to_owned()
	} else {
		let mut out: String = label.chars().take(LABEL_MAX_CHARS - 1).collect();
		out.push('…');
		out
	}
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 6.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_hover = state.has_active_highlight();
	let positions = state.positions();

	for (i, (&(src, tgt), link)) in state
		.edge_endpoints()
		.iter()
		.zip(&state.options.links)
		.enumerate()
	{
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&src), positions.get(&tgt)) else {
			continue;
		};
		let source_color = state
			.slot_of(src)
			.and_then(|slot| state.options.nodes.get(slot))
			.map_or("#999999", |n| n.category.color());
		let target_radius = state
			.slot_of(tgt)
			.and_then(|slot| state.options.nodes.get(slot))
			.map_or(4.0, |n| n.radius());

		// Hover brightens adjacent edges and dims the rest, on top of the
		// overlay opacity.
		let hovered = state.is_highlighted(src) && state.is_highlighted(tgt);
		let boost = if !has_hover {
			1.0
		} else if hovered {
			1.0 + 0.5 * t
		} else {
			1.0 - 0.75 * t
		};
		let edge_hovered = state.hover.edge == Some(i);
		let alpha = (link.style.opacity * boost).clamp(0.0, 1.0);
		let width = link.style.width * if edge_hovered { 2.0 } else { 1.0 } / k;

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(source_color);
		ctx.set_fill_style_str(source_color);
		ctx.set_line_width(width);

		if src == tgt {
			let r = target_radius * 1.5;
			ctx.begin_path();
			let _ = ctx.arc(x1 + r, y1 - r, r, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		if (dx * dx + dy * dy).sqrt() < 0.001 {
			continue;
		}
		let (cx, cy) = curve_control(x1, y1, x2, y2, link.style.curvature);

		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.quadratic_curve_to(cx, cy, x2, y2);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		// Arrow head along the curve's tangent at the target
		let (tx, ty) = (x2 - cx, y2 - cy);
		let tlen = (tx * tx + ty * ty).sqrt().max(0.001);
		let (ux, uy) = (tx / tlen, ty / tlen);
		let (tip_x, tip_y) = (x2 - ux * target_radius, y2 - uy * target_radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));

	// Faded pass first so emphasised nodes paint on top.
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let Some(opt) = state.options.nodes.get(node.data.user_data.slot) else {
			return;
		};
		let (x, y) = (node.x() as f64, node.y() as f64);
		let fade = if has_highlight { 1.0 - 0.7 * t } else { 1.0 };
		let (alpha, radius) = (opt.opacity * fade, opt.radius() * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(opt.color);
		ctx.fill();

		if state.show_labels {
			ctx.set_global_alpha(alpha * 0.8);
			ctx.set_fill_style_str("white");
			ctx.set_font(&font);
			let _ = ctx.fill_text(&short_label(&opt.label), x + radius + 3.0, y + 3.0);
		}
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let Some(opt) = state.options.nodes.get(node.data.user_data.slot) else {
			return;
		};
		let (x, y) = (node.x() as f64, node.y() as f64);
		let base = opt.radius();
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t))
		} else {
			(base, 0.0)
		};

		ctx.set_global_alpha(opt.opacity.max(0.1 + 0.9 * t));
		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(opt.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if state.show_labels {
			ctx.set_fill_style_str("white");
			ctx.set_font(&font);
			let _ = ctx.fill_text(&short_label(&opt.label), x + radius + 3.0, y + 3.0);
		}
		ctx.set_global_alpha(1.0);
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn long_labels_are_truncated() {
		assert_eq!(short_label("UNet"), "UNet");
		let long = "a".repeat(40);
		let short = short_label(&long);
		assert_eq!(short.chars().count(), LABEL_MAX_CHARS);
		assert!(short.ends_with('…'));
	}
}
