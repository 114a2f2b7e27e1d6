use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes;
use crate::constants::*;
use crate::models::{FlowEdge, FlowGraph, FlowNode, NodeRole};
use crate::state::AppState;

pub fn draw_flow(state: &AppState, canvas: &HtmlCanvasElement, context: &CanvasRenderingContext2d, dpr: f64) {
    context.save();

    // Fill canvas rendering context with background color first
    let _ = context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    context.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

    // Scale by device pixel ratio first, then the viewport
    let _ = context.scale(dpr, dpr);
    shapes::draw_dot_grid(context, &state.viewport, state.canvas_width, state.canvas_height);
    let _ = context.scale(state.viewport.zoom, state.viewport.zoom);
    let _ = context.translate(-state.viewport.x, -state.viewport.y);

    // Edges go underneath the nodes
    for edge in &state.flow.edges {
        draw_edge(context, &state.flow, edge);
    }
    draw_pending_connection(state, context);

    for node in &state.flow.nodes {
        let selected = state.selected_node_id.as_deref() == Some(node.id.as_str());
        draw_node(context, node, selected);
    }

    context.restore();
}

fn draw_edge(context: &CanvasRenderingContext2d, flow: &FlowGraph, edge: &FlowEdge) {
    let (source, target) = match (flow.node(&edge.source), flow.node(&edge.target)) {
        (Some(s), Some(t)) => (s, t),
        _ => return,
    };

    // Bottom of the source to the top of the target
    let start_x = source.position.x + FLOW_NODE_WIDTH / 2.0;
    let start_y = source.position.y + FLOW_NODE_HEIGHT;
    let end_x = target.position.x + FLOW_NODE_WIDTH / 2.0;
    let end_y = target.position.y;
    let bend = ((end_y - start_y).abs() / 2.0).max(20.0);

    context.save();
    if edge.animated {
        let dash = js_sys::Array::of2(&5.0.into(), &5.0.into());
        let _ = context.set_line_dash(&dash);
    }
    context.begin_path();
    context.move_to(start_x, start_y);
    context.bezier_curve_to(start_x, start_y + bend, end_x, end_y - bend, end_x, end_y);
    context.set_stroke_style_str(CONNECTION_LINE_COLOR);
    context.set_line_width(1.5);
    context.stroke();
    context.restore();

    shapes::draw_arrow(context, end_x, end_y, 0.0, 1.0, CONNECTION_LINE_COLOR);
}

fn draw_pending_connection(state: &AppState, context: &CanvasRenderingContext2d) {
    let pending = match &state.connecting {
        Some(p) => p,
        None => return,
    };
    let (source, (cx, cy)) = match (state.flow.node(&pending.source), pending.cursor) {
        (Some(s), Some(cursor)) => (s, cursor),
        _ => return,
    };
    let start_x = source.position.x + FLOW_NODE_WIDTH / 2.0;
    let start_y = source.position.y + FLOW_NODE_HEIGHT;

    context.save();
    let dash = js_sys::Array::of2(&4.0.into(), &4.0.into());
    let _ = context.set_line_dash(&dash);
    context.begin_path();
    context.move_to(start_x, start_y);
    context.line_to(cx, cy);
    context.set_stroke_style_str(CONNECTION_PREVIEW_COLOR);
    context.set_line_width(1.5);
    context.stroke();
    context.restore();
}

pub fn node_fill(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Input => NODE_FILL_INPUT,
        NodeRole::Default => NODE_FILL_DEFAULT,
        NodeRole::Output => NODE_FILL_OUTPUT,
    }
}

pub fn draw_node(context: &CanvasRenderingContext2d, node: &FlowNode, selected: bool) {
    let (x, y) = (node.position.x, node.position.y);

    context.save();
    context.set_shadow_color("rgba(0, 0, 0, 0.08)");
    context.set_shadow_blur(6.0);
    context.set_shadow_offset_y(2.0);
    context.set_fill_style_str(node_fill(node.role));
    shapes::rounded_rect_path(context, x, y, FLOW_NODE_WIDTH, FLOW_NODE_HEIGHT, FLOW_NODE_RADIUS);
    context.fill();
    context.restore();

    context.save();
    if selected {
        context.set_stroke_style_str(NODE_BORDER_SELECTED);
        context.set_line_width(2.0);
    } else {
        context.set_stroke_style_str(NODE_BORDER_DEFAULT);
        context.set_line_width(1.0);
    }
    shapes::rounded_rect_path(context, x, y, FLOW_NODE_WIDTH, FLOW_NODE_HEIGHT, FLOW_NODE_RADIUS);
    context.stroke();

    context.set_fill_style_str(NODE_TEXT_COLOR);
    context.set_font("12px sans-serif");
    context.set_text_align("center");
    context.set_text_baseline("middle");
    let _ = context.fill_text(
        &node.short_label(),
        x + FLOW_NODE_WIDTH / 2.0,
        y + FLOW_NODE_HEIGHT / 2.0,
    );
    context.restore();

    // Input nodes only emit, output nodes only receive
    if node.role != NodeRole::Input {
        shapes::draw_handle(context, x + FLOW_NODE_WIDTH / 2.0, y);
    }
    if node.role != NodeRole::Output {
        shapes::draw_handle(context, x + FLOW_NODE_WIDTH / 2.0, y + FLOW_NODE_HEIGHT);
    }
}
