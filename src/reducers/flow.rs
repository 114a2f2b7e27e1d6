//! Flow canvas reducer: selection, node dragging, edge drawing, panning,
//! zooming and fitting the viewport.

use crate::messages::{Command, Message};
use crate::state::{AppState, DragState, PendingConnection};

/// Returns `true` when the message was handled by the flow reducer.
pub fn update(state: &mut AppState, msg: &Message, _cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SelectNode(node_id) => {
            state.selected_node_id = node_id
                .as_ref()
                .filter(|id| state.flow.contains_node(id))
                .cloned();
            true
        }
        Message::StartNodeDrag {
            node_id,
            offset_x,
            offset_y,
        } => {
            if state.flow.contains_node(node_id) {
                state.dragging = Some(DragState {
                    node_id: node_id.clone(),
                    offset_x: *offset_x,
                    offset_y: *offset_y,
                });
            }
            true
        }
        Message::UpdateNodeDrag { x, y } => {
            if let Some(drag) = &state.dragging {
                let moved = state
                    .flow
                    .move_node(&drag.node_id, x - drag.offset_x, y - drag.offset_y);
                if !moved {
                    state.dragging = None;
                }
            }
            true
        }
        Message::StopNodeDrag => {
            state.dragging = None;
            true
        }
        Message::BeginConnection { source } => {
            if state.flow.contains_node(source) {
                state.connecting = Some(PendingConnection {
                    source: source.clone(),
                    cursor: None,
                });
            }
            true
        }
        Message::UpdateConnectionPreview { x, y } => {
            if let Some(pending) = &mut state.connecting {
                pending.cursor = Some((*x, *y));
            }
            true
        }
        Message::FinishConnection { target } => {
            if let (Some(pending), Some(target)) = (state.connecting.take(), target) {
                connect(state, &pending.source, target);
            }
            true
        }
        Message::StartPan { x, y } => {
            state.panning = Some((*x, *y));
            true
        }
        Message::UpdatePan { x, y } => {
            if let Some((last_x, last_y)) = state.panning {
                state.viewport.pan_by(x - last_x, y - last_y);
                state.panning = Some((*x, *y));
            }
            true
        }
        Message::StopPan => {
            state.panning = None;
            true
        }
        Message::ZoomFlow { factor } => {
            // Zoom around the middle of the canvas
            let (cx, cy) = (state.canvas_width / 2.0, state.canvas_height / 2.0);
            state.viewport.zoom_about(*factor, cx, cy);
            true
        }
        Message::ResizeFlowCanvas { width, height } => {
            state.canvas_width = *width;
            state.canvas_height = *height;
            state.fit_flow_to_view();
            true
        }
        Message::FitFlowView => {
            state.fit_flow_to_view();
            true
        }
        _ => false,
    }
}

fn connect(state: &mut AppState, source: &str, target: &str) {
    if state.flow.connect(source, target) {
        debug_log!("Connected {} -> {}", source, target);
    } else {
        debug_log!("Refused edge {} -> {}", source, target);
    }
}
