use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent};

use crate::canvas::renderer;
use crate::constants::{ID_FLOW_CANVAS, ID_FLOW_CONTAINER};
use crate::messages::Message;
use crate::state::{dispatch_global_message, AppState, APP_STATE};

struct FlowSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

// Canvas handles live here rather than in AppState.
thread_local! {
    static FLOW_SURFACE: RefCell<Option<FlowSurface>> = const { RefCell::new(None) };
}

pub fn setup_flow_canvas(document: &Document) -> Result<(), JsValue> {
    let canvas = document
        .get_element_by_id(ID_FLOW_CANVAS)
        .ok_or_else(|| JsValue::from_str("Flow canvas not found"))?
        .dyn_into::<HtmlCanvasElement>()?;

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    FLOW_SURFACE.with(|surface| {
        *surface.borrow_mut() = Some(FlowSurface {
            canvas: canvas.clone(),
            context,
        });
    });

    setup_mouse_events(&canvas)?;
    setup_resize_handler()?;
    resize_canvas()
}

/// Match the canvas bitmap to its container and tell the state the new
/// size in CSS pixels.
fn resize_canvas() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;
    let container = match document.get_element_by_id(ID_FLOW_CONTAINER) {
        Some(c) => c,
        None => return Ok(()),
    };
    let width = container.client_width() as f64;
    let height = container.client_height() as f64;
    if width <= 0.0 || height <= 0.0 {
        return Ok(()); // hidden, keep the previous size
    }
    let dpr = window.device_pixel_ratio();

    FLOW_SURFACE.with(|surface| -> Result<(), JsValue> {
        if let Some(surface) = surface.borrow().as_ref() {
            surface.canvas.set_width((width * dpr) as u32);
            surface.canvas.set_height((height * dpr) as u32);
            let style = surface.canvas.style();
            style.set_property("width", &format!("{}px", width))?;
            style.set_property("height", &format!("{}px", height))?;
        }
        Ok(())
    })?;

    dispatch_global_message(Message::ResizeFlowCanvas { width, height });
    Ok(())
}

fn setup_resize_handler() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let resize_callback = Closure::wrap(Box::new(move || {
        if let Err(e) = resize_canvas() {
            log::warn!("Flow canvas resize failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())?;
    resize_callback.forget();
    Ok(())
}

fn screen_point(event: &MouseEvent) -> (f64, f64) {
    (event.offset_x() as f64, event.offset_y() as f64)
}

// Cursor position in world coordinates.
fn world_point(event: &MouseEvent) -> (f64, f64) {
    let (x, y) = screen_point(event);
    APP_STATE.with(|state| state.borrow().viewport.to_world(x, y))
}

/// What a mouse-down should do. `world` is used for hit-testing, `screen`
/// anchors a background pan.
pub fn press_messages(state: &AppState, world: (f64, f64), screen: (f64, f64), shift: bool) -> Vec<Message> {
    let (x, y) = world;
    match state.flow.node_at(x, y) {
        Some(node) if shift => vec![Message::BeginConnection {
            source: node.id.clone(),
        }],
        Some(node) => vec![
            Message::SelectNode(Some(node.id.clone())),
            Message::StartNodeDrag {
                node_id: node.id.clone(),
                offset_x: x - node.position.x,
                offset_y: y - node.position.y,
            },
        ],
        None => vec![
            Message::SelectNode(None),
            Message::StartPan {
                x: screen.0,
                y: screen.1,
            },
        ],
    }
}

// Which gesture is running, if any.
#[derive(Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Dragging,
    Connecting,
    Panning,
}

fn current_gesture() -> Gesture {
    APP_STATE.with(|state| {
        let state = state.borrow();
        if state.connecting.is_some() {
            Gesture::Connecting
        } else if state.dragging.is_some() {
            Gesture::Dragging
        } else if state.panning.is_some() {
            Gesture::Panning
        } else {
            Gesture::Idle
        }
    })
}

fn setup_mouse_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let mousedown = Closure::wrap(Box::new(move |event: MouseEvent| {
        if event.button() != 0 {
            return;
        }
        let world = world_point(&event);
        let screen = screen_point(&event);
        let msgs = APP_STATE.with(|state| press_messages(&state.borrow(), world, screen, event.shift_key()));
        for msg in msgs {
            dispatch_global_message(msg);
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
    mousedown.forget();

    let mousemove = Closure::wrap(Box::new(move |event: MouseEvent| {
        let msg = match current_gesture() {
            Gesture::Idle => return,
            Gesture::Dragging => {
                let (x, y) = world_point(&event);
                Message::UpdateNodeDrag { x, y }
            }
            Gesture::Connecting => {
                let (x, y) = world_point(&event);
                Message::UpdateConnectionPreview { x, y }
            }
            Gesture::Panning => {
                let (x, y) = screen_point(&event);
                Message::UpdatePan { x, y }
            }
        };
        dispatch_global_message(msg);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
    mousemove.forget();

    let mouseup = Closure::wrap(Box::new(move |event: MouseEvent| {
        let msg = match current_gesture() {
            Gesture::Idle => return,
            Gesture::Dragging => Message::StopNodeDrag,
            Gesture::Panning => Message::StopPan,
            Gesture::Connecting => {
                let (x, y) = world_point(&event);
                let target = APP_STATE.with(|state| state.borrow().flow.node_at(x, y).map(|n| n.id.clone()));
                Message::FinishConnection { target }
            }
        };
        dispatch_global_message(msg);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
    mouseup.forget();

    // Leaving the canvas cancels whatever gesture is running
    let mouseleave = Closure::wrap(Box::new(move |_event: MouseEvent| {
        let msg = match current_gesture() {
            Gesture::Idle => return,
            Gesture::Dragging => Message::StopNodeDrag,
            Gesture::Panning => Message::StopPan,
            Gesture::Connecting => Message::FinishConnection { target: None },
        };
        dispatch_global_message(msg);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseleave", mouseleave.as_ref().unchecked_ref())?;
    mouseleave.forget();

    Ok(())
}

pub fn render_flow(state: &AppState) {
    let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    FLOW_SURFACE.with(|surface| {
        if let Some(surface) = surface.borrow().as_ref() {
            renderer::draw_flow(state, &surface.canvas, &surface.context, dpr);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlowGraph, FlowNode, NodeRole};

    fn state() -> AppState {
        let mut state = AppState::new();
        state.replace_flow(FlowGraph {
            nodes: vec![FlowNode::new("a", "A", NodeRole::Input, 100.0, 100.0)],
            edges: vec![],
        });
        state
    }

    #[test]
    fn press_on_node_selects_then_starts_drag_with_grab_offset() {
        let msgs = press_messages(&state(), (110.0, 120.0), (5.0, 5.0), false);
        assert_eq!(
            msgs,
            vec![
                Message::SelectNode(Some("a".into())),
                Message::StartNodeDrag { node_id: "a".into(), offset_x: 10.0, offset_y: 20.0 },
            ]
        );
    }

    #[test]
    fn shift_press_on_node_begins_connection() {
        let msgs = press_messages(&state(), (110.0, 120.0), (5.0, 5.0), true);
        assert_eq!(msgs, vec![Message::BeginConnection { source: "a".into() }]);
    }

    #[test]
    fn press_on_empty_canvas_clears_selection_and_pans() {
        let msgs = press_messages(&state(), (-50.0, -50.0), (12.0, 34.0), false);
        assert_eq!(
            msgs,
            vec![Message::SelectNode(None), Message::StartPan { x: 12.0, y: 34.0 }]
        );
    }
}
