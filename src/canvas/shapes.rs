use web_sys::CanvasRenderingContext2d;

use crate::constants::*;
use crate::state::Viewport;

pub fn rounded_rect_path(context: &CanvasRenderingContext2d, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    let r = radius.min(width / 2.0).min(height / 2.0);
    context.begin_path();
    context.move_to(x + r, y);
    context.line_to(x + width - r, y);
    context.quadratic_curve_to(x + width, y, x + width, y + r);
    context.line_to(x + width, y + height - r);
    context.quadratic_curve_to(x + width, y + height, x + width - r, y + height);
    context.line_to(x + r, y + height);
    context.quadratic_curve_to(x, y + height, x, y + height - r);
    context.line_to(x, y + r);
    context.quadratic_curve_to(x, y, x + r, y);
    context.close_path();
}

/// Arrow head at (x, y) pointing along (dx, dy).
pub fn draw_arrow(context: &CanvasRenderingContext2d, x: f64, y: f64, dx: f64, dy: f64, color: &str) {
    let head_len = 8.0;
    let angle = f64::atan2(dy, dx);

    context.begin_path();
    context.move_to(x, y);
    context.line_to(
        x - head_len * f64::cos(angle - std::f64::consts::PI / 6.0),
        y - head_len * f64::sin(angle - std::f64::consts::PI / 6.0),
    );
    context.move_to(x, y);
    context.line_to(
        x - head_len * f64::cos(angle + std::f64::consts::PI / 6.0),
        y - head_len * f64::sin(angle + std::f64::consts::PI / 6.0),
    );
    context.set_stroke_style_str(color);
    context.set_line_width(1.5);
    context.stroke();
}

/// Connection handle dot on a node border.
pub fn draw_handle(context: &CanvasRenderingContext2d, x: f64, y: f64) {
    context.begin_path();
    let _ = context.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
    context.set_fill_style_str(NODE_BORDER_DEFAULT);
    context.fill();
}

/// Dotted background in screen space (CSS pixels), following pan and zoom.
pub fn draw_dot_grid(context: &CanvasRenderingContext2d, viewport: &Viewport, width: f64, height: f64) {
    let step = CANVAS_DOT_GAP * viewport.zoom;
    if step < 4.0 {
        return; // too dense to be useful
    }
    let start_x = (-viewport.x * viewport.zoom).rem_euclid(step);
    let start_y = (-viewport.y * viewport.zoom).rem_euclid(step);

    context.set_fill_style_str(CANVAS_DOT_COLOR);
    let mut y = start_y;
    while y < height {
        let mut x = start_x;
        while x < width {
            context.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
            x += step;
        }
        y += step;
    }
}
