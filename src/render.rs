// Canvas drawing for one frame: clear, particles, then the time-of-day wash
// composited on top. Draw errors are discarded; a surface torn down mid-frame
// just produces a blank frame.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::scene::Scene;

pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
    let width = scene.viewport.width as f64;
    let height = scene.viewport.height as f64;

    ctx.clear_rect(0.0, 0.0, width, height);
    draw_particles(scene, ctx);
    draw_overlay(scene, ctx, width, height);
}

fn draw_particles(scene: &Scene, ctx: &CanvasRenderingContext2d) {
    for p in scene.field.particles() {
        ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", p.opacity));
        ctx.begin_path();
        let _ = ctx.arc(p.pos[0], p.pos[1], p.radius, 0.0, PI * 2.0);
        ctx.close_path();
        ctx.fill();
    }
}

/// Diagonal linear gradient across the full surface, keyed by the scene's
/// hour bucket.
fn draw_overlay(scene: &Scene, ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    let (from, to) = scene.phase.stops();
    let gradient = ctx.create_linear_gradient(0.0, 0.0, width, height);
    let _ = gradient.add_color_stop(0.0, &from.to_css());
    let _ = gradient.add_color_stop(1.0, &to.to_css());
    ctx.set_fill_style(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);
}
