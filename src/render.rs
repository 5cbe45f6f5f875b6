//! Point-cloud renderer
//!
//! Every particle is projected in software with the same `Projection` the
//! picker inverts, then drawn as a small square. Size attenuates with depth;
//! exponential-squared fog fades far particles into the background.

use crate::app::Experience;
use macroquad::prelude::*;

/// Largest particle on screen, in pixels
const MAX_POINT_PX: f32 = 12.0;
/// Particles fainter than this are skipped
const MIN_ALPHA: f32 = 0.01;

pub const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Fraction of a particle left visible through fog at `depth`
pub fn fog_factor(depth: f32, density: f32) -> f32 {
    let d = density * depth;
    (-(d * d)).exp()
}

/// Draw every renderable of the scene
pub fn draw_scene(exp: &Experience) {
    clear_background(BACKGROUND);

    let camera = exp.camera();
    let basis = camera.basis();
    let projection = &exp.projection;
    let (width, height) = (exp.viewport.width, exp.viewport.height);
    let min_px = exp.viewport.pixel_ratio();
    let scene = exp.scene();

    for renderable in scene.renderables() {
        let placement = scene.placement(renderable);
        let cloud = &renderable.cloud;
        let [r, g, b] = cloud.color;
        let world_size = cloud.point_size * placement.scale;

        for local in &cloud.points {
            let world = placement.apply(*local);
            let Some(p) = projection.world_to_screen(&basis, camera.position, world, width, height) else {
                continue;
            };
            let alpha = cloud.opacity * fog_factor(p.depth, exp.settings.fog_density);
            if alpha < MIN_ALPHA {
                continue;
            }
            let size = (world_size * projection.pixels_per_unit(p.depth, height)).clamp(min_px, MAX_POINT_PX);
            draw_rectangle(
                p.x - size * 0.5,
                p.y - size * 0.5,
                size,
                size,
                Color::from_rgba(r, g, b, (alpha * 255.0) as u8),
            );
        }
    }
}
