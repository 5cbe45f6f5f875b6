//! Ray casting for pointer picking
//!
//! Inverts `Projection::world_to_screen`: a pixel maps to normalised device
//! coordinates, then to a world-space ray leaving the camera eye.

use crate::camera::{CameraPose, Projection};
use crate::math::Vec3;

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Closest point on the ray to `p`. Points behind the origin clamp to it.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        let t = (p - self.origin).dot(self.direction);
        if t < 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    pub fn distance_sq_to_point(&self, p: Vec3) -> f32 {
        (self.closest_point(p) - p).len_sq()
    }

    /// Does the ray pass within `radius` of `center`?
    pub fn hits_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.distance_sq_to_point(center) <= radius * radius
    }
}

/// Pixel coordinates to normalised device coordinates (-1..1, y up)
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    (x / width * 2.0 - 1.0, -(y / height * 2.0) + 1.0)
}

/// Ray from the camera eye through an NDC point
pub fn ray_from_camera(ndc_x: f32, ndc_y: f32, pose: &CameraPose, projection: &Projection) -> Ray {
    let basis = pose.basis();
    let t = projection.tan_half();
    let direction = basis.forward
        + basis.right * (ndc_x * t * projection.aspect)
        + basis.up * (ndc_y * t);
    Ray::new(pose.position, direction)
}
