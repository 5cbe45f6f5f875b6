//! Camera pose, projection, orbit controls, and camera motion
//!
//! The pose is the single source of truth: orbit controls orbit the pose's
//! `position` around its `look_at`, tweens write either field directly.

use crate::config::OrbitSettings;
use crate::math::Vec3;
use crate::tween::{Ease, Tween, TweenError, TweenEvent, TweenId, TweenTarget, TweenValue, Tweens};
use std::f32::consts::PI;

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Camera axes in world space
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Straight down the Z axis at `distance`, looking at the origin
    pub fn home(distance: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, distance), Vec3::ZERO)
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    pub fn basis(&self) -> Basis {
        let forward = (self.look_at - self.position).normalize();
        let mut right = forward.cross(Vec3::UP).normalize();
        if right == Vec3::ZERO {
            // Looking straight up or down
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let up = right.cross(forward);
        Basis { right, up, forward }
    }
}

/// A projected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction
    pub depth: f32,
}

/// Perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view, radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_degrees: f32, width: f32, height: f32) -> Self {
        let mut projection = Self { fov_y: fov_degrees.to_radians(), aspect: 1.0, near: 0.1, far: 1000.0 };
        projection.resize(width, height);
        projection
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn tan_half(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }

    /// Project a world point to pixel coordinates. None if outside the depth range.
    pub fn world_to_screen(&self, basis: &Basis, eye: Vec3, p: Vec3, width: f32, height: f32) -> Option<ScreenPoint> {
        let d = p - eye;
        let depth = d.dot(basis.forward);
        if depth < self.near || depth > self.far {
            return None;
        }
        let t = self.tan_half();
        let ndc_x = d.dot(basis.right) / (depth * t * self.aspect);
        let ndc_y = d.dot(basis.up) / (depth * t);
        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * width,
            y: (1.0 - ndc_y) * 0.5 * height,
            depth,
        })
    }

    /// Pixels per world unit at `depth` (for size-attenuated points)
    pub fn pixels_per_unit(&self, depth: f32, height: f32) -> f32 {
        height * 0.5 / (self.tan_half() * depth.max(self.near))
    }
}

/// Orbit controls: auto-rotation, damped drag rotation, zoom
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub auto_rotate: bool,
    settings: OrbitSettings,
    delta_theta: f32,
    delta_phi: f32,
    zoom: f32,
}

const PHI_EPS: f32 = 1e-6;
const IDLE_EPS: f32 = 1e-6;

impl OrbitControls {
    pub fn new(settings: OrbitSettings) -> Self {
        Self { auto_rotate: true, settings, delta_theta: 0.0, delta_phi: 0.0, zoom: 1.0 }
    }

    /// Queue a drag rotation, in pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.delta_theta -= dx * self.settings.drag_sensitivity;
        self.delta_phi -= dy * self.settings.drag_sensitivity;
    }

    /// Queue a zoom; positive notches move the camera closer
    pub fn zoom(&mut self, notches: f32) {
        self.zoom *= self.settings.zoom_step.powf(notches);
    }

    fn is_idle(&self, dt: f32) -> bool {
        (!self.auto_rotate || dt == 0.0)
            && self.delta_theta.abs() < IDLE_EPS
            && self.delta_phi.abs() < IDLE_EPS
            && (self.zoom - 1.0).abs() < IDLE_EPS
    }

    /// Apply auto-rotation, damping and zoom to `pose`. Call once per frame;
    /// `dt = 0` re-synchronises without advancing auto-rotation.
    pub fn update(&mut self, pose: &mut CameraPose, dt: f32) {
        let offset = pose.position - pose.look_at;
        let mut radius = offset.len();
        if radius == 0.0 {
            return;
        }
        let limits = self.settings.min_distance..=self.settings.max_distance;
        if self.is_idle(dt) && limits.contains(&radius) {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotate {
            // auto_rotate_speed is revolutions per minute
            theta -= 2.0 * PI / 60.0 * self.settings.auto_rotate_speed * dt;
        }

        let damping = self.settings.damping_factor;
        theta += self.delta_theta * damping;
        phi += self.delta_phi * damping;
        self.delta_theta *= 1.0 - damping;
        self.delta_phi *= 1.0 - damping;

        phi = phi.clamp(PHI_EPS, PI - PHI_EPS);
        radius = (radius * self.zoom).clamp(self.settings.min_distance, self.settings.max_distance);
        self.zoom = 1.0;

        pose.position = pose.look_at
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }
}

/// Tweens started by a camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraMove {
    pub position: TweenId,
    pub target: TweenId,
}

/// Start moving the camera position and the orbit target to `pose`.
/// Both tweens share duration and ease so they land together;
/// `on_complete` fires once, from the position tween.
pub fn move_camera(
    tweens: &mut Tweens,
    now: f64,
    pose: CameraPose,
    duration: f32,
    ease: Ease,
    on_complete: Option<TweenEvent>,
) -> Result<CameraMove, TweenError> {
    let mut position = Tween::to(TweenTarget::CameraPosition, TweenValue::Vector(pose.position), duration).ease(ease);
    if let Some(event) = on_complete {
        position = position.on_complete(event);
    }
    let position = tweens.start(now, position)?;

    let target = Tween::to(TweenTarget::ControlsTarget, TweenValue::Vector(pose.look_at), duration).ease(ease);
    match tweens.start(now, target) {
        Ok(target) => Ok(CameraMove { position, target }),
        Err(e) => {
            tweens.kill(position);
            Err(e)
        }
    }
}
