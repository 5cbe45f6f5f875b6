//! Tween engine
//!
//! Time-based interpolation of the animated fields of the stage (camera
//! position, orbit target, overlay opacities, planet scale). Tweens are
//! polled: call `tick(now, stage)` once per frame and handle the returned
//! events.
//!
//! There is no per-field ownership. Two tweens on the same field both write
//! it every frame, in start order, so the most recently started one wins.
//! The starting value is captured on a tween's first tick, so a tween started
//! on top of a running one departs from wherever the field is at that moment.

use crate::math::Vec3;
use crate::scene::ObjectId;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Easing curves. Power curves follow the usual naming: power1 = quad,
/// power2 = cubic, power3 = quart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2InOut,
    Power3InOut,
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power1Out
    }
}

impl Ease {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2InOut => in_out(t, 3),
            Ease::Power3InOut => in_out(t, 4),
        }
    }
}

fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

/// A field the engine can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    CameraPosition,
    /// Only the Z component of the camera position
    CameraZ,
    ControlsTarget,
    EntryOpacity,
    InterfaceOpacity,
    ObjectScale(ObjectId),
}

impl TweenTarget {
    fn is_vector(self) -> bool {
        matches!(self, TweenTarget::CameraPosition | TweenTarget::ControlsTarget)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vector(Vec3),
}

impl TweenValue {
    fn is_finite(self) -> bool {
        match self {
            TweenValue::Scalar(v) => v.is_finite(),
            TweenValue::Vector(v) => v.is_finite(),
        }
    }

    fn lerp(self, to: TweenValue, t: f32) -> TweenValue {
        match (self, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(a + (b - a) * t),
            (TweenValue::Vector(a), TweenValue::Vector(b)) => TweenValue::Vector(a.lerp(b, t)),
            // Kinds are checked at start; keep the destination if they ever differ
            (_, b) => b,
        }
    }
}

/// Anything the engine writes into
pub trait Tweenable {
    fn read(&self, target: TweenTarget) -> Option<TweenValue>;
    fn write(&mut self, target: TweenTarget, value: TweenValue);
}

/// Notifications emitted by tweens, handled by the owner of the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEvent {
    /// Entry screen finished fading out
    EntryFaded,
    /// Camera reached the home pose
    ReachedHome,
    /// Orbit controls must re-read the camera pose
    SyncControls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TweenError {
    #[error("animation engine unavailable")]
    Unavailable,
    #[error("invalid tween duration: {0}")]
    InvalidDuration(f32),
    #[error("non-finite tween destination for {0:?}")]
    NonFinite(TweenTarget),
    #[error("value kind does not match target {0:?}")]
    KindMismatch(TweenTarget),
}

/// Description of a tween before it is started
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub to: TweenValue,
    pub duration: f32,
    pub ease: Ease,
    pub on_update: Option<TweenEvent>,
    pub on_complete: Option<TweenEvent>,
}

impl Tween {
    pub fn to(target: TweenTarget, to: TweenValue, duration: f32) -> Self {
        Self {
            target,
            to,
            duration,
            ease: Ease::default(),
            on_update: None,
            on_complete: None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn on_update(mut self, event: TweenEvent) -> Self {
        self.on_update = Some(event);
        self
    }

    pub fn on_complete(mut self, event: TweenEvent) -> Self {
        self.on_complete = Some(event);
        self
    }

    fn validate(&self) -> Result<(), TweenError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TweenError::InvalidDuration(self.duration));
        }
        if !self.to.is_finite() {
            return Err(TweenError::NonFinite(self.target));
        }
        let vector_value = matches!(self.to, TweenValue::Vector(_));
        if vector_value != self.target.is_vector() {
            return Err(TweenError::KindMismatch(self.target));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Running {
    id: TweenId,
    spec: Tween,
    start: f64,
    from: Option<TweenValue>,
    finished: bool,
}

/// The tween engine
#[derive(Debug)]
pub struct Tweens {
    available: bool,
    next_id: u64,
    running: Vec<Running>,
}

impl Tweens {
    pub fn new() -> Self {
        Self { available: true, next_id: 0, running: Vec::new() }
    }

    /// An engine that refuses every tween (animations switched off)
    pub fn unavailable() -> Self {
        Self { available: false, ..Self::new() }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Start a tween at time `now` (seconds)
    pub fn start(&mut self, now: f64, spec: Tween) -> Result<TweenId, TweenError> {
        if !self.available {
            return Err(TweenError::Unavailable);
        }
        spec.validate()?;
        self.next_id += 1;
        let id = TweenId(self.next_id);
        self.running.push(Running { id, spec, start: now, from: None, finished: false });
        Ok(id)
    }

    /// Stop a tween where it is. Returns false if it already finished.
    pub fn kill(&mut self, id: TweenId) -> bool {
        let before = self.running.len();
        self.running.retain(|t| t.id != id);
        self.running.len() != before
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Advance all tweens to `now`, writing values into `stage`.
    /// Returns update events (every tick) and completion events, in start order.
    pub fn tick<S: Tweenable>(&mut self, now: f64, stage: &mut S) -> Vec<TweenEvent> {
        let mut events = Vec::new();

        for tween in self.running.iter_mut() {
            let from = match tween.from {
                Some(from) => from,
                None => match stage.read(tween.spec.target) {
                    Some(current) => {
                        tween.from = Some(current);
                        current
                    }
                    None => {
                        // Target no longer exists on the stage
                        tween.finished = true;
                        continue;
                    }
                },
            };

            let progress = if tween.spec.duration <= 0.0 {
                1.0
            } else {
                ((now - tween.start) / tween.spec.duration as f64).clamp(0.0, 1.0) as f32
            };
            stage.write(tween.spec.target, from.lerp(tween.spec.to, tween.spec.ease.apply(progress)));

            if let Some(event) = tween.spec.on_update {
                events.push(event);
            }
            if progress >= 1.0 {
                tween.finished = true;
                if let Some(event) = tween.spec.on_complete {
                    events.push(event);
                }
            }
        }

        self.running.retain(|t| !t.finished);
        events
    }
}

impl Default for Tweens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Fields {
        position: Vec3,
        opacity: f32,
    }

    impl Tweenable for Fields {
        fn read(&self, target: TweenTarget) -> Option<TweenValue> {
            match target {
                TweenTarget::CameraPosition => Some(TweenValue::Vector(self.position)),
                TweenTarget::EntryOpacity => Some(TweenValue::Scalar(self.opacity)),
                _ => None,
            }
        }

        fn write(&mut self, target: TweenTarget, value: TweenValue) {
            match (target, value) {
                (TweenTarget::CameraPosition, TweenValue::Vector(v)) => self.position = v,
                (TweenTarget::EntryOpacity, TweenValue::Scalar(v)) => self.opacity = v,
                _ => {}
            }
        }
    }

    #[test]
    fn test_ease_endpoints_and_symmetry() {
        for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2InOut, Ease::Power3InOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Ease::Power3InOut.apply(0.5) - 0.5).abs() < 1e-6);
        // power3 is slower out of the gate than power2
        assert!(Ease::Power3InOut.apply(0.2) < Ease::Power2InOut.apply(0.2));
    }

    #[test]
    fn test_tween_reaches_destination_and_completes_once() {
        let mut tweens = Tweens::new();
        let mut fields = Fields { opacity: 1.0, ..Default::default() };
        tweens
            .start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(0.0), 1.5)
                .on_complete(TweenEvent::EntryFaded))
            .unwrap();

        assert!(tweens.tick(0.0, &mut fields).is_empty());
        assert_eq!(fields.opacity, 1.0);

        assert!(tweens.tick(0.75, &mut fields).is_empty());
        assert!(fields.opacity > 0.0 && fields.opacity < 1.0);

        assert_eq!(tweens.tick(1.5, &mut fields), vec![TweenEvent::EntryFaded]);
        assert_eq!(fields.opacity, 0.0);
        assert!(tweens.is_empty());
        assert!(tweens.tick(2.0, &mut fields).is_empty());
    }

    #[test]
    fn test_later_tween_wins_on_shared_field() {
        let mut tweens = Tweens::new();
        let mut fields = Fields::default();
        let to_a = Vec3::new(10.0, 0.0, 0.0);
        let to_b = Vec3::new(0.0, 10.0, 0.0);
        tweens.start(0.0, Tween::to(TweenTarget::CameraPosition, TweenValue::Vector(to_a), 2.0)).unwrap();
        tweens.tick(0.0, &mut fields);
        tweens.tick(0.5, &mut fields);
        tweens.start(0.5, Tween::to(TweenTarget::CameraPosition, TweenValue::Vector(to_b), 2.0)).unwrap();

        // First tween finishes at 2.0 but the second writes after it
        tweens.tick(2.0, &mut fields);
        assert!(fields.position.y > 0.0);
        tweens.tick(2.5, &mut fields);
        assert_eq!(fields.position, to_b);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_start_rejects_bad_specs() {
        let mut tweens = Tweens::new();
        assert!(matches!(
            tweens.start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(0.0), f32::NAN)),
            Err(TweenError::InvalidDuration(d)) if d.is_nan()
        ));
        assert_eq!(
            tweens.start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(0.0), -1.0)),
            Err(TweenError::InvalidDuration(-1.0))
        );
        assert!(matches!(
            tweens.start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Vector(Vec3::ZERO), 1.0)),
            Err(TweenError::KindMismatch(TweenTarget::EntryOpacity))
        ));
        assert!(matches!(
            tweens.start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(f32::INFINITY), 1.0)),
            Err(TweenError::NonFinite(_))
        ));
        assert!(tweens.is_empty());

        let mut off = Tweens::unavailable();
        assert_eq!(
            off.start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(0.0), 1.0)),
            Err(TweenError::Unavailable)
        );
    }

    #[test]
    fn test_kill_leaves_field_in_place() {
        let mut tweens = Tweens::new();
        let mut fields = Fields { opacity: 1.0, ..Default::default() };
        let id = tweens.start(0.0, Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(0.0), 1.0).ease(Ease::Linear)).unwrap();
        tweens.tick(0.0, &mut fields);
        tweens.tick(0.5, &mut fields);
        assert!(tweens.kill(id));
        assert!(!tweens.kill(id));
        tweens.tick(1.0, &mut fields);
        assert!((fields.opacity - 0.5).abs() < 1e-6);
    }
}
