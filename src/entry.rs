//! Entry sequence: splash screen to main interface
//!
//! `enter()` arms two tweens (splash fade-out, camera fly-in) and a fallback
//! task. Whichever of "fade finished" and "fallback fired" comes first
//! completes the entry; the other finds the state already `Complete` and
//! does nothing. With no tween engine, or if arming fails, the fallback
//! path runs straight away.

use crate::app::{Deferred, Experience};
use crate::camera::CameraPose;
use crate::scheduler::TaskId;
use crate::tween::{Ease, Tween, TweenError, TweenEvent, TweenId, TweenTarget, TweenValue};

pub const INITIALIZING_LABEL: &str = "INITIALIZING...";
/// Trigger opacity while the sequence runs
const TRIGGER_BUSY_OPACITY: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    NotStarted,
    InProgress,
    Complete,
}

/// How the entry reached `Complete`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPath {
    /// Splash fade finished
    Animated,
    /// No tween engine
    EngineMissing,
    /// Starting the tweens failed
    ArmingFailed,
    /// Fallback timer fired first
    Timeout,
}

#[derive(Debug, Clone)]
pub struct EntrySequencer {
    pub state: EntryState,
    /// Text on the enter button
    pub label: String,
    pub trigger_opacity: f32,
    /// Splash screen still on screen
    pub screen_visible: bool,
    pub completed_via: Option<EntryPath>,
    fallback: Option<TaskId>,
    fade: Option<TweenId>,
    /// Stopped by the first navigation so it can't report arriving home
    pub(crate) fly_in: Option<TweenId>,
}

impl EntrySequencer {
    pub fn new(label: &str) -> Self {
        Self {
            state: EntryState::NotStarted,
            label: label.to_string(),
            trigger_opacity: 1.0,
            screen_visible: true,
            completed_via: None,
            fallback: None,
            fade: None,
            fly_in: None,
        }
    }
}

impl Experience {
    /// Enter button pressed. Only the first call does anything.
    pub fn enter(&mut self, now: f64) {
        if self.entry.state != EntryState::NotStarted {
            tracing::debug!(state = ?self.entry.state, "enter ignored");
            return;
        }
        tracing::info!("entering");
        self.entry.state = EntryState::InProgress;
        self.entry.label = INITIALIZING_LABEL.to_string();
        self.entry.trigger_opacity = TRIGGER_BUSY_OPACITY;

        if !self.tweens.is_available() {
            tracing::warn!("tween engine unavailable, skipping entry animation");
            self.force_entry(now, EntryPath::EngineMissing);
            return;
        }

        let fallback_after = self.settings.timing.entry_fallback as f64;
        self.entry.fallback = Some(self.scheduler.schedule(now, fallback_after, Deferred::EntryFallback));

        if let Err(e) = self.arm_entry(now) {
            tracing::error!(error = %e, "entry animation failed to start");
            self.force_entry(now, EntryPath::ArmingFailed);
        }
    }

    fn arm_entry(&mut self, now: f64) -> Result<(), TweenError> {
        let timing = &self.settings.timing;
        let fade = Tween::to(TweenTarget::EntryOpacity, TweenValue::Scalar(0.0), timing.entry_fade_out)
            .ease(Ease::Power2InOut)
            .on_complete(TweenEvent::EntryFaded);
        let fly_in = Tween::to(TweenTarget::CameraZ, TweenValue::Scalar(self.home_distance()), timing.entry_camera)
            .ease(Ease::Power2InOut)
            .on_update(TweenEvent::SyncControls)
            .on_complete(TweenEvent::ReachedHome);

        self.entry.fade = Some(self.tweens.start(now, fade)?);
        self.entry.fly_in = Some(self.tweens.start(now, fly_in)?);
        self.heading_home = true;
        Ok(())
    }

    /// Splash finished fading: bring in the interface
    pub(crate) fn finish_entry_fade(&mut self, now: f64) {
        if self.entry.state != EntryState::InProgress {
            return;
        }
        if let Some(id) = self.entry.fallback.take() {
            self.scheduler.cancel(id);
        }
        self.entry.fade = None;
        self.entry.screen_visible = false;
        self.interface_visible = true;

        let fade_in = Tween::to(TweenTarget::InterfaceOpacity, TweenValue::Scalar(1.0), self.settings.timing.interface_fade_in);
        if let Err(e) = self.tweens.start(now, fade_in) {
            tracing::warn!(error = %e, "interface fade-in failed");
            self.stage.interface_opacity = 1.0;
        }
        self.complete_entry(EntryPath::Animated);
    }

    /// Skip straight to the main interface
    pub(crate) fn force_entry(&mut self, _now: f64, path: EntryPath) {
        if self.entry.state != EntryState::InProgress {
            return;
        }
        tracing::warn!(?path, "forcing entry transition");
        if let Some(id) = self.entry.fallback.take() {
            self.scheduler.cancel(id);
        }
        for id in [self.entry.fade.take(), self.entry.fly_in.take()].into_iter().flatten() {
            self.tweens.kill(id);
        }

        self.entry.screen_visible = false;
        self.stage.entry_opacity = 0.0;
        self.interface_visible = true;
        self.stage.interface_opacity = 1.0;
        self.stage.camera = CameraPose::home(self.home_distance());
        self.controls.update(&mut self.stage.camera, 0.0);
        self.at_home = true;
        self.heading_home = false;
        self.complete_entry(path);
    }

    fn complete_entry(&mut self, path: EntryPath) {
        self.entry.state = EntryState::Complete;
        self.entry.completed_via = Some(path);
        tracing::info!(?path, "entry complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::small_config;
    use crate::config::SiteConfig;
    use crate::math::Vec3;

    fn run(exp: &mut Experience, from: f64, to: f64) {
        let dt = 1.0 / 60.0;
        let mut now = from;
        while now < to {
            now += dt;
            exp.update(now, dt as f32);
        }
    }

    fn assert_interface_up(exp: &Experience, path: EntryPath) {
        assert_eq!(exp.entry.state, EntryState::Complete);
        assert_eq!(exp.entry.completed_via, Some(path));
        assert!(exp.interface_visible);
        assert!(!exp.entry.screen_visible);
        assert!((exp.stage.interface_opacity - 1.0).abs() < 1e-6);
    }

    fn with(config: SiteConfig) -> Experience {
        Experience::new(config, 1280.0, 720.0)
    }

    #[test]
    fn test_normal_entry() {
        let mut exp = with(small_config());
        exp.enter(0.0);
        assert_eq!(exp.entry.label, INITIALIZING_LABEL);
        assert_eq!(exp.entry.trigger_opacity, 0.7);
        assert_eq!(exp.entry.state, EntryState::InProgress);

        run(&mut exp, 0.0, 1.4);
        assert!(!exp.interface_visible);
        run(&mut exp, 1.4, 1.6);
        assert_eq!(exp.entry.state, EntryState::Complete);
        assert!(exp.scheduler.is_empty(), "fallback cancelled");

        run(&mut exp, 1.6, 4.0);
        assert_interface_up(&exp, EntryPath::Animated);
        assert!(exp.at_home);
        assert!(exp.camera().distance() < 15.0);
    }

    #[test]
    fn test_entry_without_engine() {
        let mut config = small_config();
        config.settings.animations = false;
        let mut exp = with(config);
        exp.enter(0.0);
        assert_interface_up(&exp, EntryPath::EngineMissing);
        assert_eq!(exp.camera().position, Vec3::new(0.0, 0.0, 10.0));
        assert!(exp.scheduler.is_empty());
    }

    #[test]
    fn test_entry_arming_error() {
        let mut config = small_config();
        config.settings.timing.entry_camera = f32::NAN;
        let mut exp = with(config);
        exp.enter(0.0);
        assert_interface_up(&exp, EntryPath::ArmingFailed);
        // The fade that did start was stopped, the fallback dropped
        assert!(exp.tweens.is_empty());
        assert!(exp.scheduler.is_empty());
        run(&mut exp, 0.0, 5.0);
        assert_eq!(exp.entry.completed_via, Some(EntryPath::ArmingFailed));
    }

    #[test]
    fn test_entry_fallback_wins_race() {
        let mut config = small_config();
        config.settings.timing.entry_fade_out = 10.0;
        let mut exp = with(config);
        exp.enter(0.0);
        run(&mut exp, 0.0, 3.4);
        assert_eq!(exp.entry.state, EntryState::InProgress);
        run(&mut exp, 3.4, 3.6);
        assert_interface_up(&exp, EntryPath::Timeout);
        assert_eq!(exp.stage.entry_opacity, 0.0);

        // The fade never gets to complete it a second time
        run(&mut exp, 3.6, 12.0);
        assert_interface_up(&exp, EntryPath::Timeout);
    }

    #[test]
    fn test_second_enter_changes_nothing() {
        let mut exp = with(small_config());
        exp.enter(0.0);
        let tweens = exp.tweens.len();
        let tasks = exp.scheduler.len();
        exp.enter(0.5);
        assert_eq!(exp.tweens.len(), tweens);
        assert_eq!(exp.scheduler.len(), tasks);

        run(&mut exp, 0.0, 4.0);
        let camera = *exp.camera();
        exp.enter(4.0);
        assert_eq!(*exp.camera(), camera);
        assert_eq!(exp.entry.completed_via, Some(EntryPath::Animated));
        assert!(exp.tweens.is_empty());
    }
}
