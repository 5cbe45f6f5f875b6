//! Experience state
//!
//! One `Experience` owns everything that changes while the site runs: the
//! stage the tween engine writes into, orbit controls, deferred tasks, panel
//! visibility, hover and entry state. Nothing here touches the window, so
//! tests drive it by calling `update(now, dt)` with made-up timestamps.
//!
//! Per-frame order: tween writes and their events, then deferred tasks that
//! have come due (oldest first), then orbit controls, then spin and tagline.

use crate::camera::{CameraMove, CameraPose, OrbitControls, Projection};
use crate::config::{Settings, SiteConfig};
use crate::content::Portfolio;
use crate::entry::{EntryPath, EntrySequencer};
use crate::interaction::HoverState;
use crate::math::Vec3;
use crate::panels::{Panel, PanelVisibility};
use crate::picker::Picker;
use crate::scene::Scene;
use crate::scheduler::{Scheduler, TaskId};
use crate::tween::{TweenEvent, TweenTarget, TweenValue, Tweenable, Tweens};
use crate::typewriter::Typewriter;

/// Work scheduled for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Show a panel once the camera has (mostly) arrived
    Reveal(Panel),
    /// Force the entry transition if the animated path hasn't finished
    EntryFallback,
}

/// Everything the tween engine can write
pub struct Stage {
    pub camera: CameraPose,
    pub entry_opacity: f32,
    pub interface_opacity: f32,
    pub scene: Scene,
}

impl Tweenable for Stage {
    fn read(&self, target: TweenTarget) -> Option<TweenValue> {
        match target {
            TweenTarget::CameraPosition => Some(TweenValue::Vector(self.camera.position)),
            TweenTarget::CameraZ => Some(TweenValue::Scalar(self.camera.position.z)),
            TweenTarget::ControlsTarget => Some(TweenValue::Vector(self.camera.look_at)),
            TweenTarget::EntryOpacity => Some(TweenValue::Scalar(self.entry_opacity)),
            TweenTarget::InterfaceOpacity => Some(TweenValue::Scalar(self.interface_opacity)),
            TweenTarget::ObjectScale(id) => self.scene.transform(id).map(|t| TweenValue::Scalar(t.scale)),
        }
    }

    fn write(&mut self, target: TweenTarget, value: TweenValue) {
        match (target, value) {
            (TweenTarget::CameraPosition, TweenValue::Vector(v)) => self.camera.position = v,
            (TweenTarget::CameraZ, TweenValue::Scalar(z)) => self.camera.position.z = z,
            (TweenTarget::ControlsTarget, TweenValue::Vector(v)) => self.camera.look_at = v,
            (TweenTarget::EntryOpacity, TweenValue::Scalar(v)) => self.entry_opacity = v,
            (TweenTarget::InterfaceOpacity, TweenValue::Scalar(v)) => self.interface_opacity = v,
            (TweenTarget::ObjectScale(id), TweenValue::Scalar(v)) => self.scene.set_scale(id, v),
            _ => {}
        }
    }
}

/// Window size in drawing units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixels per drawing unit
    pub dpi_scale: f32,
}

impl Viewport {
    /// Width in CSS pixels, which is what the layout breakpoint is measured in
    pub fn css_width(&self) -> f32 {
        self.width / self.dpi_scale.max(1.0)
    }

    /// Device pixel ratio, capped at 2
    pub fn pixel_ratio(&self) -> f32 {
        self.dpi_scale.clamp(1.0, 2.0)
    }
}

pub struct Experience {
    pub settings: Settings,
    pub portfolio: Portfolio,
    pub stage: Stage,
    pub projection: Projection,
    pub controls: OrbitControls,
    pub tweens: Tweens,
    pub scheduler: Scheduler<Deferred>,
    pub panels: PanelVisibility,
    /// Reveal scheduled by the last navigation, cancelled by the next one
    pub(crate) pending_reveal: Option<TaskId>,
    /// Tweens of the last navigation's camera move, stopped by the next one
    pub(crate) camera_move: Option<CameraMove>,
    /// Camera has arrived at the home view; resize keeps it there
    pub at_home: bool,
    /// A flight home (entry fly-in or home navigation) is under way
    pub heading_home: bool,
    /// Highlighted nav-bar item
    pub active_nav: Option<&'static str>,
    pub hover: HoverState,
    pub entry: EntrySequencer,
    /// Main interface shown (entry finished)
    pub interface_visible: bool,
    pub typewriter: Typewriter,
    pub picker: Picker,
    pub viewport: Viewport,
}

impl Experience {
    pub fn new(config: SiteConfig, width: f32, height: f32) -> Self {
        let SiteConfig { settings, portfolio } = config;
        let scene = Scene::build(&settings, &portfolio);
        let tweens = if settings.animations { Tweens::new() } else { Tweens::unavailable() };

        Self {
            stage: Stage {
                camera: CameraPose::new(Vec3::new(0.0, 0.0, settings.camera_start_z), Vec3::ZERO),
                entry_opacity: 1.0,
                interface_opacity: 0.0,
                scene,
            },
            projection: Projection::new(settings.fov_degrees, width, height),
            controls: OrbitControls::new(settings.orbit.clone()),
            tweens,
            scheduler: Scheduler::new(),
            panels: PanelVisibility::home(),
            pending_reveal: None,
            camera_move: None,
            at_home: false,
            heading_home: false,
            active_nav: Some("home"),
            hover: HoverState::default(),
            entry: EntrySequencer::new(&portfolio.enter_label),
            interface_visible: false,
            typewriter: Typewriter::new(portfolio.typed_strings.clone()),
            picker: Picker::new(settings.pick_threshold),
            viewport: Viewport { width, height, dpi_scale: 1.0 },
            settings,
            portfolio,
        }
    }

    /// Camera distance of the home view for the current viewport
    pub fn home_distance(&self) -> f32 {
        self.settings.home_distance(self.viewport.css_width())
    }

    pub fn camera(&self) -> &CameraPose {
        &self.stage.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    /// Advance one frame. `now` is absolute time in seconds, `dt` the frame delta.
    pub fn update(&mut self, now: f64, dt: f32) {
        for event in self.tweens.tick(now, &mut self.stage) {
            self.handle_tween_event(event, now);
        }
        for (id, task) in self.scheduler.due(now) {
            self.run_deferred(id, task, now);
        }
        self.controls.update(&mut self.stage.camera, dt);
        self.stage.scene.advance(dt);
        self.typewriter.advance(dt);
    }

    pub(crate) fn handle_tween_event(&mut self, event: TweenEvent, now: f64) {
        match event {
            TweenEvent::EntryFaded => self.finish_entry_fade(now),
            TweenEvent::ReachedHome => {
                self.at_home = true;
                self.heading_home = false;
            }
            TweenEvent::SyncControls => self.controls.update(&mut self.stage.camera, 0.0),
        }
    }

    fn run_deferred(&mut self, id: TaskId, task: Deferred, now: f64) {
        match task {
            Deferred::Reveal(panel) => {
                if self.pending_reveal == Some(id) {
                    self.pending_reveal = None;
                }
                tracing::debug!(panel = panel.id(), "reveal panel");
                self.panels.show(panel);
            }
            Deferred::EntryFallback => self.force_entry(now, EntryPath::Timeout),
        }
    }
}

/// Default site with a sparse scene, for tests
#[cfg(test)]
pub(crate) fn small_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.settings.star_count = 20;
    config.settings.sphere_segments = 32;
    config.settings.ring_segments = 8;
    config
}
