//! Pointer, keyboard and window input
//!
//! Hover tracking, click-to-navigate, orbit drag and zoom, and resize.
//! Coordinates are in drawing units, the same space as `Viewport`.

use crate::app::Experience;
use crate::math::Vec3;
use crate::navigation::NavigationTarget;
use crate::scene::{ObjectGroup, ObjectId};
use crate::camera::CameraPose;
use crate::tween::{Ease, Tween, TweenEvent, TweenTarget, TweenValue};

/// Scale of the hovered planet
pub const HOVER_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// The planet under the pointer, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    pub object: Option<ObjectId>,
}

impl Experience {
    /// Navigable object under a pixel
    pub fn pick(&self, x: f32, y: f32) -> Option<ObjectId> {
        self.picker.pick(
            &self.stage.scene,
            &self.stage.camera,
            &self.projection,
            x,
            y,
            self.viewport.width,
            self.viewport.height,
        )
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, now: f64) {
        let hit = if self.interface_visible { self.pick(x, y) } else { None };
        self.set_hover(hit, now);
    }

    /// Pointer went over the overlay (or left the window): nothing is hovered
    pub fn pointer_left(&mut self, now: f64) {
        self.set_hover(None, now);
    }

    fn set_hover(&mut self, hit: Option<ObjectId>, now: f64) {
        if hit == self.hover.object {
            return;
        }
        if let Some(previous) = self.hover.object.take() {
            self.pulse(previous, 1.0, now);
        }
        if let Some(id) = hit {
            if let Some(object) = self.scene().object(id) {
                tracing::debug!(name = %object.name, size = object.visual_size, "hover");
            }
            self.pulse(id, HOVER_SCALE, now);
        }
        self.hover.object = hit;
    }

    fn pulse(&mut self, id: ObjectId, scale: f32, now: f64) {
        let tween = Tween::to(TweenTarget::ObjectScale(id), TweenValue::Scalar(scale), self.settings.timing.hover_pulse);
        if self.tweens.start(now, tween).is_err() {
            self.stage.scene.set_scale(id, scale);
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        if self.hover.object.is_some() {
            CursorStyle::Pointer
        } else {
            CursorStyle::Default
        }
    }

    /// Click on the scene: skills go to the overview, sections to themselves
    pub fn pointer_clicked(&mut self, x: f32, y: f32, now: f64) {
        if !self.interface_visible {
            return;
        }
        let Some(object) = self.pick(x, y).and_then(|id| self.stage.scene.object(id)) else {
            tracing::debug!(x, y, "click hit nothing");
            return;
        };
        tracing::debug!(name = %object.name, "clicked planet");

        let target = match object.group {
            ObjectGroup::Skill => Some(NavigationTarget::Skills),
            ObjectGroup::Section => NavigationTarget::parse(&object.name),
        };
        if let Some(target) = target {
            self.navigate_to(target, now);
        }
    }

    /// Left-drag in pixels. Leaves the home view.
    pub fn orbit_drag(&mut self, dx: f32, dy: f32) {
        self.controls.drag(dx, dy);
        self.at_home = false;
    }

    /// Wheel zoom. Leaves the home view.
    pub fn zoom(&mut self, notches: f32) {
        if notches != 0.0 {
            self.controls.zoom(notches);
            self.at_home = false;
        }
    }

    /// Window resized. At home, the camera eases to the new home distance;
    /// on the way home, the flight is retargeted to it.
    pub fn resize(&mut self, width: f32, height: f32, now: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.projection.resize(width, height);

        if self.heading_home {
            let home = self.home_distance();
            tracing::debug!(home, "resize on the way home");
            let settle = self.settings.timing.resize_settle;
            self.move_camera_to(CameraPose::home(home), settle, Ease::Power3InOut, Some(TweenEvent::ReachedHome), now);
            return;
        }
        if !self.at_home {
            return;
        }
        let home = self.home_distance();
        let camera = self.stage.camera;
        let direction = (camera.position - camera.look_at).normalize();
        if direction == Vec3::ZERO {
            return;
        }
        let destination = camera.look_at + direction * home;
        tracing::debug!(home, "resize at home");

        let tween = Tween::to(TweenTarget::CameraPosition, TweenValue::Vector(destination), self.settings.timing.resize_settle);
        if self.tweens.start(now, tween).is_err() {
            self.stage.camera.position = destination;
        }
    }

    pub fn set_dpi_scale(&mut self, dpi_scale: f32) {
        self.viewport.dpi_scale = dpi_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::small_config;
    use crate::panels::Panel;
    use proptest::prelude::*;

    fn entered() -> Experience {
        let mut config = small_config();
        config.settings.animations = false;
        let mut exp = Experience::new(config, 1280.0, 720.0);
        exp.enter(0.0);
        exp
    }

    /// Screen position of a planet's centre
    fn screen_of(exp: &Experience, name: &str) -> (f32, f32) {
        let camera = exp.camera();
        let position = exp.scene().find(name).unwrap().position;
        let p = exp
            .projection
            .world_to_screen(&camera.basis(), camera.position, position, exp.viewport.width, exp.viewport.height)
            .unwrap();
        (p.x, p.y)
    }

    fn run(exp: &mut Experience, from: f64, to: f64) {
        let dt = 1.0 / 60.0;
        let mut now = from;
        while now < to {
            now += dt;
            exp.update(now, dt as f32);
        }
    }

    #[test]
    fn test_hover_scales_and_sets_cursor() {
        let mut config = small_config();
        config.settings.animations = false;
        // No stars, so nothing but planets can sit on the pointer ray
        config.settings.star_count = 0;
        let mut exp = Experience::new(config, 1280.0, 720.0);
        exp.enter(0.0);
        exp.navigate("skills", 0.0);

        // AI is unobstructed from the overview (3D covers WEB from here)
        let (x, y) = screen_of(&exp, "AI");
        exp.pointer_moved(x, y, 0.0);
        let ai = exp.scene().find("AI").unwrap().id;
        assert_eq!(exp.hover.object, Some(ai));
        assert_eq!(exp.cursor(), CursorStyle::Pointer);
        assert_eq!(exp.scene().transform(ai).unwrap().scale, HOVER_SCALE);

        exp.pointer_moved(1.0, 1.0, 0.1);
        assert_eq!(exp.hover.object, None);
        assert_eq!(exp.cursor(), CursorStyle::Default);
        assert_eq!(exp.scene().transform(ai).unwrap().scale, 1.0);
    }

    #[test]
    fn test_entry_fly_in_cannot_claim_home_after_navigation() {
        let mut exp = Experience::new(small_config(), 1280.0, 720.0);
        exp.enter(0.0);
        run(&mut exp, 0.0, 1.6);
        assert!(exp.interface_visible);
        exp.navigate_to(NavigationTarget::About, 1.6);
        run(&mut exp, 1.6, 4.0);
        assert!(!exp.at_home);

        let before = *exp.camera();
        exp.resize(500.0, 800.0, 4.0);
        run(&mut exp, 4.0, 6.0);
        assert_eq!(*exp.camera(), before);
    }

    #[test]
    fn test_resize_on_the_way_home_retargets() {
        let mut exp = Experience::new(small_config(), 1280.0, 720.0);
        exp.enter(0.0);
        run(&mut exp, 0.0, 4.0);
        exp.navigate("contact", 4.0);
        run(&mut exp, 4.0, 6.1);
        exp.navigate("home", 6.1);
        assert!(exp.heading_home && !exp.at_home);

        exp.resize(500.0, 800.0, 6.5);
        assert_eq!(exp.home_distance(), 20.0);
        run(&mut exp, 6.5, 10.0);
        assert!(exp.at_home && !exp.heading_home);
        assert!((exp.camera().distance() - 20.0).abs() < 1e-2);
    }

    #[test]
    fn test_resize_during_entry_retargets_fly_in() {
        let mut exp = Experience::new(small_config(), 1280.0, 720.0);
        exp.enter(0.0);
        run(&mut exp, 0.0, 1.0);
        exp.resize(500.0, 800.0, 1.0);
        run(&mut exp, 1.0, 5.0);
        assert!(exp.at_home);
        assert!(exp.interface_visible);
        assert!((exp.camera().distance() - 20.0).abs() < 1e-2);
    }

    #[test]
    fn test_click_skill_goes_to_overview() {
        let mut exp = entered();
        exp.navigate("skills", 0.0);
        exp.close_panels();
        let (x, y) = screen_of(&exp, "APP");
        exp.pointer_clicked(x, y, 0.0);
        assert!(exp.panels.is_visible(Panel::SkillsList));
        assert_eq!(exp.active_nav, Some("skills"));
    }

    #[test]
    fn test_click_section_navigates_and_marks_nav() {
        let mut exp = entered();
        exp.navigate("about", 0.0);
        let (x, y) = screen_of(&exp, "about");
        exp.navigate("home", 0.0);
        // Look at about again from its viewpoint and click it
        let pose = exp.destination(&NavigationTarget::About).unwrap();
        exp.stage.camera = pose;
        exp.pointer_clicked(x, y, 1.0);
        assert_eq!(exp.active_nav, Some("about"));
        assert!(!exp.controls.auto_rotate);
        run(&mut exp, 1.0, 2.1);
        assert!(exp.panels.is_visible(Panel::About));
    }

    #[test]
    fn test_clicks_ignored_before_entry() {
        let mut exp = Experience::new(small_config(), 1280.0, 720.0);
        exp.pointer_clicked(640.0, 360.0, 0.0);
        exp.pointer_moved(640.0, 360.0, 0.0);
        assert!(exp.tweens.is_empty());
        assert_eq!(exp.hover.object, None);
    }

    #[test]
    fn test_drag_and_zoom_leave_home() {
        let mut exp = entered();
        assert!(exp.at_home);
        exp.orbit_drag(10.0, 0.0);
        assert!(!exp.at_home);

        exp.navigate("home", 0.0);
        assert!(exp.at_home);
        exp.zoom(0.0);
        assert!(exp.at_home);
        exp.zoom(1.0);
        assert!(!exp.at_home);
    }

    #[test]
    fn test_resize_away_from_home_keeps_camera() {
        let mut exp = entered();
        exp.navigate("contact", 0.0);
        let before = *exp.camera();
        exp.resize(500.0, 800.0, 0.0);
        assert_eq!(*exp.camera(), before);
        assert_eq!(exp.home_distance(), 20.0);
    }

    proptest! {
        #[test]
        fn prop_resize_tracks_home_distance(width in 200.0f32..2500.0, height in 200.0f32..1600.0) {
            let mut config = small_config();
            config.settings.star_count = 1;
            let mut exp = Experience::new(config, 1280.0, 720.0);
            exp.controls.auto_rotate = false;
            exp.at_home = true;
            exp.stage.camera = CameraPose::home(10.0);

            exp.resize(width, height, 0.0);
            let expected = if width >= 768.0 { 10.0 } else { 20.0 };
            prop_assert_eq!(exp.home_distance(), expected);

            exp.update(1.0, 1.0 / 60.0);
            prop_assert!((exp.camera().distance() - expected).abs() < 1e-3);
        }
    }
}
