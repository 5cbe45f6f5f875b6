//! Navigation state machine
//!
//! A navigation command closes every panel, picks the destination pose and
//! the auto-rotate mode, starts the camera move, then opens (or schedules)
//! the panels that belong to the destination. A later command supersedes an
//! earlier one: its panel reset also cancels the earlier command's pending
//! reveal, and its camera move stops the earlier one (or the entry fly-in)
//! where it is, so a superseded flight home never reports arriving.

use crate::app::{Deferred, Experience};
use crate::camera::{move_camera, CameraPose};
use crate::math::Vec3;
use crate::panels::Panel;
use crate::scene::ObjectGroup;
use crate::tween::{Ease, TweenError, TweenEvent};

/// Camera pose of the skills overview
pub const SKILLS_OVERVIEW: Vec3 = Vec3::new(0.0, 15.0, 15.0);
/// Camera offset from a skill planet when flying to it
pub const SKILL_VIEW_OFFSET: Vec3 = Vec3::new(2.0, 2.0, 5.0);
/// The skill whose planet also opens the video panel
pub const VIDEO_SKILL: &str = "VIDEO";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Home,
    About,
    Projects,
    Contact,
    Skills,
    Skill(String),
}

impl NavigationTarget {
    /// Parse a nav identifier. Anything that isn't a fixed destination is
    /// taken as a skill name; it may still fail to resolve.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "" => None,
            "home" => Some(Self::Home),
            "about" => Some(Self::About),
            "projects" => Some(Self::Projects),
            "contact" => Some(Self::Contact),
            "skills" => Some(Self::Skills),
            name => Some(Self::Skill(name.to_string())),
        }
    }

    /// Name of the section planet this target flies to
    pub fn section_name(&self) -> Option<&'static str> {
        match self {
            Self::About => Some("about"),
            Self::Projects => Some("projects"),
            Self::Contact => Some("contact"),
            _ => None,
        }
    }

    /// Panel revealed once the camera is on its way
    pub fn section_panel(&self) -> Option<Panel> {
        match self {
            Self::About => Some(Panel::About),
            Self::Projects => Some(Panel::Projects),
            Self::Contact => Some(Panel::Contact),
            _ => None,
        }
    }

    pub fn ease(&self) -> Ease {
        match self {
            Self::Skill(_) => Ease::Power2InOut,
            _ => Ease::Power3InOut,
        }
    }

    /// Sections hold the camera still so the panel stays readable
    pub fn auto_rotate(&self) -> bool {
        self.section_name().is_none()
    }

    /// Nav-bar item highlighted for this target
    pub fn nav_id(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::Skills | Self::Skill(_) => "skills",
        }
    }
}

impl Experience {
    /// Navigate by identifier (nav items, skills list entries)
    pub fn navigate(&mut self, id: &str, now: f64) {
        match NavigationTarget::parse(id) {
            Some(target) => self.navigate_to(target, now),
            None => {
                self.close_panels();
                tracing::debug!(id, "ignoring empty navigation target");
            }
        }
    }

    pub fn navigate_to(&mut self, target: NavigationTarget, now: f64) {
        self.close_panels();
        self.controls.auto_rotate = target.auto_rotate();

        let Some(pose) = self.destination(&target) else {
            tracing::warn!(?target, "no planet for navigation target");
            return;
        };
        tracing::info!(?target, "navigate");

        self.at_home = false;
        self.heading_home = target == NavigationTarget::Home;
        self.active_nav = Some(target.nav_id());

        match &target {
            NavigationTarget::Home => self.panels.show(Panel::Home),
            NavigationTarget::Skills => self.panels.show(Panel::SkillsList),
            // Already closed by the reset; a skill view never keeps the list
            NavigationTarget::Skill(_) => self.panels.hide(Panel::SkillsList),
            _ => {}
        }

        let on_complete = (target == NavigationTarget::Home).then_some(TweenEvent::ReachedHome);
        self.move_camera_to(pose, self.settings.timing.navigation, target.ease(), on_complete, now);

        let reveal = match &target {
            NavigationTarget::Skill(name) if name == VIDEO_SKILL => Some(Panel::Video),
            other => other.section_panel(),
        };
        if let Some(panel) = reveal {
            let delay = self.settings.timing.reveal_delay as f64;
            self.pending_reveal = Some(self.scheduler.schedule(now, delay, Deferred::Reveal(panel)));
        }
    }

    /// Hide every panel and drop a reveal that hasn't happened yet
    pub fn close_panels(&mut self) {
        if self.panels.any_visible() {
            tracing::debug!(panels = ?self.panels.visible_panels().collect::<Vec<_>>(), "closing panels");
        }
        self.panels.close_all();
        if let Some(id) = self.pending_reveal.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Camera pose for a target, None if its planet doesn't exist
    pub fn destination(&self, target: &NavigationTarget) -> Option<CameraPose> {
        match target {
            NavigationTarget::Home => Some(CameraPose::home(self.home_distance())),
            NavigationTarget::Skills => Some(CameraPose::new(SKILLS_OVERVIEW, Vec3::ZERO)),
            NavigationTarget::Skill(name) => {
                let skill = self.scene().find_in_group(name, ObjectGroup::Skill)?;
                Some(CameraPose::new(skill.position + SKILL_VIEW_OFFSET, skill.position))
            }
            section => {
                let name = section.section_name()?;
                let planet = self.scene().find_in_group(name, ObjectGroup::Section)?;
                Some(CameraPose::new(planet.position + planet.view_offset, planet.position))
            }
        }
    }

    /// Tween the camera to `pose`, or put it there at once if tweens can't run
    pub(crate) fn move_camera_to(
        &mut self,
        pose: CameraPose,
        duration: f32,
        ease: Ease,
        on_complete: Option<TweenEvent>,
        now: f64,
    ) {
        if let Some(previous) = self.camera_move.take() {
            self.tweens.kill(previous.position);
            self.tweens.kill(previous.target);
        }
        if let Some(fly_in) = self.entry.fly_in.take() {
            self.tweens.kill(fly_in);
        }
        match move_camera(&mut self.tweens, now, pose, duration, ease, on_complete) {
            Ok(mv) => self.camera_move = Some(mv),
            Err(e) => {
                if e != TweenError::Unavailable {
                    tracing::warn!(error = %e, "camera move failed, snapping");
                }
                self.stage.camera = pose;
                self.controls.update(&mut self.stage.camera, 0.0);
                if let Some(event) = on_complete {
                    self.handle_tween_event(event, now);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::small_config;
    use crate::math::approx_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn experience() -> Experience {
        Experience::new(small_config(), 1280.0, 720.0)
    }

    /// Step the experience at 60 fps from `from` to `to`
    fn run(exp: &mut Experience, from: f64, to: f64) {
        let dt = 1.0 / 60.0;
        let mut now = from;
        while now < to {
            now += dt;
            exp.update(now, dt as f32);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(NavigationTarget::parse("about"), Some(NavigationTarget::About));
        assert_eq!(NavigationTarget::parse("VIDEO"), Some(NavigationTarget::Skill("VIDEO".into())));
        assert_eq!(NavigationTarget::parse(""), None);
    }

    #[test]
    fn test_section_navigation_stops_rotation_and_reveals_late() {
        let mut exp = experience();
        exp.navigate("about", 0.0);
        assert!(!exp.controls.auto_rotate);
        assert!(!exp.panels.any_visible());
        assert_eq!(exp.active_nav, Some("about"));

        run(&mut exp, 0.0, 0.9);
        assert!(!exp.panels.is_visible(Panel::About));
        run(&mut exp, 0.9, 1.05);
        assert!(exp.panels.is_visible(Panel::About));

        run(&mut exp, 1.05, 2.2);
        let about = exp.scene().find("about").unwrap().position;
        assert!(approx_eq(exp.camera().position, about + Vec3::new(5.0, 2.0, 5.0), 1e-3));
        assert!(approx_eq(exp.camera().look_at, about, 1e-3));
    }

    #[test]
    fn test_skills_overview_opens_list_immediately() {
        let mut exp = experience();
        exp.navigate("skills", 0.0);
        assert!(exp.panels.is_visible(Panel::SkillsList));
        assert!(exp.controls.auto_rotate);
        assert_eq!(exp.destination(&NavigationTarget::Skills).unwrap().position, SKILLS_OVERVIEW);
    }

    #[test]
    fn test_skill_closes_list() {
        let mut exp = experience();
        exp.navigate("skills", 0.0);
        exp.navigate("WEB", 0.1);
        assert!(!exp.panels.any_visible());
        let dest = exp.destination(&NavigationTarget::Skill("WEB".into())).unwrap();
        assert_eq!(dest.position, Vec3::new(10.0, 2.0, 5.0));
        assert_eq!(dest.look_at, Vec3::new(8.0, 0.0, 0.0));
    }

    #[test]
    fn test_video_skill_reveals_once_after_delay() {
        let mut exp = experience();
        exp.navigate("VIDEO", 0.0);
        run(&mut exp, 0.0, 0.95);
        assert!(!exp.panels.is_visible(Panel::Video));
        run(&mut exp, 0.95, 1.1);
        assert!(exp.panels.is_visible(Panel::Video));
        assert!(exp.scheduler.is_empty());

        // Closing it by hand sticks: nothing else is queued to reopen it
        exp.close_panels();
        run(&mut exp, 1.1, 4.0);
        assert!(!exp.panels.is_visible(Panel::Video));
    }

    #[test]
    fn test_unknown_target_is_a_noop() {
        let mut exp = experience();
        let before = *exp.camera();
        exp.navigate("moon", 0.0);
        assert!(!exp.panels.any_visible());
        assert!(exp.tweens.is_empty());
        assert!(exp.scheduler.is_empty());
        assert_eq!(*exp.camera(), before);

        // Section names aren't skills
        exp.navigate_to(NavigationTarget::Skill("about".into()), 0.0);
        assert!(exp.tweens.is_empty());
    }

    #[test]
    fn test_new_navigation_cancels_pending_reveal() {
        let mut exp = experience();
        exp.navigate("about", 0.0);
        exp.navigate("projects", 0.5);
        run(&mut exp, 0.0, 1.2);
        assert!(!exp.panels.is_visible(Panel::About));
        run(&mut exp, 1.2, 1.6);
        assert!(exp.panels.is_visible(Panel::Projects));
        assert!(!exp.panels.is_visible(Panel::About));
    }

    #[test]
    fn test_home_sets_at_home_on_arrival() {
        let mut exp = experience();
        exp.navigate("contact", 0.0);
        run(&mut exp, 0.0, 2.1);
        assert!(!exp.at_home);
        exp.navigate("home", 2.1);
        assert!(exp.panels.is_visible(Panel::Home));
        assert!(!exp.at_home);
        run(&mut exp, 2.1, 4.2);
        assert!(exp.at_home);
        assert!((exp.camera().distance() - 10.0).abs() < 1e-2);
    }

    #[test]
    fn test_superseded_flight_home_never_arrives() {
        let mut exp = experience();
        exp.navigate("home", 0.0);
        exp.navigate("about", 0.5);
        assert_eq!(exp.tweens.len(), 2);
        run(&mut exp, 0.5, 3.0);
        assert!(!exp.at_home);
        assert!(exp.tweens.is_empty());
    }

    #[test]
    fn test_snaps_without_tween_engine() {
        let mut config = small_config();
        config.settings.animations = false;
        let mut exp = Experience::new(config, 1280.0, 720.0);
        exp.navigate("home", 0.0);
        assert!(exp.at_home);
        assert_eq!(exp.camera().look_at, Vec3::ZERO);
        assert!((exp.camera().distance() - 10.0).abs() < 1e-4);
    }

    fn target_id() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["home", "about", "projects", "contact", "skills", "WEB", "VIDEO", "3D", "moon"])
    }

    proptest! {
        #[test]
        fn prop_second_navigation_only_keeps_its_own_panels(first in target_id(), second in target_id()) {
            let mut exp = experience();
            exp.navigate(first, 0.0);
            exp.navigate(second, 0.1);
            run(&mut exp, 0.1, 1.5);

            let mut alone = experience();
            alone.navigate(second, 0.1);
            run(&mut alone, 0.1, 1.5);

            prop_assert_eq!(exp.panels, alone.panels);
        }
    }
}
