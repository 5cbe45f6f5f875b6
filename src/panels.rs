//! Content panel visibility

/// Content panels of the main interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Home = 0,
    About = 1,
    Projects = 2,
    Contact = 3,
    Video = 4,
    SkillsList = 5,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Home,
        Panel::About,
        Panel::Projects,
        Panel::Contact,
        Panel::Video,
        Panel::SkillsList,
    ];

    /// Stable identifier; section panels share it with their planet
    pub fn id(self) -> &'static str {
        match self {
            Panel::Home => "home",
            Panel::About => "about",
            Panel::Projects => "projects",
            Panel::Contact => "contact",
            Panel::Video => "video",
            Panel::SkillsList => "skills-list",
        }
    }
}

/// Which panels are showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelVisibility {
    visible: [bool; 6],
}

impl PanelVisibility {
    /// All panels hidden
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state of the main interface: only the home panel
    pub fn home() -> Self {
        let mut panels = Self::new();
        panels.show(Panel::Home);
        panels
    }

    pub fn show(&mut self, panel: Panel) {
        self.visible[panel as usize] = true;
    }

    pub fn hide(&mut self, panel: Panel) {
        self.visible[panel as usize] = false;
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible[panel as usize]
    }

    pub fn close_all(&mut self) {
        self.visible = [false; 6];
    }

    pub fn any_visible(&self) -> bool {
        self.visible.iter().any(|v| *v)
    }

    pub fn visible_panels(&self) -> impl Iterator<Item = Panel> + '_ {
        Panel::ALL.iter().copied().filter(|p| self.is_visible(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_hide_close_all() {
        let mut panels = PanelVisibility::home();
        assert!(panels.is_visible(Panel::Home));
        panels.show(Panel::Video);
        assert_eq!(panels.visible_panels().collect::<Vec<_>>(), vec![Panel::Home, Panel::Video]);
        panels.hide(Panel::Home);
        assert_eq!(panels.visible_panels().collect::<Vec<_>>(), vec![Panel::Video]);
        panels.close_all();
        assert!(!panels.any_visible());
    }

    #[test]
    fn test_section_panels_share_planet_names() {
        for name in crate::config::SECTION_NAMES {
            assert!(Panel::ALL.iter().any(|p| p.id() == name));
        }
    }
}
