//! Portfolio content
//!
//! Everything the visitor reads or clicks: planet layout, panel text,
//! project list, contact links. Loaded from the `portfolio` half of
//! `assets/site.ron`; the defaults below are the shipped site.

use crate::math::Vec3;
use serde::{Serialize, Deserialize};

/// A skill planet (orbits the origin, reachable from the skills list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPlanet {
    pub name: String,
    pub color: [u8; 3],
    pub position: Vec3,
    #[serde(default)]
    pub blurb: String,
}

/// A section planet (about / projects / contact)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPlanet {
    pub name: String,
    pub size: f32,
    pub color: [u8; 3],
    pub position: Vec3,
    /// Camera offset from the planet when this section is focused
    pub view_offset: Vec3,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSection {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub title: String,
    pub subtitle: String,
    pub enter_label: String,
    pub tagline_prefix: String,
    pub typed_strings: Vec<String>,
    pub skills_title: String,
    pub skills: Vec<SkillPlanet>,
    pub sections: Vec<SectionPlanet>,
    pub projects: Vec<Project>,
    pub contact_links: Vec<Link>,
    pub video: VideoSection,
}

impl Portfolio {
    pub fn section(&self, name: &str) -> Option<&SectionPlanet> {
        self.sections.iter().find(|s| s.name == name)
    }
}

fn skill(name: &str, color: [u8; 3], position: Vec3, blurb: &str) -> SkillPlanet {
    SkillPlanet { name: name.to_string(), color, position, blurb: blurb.to_string() }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            title: "THE YAS".to_string(),
            subtitle: "A universe of skill, one particle at a time.".to_string(),
            enter_label: "ENTER".to_string(),
            tagline_prefix: "I am ".to_string(),
            typed_strings: [
                "A Professional Filmmaker.",
                "Programmer.",
                "Designer.",
                "3D Artist.",
                "A Universe of Skill.",
                "The YAS",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            skills_title: "SKILLS".to_string(),
            skills: vec![
                skill("WEB", [0x00, 0xff, 0xff], Vec3::new(8.0, 0.0, 0.0), "Sites and web apps, front to back."),
                skill("AI", [0xff, 0x00, 0xff], Vec3::new(-8.0, 2.0, -2.0), "Applied AI and prompt-driven tooling."),
                skill("APP", [0x00, 0xff, 0x00], Vec3::new(0.0, 8.0, 2.0), "Mobile and desktop applications."),
                skill("ML", [0xff, 0xaa, 0x00], Vec3::new(0.0, -8.0, -2.0), "Model training and data pipelines."),
                skill("3D", [0xff, 0x00, 0x00], Vec3::new(5.0, 5.0, 5.0), "Modelling, lighting, real-time scenes."),
                skill("VIDEO", [0xff, 0x00, 0x80], Vec3::new(-6.0, -4.0, 4.0), "Direction, editing and colour."),
            ],
            sections: vec![
                SectionPlanet {
                    name: "about".to_string(),
                    size: 3.0,
                    color: [0x33, 0x66, 0xff],
                    position: Vec3::new(-20.0, 5.0, -10.0),
                    view_offset: Vec3::new(5.0, 2.0, 5.0),
                    title: "ABOUT".to_string(),
                    body: "Filmmaker, programmer and designer. I build things that move: films, \
                           interactive scenes, and the software behind them.\n\nThis site is one of \
                           them - every planet is a cloud of particles you can fly to."
                        .to_string(),
                },
                SectionPlanet {
                    name: "projects".to_string(),
                    size: 4.0,
                    color: [0x99, 0x33, 0xff],
                    position: Vec3::new(25.0, -5.0, 10.0),
                    view_offset: Vec3::new(-6.0, 3.0, 6.0),
                    title: "PROJECTS".to_string(),
                    body: String::new(),
                },
                SectionPlanet {
                    name: "contact".to_string(),
                    size: 2.5,
                    color: [0xff, 0xff, 0xff],
                    position: Vec3::new(0.0, 15.0, -20.0),
                    view_offset: Vec3::new(0.0, 0.0, 6.0),
                    title: "CONTACT".to_string(),
                    body: "Open to commissions and collaborations.".to_string(),
                },
            ],
            projects: vec![
                Project {
                    title: "Particle Universe".to_string(),
                    summary: "This portfolio: a navigable scene of particle planets.".to_string(),
                    url: None,
                },
                Project {
                    title: "Short Films".to_string(),
                    summary: "Written, shot and edited end to end.".to_string(),
                    url: None,
                },
            ],
            contact_links: vec![
                Link { label: "Email".to_string(), url: "mailto:hello@example.com".to_string() },
                Link { label: "GitHub".to_string(), url: "https://github.com/".to_string() },
            ],
            video: VideoSection {
                title: "VIDEO".to_string(),
                body: "Showreel and recent edits.".to_string(),
                url: None,
            },
        }
    }
}
