//! Scene registry
//!
//! Navigable planets, their decorative sub-objects, and the starfield.
//! Everything is a point cloud. Planets keep their position for the life of
//! the scene; only their spin and hover scale change.
//!
//! Every renderable records which planet it belongs to (`owner`) when it is
//! built, so picking a ring resolves straight to its planet.

use crate::config::Settings;
use crate::content::Portfolio;
use crate::math::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Spin rates in radians per second (scene-graph rates of 0.002 / 0.001 /
/// 0.0002 per frame at 60 fps)
const SKILL_SPIN: f32 = 0.12;
const SECTION_SPIN: f32 = 0.06;
const STARFIELD_SPIN: f32 = 0.012;

const PLANET_POINT_SIZE: f32 = 0.15;
const PLANET_OPACITY: f32 = 0.8;
const RING_POINT_SIZE: f32 = 0.1;
const RING_OPACITY: f32 = 0.5;
const STAR_POINT_SIZE: f32 = 0.1;
const STAR_OPACITY: f32 = 0.8;

/// Planets larger than this get a particle ring
const RING_MIN_SIZE: f32 = 1.0;

/// Handle to a navigable object (index into the registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectGroup {
    Skill,
    Section,
}

/// A named planet the camera can fly to
#[derive(Debug, Clone)]
pub struct NavigableObject {
    pub id: ObjectId,
    pub name: String,
    pub position: Vec3,
    pub visual_size: f32,
    pub group: ObjectGroup,
    pub color: [u8; 3],
    /// Camera offset used when this object is the focus of a section view
    pub view_offset: Vec3,
}

/// Visual-only transform of a planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub rotation_y: f32,
    pub scale: f32,
    spin_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderableKind {
    Planet,
    Ring,
    Starfield,
}

#[derive(Debug, Clone)]
pub struct PointCloud {
    /// Points relative to the renderable's origin
    pub points: Vec<Vec3>,
    pub point_size: f32,
    pub color: [u8; 3],
    pub opacity: f32,
}

impl PointCloud {
    /// Radius of the smallest origin-centred sphere containing every point
    pub fn bounding_radius(&self) -> f32 {
        self.points.iter().map(|p| p.len()).fold(0.0, f32::max)
    }
}

/// Something drawn and pickable
#[derive(Debug, Clone)]
pub struct Renderable {
    pub kind: RenderableKind,
    pub cloud: PointCloud,
    /// The named object this renderable is, if any
    pub name: Option<ObjectId>,
    /// Pickable owner for decorative sub-objects (ring -> planet)
    pub owner: Option<ObjectId>,
    pub bounds: f32,
}

impl Renderable {
    pub fn new(kind: RenderableKind, cloud: PointCloud, name: Option<ObjectId>, owner: Option<ObjectId>) -> Self {
        let bounds = cloud.bounding_radius();
        Self { kind, cloud, name, owner, bounds }
    }
}

/// Where a renderable sits in the world this frame
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub origin: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
}

impl Placement {
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.origin + (local * self.scale).rotate_y(self.rotation_y)
    }
}

pub struct Scene {
    objects: Vec<NavigableObject>,
    transforms: Vec<ObjectTransform>,
    renderables: Vec<Renderable>,
    starfield_rotation: f32,
}

impl Scene {
    pub fn empty() -> Self {
        Self {
            objects: Vec::new(),
            transforms: Vec::new(),
            renderables: Vec::new(),
            starfield_rotation: 0.0,
        }
    }

    /// Build the full scene: skill planets, section planets, starfield
    pub fn build(settings: &Settings, portfolio: &Portfolio) -> Self {
        let mut scene = Self::empty();

        // Skills are smaller but just as dense
        for skill in &portfolio.skills {
            scene.add_object(
                &skill.name,
                skill.position,
                0.8,
                ObjectGroup::Skill,
                skill.color,
                Vec3::ZERO,
                settings,
            );
        }
        for section in &portfolio.sections {
            scene.add_object(
                &section.name,
                section.position,
                section.size,
                ObjectGroup::Section,
                section.color,
                section.view_offset,
                settings,
            );
        }
        scene.add_starfield(settings.particle_count(), settings.star_spread, settings.star_seed);

        tracing::info!(
            objects = scene.objects.len(),
            renderables = scene.renderables.len(),
            points = scene.point_count(),
            "scene built"
        );
        scene
    }

    /// Register a planet with its particle sphere (and ring, if large enough)
    #[allow(clippy::too_many_arguments)]
    pub fn add_object(
        &mut self,
        name: &str,
        position: Vec3,
        size: f32,
        group: ObjectGroup,
        color: [u8; 3],
        view_offset: Vec3,
        settings: &Settings,
    ) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(NavigableObject {
            id,
            name: name.to_string(),
            position,
            visual_size: size,
            group,
            color,
            view_offset,
        });
        self.transforms.push(ObjectTransform {
            rotation_y: 0.0,
            scale: 1.0,
            spin_rate: match group {
                ObjectGroup::Skill => SKILL_SPIN,
                ObjectGroup::Section => SECTION_SPIN,
            },
        });

        let sphere = PointCloud {
            points: sphere_points(size, settings.sphere_segments),
            point_size: PLANET_POINT_SIZE,
            color,
            opacity: PLANET_OPACITY,
        };
        self.add_renderable(Renderable::new(RenderableKind::Planet, sphere, Some(id), Some(id)));

        if size > RING_MIN_SIZE {
            let ring = PointCloud {
                points: ring_points(size * 1.4, size * 1.5, settings.ring_segments),
                point_size: RING_POINT_SIZE,
                color,
                opacity: RING_OPACITY,
            };
            self.add_renderable(Renderable::new(RenderableKind::Ring, ring, None, Some(id)));
        }

        id
    }

    pub fn add_starfield(&mut self, count: usize, spread: f32, seed: u64) {
        let cloud = PointCloud {
            points: starfield_points(count, spread, seed),
            point_size: STAR_POINT_SIZE,
            color: [255, 255, 255],
            opacity: STAR_OPACITY,
        };
        self.add_renderable(Renderable::new(RenderableKind::Starfield, cloud, None, None));
    }

    pub fn add_renderable(&mut self, renderable: Renderable) {
        self.renderables.push(renderable);
    }

    pub fn objects(&self) -> &[NavigableObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&NavigableObject> {
        self.objects.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<&NavigableObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn find_in_group(&self, name: &str, group: ObjectGroup) -> Option<&NavigableObject> {
        self.objects.iter().find(|o| o.group == group && o.name == name)
    }

    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    pub fn point_count(&self) -> usize {
        self.renderables.iter().map(|r| r.cloud.points.len()).sum()
    }

    pub fn transform(&self, id: ObjectId) -> Option<&ObjectTransform> {
        self.transforms.get(id.0)
    }

    pub fn set_scale(&mut self, id: ObjectId, scale: f32) {
        if let Some(t) = self.transforms.get_mut(id.0) {
            t.scale = scale;
        }
    }

    /// Current world placement of a renderable
    pub fn placement(&self, renderable: &Renderable) -> Placement {
        match renderable.owner.or(renderable.name).and_then(|id| Some((self.object(id)?, self.transform(id)?))) {
            Some((object, transform)) => Placement {
                origin: object.position,
                rotation_y: transform.rotation_y,
                scale: transform.scale,
            },
            None => Placement {
                origin: Vec3::ZERO,
                rotation_y: self.starfield_rotation,
                scale: 1.0,
            },
        }
    }

    /// Advance planet and starfield spin
    pub fn advance(&mut self, dt: f32) {
        for t in &mut self.transforms {
            t.rotation_y = (t.rotation_y + t.spin_rate * dt) % (2.0 * PI);
        }
        self.starfield_rotation = (self.starfield_rotation + STARFIELD_SPIN * dt) % (2.0 * PI);
    }
}

/// Vertices of a latitude/longitude sphere, `segments` in each direction
pub fn sphere_points(radius: f32, segments: u32) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    for iy in 0..=segments {
        let v = iy as f32 / segments as f32;
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            points.push(Vec3::new(
                -radius * (u * 2.0 * PI).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * 2.0 * PI).sin() * (v * PI).sin(),
            ));
        }
    }
    points
}

/// Inner and outer edge of a flat ring in the XZ plane
pub fn ring_points(inner: f32, outer: f32, segments: u32) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(2 * (segments as usize + 1));
    for radius in [inner, outer] {
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * 2.0 * PI;
            points.push(Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin()));
        }
    }
    points
}

/// Uniform random points in a cube of half-extent `spread`
pub fn starfield_points(count: usize, spread: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-spread..spread),
                rng.gen_range(-spread..spread),
                rng.gen_range(-spread..spread),
            )
        })
        .collect()
}
