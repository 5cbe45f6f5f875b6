//! Pointer picking against the scene's point clouds

use crate::camera::{CameraPose, Projection};
use crate::ray::{ray_from_camera, screen_to_ndc, Ray};
use crate::scene::{ObjectId, Scene};

/// One renderable hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// Index into `Scene::renderables()`
    pub renderable: usize,
    pub name: Option<ObjectId>,
    pub owner: Option<ObjectId>,
}

impl PickHit {
    /// The object this hit stands for: its own name, else its owner
    pub fn resolve(&self) -> Option<ObjectId> {
        self.name.or(self.owner)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Picker {
    /// Max distance between the ray and a point that still counts as a hit
    pub threshold: f32,
}

impl Picker {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Every renderable the ray passes through, nearest first.
    /// A renderable's distance is that of its nearest point hit.
    pub fn intersect(&self, scene: &Scene, ray: &Ray) -> Vec<PickHit> {
        let threshold_sq = self.threshold * self.threshold;
        let mut hits = Vec::new();

        for (index, renderable) in scene.renderables().iter().enumerate() {
            let placement = scene.placement(renderable);
            if !ray.hits_sphere(placement.origin, renderable.bounds * placement.scale + self.threshold) {
                continue;
            }

            let mut nearest: Option<f32> = None;
            for local in &renderable.cloud.points {
                let world = placement.apply(*local);
                if ray.distance_sq_to_point(world) < threshold_sq {
                    let distance = ray.origin.distance(ray.closest_point(world));
                    if nearest.map_or(true, |d| distance < d) {
                        nearest = Some(distance);
                    }
                }
            }

            if let Some(distance) = nearest {
                hits.push(PickHit { distance, renderable: index, name: renderable.name, owner: renderable.owner });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Resolve pixel coordinates to a navigable object
    #[allow(clippy::too_many_arguments)]
    pub fn pick(
        &self,
        scene: &Scene,
        pose: &CameraPose,
        projection: &Projection,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Option<ObjectId> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let (nx, ny) = screen_to_ndc(x, y, width, height);
        let ray = ray_from_camera(nx, ny, pose, projection);
        let hit = self.intersect(scene, &ray).into_iter().next()?;
        let resolved = hit.resolve();
        tracing::trace!(renderable = hit.renderable, distance = hit.distance, ?resolved, "pick");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::math::Vec3;
    use crate::scene::{ObjectGroup, PointCloud, Renderable, RenderableKind};

    fn settings() -> Settings {
        Settings { sphere_segments: 16, ring_segments: 16, ..Settings::default() }
    }

    fn cloud(points: Vec<Vec3>) -> PointCloud {
        PointCloud { points, point_size: 0.1, color: [255, 255, 255], opacity: 1.0 }
    }

    fn down_z(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_owned_sub_object_resolves_to_owner() {
        let mut scene = Scene::empty();
        let about = scene.add_object("about", Vec3::ZERO, 0.5, ObjectGroup::Section, [255, 255, 255], Vec3::ZERO, &settings());
        scene.add_renderable(Renderable::new(RenderableKind::Ring, cloud(vec![Vec3::new(5.0, 0.0, 0.0)]), None, Some(about)));
        scene.add_renderable(Renderable::new(RenderableKind::Starfield, cloud(vec![Vec3::new(-5.0, 0.0, 0.0)]), None, None));

        let picker = Picker::new(0.5);
        let hits = picker.intersect(&scene, &down_z(5.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, None);
        assert_eq!(hits[0].resolve(), Some(about));

        let hits = picker.intersect(&scene, &down_z(-5.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].resolve(), None);
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::empty();
        let far = scene.add_object("far", Vec3::new(0.0, 0.0, -10.0), 0.8, ObjectGroup::Skill, [255, 0, 0], Vec3::ZERO, &settings());
        let near = scene.add_object("near", Vec3::new(0.0, 0.0, 2.0), 0.8, ObjectGroup::Skill, [0, 255, 0], Vec3::ZERO, &settings());

        let hits = Picker::new(0.5).intersect(&scene, &down_z(0.0));
        let order: Vec<_> = hits.iter().map(|h| h.resolve()).collect();
        assert_eq!(order, vec![Some(near), Some(far)]);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn test_pick_through_camera() {
        let mut scene = Scene::empty();
        let web = scene.add_object("WEB", Vec3::ZERO, 0.8, ObjectGroup::Skill, [0, 255, 255], Vec3::ZERO, &settings());
        let pose = CameraPose::home(10.0);
        let projection = Projection::new(75.0, 800.0, 600.0);
        let picker = Picker::new(0.5);

        assert_eq!(picker.pick(&scene, &pose, &projection, 400.0, 300.0, 800.0, 600.0), Some(web));
        assert_eq!(picker.pick(&scene, &pose, &projection, 5.0, 5.0, 800.0, 600.0), None);
    }
}
