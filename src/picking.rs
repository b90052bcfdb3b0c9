use crate::camera::Camera;
use crate::ecs::ExhibitWorld;
use crate::selection::{SelectionChange, SelectionRegistry};
use glam::{Mat4, Vec2, Vec3};
use std::collections::HashMap;
use winit::dpi::PhysicalSize;

/// Handle for one registered clickable volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId(u32);

/// Collider-handle → owning-panel-id map, populated at registration. Gives
/// O(1) hit resolution with no parent-chain walk. Buttons register without an
/// owner: they are clickable but never selectable.
pub struct ClickTargets {
    owners: HashMap<ColliderId, Option<String>>,
    next: u32,
}

impl ClickTargets {
    pub fn new() -> Self {
        Self { owners: HashMap::new(), next: 0 }
    }

    pub fn register(&mut self, owner: Option<&str>) -> ColliderId {
        let id = ColliderId(self.next);
        self.next += 1;
        self.owners.insert(id, owner.map(str::to_string));
        id
    }

    pub fn unregister(&mut self, id: ColliderId) {
        self.owners.remove(&id);
    }

    pub fn owner(&self, id: ColliderId) -> Option<Option<&str>> {
        self.owners.get(&id).map(|owner| owner.as_deref())
    }

    pub fn is_registered(&self, id: ColliderId) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl Default for ClickTargets {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves a click into a selection mutation: camera + pointer → world ray →
/// nearest registered collider → owner lookup → `select`.
pub struct ClickDispatcher {
    pub targets: ClickTargets,
}

impl ClickDispatcher {
    pub fn new() -> Self {
        Self { targets: ClickTargets::new() }
    }

    /// A miss and an unowned hit are both quiet no-ops; only an owned hit
    /// touches the registry.
    pub fn dispatch(
        &self,
        world: &mut ExhibitWorld,
        camera: &Camera,
        pointer_ndc: Vec2,
        viewport: PhysicalSize<u32>,
        registry: &mut SelectionRegistry,
    ) -> Option<SelectionChange> {
        let (origin, dir) = camera.screen_ray(pointer_ndc, viewport)?;
        let hit = world.raycast(origin, dir)?;
        match self.targets.owner(hit.collider) {
            Some(Some(id)) => Some(registry.select(id)),
            Some(None) => {
                eprintln!("[picking] hit collider {:?} with no registered owner, ignoring", hit.collider);
                None
            }
            None => {
                eprintln!("[picking] hit unregistered collider {:?}, ignoring", hit.collider);
                None
            }
        }
    }
}

impl Default for ClickDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance along the ray to a panel volume at its current animated
/// transform, or None when the ray misses.
pub fn ray_hit_panel(
    origin: Vec3,
    dir: Vec3,
    translation: Vec3,
    rotation: glam::Quat,
    scale: f32,
    half: Vec3,
) -> Option<f32> {
    if !scale.is_finite() {
        return None;
    }
    let scale = scale.abs().max(0.0001);
    let world = Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, translation);
    let inv = world.inverse();
    if !matrix_is_finite(&inv) {
        return None;
    }
    let origin_local = inv.transform_point3(origin);
    let dir_local = inv.transform_vector3(dir);
    if dir_local.length_squared() <= f32::EPSILON {
        return None;
    }
    let dir_local = dir_local.normalize();
    let (t_local, hit_local) = ray_aabb_intersection(origin_local, dir_local, -half, half)?;
    if t_local < 0.0 {
        return None;
    }
    let hit_world = world.transform_point3(hit_local);
    Some((hit_world - origin).length())
}

fn matrix_is_finite(mat: &Mat4) -> bool {
    mat.to_cols_array().iter().all(|v| v.is_finite())
}

pub fn ray_aabb_intersection(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_min: f32 = 0.0;
    let mut t_max: f32 = f32::INFINITY;
    let origin_arr = origin.to_array();
    let dir_arr = dir.to_array();
    let min_arr = min.to_array();
    let max_arr = max.to_array();
    for i in 0..3 {
        let o = origin_arr[i];
        let d = dir_arr[i];
        let min_axis = min_arr[i];
        let max_axis = max_arr[i];
        if d.abs() < 1e-6 {
            if o < min_axis || o > max_axis {
                return None;
            }
        } else {
            let inv_d = 1.0 / d;
            let mut t1 = (min_axis - o) * inv_d;
            let mut t2 = (max_axis - o) * inv_d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
    }
    if t_max < 0.0 {
        return None;
    }
    let t_hit = if t_min >= 0.0 { t_min } else { t_max };
    let hit = origin + dir * t_hit;
    Some((t_hit, hit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn ray_hits_rotated_panel() {
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let hit = ray_hit_panel(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            rotation,
            1.0,
            Vec3::new(2.0, 2.0, 0.05),
        );
        assert!(hit.is_some());
        let miss = ray_hit_panel(
            Vec3::new(10.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            rotation,
            1.0,
            Vec3::new(2.0, 2.0, 0.05),
        );
        assert!(miss.is_none());
    }

    #[test]
    fn unregistering_removes_owner() {
        let mut targets = ClickTargets::new();
        let a = targets.register(Some("a"));
        let b = targets.register(None);
        assert_eq!(targets.owner(a), Some(Some("a")));
        assert_eq!(targets.owner(b), Some(None));
        targets.unregister(a);
        assert_eq!(targets.owner(a), None);
        assert_eq!(targets.len(), 1);
    }
}
