use crate::confirm::{ConfirmGate, Navigator};
use crate::media::{placeholder_aspect, MediaInfo, MediaSlot};
use crate::motion::{self, BasePose, MotionInputs, MotionProfile, PanelMotion};
use crate::picking::{ray_hit_panel, ClickTargets, ColliderId};
use crate::scene::{PanelDecl, PanelKind};
use bevy_ecs::prelude::*;
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

// ---------- Components ----------

#[derive(Component, Clone)]
pub struct PanelTag {
    pub id: String,
    pub kind: PanelKind,
}

/// Hit-test volume, distinct from whatever the renderer draws. Height follows
/// the authored size; width follows the media aspect once it is known.
#[derive(Component, Clone, Copy, Debug)]
pub struct PanelShape {
    pub size: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl PanelShape {
    pub fn from_size(kind: PanelKind, size: f32, aspect: f32) -> Self {
        match kind {
            PanelKind::Button => {
                Self { size, width: size * 2.0, height: size, depth: size * 0.1 }
            }
            _ => {
                let height = size;
                let width = size * aspect;
                let depth = (width.max(height) * 0.02).clamp(0.02, 0.12);
                Self { size, width, height, depth }
            }
        }
    }

    pub fn with_aspect(&self, kind: PanelKind, aspect: f32) -> Self {
        Self::from_size(kind, self.size, aspect)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width * 0.5, self.height * 0.5, self.depth * 0.5)
    }
}

#[derive(Component, Clone, Copy)]
pub struct ColliderRef(pub ColliderId);

// ---------- Resources ----------

#[derive(Resource, Clone, Copy)]
pub struct TimeDelta(pub f32);

#[derive(Resource, Clone, Copy)]
pub struct AnimationClock(pub f32);

#[derive(Resource, Clone, Copy)]
pub struct CameraPose {
    pub forward: Vec3,
}

/// Snapshot of the selection registry for the running tick. Refreshed before
/// the schedule runs, so consumers always observe the current value.
#[derive(Resource, Clone, Default)]
pub struct SelectedPanel(pub Option<String>);

#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub entity: Entity,
    pub collider: ColliderId,
    pub distance: f32,
}

// ---------- World container ----------

pub struct ExhibitWorld {
    pub world: World,
    schedule: Schedule,
}

impl ExhibitWorld {
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(TimeDelta(0.0));
        world.insert_resource(AnimationClock(0.0));
        world.insert_resource(CameraPose { forward: Vec3::NEG_Z });
        world.insert_resource(SelectedPanel::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(sys_animate_panels);

        Self { world, schedule }
    }

    pub fn spawn_panel(&mut self, decl: &PanelDecl, targets: &mut ClickTargets) -> Entity {
        let id = decl.panel_id();
        let kind = decl.kind;
        let phase = rand::thread_rng().gen_range(0.0..std::f32::consts::TAU);
        let base = BasePose { position: decl.position_vec(), rotation: decl.rotation_quat(), phase };
        let shape = PanelShape::from_size(kind, decl.size, placeholder_aspect(kind));
        let owner = if kind.is_gallery() { Some(id.as_str()) } else { None };
        let collider = targets.register(owner);

        let entity = self
            .world
            .spawn((
                PanelTag { id, kind },
                base,
                MotionProfile::for_kind(kind),
                PanelMotion::at_rest(&base),
                shape,
                ColliderRef(collider),
            ))
            .id();
        if kind != PanelKind::Button {
            self.world.entity_mut(entity).insert(MediaSlot::pending());
        }
        if let Some(link) = decl.link.as_deref() {
            self.world.entity_mut(entity).insert(ConfirmGate::new(link));
        }
        entity
    }

    /// Removes the panel, its collider registration, and (via drop) any live
    /// media pipeline.
    pub fn despawn_panel(&mut self, entity: Entity, targets: &mut ClickTargets) -> bool {
        if let Some(collider) = self.world.get::<ColliderRef>(entity).copied() {
            targets.unregister(collider.0);
        }
        self.world.despawn(entity)
    }

    /// Nearest clickable volume along the ray, tested at the panels' current
    /// animated transforms. Ties are not resolved specially; interactive
    /// volumes are assumed to never share an exact distance.
    pub fn raycast(&mut self, origin: Vec3, dir: Vec3) -> Option<RayHit> {
        let mut hits: SmallVec<[RayHit; 4]> = SmallVec::new();
        let mut query = self.world.query::<(Entity, &ColliderRef, &PanelMotion, &PanelShape)>();
        for (entity, collider, motion, shape) in query.iter(&self.world) {
            if let Some(distance) = ray_hit_panel(
                origin,
                dir,
                motion.position,
                motion.rotation,
                motion.scale,
                shape.half_extents(),
            ) {
                hits.push(RayHit { entity, collider: collider.0, distance });
            }
        }
        hits.into_iter().min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    pub fn update(&mut self, dt: f32, elapsed: f32, camera_forward: Vec3, selected: Option<&str>) {
        self.world.resource_mut::<TimeDelta>().0 = dt;
        self.world.resource_mut::<AnimationClock>().0 = elapsed;
        self.world.resource_mut::<CameraPose>().forward = camera_forward;
        self.world.resource_mut::<SelectedPanel>().0 = selected.map(str::to_string);
        self.schedule.run(&mut self.world);
    }

    pub fn set_hovered(&mut self, entity: Entity, hovered: bool) -> bool {
        if let Some(mut motion) = self.world.get_mut::<PanelMotion>(entity) {
            motion.hovered = hovered;
            if !hovered {
                motion.pressed = false;
            }
            true
        } else {
            false
        }
    }

    pub fn set_pressed(&mut self, entity: Entity, pressed: bool) -> bool {
        if let Some(mut motion) = self.world.get_mut::<PanelMotion>(entity) {
            motion.pressed = pressed;
            true
        } else {
            false
        }
    }

    pub fn panel_motion(&self, entity: Entity) -> Option<PanelMotion> {
        self.world.get::<PanelMotion>(entity).copied()
    }

    pub fn panel_shape(&self, entity: Entity) -> Option<PanelShape> {
        self.world.get::<PanelShape>(entity).copied()
    }

    pub fn panel_id(&self, entity: Entity) -> Option<&str> {
        self.world.get::<PanelTag>(entity).map(|tag| tag.id.as_str())
    }

    pub fn panel_kind(&self, entity: Entity) -> Option<PanelKind> {
        self.world.get::<PanelTag>(entity).map(|tag| tag.kind)
    }

    pub fn entity_for_id(&mut self, id: &str) -> Option<Entity> {
        let mut query = self.world.query::<(Entity, &PanelTag)>();
        query.iter(&self.world).find_map(|(entity, tag)| (tag.id == id).then_some(entity))
    }

    pub fn entity_exists(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    pub fn panel_count(&mut self) -> usize {
        let mut query = self.world.query::<&PanelTag>();
        query.iter(&self.world).count()
    }

    // ---------- Media ----------

    pub fn media_ready(&mut self, id: &str, info: MediaInfo) -> bool {
        let Some(entity) = self.entity_for_id(id) else {
            return false;
        };
        let kind = match self.world.get::<PanelTag>(entity) {
            Some(tag) => tag.kind,
            None => return false,
        };
        let Some(mut slot) = self.world.get_mut::<MediaSlot>(entity) else {
            return false;
        };
        slot.mark_ready(info);
        if let Some(mut shape) = self.world.get_mut::<PanelShape>(entity) {
            *shape = shape.with_aspect(kind, info.aspect);
        }
        true
    }

    pub fn media_failed(&mut self, id: &str) -> bool {
        let Some(entity) = self.entity_for_id(id) else {
            return false;
        };
        match self.world.get_mut::<MediaSlot>(entity) {
            Some(mut slot) => {
                slot.mark_failed();
                true
            }
            None => false,
        }
    }

    /// Video playback follows selection: the selected video plays, everything
    /// else pauses.
    pub fn sync_video_playback(&mut self, selected: Option<&str>) {
        let mut query = self.world.query::<(&PanelTag, &mut MediaSlot)>();
        for (tag, mut slot) in query.iter_mut(&mut self.world) {
            if tag.kind == PanelKind::Video {
                slot.set_playing(selected == Some(tag.id.as_str()));
            }
        }
    }

    // ---------- Confirmation ----------

    pub fn arm_gate(&mut self, entity: Entity) -> bool {
        match self.world.get_mut::<ConfirmGate>(entity) {
            Some(mut gate) => gate.arm(),
            None => false,
        }
    }

    pub fn confirm_yes(&mut self, entity: Entity, navigator: &mut dyn Navigator) -> Option<String> {
        let mut gate = self.world.get_mut::<ConfirmGate>(entity)?;
        let link = gate.link().to_string();
        gate.confirm_yes(navigator).then_some(link)
    }

    pub fn confirm_no(&mut self, entity: Entity) -> bool {
        match self.world.get_mut::<ConfirmGate>(entity) {
            Some(mut gate) => gate.confirm_no(),
            None => false,
        }
    }

    pub fn has_gate(&self, entity: Entity) -> bool {
        self.world.get::<ConfirmGate>(entity).is_some()
    }

    pub fn active_prompts(&mut self) -> Vec<(Entity, String)> {
        let mut query = self.world.query::<(Entity, &ConfirmGate)>();
        query
            .iter(&self.world)
            .filter(|(_, gate)| gate.is_confirming())
            .map(|(entity, gate)| (entity, gate.prompt().to_string()))
            .collect()
    }
}

impl Default for ExhibitWorld {
    fn default() -> Self {
        Self::new()
    }
}

// ---------- Systems ----------

fn sys_animate_panels(
    dt: Res<TimeDelta>,
    clock: Res<AnimationClock>,
    camera: Res<CameraPose>,
    selected: Res<SelectedPanel>,
    mut panels: Query<(&PanelTag, &BasePose, &MotionProfile, &mut PanelMotion)>,
) {
    for (tag, base, profile, mut state) in &mut panels {
        let inputs = MotionInputs {
            selected: selected.0.as_deref() == Some(tag.id.as_str()),
            elapsed: clock.0,
            camera_forward: camera.forward,
        };
        *state = motion::step(profile, base, &inputs, dt.0, &*state);
    }
}
