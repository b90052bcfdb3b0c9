use crate::scene::PanelKind;
use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

// Exponential smoothing rate equivalent to a 0.12 per-tick factor at 60 Hz.
pub const SMOOTHING_RATE: f32 = 7.67;

pub fn smoothing_factor(dt: f32) -> f32 {
    1.0 - (-SMOOTHING_RATE * dt.max(0.0)).exp()
}

/// Authored resting pose plus the random phase offset that keeps neighboring
/// panels from bobbing in unison.
#[derive(Component, Clone, Copy, Debug)]
pub struct BasePose {
    pub position: Vec3,
    pub rotation: Quat,
    pub phase: f32,
}

/// Idle-motion and feedback tuning for one panel kind.
#[derive(Component, Clone, Copy, Debug)]
pub struct MotionProfile {
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub yaw_amplitude: f32,
    pub yaw_frequency: f32,
    /// Distance a selected panel eases toward the camera. Zero disables the
    /// offset (videos grow in place instead).
    pub select_offset: f32,
    pub selected_scale: f32,
    pub hover_scale: f32,
    pub press_scale: f32,
}

impl MotionProfile {
    pub fn for_kind(kind: PanelKind) -> Self {
        match kind {
            PanelKind::Image => Self {
                bob_amplitude: 0.03,
                bob_frequency: 0.3,
                yaw_amplitude: 0.01,
                yaw_frequency: 2.0,
                select_offset: 0.5,
                selected_scale: 1.2,
                hover_scale: 1.0,
                press_scale: 0.9,
            },
            PanelKind::Video => Self {
                bob_amplitude: 0.06,
                bob_frequency: 0.8,
                yaw_amplitude: 0.005,
                yaw_frequency: 6.0,
                select_offset: 0.0,
                selected_scale: 1.3,
                hover_scale: 1.0,
                press_scale: 0.9,
            },
            PanelKind::Paper => Self {
                bob_amplitude: 0.08,
                bob_frequency: 0.9,
                yaw_amplitude: 0.01,
                yaw_frequency: 5.0,
                select_offset: 0.8,
                selected_scale: 1.2,
                hover_scale: 1.0,
                press_scale: 0.9,
            },
            PanelKind::Button => Self {
                bob_amplitude: 0.04,
                bob_frequency: 0.9,
                yaw_amplitude: 0.009,
                yaw_frequency: 5.0,
                select_offset: 0.0,
                selected_scale: 1.2,
                hover_scale: 1.08,
                press_scale: 0.9,
            },
        }
    }
}

/// Live transform plus the pointer sub-state, updated every tick.
#[derive(Component, Clone, Copy, Debug)]
pub struct PanelMotion {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: Quat,
    pub hovered: bool,
    pub pressed: bool,
}

impl PanelMotion {
    pub fn at_rest(base: &BasePose) -> Self {
        Self { position: base.position, scale: 1.0, rotation: base.rotation, hovered: false, pressed: false }
    }
}

/// Everything the step reads besides the panel's own record.
#[derive(Clone, Copy, Debug)]
pub struct MotionInputs {
    pub selected: bool,
    pub elapsed: f32,
    pub camera_forward: Vec3,
}

/// One tick of procedural motion. Pure: no captured state, no side effects;
/// callers own the record and decide where the output lands.
pub fn step(profile: &MotionProfile, base: &BasePose, inputs: &MotionInputs, dt: f32, state: &PanelMotion) -> PanelMotion {
    let alpha = smoothing_factor(dt);

    let bob = (inputs.elapsed * profile.bob_frequency + base.phase).sin() * profile.bob_amplitude;
    let mut target_position = base.position + Vec3::Y * bob;
    if inputs.selected && profile.select_offset > 0.0 {
        target_position -= inputs.camera_forward * profile.select_offset;
    }

    let target_scale = if inputs.selected {
        profile.selected_scale
    } else if state.pressed {
        profile.press_scale
    } else if state.hovered {
        profile.hover_scale
    } else {
        1.0
    };

    let yaw = (inputs.elapsed * profile.yaw_frequency + base.phase).sin() * profile.yaw_amplitude;
    let target_rotation = base.rotation * Quat::from_rotation_y(yaw);

    PanelMotion {
        position: state.position.lerp(target_position, alpha),
        scale: state.scale + (target_scale - state.scale) * alpha,
        rotation: state.rotation.slerp(target_rotation, alpha),
        hovered: state.hovered,
        pressed: state.pressed,
    }
}
