use glam::Vec2;
use winit::dpi::PhysicalSize;

// Matches the tuning of typical pointer-lock controllers: raw mouse deltas
// are in pixels, look input wants radians.
const LOOK_RADIANS_PER_PIXEL: f32 = 0.002;

pub const DEFAULT_SENSITIVITY: f32 = 8.0;

/// Host-side pointer grab. Fire-and-forget: the engine requests the grab and
/// trusts the platform; a lost grab comes back through `lock_lost`.
pub trait LockHost {
    fn set_pointer_lock(&mut self, locked: bool);
}

/// For headless runs and tests.
pub struct NullLockHost;

impl LockHost for NullLockHost {
    fn set_pointer_lock(&mut self, _locked: bool) {}
}

/// Pointer-lock acquisition state and cursor/look input.
///
/// While locked the aim direction comes from accumulated look deltas and the
/// pointer reads as the fixed screen center; while unlocked the last tracked
/// cursor position is what clicks are raycast through.
pub struct PointerLock {
    locked: bool,
    cursor: Option<Vec2>,
    sensitivity: f32,
    look_delta: Vec2,
}

impl PointerLock {
    pub fn new(sensitivity: f32) -> Self {
        Self { locked: false, cursor: None, sensitivity, look_delta: Vec2::ZERO }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Returns true when the lock state actually changed.
    pub fn acquire(&mut self, host: &mut dyn LockHost) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        self.look_delta = Vec2::ZERO;
        host.set_pointer_lock(true);
        true
    }

    pub fn release(&mut self, host: &mut dyn LockHost) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        host.set_pointer_lock(false);
        true
    }

    /// Platform-initiated unlock (e.g. the user pressed the system escape).
    pub fn lock_lost(&mut self) -> bool {
        let was = self.locked;
        self.locked = false;
        was
    }

    /// Absolute cursor positions are stale while locked; ignore them.
    pub fn track_cursor(&mut self, position: Vec2) {
        if !self.locked {
            self.cursor = Some(position);
        }
    }

    pub fn accumulate_look(&mut self, delta: Vec2) {
        if self.locked {
            self.look_delta += delta;
        }
    }

    /// Drains the buffered look input, scaled by sensitivity, in radians.
    pub fn take_look_delta(&mut self) -> Vec2 {
        let delta = self.look_delta;
        self.look_delta = Vec2::ZERO;
        delta * self.sensitivity * LOOK_RADIANS_PER_PIXEL
    }

    /// Current pointer in normalized device coordinates. Locked pointers read
    /// as the center; an untracked cursor starts there too.
    pub fn pointer_ndc(&self, viewport: PhysicalSize<u32>) -> Option<Vec2> {
        if viewport.width == 0 || viewport.height == 0 {
            return None;
        }
        if self.locked {
            return Some(Vec2::ZERO);
        }
        let cursor = match self.cursor {
            Some(cursor) => cursor,
            None => Vec2::new(viewport.width as f32 * 0.5, viewport.height as f32 * 0.5),
        };
        let x = cursor.x / viewport.width as f32;
        let y = cursor.y / viewport.height as f32;
        Some(Vec2::new(x * 2.0 - 1.0, -(y * 2.0 - 1.0)))
    }

    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_pointer_reads_center() {
        let mut pointer = PointerLock::new(DEFAULT_SENSITIVITY);
        let mut host = NullLockHost;
        pointer.track_cursor(Vec2::new(100.0, 100.0));
        pointer.acquire(&mut host);
        let ndc = pointer.pointer_ndc(PhysicalSize::new(800, 600)).unwrap();
        assert_eq!(ndc, Vec2::ZERO);
    }

    #[test]
    fn unlocked_pointer_maps_cursor_to_ndc() {
        let mut pointer = PointerLock::new(DEFAULT_SENSITIVITY);
        pointer.track_cursor(Vec2::new(800.0, 0.0));
        let ndc = pointer.pointer_ndc(PhysicalSize::new(800, 600)).unwrap();
        assert!((ndc.x - 1.0).abs() < 1e-6);
        assert!((ndc.y - 1.0).abs() < 1e-6);
        assert!(pointer.pointer_ndc(PhysicalSize::new(0, 0)).is_none());
    }

    #[test]
    fn look_deltas_only_accumulate_while_locked() {
        let mut pointer = PointerLock::new(1.0);
        let mut host = NullLockHost;
        pointer.accumulate_look(Vec2::splat(10.0));
        assert_eq!(pointer.take_look_delta(), Vec2::ZERO);
        pointer.acquire(&mut host);
        pointer.accumulate_look(Vec2::new(10.0, 0.0));
        let taken = pointer.take_look_delta();
        assert!(taken.x > 0.0);
        assert_eq!(pointer.take_look_delta(), Vec2::ZERO);
    }
}
