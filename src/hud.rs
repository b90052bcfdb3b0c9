use glam::Vec2;

/// Crosshair rendering mode. Centered while the pointer is locked, following
/// the cursor otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrosshairMode {
    Centered,
    AtCursor(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosshairStyle {
    Dot,
    Plus,
}

/// Read-only consumer of pointer state; never feeds anything back into the
/// engine. The host draws it.
pub struct CrosshairHud {
    pub size: f32,
    pub style: CrosshairStyle,
    mode: CrosshairMode,
}

impl CrosshairHud {
    pub fn new(size: f32, style: CrosshairStyle) -> Self {
        Self { size, style, mode: CrosshairMode::Centered }
    }

    pub fn observe(&mut self, locked: bool, cursor: Option<Vec2>) {
        self.mode = if locked {
            CrosshairMode::Centered
        } else {
            match cursor {
                Some(position) => CrosshairMode::AtCursor(position),
                None => CrosshairMode::Centered,
            }
        };
    }

    pub fn mode(&self) -> CrosshairMode {
        self.mode
    }
}

/// Help panel listing the controls, toggled with the help key.
pub struct ControlsHud {
    visible: bool,
}

impl ControlsHud {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn help_rows() -> &'static [(&'static str, &'static str)] {
        &[
            ("W / Up", "Move forward"),
            ("S / Down", "Move backward"),
            ("A / Left", "Move left"),
            ("D / Right", "Move right"),
            ("Q / Space", "Move up"),
            ("E / Shift", "Move down"),
            ("Esc", "Cursor control"),
            ("Mouse", "Look around"),
            ("Click", "Interact"),
        ]
    }
}

impl Default for ControlsHud {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosshair_centers_while_locked() {
        let mut hud = CrosshairHud::new(5.0, CrosshairStyle::Dot);
        hud.observe(false, Some(Vec2::new(40.0, 60.0)));
        assert_eq!(hud.mode(), CrosshairMode::AtCursor(Vec2::new(40.0, 60.0)));
        hud.observe(true, Some(Vec2::new(40.0, 60.0)));
        assert_eq!(hud.mode(), CrosshairMode::Centered);
    }
}
