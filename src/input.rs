use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Buffered keyboard/mouse state for one tick. Events arrive between ticks
/// from the host windowing layer; everything here is plain mutable data read
/// on the single logical render thread.
pub struct Input {
    bindings: InputBindings,
    pub mouse_delta: (f32, f32),
    forward_held: bool,
    back_held: bool,
    left_held: bool,
    right_held: bool,
    up_held: bool,
    down_held: bool,
    help_toggle_pressed: bool,
    escape_pressed: bool,
    cursor_pos: Option<(f32, f32)>,
    left_pressed: bool,
    left_press_started: bool,
    left_released: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(path: impl AsRef<Path>) -> Self {
        let bindings = InputBindings::load_or_default(path);
        Self::with_bindings(bindings)
    }

    fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            bindings,
            mouse_delta: (0.0, 0.0),
            forward_held: false,
            back_held: false,
            left_held: false,
            right_held: false,
            up_held: false,
            down_held: false,
            help_toggle_pressed: false,
            escape_pressed: false,
            cursor_pos: None,
            left_pressed: false,
            left_press_started: false,
            left_released: false,
        }
    }

    pub fn push(&mut self, ev: InputEvent) {
        match &ev {
            InputEvent::Key { key, pressed } => {
                self.apply_key_binding(key, *pressed);
            }
            InputEvent::MouseMove { dx, dy } => {
                self.mouse_delta.0 += *dx;
                self.mouse_delta.1 += *dy;
            }
            InputEvent::MouseButton { button, pressed } => {
                if *button == MouseButton::Left {
                    if *pressed {
                        self.left_pressed = true;
                        self.left_press_started = true;
                    } else {
                        self.left_pressed = false;
                        self.left_released = true;
                    }
                }
            }
            InputEvent::CursorPos { x, y } => {
                self.cursor_pos = Some((*x, *y));
            }
            InputEvent::Other => {}
        }
    }

    pub fn clear_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.left_press_started = false;
        self.left_released = false;
        self.help_toggle_pressed = false;
        self.escape_pressed = false;
    }

    pub fn held(&self, action: MoveAction) -> bool {
        match action {
            MoveAction::Forward => self.forward_held,
            MoveAction::Back => self.back_held,
            MoveAction::Left => self.left_held,
            MoveAction::Right => self.right_held,
            MoveAction::Up => self.up_held,
            MoveAction::Down => self.down_held,
        }
    }

    pub fn take_left_press(&mut self) -> bool {
        let was = self.left_press_started;
        self.left_press_started = false;
        was
    }

    pub fn take_left_release(&mut self) -> bool {
        let was = self.left_released;
        self.left_released = false;
        was
    }

    pub fn take_help_toggle(&mut self) -> bool {
        let was = self.help_toggle_pressed;
        self.help_toggle_pressed = false;
        was
    }

    pub fn take_escape(&mut self) -> bool {
        let was = self.escape_pressed;
        self.escape_pressed = false;
        was
    }

    pub fn left_held(&self) -> bool {
        self.left_pressed
    }

    pub fn cursor_position(&self) -> Option<(f32, f32)> {
        self.cursor_pos
    }

    fn apply_key_binding(&mut self, key: &Key, pressed: bool) {
        if let Some(binding_key) = InputKeyBinding::from_event_key(key) {
            let actions: Vec<_> = self.bindings.actions_for_key(&binding_key).collect();
            for action in actions {
                self.update_action_state(action, pressed);
            }
        }
    }

    fn update_action_state(&mut self, action: InputAction, pressed: bool) {
        match action {
            InputAction::Move(MoveAction::Forward) => self.forward_held = pressed,
            InputAction::Move(MoveAction::Back) => self.back_held = pressed,
            InputAction::Move(MoveAction::Left) => self.left_held = pressed,
            InputAction::Move(MoveAction::Right) => self.right_held = pressed,
            InputAction::Move(MoveAction::Up) => self.up_held = pressed,
            InputAction::Move(MoveAction::Down) => self.down_held = pressed,
            InputAction::ToggleHelp => {
                if pressed {
                    self.help_toggle_pressed = true;
                }
            }
            InputAction::ReleasePointer => {
                if pressed {
                    self.escape_pressed = true;
                }
            }
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::with_bindings(InputBindings::default())
    }
}

/// The six locomotion actions the camera controller integrates each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
struct InputBindings {
    key_to_actions: HashMap<InputKeyBinding, Vec<InputAction>>,
}

impl InputBindings {
    fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<InputConfigFile>(&contents) {
                Ok(config) => Self::from_config(config, &path.display().to_string()),
                Err(err) => {
                    eprintln!(
                        "[input] Failed to parse {}: {err}. Falling back to default bindings.",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!(
                    "[input] Failed to read {}: {err}. Falling back to default bindings.",
                    path.display()
                );
                Self::default()
            }
        }
    }

    fn from_config(config: InputConfigFile, origin: &str) -> Self {
        let overrides = config.into_overrides(origin);
        Self::with_overrides(overrides)
    }

    fn with_overrides(overrides: HashMap<InputAction, Vec<InputKeyBinding>>) -> Self {
        let mut action_map = Self::default_action_map();
        for (action, keys) in overrides {
            if keys.is_empty() {
                continue;
            }
            action_map.insert(action, keys);
        }
        Self::from_action_map(action_map)
    }

    fn default_action_map() -> HashMap<InputAction, Vec<InputKeyBinding>> {
        use InputAction::*;
        let mut map = HashMap::new();
        map.insert(
            Move(MoveAction::Forward),
            vec![InputKeyBinding::character("w"), InputKeyBinding::named(NamedKeyCode::ArrowUp)],
        );
        map.insert(
            Move(MoveAction::Back),
            vec![InputKeyBinding::character("s"), InputKeyBinding::named(NamedKeyCode::ArrowDown)],
        );
        map.insert(
            Move(MoveAction::Left),
            vec![InputKeyBinding::character("a"), InputKeyBinding::named(NamedKeyCode::ArrowLeft)],
        );
        map.insert(
            Move(MoveAction::Right),
            vec![InputKeyBinding::character("d"), InputKeyBinding::named(NamedKeyCode::ArrowRight)],
        );
        map.insert(
            Move(MoveAction::Up),
            vec![InputKeyBinding::character("q"), InputKeyBinding::named(NamedKeyCode::Space)],
        );
        map.insert(
            Move(MoveAction::Down),
            vec![InputKeyBinding::character("e"), InputKeyBinding::named(NamedKeyCode::Shift)],
        );
        map.insert(ToggleHelp, vec![InputKeyBinding::character("h")]);
        map.insert(ReleasePointer, vec![InputKeyBinding::named(NamedKeyCode::Escape)]);
        map
    }

    fn from_action_map(action_map: HashMap<InputAction, Vec<InputKeyBinding>>) -> Self {
        let mut key_to_actions: HashMap<InputKeyBinding, Vec<InputAction>> = HashMap::new();
        for (action, keys) in action_map {
            for key in keys {
                key_to_actions.entry(key).or_default().push(action);
            }
        }
        Self { key_to_actions }
    }

    fn actions_for_key(&self, key: &InputKeyBinding) -> impl Iterator<Item = InputAction> + '_ {
        self.key_to_actions.get(key).into_iter().flatten().copied()
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::from_action_map(Self::default_action_map())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum InputKeyBinding {
    Character(String),
    Named(NamedKeyCode),
}

impl InputKeyBinding {
    fn character(ch: &str) -> Self {
        Self::Character(ch.to_lowercase())
    }

    fn named(named: NamedKeyCode) -> Self {
        Self::Named(named)
    }

    fn from_event_key(key: &Key) -> Option<Self> {
        match key {
            Key::Character(ch) => {
                let s = ch.to_string();
                if s.is_empty() {
                    None
                } else {
                    Some(Self::Character(s.to_lowercase()))
                }
            }
            Key::Named(named) => NamedKeyCode::from_named_key(named).map(Self::Named),
            _ => None,
        }
    }

    fn from_config_value(raw: &str) -> Result<Self, ()> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(());
        }
        if let Some(named) = NamedKeyCode::from_str(&normalized) {
            return Ok(Self::Named(named));
        }
        if normalized.chars().count() == 1 {
            return Ok(Self::Character(normalized));
        }
        Err(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NamedKeyCode {
    Space,
    Shift,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl NamedKeyCode {
    fn from_named_key(key: &NamedKey) -> Option<Self> {
        match key {
            NamedKey::Space => Some(Self::Space),
            NamedKey::Shift => Some(Self::Shift),
            NamedKey::Escape => Some(Self::Escape),
            NamedKey::ArrowUp => Some(Self::ArrowUp),
            NamedKey::ArrowDown => Some(Self::ArrowDown),
            NamedKey::ArrowLeft => Some(Self::ArrowLeft),
            NamedKey::ArrowRight => Some(Self::ArrowRight),
            _ => None,
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "space" => Some(Self::Space),
            "shift" | "left_shift" | "right_shift" => Some(Self::Shift),
            "escape" | "esc" => Some(Self::Escape),
            "arrowup" | "up" => Some(Self::ArrowUp),
            "arrowdown" | "down" => Some(Self::ArrowDown),
            "arrowleft" | "left" => Some(Self::ArrowLeft),
            "arrowright" | "right" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum InputAction {
    Move(MoveAction),
    ToggleHelp,
    ReleasePointer,
}

impl InputAction {
    fn from_str(value: &str) -> Option<Self> {
        match value {
            "forward" => Some(Self::Move(MoveAction::Forward)),
            "back" | "backward" => Some(Self::Move(MoveAction::Back)),
            "left" => Some(Self::Move(MoveAction::Left)),
            "right" => Some(Self::Move(MoveAction::Right)),
            "up" | "ascend" => Some(Self::Move(MoveAction::Up)),
            "down" | "descend" => Some(Self::Move(MoveAction::Down)),
            "toggle_help" => Some(Self::ToggleHelp),
            "release_pointer" => Some(Self::ReleasePointer),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InputConfigFile {
    #[serde(default)]
    bindings: HashMap<String, Vec<String>>,
}

impl InputConfigFile {
    fn into_overrides(self, origin: &str) -> HashMap<InputAction, Vec<InputKeyBinding>> {
        let mut overrides = HashMap::new();
        for (action_name, keys) in self.bindings {
            let action_key = action_name.trim().to_lowercase();
            match InputAction::from_str(&action_key) {
                Some(action) => {
                    let mut parsed = Vec::new();
                    for key in keys {
                        match InputKeyBinding::from_config_value(&key) {
                            Ok(binding) => parsed.push(binding),
                            Err(_) => eprintln!(
                                "[input] {origin}: unknown key '{key}' for action '{action_name}', ignoring."
                            ),
                        }
                    }
                    if parsed.is_empty() {
                        eprintln!(
                            "[input] {origin}: action '{action_name}' has no valid keys, keeping defaults."
                        );
                        continue;
                    }
                    overrides.insert(action, parsed);
                }
                None => eprintln!("[input] {origin}: unknown action '{action_name}', ignoring."),
            }
        }
        overrides
    }
}

pub enum InputEvent {
    Key { key: Key, pressed: bool },
    MouseMove { dx: f32, dy: f32 },
    MouseButton { button: MouseButton, pressed: bool },
    CursorPos { x: f32, y: f32 },
    Other,
}

impl InputEvent {
    pub fn from_window_event(ev: &WindowEvent) -> Self {
        match ev {
            WindowEvent::CursorMoved { position, .. } => {
                InputEvent::CursorPos { x: position.x as f32, y: position.y as f32 }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                InputEvent::MouseButton { button: *button, pressed: *state == ElementState::Pressed }
            }
            WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
                key: event.logical_key.clone(),
                pressed: event.state == ElementState::Pressed,
            },
            _ => InputEvent::Other,
        }
    }

    pub fn from_device_event(ev: &DeviceEvent) -> Self {
        match ev {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => {
                InputEvent::MouseMove { dx: *dx as f32, dy: *dy as f32 }
            }
            _ => InputEvent::Other,
        }
    }
}
