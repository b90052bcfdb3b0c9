use crate::camera::{Camera, FloatController};
use crate::config::ExhibitConfig;
use crate::confirm::Navigator;
use crate::content::ContentLibrary;
use crate::ecs::ExhibitWorld;
use crate::events::{EventBus, ExhibitEvent};
use crate::hud::{ControlsHud, CrosshairHud, CrosshairStyle};
use crate::input::{Input, InputEvent};
use crate::media::MediaInfo;
use crate::picking::ClickDispatcher;
use crate::pointer::{LockHost, PointerLock};
use crate::scene::{PanelDecl, PanelKind, SceneDoc};
use crate::selection::{SelectionChange, SelectionRegistry};
use crate::time::Time;
use bevy_ecs::prelude::Entity;
use glam::{Vec2, Vec3};
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, WindowEvent};

/// Detail surface shown next to the selected panel. At most one exists,
/// because at most one panel is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailOverlay {
    pub panel_id: String,
    pub title: String,
    pub description: String,
    pub anchor: Vec3,
}

/// Confirmation prompt currently awaiting a yes/no from the visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt {
    pub entity: Entity,
    pub text: String,
}

/// One exhibit visit: the world, the camera, the input plumbing, and the
/// selection registry, all driven by exactly one logical tick per rendered
/// frame on a single thread.
pub struct ExhibitSession {
    world: ExhibitWorld,
    camera: Camera,
    locomotion: FloatController,
    input: Input,
    pointer: PointerLock,
    selection: SelectionRegistry,
    dispatcher: ClickDispatcher,
    content: ContentLibrary,
    events: EventBus,
    crosshair: CrosshairHud,
    controls: ControlsHud,
    navigator: Box<dyn Navigator>,
    lock_host: Box<dyn LockHost>,
    viewport: PhysicalSize<u32>,
    time: Time,
    elapsed: f32,
    panels: Vec<Entity>,
    hovered: Option<Entity>,
    pressed: Option<Entity>,
}

impl ExhibitSession {
    pub fn new(
        config: &ExhibitConfig,
        scene: &SceneDoc,
        content: ContentLibrary,
        navigator: Box<dyn Navigator>,
        lock_host: Box<dyn LockHost>,
        viewport: PhysicalSize<u32>,
    ) -> Self {
        let camera = Camera::new(
            Vec3::from_array(config.camera.start_position),
            config.camera.fov_degrees.to_radians(),
            0.1,
            1000.0,
        );
        let locomotion = FloatController::new(
            config.camera.speed,
            config.camera.vertical_bounds[0],
            config.camera.vertical_bounds[1],
        );
        let input = match config.input_bindings.as_ref() {
            Some(path) => Input::from_config(path),
            None => Input::new(),
        };
        let mut session = Self {
            world: ExhibitWorld::new(),
            camera,
            locomotion,
            input,
            pointer: PointerLock::new(config.pointer.sensitivity),
            selection: SelectionRegistry::new(),
            dispatcher: ClickDispatcher::new(),
            content,
            events: EventBus::default(),
            crosshair: CrosshairHud::new(5.0, CrosshairStyle::Dot),
            controls: ControlsHud::new(),
            navigator,
            lock_host,
            viewport,
            time: Time::new(),
            elapsed: 0.0,
            panels: Vec::new(),
            hovered: None,
            pressed: None,
        };
        for decl in &scene.panels {
            session.spawn_panel(decl);
        }
        session
    }

    pub fn spawn_panel(&mut self, decl: &PanelDecl) -> Entity {
        let entity = self.world.spawn_panel(decl, &mut self.dispatcher.targets);
        self.panels.push(entity);
        entity
    }

    pub fn despawn_panel(&mut self, entity: Entity) -> bool {
        if self.hovered == Some(entity) {
            self.hovered = None;
        }
        if self.pressed == Some(entity) {
            self.pressed = None;
        }
        self.panels.retain(|&panel| panel != entity);
        self.world.despawn_panel(entity, &mut self.dispatcher.targets)
    }

    // ---------- Host event plumbing ----------

    pub fn handle_window_event(&mut self, ev: &WindowEvent) {
        self.push_input(InputEvent::from_window_event(ev));
    }

    pub fn handle_device_event(&mut self, ev: &DeviceEvent) {
        self.push_input(InputEvent::from_device_event(ev));
    }

    /// Raw event entry point for hosts that are not winit-shaped.
    pub fn push_input(&mut self, ev: InputEvent) {
        match &ev {
            InputEvent::CursorPos { x, y } => self.pointer.track_cursor(Vec2::new(*x, *y)),
            InputEvent::MouseMove { dx, dy } => self.pointer.accumulate_look(Vec2::new(*dx, *dy)),
            _ => {}
        }
        self.input.push(ev);
    }

    pub fn set_viewport(&mut self, viewport: PhysicalSize<u32>) {
        self.viewport = viewport;
    }

    /// The host lost the pointer grab (system escape or focus loss).
    pub fn pointer_lock_lost(&mut self) {
        if self.pointer.lock_lost() {
            self.events.push(ExhibitEvent::PointerLockChanged { locked: false });
            self.notify_hud();
        }
    }

    // ---------- Tick ----------

    /// Real-time tick; hosts with their own clock call `advance` directly.
    pub fn tick(&mut self) {
        self.time.tick();
        let dt = self.time.delta_seconds();
        self.advance(dt);
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;

        let look = self.pointer.take_look_delta();
        if look != Vec2::ZERO {
            self.camera.apply_look(look);
        }

        if self.input.take_escape() {
            if self.pointer.release(&mut *self.lock_host) {
                self.events.push(ExhibitEvent::PointerLockChanged { locked: false });
                self.notify_hud();
            }
        }
        if self.input.take_help_toggle() {
            self.controls.toggle();
        }

        self.locomotion.integrate(&mut self.camera, &self.input);

        self.refresh_hover();

        if self.input.take_left_press() {
            if let Some(entity) = self.hovered {
                self.world.set_pressed(entity, true);
                self.pressed = Some(entity);
            }
        }
        if self.input.take_left_release() {
            self.handle_release();
        }

        let selected = self.selection.selected().map(str::to_string);
        self.world.sync_video_playback(selected.as_deref());
        self.world.update(dt, self.elapsed, self.camera.forward(), selected.as_deref());

        self.notify_hud();
        self.input.clear_frame();
    }

    /// Per-tick hover pick over the panels' own geometry; drives the
    /// enter/leave transitions.
    fn refresh_hover(&mut self) {
        let hit = self
            .pointer
            .pointer_ndc(self.viewport)
            .and_then(|ndc| self.camera.screen_ray(ndc, self.viewport))
            .and_then(|(origin, dir)| self.world.raycast(origin, dir));
        let next = hit.map(|hit| hit.entity);
        if next == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            self.world.set_hovered(previous, false);
            self.events.push(ExhibitEvent::HoverEnded { entity: previous });
        }
        if let Some(entity) = next {
            self.world.set_hovered(entity, true);
            self.events.push(ExhibitEvent::HoverStarted { entity });
        }
        self.hovered = next;
        // Leaving a panel cancels its press.
        if self.pressed != next {
            self.pressed = None;
        }
    }

    /// One physical click resolves through exactly one path: the pressed
    /// panel's own release handler when a press is live, the raycast
    /// dispatcher otherwise.
    fn handle_release(&mut self) {
        match self.pressed.take() {
            Some(entity) => {
                self.world.set_pressed(entity, false);
                self.activate(entity);
            }
            None => {
                if let Some(ndc) = self.pointer.pointer_ndc(self.viewport) {
                    let change = self.dispatcher.dispatch(
                        &mut self.world,
                        &self.camera,
                        ndc,
                        self.viewport,
                        &mut self.selection,
                    );
                    if let Some(change) = change {
                        self.record_selection(change);
                    }
                }
            }
        }
        // An unlocked click doubles as the pointer grab.
        if self.pointer.acquire(&mut *self.lock_host) {
            self.events.push(ExhibitEvent::PointerLockChanged { locked: true });
            self.notify_hud();
        }
    }

    fn activate(&mut self, entity: Entity) {
        let Some(kind) = self.world.panel_kind(entity) else {
            return;
        };
        match kind {
            PanelKind::Button => {
                if self.world.arm_gate(entity) {
                    self.events.push(ExhibitEvent::ConfirmArmed { entity });
                }
            }
            PanelKind::Paper if self.paper_action_armed(entity) => {
                if self.world.arm_gate(entity) {
                    self.events.push(ExhibitEvent::ConfirmArmed { entity });
                }
            }
            _ => {
                if let Some(id) = self.world.panel_id(entity).map(str::to_string) {
                    let change = self.selection.select(&id);
                    self.record_selection(change);
                }
            }
        }
    }

    /// A selected paper's next release is its open/verify action; an
    /// unselected paper behaves like any gallery panel.
    fn paper_action_armed(&self, entity: Entity) -> bool {
        if !self.world.has_gate(entity) {
            return false;
        }
        match self.world.panel_id(entity) {
            Some(id) => self.selection.is_selected(id),
            None => false,
        }
    }

    fn record_selection(&mut self, change: SelectionChange) {
        if change.is_noop() {
            return;
        }
        self.events.push(ExhibitEvent::SelectionChanged {
            previous: change.previous,
            current: change.current,
        });
    }

    fn notify_hud(&mut self) {
        self.crosshair.observe(self.pointer.is_locked(), self.pointer.cursor_position());
    }

    // ---------- Selection surface ----------

    pub fn select_panel(&mut self, id: &str) {
        let change = self.selection.select(id);
        self.record_selection(change);
    }

    pub fn deselect(&mut self) {
        let change = self.selection.deselect();
        self.record_selection(change);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    // ---------- Confirmation surface ----------

    pub fn confirm_yes(&mut self, entity: Entity) {
        if let Some(link) = self.world.confirm_yes(entity, self.navigator.as_mut()) {
            self.events.push(ExhibitEvent::ConfirmDismissed { entity });
            self.events.push(ExhibitEvent::NavigationRequested { url: link });
        }
    }

    pub fn confirm_no(&mut self, entity: Entity) {
        if self.world.confirm_no(entity) {
            self.events.push(ExhibitEvent::ConfirmDismissed { entity });
        }
    }

    pub fn confirm_prompts(&mut self) -> Vec<ConfirmPrompt> {
        self.world
            .active_prompts()
            .into_iter()
            .map(|(entity, text)| ConfirmPrompt { entity, text })
            .collect()
    }

    // ---------- Overlay and media surface ----------

    pub fn detail_overlay(&mut self) -> Option<DetailOverlay> {
        let id = self.selection.selected()?.to_string();
        let entity = self.world.entity_for_id(&id)?;
        let motion = self.world.panel_motion(entity)?;
        let shape = self.world.panel_shape(entity)?;
        let entry = self.content.lookup(&id);
        Some(DetailOverlay {
            panel_id: id,
            title: entry.title.clone(),
            description: entry.description.clone(),
            anchor: motion.position + Vec3::Y * (shape.height * 0.8),
        })
    }

    pub fn media_ready(&mut self, id: &str, info: MediaInfo) {
        if self.world.media_ready(id, info) {
            self.events.push(ExhibitEvent::MediaReady { id: id.to_string() });
        }
    }

    pub fn media_failed(&mut self, id: &str) {
        if self.world.media_failed(id) {
            eprintln!("[media] load failed for '{id}', keeping placeholder");
            self.events.push(ExhibitEvent::MediaFailed { id: id.to_string() });
        }
    }

    // ---------- Accessors ----------

    pub fn drain_events(&mut self) -> Vec<ExhibitEvent> {
        self.events.drain()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn crosshair(&self) -> &CrosshairHud {
        &self.crosshair
    }

    pub fn controls_hud(&self) -> &ControlsHud {
        &self.controls
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer.is_locked()
    }

    pub fn panels(&self) -> &[Entity] {
        &self.panels
    }

    pub fn world_mut(&mut self) -> &mut ExhibitWorld {
        &mut self.world
    }

    /// Tears the session down: panels despawn (disposing their media
    /// pipelines) and the selection registry closes, so any handle kept
    /// around afterwards fails fast.
    pub fn shutdown(mut self) {
        let panels = std::mem::take(&mut self.panels);
        for entity in panels {
            self.world.despawn_panel(entity, &mut self.dispatcher.targets);
        }
        self.selection.close();
    }
}
