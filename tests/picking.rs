use glam::Vec2;
use vitrine::camera::Camera;
use vitrine::ecs::ExhibitWorld;
use vitrine::picking::ClickDispatcher;
use vitrine::scene::{PanelDecl, PanelKind};
use vitrine::selection::SelectionRegistry;
use winit::dpi::PhysicalSize;

const VIEWPORT: PhysicalSize<u32> = PhysicalSize::new(1280, 720);

fn camera_at_origin() -> Camera {
    // Looks down -Z from the gallery entrance.
    Camera::new(glam::Vec3::new(0.0, 2.0, 10.0), 90f32.to_radians(), 0.1, 1000.0)
}

fn image_decl(id: &str, position: [f32; 3]) -> PanelDecl {
    PanelDecl {
        kind: PanelKind::Image,
        id: Some(id.to_string()),
        source: format!("/media/images/{id}.jpg"),
        link: None,
        label: None,
        position,
        size: 4.0,
        rotation: [0.0; 3],
    }
}

#[test]
fn center_ray_selects_the_panel_it_hits() {
    let mut world = ExhibitWorld::new();
    let mut dispatcher = ClickDispatcher::new();
    let mut registry = SelectionRegistry::new();
    world.spawn_panel(&image_decl("butterfly", [0.0, 2.0, -5.0]), &mut dispatcher.targets);

    let change = dispatcher
        .dispatch(&mut world, &camera_at_origin(), Vec2::ZERO, VIEWPORT, &mut registry)
        .expect("owned hit resolves to a selection change");
    assert_eq!(change.current.as_deref(), Some("butterfly"));
    // Exactly one select: a second call would have toggled it back off.
    assert!(registry.is_selected("butterfly"));
}

#[test]
fn miss_leaves_selection_untouched() {
    let mut world = ExhibitWorld::new();
    let mut dispatcher = ClickDispatcher::new();
    let mut registry = SelectionRegistry::new();
    world.spawn_panel(&image_decl("butterfly", [40.0, 2.0, -5.0]), &mut dispatcher.targets);

    let change = dispatcher.dispatch(&mut world, &camera_at_origin(), Vec2::ZERO, VIEWPORT, &mut registry);
    assert!(change.is_none());
    assert_eq!(registry.selected(), None);
}

#[test]
fn unowned_collider_is_a_silent_no_op() {
    let mut world = ExhibitWorld::new();
    let mut dispatcher = ClickDispatcher::new();
    let mut registry = SelectionRegistry::new();
    let button = PanelDecl {
        kind: PanelKind::Button,
        id: None,
        source: "resume".to_string(),
        link: Some("/media/resume/Resume.pdf".to_string()),
        label: Some("RESUME".to_string()),
        position: [0.0, 2.0, 5.5],
        size: 0.5,
        rotation: [0.0; 3],
    };
    world.spawn_panel(&button, &mut dispatcher.targets);

    let change = dispatcher.dispatch(&mut world, &camera_at_origin(), Vec2::ZERO, VIEWPORT, &mut registry);
    assert!(change.is_none());
    assert_eq!(registry.selected(), None);
}

#[test]
fn nearest_hit_wins() {
    let mut world = ExhibitWorld::new();
    let mut dispatcher = ClickDispatcher::new();
    let mut registry = SelectionRegistry::new();
    world.spawn_panel(&image_decl("far", [0.0, 2.0, -9.0]), &mut dispatcher.targets);
    world.spawn_panel(&image_decl("near", [0.0, 2.0, -3.0]), &mut dispatcher.targets);

    dispatcher
        .dispatch(&mut world, &camera_at_origin(), Vec2::ZERO, VIEWPORT, &mut registry)
        .expect("two candidates, nearest resolves");
    assert!(registry.is_selected("near"));
    assert!(!registry.is_selected("far"));
}

#[test]
fn despawned_panel_no_longer_hits() {
    let mut world = ExhibitWorld::new();
    let mut dispatcher = ClickDispatcher::new();
    let mut registry = SelectionRegistry::new();
    let entity = world.spawn_panel(&image_decl("butterfly", [0.0, 2.0, -5.0]), &mut dispatcher.targets);

    assert!(world.despawn_panel(entity, &mut dispatcher.targets));
    assert!(dispatcher.targets.is_empty());
    let change = dispatcher.dispatch(&mut world, &camera_at_origin(), Vec2::ZERO, VIEWPORT, &mut registry);
    assert!(change.is_none());
    assert_eq!(registry.selected(), None);
}

#[test]
fn cursor_ray_picks_off_center_panel() {
    let mut world = ExhibitWorld::new();
    let mut dispatcher = ClickDispatcher::new();
    let mut registry = SelectionRegistry::new();
    world.spawn_panel(&image_decl("left", [-6.0, 2.0, -5.0]), &mut dispatcher.targets);

    let camera = camera_at_origin();
    // NDC of the panel center at its depth: x / (distance * tan(fov/2) * aspect).
    let ndc = Vec2::new(-6.0 / (15.0 * (1280.0 / 720.0)), 0.0);
    let change = dispatcher.dispatch(&mut world, &camera, ndc, VIEWPORT, &mut registry);
    assert!(change.is_some(), "off-center cursor ray reaches the panel");
    assert!(registry.is_selected("left"));
}
