mod common;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use common::{deliver_model, model_orientation, mounted_app, run_frames};
use constants::render_settings::CAMERA_POSITION;
use constants::viewpoints::{SIDE_VIEW, TOP_VIEW};
use model_viewer_engine::engine::camera::orbit_controls::{OrbitCamera, OrbitControls};
use model_viewer_engine::engine::core::host_inbox::{HostSignal, ViewerCommand};
use model_viewer_engine::engine::core::lifecycle::ViewerLifecycle;
use model_viewer_engine::engine::loading::progress::ModelLoadStatus;
use model_viewer_engine::engine::scene::model::{ModelHandle, ViewerModel};
use model_viewer_engine::engine::scene::render_surface::RenderSurface;
use model_viewer_engine::engine::scene::scene_context::SceneContext;
use model_viewer_engine::engine::systems::spin::SpinState;
use model_viewer_engine::engine::systems::viewpoints::Viewpoint;

fn camera_aspect(app: &mut App) -> f32 {
    let mut cameras = app
        .world_mut()
        .query_filtered::<&Projection, With<OrbitCamera>>();
    match cameras.single(app.world()).unwrap() {
        Projection::Perspective(perspective) => perspective.aspect_ratio,
        other => panic!("unexpected projection {other:?}"),
    }
}

fn model_count(app: &mut App) -> usize {
    let mut models = app.world_mut().query_filtered::<Entity, With<ViewerModel>>();
    models.iter(app.world()).count()
}

#[test]
fn mount_builds_scene_with_initial_camera() {
    let (mut app, _inbox) = mounted_app();
    assert!(app.world().get_resource::<SceneContext>().is_some());
    assert!((camera_aspect(&mut app) - 1280.0 / 600.0).abs() < 1e-6);

    run_frames(&mut app, 5);
    let mut cameras = app
        .world_mut()
        .query_filtered::<&Transform, With<OrbitCamera>>();
    let camera = cameras.single(app.world()).unwrap();
    assert!(camera.translation.distance(CAMERA_POSITION) < 1e-3);
}

fn camera_translation(app: &mut App) -> Vec3 {
    let mut cameras = app
        .world_mut()
        .query_filtered::<&Transform, With<OrbitCamera>>();
    cameras.single(app.world()).unwrap().translation
}

fn drag_with(app: &mut App, button: MouseButton, delta: Vec2, scroll: f32) {
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(button);
    app.world_mut().send_event(MouseMotion { delta });
    app.world_mut().send_event(MouseWheel {
        unit: MouseScrollUnit::Line,
        x: 0.0,
        y: scroll,
        window: Entity::PLACEHOLDER,
    });
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .release(button);
}

#[test]
fn left_drag_orbits_while_wheel_stays_gated() {
    let (mut app, _inbox) = mounted_app();
    let radius = app.world().resource::<OrbitControls>().radius;

    drag_with(&mut app, MouseButton::Left, Vec2::new(50.0, 0.0), 3.0);
    run_frames(&mut app, 60);

    assert!(camera_translation(&mut app).distance(CAMERA_POSITION) > 0.5);
    let controls = app.world().resource::<OrbitControls>();
    assert_eq!(controls.radius, radius);
    assert_eq!(controls.target, Vec3::ZERO);
}

#[test]
fn secondary_drags_leave_the_camera_in_place() {
    let (mut app, _inbox) = mounted_app();
    let radius = app.world().resource::<OrbitControls>().radius;

    drag_with(&mut app, MouseButton::Right, Vec2::new(80.0, -40.0), 0.0);
    drag_with(&mut app, MouseButton::Middle, Vec2::new(-30.0, 60.0), -2.0);
    run_frames(&mut app, 10);

    assert!(camera_translation(&mut app).distance(CAMERA_POSITION) < 1e-3);
    let controls = app.world().resource::<OrbitControls>();
    assert_eq!(controls.radius, radius);
    assert_eq!(controls.target, Vec3::ZERO);
    assert_eq!(controls.delta_azimuth, 0.0);
    assert_eq!(controls.delta_polar, 0.0);
}

#[test]
fn spin_advances_one_step_per_frame() {
    let (mut app, _inbox) = mounted_app();
    deliver_model(&mut app, 1);
    app.update();
    let start = model_orientation(&app).unwrap().y;

    run_frames(&mut app, 20);
    let end = model_orientation(&app).unwrap().y;
    assert!((end - start - 0.2).abs() < 1e-4);
}

#[test]
fn model_loaded_on_third_frame_reaches_expected_angle() {
    let (mut app, _inbox) = mounted_app();
    app.update();
    deliver_model(&mut app, 1);
    while app.world().resource::<ViewerLifecycle>().frame() < 60 {
        app.update();
    }
    let angle = model_orientation(&app).unwrap().y;
    assert!((angle - 0.58).abs() < 0.02, "angle was {angle}");
    assert!(matches!(
        app.world().resource::<ModelLoadStatus>(),
        ModelLoadStatus::Loaded { .. }
    ));
}

#[test]
fn paused_model_keeps_its_orientation() {
    let (mut app, inbox) = mounted_app();
    deliver_model(&mut app, 1);
    run_frames(&mut app, 3);

    inbox.push(HostSignal::Command(ViewerCommand::ToggleSpin));
    app.update();
    assert_eq!(*app.world().resource::<SpinState>(), SpinState::Paused);
    let paused_at = model_orientation(&app).unwrap();

    run_frames(&mut app, 10);
    assert_eq!(model_orientation(&app).unwrap(), paused_at);
}

#[test]
fn front_view_while_paused_is_exactly_zero() {
    let (mut app, inbox) = mounted_app();
    deliver_model(&mut app, 1);
    run_frames(&mut app, 5);

    inbox.push(HostSignal::Command(ViewerCommand::ToggleSpin));
    inbox.push(HostSignal::Command(ViewerCommand::ApplyViewpoint(
        Viewpoint::Front,
    )));
    app.update();
    assert_eq!(model_orientation(&app), Some(Vec3::ZERO));

    let entity = app.world().resource::<ModelHandle>().get().unwrap();
    let transform = app.world().get::<Transform>(entity).unwrap();
    assert_eq!(transform.rotation, Quat::IDENTITY);
}

#[test]
fn front_view_while_spinning_ends_one_step_past_zero() {
    let (mut app, inbox) = mounted_app();
    deliver_model(&mut app, 1);
    run_frames(&mut app, 30);

    inbox.push(HostSignal::Command(ViewerCommand::ApplyViewpoint(
        Viewpoint::Front,
    )));
    app.update();
    assert_eq!(model_orientation(&app), Some(Vec3::new(0.0, 0.01, 0.0)));
}

#[test]
fn spin_continues_from_applied_preset() {
    let (mut app, inbox) = mounted_app();
    deliver_model(&mut app, 1);
    run_frames(&mut app, 4);

    inbox.push(HostSignal::Command(ViewerCommand::ApplyViewpoint(
        Viewpoint::Side,
    )));
    app.update();
    let orientation = model_orientation(&app).unwrap();
    assert!((orientation.y - (SIDE_VIEW.y + 0.01)).abs() < 1e-5);
    assert_eq!(orientation.x, SIDE_VIEW.x);
}

#[test]
fn preset_before_load_is_ignored() {
    let (mut app, inbox) = mounted_app();
    inbox.push(HostSignal::Command(ViewerCommand::ApplyViewpoint(Viewpoint::Top)));
    app.update();
    assert!(!app.world().resource::<ModelHandle>().is_present());

    deliver_model(&mut app, 1);
    app.update();
    let orientation = model_orientation(&app).unwrap();
    assert_eq!(orientation.x, 0.0);
    assert!(orientation.y < 0.05);
}

#[test]
fn resize_updates_aspect_and_surface() {
    let (mut app, inbox) = mounted_app();
    inbox.push(HostSignal::ContainerResized(UVec2::new(1000, 500)));
    app.update();

    assert_eq!(camera_aspect(&mut app), 2.0);
    assert_eq!(
        app.world().non_send_resource::<RenderSurface>().size(),
        UVec2::new(1000, 500)
    );
}

#[test]
fn empty_container_resize_is_ignored() {
    let (mut app, inbox) = mounted_app();
    inbox.push(HostSignal::ContainerResized(UVec2::new(900, 0)));
    app.update();

    assert!((camera_aspect(&mut app) - 1280.0 / 600.0).abs() < 1e-6);
    assert_eq!(
        app.world().non_send_resource::<RenderSurface>().size(),
        UVec2::new(1280, 600)
    );
}

#[test]
fn host_rpc_drives_spin_and_viewpoint() {
    let (mut app, inbox) = mounted_app();
    deliver_model(&mut app, 1);
    app.update();

    inbox.push(HostSignal::Rpc(
        r#"{"jsonrpc":"2.0","method":"toggle_spin"}"#.to_string(),
    ));
    app.update();
    assert_eq!(*app.world().resource::<SpinState>(), SpinState::Paused);

    inbox.push(HostSignal::Rpc(
        r#"{"jsonrpc":"2.0","method":"set_viewpoint","params":{"preset":"top"},"id":7}"#
            .to_string(),
    ));
    app.update();
    assert_eq!(model_orientation(&app), Some(TOP_VIEW));

    inbox.push(HostSignal::Rpc(
        r#"{"jsonrpc":"2.0","method":"set_viewpoint","params":{"preset":"under"},"id":8}"#
            .to_string(),
    ));
    app.update();
    assert_eq!(model_orientation(&app), Some(TOP_VIEW));
}

#[test]
fn stale_generation_is_not_attached() {
    let (mut app, _inbox) = mounted_app();
    deliver_model(&mut app, 2);
    app.update();
    assert!(!app.world().resource::<ModelHandle>().is_present());
    assert_eq!(model_count(&mut app), 0);
}

#[test]
fn failed_load_leaves_viewer_running() {
    let (mut app, _inbox) = mounted_app();
    app.world_mut().send_event(
        model_viewer_engine::engine::loading::model_loader::ModelLoadEvent {
            generation: 1,
            path: "missing.gltf".to_string(),
            result: Err(model_viewer_engine::error::LoadError::Failed {
                path: "missing.gltf".to_string(),
                reason: "404".to_string(),
            }),
        },
    );
    app.update();

    assert_eq!(
        app.world().resource::<ModelLoadStatus>().as_str(),
        "failed"
    );
    assert!(!app.world().resource::<ModelHandle>().is_present());

    let frame = app.world().resource::<ViewerLifecycle>().frame();
    run_frames(&mut app, 3);
    assert_eq!(app.world().resource::<ViewerLifecycle>().frame(), frame + 3);
}

#[test]
fn unmount_releases_everything_and_drops_late_loads() {
    let (mut app, inbox) = mounted_app();
    run_frames(&mut app, 2);

    inbox.push(HostSignal::Command(ViewerCommand::Unmount));
    app.update();

    assert!(!app.world().resource::<ViewerLifecycle>().is_active());
    assert!(app.world().non_send_resource::<RenderSurface>().is_released());
    assert!(app.world().get_resource::<SceneContext>().is_none());
    assert_eq!(app.should_exit(), Some(AppExit::Success));

    deliver_model(&mut app, 1);
    app.update();
    assert!(!app.world().resource::<ModelHandle>().is_present());
    assert_eq!(model_count(&mut app), 0);
}

#[test]
fn frames_stop_after_unmount() {
    let (mut app, inbox) = mounted_app();
    inbox.push(HostSignal::Command(ViewerCommand::Unmount));
    app.update();
    let frame = app.world().resource::<ViewerLifecycle>().frame();

    inbox.push(HostSignal::Command(ViewerCommand::Unmount));
    inbox.push(HostSignal::Command(ViewerCommand::ToggleSpin));
    run_frames(&mut app, 5);

    assert_eq!(app.world().resource::<ViewerLifecycle>().frame(), frame);
    assert_eq!(*app.world().resource::<SpinState>(), SpinState::Spinning);
}
