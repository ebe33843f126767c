//! Engine tick integration tests for the frame scheduler, figures and playback.
//!
//! Everything runs on a headless `World`; no raylib window is opened.

use bevy_ecs::prelude::*;

use suvat::components::figure::Figure;
use suvat::components::label::Hint;
use suvat::components::limbanimation::LimbAnimation;
use suvat::components::mapposition::MapPosition;
use suvat::components::motioncontroller::MotionController;
use suvat::components::rigidbody::RigidBody;
use suvat::events::playback::{RateChangeEvent, ScrubEvent, TogglePauseEvent};
use suvat::game::{HINT_MS, setup};
use suvat::resources::canvas::{Canvas, Shape};
use suvat::resources::controls::ControlPanel;
use suvat::resources::input::InputState;
use suvat::resources::playback::{ComparedBodies, Playback};
use suvat::resources::scheduler::{FrameScheduler, SchedulerState};
use suvat::resources::screensize::ScreenSize;
use suvat::resources::worldtime::WorldTime;
use suvat::systems::figure::{animate_figure, move_figure, spawn_figure, stop_figure, teleport_figure};
use suvat::systems::input::apply_playback_controls;
use suvat::systems::scheduler::{run_due, tick};
use suvat::systems::view::refit_world_view;

const EPSILON: f32 = 1e-3;
const G: f32 = 9.81;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(Canvas::default());
    world.insert_resource(FrameScheduler::default());
    world.insert_resource(WorldTime::default());
    world
}

fn make_scene() -> (World, ComparedBodies) {
    let mut world = World::new();
    let pair = setup(&mut world, ScreenSize { w: 900, h: 600 });
    (world, pair)
}

fn height_of(world: &World, entity: Entity) -> f32 {
    world.get::<MotionController>(entity).unwrap().get_height()
}

fn label_text(world: &World, entity: Entity) -> String {
    let label = world.get::<MotionController>(entity).unwrap().label.unwrap();
    match &world.resource::<Canvas>().shapes_of(label)[0] {
        Shape::Text { content, .. } => content.clone(),
        other => panic!("expected text, got {:?}", other),
    }
}

#[derive(Resource, Default)]
struct CallLog(Vec<(&'static str, f32, f32)>);

fn first_callback(In(dt): In<f32>, mut log: ResMut<CallLog>, q: Query<&MapPosition, With<Figure>>) {
    let x = q.iter().next().map_or(f32::NAN, |p| p.pos.x);
    log.0.push(("first", dt, x));
}

fn second_callback(In(dt): In<f32>, mut log: ResMut<CallLog>, q: Query<&MapPosition, With<Figure>>) {
    let x = q.iter().next().map_or(f32::NAN, |p| p.pos.x);
    log.0.push(("second", dt, x));
}

#[derive(Resource, Default)]
struct FireCount(u32);

fn count_fire(mut count: ResMut<FireCount>) {
    count.0 += 1;
}

// ==================== Scheduler ====================

#[test]
fn inert_scheduler_does_not_tick() {
    let mut world = make_world();
    assert!(!run_due(&mut world, 0.0));
    assert!(!run_due(&mut world, 10.0));
    let sched = world.resource::<FrameScheduler>();
    assert_eq!(sched.state(), SchedulerState::Inert);
    assert_eq!(sched.ticks(), 0);
    assert_eq!(world.resource::<Canvas>().frames_presented(), 0);
}

#[test]
fn spawning_a_figure_starts_the_scheduler() {
    let mut world = make_world();
    let body = spawn_figure(&mut world, 0.02, 0.0, 10.0, 0.0);
    let sched = world.resource::<FrameScheduler>();
    assert!(sched.is_running());
    assert_eq!(sched.bodies(), &[body]);
    // Drawn once on spawn.
    assert_eq!(world.resource::<Canvas>().shapes_of(body).len(), 18);
}

#[test]
fn tick_advances_phase_of_animating_figures() {
    let mut world = make_world();
    let body = spawn_figure(&mut world, 0.02, 0.0, 10.0, 0.0);
    animate_figure(&mut world, body, 1.0);

    assert!(run_due(&mut world, 0.0));

    let phase = world.get::<LimbAnimation>(body).unwrap().phase;
    assert!(approx_eq(phase, 2.0 * std::f32::consts::PI * 0.033));
    assert!(approx_eq(world.resource::<WorldTime>().elapsed, 0.033));
    assert_eq!(world.resource::<Canvas>().frames_presented(), 1);
}

#[test]
fn re_registered_body_is_stepped_once_per_tick() {
    let mut world = make_world();
    let body = spawn_figure(&mut world, 0.02, 0.0, 10.0, 0.0);
    animate_figure(&mut world, body, 1.0);
    move_figure(&mut world, body, 0.0, -1.0);
    {
        let mut sched = world.resource_mut::<FrameScheduler>();
        assert!(!sched.register_body(body));
        assert!(!sched.register_body(body));
        assert_eq!(sched.bodies(), &[body]);
    }

    tick(&mut world);

    let phase = world.get::<LimbAnimation>(body).unwrap().phase;
    assert!(approx_eq(phase, 2.0 * std::f32::consts::PI * 0.033));
    let pos = world.get::<MapPosition>(body).unwrap().pos;
    assert!(approx_eq(pos.y, 10.0 - 0.033));
    assert_eq!(world.resource::<Canvas>().shapes_of(body).len(), 18);
}

#[test]
fn stopped_figures_keep_phase_but_still_move() {
    let mut world = make_world();
    let body = spawn_figure(&mut world, 0.02, 0.0, 10.0, 0.0);
    stop_figure(&mut world, body);
    move_figure(&mut world, body, 1.0, 2.0);

    tick(&mut world);
    tick(&mut world);

    assert_eq!(world.get::<LimbAnimation>(body).unwrap().phase, 0.0);
    let pos = world.get::<MapPosition>(body).unwrap().pos;
    assert!(approx_eq(pos.x, 0.066));
    assert!(approx_eq(pos.y, 10.132));
}

#[test]
fn ticks_are_paced_without_catch_up() {
    let mut world = make_world();
    spawn_figure(&mut world, 0.02, 0.0, 10.0, 0.0);

    assert!(run_due(&mut world, 1.0));
    assert!(!run_due(&mut world, 1.01));
    assert!(run_due(&mut world, 1.034));
    // A stall of several intervals still produces one tick.
    assert!(run_due(&mut world, 2.0));
    assert!(!run_due(&mut world, 2.02));
    assert_eq!(world.resource::<FrameScheduler>().ticks(), 3);
}

#[test]
fn callbacks_run_after_motion_in_order_once_each() {
    let mut world = make_world();
    world.init_resource::<CallLog>();
    let body = spawn_figure(&mut world, 0.02, 0.0, 0.0, 0.0);
    move_figure(&mut world, body, 10.0, 0.0);

    let first = world.register_system(first_callback);
    let second = world.register_system(second_callback);
    {
        let mut sched = world.resource_mut::<FrameScheduler>();
        assert!(sched.add_frame_callback(first));
        assert!(sched.add_frame_callback(second));
        assert!(!sched.add_frame_callback(first));
    }

    tick(&mut world);

    let log = &world.resource::<CallLog>().0;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0, "first");
    assert_eq!(log[1].0, "second");
    assert!(approx_eq(log[0].1, 0.033));
    // Callbacks see the position after this tick's motion.
    assert!(approx_eq(log[0].2, 0.33));
}

#[test]
fn removed_callback_does_not_stop_the_tick() {
    let mut world = make_world();
    world.init_resource::<CallLog>();
    spawn_figure(&mut world, 0.02, 0.0, 0.0, 0.0);

    let gone = world.register_system(first_callback);
    let kept = world.register_system(second_callback);
    {
        let mut sched = world.resource_mut::<FrameScheduler>();
        sched.add_frame_callback(gone);
        sched.add_frame_callback(kept);
    }
    world.unregister_system(gone).unwrap();

    tick(&mut world);

    let log = &world.resource::<CallLog>().0;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, "second");
    assert_eq!(world.resource::<Canvas>().frames_presented(), 1);
}

#[test]
fn despawned_figures_are_skipped() {
    let mut world = make_world();
    let gone = spawn_figure(&mut world, 0.02, 0.0, 0.0, 0.0);
    let kept = spawn_figure(&mut world, 0.02, 5.0, 0.0, 0.0);
    move_figure(&mut world, kept, 1.0, 0.0);
    world.despawn(gone);

    tick(&mut world);

    assert!(approx_eq(world.get::<MapPosition>(kept).unwrap().pos.x, 5.033));
    assert_eq!(world.resource::<FrameScheduler>().ticks(), 0);
    assert_eq!(world.resource::<Canvas>().frames_presented(), 1);
}

#[test]
fn one_shot_timers_fire_exactly_once() {
    let mut world = make_world();
    world.init_resource::<FireCount>();
    let fire = world.register_system(count_fire);
    world
        .resource_mut::<FrameScheduler>()
        .sleep_nonblocking(100, fire);

    run_due(&mut world, 0.05);
    assert_eq!(world.resource::<FireCount>().0, 0);
    run_due(&mut world, 0.1);
    assert_eq!(world.resource::<FireCount>().0, 1);
    run_due(&mut world, 5.0);
    assert_eq!(world.resource::<FireCount>().0, 1);
    assert_eq!(world.resource::<FrameScheduler>().pending_timers(), 0);
}

#[test]
fn teleport_redraws_immediately() {
    let mut world = make_world();
    let body = spawn_figure(&mut world, 1.0, 0.0, 0.0, 0.0);
    teleport_figure(&mut world, body, 50.0, 0.0, Some(90.0));

    let pos = world.get::<MapPosition>(body).unwrap().pos;
    assert!(approx_eq(pos.x, 50.0));
    // Shell is the first shape, centred on the figure position.
    match &world.resource::<Canvas>().shapes_of(body)[0] {
        Shape::Circle { center, .. } => assert!(approx_eq(center.x, 50.0)),
        other => panic!("expected circle, got {:?}", other),
    }
}

// ==================== Playback scene ====================

#[test]
fn setup_places_bodies_at_their_initial_state() {
    let (world, pair) = make_scene();

    assert!(approx_eq(height_of(&world, pair.first), 80.0));
    assert!(approx_eq(height_of(&world, pair.second), 0.0));
    let alpha_pos = world.get::<MapPosition>(pair.first).unwrap().pos;
    assert!(approx_eq(alpha_pos.x, -10.0));
    assert!(approx_eq(alpha_pos.y, 80.0));

    let playback = world.resource::<Playback>();
    assert!(approx_eq(playback.max_time, 40.0 / G));
    assert_eq!(playback.simulation_time, 0.0);

    assert_eq!(label_text(&world, pair.first), "v: +0.00 m/s\nds: +0.00 m\ndy: +80.00 m");
    assert_eq!(world.resource::<Canvas>().frames_presented(), 1);
}

#[test]
fn playback_advances_both_bodies_each_tick() {
    let (mut world, pair) = make_scene();
    for _ in 0..30 {
        tick(&mut world);
    }

    let t = world.resource::<Playback>().simulation_time;
    assert!(approx_eq(t, 0.99));
    assert!(approx_eq(height_of(&world, pair.first), 80.0 - 0.5 * G * t * t));
    assert!(approx_eq(height_of(&world, pair.second), 20.0 * t - 0.5 * G * t * t));

    let rb = world.get::<RigidBody>(pair.second).unwrap();
    assert!(approx_eq(rb.velocity.y, 20.0 - G * t));

    let panel = world.resource::<ControlPanel>();
    assert!((panel.scrubber.value - t).abs() <= 0.005 + EPSILON);
}

#[test]
fn pause_freezes_the_simulation_clock() {
    let (mut world, pair) = make_scene();
    tick(&mut world);
    world.trigger(TogglePauseEvent);

    let before = height_of(&world, pair.first);
    for _ in 0..10 {
        tick(&mut world);
    }

    assert!(world.resource::<Playback>().paused);
    assert_eq!(world.resource::<ControlPanel>().pause.label(), "Resume");
    assert_eq!(height_of(&world, pair.first), before);

    world.trigger(TogglePauseEvent);
    tick(&mut world);
    assert!(height_of(&world, pair.first) < before);
}

#[test]
fn scrubbing_jumps_both_bodies_and_labels() {
    let (mut world, pair) = make_scene();
    world.trigger(TogglePauseEvent);
    world.trigger(ScrubEvent { time: 2.0 });

    assert!(approx_eq(world.resource::<Playback>().simulation_time, 2.0));
    assert!(approx_eq(height_of(&world, pair.first), 60.38));
    assert!(approx_eq(height_of(&world, pair.second), 20.38));
    assert_eq!(
        label_text(&world, pair.first),
        "v: -19.62 m/s\nds: -19.62 m\ndy: +40.00 m"
    );
    assert_eq!(
        label_text(&world, pair.second),
        "v: +0.38 m/s\nds: +20.38 m\ndy: -40.00 m"
    );
    assert!(approx_eq(world.resource::<ControlPanel>().scrubber.value, 2.0));
}

#[test]
fn scrubbing_is_clamped_to_the_landing_window() {
    let (mut world, pair) = make_scene();

    world.trigger(ScrubEvent { time: 100.0 });
    let max_time = world.resource::<Playback>().max_time;
    assert_eq!(world.resource::<Playback>().simulation_time, max_time);
    assert!(height_of(&world, pair.first) == 0.0);
    assert!(height_of(&world, pair.second) < EPSILON);

    world.trigger(ScrubEvent { time: -3.0 });
    assert_eq!(world.resource::<Playback>().simulation_time, 0.0);
    assert!(approx_eq(height_of(&world, pair.first), 80.0));
}

#[test]
fn negative_rate_plays_backwards_and_stops_at_zero() {
    let (mut world, pair) = make_scene();
    world.trigger(ScrubEvent { time: 1.0 });
    world.trigger(RateChangeEvent { rate: -1.0 });

    tick(&mut world);
    assert!(approx_eq(world.resource::<Playback>().simulation_time, 0.967));

    for _ in 0..100 {
        tick(&mut world);
    }
    assert_eq!(world.resource::<Playback>().simulation_time, 0.0);
    assert!(approx_eq(height_of(&world, pair.first), 80.0));
}

#[test]
fn rate_changes_are_clamped_and_shown() {
    let (mut world, _pair) = make_scene();
    world.trigger(RateChangeEvent { rate: 10.0 });
    assert_eq!(world.resource::<Playback>().rate, 3.0);
    assert!(approx_eq(world.resource::<ControlPanel>().rate.value, 3.0));

    world.trigger(RateChangeEvent { rate: 0.0 });
    tick(&mut world);
    assert_eq!(world.resource::<Playback>().simulation_time, 0.0);
}

#[test]
fn keyboard_input_triggers_playback_events() {
    let (mut world, _pair) = make_scene();
    let mut schedule = Schedule::default();
    schedule.add_systems(apply_playback_controls);

    world.resource_mut::<InputState>().toggle_pause.just_pressed = true;
    world.resource_mut::<InputState>().scrub_forward.just_pressed = true;
    schedule.run(&mut world);

    let playback = world.resource::<Playback>();
    assert!(playback.paused);
    assert!(approx_eq(playback.simulation_time, 0.1));

    {
        let mut input = world.resource_mut::<InputState>();
        input.toggle_pause.just_pressed = false;
        input.scrub_forward.just_pressed = false;
        input.rate_up.just_pressed = true;
    }
    schedule.run(&mut world);
    assert!(approx_eq(world.resource::<Playback>().rate, 1.1));
}

#[test]
fn key_hint_is_hidden_by_its_timer() {
    let (mut world, _pair) = make_scene();
    let hint = world
        .query_filtered::<Entity, With<Hint>>()
        .single(&world)
        .unwrap();
    assert_eq!(world.resource::<Canvas>().shapes_of(hint).len(), 1);

    run_due(&mut world, 0.0);
    assert_eq!(world.resource::<Canvas>().shapes_of(hint).len(), 1);

    run_due(&mut world, f64::from(HINT_MS) / 1000.0 + 0.01);
    assert!(world.resource::<Canvas>().shapes_of(hint).is_empty());
    assert!(world.get_entity(hint).is_err());

    // A later resize must not bring it back.
    world.resource_mut::<ScreenSize>().w = 1200;
    let mut schedule = Schedule::default();
    schedule.add_systems(refit_world_view);
    schedule.run(&mut world);
    assert!(world.resource::<Canvas>().shapes_of(hint).is_empty());
}
