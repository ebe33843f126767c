//! Turtle figure renderer and figure lifecycle helpers.
//!
//! [`draw_figure`] draws a stylised turtle onto any [`RenderSurface`]. The
//! figure is described in a local frame of a few hundred units (shell
//! radius 100) and mapped to world space by scaling with the figure size,
//! rotating by its orientation and translating to its position. Limbs move
//! on small ellipses and the tail wags, both driven by the figure's
//! [`LimbAnimation`] phase.
//!
//! Layers are drawn back to front: shell, head, back legs, front legs,
//! tail, shell pattern, eyes, pupils. Every call first clears the owner's
//! previous drawing, so redrawing an unchanged figure is idempotent.
//!
//! The remaining functions create and manipulate figure entities directly
//! on the [`World`], mirroring a small turtle-graphics style API:
//! [`spawn_figure`], [`animate_figure`], [`stop_figure`], [`move_figure`]
//! and [`teleport_figure`].

use std::f32::consts::PI;

use bevy_ecs::prelude::*;
use log::{debug, warn};
use raylib::prelude::{Color, Vector2};

use crate::components::figure::Figure;
use crate::components::limbanimation::LimbAnimation;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::resources::canvas::{Canvas, Points, RenderSurface};
use crate::resources::scheduler::FrameScheduler;

const SHELL_R: f32 = 100.0;
const HEAD_R: f32 = 50.0;
const LIMB_R: f32 = 40.0;
const HEX_SIDE: f32 = 30.0;
const HEX_RING_R: f32 = 60.0;
const TAIL_SIDE: f32 = 30.0;
const EYE_R: f32 = 15.0;
const PUPIL_R: f32 = 7.0;

const CENTER: (f32, f32) = (0.0, 0.0);
const HEAD_C: (f32, f32) = (0.0, 135.0);
const ARM_L_C: (f32, f32) = (-120.0, 60.0);
const ARM_R_C: (f32, f32) = (120.0, 60.0);
const LEG_L_C: (f32, f32) = (-70.0, -100.0);
const LEG_R_C: (f32, f32) = (70.0, -100.0);
const TAIL_C: (f32, f32) = (16.0, -99.0);
const HEX_CENTER_C: (f32, f32) = (-4.0, -7.0);
const EYE_L: (f32, f32) = (-20.0, 155.0);
const EYE_R: (f32, f32) = (20.0, 155.0);
const PUPIL_L: (f32, f32) = (-20.0, 156.0);
const PUPIL_R: (f32, f32) = (20.0, 156.0);

/// Back-leg ellipse semi-axes.
const LEG_AMPLITUDE: (f32, f32) = (12.0, 20.0);
/// Front legs swing on a smaller ellipse, half a cycle out of step.
const ARM_SCALE: f32 = 0.6;
/// Tail swings this many degrees either side of straight back.
const TAIL_WAG_DEG: f32 = 10.0;

const SHELL_GREEN: Color = Color::new(0, 128, 0, 255);
const DARK_GREEN: Color = Color::new(0, 100, 0, 255);

/// Everything the renderer needs to know about one figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigurePose {
    pub position: Vector2,
    pub orientation_deg: f32,
    pub size: f32,
    pub phase: f32,
}

impl FigurePose {
    /// Map a point of the figure's local frame to world space.
    pub fn to_world(&self, x: f32, y: f32) -> Vector2 {
        let (sx, sy) = (x * self.size, y * self.size);
        let (sin, cos) = self.orientation_deg.to_radians().sin_cos();
        Vector2 {
            x: self.position.x + sx * cos - sy * sin,
            y: self.position.y + sx * sin + sy * cos,
        }
    }
}

/// Offset of the left back leg from its rest position at `phase`.
///
/// The right leg uses the same offset with `dx` mirrored. Front legs use
/// `limb_offset(phase - π)` scaled down, i.e. the opposite point of the
/// cycle.
pub fn limb_offset(phase: f32) -> (f32, f32) {
    let p = -phase;
    (LEG_AMPLITUDE.0 * p.sin(), LEG_AMPLITUDE.1 * p.cos())
}

/// Offset of the left front leg at `phase`.
pub fn arm_offset(phase: f32) -> (f32, f32) {
    let (dx, dy) = limb_offset(phase - PI);
    (dx * ARM_SCALE, dy * ARM_SCALE)
}

/// Tail heading in local degrees at `phase` (180 points straight back).
pub fn tail_heading(phase: f32) -> f32 {
    180.0 + TAIL_WAG_DEG * phase.sin()
}

/// Heading-based drawing cursor working in a figure's local frame.
///
/// Moves are recorded as polygon vertices while the pen is down, then
/// mapped to world space with the figure pose.
#[derive(Clone, Debug, Default)]
pub struct Pen {
    x: f32,
    y: f32,
    heading_deg: f32,
    down: bool,
    path: Points,
}

impl Pen {
    pub fn goto(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        if self.down {
            self.path.push(Vector2 { x, y });
        }
    }

    pub fn set_heading(&mut self, degrees: f32) {
        self.heading_deg = degrees;
    }

    pub fn left(&mut self, degrees: f32) {
        self.heading_deg += degrees;
    }

    pub fn forward(&mut self, distance: f32) {
        let (sin, cos) = self.heading_deg.to_radians().sin_cos();
        self.goto(self.x + distance * cos, self.y + distance * sin);
    }

    /// Start recording a path at the current position.
    pub fn pen_down(&mut self) {
        self.down = true;
        self.path.clear();
        self.path.push(Vector2 {
            x: self.x,
            y: self.y,
        });
    }

    /// Stop recording and return the recorded closed outline.
    ///
    /// A final vertex that returns to the start is dropped.
    pub fn pen_up(&mut self) -> Points {
        self.down = false;
        let mut path = std::mem::take(&mut self.path);
        if path.len() > 1 {
            let (first, last) = (path[0], path[path.len() - 1]);
            if (first.x - last.x).abs() < 1e-3 && (first.y - last.y).abs() < 1e-3 {
                path.pop();
            }
        }
        path
    }
}

/// Local-frame outline of the tail triangle starting at `(x, y)`.
pub fn tail_outline(x: f32, y: f32, heading_deg: f32) -> Points {
    let mut pen = Pen::default();
    pen.goto(x, y);
    pen.set_heading(heading_deg);
    pen.pen_down();
    for _ in 0..3 {
        pen.forward(TAIL_SIDE);
        pen.left(120.0);
    }
    pen.pen_up()
}

/// Local-frame outline of a hexagon with side `side`, anchored at `(x, y)`.
///
/// The outline starts `side` to the right of the anchor heading up and turns
/// left, so its centre is at `(x + side * (1 - sqrt(3)/2), y + side / 2)`.
pub fn hex_outline(side: f32, x: f32, y: f32) -> Points {
    let mut pen = Pen::default();
    pen.goto(x, y);
    pen.set_heading(0.0);
    pen.forward(side);
    pen.left(90.0);
    pen.pen_down();
    for _ in 0..6 {
        pen.forward(side);
        pen.left(60.0);
    }
    pen.pen_up()
}

/// Centres of the six pattern hexagons around the central one.
fn hex_ring_centres() -> [(f32, f32); 6] {
    let mut centres = [(0.0, 0.0); 6];
    for (i, c) in centres.iter_mut().enumerate() {
        let (sin, cos) = (60.0 * i as f32).to_radians().sin_cos();
        *c = (
            HEX_RING_R * cos + HEX_CENTER_C.0,
            HEX_RING_R * sin + HEX_CENTER_C.1,
        );
    }
    centres
}

fn circle<S: RenderSurface>(
    surface: &mut S,
    owner: Entity,
    pose: &FigurePose,
    color: Color,
    radius: f32,
    (x, y): (f32, f32),
) {
    surface.fill_circle(owner, pose.to_world(x, y), radius * pose.size, color);
}

fn polygon<S: RenderSurface>(
    surface: &mut S,
    owner: Entity,
    pose: &FigurePose,
    color: Color,
    outline: &[Vector2],
) {
    let world: Points = outline.iter().map(|p| pose.to_world(p.x, p.y)).collect();
    surface.fill_polygon(owner, &world, color);
}

/// Clear `owner`'s drawing and draw one frame of the figure.
pub fn draw_figure<S: RenderSurface>(surface: &mut S, owner: Entity, pose: &FigurePose) {
    surface.clear(owner);

    circle(surface, owner, pose, SHELL_GREEN, SHELL_R, CENTER);
    circle(surface, owner, pose, DARK_GREEN, HEAD_R, HEAD_C);

    let (dx_leg, dy_leg) = limb_offset(pose.phase);
    circle(surface, owner, pose, DARK_GREEN, LIMB_R, (LEG_L_C.0 + dx_leg, LEG_L_C.1 + dy_leg));
    circle(surface, owner, pose, DARK_GREEN, LIMB_R, (LEG_R_C.0 - dx_leg, LEG_R_C.1 + dy_leg));

    let (dx_arm, dy_arm) = arm_offset(pose.phase);
    circle(surface, owner, pose, DARK_GREEN, LIMB_R, (ARM_L_C.0 + dx_arm, ARM_L_C.1 + dy_arm));
    circle(surface, owner, pose, DARK_GREEN, LIMB_R, (ARM_R_C.0 - dx_arm, ARM_R_C.1 + dy_arm));

    let tail = tail_outline(TAIL_C.0, TAIL_C.1, tail_heading(pose.phase));
    polygon(surface, owner, pose, DARK_GREEN, &tail);

    polygon(surface, owner, pose, DARK_GREEN, &hex_outline(HEX_SIDE, HEX_CENTER_C.0, HEX_CENTER_C.1));
    for (x, y) in hex_ring_centres() {
        polygon(surface, owner, pose, DARK_GREEN, &hex_outline(HEX_SIDE, x, y));
    }

    circle(surface, owner, pose, Color::WHITE, EYE_R, EYE_L);
    circle(surface, owner, pose, Color::WHITE, EYE_R, EYE_R);
    circle(surface, owner, pose, Color::BLACK, PUPIL_R, PUPIL_L);
    circle(surface, owner, pose, Color::BLACK, PUPIL_R, PUPIL_R);
}

/// Read the pose of a figure entity, if it has the figure components.
pub fn figure_pose(world: &World, entity: Entity) -> Option<FigurePose> {
    let position = world.get::<MapPosition>(entity)?.pos;
    let orientation_deg = world.get::<Rotation>(entity).map_or(0.0, |r| r.degrees);
    let size = world.get::<Scale>(entity).map_or(1.0, |s| s.factor);
    let phase = world.get::<LimbAnimation>(entity).map_or(0.0, |a| a.phase);
    Some(FigurePose {
        position,
        orientation_deg,
        size,
        phase,
    })
}

/// Redraw a figure entity onto the [`Canvas`]. Returns `false` if the
/// entity is gone or is not a figure.
pub fn redraw_figure(world: &mut World, entity: Entity) -> bool {
    let Some(pose) = figure_pose(world, entity) else {
        return false;
    };
    let mut canvas = world.resource_mut::<Canvas>();
    draw_figure(&mut *canvas, entity, &pose);
    true
}

/// Create a figure, register it with the scheduler and draw it once.
pub fn spawn_figure(world: &mut World, size: f32, x: f32, y: f32, orientation_deg: f32) -> Entity {
    let entity = world
        .spawn((
            Figure,
            MapPosition::new(x, y),
            Rotation {
                degrees: orientation_deg,
            },
            Scale::new(size),
            LimbAnimation::default(),
            RigidBody::new(),
        ))
        .id();
    world.resource_mut::<FrameScheduler>().register_body(entity);
    redraw_figure(world, entity);
    debug!("Spawned figure {:?} at ({}, {})", entity, x, y);
    entity
}

/// Start the walking cycle at `cycles_per_second`.
pub fn animate_figure(world: &mut World, entity: Entity, cycles_per_second: f32) {
    let Some(mut anim) = world.get_mut::<LimbAnimation>(entity) else {
        warn!("animate_figure: {:?} has no LimbAnimation", entity);
        return;
    };
    anim.start(cycles_per_second);
    world.resource_mut::<FrameScheduler>().start();
}

/// Freeze the walking cycle. The figure keeps moving and being redrawn.
pub fn stop_figure(world: &mut World, entity: Entity) {
    if let Some(mut anim) = world.get_mut::<LimbAnimation>(entity) {
        anim.stop();
    }
}

/// Set the figure's linear velocity in world units per second.
pub fn move_figure(world: &mut World, entity: Entity, vx: f32, vy: f32) {
    if let Some(mut rb) = world.get_mut::<RigidBody>(entity) {
        rb.set_velocity(vx, vy);
    }
}

/// Jump the figure to `(x, y)`, optionally turning it, and redraw now.
pub fn teleport_figure(
    world: &mut World,
    entity: Entity,
    x: f32,
    y: f32,
    orientation_deg: Option<f32>,
) {
    if let Some(mut pos) = world.get_mut::<MapPosition>(entity) {
        pos.set_pos(Vector2 { x, y });
    }
    if let Some(degrees) = orientation_deg {
        if let Some(mut rot) = world.get_mut::<Rotation>(entity) {
            rot.degrees = degrees;
        }
    }
    redraw_figure(world, entity);
}
