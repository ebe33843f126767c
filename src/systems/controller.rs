//! Motion controller operations.
//!
//! These functions apply a [`MotionController`]'s state to its figure: the
//! vertical velocity goes into the [`RigidBody`], the position is set to
//! `(x_position, height)` and the figure is redrawn. Labels are separate
//! and only change when [`update_label`] is called.
//!
//! They work on a borrowed [`ControlledBodies`] query and any
//! [`RenderSurface`], so observers and frame callbacks can share them.

use bevy_ecs::prelude::*;

use crate::components::figure::Figure;
use crate::components::label::Label;
use crate::components::limbanimation::LimbAnimation;
use crate::components::mapposition::MapPosition;
use crate::components::motioncontroller::MotionController;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::kinematics::MotionState;
use crate::resources::canvas::RenderSurface;
use crate::systems::figure::{FigurePose, draw_figure};

/// Query data of a figure driven by a [`MotionController`].
pub type ControlledBodyData = (
    &'static mut MotionController,
    &'static mut MapPosition,
    &'static mut RigidBody,
    Option<&'static Rotation>,
    Option<&'static Scale>,
    Option<&'static LimbAnimation>,
);

pub type ControlledBodies<'w, 's> = Query<'w, 's, ControlledBodyData, With<Figure>>;

/// Move `entity` to simulation time `time`, write the result into the
/// body and redraw it. Returns `None` if `entity` is not a controlled figure.
pub fn set_time<S: RenderSurface>(
    bodies: &mut ControlledBodies,
    surface: &mut S,
    entity: Entity,
    time: f32,
) -> Option<MotionState> {
    let Ok((mut controller, mut position, mut body, rotation, scale, anim)) = bodies.get_mut(entity)
    else {
        return None;
    };

    let state = controller.set_time(time);
    body.set_velocity(0.0, state.velocity);
    position.set_pos(controller.pose());

    let pose = FigurePose {
        position: position.pos,
        orientation_deg: rotation.map_or(0.0, |r| r.degrees),
        size: scale.map_or(1.0, |s| s.factor),
        phase: anim.map_or(0.0, |a| a.phase),
    };
    draw_figure(surface, entity, &pose);
    Some(state)
}

/// Advance `entity` by `dt` seconds of simulation time.
pub fn step<S: RenderSurface>(
    bodies: &mut ControlledBodies,
    surface: &mut S,
    entity: Entity,
    dt: f32,
) -> Option<MotionState> {
    let current = bodies.get(entity).ok()?.0.current_time;
    set_time(bodies, surface, entity, current + dt)
}

/// Rewrite the label of `entity`. `relative_delta` is this body's height
/// minus the other body's. Returns `false` if there is no label to write.
pub fn update_label<S: RenderSurface>(
    bodies: &ControlledBodies,
    labels: &Query<&Label>,
    surface: &mut S,
    entity: Entity,
    relative_delta: f32,
) -> bool {
    let Ok((controller, ..)) = bodies.get(entity) else {
        return false;
    };
    let Some(label_entity) = controller.label else {
        return false;
    };
    let style = labels.get(label_entity).cloned().unwrap_or_default();

    surface.clear(label_entity);
    surface.write_text(
        label_entity,
        controller.label_anchor(),
        &controller.label_text(relative_delta),
        style.font_size,
        style.color,
    );
    true
}
