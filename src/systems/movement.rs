//! Per-figure frame step.
//!
//! Advances one registered figure by a scheduler tick: walking phase first
//! (only while animating), then linear motion from its
//! [`RigidBody`] velocity (always), then a redraw.
use bevy_ecs::prelude::*;

use crate::components::limbanimation::LimbAnimation;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::systems::figure::redraw_figure;

/// Step `entity` by `dt` seconds. Returns `false` if the entity no longer
/// exists.
pub fn frame_step(world: &mut World, entity: Entity, dt: f32) -> bool {
    let Ok(mut body) = world.get_entity_mut(entity) else {
        return false;
    };

    if let Some(mut anim) = body.get_mut::<LimbAnimation>() {
        anim.advance(dt);
    }

    let motion = body.get::<RigidBody>().map(|rb| rb.velocity);
    if let Some(velocity) = motion {
        if let Some(mut position) = body.get_mut::<MapPosition>() {
            position.translate(velocity, dt);
        }
    }

    redraw_figure(world, entity);
    true
}
