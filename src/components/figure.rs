//! Marker for entities drawn as a turtle figure.
//!
//! A figure entity carries [`Figure`] together with
//! [`MapPosition`](super::mapposition::MapPosition),
//! [`Rotation`](super::rotation::Rotation), [`Scale`](super::scale::Scale),
//! [`LimbAnimation`](super::limbanimation::LimbAnimation) and
//! [`RigidBody`](super::rigidbody::RigidBody). Use
//! [`spawn_figure`](crate::systems::figure::spawn_figure) to create one.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Figure;
