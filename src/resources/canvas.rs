//! Retained drawing surface.
//!
//! Everything the simulation draws goes through the [`RenderSurface`]
//! trait. Drawing is owned: each shape belongs to an entity, and
//! [`RenderSurface::clear`] removes only that owner's shapes. A figure
//! that clears and redraws itself every frame therefore never leaves
//! stale copies behind.
//!
//! [`Canvas`] is the implementation used by the program. It keeps one
//! layer per owner, in the order owners first drew, and takes a flattened
//! snapshot on [`present`](RenderSurface::present). The raylib render pass
//! only ever draws the last presented snapshot, so intermediate states
//! between two presents are never shown.
//!
//! All coordinates are world units; only text size is in screen pixels.

use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Vector2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::resources::worldview::WorldView;

/// Polygon vertex storage; figure polygons have at most six corners.
pub type Points = SmallVec<[Vector2; 8]>;

/// One drawing primitive, in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon {
        points: Points,
        color: Color,
    },
    Circle {
        center: Vector2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vector2,
        to: Vector2,
        color: Color,
    },
    Text {
        at: Vector2,
        content: String,
        font_size: f32,
        color: Color,
    },
}

/// Abstract drawing target used by the figure renderer and controllers.
pub trait RenderSurface {
    /// Remove every shape previously drawn by `owner`.
    fn clear(&mut self, owner: Entity);
    fn fill_polygon(&mut self, owner: Entity, points: &[Vector2], color: Color);
    fn fill_circle(&mut self, owner: Entity, center: Vector2, radius: f32, color: Color);
    fn line(&mut self, owner: Entity, from: Vector2, to: Vector2, color: Color);
    fn write_text(&mut self, owner: Entity, at: Vector2, content: &str, font_size: f32, color: Color);
    /// Configure which part of world space is visible.
    fn set_world_view(&mut self, view: WorldView);
    /// Publish everything drawn so far as the next frame.
    fn present(&mut self);
}

#[derive(Debug, Clone)]
struct Layer {
    owner: Entity,
    shapes: Vec<Shape>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Canvas {
    layers: Vec<Layer>,
    index: FxHashMap<Entity, usize>,
    presented: Vec<Shape>,
    view: WorldView,
    frames_presented: u64,
}

impl Canvas {
    pub fn new(view: WorldView) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    pub fn view(&self) -> WorldView {
        self.view
    }

    /// Shapes currently owned by `owner`, in drawing order.
    pub fn shapes_of(&self, owner: Entity) -> &[Shape] {
        self.index
            .get(&owner)
            .map(|&i| self.layers[i].shapes.as_slice())
            .unwrap_or(&[])
    }

    /// Number of owners that have ever drawn.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Last presented frame, flattened in drawing order.
    pub fn presented(&self) -> &[Shape] {
        &self.presented
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn layer_mut(&mut self, owner: Entity) -> &mut Vec<Shape> {
        let i = match self.index.get(&owner) {
            Some(&i) => i,
            None => {
                self.layers.push(Layer {
                    owner,
                    shapes: Vec::new(),
                });
                let i = self.layers.len() - 1;
                self.index.insert(owner, i);
                i
            }
        };
        &mut self.layers[i].shapes
    }
}

impl RenderSurface for Canvas {
    fn clear(&mut self, owner: Entity) {
        if let Some(&i) = self.index.get(&owner) {
            self.layers[i].shapes.clear();
        }
    }

    fn fill_polygon(&mut self, owner: Entity, points: &[Vector2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.layer_mut(owner).push(Shape::Polygon {
            points: points.iter().copied().collect(),
            color,
        });
    }

    fn fill_circle(&mut self, owner: Entity, center: Vector2, radius: f32, color: Color) {
        self.layer_mut(owner).push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, owner: Entity, from: Vector2, to: Vector2, color: Color) {
        self.layer_mut(owner).push(Shape::Line { from, to, color });
    }

    fn write_text(&mut self, owner: Entity, at: Vector2, content: &str, font_size: f32, color: Color) {
        self.layer_mut(owner).push(Shape::Text {
            at,
            content: content.to_string(),
            font_size,
            color,
        });
    }

    fn set_world_view(&mut self, view: WorldView) {
        self.view = view;
    }

    fn present(&mut self) {
        self.presented.clear();
        for layer in &self.layers {
            self.presented.extend(layer.shapes.iter().cloned());
        }
        self.frames_presented += 1;
        log::trace!(
            "presented frame {} ({} shapes, {} layers)",
            self.frames_presented,
            self.presented.len(),
            self.layers.iter().filter(|l| !l.shapes.is_empty()).count()
        );
    }
}
