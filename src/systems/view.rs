//! World view fitting and the ground line.
//!
//! The view is fitted so the configured height range stays visible at any
//! window size. [`refit_world_view`] runs every frame and only does work
//! when the [`ScreenSize`] resource changed. World-anchored overlays (the
//! ground line and the key hint) are redrawn against the new view.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::{Color, Vector2};

use crate::components::ground::Ground;
use crate::components::label::Hint;
use crate::resources::canvas::{Canvas, RenderSurface};
use crate::resources::controls::ControlPanel;
use crate::resources::gameconfig::GameConfig;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldview::WorldView;

const HINT_TEXT: &str = "Space: pause   Left/Right: scrub   Up/Down: rate   F11: debug";
const HINT_FONT: f32 = 14.0;

/// World view for `screen` under the configured height range.
pub fn fitted_view(config: &GameConfig, screen: ScreenSize) -> WorldView {
    WorldView::fit_to_height(
        screen.w,
        screen.h,
        config.y_min,
        config.y_max,
        0.0,
        config.margin_frac,
    )
}

/// Draw a horizontal line at height `y` across the whole view.
pub fn draw_ground<S: RenderSurface>(surface: &mut S, owner: Entity, view: &WorldView, y: f32) {
    surface.clear(owner);
    surface.line(
        owner,
        Vector2 { x: view.x_lo, y },
        Vector2 { x: view.x_hi, y },
        Color::BLACK,
    );
}

/// Draw the key hint near the bottom-left corner of the view.
pub fn draw_hint<S: RenderSurface>(surface: &mut S, owner: Entity, view: &WorldView) {
    surface.clear(owner);
    surface.write_text(
        owner,
        Vector2 {
            x: view.x_lo + 0.02 * view.width(),
            y: view.y_lo + 0.06 * view.height(),
        },
        HINT_TEXT,
        HINT_FONT,
        Color::DARKGRAY,
    );
}

/// Refit the view, redraw the ground and hint, and lay out the controls
/// after a resize.
pub fn refit_world_view(
    screen: Res<ScreenSize>,
    config: Res<GameConfig>,
    mut canvas: ResMut<Canvas>,
    panel: Option<ResMut<ControlPanel>>,
    grounds: Query<(Entity, &Ground)>,
    hints: Query<Entity, With<Hint>>,
) {
    if !screen.is_changed() {
        return;
    }
    let view = fitted_view(&config, *screen);
    canvas.set_world_view(view);
    for (entity, ground) in grounds.iter() {
        draw_ground(&mut *canvas, entity, &view, ground.y);
    }
    for hint in hints.iter() {
        draw_hint(&mut *canvas, hint, &view);
    }
    if let Some(mut panel) = panel {
        panel.layout(screen.w);
    }
    debug!("World view refitted for {}x{}", screen.w, screen.h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::canvas::Shape;

    #[test]
    fn ground_spans_the_view_and_replaces_itself() {
        let mut world = World::new();
        let owner = world.spawn(Ground { y: 0.0 }).id();
        let view = WorldView::default();
        let mut canvas = Canvas::new(view);

        draw_ground(&mut canvas, owner, &view, 0.0);
        draw_ground(&mut canvas, owner, &view, 0.0);

        let shapes = canvas.shapes_of(owner);
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Line { from, to, .. } => {
                assert_eq!(from.x, view.x_lo);
                assert_eq!(to.x, view.x_hi);
                assert_eq!(from.y, 0.0);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn resize_refits_view_and_ground() {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(ScreenSize { w: 900, h: 600 });
        world.insert_resource(Canvas::default());
        let ground = world.spawn(Ground { y: 0.0 }).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(refit_world_view);
        schedule.run(&mut world);

        world.resource_mut::<ScreenSize>().w = 1200;
        schedule.run(&mut world);

        let view = world.resource::<Canvas>().view();
        assert!((view.width() / view.height() - 2.0).abs() < 1e-3);
        match &world.resource::<Canvas>().shapes_of(ground)[0] {
            Shape::Line { to, .. } => assert!((to.x - view.x_hi).abs() < 1e-3),
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn resize_keeps_hint_in_the_bottom_left_corner() {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(ScreenSize { w: 900, h: 600 });
        world.insert_resource(Canvas::default());
        let hint = world.spawn(Hint).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(refit_world_view);
        schedule.run(&mut world);

        world.resource_mut::<ScreenSize>().w = 1800;
        schedule.run(&mut world);

        let canvas = world.resource::<Canvas>();
        let view = canvas.view();
        let shapes = canvas.shapes_of(hint);
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Text { at, .. } => {
                assert!((at.x - (view.x_lo + 0.02 * view.width())).abs() < 1e-3);
                assert!((at.y - (view.y_lo + 0.06 * view.height())).abs() < 1e-3);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
