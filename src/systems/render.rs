use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::resources::canvas::{Canvas, Points, Shape};
use crate::resources::controls::{ControlPanel, Slider, ToggleButton};
use crate::resources::debugmode::DebugMode;
use crate::resources::playback::Playback;
use crate::resources::scheduler::FrameScheduler;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::resources::worldview::WorldView;

const LINE_THICKNESS: f32 = 2.0;
const PANEL_FONT: i32 = 14;
const TRACK_COLOR: Color = Color::new(200, 200, 200, 255);
const HANDLE_COLOR: Color = Color::new(60, 60, 60, 255);
const BUTTON_COLOR: Color = Color::new(225, 225, 225, 255);

/// Map a world-space polygon to screen pixels, wound counter-clockwise as
/// seen on screen so raylib's triangle fan faces the viewer.
pub fn screen_polygon(points: &[Vector2], view: &WorldView, screen: ScreenSize) -> Points {
    let mut out: Points = points
        .iter()
        .map(|p| view.world_to_screen(*p, screen.w, screen.h))
        .collect();
    if signed_area(&out) > 0.0 {
        out.reverse();
    }
    out
}

/// Shoelace area in the coordinates given. Positive means clockwise on a
/// y-down screen.
fn signed_area(points: &[Vector2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        * 0.5
}

/// Draw the last presented canvas frame.
pub fn draw_canvas(d: &mut RaylibDrawHandle, canvas: &Canvas, screen: ScreenSize) {
    let view = canvas.view();
    let ppu = view.pixels_per_unit(screen.h);

    for shape in canvas.presented() {
        match shape {
            Shape::Polygon { points, color } => {
                let pts = screen_polygon(points, &view, screen);
                for i in 1..pts.len() - 1 {
                    d.draw_triangle(pts[0], pts[i], pts[i + 1], *color);
                }
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                let c = view.world_to_screen(*center, screen.w, screen.h);
                d.draw_circle_v(c, radius * ppu, *color);
            }
            Shape::Line { from, to, color } => {
                let a = view.world_to_screen(*from, screen.w, screen.h);
                let b = view.world_to_screen(*to, screen.w, screen.h);
                d.draw_line_ex(a, b, LINE_THICKNESS, *color);
            }
            Shape::Text {
                at,
                content,
                font_size,
                color,
            } => {
                let p = view.world_to_screen(*at, screen.w, screen.h);
                d.draw_text(content, p.x as i32, p.y as i32, *font_size as i32, *color);
            }
        }
    }
}

fn draw_slider(d: &mut RaylibDrawHandle, slider: &Slider, caption: &str) {
    let b = slider.bounds;
    d.draw_text(caption, b.x as i32, b.y as i32 - 18, PANEL_FONT, Color::BLACK);
    d.draw_rectangle(
        b.x as i32,
        (b.y + b.height * 0.5) as i32 - 2,
        b.width as i32,
        4,
        TRACK_COLOR,
    );
    d.draw_rectangle(
        slider.handle_x() as i32 - 4,
        b.y as i32,
        8,
        b.height as i32,
        HANDLE_COLOR,
    );
}

fn draw_button(d: &mut RaylibDrawHandle, button: &ToggleButton) {
    let b = button.bounds;
    d.draw_rectangle(b.x as i32, b.y as i32, b.width as i32, b.height as i32, BUTTON_COLOR);
    d.draw_rectangle_lines(b.x as i32, b.y as i32, b.width as i32, b.height as i32, HANDLE_COLOR);
    d.draw_text(
        button.label(),
        b.x as i32 + 10,
        b.y as i32 + 6,
        PANEL_FONT,
        Color::BLACK,
    );
}

/// Draw the rate slider, the scrub slider and the pause button.
pub fn draw_controls(d: &mut RaylibDrawHandle, panel: &ControlPanel, playback: &Playback) {
    draw_slider(
        d,
        &panel.rate,
        &format!("{}: {:.1}", panel.rate.label, panel.rate.value),
    );
    draw_slider(
        d,
        &panel.scrubber,
        &format!(
            "{}: {:.2} / {:.2} s",
            panel.scrubber.label, playback.simulation_time, playback.max_time
        ),
    );
    draw_button(d, &panel.pause);
}

pub fn render_debug_ui(
    d: &mut RaylibDrawHandle,
    screen: ScreenSize,
    view: &WorldView,
    scheduler: &FrameScheduler,
    time: &WorldTime,
    playback: &Playback,
) {
    let debug_text = "DEBUG MODE (press F11 to toggle)";

    let fps = d.get_fps();
    let text = format!("{} | FPS: {}", debug_text, fps);
    d.draw_text(&text, 10, 10, 10, Color::BLACK);

    let text = format!(
        "Ticks: {} ({} ms) | Wall: {:.2} s | Sim: {:.3} s x{:.1}{}",
        scheduler.ticks(),
        scheduler.frame_ms(),
        time.elapsed,
        playback.simulation_time,
        playback.rate,
        if playback.paused { " (paused)" } else { "" }
    );
    d.draw_text(&text, 10, 30, 10, Color::BLACK);

    let view_text = format!(
        "View x: [{:.1}, {:.1}] y: [{:.1}, {:.1}]",
        view.x_lo, view.x_hi, view.y_lo, view.y_hi
    );
    d.draw_text(&view_text, 10, screen.h - 30, 10, Color::BLACK);

    let mouse_pos = d.get_mouse_position();
    let mouse_world = view.screen_to_world(mouse_pos, screen.w, screen.h);
    let mouse_text = format!(
        "Mouse screen: ({:.1}, {:.1}) World: ({:.2}, {:.2})",
        mouse_pos.x, mouse_pos.y, mouse_world.x, mouse_world.y
    );
    d.draw_text(&mouse_text, 10, 50, 10, Color::BLACK);
}

/// Present one window frame: canvas, controls and, in debug mode, the overlay.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    canvas: Res<Canvas>,
    screen: Res<ScreenSize>,
    panel: Res<ControlPanel>,
    playback: Res<Playback>,
    scheduler: Res<FrameScheduler>,
    time: Res<WorldTime>,
    debug: Option<Res<DebugMode>>,
) {
    let screen = *screen;
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::WHITE);

    draw_canvas(&mut d, &canvas, screen);
    draw_controls(&mut d, &panel, &playback);

    if debug.is_some() {
        render_debug_ui(&mut d, screen, &canvas.view(), &scheduler, &time, &playback);
    }
}
