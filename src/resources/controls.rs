//! On-screen playback controls.
//!
//! The control panel has two sliders and a toggle button:
//!
//! - `rate`: playback rate in `[-3, 3]`, resolution `0.1`,
//! - `scrubber`: simulation time in `[0, max_time]`, resolution `0.01`,
//! - `pause`: shows "Pause" while playing and "Resume" while paused.
//!
//! The widgets only hold state and screen-space bounds. Pointer input is
//! turned into [`ControlAction`]s by [`ControlPanel::pointer`]; the input
//! system forwards those as events. Setting a slider value from code
//! (for example keeping the scrubber in sync with playback) never produces
//! an action, so programmatic updates cannot re-enter the scrub handler.

use bevy_ecs::prelude::*;
use raylib::prelude::{Rectangle, Vector2};

use crate::resources::playback::{DEFAULT_RATE, MAX_RATE, MIN_RATE, Playback};

const PANEL_MARGIN: f32 = 16.0;
const PANEL_WIDTH: f32 = 220.0;
const SLIDER_HEIGHT: f32 = 14.0;
const ROW_SPACING: f32 = 44.0;
const LABEL_HEIGHT: f32 = 18.0;
const BUTTON_WIDTH: f32 = 90.0;
const BUTTON_HEIGHT: f32 = 26.0;

pub const RATE_RESOLUTION: f32 = 0.1;
pub const SCRUB_RESOLUTION: f32 = 0.01;

/// Horizontal slider over `[min, max]`, snapped to `resolution`.
#[derive(Clone, Debug)]
pub struct Slider {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub resolution: f32,
    pub value: f32,
    /// Track rectangle in screen pixels.
    pub bounds: Rectangle,
}

impl Slider {
    pub fn new(label: &'static str, min: f32, max: f32, resolution: f32, value: f32) -> Self {
        let mut slider = Self {
            label,
            min,
            max: max.max(min),
            resolution,
            value: min,
            bounds: Rectangle::new(0.0, 0.0, 0.0, 0.0),
        };
        slider.set_value(value);
        slider
    }

    /// Clamp and snap `value` into the slider's range.
    pub fn snap(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.resolution <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.resolution).round();
        (self.min + steps * self.resolution).clamp(self.min, self.max)
    }

    /// Set the displayed value. Returns the stored (snapped) value.
    pub fn set_value(&mut self, value: f32) -> f32 {
        self.value = self.snap(value);
        self.value
    }

    /// Change the upper bound, re-clamping the current value.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(self.min);
        self.set_value(self.value);
    }

    /// Slider value under screen x coordinate `x`.
    pub fn value_at(&self, x: f32) -> f32 {
        if self.bounds.width <= 0.0 {
            return self.value;
        }
        let fraction = ((x - self.bounds.x) / self.bounds.width).clamp(0.0, 1.0);
        self.snap(self.min + fraction * (self.max - self.min))
    }

    /// Screen x coordinate of the handle.
    pub fn handle_x(&self) -> f32 {
        let span = self.max - self.min;
        let fraction = if span > 0.0 {
            (self.value - self.min) / span
        } else {
            0.0
        };
        self.bounds.x + fraction * self.bounds.width
    }

    pub fn contains(&self, point: Vector2) -> bool {
        contains(&self.bounds, point)
    }
}

/// Two-state push button.
#[derive(Clone, Debug)]
pub struct ToggleButton {
    pub off_label: &'static str,
    pub on_label: &'static str,
    pub on: bool,
    pub bounds: Rectangle,
}

impl ToggleButton {
    pub fn new(off_label: &'static str, on_label: &'static str) -> Self {
        Self {
            off_label,
            on_label,
            on: false,
            bounds: Rectangle::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.on { self.on_label } else { self.off_label }
    }

    pub fn contains(&self, point: Vector2) -> bool {
        contains(&self.bounds, point)
    }
}

/// Which slider is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    Rate,
    Scrubber,
}

/// User intent produced by pointer interaction with the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    TogglePause,
    Scrub(f32),
    SetRate(f32),
}

#[derive(Resource, Clone, Debug)]
pub struct ControlPanel {
    pub rate: Slider,
    pub scrubber: Slider,
    pub pause: ToggleButton,
    pub dragging: Option<DragTarget>,
}

impl ControlPanel {
    /// Build a panel matching `playback`, laid out for a `screen_w` window.
    pub fn new(playback: &Playback, screen_w: i32) -> Self {
        let mut panel = Self {
            rate: Slider::new("Playback Rate", MIN_RATE, MAX_RATE, RATE_RESOLUTION, DEFAULT_RATE),
            scrubber: Slider::new("Time", 0.0, playback.max_time, SCRUB_RESOLUTION, 0.0),
            pause: ToggleButton::new("Pause", "Resume"),
            dragging: None,
        };
        panel.sync(playback);
        panel.layout(screen_w);
        panel
    }

    /// Copy playback state into the widgets without producing actions.
    pub fn sync(&mut self, playback: &Playback) {
        self.rate.set_value(playback.rate);
        self.scrubber.set_max(playback.max_time);
        self.scrubber.set_value(playback.simulation_time);
        self.pause.on = playback.paused;
    }

    /// Place the panel in the top-right corner of the window.
    pub fn layout(&mut self, screen_w: i32) {
        let x = (screen_w as f32 - PANEL_WIDTH - PANEL_MARGIN).max(PANEL_MARGIN);
        let mut y = PANEL_MARGIN + LABEL_HEIGHT;
        self.rate.bounds = Rectangle::new(x, y, PANEL_WIDTH, SLIDER_HEIGHT);
        y += ROW_SPACING;
        self.scrubber.bounds = Rectangle::new(x, y, PANEL_WIDTH, SLIDER_HEIGHT);
        y += ROW_SPACING - LABEL_HEIGHT;
        self.pause.bounds = Rectangle::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT);
    }

    /// Feed one frame of pointer state and collect the resulting actions.
    ///
    /// `pressed` is true only on the frame the button went down; `down`
    /// while it is held.
    pub fn pointer(&mut self, at: Vector2, pressed: bool, down: bool) -> Vec<ControlAction> {
        let mut actions = Vec::new();

        if pressed {
            if self.pause.contains(at) {
                actions.push(ControlAction::TogglePause);
            } else if self.rate.contains(at) {
                self.dragging = Some(DragTarget::Rate);
            } else if self.scrubber.contains(at) {
                self.dragging = Some(DragTarget::Scrubber);
            }
        }

        if !down {
            self.dragging = None;
            return actions;
        }

        match self.dragging {
            Some(DragTarget::Rate) => {
                let value = self.rate.value_at(at.x);
                if value != self.rate.value || pressed {
                    self.rate.set_value(value);
                    actions.push(ControlAction::SetRate(value));
                }
            }
            Some(DragTarget::Scrubber) => {
                let value = self.scrubber.value_at(at.x);
                if value != self.scrubber.value || pressed {
                    self.scrubber.set_value(value);
                    actions.push(ControlAction::Scrub(value));
                }
            }
            None => {}
        }
        actions
    }
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn centre_of(rect: Rectangle) -> Vector2 {
        Vector2 {
            x: rect.x + rect.width * 0.5,
            y: rect.y + rect.height * 0.5,
        }
    }

    #[test]
    fn slider_snaps_and_clamps() {
        let mut s = Slider::new("Rate", -3.0, 3.0, 0.1, 1.0);
        assert!(approx_eq(s.set_value(1.234), 1.2));
        assert!(approx_eq(s.set_value(7.0), 3.0));
        assert!(approx_eq(s.set_value(-7.0), -3.0));
        assert!(approx_eq(s.set_value(f32::NAN), -3.0));
    }

    #[test]
    fn slider_maps_screen_x_to_value() {
        let mut s = Slider::new("Time", 0.0, 4.0, 0.01, 0.0);
        s.bounds = Rectangle::new(100.0, 0.0, 200.0, 10.0);
        assert!(approx_eq(s.value_at(100.0), 0.0));
        assert!(approx_eq(s.value_at(200.0), 2.0));
        assert!(approx_eq(s.value_at(1000.0), 4.0));
        s.set_value(1.0);
        assert!(approx_eq(s.handle_x(), 150.0));
    }

    #[test]
    fn shrinking_max_reclamps_value() {
        let mut s = Slider::new("Time", 0.0, 4.0, 0.01, 3.5);
        s.set_max(2.0);
        assert!(approx_eq(s.value, 2.0));
    }

    #[test]
    fn toggle_button_labels() {
        let mut b = ToggleButton::new("Pause", "Resume");
        assert_eq!(b.label(), "Pause");
        b.on = true;
        assert_eq!(b.label(), "Resume");
    }

    #[test]
    fn clicking_pause_emits_toggle() {
        let playback = Playback::new(4.0);
        let mut panel = ControlPanel::new(&playback, 900);
        let at = centre_of(panel.pause.bounds);
        assert_eq!(panel.pointer(at, true, true), vec![ControlAction::TogglePause]);
        assert!(panel.pointer(at, false, true).is_empty());
    }

    #[test]
    fn dragging_scrubber_emits_scrub_until_release() {
        let playback = Playback::new(4.0);
        let mut panel = ControlPanel::new(&playback, 900);
        let start = centre_of(panel.scrubber.bounds);

        let actions = panel.pointer(start, true, true);
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], ControlAction::Scrub(t) if approx_eq(t, 2.0)));
        assert_eq!(panel.dragging, Some(DragTarget::Scrubber));

        // Leaving the track keeps dragging, clamped to the end.
        let far = Vector2 { x: 5000.0, y: 0.0 };
        let actions = panel.pointer(far, false, true);
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], ControlAction::Scrub(t) if approx_eq(t, 4.0)));
        assert!(panel.pointer(far, false, true).is_empty());

        assert!(panel.pointer(far, false, false).is_empty());
        assert_eq!(panel.dragging, None);
    }

    #[test]
    fn sync_never_emits_actions() {
        let mut playback = Playback::new(4.0);
        let mut panel = ControlPanel::new(&playback, 900);
        playback.simulation_time = 1.5;
        playback.paused = true;
        panel.sync(&playback);
        assert!(approx_eq(panel.scrubber.value, 1.5));
        assert_eq!(panel.pause.label(), "Resume");
        assert!(panel.pointer(Vector2 { x: 0.0, y: 0.0 }, false, false).is_empty());
    }
}
