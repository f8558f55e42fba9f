//! Gesture recognition from touch and mouse events.
//!
//! [`PanRecognizer`] turns raw pointer input into a horizontal pan with a
//! translation measured from the touch origin and a velocity estimated from
//! recent samples. Time comes from the host's frame clock via
//! [`PanRecognizer::advance`], so recognition is deterministic under test.

use crate::event::{Event, GestureState, MouseButton, TouchId, MOUSE_TOUCH_ID};
use crate::geometry::Point;
use std::collections::VecDeque;

/// Configuration for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Horizontal distance a touch must travel before the pan activates.
    pub active_offset_x: f32,
    /// Vertical distance after which a not-yet-active touch is treated as a
    /// vertical scroll and never activates.
    pub fail_offset_y: f32,
    /// Maximum movement for a release to count as a tap.
    pub tap_slop: f32,
    /// Window (seconds) of samples used for the velocity estimate.
    pub velocity_window: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            active_offset_x: 10.0,
            fail_offset_y: 20.0,
            tap_slop: 10.0,
            velocity_window: 0.1,
        }
    }
}

/// A recognized pan update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanUpdate {
    /// Phase of the pan.
    pub state: GestureState,
    /// Horizontal translation from the touch origin (px).
    pub translation_x: f64,
    /// Horizontal velocity (px/s).
    pub velocity_x: f64,
}

/// Output of [`PanRecognizer::process`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recognized {
    /// A pan began, moved, ended or was cancelled.
    Pan(PanUpdate),
    /// A touch was released without moving past the tap slop.
    Tap {
        /// Release position
        position: Point,
    },
}

#[derive(Debug, Clone)]
struct ActiveTouch {
    id: TouchId,
    origin: Point,
    current: Point,
    panning: bool,
    failed: bool,
}

/// Single-finger horizontal pan recognizer.
#[derive(Debug)]
pub struct PanRecognizer {
    config: GestureConfig,
    touch: Option<ActiveTouch>,
    samples: VecDeque<(f64, f32)>,
    clock: f64,
    enabled: bool,
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanRecognizer {
    /// Create a new recognizer with default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Create a new recognizer with custom config.
    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            touch: None,
            samples: VecDeque::new(),
            clock: 0.0,
            enabled: true,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a pan is currently active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.touch.as_ref().is_some_and(|t| t.panning)
    }

    /// Enable or disable recognition. Disabling mid-pan cancels it on the
    /// next event.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Advance the recognizer's clock by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
    }

    /// Feed an event. Returns a recognized gesture, if any.
    pub fn process(&mut self, event: &Event) -> Option<Recognized> {
        match event {
            Event::TouchStart { id, position } => self.on_start(*id, *position),
            Event::TouchMove { id, position } => self.on_move(*id, *position),
            Event::TouchEnd { id, position } => self.on_end(*id, *position),
            Event::TouchCancel { id } => self.on_cancel(*id),
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.on_start(MOUSE_TOUCH_ID, *position),
            Event::MouseMove { position } => self.on_move(MOUSE_TOUCH_ID, *position),
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => self.on_end(MOUSE_TOUCH_ID, *position),
            _ => None,
        }
    }

    fn on_start(&mut self, id: TouchId, position: Point) -> Option<Recognized> {
        if self.touch.is_some() {
            // Second finger: single-finger recognizer ignores it.
            return None;
        }
        self.touch = Some(ActiveTouch {
            id,
            origin: position,
            current: position,
            panning: false,
            failed: false,
        });
        self.samples.clear();
        self.samples.push_back((self.clock, position.x));
        None
    }

    fn on_move(&mut self, id: TouchId, position: Point) -> Option<Recognized> {
        let enabled = self.enabled;
        let config = self.config.clone();
        let touch = self.touch.as_mut().filter(|t| t.id == id)?;
        touch.current = position;

        if touch.panning && !enabled {
            return self.on_cancel(id);
        }

        let dx = position.x - touch.origin.x;
        let dy = position.y - touch.origin.y;
        let state = if touch.panning {
            GestureState::Changed
        } else if touch.failed || !enabled {
            return None;
        } else if dy.abs() > config.fail_offset_y && dx.abs() < config.active_offset_x {
            touch.failed = true;
            return None;
        } else if dx.abs() >= config.active_offset_x {
            touch.panning = true;
            GestureState::Started
        } else {
            return None;
        };

        self.record_sample(position.x);
        Some(Recognized::Pan(PanUpdate {
            state,
            translation_x: f64::from(dx),
            velocity_x: self.velocity(),
        }))
    }

    fn on_end(&mut self, id: TouchId, position: Point) -> Option<Recognized> {
        if self.touch.as_ref().map(|t| t.id) != Some(id) {
            return None;
        }
        self.record_sample(position.x);
        let velocity_x = self.velocity();
        let touch = self.touch.take()?;
        self.samples.clear();

        if touch.panning {
            return Some(Recognized::Pan(PanUpdate {
                state: GestureState::Ended,
                translation_x: f64::from(position.x - touch.origin.x),
                velocity_x,
            }));
        }
        if position.distance(&touch.origin) < self.config.tap_slop {
            return Some(Recognized::Tap { position });
        }
        None
    }

    fn on_cancel(&mut self, id: TouchId) -> Option<Recognized> {
        if self.touch.as_ref().map(|t| t.id) != Some(id) {
            return None;
        }
        let touch = self.touch.take()?;
        self.samples.clear();
        touch.panning.then(|| {
            Recognized::Pan(PanUpdate {
                state: GestureState::Cancelled,
                translation_x: f64::from(touch.current.x - touch.origin.x),
                velocity_x: 0.0,
            })
        })
    }

    fn record_sample(&mut self, x: f32) {
        self.samples.push_back((self.clock, x));
        let horizon = self.clock - self.config.velocity_window;
        while self.samples.len() > 2 && self.samples.front().is_some_and(|(t, _)| *t < horizon) {
            self.samples.pop_front();
        }
    }

    fn velocity(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(&(t0, x0)), Some(&(t1, x1))) if t1 > t0 => f64::from(x1 - x0) / (t1 - t0),
            _ => 0.0,
        }
    }
}
