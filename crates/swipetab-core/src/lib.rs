//! Core types and traits for the swipetab tab view.
//!
//! This crate provides the foundational types the tab view is built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`] and the horizontal [`PanRecognizer`]
//! - Frame-synchronous values: [`SharedValue`], [`TimedValue`]
//! - The [`Widget`] / [`Canvas`] painting contract and a [`RecordingCanvas`]

pub mod animation;
mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod gesture;
mod shared;
pub mod widget;

pub use animation::{Easing, TimedValue, Timing};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, GestureState, MouseButton, TouchId, MOUSE_TOUCH_ID};
pub use geometry::{Point, Rect, Size};
pub use gesture::{GestureConfig, PanRecognizer, PanUpdate, Recognized};
pub use shared::{SharedValue, SharedValueReader};
pub use widget::{
    AccessibleRole, Animated, Canvas, FontWeight, LayoutResult, TextStyle, Transform2D, TypeId,
    Widget,
};
