//! Canvas implementations for rendering.

use crate::widget::{Canvas, TextStyle, Transform2D};
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// A recorded draw operation, in canvas (post-transform) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle
    Rect {
        /// Bounds after the active transform
        bounds: Rect,
        /// Fill color
        color: Color,
    },
    /// Text run
    Text {
        /// Text content
        content: String,
        /// Baseline origin after the active transform
        position: Point,
        /// Style
        style: TextStyle,
    },
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Transforms pushed on the canvas are applied while recording, so the
/// commands hold the positions a backend would actually rasterize. Useful
/// for tests and for shipping frames to another renderer.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    transform_stack: Vec<Transform2D>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.transform_stack.clear();
    }

    /// Get the current transform (identity if no transforms pushed).
    #[must_use]
    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Transform2D::IDENTITY)
    }

    /// Get the current clip bounds (None if no clips pushed).
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Get the transform stack depth.
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    /// Recorded text runs, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                content, position, ..
            } => Some((content.as_str(), *position)),
            DrawCommand::Rect { .. } => None,
        })
    }

    /// Recorded rectangles, in paint order.
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { bounds, color } => Some((*bounds, *color)),
            DrawCommand::Text { .. } => None,
        })
    }

    fn map_point(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.current_transform().matrix;
        Point::new(a.mul_add(p.x, c.mul_add(p.y, e)), b.mul_add(p.x, d.mul_add(p.y, f)))
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let origin = self.map_point(Point::new(rect.x, rect.y));
        self.commands.push(DrawCommand::Rect {
            bounds: Rect::new(origin.x, origin.y, rect.width, rect.height),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position: self.map_point(position),
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let combined = transform.then(&self.current_transform());
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }
}
