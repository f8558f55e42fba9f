//! Tab bar widget.
//!
//! One item per route. Labels crossfade between the active and inactive
//! colors as the route position moves, the indicator slides between the
//! measured items, and pressing an item requests a jump to its route.

use crate::auto_scroll::{AutoScrollController, TabScroller};
use crate::config::TabBarConfig;
use crate::error::ScrollToIndexError;
use crate::indicator::TabIndicator;
use crate::jump::JumpHandle;
use crate::layout::TabLayoutRegistry;
use crate::route::{NavigationState, Route};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use swipetab_core::{
    AccessibleRole, Canvas, Constraints, Event, GestureState, LayoutResult, PanRecognizer, Point,
    Recognized, Rect, SharedValueReader, Size, TextStyle, TypeId, Widget,
};

/// Average glyph advance as a fraction of the font size, used to estimate
/// label widths without font metrics.
const GLYPH_ADVANCE: f32 = 0.55;

/// Produces the label text for a route.
pub type LabelProvider = Arc<dyn Fn(&Route) -> String + Send + Sync>;

/// Called when a tab item is pressed or long-pressed.
pub type TabPressHandler = Arc<dyn Fn(&Route) + Send + Sync>;

/// Message emitted when a tab item is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPressed {
    /// Index of the pressed item
    pub index: usize,
    /// Key of its route
    pub key: String,
    /// Whether it was a long press
    pub long_press: bool,
}

/// Opacity of an item's active-colored label at a route position.
#[must_use]
pub fn active_label_opacity(index: usize, position: f64) -> f32 {
    (1.0 - (index as f64 - position).abs()).max(0.0) as f32
}

/// Opacity of an item's inactive-colored label at a route position.
#[must_use]
pub fn inactive_label_opacity(index: usize, position: f64) -> f32 {
    (position - index as f64).abs().min(1.0) as f32
}

/// Estimated rendered width of `text` at `size` pixels.
#[must_use]
pub fn estimate_label_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_ADVANCE
}

/// Everything a tab bar needs from the tab view.
#[derive(Clone)]
pub struct TabBarProps {
    /// Tab bar configuration
    pub config: TabBarConfig,
    /// Routes and committed index
    pub navigation: NavigationState,
    /// Continuous route position
    pub position: SharedValueReader,
    /// Jump requests
    pub jump: JumpHandle,
    /// Shared tab measurements
    pub registry: TabLayoutRegistry,
}

/// A tab bar the tab view can host. [`TabBar`] is the default.
pub trait TabBarView: Widget {
    /// The routes or the committed index changed.
    fn sync(&mut self, navigation: &NavigationState);

    /// Preferred bar height.
    fn height(&self) -> f32;
}

/// Horizontal scroll state of the tab strip.
#[derive(Debug, Clone)]
struct TabStrip {
    registry: TabLayoutRegistry,
    offset: f32,
    viewport: f32,
}

impl TabStrip {
    fn max_offset(&self) -> f32 {
        (self.registry.content_width() - self.viewport).max(0.0)
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            0.0
        };
    }
}

impl TabScroller for TabStrip {
    fn scroll_to_index(
        &mut self,
        index: usize,
        view_offset: f32,
    ) -> Result<(), ScrollToIndexError> {
        if self.viewport <= 0.0 || self.registry.width(index).is_none() {
            return Err(ScrollToIndexError { index });
        }
        let start = self.registry.offset(index).unwrap_or(0.0);
        self.set_offset(start - view_offset);
        Ok(())
    }

    fn scroll_to_offset(&mut self, offset: f32) {
        self.set_offset(offset);
    }
}

/// The default tab bar.
pub struct TabBar {
    config: TabBarConfig,
    navigation: NavigationState,
    position: SharedValueReader,
    jump: JumpHandle,
    registry: TabLayoutRegistry,
    indicator: TabIndicator,
    auto_scroll: AutoScrollController,
    strip: TabStrip,
    recognizer: PanRecognizer,
    drag_origin: f32,
    label: LabelProvider,
    on_press: Option<TabPressHandler>,
    on_long_press: Option<TabPressHandler>,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl TabBar {
    /// Create a tab bar from the tab view's props.
    #[must_use]
    pub fn new(props: TabBarProps) -> Self {
        props.registry.set_route_count(props.navigation.len());
        Self {
            indicator: TabIndicator::new(props.registry.clone()),
            auto_scroll: AutoScrollController::new(props.registry.clone()),
            strip: TabStrip {
                registry: props.registry.clone(),
                offset: 0.0,
                viewport: 0.0,
            },
            config: props.config,
            navigation: props.navigation,
            position: props.position,
            jump: props.jump,
            registry: props.registry,
            recognizer: PanRecognizer::new(),
            drag_origin: 0.0,
            label: Arc::new(|route: &Route| route.label().to_string()),
            on_press: None,
            on_long_press: None,
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set the label provider.
    #[must_use]
    pub fn label(mut self, provider: impl Fn(&Route) -> String + Send + Sync + 'static) -> Self {
        self.label = Arc::new(provider);
        self
    }

    /// Set the press handler. The jump is requested either way.
    #[must_use]
    pub fn on_press(mut self, handler: impl Fn(&Route) + Send + Sync + 'static) -> Self {
        self.on_press = Some(Arc::new(handler));
        self
    }

    /// Set the long-press handler. The jump is requested either way.
    #[must_use]
    pub fn on_long_press(mut self, handler: impl Fn(&Route) + Send + Sync + 'static) -> Self {
        self.on_long_press = Some(Arc::new(handler));
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.navigation.len()
    }

    /// Label text of item `index`.
    #[must_use]
    pub fn item_label(&self, index: usize) -> Option<String> {
        self.navigation.route(index).map(|route| (self.label)(route))
    }

    /// Accessible name of item `index`, or `None` if its route is hidden
    /// from assistive technology.
    #[must_use]
    pub fn item_accessible_name(&self, index: usize) -> Option<String> {
        let route = self.navigation.route(index)?;
        if !route.accessible {
            return None;
        }
        Some(
            route
                .accessibility_label
                .clone()
                .unwrap_or_else(|| (self.label)(route)),
        )
    }

    /// Test ID of item `index`.
    #[must_use]
    pub fn item_test_id(&self, index: usize) -> Option<&str> {
        self.navigation.route(index)?.test_id.as_deref()
    }

    /// Screen rect of item `index`, accounting for the strip scroll.
    #[must_use]
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let width = self.registry.width(index)?;
        let offset = self.registry.offset(index)?;
        Some(Rect::new(
            self.bounds.x + offset - self.strip.offset,
            self.bounds.y,
            width,
            self.bounds.height,
        ))
    }

    /// Item under a screen point.
    #[must_use]
    pub fn item_at(&self, point: &Point) -> Option<usize> {
        if !self.bounds.contains_point(point) {
            return None;
        }
        (0..self.navigation.len())
            .find(|&i| self.item_rect(i).is_some_and(|rect| rect.contains_point(point)))
    }

    /// Horizontal scroll offset of the strip.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.strip.offset
    }

    fn measure_items(&self) {
        let count = self.navigation.len();
        if count == 0 {
            return;
        }
        let even_width = self.bounds.width / count as f32;
        for (i, route) in self.navigation.routes.iter().enumerate() {
            let label_width = estimate_label_width(&(self.label)(route), self.config.label_size);
            let width = if self.config.scroll_enabled {
                self.config.item_padding.mul_add(2.0, label_width)
            } else {
                even_width
            };
            self.registry.report_item_width(i, label_width);
            self.registry.report_width(i, width);
        }
    }

    fn press(&self, point: &Point, long_press: bool) -> Option<TabPressed> {
        let index = self.item_at(point)?;
        let route = self.navigation.route(index)?;
        let handler = if long_press {
            self.on_long_press.as_deref()
        } else {
            self.on_press.as_deref()
        };
        if let Some(handler) = handler {
            handler(route);
        }
        self.jump.jump_to(route.key.clone());
        tracing::debug!(index, long_press, "tab pressed");
        Some(TabPressed {
            index,
            key: route.key.clone(),
            long_press,
        })
    }

    fn label_origin(&self, index: usize, rect: Rect) -> Point {
        let label_width = self.registry.item_width(index).unwrap_or(0.0);
        Point::new(
            rect.x + (rect.width - label_width) / 2.0,
            rect.y + rect.height / 2.0,
        )
    }
}

impl fmt::Debug for TabBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabBar")
            .field("config", &self.config)
            .field("navigation", &self.navigation)
            .field("strip", &self.strip)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl TabBarView for TabBar {
    fn sync(&mut self, navigation: &NavigationState) {
        if navigation.routes != self.navigation.routes {
            self.navigation = navigation.clone();
            self.registry.set_route_count(self.navigation.len());
            self.measure_items();
            self.auto_scroll.reset();
        } else {
            self.navigation.index = navigation.index;
        }
        let index = self.navigation.current_index();
        self.auto_scroll
            .on_index(&mut self.strip, index, self.bounds.width);
    }

    fn height(&self) -> f32 {
        self.config.height
    }
}

impl Widget for TabBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.biggest().width, self.config.height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        let resized = bounds.size() != self.bounds.size();
        self.bounds = bounds;
        self.strip.viewport = bounds.width;
        if resized {
            self.measure_items();
            self.strip.set_offset(self.strip.offset);
            self.auto_scroll.reset();
            let index = self.navigation.current_index();
            self.auto_scroll.on_index(&mut self.strip, index, bounds.width);
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.config.background);
        canvas.push_clip(self.bounds);

        let position = self.position.get();
        for (i, route) in self.navigation.routes.iter().enumerate() {
            let Some(rect) = self.item_rect(i) else {
                continue;
            };
            if !rect.intersects(&self.bounds) {
                continue;
            }
            let text = (self.label)(route);
            let origin = self.label_origin(i, rect);
            let layers = [
                (self.config.active_color, active_label_opacity(i, position)),
                (self.config.inactive_color, inactive_label_opacity(i, position)),
            ];
            for (color, opacity) in layers {
                if opacity <= 0.0 {
                    continue;
                }
                let style = TextStyle {
                    size: self.config.label_size,
                    color: color.with_opacity(opacity),
                    ..TextStyle::default()
                };
                canvas.draw_text(&text, origin, &style);
            }
        }

        if let Some(geometry) = self.indicator.geometry(position) {
            let height = self.config.indicator_height;
            canvas.fill_rect(
                Rect::new(
                    self.bounds.x + geometry.x - self.strip.offset,
                    self.bounds.bottom() - height,
                    geometry.width,
                    height,
                ),
                self.config.indicator_color,
            );
        }

        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let pressed = match event {
            Event::LongPress { position } => self.press(position, true),
            Event::TouchStart { position, .. } | Event::MouseDown { position, .. }
                if !self.bounds.contains_point(position) =>
            {
                None
            }
            _ => match self.recognizer.process(event)? {
                Recognized::Tap { position } => self.press(&position, false),
                Recognized::Pan(pan) => {
                    if self.config.scroll_enabled {
                        if pan.state == GestureState::Started {
                            self.drag_origin = self.strip.offset;
                        }
                        self.strip
                            .set_offset(self.drag_origin - pan.translation_x as f32);
                    }
                    None
                }
            },
        };
        pressed.map(|p| Box::new(p) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        !self.navigation.is_empty()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TabList
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
