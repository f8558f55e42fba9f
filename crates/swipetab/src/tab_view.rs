//! The tab view: a tab bar above or below the scene carousel.

use crate::carousel::{Carousel, IndexChanged, SceneRenderer, TabViewObserver};
use crate::config::{TabBarPosition, TabViewConfig};
use crate::error::ConfigError;
use crate::jump::JumpHandle;
use crate::layout::TabLayoutRegistry;
use crate::route::NavigationState;
use crate::tab_bar::{TabBar, TabBarProps, TabBarView};
use std::any::Any;
use std::fmt;
use swipetab_core::{
    AccessibleRole, Animated, Canvas, Constraints, Event, LayoutResult, Rect, Size, TypeId, Widget,
};

/// Swipeable, animated tab view.
///
/// # Examples
///
/// ```
/// use swipetab::{NavigationState, Route, TabView, TabViewConfig};
/// use swipetab_core::{Animated, Rect, Widget};
///
/// let routes = NavigationState::new([Route::new("a"), Route::new("b")]);
/// let mut view = TabView::new(routes, TabViewConfig::default());
/// view.layout(Rect::new(0.0, 0.0, 320.0, 480.0));
///
/// assert!(view.jump_to("b"));
/// while view.tick(0.016) {}
/// assert_eq!(view.current_index(), 1);
/// ```
pub struct TabView {
    config: TabViewConfig,
    carousel: Carousel,
    tab_bar: Box<dyn TabBarView>,
    registry: TabLayoutRegistry,
    bounds: Rect,
}

impl TabView {
    /// Create a tab view with the default tab bar.
    #[must_use]
    pub fn new(navigation: NavigationState, config: TabViewConfig) -> Self {
        let registry = TabLayoutRegistry::new(navigation.len());
        let carousel = Carousel::new(navigation, &config);
        let props = props_for(&config, &carousel, &registry);
        Self {
            tab_bar: Box::new(TabBar::new(props)),
            config,
            carousel,
            registry,
            bounds: Rect::default(),
        }
    }

    /// Create a tab view after validating `config`.
    pub fn try_new(
        navigation: NavigationState,
        config: TabViewConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(navigation, config))
    }

    /// Set the scene renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: impl SceneRenderer + 'static) -> Self {
        self.carousel = self.carousel.renderer(renderer);
        self
    }

    /// Set the observer.
    #[must_use]
    pub fn observer(mut self, observer: impl TabViewObserver + 'static) -> Self {
        self.carousel = self.carousel.observer(observer);
        self
    }

    /// Replace the tab bar. `build` receives the same props the default bar
    /// gets.
    #[must_use]
    pub fn tab_bar<B, F>(mut self, build: F) -> Self
    where
        B: TabBarView + 'static,
        F: FnOnce(TabBarProps) -> B,
    {
        let mut bar = build(self.tab_bar_props());
        bar.layout(self.tab_bar.bounds());
        bar.sync(self.carousel.navigation());
        self.tab_bar = Box::new(bar);
        self
    }

    /// Props for building a tab bar against this view.
    #[must_use]
    pub fn tab_bar_props(&self) -> TabBarProps {
        props_for(&self.config, &self.carousel, &self.registry)
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &TabViewConfig {
        &self.config
    }

    /// The carousel.
    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// The carousel, mutably.
    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// The hosted tab bar.
    #[must_use]
    pub fn tab_bar_view(&self) -> &dyn TabBarView {
        self.tab_bar.as_ref()
    }

    /// Shared tab measurements.
    #[must_use]
    pub const fn registry(&self) -> &TabLayoutRegistry {
        &self.registry
    }

    /// Handle for requesting jumps from elsewhere.
    #[must_use]
    pub fn handle(&self) -> JumpHandle {
        self.carousel.handle()
    }

    /// Committed index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.carousel.current_index()
    }

    /// Request a jump to the route with `key`. Returns false if the request
    /// was dropped.
    pub fn jump_to(&mut self, key: &str) -> bool {
        let started = self.carousel.jump_to(key);
        self.sync_tab_bar();
        started
    }

    /// Replace the navigation state.
    pub fn set_navigation_state(&mut self, navigation: NavigationState) {
        self.carousel.set_navigation_state(navigation);
        self.sync_tab_bar();
    }

    fn sync_tab_bar(&mut self) {
        self.tab_bar.sync(self.carousel.navigation());
    }

    fn split(&self, bounds: Rect) -> (Rect, Rect) {
        let height = self.tab_bar.height();
        match self.config.tab_bar.position {
            TabBarPosition::Top => bounds.split_top(height),
            TabBarPosition::Bottom => {
                let (scenes, bar) = bounds.split_bottom(height);
                (bar, scenes)
            }
        }
    }
}

fn props_for(
    config: &TabViewConfig,
    carousel: &Carousel,
    registry: &TabLayoutRegistry,
) -> TabBarProps {
    TabBarProps {
        config: config.tab_bar.clone(),
        navigation: carousel.navigation().clone(),
        position: carousel.position_reader(),
        jump: carousel.handle(),
        registry: registry.clone(),
    }
}

impl fmt::Debug for TabView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabView")
            .field("config", &self.config)
            .field("carousel", &self.carousel)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Animated for TabView {
    fn tick(&mut self, dt: f64) -> bool {
        let before = self.carousel.current_index();
        let moving = self.carousel.tick(dt);
        if self.carousel.current_index() != before {
            self.sync_tab_bar();
        }
        moving
    }
}

impl Widget for TabView {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(constraints.biggest())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let (bar, scenes) = self.split(bounds);
        self.tab_bar.layout(bar);
        self.carousel.layout(scenes);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.carousel.paint(canvas);
        self.tab_bar.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::Resize { width, height } = event {
            let bounds = Rect::new(self.bounds.x, self.bounds.y, *width, *height);
            self.layout(bounds);
            return None;
        }

        let pressed = self.tab_bar.event(event);
        let changed = self.carousel.event(event);
        if changed.is_some() {
            self.sync_tab_bar();
        }
        changed.or(pressed)
    }

    fn is_interactive(&self) -> bool {
        !self.carousel.navigation().is_empty()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Downcast a message returned from [`Widget::event`] to an index change.
#[must_use]
pub fn as_index_changed(message: &(dyn Any + Send)) -> Option<&IndexChanged> {
    message.downcast_ref::<IndexChanged>()
}
