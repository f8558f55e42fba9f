//! Swipeable, animated tab view.
//!
//! A [`TabView`] hosts a tab bar and a horizontal carousel of scenes, one per
//! route. Scenes follow the finger while dragging and settle one route at a
//! time; programmatic jumps to distant tabs are staged so they only ever
//! slide one viewport.
//!
//! Per-frame values (translation, route position) live in shared cells that
//! presentation code reads without locking. Discrete events (index changes,
//! swipe start and end) reach the host through [`TabViewObserver`] and the
//! [`IndexChanged`] message.

pub mod auto_scroll;
pub mod carousel;
pub mod config;
pub mod error;
pub mod indicator;
pub mod jump;
pub mod layout;
pub mod motion;
pub mod route;
pub mod swipe;
pub mod tab_bar;
pub mod tab_view;
pub mod window;

pub use auto_scroll::{AutoScrollController, ChangeListener, ScrollPath, TabScroller};
pub use carousel::{Carousel, IndexChanged, SceneProps, SceneRenderer, TabViewObserver};
pub use config::{KeyboardDismissMode, RenderMode, TabBarConfig, TabBarPosition, TabViewConfig};
pub use error::{ConfigError, ScrollToIndexError};
pub use indicator::{IndicatorGeometry, TabIndicator};
pub use jump::{JumpController, JumpHandle, JumpPlan, JumpRejection};
pub use layout::TabLayoutRegistry;
pub use motion::{CarouselMotion, Track};
pub use route::{NavigationState, Route};
pub use swipe::{SwipeController, SwipeOutcome, SwipePhase};
pub use tab_bar::{
    active_label_opacity, estimate_label_width, inactive_label_opacity, LabelProvider, TabBar,
    TabBarProps, TabBarView, TabPressHandler, TabPressed,
};
pub use tab_view::{as_index_changed, TabView};
pub use window::{compute_window, RouteWindow, ScenePolicy};
