//! The scene carousel.
//!
//! Owns the committed index state and wires the swipe controller, the jump
//! controller and the mount policy together. Every route gets a container at
//! `index * width`, all moved in lockstep by the shared translation; the
//! previous route's container additionally carries the staged-jump offset.
//!
//! Time advances only through [`Animated::tick`]. Bookkeeping that must wait
//! for a transition (the previous index, jump completion) is queued with the
//! transition's duration and runs after the animations have been advanced on
//! the frame where that duration elapses.

use crate::config::{KeyboardDismissMode, TabViewConfig};
use crate::jump::{JumpController, JumpHandle};
use crate::motion::{CarouselMotion, Track};
use crate::route::{NavigationState, Route};
use crate::swipe::{SwipeController, SwipeOutcome, SwipePhase};
use crate::window::ScenePolicy;
use std::any::Any;
use std::fmt;
use swipetab_core::{
    AccessibleRole, Animated, Canvas, Constraints, Event, GestureState, LayoutResult,
    PanRecognizer, Recognized, Rect, SharedValueReader, Size, Transform2D, TypeId, Widget,
};

/// What a scene renderer gets to draw one route.
pub struct SceneProps<'a> {
    /// The route
    pub route: &'a Route,
    /// Its index
    pub index: usize,
    /// Viewport layout
    pub layout: Size,
    /// Scene bounds in scene-local coordinates
    pub bounds: Rect,
    /// Continuous route position
    pub position: &'a SharedValueReader,
    /// Handle for requesting navigation
    pub jump: &'a JumpHandle,
}

/// Host-supplied scene content.
pub trait SceneRenderer: Send + Sync {
    /// Paint the scene into `canvas`, in scene-local coordinates.
    fn render(&self, props: &SceneProps<'_>, canvas: &mut dyn Canvas);
}

impl<F> SceneRenderer for F
where
    F: Fn(&SceneProps<'_>, &mut dyn Canvas) + Send + Sync,
{
    fn render(&self, props: &SceneProps<'_>, canvas: &mut dyn Canvas) {
        self(props, canvas);
    }
}

/// Discrete notifications for the host. Never called per frame.
pub trait TabViewObserver: Send + Sync {
    /// A new index was committed. Fires once per transition, at its start.
    fn on_index_change(&mut self, _index: usize) {}

    /// A swipe started.
    fn on_swipe_start(&mut self) {}

    /// A swipe was released.
    fn on_swipe_end(&mut self) {}

    /// The keyboard should be dismissed.
    fn on_dismiss_keyboard(&mut self) {}
}

/// Message returned from [`Widget::event`] when an event committed a new
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexChanged {
    /// Committed index
    pub index: usize,
    /// Key of the committed route
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredTask {
    /// A swipe settled on this index.
    SettlePrevious(usize),
    /// The in-flight jump is done.
    FinishJump,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    elapsed: f64,
    delay: f64,
    task: DeferredTask,
}

/// The scene carousel widget.
pub struct Carousel {
    navigation: NavigationState,
    track: Track,
    layout: Size,
    bounds: Rect,
    current: usize,
    previous: usize,
    duration: f64,
    swipe_enabled: bool,
    keyboard_dismiss_mode: KeyboardDismissMode,
    motion: CarouselMotion,
    position: SharedValueReader,
    swipe: SwipeController,
    jump: JumpController,
    policy: ScenePolicy,
    recognizer: PanRecognizer,
    deferred: Vec<Deferred>,
    jump_handle: JumpHandle,
    renderer: Option<Box<dyn SceneRenderer>>,
    observer: Option<Box<dyn TabViewObserver>>,
    last_change: Option<IndexChanged>,
}

impl Carousel {
    /// Create a carousel starting on the host's (clamped) index.
    #[must_use]
    pub fn new(navigation: NavigationState, config: &TabViewConfig) -> Self {
        let current = navigation.current_index();
        let track = Track::new(0.0, navigation.len());
        let motion = CarouselMotion::at_rest(track, current);
        let position = motion.position_reader();
        let mut navigation = navigation;
        navigation.index = current;
        Self {
            navigation,
            track,
            layout: Size::ZERO,
            bounds: Rect::default(),
            current,
            previous: current,
            duration: config.transition_duration(),
            swipe_enabled: config.swipe_enabled,
            keyboard_dismiss_mode: config.keyboard_dismiss_mode,
            motion,
            position,
            swipe: SwipeController::new(),
            jump: JumpController::new(config.smooth_jump),
            policy: ScenePolicy::new(config.render_mode, config.window_radius, current),
            recognizer: PanRecognizer::new(),
            deferred: Vec::new(),
            jump_handle: JumpHandle::new(),
            renderer: None,
            observer: None,
            last_change: None,
        }
    }

    /// Seed the layout before the first real measurement.
    #[must_use]
    pub fn initial_layout(mut self, layout: Size) -> Self {
        self.set_layout(layout);
        self
    }

    /// Set the scene renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: impl SceneRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Set the observer.
    #[must_use]
    pub fn observer(mut self, observer: impl TabViewObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Use an existing jump handle, so requests made through it before the
    /// carousel existed are honored.
    #[must_use]
    pub fn jump_handle(mut self, handle: JumpHandle) -> Self {
        self.jump_handle = handle;
        self
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Committed index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Index being vacated by the last transition.
    #[must_use]
    pub const fn previous_index(&self) -> usize {
        self.previous
    }

    /// In-flight jump target.
    #[must_use]
    pub const fn jump_target(&self) -> Option<usize> {
        self.jump.target()
    }

    /// Whether a jump is in progress.
    #[must_use]
    pub const fn is_jumping(&self) -> bool {
        self.jump.is_jumping()
    }

    /// Swipe phase.
    #[must_use]
    pub const fn swipe_phase(&self) -> SwipePhase {
        self.swipe.phase()
    }

    /// Shared translation.
    #[must_use]
    pub fn translation(&self) -> f64 {
        self.motion.translation()
    }

    /// Continuous route position.
    #[must_use]
    pub fn route_position(&self) -> f64 {
        self.motion.position()
    }

    /// Offset applied to the previous route's container.
    #[must_use]
    pub fn previous_offset(&self) -> f64 {
        self.motion.previous_offset()
    }

    /// Reader for the route position, for tab bars and indicators.
    #[must_use]
    pub fn position_reader(&self) -> SharedValueReader {
        self.position.clone()
    }

    /// Reader for the translation.
    #[must_use]
    pub fn translation_reader(&self) -> SharedValueReader {
        self.motion.translation_reader()
    }

    /// Handle for requesting jumps.
    #[must_use]
    pub fn handle(&self) -> JumpHandle {
        self.jump_handle.clone()
    }

    /// The navigation state, with `index` tracking the committed index.
    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Viewport layout.
    #[must_use]
    pub const fn layout_size(&self) -> Size {
        self.layout
    }

    /// Whether the scene at `index` is mounted under the render mode.
    #[must_use]
    pub fn is_scene_mounted(&self, index: usize) -> bool {
        self.policy
            .should_render(index, self.current, self.previous, self.track.route_count)
    }

    /// Whether the scene at `index` is hidden because it lies strictly between
    /// the previous index and the in-flight jump target.
    #[must_use]
    pub fn is_scene_suppressed(&self, index: usize) -> bool {
        self.jump.target().is_some_and(|target| {
            index > self.previous.min(target) && index < self.previous.max(target)
        })
    }

    /// Whether the scene at `index` draws its content this frame.
    #[must_use]
    pub fn is_scene_visible(&self, index: usize) -> bool {
        self.is_scene_mounted(index)
            && !self.is_scene_suppressed(index)
            && self.policy.is_content_ready(index)
    }

    /// Horizontal offset of the container of route `index` within the
    /// viewport.
    #[must_use]
    pub fn scene_offset(&self, index: usize) -> f64 {
        let mut x = (index as f64).mul_add(self.track.width, self.motion.translation());
        if index == self.previous {
            x += self.motion.previous_offset();
        }
        x
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Replace the navigation state. The committed index is kept (clamped to
    /// the new route count); the host's `index` is not re-read.
    pub fn set_navigation_state(&mut self, navigation: NavigationState) {
        let route_count = navigation.len();
        let last = route_count.saturating_sub(1);
        let stale_jump = self.jump.target().is_some_and(|t| t > last);
        self.navigation = navigation;
        self.track = Track::new(self.track.width, route_count);

        if self.current > last || stale_jump {
            tracing::debug!(current = self.current, route_count, "routes shrank, resetting");
            self.current = self.current.min(last);
            self.abort_transitions();
        }
        self.previous = self.previous.min(last);
        self.navigation.index = self.current;
        if !self.swipe.is_dragging() && !self.motion.is_animating() {
            self.motion.rest_at(self.track, self.current);
        }
    }

    /// Report the viewport size. A width change puts the track at rest on the
    /// committed index unless a finger is down.
    pub fn set_layout(&mut self, layout: Size) {
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.bounds = Rect::new(self.bounds.x, self.bounds.y, layout.width, layout.height);
        let width = f64::from(layout.width);
        if width == self.track.width {
            return;
        }
        self.track = Track::new(width, self.track.route_count);
        if !self.swipe.is_dragging() {
            self.motion.rest_at(self.track, self.current);
            self.motion.set_previous_offset(0.0);
            self.swipe.settle_finished();
        }
        tracing::debug!(width, "carousel width changed");
    }

    /// Request a jump to the route with `key`. Returns false if the request
    /// was dropped.
    pub fn jump_to(&mut self, key: &str) -> bool {
        let target =
            match self
                .jump
                .validate(&self.navigation, key, self.current, self.swipe.is_dragging())
            {
                Ok(target) => target,
                Err(reason) => {
                    tracing::debug!(%reason, key, "jump dropped");
                    return false;
                }
            };

        self.flush_settle_bookkeeping();
        self.swipe.settle_finished();
        let from = self.current;
        self.jump
            .start(&mut self.motion, self.track, from, target, self.duration);
        self.commit(target);
        self.defer(DeferredTask::FinishJump);
        true
    }

    // =========================================================================
    // Swipe input
    // =========================================================================

    /// Start a swipe. Rejected when swiping is disabled, during a jump, with
    /// no routes, or while already dragging.
    pub fn begin_swipe(&mut self) -> bool {
        if !self.swipe_enabled
            || self.jump.is_jumping()
            || self.swipe.is_dragging()
            || self.track.route_count == 0
        {
            tracing::debug!(jumping = self.jump.is_jumping(), "swipe rejected");
            return false;
        }
        self.flush_settle_bookkeeping();
        self.swipe.begin(&mut self.motion, self.track, self.current);
        self.notify(|o| o.on_swipe_start());
        if self.keyboard_dismiss_mode == KeyboardDismissMode::OnDrag {
            self.notify(|o| o.on_dismiss_keyboard());
        }
        true
    }

    /// Move an active swipe. `translation_x` is the finger's displacement
    /// since touch down.
    pub fn update_swipe(&mut self, translation_x: f64) {
        self.swipe.update(&mut self.motion, self.track, translation_x);
    }

    /// Release an active swipe.
    pub fn end_swipe(&mut self, translation_x: f64, velocity_x: f64) -> Option<SwipeOutcome> {
        let outcome = self.swipe.end(
            &mut self.motion,
            self.track,
            translation_x,
            velocity_x,
            self.duration,
        )?;
        self.resolve_swipe(outcome);
        Some(outcome)
    }

    /// The pointer driving the swipe was cancelled.
    pub fn cancel_swipe(&mut self) -> Option<SwipeOutcome> {
        let outcome = self.swipe.cancel(&mut self.motion, self.track, self.duration)?;
        self.resolve_swipe(outcome);
        Some(outcome)
    }

    fn resolve_swipe(&mut self, outcome: SwipeOutcome) {
        if let SwipeOutcome::Advance { to, .. } = outcome {
            self.commit(to);
            self.defer(DeferredTask::SettlePrevious(to));
        }
        self.notify(|o| o.on_swipe_end());
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self, index: usize) {
        if index == self.current {
            return;
        }
        self.current = index;
        self.navigation.index = index;
        self.policy.mark_visited(index);
        tracing::debug!(index, "index committed");
        self.notify(|o| o.on_index_change(index));
        if self.keyboard_dismiss_mode == KeyboardDismissMode::Auto {
            self.notify(|o| o.on_dismiss_keyboard());
        }
        if let Some(route) = self.navigation.route(index) {
            self.last_change = Some(IndexChanged {
                index,
                key: route.key.clone(),
            });
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn TabViewObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            f(observer);
        }
    }

    fn defer(&mut self, task: DeferredTask) {
        self.deferred.push(Deferred {
            elapsed: 0.0,
            delay: self.duration,
            task,
        });
    }

    /// Apply pending swipe bookkeeping now, ahead of its deadline.
    fn flush_settle_bookkeeping(&mut self) {
        let mut flushed = Vec::new();
        self.deferred.retain(|d| match d.task {
            DeferredTask::SettlePrevious(_) => {
                flushed.push(d.task);
                false
            }
            DeferredTask::FinishJump => true,
        });
        for task in flushed {
            self.run_task(task);
        }
    }

    fn abort_transitions(&mut self) {
        self.deferred.clear();
        self.jump.finish(&self.motion);
        self.swipe.settle_finished();
        self.previous = self.current;
        self.motion.set_previous_offset(0.0);
        if !self.swipe.is_dragging() {
            self.motion.rest_at(self.track, self.current);
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::SettlePrevious(index) => {
                self.previous = index;
            }
            DeferredTask::FinishJump => {
                if let Some(target) = self.jump.finish(&self.motion) {
                    self.previous = target;
                }
            }
        }
    }

    fn run_deferred(&mut self, dt: f64) {
        let mut due = Vec::new();
        self.deferred.retain_mut(|d| {
            d.elapsed += dt;
            if d.elapsed >= d.delay {
                due.push(d.task);
                false
            } else {
                true
            }
        });
        for task in due {
            self.run_task(task);
        }
    }

    fn process_jump_requests(&mut self) {
        for key in self.jump_handle.drain() {
            self.jump_to(&key);
        }
    }

    fn handle_pan(&mut self, state: GestureState, translation_x: f64, velocity_x: f64) {
        match state {
            GestureState::Started => {
                if self.begin_swipe() {
                    self.update_swipe(translation_x);
                }
            }
            GestureState::Changed => self.update_swipe(translation_x),
            GestureState::Ended => {
                self.end_swipe(translation_x, velocity_x);
            }
            GestureState::Cancelled => {
                self.cancel_swipe();
            }
        }
    }
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("jump_target", &self.jump.target())
            .field("swipe_phase", &self.swipe.phase())
            .field("track", &self.track)
            .field("motion", &self.motion)
            .finish_non_exhaustive()
    }
}

impl Animated for Carousel {
    fn tick(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let promoted = self.policy.promote_pending();
        self.recognizer.advance(dt);
        self.process_jump_requests();

        if self.motion.tick(dt) {
            self.swipe.settle_finished();
        }
        self.run_deferred(dt);

        promoted || self.motion.is_animating() || !self.deferred.is_empty()
    }
}

impl Widget for Carousel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(constraints.biggest())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.set_layout(bounds.size());
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_clip(self.bounds);
        let scene_bounds = Rect::from_size(self.layout);
        for (index, route) in self.navigation.routes.iter().enumerate() {
            if !self.is_scene_visible(index) {
                continue;
            }
            let Some(renderer) = self.renderer.as_deref() else {
                break;
            };
            let x = self.bounds.x + self.scene_offset(index) as f32;
            canvas.push_transform(Transform2D::translate(x, self.bounds.y));
            let props = SceneProps {
                route,
                index,
                layout: self.layout,
                bounds: scene_bounds,
                position: &self.position,
                jump: &self.jump_handle,
            };
            renderer.render(&props, canvas);
            canvas.pop_transform();
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        // only commits made while handling this event are reported
        self.last_change = None;
        self.process_jump_requests();

        match event {
            Event::Resize { width, height } => {
                self.set_layout(Size::new(*width, *height));
            }
            Event::TouchStart { position, .. } | Event::MouseDown { position, .. }
                if !self.bounds.contains_point(position) => {}
            _ => {
                self.recognizer
                    .set_enabled(self.swipe_enabled && !self.jump.is_jumping());
                if let Some(Recognized::Pan(pan)) = self.recognizer.process(event) {
                    self.handle_pan(pan.state, pan.translation_x, pan.velocity_x);
                }
            }
        }

        self.last_change
            .take()
            .map(|change| Box::new(change) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        self.swipe_enabled && !self.navigation.is_empty()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TabPanel
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderMode;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use swipetab_core::{Point, RecordingCanvas, TouchId};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Note {
        Index(usize),
        SwipeStart,
        SwipeEnd,
        Dismiss,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Note>>>);

    impl Recorder {
        fn notes(&self) -> Vec<Note> {
            self.0.lock().clone()
        }

        fn indices(&self) -> Vec<usize> {
            self.notes()
                .into_iter()
                .filter_map(|n| match n {
                    Note::Index(i) => Some(i),
                    _ => None,
                })
                .collect()
        }
    }

    impl TabViewObserver for Recorder {
        fn on_index_change(&mut self, index: usize) {
            self.0.lock().push(Note::Index(index));
        }
        fn on_swipe_start(&mut self) {
            self.0.lock().push(Note::SwipeStart);
        }
        fn on_swipe_end(&mut self) {
            self.0.lock().push(Note::SwipeEnd);
        }
        fn on_dismiss_keyboard(&mut self) {
            self.0.lock().push(Note::Dismiss);
        }
    }

    fn abcd() -> NavigationState {
        NavigationState::new(["A", "B", "C", "D"].map(Route::new))
    }

    fn carousel_with(config: &TabViewConfig) -> (Carousel, Recorder) {
        let recorder = Recorder::default();
        let carousel = Carousel::new(abcd(), config)
            .initial_layout(Size::new(300.0, 600.0))
            .observer(recorder.clone());
        (carousel, recorder)
    }

    fn carousel() -> (Carousel, Recorder) {
        carousel_with(&TabViewConfig::default())
    }

    fn run(carousel: &mut Carousel, seconds: f64) {
        let frames = (seconds / 0.016).ceil() as usize;
        for _ in 0..frames {
            carousel.tick(0.016);
        }
    }

    // ===== Swipe Tests =====

    #[test]
    fn test_swipe_commits_one_step() {
        let (mut c, rec) = carousel();
        assert!(c.begin_swipe());
        c.update_swipe(-320.0);
        assert_eq!(c.translation(), -300.0);
        let outcome = c.end_swipe(-320.0, -50.0);
        assert_eq!(outcome, Some(SwipeOutcome::Advance { from: 0, to: 1 }));
        assert_eq!(c.current_index(), 1);
        assert_eq!(rec.indices(), vec![1]);
        assert_eq!(c.previous_index(), 0);

        run(&mut c, 0.35);
        assert_eq!(c.translation(), -300.0);
        assert_eq!(c.route_position(), 1.0);
        assert_eq!(c.previous_index(), 1);
        assert_eq!(c.swipe_phase(), SwipePhase::Idle);
    }

    #[test]
    fn test_snap_back_does_not_notify() {
        let (mut c, rec) = carousel();
        c.begin_swipe();
        let outcome = c.end_swipe(-40.0, 0.0);
        assert_eq!(outcome, Some(SwipeOutcome::SnapBack { index: 0 }));
        run(&mut c, 0.35);
        assert_eq!(c.translation(), 0.0);
        assert_eq!(rec.indices(), Vec::<usize>::new());
        assert_eq!(rec.notes(), vec![Note::SwipeStart, Note::SwipeEnd]);
    }

    #[test]
    fn test_notification_order_and_keyboard_auto() {
        let (mut c, rec) = carousel();
        c.begin_swipe();
        c.end_swipe(-200.0, -300.0);
        assert_eq!(
            rec.notes(),
            vec![
                Note::SwipeStart,
                Note::Index(1),
                Note::Dismiss,
                Note::SwipeEnd
            ]
        );
    }

    #[test]
    fn test_keyboard_dismissed_on_drag() {
        let config = TabViewConfig {
            keyboard_dismiss_mode: KeyboardDismissMode::OnDrag,
            ..TabViewConfig::default()
        };
        let (mut c, rec) = carousel_with(&config);
        c.begin_swipe();
        c.end_swipe(-200.0, -300.0);
        assert_eq!(
            rec.notes(),
            vec![
                Note::SwipeStart,
                Note::Dismiss,
                Note::Index(1),
                Note::SwipeEnd
            ]
        );
    }

    #[test]
    fn test_swipe_disabled() {
        let config = TabViewConfig {
            swipe_enabled: false,
            ..TabViewConfig::default()
        };
        let (mut c, _) = carousel_with(&config);
        assert!(!c.begin_swipe());
        assert!(!c.is_interactive());
    }

    #[test]
    fn test_previous_updates_only_after_duration() {
        let (mut c, _) = carousel();
        c.begin_swipe();
        c.end_swipe(-200.0, -300.0);
        c.tick(0.1);
        c.tick(0.1);
        assert_eq!(c.previous_index(), 0);
        c.tick(0.1);
        assert_eq!(c.previous_index(), 1);
    }

    // ===== Jump Tests =====

    #[test]
    fn test_smooth_jump_to_last() {
        let (mut c, rec) = carousel();
        assert!(c.jump_to("D"));
        assert_eq!(c.translation(), -600.0);
        assert_eq!(c.previous_offset(), 600.0);
        assert_eq!(c.current_index(), 3);
        assert_eq!(rec.indices(), vec![3]);
        assert_eq!(c.jump_target(), Some(3));
        assert!(c.is_jumping());

        run(&mut c, 0.35);
        assert_eq!(c.translation(), -900.0);
        assert_eq!(c.route_position(), 3.0);
        assert_eq!(c.previous_offset(), 0.0);
        assert_eq!(c.previous_index(), 3);
        assert_eq!(c.jump_target(), None);
        assert!(!c.is_jumping());
        assert_eq!(rec.indices(), vec![3]);
    }

    #[test]
    fn test_jump_suppresses_intermediate_scenes() {
        let config = TabViewConfig {
            render_mode: RenderMode::Normal,
            ..TabViewConfig::default()
        };
        let (mut c, _) = carousel_with(&config);
        c.jump_to("D");
        assert!(c.is_scene_visible(0));
        assert!(!c.is_scene_visible(1));
        assert!(!c.is_scene_visible(2));
        assert!(c.is_scene_visible(3));
        assert_eq!(c.scene_offset(0), 0.0);
        assert_eq!(c.scene_offset(3), 300.0);
        run(&mut c, 0.35);
        assert!((0..4).all(|i| c.is_scene_visible(i)));
    }

    #[test]
    fn test_jump_to_current_is_noop() {
        let (mut c, rec) = carousel();
        assert!(!c.jump_to("A"));
        assert!(!c.is_jumping());
        assert_eq!(c.translation(), 0.0);
        assert!(rec.notes().is_empty());
    }

    #[test]
    fn test_jump_unknown_key_is_noop() {
        let (mut c, rec) = carousel();
        assert!(!c.jump_to("nope"));
        assert_eq!(c.current_index(), 0);
        assert!(rec.notes().is_empty());
    }

    #[test]
    fn test_concurrent_jump_rejected() {
        let (mut c, rec) = carousel();
        c.jump_to("C");
        assert!(!c.jump_to("B"));
        assert_eq!(rec.indices(), vec![2]);
    }

    #[test]
    fn test_swipe_rejected_during_jump() {
        let (mut c, _) = carousel();
        c.jump_to("C");
        assert!(!c.begin_swipe());
        run(&mut c, 0.35);
        assert!(c.begin_swipe());
    }

    #[test]
    fn test_jump_rejected_while_dragging() {
        let (mut c, _) = carousel();
        c.begin_swipe();
        assert!(!c.jump_to("C"));
    }

    #[test]
    fn test_jump_during_settle_flushes_previous() {
        let (mut c, _) = carousel();
        c.begin_swipe();
        c.end_swipe(-200.0, -300.0);
        c.tick(0.05);
        assert!(c.jump_to("D"));
        // the swipe's bookkeeping ran before staging
        assert_eq!(c.previous_index(), 1);
        assert_eq!(c.swipe_phase(), SwipePhase::Idle);
        assert_eq!(c.scene_offset(1), 0.0);
    }

    #[test]
    fn test_jump_handle_applied_on_tick() {
        let (mut c, rec) = carousel();
        c.handle().jump_to("B");
        c.tick(0.016);
        assert_eq!(c.current_index(), 1);
        assert_eq!(rec.indices(), vec![1]);
    }

    // ===== Layout Tests =====

    #[test]
    fn test_zero_width_positions_are_finite() {
        let mut c = Carousel::new(abcd().with_index(2), &TabViewConfig::default());
        assert_eq!(c.translation(), 0.0);
        assert_eq!(c.route_position(), 2.0);
        c.begin_swipe();
        c.update_swipe(-100.0);
        assert!(c.route_position().is_finite());
        assert_eq!(c.end_swipe(-100.0, -500.0), Some(SwipeOutcome::SnapBack { index: 2 }));
    }

    #[test]
    fn test_width_change_rebases_translation() {
        let (mut c, _) = carousel();
        c.jump_to("B");
        run(&mut c, 0.35);
        c.set_layout(Size::new(400.0, 600.0));
        assert_eq!(c.translation(), -400.0);
    }

    #[test]
    fn test_resize_event() {
        let (mut c, _) = carousel();
        c.event(&Event::Resize {
            width: 500.0,
            height: 300.0,
        });
        assert_eq!(c.layout_size(), Size::new(500.0, 300.0));
    }

    #[test]
    fn test_routes_shrinking_clamps_index() {
        let (mut c, _) = carousel();
        c.jump_to("D");
        c.set_navigation_state(NavigationState::new(["A", "B"].map(Route::new)));
        assert_eq!(c.current_index(), 1);
        assert!(!c.is_jumping());
        assert_eq!(c.translation(), -300.0);
        assert_eq!(c.navigation().index, 1);
    }

    #[test]
    fn test_initial_index_clamped() {
        let c = Carousel::new(abcd().with_index(9), &TabViewConfig::default());
        assert_eq!(c.current_index(), 3);
    }

    // ===== Mount Policy Tests =====

    #[test]
    fn test_windowed_mounting() {
        let (mut c, _) = carousel();
        assert!(c.is_scene_mounted(1));
        assert!(!c.is_scene_mounted(2));
        c.jump_to("D");
        assert!(c.is_scene_mounted(0));
        assert!(!c.is_scene_mounted(1));
        run(&mut c, 0.35);
        assert!(!c.is_scene_mounted(0));
    }

    #[test]
    fn test_lazy_content_appears_next_frame() {
        let config = TabViewConfig {
            render_mode: RenderMode::Lazy,
            ..TabViewConfig::default()
        };
        let (mut c, _) = carousel_with(&config);
        assert!(!c.is_scene_mounted(1));
        c.begin_swipe();
        c.end_swipe(-200.0, -300.0);
        assert!(c.is_scene_mounted(1));
        assert!(!c.is_scene_visible(1));
        c.tick(0.016);
        assert!(c.is_scene_visible(1));
        run(&mut c, 0.35);
        assert!(c.is_scene_mounted(0));
    }

    // ===== Widget Tests =====

    #[test]
    fn test_paint_places_scenes() {
        let (c, _) = carousel();
        let c = c.renderer(|props: &SceneProps<'_>, canvas: &mut dyn Canvas| {
            canvas.draw_text(
                props.route.label(),
                Point::new(10.0, 20.0),
                &swipetab_core::TextStyle::default(),
            );
        });
        let mut canvas = RecordingCanvas::new();
        c.paint(&mut canvas);
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(
            texts,
            vec![("A", Point::new(10.0, 20.0)), ("B", Point::new(310.0, 20.0))]
        );
        assert_eq!(canvas.transform_depth(), 0);
        assert!(canvas.current_clip().is_none());
    }

    #[test]
    fn test_touch_drag_commits_and_returns_message() {
        let (mut c, rec) = carousel();
        c.layout(Rect::new(0.0, 0.0, 300.0, 600.0));
        let id = TouchId(7);
        c.event(&Event::TouchStart {
            id,
            position: Point::new(250.0, 300.0),
        });
        for x in [230.0, 180.0, 120.0] {
            c.tick(0.016);
            c.event(&Event::TouchMove {
                id,
                position: Point::new(x, 300.0),
            });
        }
        c.tick(0.016);
        let message = c.event(&Event::TouchEnd {
            id,
            position: Point::new(80.0, 300.0),
        });
        let change = message
            .and_then(|m| m.downcast::<IndexChanged>().ok())
            .unwrap();
        assert_eq!(
            *change,
            IndexChanged {
                index: 1,
                key: "B".to_string()
            }
        );
        assert_eq!(rec.indices(), vec![1]);
    }

    #[test]
    fn test_event_reports_only_its_own_commits() {
        let (mut c, _) = carousel();
        c.handle().jump_to("B");
        run(&mut c, 1.0);
        assert_eq!(c.current_index(), 1);
        assert!(c.jump_to("C"));
        run(&mut c, 1.0);
        let message = c.event(&Event::MouseMove {
            position: Point::new(10.0, 10.0),
        });
        assert!(message.is_none());
    }

    #[test]
    fn test_touch_outside_bounds_ignored() {
        let (mut c, _) = carousel();
        c.layout(Rect::new(0.0, 48.0, 300.0, 600.0));
        c.event(&Event::TouchStart {
            id: TouchId(1),
            position: Point::new(100.0, 10.0),
        });
        c.event(&Event::TouchMove {
            id: TouchId(1),
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(c.swipe_phase(), SwipePhase::Idle);
    }

    #[test]
    fn test_touch_cancel_resolves_swipe() {
        let (mut c, _) = carousel();
        c.layout(Rect::new(0.0, 0.0, 300.0, 600.0));
        c.event(&Event::TouchStart {
            id: TouchId(1),
            position: Point::new(280.0, 100.0),
        });
        c.event(&Event::TouchMove {
            id: TouchId(1),
            position: Point::new(20.0, 100.0),
        });
        c.event(&Event::TouchCancel { id: TouchId(1) });
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.swipe_phase(), SwipePhase::Settling);
    }

    #[test]
    fn test_widget_metadata() {
        let (c, _) = carousel();
        assert_eq!(Widget::type_id(&c), TypeId::of::<Carousel>());
        assert_eq!(c.accessible_role(), AccessibleRole::TabPanel);
        assert!(format!("{c:?}").contains("Carousel"));
    }
}
