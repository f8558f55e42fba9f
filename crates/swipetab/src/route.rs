//! Routes and the host-owned navigation state.

use serde::{Deserialize, Serialize};

/// A single tab: an opaque key plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Unique key, the identity of the route
    pub key: String,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Whether the tab is exposed to assistive technology
    #[serde(default = "default_accessible")]
    pub accessible: bool,
    /// Label read by screen readers
    #[serde(default)]
    pub accessibility_label: Option<String>,
    /// Test ID
    #[serde(default)]
    pub test_id: Option<String>,
}

const fn default_accessible() -> bool {
    true
}

impl Route {
    /// Create a route with only a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            accessible: true,
            accessibility_label: None,
            test_id: None,
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the accessibility label.
    #[must_use]
    pub fn accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility_label = Some(label.into());
        self
    }

    /// Hide the tab from assistive technology.
    #[must_use]
    pub const fn inaccessible(mut self) -> Self {
        self.accessible = false;
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Default label text: the title, falling back to the key.
    #[must_use]
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// The tab set and the index the host considers current.
///
/// Owned by the host. `index` may be stale or out of range; readers go through
/// [`NavigationState::current_index`], which clamps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    /// Requested index
    pub index: usize,
    /// Ordered routes
    pub routes: Vec<Route>,
}

impl NavigationState {
    /// Create a navigation state at index 0.
    #[must_use]
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        Self {
            index: 0,
            routes: routes.into_iter().collect(),
        }
    }

    /// Set the requested index.
    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether there are no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// `index` clamped to `[0, len - 1]` (0 when empty).
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index.min(self.routes.len().saturating_sub(1))
    }

    /// Position of the route with `key`.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.key == key)
    }

    /// Route at `index`.
    #[must_use]
    pub fn route(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> NavigationState {
        NavigationState::new(["A", "B", "C", "D"].map(Route::new))
    }

    #[test]
    fn test_route_builder() {
        let route = Route::new("home")
            .title("Home")
            .accessibility_label("Home tab")
            .test_id("tab-home");
        assert_eq!(route.key, "home");
        assert_eq!(route.label(), "Home");
        assert_eq!(route.accessibility_label.as_deref(), Some("Home tab"));
        assert_eq!(route.test_id.as_deref(), Some("tab-home"));
        assert!(route.accessible);
        assert!(!route.inaccessible().accessible);
    }

    #[test]
    fn test_label_falls_back_to_key() {
        assert_eq!(Route::new("feed").label(), "feed");
    }

    #[test]
    fn test_current_index_clamps() {
        assert_eq!(abcd().with_index(2).current_index(), 2);
        assert_eq!(abcd().with_index(17).current_index(), 3);
        assert_eq!(NavigationState::default().with_index(5).current_index(), 0);
    }

    #[test]
    fn test_index_of() {
        let nav = abcd();
        assert_eq!(nav.index_of("C"), Some(2));
        assert_eq!(nav.index_of("Z"), None);
        assert_eq!(nav.route(3).map(|r| r.key.as_str()), Some("D"));
        assert_eq!(nav.len(), 4);
        assert!(!nav.is_empty());
    }

    #[test]
    fn test_route_deserialize_defaults() {
        let route: Route = serde_json::from_str(r#"{"key":"a"}"#).unwrap();
        assert_eq!(route, Route::new("a"));
    }

    #[test]
    fn test_navigation_state_serde() {
        let nav = abcd().with_index(1);
        let json = serde_json::to_string(&nav).unwrap();
        let back: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nav);
    }
}
