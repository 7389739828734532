use serde::{Deserialize, Serialize};

/// The request currently being processed, as seen by the menu.
///
/// Only the controller/action pair matters: it decides which items are
/// highlighted as active. Framework integrations implement this for their
/// own request types.
///
/// # Examples
///
/// ```
/// use acl_menu::CurrentRequest;
///
/// struct Routed {
///     controller: String,
///     action: String,
/// }
///
/// impl CurrentRequest for Routed {
///     fn controller(&self) -> &str {
///         &self.controller
///     }
///
///     fn action(&self) -> &str {
///         &self.action
///     }
/// }
/// ```
pub trait CurrentRequest {
    /// Controller handling the in-flight request.
    fn controller(&self) -> &str;

    /// Action handling the in-flight request.
    fn action(&self) -> &str;
}

/// Controller/action metadata for a routed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Controller name
    pub controller: String,
    /// Action name
    pub action: String,
}

impl RouteMeta {
    /// Creates route metadata from a controller and action.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl CurrentRequest for RouteMeta {
    fn controller(&self) -> &str {
        &self.controller
    }

    fn action(&self) -> &str {
        &self.action
    }
}

impl CurrentRequest for (&str, &str) {
    fn controller(&self) -> &str {
        self.0
    }

    fn action(&self) -> &str {
        self.1
    }
}

impl<R: CurrentRequest + ?Sized> CurrentRequest for &R {
    fn controller(&self) -> &str {
        (**self).controller()
    }

    fn action(&self) -> &str {
        (**self).action()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_meta_exposes_controller_and_action() {
        let route = RouteMeta::new("blog", "archive");

        assert_eq!(route.controller(), "blog");
        assert_eq!(route.action(), "archive");
    }

    #[test]
    fn default_route_matches_nothing() {
        let route = RouteMeta::default();

        assert!(route.controller().is_empty());
        assert!(route.action().is_empty());
    }

    #[test]
    fn tuples_act_as_requests() {
        let route = ("home", "index");

        assert_eq!(route.controller(), "home");
        assert_eq!(route.action(), "index");
    }
}
