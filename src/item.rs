use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One entry in a menu.
///
/// An item links to `controller/action` and shows `label`. The optional
/// `resource` and `privilege` are handed to the access checker; leaving them
/// unset means the item carries no restriction of its own. Nested entries
/// live in `children`, which is either absent or non-empty.
///
/// Items are usually built with [`MenuItem::new`] and the chained setters,
/// then handed to [`MenuTree::add`](crate::MenuTree::add). Deserialization
/// applies the same checks, so an item with an empty required field or an
/// empty `children` list cannot exist.
///
/// # Examples
///
/// ```
/// use acl_menu::MenuItem;
///
/// let item = MenuItem::new("blog", "index", "Blog")?
///     .with_title("Latest posts")
///     .with_resource("blog")
///     .with_privilege("read");
///
/// assert_eq!(item.label(), "Blog");
/// assert_eq!(item.resource(), Some("blog"));
/// assert!(item.children().is_none());
/// # Ok::<(), acl_menu::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMenuItem")]
pub struct MenuItem {
    controller: String,
    action: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    privilege: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<MenuItem>>,
}

/// Wire shape of a [`MenuItem`], checked before it becomes one.
#[derive(Deserialize)]
struct RawMenuItem {
    controller: String,
    action: String,
    label: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    resource: Option<String>,
    #[serde(default)]
    privilege: Option<String>,
    #[serde(default)]
    children: Option<Vec<MenuItem>>,
}

impl TryFrom<RawMenuItem> for MenuItem {
    type Error = Error;

    fn try_from(raw: RawMenuItem) -> Result<Self> {
        let mut item = Self {
            controller: raw.controller,
            action: raw.action,
            label: raw.label,
            title: raw.title,
            resource: raw.resource,
            privilege: raw.privilege,
            children: None,
        };
        item.check_required()?;
        // Nested items were already checked when they were deserialized.
        item.set_children(raw.children.unwrap_or_default());
        Ok(item)
    }
}

impl MenuItem {
    /// Creates a leaf item.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidItem`](crate::ErrorKind::InvalidItem) if
    /// `controller`, `action` or `label` is empty.
    pub fn new(
        controller: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self> {
        let item = Self {
            controller: controller.into(),
            action: action.into(),
            label: label.into(),
            title: None,
            resource: None,
            privilege: None,
            children: None,
        };
        item.check_required()?;
        Ok(item)
    }

    /// Sets the tooltip text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the ACL resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets the ACL privilege.
    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privilege = Some(privilege.into());
        self
    }

    /// Controller the item links to.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action the item links to.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tooltip text, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// ACL resource key, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// ACL privilege key, if any.
    pub fn privilege(&self) -> Option<&str> {
        self.privilege.as_deref()
    }

    /// Nested items; `None` for a leaf.
    pub fn children(&self) -> Option<&[MenuItem]> {
        self.children.as_deref()
    }

    /// Returns `true` if the item has nested items.
    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Link target for this item.
    pub fn url(&self) -> String {
        url(&self.controller, &self.action)
    }

    /// Attaches `children`, dropping an empty list.
    pub(crate) fn set_children(&mut self, children: Vec<MenuItem>) {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
    }

    /// Fills unset resource/privilege from the enclosing entry.
    ///
    /// An absent value on the parent side is copied as-is.
    pub(crate) fn inherit(&mut self, resource: Option<&str>, privilege: Option<&str>) {
        if self.resource.is_none() {
            self.resource = resource.map(str::to_string);
        }
        if self.privilege.is_none() {
            self.privilege = privilege.map(str::to_string);
        }
    }

    fn check_required(&self) -> Result<()> {
        if self.controller.is_empty() {
            return Err(Error::invalid_item("controller"));
        }
        if self.action.is_empty() {
            return Err(Error::invalid_item("action"));
        }
        if self.label.is_empty() {
            return Err(Error::invalid_item("label"));
        }
        Ok(())
    }
}

/// Builds the link target for a controller/action pair.
///
/// This is a literal join; no escaping or route lookup happens here.
///
/// ```
/// assert_eq!(acl_menu::url("blog", "archive"), "blog/archive");
/// ```
pub fn url(controller: &str, action: &str) -> String {
    format!("{}/{}", controller, action)
}
