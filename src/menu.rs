use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::html::{Attributes, HtmlWriter};
use crate::item::MenuItem;
use crate::policy::{AccessChecker, AccessControl};
use crate::render::{Markup, Renderer};
use crate::request::{CurrentRequest, RouteMeta};

/// A navigation menu.
///
/// `MenuTree` holds the top-level items in insertion order, an optional
/// access-control binding and the attributes of the outermost `<ul>`.
/// It is built with chained calls and rendered against the request being
/// served.
///
/// # Examples
///
/// ```
/// use acl_menu::{MenuItem, MenuTree, RouteMeta};
///
/// let menu = MenuTree::new()
///     .add(MenuItem::new("home", "index", "Home")?)
///     .add_with_children(
///         MenuItem::new("blog", "index", "Blog")?,
///         MenuTree::new().add(MenuItem::new("blog", "archive", "Archive")?),
///     );
///
/// let html = menu.render(&RouteMeta::new("blog", "archive"));
/// assert!(html.contains(r#"<li class="parent active"><a href="blog/index">Blog</a>"#));
/// assert!(html.contains(r#"<li class="active current"><a href="blog/archive">Archive</a>"#));
/// # Ok::<(), acl_menu::Error>(())
/// ```
#[derive(Clone)]
pub struct MenuTree {
    items: Vec<MenuItem>,
    access: Option<AccessControl>,
    attrs: Attributes,
    markup: Arc<dyn Markup>,
}

impl MenuTree {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            access: None,
            attrs: Attributes::new(),
            markup: Arc::new(HtmlWriter),
        }
    }

    /// Creates a menu from prepared items.
    ///
    /// No inheritance is applied: the items are taken as given.
    pub fn from_items(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            ..Self::new()
        }
    }

    /// Creates a menu from a JSON array of item definitions.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDefinition`](crate::ErrorKind::InvalidDefinition)
    /// if the JSON does not describe a list of items or an item has an empty
    /// required field.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_menu::MenuTree;
    ///
    /// let menu = MenuTree::from_json(r#"[
    ///     {"controller": "home", "action": "index", "label": "Home"},
    ///     {"controller": "admin", "action": "index", "label": "Admin", "resource": "admin"}
    /// ]"#)?;
    ///
    /// assert_eq!(menu.len(), 2);
    /// # Ok::<(), acl_menu::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        debug!(items = items.len(), "loaded menu definition");
        Ok(Self::from_items(items))
    }

    /// Appends a leaf item.
    pub fn add(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends an item whose children are the items of `children`.
    ///
    /// The sub-tree is consumed. Each of its top-level items that has no
    /// resource takes `item`'s resource (even when that is also unset), and
    /// likewise for the privilege. Deeper descendants are left untouched.
    /// An empty sub-tree leaves `item` as a leaf.
    pub fn add_with_children(mut self, mut item: MenuItem, children: MenuTree) -> Self {
        let mut nested = children.items;
        for child in &mut nested {
            child.inherit(item.resource(), item.privilege());
        }
        item.set_children(nested);
        self.items.push(item);
        self
    }

    /// Enables filtering: items `checker` denies to `role` are not rendered.
    pub fn set_access_control(
        mut self,
        checker: impl AccessChecker + 'static,
        role: impl Into<String>,
    ) -> Self {
        self.access = Some(AccessControl::new(checker, role));
        self
    }

    /// Disables filtering.
    pub fn clear_access_control(mut self) -> Self {
        self.access = None;
        self
    }

    /// Returns the access-control binding, if any.
    pub fn access_control(&self) -> Option<&AccessControl> {
        self.access.as_ref()
    }

    /// Replaces the attributes of the outermost list.
    pub fn with_attributes(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Attributes of the outermost list.
    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// Mutable access to the attributes of the outermost list.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// Uses `markup` instead of [`HtmlWriter`] to write attributes and anchors.
    pub fn with_writer(mut self, markup: impl Markup + 'static) -> Self {
        self.markup = Arc::new(markup);
        self
    }

    /// Top-level items in insertion order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no item was added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the menu with its own attributes.
    pub fn render(&self, request: &(impl CurrentRequest + ?Sized)) -> String {
        self.render_with(&Attributes::new(), request)
    }

    /// Renders the menu, using `attrs` on the outermost list.
    ///
    /// An empty `attrs` falls back to the tree's own attributes. Nested lists
    /// never receive custom attributes; every list gets a `level-N` class.
    pub fn render_with(
        &self,
        attrs: &Attributes,
        request: &(impl CurrentRequest + ?Sized),
    ) -> String {
        let attrs = if attrs.is_empty() {
            self.attrs.clone()
        } else {
            attrs.clone()
        };
        let renderer = Renderer {
            markup: self.markup.as_ref(),
            access: self.access.as_ref(),
            request,
        };
        let mut out = String::new();
        renderer.list(&self.items, attrs, 1, &mut out);
        out
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders with the tree's attributes and no active item.
impl fmt::Display for MenuTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RouteMeta::default()))
    }
}

impl fmt::Debug for MenuTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTree")
            .field("items", &self.items)
            .field("access", &self.access)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}
