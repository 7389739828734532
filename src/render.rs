//! Recursive markup generation for menu trees.
//!
//! Nesting depth is an argument of every call, so renders of independent
//! trees (or the same tree on several threads) never observe each other.

use std::fmt;

use tracing::{debug, trace};

use crate::html::{AnchorBuilder, AttributeSerializer, Attributes};
use crate::item::MenuItem;
use crate::policy::AccessControl;
use crate::request::CurrentRequest;

/// Anything that can write both attribute lists and anchors.
pub trait Markup: AttributeSerializer + AnchorBuilder + Send + Sync {}

impl<T> Markup for T where T: AttributeSerializer + AnchorBuilder + Send + Sync {}

/// How an item relates to the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveState {
    /// Same controller, different action
    Active,
    /// Same controller and action
    Current,
}

impl ActiveState {
    /// Determines the state of `item` for `request`, if any.
    ///
    /// Only the item's own controller/action are compared; descendants do
    /// not make an ancestor active.
    pub fn of(item: &MenuItem, request: &(impl CurrentRequest + ?Sized)) -> Option<Self> {
        if item.controller() != request.controller() {
            return None;
        }
        if item.action() == request.action() {
            Some(ActiveState::Current)
        } else {
            Some(ActiveState::Active)
        }
    }

    /// CSS classes emitted for this state.
    pub fn as_class(self) -> &'static str {
        match self {
            ActiveState::Active => "active",
            ActiveState::Current => "active current",
        }
    }
}

impl fmt::Display for ActiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

/// One render pass over a tree.
pub(crate) struct Renderer<'a, R: ?Sized> {
    pub(crate) markup: &'a dyn Markup,
    pub(crate) access: Option<&'a AccessControl>,
    pub(crate) request: &'a R,
}

impl<R: CurrentRequest + ?Sized> Renderer<'_, R> {
    /// Writes one `<ul>` level (and everything below it) into `out`.
    ///
    /// `depth` starts at 1 for the outermost list.
    pub(crate) fn list(
        &self,
        items: &[MenuItem],
        mut attrs: Attributes,
        depth: usize,
        out: &mut String,
    ) {
        trace!(depth, items = items.len(), "rendering menu level");

        attrs.push_class(&format!("level-{}", depth));

        out.push_str("\n<ul");
        out.push_str(&self.markup.serialize(&attrs));
        out.push_str(">\n");

        for item in items {
            if !self.permits(item) {
                continue;
            }
            self.entry(item, depth, out);
        }

        out.push_str("</ul>\n");
    }

    fn entry(&self, item: &MenuItem, depth: usize, out: &mut String) {
        let mut classes: Vec<&str> = Vec::new();
        if item.has_children() {
            classes.push("parent");
        }
        if let Some(state) = ActiveState::of(item, self.request) {
            classes.push(state.as_class());
        }

        out.push_str("<li");
        if !classes.is_empty() {
            let li = Attributes::new().class(classes.join(" "));
            out.push_str(&self.markup.serialize(&li));
        }
        out.push('>');

        let title = item.title().map(|t| Attributes::new().set("title", t));
        out.push_str(&self.markup.build(&item.url(), item.label(), title.as_ref()));

        if let Some(children) = item.children() {
            self.list(children, Attributes::new(), depth + 1, out);
        }

        out.push_str("</li>\n");
    }

    fn permits(&self, item: &MenuItem) -> bool {
        let Some(access) = self.access else {
            return true;
        };
        let allowed = access.permits(item.resource(), item.privilege());
        if !allowed {
            debug!(
                role = access.role(),
                controller = item.controller(),
                action = item.action(),
                resource = ?item.resource(),
                privilege = ?item.privilege(),
                "menu item hidden by access control"
            );
        }
        allowed
    }
}
