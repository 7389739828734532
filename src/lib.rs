//! Hierarchical navigation menus with access control and active-path highlighting.
//!
//! This crate builds a menu tree from declarative entries and renders it as
//! nested `<ul>` markup:
//! - **Access control**: Items a role may not see are dropped together with their children
//! - **Active path**: Items matching the current request's controller/action are highlighted
//! - **Inheritance**: Nested entries pick up their parent's resource/privilege when unset
//!
//! # Core Types
//!
//! - [`MenuTree`]: Ordered collection of top-level items; builds and renders the menu
//! - [`MenuItem`]: One entry, linking to `controller/action`
//! - [`AccessChecker`]: Decides whether a role may see a resource/privilege pair
//! - [`Acl`]: Rule-based [`AccessChecker`] with role inheritance
//! - [`CurrentRequest`]: The request being served, used for highlighting
//! - [`Attributes`]: Typed HTML attribute set for the outermost list
//!
//! # Examples
//!
//! ```
//! use acl_menu::{Acl, Attributes, MenuItem, MenuTree, RouteMeta};
//!
//! let acl = Acl::new().allow(Some("admin"), Some("admin"), None);
//!
//! let menu = MenuTree::new()
//!     .with_attributes(Attributes::new().id("nav"))
//!     .add(MenuItem::new("home", "index", "Home")?)
//!     .add_with_children(
//!         MenuItem::new("admin", "index", "Admin")?.with_resource("admin"),
//!         MenuTree::new().add(MenuItem::new("admin", "users", "Users")?),
//!     )
//!     .set_access_control(acl, "guest");
//!
//! let html = menu.render(&RouteMeta::new("home", "index"));
//! assert!(html.contains(r#"<ul id="nav" class="level-1">"#));
//! assert!(html.contains(r#"<li class="active current"><a href="home/index">Home</a></li>"#));
//! assert!(!html.contains("Admin"));
//! # Ok::<(), acl_menu::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod html;
mod item;
mod menu;
mod policy;
mod render;
mod request;

pub use error::{Error, ErrorKind, Result};
pub use html::{escape, AnchorBuilder, AttributeSerializer, Attributes, HtmlWriter};
pub use item::{url, MenuItem};
pub use menu::MenuTree;
pub use policy::{AccessChecker, AccessControl, Acl, AllowAll, DenyAll, Permission};
pub use render::{ActiveState, Markup};
pub use request::{CurrentRequest, RouteMeta};
