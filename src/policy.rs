use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// Decides whether a role may see a menu item.
///
/// `resource` and `privilege` are the opaque keys stored on the item. The
/// policy for absent keys belongs to the checker, not the menu.
///
/// Any `Fn(&str, Option<&str>, Option<&str>) -> bool` closure is a checker.
///
/// # Examples
///
/// ```
/// use acl_menu::AccessChecker;
///
/// let admins_only = |role: &str, resource: Option<&str>, _privilege: Option<&str>| {
///     resource != Some("admin") || role == "admin"
/// };
///
/// assert!(admins_only.is_allowed("admin", Some("admin"), None));
/// assert!(!admins_only.is_allowed("guest", Some("admin"), None));
/// ```
pub trait AccessChecker: Send + Sync {
    /// Returns `true` if `role` may access `privilege` on `resource`.
    fn is_allowed(&self, role: &str, resource: Option<&str>, privilege: Option<&str>) -> bool;
}

impl<F> AccessChecker for F
where
    F: Fn(&str, Option<&str>, Option<&str>) -> bool + Send + Sync,
{
    fn is_allowed(&self, role: &str, resource: Option<&str>, privilege: Option<&str>) -> bool {
        self(role, resource, privilege)
    }
}

/// A checker bound to the role it answers for.
///
/// Filtering is active exactly when a tree holds one of these; there is no
/// way to set a checker without a role or the other way round.
#[derive(Clone)]
pub struct AccessControl {
    checker: Arc<dyn AccessChecker>,
    role: String,
}

impl AccessControl {
    /// Binds `checker` to `role`.
    pub fn new(checker: impl AccessChecker + 'static, role: impl Into<String>) -> Self {
        Self {
            checker: Arc::new(checker),
            role: role.into(),
        }
    }

    /// Role whose permissions are checked.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Asks the checker about `resource`/`privilege` for the bound role.
    pub fn permits(&self, resource: Option<&str>, privilege: Option<&str>) -> bool {
        self.checker.is_allowed(&self.role, resource, privilege)
    }
}

impl fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControl")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// A checker that allows everything (useful in tests).
#[derive(Debug, Clone, Copy)]
pub struct AllowAll;

impl AccessChecker for AllowAll {
    fn is_allowed(&self, _role: &str, _resource: Option<&str>, _privilege: Option<&str>) -> bool {
        true
    }
}

/// A checker that denies everything (useful in tests).
#[derive(Debug, Clone, Copy)]
pub struct DenyAll;

impl AccessChecker for DenyAll {
    fn is_allowed(&self, _role: &str, _resource: Option<&str>, _privilege: Option<&str>) -> bool {
        false
    }
}

/// Whether a rule grants or refuses access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Access is granted
    Allow,
    /// Access is refused
    Deny,
}

#[derive(Debug, Clone)]
struct Rule {
    permission: Permission,
    role: Option<String>,
    resource: Option<String>,
    privilege: Option<String>,
}

impl Rule {
    fn matches(&self, role: &str, resource: Option<&str>, privilege: Option<&str>) -> bool {
        fn slot(rule: &Option<String>, value: Option<&str>) -> bool {
            match rule {
                None => true,
                Some(r) => value == Some(r.as_str()),
            }
        }
        slot(&self.role, Some(role))
            && slot(&self.resource, resource)
            && slot(&self.privilege, privilege)
    }

    /// Role outranks resource, which outranks privilege.
    fn specificity(&self) -> u8 {
        (self.role.is_some() as u8) << 2
            | (self.resource.is_some() as u8) << 1
            | self.privilege.is_some() as u8
    }
}

/// A role-based access control list.
///
/// Rules grant or refuse `(role, resource, privilege)` triples where any
/// part may be `None`, meaning "any". For a query the most specific
/// matching rule decides, and later rules win ties. Roles may inherit from
/// parent roles: the role's own rules are consulted first, then each parent
/// in order. Without a matching rule access is denied.
///
/// Items that carry neither a resource nor a privilege are always allowed.
///
/// # Examples
///
/// ```
/// use acl_menu::{AccessChecker, Acl};
///
/// let acl = Acl::new()
///     .add_role("guest", &[])
///     .add_role("editor", &["guest"])
///     .allow(Some("guest"), Some("blog"), Some("read"))
///     .allow(Some("editor"), Some("blog"), None)
///     .deny(None, Some("admin"), None);
///
/// assert!(acl.is_allowed("editor", Some("blog"), Some("read")));
/// assert!(acl.is_allowed("editor", Some("blog"), Some("write")));
/// assert!(!acl.is_allowed("guest", Some("blog"), Some("write")));
/// assert!(!acl.is_allowed("editor", Some("admin"), None));
/// assert!(acl.is_allowed("guest", None, None));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Acl {
    parents: HashMap<String, Vec<String>>,
    rules: Vec<Rule>,
}

impl Acl {
    /// Creates an empty list that denies every restricted item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `role` as inheriting from `parents`, in order.
    pub fn add_role(mut self, role: impl Into<String>, parents: &[&str]) -> Self {
        self.parents
            .insert(role.into(), parents.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Adds a rule granting access.
    pub fn allow(self, role: Option<&str>, resource: Option<&str>, privilege: Option<&str>) -> Self {
        self.rule(Permission::Allow, role, resource, privilege)
    }

    /// Adds a rule refusing access.
    pub fn deny(self, role: Option<&str>, resource: Option<&str>, privilege: Option<&str>) -> Self {
        self.rule(Permission::Deny, role, resource, privilege)
    }

    fn rule(
        mut self,
        permission: Permission,
        role: Option<&str>,
        resource: Option<&str>,
        privilege: Option<&str>,
    ) -> Self {
        self.rules.push(Rule {
            permission,
            role: role.map(str::to_string),
            resource: resource.map(str::to_string),
            privilege: privilege.map(str::to_string),
        });
        self
    }

    /// Finds the deciding permission for `role`, walking up its parents.
    fn resolve(
        &self,
        role: &str,
        resource: Option<&str>,
        privilege: Option<&str>,
        seen: &mut Vec<String>,
    ) -> Option<Permission> {
        if seen.iter().any(|r| r == role) {
            return None;
        }
        seen.push(role.to_string());

        let own = self
            .rules
            .iter()
            .filter(|rule| rule.role.as_deref() == Some(role))
            .filter(|rule| rule.matches(role, resource, privilege))
            .max_by_key(|rule| rule.specificity());
        if let Some(rule) = own {
            return Some(rule.permission);
        }

        for parent in self.parents.get(role).into_iter().flatten() {
            if let Some(permission) = self.resolve(parent, resource, privilege, seen) {
                return Some(permission);
            }
        }
        None
    }

    /// Rules that apply to every role.
    fn resolve_any_role(
        &self,
        resource: Option<&str>,
        privilege: Option<&str>,
    ) -> Option<Permission> {
        self.rules
            .iter()
            .filter(|rule| rule.role.is_none())
            .filter(|rule| rule.matches("", resource, privilege))
            .max_by_key(|rule| rule.specificity())
            .map(|rule| rule.permission)
    }
}

impl AccessChecker for Acl {
    fn is_allowed(&self, role: &str, resource: Option<&str>, privilege: Option<&str>) -> bool {
        if resource.is_none() && privilege.is_none() {
            return true;
        }

        let decision = self
            .resolve(role, resource, privilege, &mut Vec::new())
            .or_else(|| self.resolve_any_role(resource, privilege));

        trace!(role, ?resource, ?privilege, ?decision, "acl lookup");
        decision == Some(Permission::Allow)
    }
}
