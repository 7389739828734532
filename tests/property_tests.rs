//! Property tests for menu construction and rendering.
//!
//! These tests validate ordering, inheritance and filtering invariants
//! across arbitrary menus.

use acl_menu::{AllowAll, DenyAll, MenuItem, MenuTree, RouteMeta};
use proptest::prelude::*;

// Strategy: Generate an identifier usable as controller, action or label
fn arb_ident() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,8}").unwrap()
}

// Strategy: Generate an item with optional ACL keys
fn arb_item() -> impl Strategy<Value = MenuItem> {
    (
        arb_ident(),
        arb_ident(),
        arb_ident(),
        prop::option::of(arb_ident()),
        prop::option::of(arb_ident()),
    )
        .prop_map(|(controller, action, label, resource, privilege)| {
            let mut item = MenuItem::new(controller, action, label).unwrap();
            if let Some(r) = resource {
                item = item.with_resource(r);
            }
            if let Some(p) = privilege {
                item = item.with_privilege(p);
            }
            item
        })
}

fn build(items: &[MenuItem]) -> MenuTree {
    items
        .iter()
        .cloned()
        .fold(MenuTree::new(), |tree, item| tree.add(item))
}

proptest! {
    /// Property: One top-level item per add call, in call order
    #[test]
    fn proptest_add_preserves_count_and_order(items in prop::collection::vec(arb_item(), 0..20)) {
        let tree = build(&items);

        prop_assert_eq!(tree.len(), items.len());
        prop_assert_eq!(tree.items(), items.as_slice());
    }

    /// Property: Children without resource/privilege take the parent's values,
    /// including absent ones; set values are kept
    #[test]
    fn proptest_inheritance_applies_to_direct_children(
        parent_resource in prop::option::of(arb_ident()),
        parent_privilege in prop::option::of(arb_ident()),
        children in prop::collection::vec(arb_item(), 1..6)
    ) {
        let mut parent = MenuItem::new("parent", "index", "Parent").unwrap();
        if let Some(r) = &parent_resource {
            parent = parent.with_resource(r.clone());
        }
        if let Some(p) = &parent_privilege {
            parent = parent.with_privilege(p.clone());
        }

        let tree = MenuTree::new().add_with_children(parent, build(&children));
        let nested = tree.items()[0].children().unwrap();

        prop_assert_eq!(nested.len(), children.len());
        for (before, after) in children.iter().zip(nested) {
            let want_resource = before.resource().or(parent_resource.as_deref());
            let want_privilege = before.privilege().or(parent_privilege.as_deref());
            prop_assert_eq!(after.resource(), want_resource);
            prop_assert_eq!(after.privilege(), want_privilege);
        }
    }

    /// Property: Without access control every item is rendered
    #[test]
    fn proptest_no_filtering_renders_every_item(items in prop::collection::vec(arb_item(), 0..10)) {
        let tree = build(&items);
        let html = tree.render(&RouteMeta::default());

        prop_assert_eq!(html.matches("<li").count(), items.len());
        let allowed = tree.clone().set_access_control(AllowAll, "any").render(&RouteMeta::default());
        prop_assert_eq!(allowed, html);
    }

    /// Property: A denying checker leaves only the wrapper
    #[test]
    fn proptest_deny_all_hides_everything(items in prop::collection::vec(arb_item(), 0..10)) {
        let html = build(&items)
            .set_access_control(DenyAll, "any")
            .render(&RouteMeta::default());

        prop_assert_eq!(html, "\n<ul class=\"level-1\">\n</ul>\n");
    }

    /// Property: Exactly the items matching the request controller are active
    #[test]
    fn proptest_active_classes_match_controller(
        items in prop::collection::vec(arb_item(), 1..10),
        pick in any::<prop::sample::Index>()
    ) {
        let target = pick.get(&items);
        let request = RouteMeta::new(target.controller(), target.action());
        let html = build(&items).render(&request);

        let active = items.iter().filter(|i| i.controller() == target.controller()).count();
        let current = items
            .iter()
            .filter(|i| i.controller() == target.controller() && i.action() == target.action())
            .count();

        prop_assert_eq!(html.matches("<li class=\"active").count(), active);
        prop_assert_eq!(html.matches("active current").count(), current);
    }
}
