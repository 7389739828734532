//! Access-filtered navigation menu demonstration.
//!
//! This example shows:
//! 1. Building a nested menu with inherited resource/privilege
//! 2. Active and current highlighting for the request's route
//! 3. Filtering the same menu for different roles with an `Acl`
//!
//! Run with: `cargo run --example menu_scenario`

use acl_menu::{Acl, Attributes, MenuItem, MenuTree, RouteMeta};

fn main() -> Result<(), acl_menu::Error> {
    println!("=== Menu Scenario Example ===\n");

    let acl = Acl::new()
        .add_role("guest", &[])
        .add_role("member", &["guest"])
        .allow(Some("member"), Some("blog"), None)
        .deny(Some("member"), Some("blog"), Some("archive"));

    let build = || -> Result<MenuTree, acl_menu::Error> {
        Ok(MenuTree::new()
            .with_attributes(Attributes::new().id("main-nav"))
            .add(MenuItem::new("home", "index", "Home")?)
            .add_with_children(
                MenuItem::new("blog", "index", "Blog")?
                    .with_title("Latest posts")
                    .with_resource("blog")
                    .with_privilege("read"),
                MenuTree::new()
                    .add(MenuItem::new("blog", "archive", "Archive")?.with_privilege("archive")),
            ))
    };
    let request = RouteMeta::new("blog", "archive");

    // Scenario 1: no access control, everything is shown
    println!("--- Scenario 1: Unfiltered ---");
    let menu = build()?;
    println!("{}", menu.render(&request));

    // Scenario 2: guests see only unrestricted entries
    println!("--- Scenario 2: Guest ---");
    let menu = build()?.set_access_control(acl.clone(), "guest");
    println!("{}", menu.render(&request));

    // Scenario 3: members see the blog, but not its archive
    println!("--- Scenario 3: Member ---");
    let menu = build()?.set_access_control(acl, "member");
    println!("{}", menu.render(&request));

    println!("=== Example Complete ===");
    Ok(())
}
