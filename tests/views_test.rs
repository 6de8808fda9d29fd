mod common;

use webclient_sdk::host::memory::MemoryHost;
use webclient_sdk::prelude::*;

#[test]
fn attribute_map_edits_serialize_in_snapshot_order() {
    let (_host, _ctx, document) = common::page();
    let button = document.create_element("button").unwrap();
    button.set_attribute("disabled", "");
    button.set_attribute("role", "button");

    let mut attributes = button.attributes();
    attributes.remove("disabled");
    attributes.set("role", "button2");
    attributes.set("show", "true");
    assert_eq!(attributes.to_string(), r#"role="button2" show="true""#);

    // Still a snapshot until flushed.
    assert!(button.has_attribute("disabled"));
    attributes.flush();
    assert!(!button.has_attribute("disabled"));
    assert_eq!(button.get_attribute("role").as_deref(), Some("button2"));
    assert_eq!(button.attributes().to_string(), attributes.to_string());
}

#[test]
fn attribute_values_keep_their_case() {
    let (_host, _ctx, document) = common::page();
    let image = document.create_element("img").unwrap();
    let mut attributes = image.attributes();
    attributes.set(" ALT ", "Company Logo");
    attributes.flush();
    assert_eq!(image.get_attribute("alt").as_deref(), Some("Company Logo"));
}

#[test]
fn the_snapshot_reads_the_host_once() {
    let (_host, _ctx, document) = common::page();
    let item = document.create_element("li").unwrap();
    item.set_attribute("class", "Item Selected");
    MemoryHost::clear_log(&item.to_host());

    let mut classes = item.class_list();
    classes.toggle("selected");
    classes.add("focused");
    assert!(classes.contains("ITEM"));
    assert_eq!(MemoryHost::reads(&item.to_host()), ["classList"]);

    classes.flush();
    assert_eq!(item.class_name(), "item focused");
}

#[test]
fn last_flush_wins_between_two_views() {
    let (_host, _ctx, document) = common::page();
    let card = document.create_element("div").unwrap();
    card.set_class_name("card");

    let mut first = card.class_list();
    let mut second = card.class_list();
    first.add("wide");
    second.add("tall");
    first.flush();
    second.flush();
    assert_eq!(card.class_name(), "card tall");
}

#[test]
fn attributes_point_back_to_their_element() {
    let (_host, _ctx, document) = common::page();
    let field = document.create_element("input").unwrap();
    field.set_attribute("name", "email");

    let attributes = field.attributes();
    let name = attributes.find("NAME").unwrap();
    assert_eq!(name.to_string(), r#"name="email""#);
    assert!(name.owner_element().same_handle(&field));
    assert_eq!(attributes.get(0).map(|a| a.value()), Some("email".to_string()));
}
