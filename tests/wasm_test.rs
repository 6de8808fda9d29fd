//! Browser backend tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_test::*;
use webclient_sdk::host::js::MAX_ARGS;
use webclient_sdk::prelude::*;
use webclient_sdk::{bridge_fn, Value};

wasm_bindgen_test_configure!(run_in_browser);

/// Appends a fresh element with `id` to the body.
fn mount(ctx: &Context, id: &str) -> HtmlElement {
    let document = ctx.document().unwrap();
    let element = document.create_element("button").unwrap();
    element.set_id(id);
    document.body().append_child(&element);
    element
}

fn find(ctx: &Context, id: &str) -> Element {
    ctx.document().get_element_by_id(id).unwrap()
}

#[wasm_bindgen_test]
fn attribute_maps_flush_through_a_fresh_handle() {
    let ctx = Context::browser();
    let button = mount(&ctx, "flush-target");
    let mut attributes = find(&ctx, "flush-target").attributes();
    attributes.set("role", "tab");
    attributes.set_hidden(true);
    attributes.flush();
    assert_eq!(button.get_attribute("role").as_deref(), Some("tab"));
    assert!(button.has_attribute("hidden"));
    button.remove();
}

#[wasm_bindgen_test]
fn released_listeners_stop_receiving_events() {
    let ctx = Context::browser();
    let button = mount(&ctx, "release-target");
    let clicks = Rc::new(RefCell::new(0));
    let sink = clicks.clone();
    let callback = find(&ctx, "release-target").add_click(&ctx, move |_, _| *sink.borrow_mut() += 1);

    button.click();
    assert_eq!(*clicks.borrow(), 1);
    assert!(callback.release());
    button.click();
    assert_eq!(*clicks.borrow(), 1);
    button.remove();
}

#[wasm_bindgen_test]
fn released_handlers_clear_their_slot() {
    let ctx = Context::browser();
    let button = mount(&ctx, "slot-target");
    let callback = find(&ctx, "slot-target").on_click(&ctx, |_, _| {});
    assert!(button.prop("onclick").is_callable());
    drop(callback);
    assert!(button.prop("onclick").is_nullish());
    button.remove();
}

#[wasm_bindgen_test]
fn bridged_functions_see_a_bounded_trimmed_argument_list() {
    let ctx = Context::browser();
    let counted = bridge_fn(&ctx, |args| Value::from(args.len() as u32));
    let five: Vec<Value> = (1..=5).map(Value::from).collect();
    assert_eq!(counted.value().invoke(&five).as_u32() as usize, MAX_ARGS);
    assert_eq!(counted.value().invoke(&[Value::from(1), Value::Undefined]).as_u32(), 1);
    assert_eq!(counted.value().invoke(&[]).as_u32(), 0);
}
