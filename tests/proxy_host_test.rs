//! Bindings over a host that hands out a new handle on every read, the way
//! the browser host wraps each `JsValue` it returns.

mod common;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use webclient_sdk::host::memory::MemoryHost;
use webclient_sdk::host::{HostObject, Thunk, WeakHostObject, WeakValue};
use webclient_sdk::prelude::*;
use webclient_sdk::{Host, Value};

struct Handle {
    inner: Value,
}

fn wrap(value: Value) -> Value {
    match value {
        Value::Object(_) => Value::Object(Rc::new(Handle { inner: value })),
        Value::Function(_) => Value::Function(Rc::new(Handle { inner: value })),
        primitive => primitive,
    }
}

fn unwrap(value: &Value) -> Value {
    value
        .host_ref()
        .and_then(|object| object.as_any().downcast_ref::<Handle>())
        .map_or_else(|| value.clone(), |handle| handle.inner.clone())
}

fn unwrap_all(args: &[Value]) -> Vec<Value> {
    args.iter().map(unwrap).collect()
}

impl HostObject for Handle {
    fn get(&self, name: &str) -> Value {
        wrap(self.inner.get(name))
    }

    fn set(&self, name: &str, value: Value) {
        self.inner.set(name, unwrap(&value));
    }

    fn call(&self, name: &str, args: &[Value]) -> Value {
        wrap(self.inner.call(name, &unwrap_all(args)))
    }

    fn invoke(&self, args: &[Value]) -> Value {
        wrap(self.inner.invoke(&unwrap_all(args)))
    }

    fn release(&self) -> bool {
        self.inner.release()
    }

    fn is_released(&self) -> bool {
        self.inner.is_released()
    }

    fn same_object(&self, other: &dyn HostObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Handle>()
            .is_some_and(|other| other.inner.same_object(&self.inner))
    }

    fn downgrade(&self) -> Rc<dyn WeakHostObject> {
        Rc::new(WeakHandle(self.inner.downgrade()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct WeakHandle(WeakValue);

impl WeakHostObject for WeakHandle {
    fn upgrade(&self) -> Option<Value> {
        self.0.upgrade().map(wrap)
    }
}

struct RewrappingHost {
    inner: MemoryHost,
}

impl Host for RewrappingHost {
    fn global(&self) -> Value {
        wrap(self.inner.global())
    }

    fn new_object(&self) -> Value {
        wrap(self.inner.new_object())
    }

    fn new_function(&self, mut body: Thunk) -> Value {
        let rewrapped: Thunk = Box::new(move |args| {
            let args: Vec<Value> = args.iter().cloned().map(wrap).collect();
            unwrap(&body(&args))
        });
        wrap(self.inner.new_function(rewrapped))
    }
}

/// A page with a `<button id="tab">` in its body, seen through rewrapping handles.
fn page() -> (MemoryHost, Context, Value) {
    common::init_tracing();
    let host = MemoryHost::new();
    let tab = host.element_with_attributes("button", &[("id", "tab"), ("aria-selected", "false")]);
    host.global().get("document").get("body").call("appendChild", &[tab.clone()]);
    let ctx = Context::new(RewrappingHost { inner: host.clone() });
    (host, ctx, tab)
}

fn tab(ctx: &Context) -> Element {
    ctx.document().get_element_by_id("tab").unwrap()
}

#[test]
fn every_read_returns_a_new_handle_to_the_same_object() {
    let (_host, ctx, _tab) = page();
    let first = tab(&ctx).to_host();
    let second = tab(&ctx).to_host();
    assert!(!Rc::ptr_eq(first.host_ref().unwrap(), second.host_ref().unwrap()));
    assert_eq!(first, second);
}

#[test]
fn attribute_maps_flush_after_the_element_handle_is_gone() {
    let (_host, ctx, tab_object) = page();
    let mut attributes = tab(&ctx).attributes();
    attributes.set("role", "tab");
    attributes.set("aria-selected", "true");
    attributes.flush();

    let attribute = |name: &str| tab_object.call("getAttribute", &[Value::from(name)]).as_optional_string();
    assert_eq!(attribute("role").as_deref(), Some("tab"));
    assert_eq!(attribute("aria-selected").as_deref(), Some("true"));
    assert!(attributes.find("role").unwrap().owner_element().is_some());
}

#[test]
fn released_listeners_are_unregistered_after_the_target_handle_is_gone() {
    let (host, ctx, tab_object) = page();
    let clicks = Rc::new(RefCell::new(0));
    let sink = clicks.clone();
    let callback = tab(&ctx).add_click(&ctx, move |_, source| {
        assert_eq!(source.id(), "tab");
        *sink.borrow_mut() += 1;
    });

    host.dispatch(&tab_object, &host.event("click", &[]));
    assert_eq!(*clicks.borrow(), 1);

    assert!(callback.release());
    assert_eq!(host.live_functions(), 0);
    // A released function still registered on the host would panic here.
    host.dispatch(&tab_object, &host.event("click", &[]));
    assert_eq!(*clicks.borrow(), 1);
}

#[test]
fn released_handlers_clear_their_slot_after_the_target_handle_is_gone() {
    let (host, ctx, tab_object) = page();
    let callback = tab(&ctx).on_click(&ctx, |_, _| {});
    assert!(tab_object.get("onclick").is_callable());

    drop(callback);
    assert!(tab_object.get("onclick").is_nullish());
    assert_eq!(host.live_functions(), 0);
}
