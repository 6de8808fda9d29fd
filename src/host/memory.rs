//! In-memory host.
//!
//! A small, deterministic stand-in for the browser: objects are property bags
//! with native methods and computed accessors, functions can be released, and
//! every property read and method call is recorded so that tests can assert on
//! the exact host traffic a binding produces.
//!
//! [`MemoryHost::new`] builds a browser-like global (window, document with
//! `<html>` and `<body>`, storage, history, location, navigator). Fixture
//! helpers create elements, text nodes and events on demand.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use super::{Host, HostObject, Thunk, Value, WeakHostObject, WeakValue};

type Method = Rc<dyn Fn(&[Value]) -> Value>;
type Getter = Rc<dyn Fn() -> Value>;
type Setter = Rc<dyn Fn(Value)>;

#[derive(Default)]
struct HostState {
    next_id: Cell<u64>,
    functions_created: Cell<usize>,
    functions_released: Cell<usize>,
    global: RefCell<Value>,
}

/// Handle to an in-memory host. Cloning shares the same host.
#[derive(Clone)]
pub struct MemoryHost {
    state: Rc<HostState>,
}

pub struct MemoryObject {
    id: u64,
    this: Weak<MemoryObject>,
    state: Weak<HostState>,
    callable: bool,
    props: RefCell<IndexMap<String, Value>>,
    accessors: RefCell<HashMap<String, (Getter, Option<Setter>)>>,
    methods: RefCell<HashMap<String, Method>>,
    body: RefCell<Option<Thunk>>,
    released: Cell<bool>,
    reads: RefCell<Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl MemoryObject {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl HostObject for MemoryObject {
    fn get(&self, name: &str) -> Value {
        self.reads.borrow_mut().push(name.to_string());
        let getter = self.accessors.borrow().get(name).map(|(getter, _)| getter.clone());
        if let Some(getter) = getter {
            return getter();
        }
        self.props.borrow().get(name).cloned().unwrap_or(Value::Undefined)
    }

    fn set(&self, name: &str, value: Value) {
        let setter = self.accessors.borrow().get(name).and_then(|(_, setter)| setter.clone());
        match setter {
            Some(setter) => setter(value),
            None => {
                self.props.borrow_mut().insert(name.to_string(), value);
            }
        }
    }

    fn call(&self, name: &str, args: &[Value]) -> Value {
        self.calls.borrow_mut().push(name.to_string());
        let method = self.methods.borrow().get(name).cloned();
        if let Some(method) = method {
            return method(args);
        }
        let prop = self.props.borrow().get(name).cloned();
        match prop {
            Some(function @ Value::Function(_)) => function.invoke(args),
            _ => {
                tracing::warn!(target: "webclient::host", object = self.id, method = name, "no such method");
                Value::Undefined
            }
        }
    }

    fn invoke(&self, args: &[Value]) -> Value {
        if self.released.get() {
            panic!("host function #{} invoked after release", self.id);
        }
        let taken = self.body.borrow_mut().take();
        let Some(mut body) = taken else {
            panic!("host function #{} invoked recursively", self.id);
        };
        let result = body(args);
        if !self.released.get() {
            *self.body.borrow_mut() = Some(body);
        }
        result
    }

    fn release(&self) -> bool {
        if !self.callable || self.released.replace(true) {
            return false;
        }
        let body = self.body.borrow_mut().take();
        drop(body);
        if let Some(state) = self.state.upgrade() {
            state.functions_released.set(state.functions_released.get() + 1);
        }
        true
    }

    fn is_released(&self) -> bool {
        self.released.get()
    }

    fn same_object(&self, other: &dyn HostObject) -> bool {
        other
            .as_any()
            .downcast_ref::<MemoryObject>()
            .is_some_and(|other| other.id == self.id)
    }

    fn downgrade(&self) -> Rc<dyn WeakHostObject> {
        Rc::new(MemoryWeak(self.this.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MemoryWeak(Weak<MemoryObject>);

impl WeakHostObject for MemoryWeak {
    fn upgrade(&self) -> Option<Value> {
        let object = self.0.upgrade()?;
        Some(if object.callable {
            Value::Function(object)
        } else {
            Value::Object(object)
        })
    }
}

fn memory_object(value: &Value) -> Option<&MemoryObject> {
    value
        .host_ref()
        .and_then(|object| object.as_any().downcast_ref::<MemoryObject>())
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// A host whose global object looks like a freshly loaded browser window.
    pub fn new() -> Self {
        let host = Self::bare();
        let window = host.build_window();
        *host.state.global.borrow_mut() = window;
        host
    }

    /// A host whose global object is empty.
    pub fn bare() -> Self {
        let host = Self {
            state: Rc::new(HostState::default()),
        };
        let global = host.object();
        *host.state.global.borrow_mut() = global;
        host
    }

    fn downgrade(&self) -> Weak<HostState> {
        Rc::downgrade(&self.state)
    }

    fn upgrade(state: &Weak<HostState>) -> Option<MemoryHost> {
        state.upgrade().map(|state| MemoryHost { state })
    }

    fn alloc(&self, callable: bool, body: Option<Thunk>) -> Rc<MemoryObject> {
        let id = self.state.next_id.get() + 1;
        self.state.next_id.set(id);
        Rc::new_cyclic(|this| MemoryObject {
            id,
            this: this.clone(),
            state: self.downgrade(),
            callable,
            props: RefCell::new(IndexMap::new()),
            accessors: RefCell::new(HashMap::new()),
            methods: RefCell::new(HashMap::new()),
            body: RefCell::new(body),
            released: Cell::new(false),
            reads: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        })
    }

    pub fn object(&self) -> Value {
        Value::Object(self.alloc(false, None))
    }

    pub fn object_with<'a>(&self, props: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
        let object = self.object();
        for (name, value) in props {
            object.set(name, value);
        }
        object
    }

    /// An array-like object with `length` and indexed properties.
    pub fn array(&self, items: impl IntoIterator<Item = Value>) -> Value {
        let array = self.object();
        let mut length = 0u32;
        for (index, item) in items.into_iter().enumerate() {
            array.set(&index.to_string(), item);
            length += 1;
        }
        array.set("length", length);
        array
    }

    pub fn define_method(&self, target: &Value, name: &str, method: impl Fn(&[Value]) -> Value + 'static) {
        match memory_object(target) {
            Some(object) => {
                object.methods.borrow_mut().insert(name.to_string(), Rc::new(method));
            }
            None => tracing::warn!(target: "webclient::host", method = name, "cannot define a method on a foreign value"),
        }
    }

    pub fn define_getter(&self, target: &Value, name: &str, getter: impl Fn() -> Value + 'static) {
        self.define_accessor_impl(target, name, Rc::new(getter), None);
    }

    pub fn define_accessor(
        &self,
        target: &Value,
        name: &str,
        getter: impl Fn() -> Value + 'static,
        setter: impl Fn(Value) + 'static,
    ) {
        self.define_accessor_impl(target, name, Rc::new(getter), Some(Rc::new(setter)));
    }

    fn define_accessor_impl(&self, target: &Value, name: &str, getter: Getter, setter: Option<Setter>) {
        match memory_object(target) {
            Some(object) => {
                object.accessors.borrow_mut().insert(name.to_string(), (getter, setter));
            }
            None => tracing::warn!(target: "webclient::host", property = name, "cannot define an accessor on a foreign value"),
        }
    }

    fn clear_accessor(target: &Value, name: &str) {
        if let Some(object) = memory_object(target) {
            object.accessors.borrow_mut().remove(name);
        }
    }

    pub fn functions_created(&self) -> usize {
        self.state.functions_created.get()
    }

    pub fn functions_released(&self) -> usize {
        self.state.functions_released.get()
    }

    /// Bridged functions allocated and not yet released.
    pub fn live_functions(&self) -> usize {
        self.functions_created() - self.functions_released()
    }

    /// Property names read on `value`, in order.
    pub fn reads(value: &Value) -> Vec<String> {
        memory_object(value).map(|object| object.reads.borrow().clone()).unwrap_or_default()
    }

    /// Method names called on `value`, in order.
    pub fn calls(value: &Value) -> Vec<String> {
        memory_object(value).map(|object| object.calls.borrow().clone()).unwrap_or_default()
    }

    pub fn clear_log(value: &Value) {
        if let Some(object) = memory_object(value) {
            object.reads.borrow_mut().clear();
            object.calls.borrow_mut().clear();
        }
    }

    // ── DOM fixtures ─────────────────────────────────────────────

    /// Installs `addEventListener`, `removeEventListener` and `dispatchEvent`.
    pub fn install_event_target(&self, target: &Value) {
        let listeners: Rc<RefCell<Vec<(String, Value)>>> = Rc::new(RefCell::new(Vec::new()));

        let registry = listeners.clone();
        self.define_method(target, "addEventListener", move |args| {
            let event_type = arg(args, 0).as_string();
            let listener = arg(args, 1);
            let mut registry = registry.borrow_mut();
            let known = registry
                .iter()
                .any(|(t, l)| *t == event_type && l.same_object(&listener));
            if !known && !listener.is_nullish() {
                registry.push((event_type, listener));
            }
            Value::Undefined
        });

        let registry = listeners.clone();
        self.define_method(target, "removeEventListener", move |args| {
            let event_type = arg(args, 0).as_string();
            let listener = arg(args, 1);
            registry
                .borrow_mut()
                .retain(|(t, l)| !(*t == event_type && l.same_object(&listener)));
            Value::Undefined
        });

        let registry = listeners;
        let this = target.downgrade();
        self.define_method(target, "dispatchEvent", move |args| {
            let event = arg(args, 0);
            let Some(this) = this.upgrade() else {
                return Value::Boolean(false);
            };
            if event.get("target").is_nullish() {
                event.set("target", this.clone());
            }
            event.set("currentTarget", this.clone());
            let event_type = event.get("type").as_string();
            let snapshot: Vec<Value> = registry
                .borrow()
                .iter()
                .filter(|(t, _)| *t == event_type)
                .map(|(_, l)| l.clone())
                .collect();
            for listener in snapshot {
                let still_registered = registry
                    .borrow()
                    .iter()
                    .any(|(t, l)| *t == event_type && l.same_object(&listener));
                if still_registered {
                    deliver(&listener, &event);
                }
            }
            let slot = this.get(&format!("on{event_type}"));
            if slot.is_callable() {
                slot.invoke(&[event.clone()]);
            }
            Value::Boolean(!event.get("defaultPrevented").as_bool())
        });
    }

    /// Dispatches `event` on `target` through its `dispatchEvent` method.
    pub fn dispatch(&self, target: &Value, event: &Value) -> bool {
        target.call("dispatchEvent", &[event.clone()]).as_bool()
    }

    /// An event object carrying `event_type` and the given fields.
    pub fn event(&self, event_type: &str, fields: &[(&str, Value)]) -> Value {
        let event = self.object_with([
            ("type", Value::from(event_type)),
            ("bubbles", Value::Boolean(true)),
            ("cancelable", Value::Boolean(true)),
            ("defaultPrevented", Value::Boolean(false)),
            ("isTrusted", Value::Boolean(false)),
            ("timeStamp", Value::Number(0.0)),
            ("target", Value::Null),
            ("currentTarget", Value::Null),
        ]);
        for (name, value) in fields {
            event.set(name, value);
        }
        let this = event.downgrade();
        self.define_method(&event, "preventDefault", move |_| {
            if let Some(event) = this.upgrade() {
                if event.get("cancelable").as_bool() {
                    event.set("defaultPrevented", true);
                }
            }
            Value::Undefined
        });
        self.define_method(&event, "stopPropagation", |_| Value::Undefined);
        self.define_method(&event, "stopImmediatePropagation", |_| Value::Undefined);
        event
    }

    /// A node with child-list and sibling machinery.
    pub fn node(&self, node_type: u32, node_name: &str) -> Value {
        let node = self.object_with([
            ("nodeType", Value::from(node_type)),
            ("nodeName", Value::from(node_name)),
            ("parentNode", Value::Null),
            ("previousSibling", Value::Null),
            ("nextSibling", Value::Null),
        ]);
        self.install_event_target(&node);

        let children: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::new()));

        let list = children.clone();
        self.define_getter(&node, "firstChild", move || list.borrow().first().cloned().unwrap_or(Value::Null));
        let list = children.clone();
        self.define_getter(&node, "lastChild", move || list.borrow().last().cloned().unwrap_or(Value::Null));
        let list = children.clone();
        let weak_host = self.downgrade();
        self.define_getter(&node, "childNodes", move || match MemoryHost::upgrade(&weak_host) {
            Some(host) => host.array(list.borrow().iter().cloned()),
            None => Value::Undefined,
        });
        let list = children.clone();
        self.define_method(&node, "hasChildNodes", move |_| Value::Boolean(!list.borrow().is_empty()));

        let list = children.clone();
        let this = node.downgrade();
        self.define_method(&node, "appendChild", move |args| {
            let child = arg(args, 0);
            if let Some(parent) = this.upgrade() {
                attach(&parent, &list, &child, None);
            }
            child
        });

        let list = children.clone();
        let this = node.downgrade();
        self.define_method(&node, "insertBefore", move |args| {
            let child = arg(args, 0);
            let reference = arg(args, 1);
            if let Some(parent) = this.upgrade() {
                let at = list.borrow().iter().position(|c| c.same_object(&reference));
                attach(&parent, &list, &child, at);
            }
            child
        });

        let list = children;
        self.define_method(&node, "removeChild", move |args| {
            let child = arg(args, 0);
            detach(&list, &child);
            child
        });

        let this = node.downgrade();
        self.define_method(&node, "remove", move |_| {
            if let Some(node) = this.upgrade() {
                let parent = node.get("parentNode");
                if !parent.is_nullish() {
                    parent.call("removeChild", &[node]);
                }
            }
            Value::Undefined
        });

        let this = node.downgrade();
        self.define_method(&node, "isSameNode", move |args| {
            Value::Boolean(this.upgrade().is_some_and(|node| node.same_object(&arg(args, 0))))
        });
        node
    }

    pub fn text(&self, data: &str) -> Value {
        let node = self.node(3, "#text");
        node.set("textContent", data);
        node.set("nodeValue", data);
        node
    }

    pub fn comment(&self, data: &str) -> Value {
        let node = self.node(8, "#comment");
        node.set("textContent", data);
        node.set("nodeValue", data);
        node
    }

    /// An HTML element with live attributes, `classList` and `attributes`.
    pub fn element(&self, tag: &str) -> Value {
        let element = self.node(1, &tag.to_uppercase());
        element.set("tagName", tag.to_uppercase());
        element.set("localName", tag.to_lowercase());
        for (name, value) in [
            ("title", Value::from("")),
            ("hidden", Value::Boolean(false)),
            ("tabIndex", Value::from(-1)),
            ("innerHTML", Value::from("")),
        ] {
            element.set(name, value);
        }

        let attributes: Rc<RefCell<IndexMap<String, String>>> = Rc::new(RefCell::new(IndexMap::new()));

        let store = attributes.clone();
        self.define_method(&element, "setAttribute", move |args| {
            let name = arg(args, 0).as_string().to_lowercase();
            store.borrow_mut().insert(name, arg(args, 1).as_string());
            Value::Undefined
        });
        let store = attributes.clone();
        self.define_method(&element, "getAttribute", move |args| {
            let name = arg(args, 0).as_string().to_lowercase();
            store.borrow().get(&name).cloned().map_or(Value::Null, Value::String)
        });
        let store = attributes.clone();
        self.define_method(&element, "removeAttribute", move |args| {
            let name = arg(args, 0).as_string().to_lowercase();
            store.borrow_mut().shift_remove(&name);
            Value::Undefined
        });
        let store = attributes.clone();
        self.define_method(&element, "hasAttribute", move |args| {
            let name = arg(args, 0).as_string().to_lowercase();
            Value::Boolean(store.borrow().contains_key(&name))
        });

        for (property, attribute) in [("id", "id"), ("className", "class")] {
            let read = attributes.clone();
            let write = attributes.clone();
            self.define_accessor(
                &element,
                property,
                move || Value::String(read.borrow().get(attribute).cloned().unwrap_or_default()),
                move |value| {
                    write.borrow_mut().insert(attribute.to_string(), value.as_string());
                },
            );
        }

        let store = attributes.clone();
        let weak_host = self.downgrade();
        self.define_getter(&element, "classList", move || match MemoryHost::upgrade(&weak_host) {
            Some(host) => host.token_list(store.clone(), "class"),
            None => Value::Undefined,
        });

        let store = attributes;
        let weak_host = self.downgrade();
        let this = element.downgrade();
        self.define_getter(&element, "attributes", move || {
            match (MemoryHost::upgrade(&weak_host), this.upgrade()) {
                (Some(host), Some(owner)) => host.named_node_map(&store.borrow(), &owner),
                _ => Value::Undefined,
            }
        });

        let this = element.downgrade();
        let weak_host = self.downgrade();
        self.define_method(&element, "click", move |_| {
            if let (Some(host), Some(element)) = (MemoryHost::upgrade(&weak_host), this.upgrade()) {
                let event = host.event("click", &[("button", Value::from(0)), ("detail", Value::from(1))]);
                host.dispatch(&element, &event);
            }
            Value::Undefined
        });
        for method in ["focus", "blur"] {
            self.define_method(&element, method, |_| Value::Undefined);
        }
        element
    }

    pub fn element_with_attributes(&self, tag: &str, attributes: &[(&str, &str)]) -> Value {
        let element = self.element(tag);
        for (name, value) in attributes {
            element.call("setAttribute", &[Value::from(*name), Value::from(*value)]);
        }
        element
    }

    fn token_list(&self, store: Rc<RefCell<IndexMap<String, String>>>, attribute: &'static str) -> Value {
        let list = self.object();
        let read = store.clone();
        let write = store.clone();
        self.define_accessor(
            &list,
            "value",
            move || Value::String(read.borrow().get(attribute).cloned().unwrap_or_default()),
            move |value| {
                write.borrow_mut().insert(attribute.to_string(), value.as_string());
            },
        );
        self.define_getter(&list, "length", move || {
            let count = store
                .borrow()
                .get(attribute)
                .map_or(0, |value| value.split_whitespace().count());
            Value::from(count as u32)
        });
        list
    }

    fn named_node_map(&self, attributes: &IndexMap<String, String>, owner: &Value) -> Value {
        let items: Vec<Value> = attributes
            .iter()
            .map(|(name, value)| {
                self.object_with([
                    ("name", Value::from(name.as_str())),
                    ("value", Value::from(value.as_str())),
                    ("ownerElement", owner.clone()),
                ])
            })
            .collect();
        let map = self.array(items.clone());
        self.define_method(&map, "item", move |args| {
            items.get(arg(args, 0).as_u32() as usize).cloned().unwrap_or(Value::Null)
        });
        map
    }

    fn storage(&self) -> Value {
        let storage = self.object();
        let items: Rc<RefCell<IndexMap<String, String>>> = Rc::new(RefCell::new(IndexMap::new()));

        let store = items.clone();
        self.define_getter(&storage, "length", move || Value::from(store.borrow().len() as u32));
        let store = items.clone();
        self.define_method(&storage, "key", move |args| {
            let index = arg(args, 0).as_u32() as usize;
            store
                .borrow()
                .get_index(index)
                .map_or(Value::Null, |(key, _)| Value::from(key.as_str()))
        });
        let store = items.clone();
        self.define_method(&storage, "getItem", move |args| {
            store
                .borrow()
                .get(&arg(args, 0).as_string())
                .map_or(Value::Null, |value| Value::from(value.as_str()))
        });
        let store = items.clone();
        self.define_method(&storage, "setItem", move |args| {
            store.borrow_mut().insert(arg(args, 0).as_string(), arg(args, 1).as_string());
            Value::Undefined
        });
        let store = items.clone();
        self.define_method(&storage, "removeItem", move |args| {
            store.borrow_mut().shift_remove(&arg(args, 0).as_string());
            Value::Undefined
        });
        let store = items;
        self.define_method(&storage, "clear", move |_| {
            store.borrow_mut().clear();
            Value::Undefined
        });
        storage
    }

    fn history(&self) -> Value {
        let history = self.object_with([
            ("length", Value::from(1)),
            ("scrollRestoration", Value::from("auto")),
            ("state", Value::Null),
        ]);
        for method in ["pushState", "replaceState"] {
            let this = history.downgrade();
            let push = method == "pushState";
            self.define_method(&history, method, move |args| {
                if let Some(history) = this.upgrade() {
                    history.set("state", arg(args, 0));
                    if push {
                        let length = history.get("length").as_u32();
                        history.set("length", length + 1);
                    }
                }
                Value::Undefined
            });
        }
        for method in ["back", "forward", "go"] {
            self.define_method(&history, method, |_| Value::Undefined);
        }
        history
    }

    fn build_document(&self) -> Value {
        let document = self.node(9, "#document");
        for (name, value) in [
            ("title", Value::from("")),
            ("readyState", Value::from("complete")),
            ("visibilityState", Value::from("visible")),
            ("hidden", Value::Boolean(false)),
            ("characterSet", Value::from("UTF-8")),
            ("contentType", Value::from("text/html")),
        ] {
            document.set(name, value);
        }

        let doctype = self.node(10, "html");
        doctype.set("name", "html");
        document.call("appendChild", &[doctype.clone()]);
        document.set("doctype", doctype);

        let html = self.element("html");
        let head = self.element("head");
        let body = self.element("body");
        html.call("appendChild", &[head.clone()]);
        html.call("appendChild", &[body.clone()]);
        document.call("appendChild", &[html.clone()]);
        document.set("documentElement", html);
        document.set("head", head);
        document.set("body", body);

        let weak_host = self.downgrade();
        self.define_method(&document, "createElement", move |args| match MemoryHost::upgrade(&weak_host) {
            Some(host) => host.element(&arg(args, 0).as_string()),
            None => Value::Null,
        });
        let weak_host = self.downgrade();
        self.define_method(&document, "createTextNode", move |args| match MemoryHost::upgrade(&weak_host) {
            Some(host) => host.text(&arg(args, 0).as_string()),
            None => Value::Null,
        });
        let this = document.downgrade();
        self.define_method(&document, "getElementById", move |args| {
            let id = arg(args, 0).as_string();
            this.upgrade()
                .and_then(|document| find_by_id(&document, &id))
                .unwrap_or(Value::Null)
        });
        document
    }

    fn build_window(&self) -> Value {
        let window = self.object_with([
            ("innerWidth", Value::from(1024)),
            ("innerHeight", Value::from(768)),
            ("scrollX", Value::from(0)),
            ("scrollY", Value::from(0)),
            ("closed", Value::Boolean(false)),
        ]);
        self.install_event_target(&window);

        let location = self.object_with([
            ("href", Value::from("http://localhost/")),
            ("hash", Value::from("")),
            ("pathname", Value::from("/")),
            ("host", Value::from("localhost")),
        ]);
        self.define_method(&location, "reload", |_| Value::Undefined);
        let navigator = self.object_with([
            ("userAgent", Value::from("webclient-memory-host")),
            ("language", Value::from("en-US")),
            ("onLine", Value::Boolean(true)),
        ]);

        let document = self.build_document();
        document.set("location", location.clone());
        window.set("document", document);
        window.set("location", location);
        window.set("navigator", navigator);
        window.set("history", self.history());
        window.set("localStorage", self.storage());
        window.set("sessionStorage", self.storage());
        window
    }
}

impl Host for MemoryHost {
    fn global(&self) -> Value {
        self.state.global.borrow().clone()
    }

    fn new_object(&self) -> Value {
        self.object()
    }

    fn new_function(&self, body: Thunk) -> Value {
        self.state
            .functions_created
            .set(self.state.functions_created.get() + 1);
        Value::Function(self.alloc(true, Some(body)))
    }
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

fn deliver(listener: &Value, event: &Value) {
    match listener {
        Value::Function(_) => {
            listener.invoke(&[event.clone()]);
        }
        Value::Object(_) => {
            listener.call("handleEvent", &[event.clone()]);
        }
        Value::Null | Value::Undefined | Value::Boolean(_) | Value::Number(_) | Value::String(_) => {
            tracing::warn!(target: "webclient::host", kind = %listener.kind(), "ignoring a non-callable listener");
        }
    }
}

fn attach(parent: &Value, children: &Rc<RefCell<Vec<Value>>>, child: &Value, at: Option<usize>) {
    let previous_parent = child.get("parentNode");
    if !previous_parent.is_nullish() {
        previous_parent.call("removeChild", &[child.clone()]);
    }
    {
        let mut list = children.borrow_mut();
        match at {
            Some(index) => list.insert(index, child.clone()),
            None => list.push(child.clone()),
        }
    }
    child.set("parentNode", parent.clone());

    let Some(object) = memory_object(child) else {
        return;
    };
    let Some(host) = object.state.upgrade().map(|state| MemoryHost { state }) else {
        return;
    };
    let siblings = Rc::downgrade(children);
    let this: WeakValue = child.downgrade();
    host.define_getter(child, "nextSibling", {
        let siblings = siblings.clone();
        let this = this.clone();
        move || sibling_of(&siblings, &this, 1)
    });
    host.define_getter(child, "previousSibling", move || sibling_of(&siblings, &this, -1));
}

fn detach(children: &Rc<RefCell<Vec<Value>>>, child: &Value) {
    children.borrow_mut().retain(|c| !c.same_object(child));
    child.set("parentNode", Value::Null);
    MemoryHost::clear_accessor(child, "nextSibling");
    MemoryHost::clear_accessor(child, "previousSibling");
}

fn sibling_of(siblings: &Weak<RefCell<Vec<Value>>>, this: &WeakValue, offset: isize) -> Value {
    let (Some(siblings), Some(this)) = (siblings.upgrade(), this.upgrade()) else {
        return Value::Null;
    };
    let list = siblings.borrow();
    list.iter()
        .position(|c| c.same_object(&this))
        .and_then(|index| index.checked_add_signed(offset))
        .and_then(|index| list.get(index).cloned())
        .unwrap_or(Value::Null)
}

fn find_by_id(node: &Value, id: &str) -> Option<Value> {
    if node.get("nodeType").as_u32() == 1 && node.get("id").as_string() == id {
        return Some(node.clone());
    }
    let children = node.get("childNodes");
    (0..children.length()).find_map(|index| find_by_id(&children.index(index), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_functions_are_counted() {
        let host = MemoryHost::new();
        let function = host.new_function(Box::new(|_| Value::Undefined));
        assert_eq!(host.live_functions(), 1);
        assert!(function.release());
        assert!(!function.release());
        assert_eq!(host.live_functions(), 0);
        assert!(function.is_released());
    }

    #[test]
    #[should_panic(expected = "invoked after release")]
    fn invoking_a_released_function_panics() {
        let host = MemoryHost::new();
        let function = host.new_function(Box::new(|_| Value::Undefined));
        function.release();
        function.invoke(&[]);
    }

    #[test]
    fn sibling_links_follow_the_child_list() {
        let host = MemoryHost::new();
        let parent = host.element("ul");
        let first = host.element("li");
        let second = host.text("two");
        parent.call("appendChild", &[first.clone()]);
        parent.call("appendChild", &[second.clone()]);
        assert_eq!(first.get("nextSibling"), second);
        assert_eq!(second.get("previousSibling"), first);
        assert!(second.get("nextSibling").is_nullish());

        parent.call("removeChild", &[first.clone()]);
        assert!(first.get("nextSibling").is_nullish());
        assert_eq!(parent.get("firstChild"), second);
    }

    #[test]
    fn class_list_value_is_backed_by_the_class_attribute() {
        let host = MemoryHost::new();
        let element = host.element_with_attributes("div", &[("class", "a b")]);
        let list = element.get("classList");
        assert_eq!(list.get("value").as_string(), "a b");
        list.set("value", "c");
        assert_eq!(element.call("getAttribute", &[Value::from("class")]).as_string(), "c");
    }

    #[test]
    fn get_element_by_id_searches_the_tree() {
        let host = MemoryHost::new();
        let document = host.global().get("document");
        let target = host.element_with_attributes("span", &[("id", "hit")]);
        document.get("body").call("appendChild", &[target.clone()]);
        let found = document.call("getElementById", &[Value::from("hit")]);
        assert_eq!(found, target);
    }
}
