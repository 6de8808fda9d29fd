//! Browser host, backed by `wasm-bindgen`.
//!
//! Properties and methods go through `Reflect`; bridged functions are
//! `Closure`s owned by the [`JsObject`] that exposes them, so releasing the
//! object drops the closure and invalidates the JS function.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};

use super::{Host, HostObject, Thunk, Value, WeakHostObject};

/// Positional arguments a bridged function receives from JS. Extra
/// arguments are dropped.
pub const MAX_ARGS: usize = 3;

type JsClosure = Closure<dyn FnMut(JsValue, JsValue, JsValue) -> JsValue>;

#[wasm_bindgen]
extern "C" {
    type WeakRef;

    #[wasm_bindgen(constructor)]
    fn new(target: &JsValue) -> WeakRef;

    #[wasm_bindgen(method, js_name = deref)]
    fn target(this: &WeakRef) -> JsValue;
}

/// Weak handle backed by a JS `WeakRef`, so it follows the JS object rather
/// than the `JsObject` that happened to wrap it.
struct JsWeak(WeakRef);

impl WeakHostObject for JsWeak {
    fn upgrade(&self) -> Option<Value> {
        let value = self.0.target();
        if value.is_undefined() {
            None
        } else {
            Some(from_js(value))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsHost;

pub struct JsObject {
    value: JsValue,
    closure: RefCell<Option<JsClosure>>,
    released: Cell<bool>,
}

impl JsObject {
    fn new(value: JsValue) -> Self {
        Self {
            value,
            closure: RefCell::new(None),
            released: Cell::new(false),
        }
    }

    pub fn js_value(&self) -> &JsValue {
        &self.value
    }
}

/// Wraps a raw JS value.
pub fn from_js(value: JsValue) -> Value {
    if value.is_null() {
        Value::Null
    } else if value.is_undefined() {
        Value::Undefined
    } else if let Some(b) = value.as_bool() {
        Value::Boolean(b)
    } else if let Some(n) = value.as_f64() {
        Value::Number(n)
    } else if let Some(s) = value.as_string() {
        Value::String(s)
    } else if value.is_function() {
        Value::Function(Rc::new(JsObject::new(value)))
    } else {
        Value::Object(Rc::new(JsObject::new(value)))
    }
}

/// Unwraps a value into its JS form. Objects from another host become undefined.
pub fn to_js(value: &Value) -> JsValue {
    match value {
        Value::Null => JsValue::NULL,
        Value::Undefined => JsValue::UNDEFINED,
        Value::Boolean(b) => JsValue::from_bool(*b),
        Value::Number(n) => JsValue::from_f64(*n),
        Value::String(s) => JsValue::from_str(s),
        Value::Object(object) | Value::Function(object) => match object.as_any().downcast_ref::<JsObject>() {
            Some(object) => object.value.clone(),
            None => {
                tracing::warn!(target: "webclient::host", kind = %value.kind(), "value does not belong to the browser host");
                JsValue::UNDEFINED
            }
        },
    }
}

fn to_js_array(args: &[Value]) -> Array {
    args.iter().map(to_js).collect()
}

fn report(op: &str, name: &str, err: &JsValue) {
    tracing::warn!(target: "webclient::host", op, name, error = ?err, "host operation threw");
}

impl HostObject for JsObject {
    fn get(&self, name: &str) -> Value {
        match Reflect::get(&self.value, &JsValue::from_str(name)) {
            Ok(value) => from_js(value),
            Err(err) => {
                report("get", name, &err);
                Value::Undefined
            }
        }
    }

    fn set(&self, name: &str, value: Value) {
        if let Err(err) = Reflect::set(&self.value, &JsValue::from_str(name), &to_js(&value)) {
            report("set", name, &err);
        }
    }

    fn call(&self, name: &str, args: &[Value]) -> Value {
        let method = match Reflect::get(&self.value, &JsValue::from_str(name)) {
            Ok(method) => method,
            Err(err) => {
                report("call", name, &err);
                return Value::Undefined;
            }
        };
        let Some(method) = method.dyn_ref::<Function>() else {
            tracing::warn!(target: "webclient::host", method = name, "no such method");
            return Value::Undefined;
        };
        match method.apply(&self.value, &to_js_array(args)) {
            Ok(result) => from_js(result),
            Err(err) => {
                report("call", name, &err);
                Value::Undefined
            }
        }
    }

    fn invoke(&self, args: &[Value]) -> Value {
        let Some(function) = self.value.dyn_ref::<Function>() else {
            tracing::warn!(target: "webclient::host", "invoking a non-function object");
            return Value::Undefined;
        };
        match function.apply(&JsValue::UNDEFINED, &to_js_array(args)) {
            Ok(result) => from_js(result),
            Err(err) => {
                report("invoke", "", &err);
                Value::Undefined
            }
        }
    }

    fn release(&self) -> bool {
        let closure = self.closure.borrow_mut().take();
        match closure {
            Some(closure) => {
                self.released.set(true);
                drop(closure);
                true
            }
            None => false,
        }
    }

    fn is_released(&self) -> bool {
        self.released.get()
    }

    fn same_object(&self, other: &dyn HostObject) -> bool {
        other
            .as_any()
            .downcast_ref::<JsObject>()
            .is_some_and(|other| Object::is(&self.value, &other.value))
    }

    fn downgrade(&self) -> Rc<dyn WeakHostObject> {
        Rc::new(JsWeak(WeakRef::new(&self.value)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Host for JsHost {
    fn global(&self) -> Value {
        let global = web_sys::window()
            .map(JsValue::from)
            .unwrap_or_else(|| js_sys::global().into());
        from_js(global)
    }

    fn new_object(&self) -> Value {
        from_js(Object::new().into())
    }

    /// The JS function takes [`MAX_ARGS`] positional arguments. Trailing
    /// `undefined`s are trimmed before `body` runs, so `f()` and
    /// `f(undefined)` both arrive as an empty slice.
    fn new_function(&self, mut body: Thunk) -> Value {
        let closure: JsClosure = Closure::wrap(Box::new(move |a: JsValue, b: JsValue, c: JsValue| {
            let mut args = vec![from_js(a), from_js(b), from_js(c)];
            while args.last().is_some_and(Value::is_undefined) {
                args.pop();
            }
            to_js(&body(&args))
        }) as Box<dyn FnMut(JsValue, JsValue, JsValue) -> JsValue>);
        let object = JsObject::new(closure.as_ref().clone());
        *object.closure.borrow_mut() = Some(closure);
        Value::Function(Rc::new(object))
    }
}
