//! Opaque host handles.
//!
//! A [`Value`] is the only thing that crosses the boundary between the bindings
//! and the embedding host. Primitives are carried inline; objects and functions
//! are reference-counted [`HostObject`]s owned by a backend:
//! - [`js`]: the browser, through `wasm-bindgen`
//! - [`memory`]: a deterministic in-memory host for native builds and tests

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::error::{fail_fast, Error, Result};

pub mod js;
pub mod memory;

/// Runtime tag of a host value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Undefined,
    Boolean,
    Number,
    String,
    Object,
    Function,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Undefined => "undefined",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Function => "function",
        };
        f.write_str(name)
    }
}

/// An object living on the host side.
pub trait HostObject {
    fn get(&self, name: &str) -> Value;
    fn set(&self, name: &str, value: Value);
    fn call(&self, name: &str, args: &[Value]) -> Value;
    fn invoke(&self, args: &[Value]) -> Value;

    /// Frees the host-side resources of a bridged function.
    /// Returns false if there was nothing to release.
    fn release(&self) -> bool {
        false
    }

    fn is_released(&self) -> bool {
        false
    }

    /// Host-defined reference equality.
    fn same_object(&self, other: &dyn HostObject) -> bool;

    /// A reference to the underlying host object that does not keep it alive.
    ///
    /// Handles may be re-created on every read, so this must track the host
    /// object itself rather than this particular handle.
    fn downgrade(&self) -> Rc<dyn WeakHostObject>;

    fn as_any(&self) -> &dyn Any;
}

/// Non-owning reference to a host object, produced by [`HostObject::downgrade`].
pub trait WeakHostObject {
    /// A fresh handle, or `None` once the host has collected the object.
    fn upgrade(&self) -> Option<Value>;
}

pub type HostRef = Rc<dyn HostObject>;

/// Body of a host-invocable function: positional arguments in, one value out.
pub type Thunk = Box<dyn FnMut(&[Value]) -> Value>;

/// Allocation side of the host protocol.
pub trait Host {
    /// The global object (the window, in a browser).
    fn global(&self) -> Value;
    fn new_object(&self) -> Value;
    /// Allocates a host-invocable function around `body`.
    /// The function stays alive on the host until it is released.
    ///
    /// Backends may bound the arity: the browser host passes at most
    /// [`js::MAX_ARGS`] arguments and trims trailing undefined ones.
    fn new_function(&self, body: Thunk) -> Value;
}

#[derive(Clone, Default)]
pub enum Value {
    Null,
    #[default]
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(HostRef),
    Function(HostRef),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Undefined => Kind::Undefined,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Object(_) => Kind::Object,
            Value::Function(_) => Kind::Function,
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn host_ref(&self) -> Option<&HostRef> {
        match self {
            Value::Object(object) | Value::Function(object) => Some(object),
            Value::Null
            | Value::Undefined
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_) => None,
        }
    }

    /// Reads a property. Reading through an absent value logs and yields undefined.
    pub fn get(&self, name: &str) -> Value {
        match self {
            Value::Object(object) | Value::Function(object) => object.get(name),
            Value::Null | Value::Undefined => {
                absent_access("get", name);
                Value::Undefined
            }
            Value::String(s) if name == "length" => Value::Number(s.encode_utf16().count() as f64),
            Value::Boolean(_) | Value::Number(_) | Value::String(_) => Value::Undefined,
        }
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) {
        match self {
            Value::Object(object) | Value::Function(object) => object.set(name, value.into()),
            Value::Null | Value::Undefined => absent_access("set", name),
            Value::Boolean(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    /// Calls a method by name with `self` as receiver.
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        match self {
            Value::Object(object) | Value::Function(object) => object.call(name, args),
            Value::Null | Value::Undefined => {
                absent_access("call", name);
                Value::Undefined
            }
            Value::Boolean(_) | Value::Number(_) | Value::String(_) => {
                tracing::warn!(target: "webclient::host", method = name, kind = %self.kind(), "method call on a primitive");
                Value::Undefined
            }
        }
    }

    pub fn try_invoke(&self, args: &[Value]) -> Result<Value> {
        match self {
            Value::Function(function) => Ok(function.invoke(args)),
            Value::Null | Value::Undefined => {
                absent_access("invoke", "");
                Ok(Value::Undefined)
            }
            Value::Boolean(_) | Value::Number(_) | Value::String(_) | Value::Object(_) => {
                Err(Error::NotCallable(self.kind()))
            }
        }
    }

    /// Invokes `self` as a function. Panics if the value is not callable.
    pub fn invoke(&self, args: &[Value]) -> Value {
        fail_fast(self.try_invoke(args))
    }

    /// Releases a bridged function. No-op on anything else.
    pub fn release(&self) -> bool {
        self.host_ref().is_some_and(|object| object.release())
    }

    pub fn is_released(&self) -> bool {
        self.host_ref().is_some_and(|object| object.is_released())
    }

    /// `length` of an array-like value.
    pub fn length(&self) -> usize {
        self.get("length").as_u32() as usize
    }

    /// Element `index` of an array-like value.
    pub fn index(&self, index: usize) -> Value {
        self.get(&index.to_string())
    }

    /// Host reference equality for objects, value equality for primitives.
    pub fn same_object(&self, other: &Value) -> bool {
        match (self.host_ref(), other.host_ref()) {
            (Some(a), Some(b)) => a.same_object(b.as_ref()),
            (None, None) => self.kind() == other.kind() && self.primitive_eq(other),
            _ => false,
        }
    }

    fn primitive_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }

    /// Truthiness, following host coercion rules.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) | Value::Function(_) => true,
            Value::Null | Value::Undefined => false,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(b) => f64::from(u8::from(*b)),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            Value::Null | Value::Undefined | Value::Object(_) | Value::Function(_) => 0.0,
        }
    }

    pub fn as_i32(&self) -> i32 {
        self.as_f64() as i32
    }

    pub fn as_u32(&self) -> u32 {
        self.as_f64() as u32
    }

    /// String form of the value; absent values give an empty string.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => format_number(*n),
            Value::Boolean(b) => b.to_string(),
            Value::Null | Value::Undefined | Value::Object(_) | Value::Function(_) => String::new(),
        }
    }

    pub fn as_optional_string(&self) -> Option<String> {
        if self.is_nullish() {
            None
        } else {
            Some(self.as_string())
        }
    }

    /// A reference that does not keep the host object alive on this side.
    pub fn downgrade(&self) -> WeakValue {
        match self {
            Value::Object(object) | Value::Function(object) => WeakValue::Host(object.downgrade()),
            Value::Null
            | Value::Undefined
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_) => WeakValue::Primitive(self.clone()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else if n.is_nan() {
        "NaN".to_string()
    } else {
        n.to_string()
    }
}

fn absent_access(op: &str, name: &str) {
    tracing::warn!(target: "webclient::host", op, name, "access through an absent host value");
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Undefined => f.write_str("Undefined"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Object(_) => f.write_str("Object(..)"),
            Value::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Non-owning counterpart of [`Value`].
#[derive(Clone)]
pub enum WeakValue {
    Primitive(Value),
    Host(Rc<dyn WeakHostObject>),
}

impl WeakValue {
    pub fn upgrade(&self) -> Option<Value> {
        match self {
            WeakValue::Primitive(value) => (!value.is_nullish()).then(|| value.clone()),
            WeakValue::Host(object) => object.upgrade(),
        }
    }
}

impl fmt::Debug for WeakValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeakValue::Primitive(value) => write!(f, "WeakValue({value:?})"),
            WeakValue::Host(_) => f.write_str("WeakValue(Host)"),
        }
    }
}
