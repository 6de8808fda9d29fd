//! Callback bridge.
//!
//! Turns local closures into host-invocable functions and host functions back
//! into something local code can call.
//!
//! Every bridged function is owned by a [`Callback`] token. Releasing the
//! token frees the host function and, for listener registrations, removes it
//! from the target first. A function that is never released stays alive on
//! the host for the life of the page, so tokens release themselves on drop
//! unless [`Config::release_on_drop`](crate::Config::release_on_drop) is off
//! or the token is explicitly [forgotten](Callback::forget).

use std::cell::Cell;
use std::fmt;

use crate::context::Context;
use crate::dom::FromHost;
use crate::error::{fail_fast, Error, Result};
use crate::events::Event;
use crate::host::Value;

/// What the host holds on to, so that release can undo it. The target is
/// held strongly: handles may be re-created per read, and the registration
/// has to outlive whichever one was passed in.
#[derive(Debug)]
enum Registration {
    Unbound,
    Listener { target: Value, event_type: String },
    Slot { target: Value, slot: String },
}

/// Handle-with-lifetime for one bridged host function.
pub struct Callback {
    value: Value,
    function: Value,
    registration: Registration,
    released: Cell<bool>,
    release_on_drop: bool,
}

impl Callback {
    fn new(ctx: &Context, value: Value, function: Value) -> Self {
        Self {
            value,
            function,
            registration: Registration::Unbound,
            released: Cell::new(false),
            release_on_drop: ctx.config().release_on_drop,
        }
    }

    /// Remembers an `addEventListener` registration to undo on release.
    pub(crate) fn bind_listener(mut self, target: &Value, event_type: &str) -> Self {
        self.registration = Registration::Listener {
            target: target.clone(),
            event_type: event_type.to_string(),
        };
        self
    }

    /// Remembers an `on*` slot assignment to undo on release.
    pub(crate) fn bind_slot(mut self, target: &Value, slot: &str) -> Self {
        self.registration = Registration::Slot {
            target: target.clone(),
            slot: slot.to_string(),
        };
        self
    }

    /// The value handed to the host: the function itself, or the object
    /// exposing it as a method.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Unregisters and frees the host function. Returns false if it was
    /// already released.
    pub fn release(&self) -> bool {
        if self.released.replace(true) {
            return false;
        }
        match &self.registration {
            Registration::Unbound => {}
            Registration::Listener { target, event_type } => {
                target.call("removeEventListener", &[Value::from(event_type.as_str()), self.value.clone()]);
            }
            Registration::Slot { target, slot } => {
                if target.get(slot).same_object(&self.value) {
                    target.set(slot, Value::Null);
                }
            }
        }
        self.function.release();
        tracing::debug!(target: "webclient::bridge", registration = ?self.registration, "callback released");
        true
    }

    /// Gives up ownership without releasing: the host function lives as long
    /// as the page.
    pub fn forget(mut self) -> Value {
        self.release_on_drop = false;
        tracing::debug!(target: "webclient::bridge", registration = ?self.registration, "callback leaked on purpose");
        self.value.clone()
    }
}

impl Drop for Callback {
    fn drop(&mut self) {
        if self.release_on_drop {
            self.release();
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("registration", &self.registration)
            .field("released", &self.released.get())
            .finish_non_exhaustive()
    }
}

impl From<&Callback> for Value {
    fn from(callback: &Callback) -> Self {
        callback.value.clone()
    }
}

/// Bridges a closure as a bare host function.
pub fn bridge_fn(ctx: &Context, body: impl FnMut(&[Value]) -> Value + 'static) -> Callback {
    let function = ctx.host().new_function(Box::new(body));
    tracing::debug!(target: "webclient::bridge", "bridged function");
    Callback::new(ctx, function.clone(), function)
}

/// Bridges a closure as the single method `method` of a new host object.
pub fn bridge_method(ctx: &Context, method: &str, body: impl FnMut(&[Value]) -> Value + 'static) -> Callback {
    let object = ctx.host().new_object();
    let function = ctx.host().new_function(Box::new(body));
    object.set(method, function.clone());
    tracing::debug!(target: "webclient::bridge", method, "bridged method object");
    Callback::new(ctx, object, function)
}

/// A local object receiving events through `handleEvent`.
pub trait ListenerObject: 'static {
    fn handle_event(&mut self, event: Event);
}

impl<F: FnMut(Event) + 'static> ListenerObject for F {
    fn handle_event(&mut self, event: Event) {
        self(event)
    }
}

/// Bridges `listener` as an object with a `handleEvent` method.
pub fn bridge_listener(ctx: &Context, mut listener: impl ListenerObject) -> Callback {
    bridge_method(ctx, "handleEvent", move |args| {
        let raw = args.first().cloned().unwrap_or_default();
        match Event::from_host(raw) {
            Some(event) => listener.handle_event(event),
            None => tracing::warn!(target: "webclient::bridge", "handleEvent invoked without an event"),
        }
        Value::Undefined
    })
}

/// A host function seen from local code: a bare function or an object with
/// a callable `handleEvent`.
#[derive(Debug, Clone, PartialEq)]
pub enum HostFunction {
    Function(Value),
    Listener(Value),
}

impl HostFunction {
    /// `Ok(None)` for absent values, an error for anything not callable.
    pub fn try_from_host(value: Value) -> Result<Option<Self>> {
        match &value {
            Value::Null | Value::Undefined => Ok(None),
            Value::Function(_) => Ok(Some(HostFunction::Function(value))),
            Value::Object(_) if value.get("handleEvent").is_callable() => Ok(Some(HostFunction::Listener(value))),
            Value::Object(_) | Value::Boolean(_) | Value::Number(_) | Value::String(_) => {
                Err(Error::NotCallable(value.kind()))
            }
        }
    }

    pub fn invoke(&self, args: &[Value]) -> Value {
        match self {
            HostFunction::Function(function) => function.invoke(args),
            HostFunction::Listener(object) => object.call("handleEvent", args),
        }
    }

    /// Packages local arguments into host values, then invokes.
    pub fn invoke_with<I>(&self, args: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        self.invoke(&args)
    }

    /// Invokes and decodes the result.
    pub fn invoke_as<T: FromHost>(&self, args: &[Value]) -> Option<T> {
        T::from_host(self.invoke(args))
    }

    pub fn to_host(&self) -> Value {
        match self {
            HostFunction::Function(value) | HostFunction::Listener(value) => value.clone(),
        }
    }
}

/// Panics on values that are neither absent nor callable.
impl FromHost for HostFunction {
    fn from_host(value: Value) -> Option<Self> {
        fail_fast(Self::try_from_host(value))
    }
}
