use crate::bridge::Callback;
use crate::context::Context;
use crate::dispatch;
use crate::events::{Event, EventType};
use crate::host::Value;

use super::{host_wrapper, FromHost, HostWrapper};

host_wrapper!(
    /// Anything that accepts event listeners.
    EventTarget
);

pub trait EventTargetOps: HostWrapper {
    /// Typed shape of `event.target` handed to listeners registered here.
    type Source: FromHost + 'static;

    fn add_event_listener(&self, event_type: &str, listener: &Value) {
        self.call_method("addEventListener", &[Value::from(event_type), listener.clone()]);
    }

    fn remove_event_listener(&self, event_type: &str, listener: &Value) {
        self.call_method("removeEventListener", &[Value::from(event_type), listener.clone()]);
    }

    /// Returns false if a listener cancelled the event.
    fn dispatch_event(&self, event: &Event) -> bool {
        self.call_method("dispatchEvent", &[event.to_host()]).as_bool()
    }

    /// Registers `listener` with `addEventListener`. Several listeners may
    /// share one event type; the returned token unregisters this one.
    fn add_event<K: EventType>(
        &self,
        ctx: &Context,
        kind: K,
        listener: impl FnMut(K::Event, Option<Self::Source>) + 'static,
    ) -> Callback
    where
        Self: Sized,
    {
        dispatch::add_event(ctx, self, kind, listener)
    }

    /// Assigns `listener` to the `on<type>` slot, replacing whatever it held.
    fn set_on<K: EventType>(
        &self,
        ctx: &Context,
        kind: K,
        listener: impl FnMut(K::Event, Option<Self::Source>) + 'static,
    ) -> Callback
    where
        Self: Sized,
    {
        dispatch::set_on(ctx, self, kind, listener)
    }
}

impl EventTargetOps for EventTarget {
    type Source = EventTarget;
}

impl<T: EventTargetOps> EventTargetOps for Option<T> {
    type Source = T::Source;
}
