//! Event dispatch router.
//!
//! Bridges typed listeners: the host hands over one raw event, the router
//! decodes it into the category chosen at registration time, resolves
//! `event.target` into the typed source, and calls the listener with both.
//! Events are forwarded one at a time, in host order.

use crate::bridge::{bridge_fn, Callback};
use crate::context::Context;
use crate::dom::{FromHost, HostWrapper};
use crate::events::{EventCategory, EventType};
use crate::host::Value;

/// Builds the bridged function for `listener`. Nothing is registered yet.
pub fn make_handler<E, T>(ctx: &Context, mut listener: impl FnMut(E, Option<T>) + 'static) -> Callback
where
    E: EventCategory,
    T: FromHost + 'static,
{
    let trace = ctx.config().trace_dispatch;
    bridge_fn(ctx, move |args| {
        let raw = args.first().cloned().unwrap_or_default();
        let Some(event) = E::from_host(raw.clone()) else {
            tracing::warn!(target: "webclient::dispatch", category = E::NAME, "listener invoked without an event");
            return Value::Undefined;
        };
        let source = T::from_host(raw.get("target"));
        if trace {
            tracing::trace!(
                target: "webclient::dispatch",
                category = E::NAME,
                event_type = %raw.get("type").as_string(),
                "dispatching event"
            );
        }
        listener(event, source);
        Value::Undefined
    })
}

/// Registers through `addEventListener`; release unregisters.
pub fn add_event<W, K, T>(ctx: &Context, target: &W, kind: K, listener: impl FnMut(K::Event, Option<T>) + 'static) -> Callback
where
    W: HostWrapper + ?Sized,
    K: EventType,
    T: FromHost + 'static,
{
    let event_type = kind.name();
    let callback = make_handler(ctx, listener);
    target.call_method("addEventListener", &[Value::from(event_type), callback.value().clone()]);
    tracing::debug!(target: "webclient::dispatch", event_type, "listener added");
    callback.bind_listener(&target.to_host(), event_type)
}

/// Assigns the `on<type>` slot, replacing its previous handler; release
/// clears the slot if it still holds this handler.
pub fn set_on<W, K, T>(ctx: &Context, target: &W, kind: K, listener: impl FnMut(K::Event, Option<T>) + 'static) -> Callback
where
    W: HostWrapper + ?Sized,
    K: EventType,
    T: FromHost + 'static,
{
    let slot = format!("on{}", kind.name());
    let callback = make_handler(ctx, listener);
    match target.handle() {
        Some(handle) => handle.set(&slot, callback.value().clone()),
        None => tracing::warn!(target: "webclient::dispatch", slot = %slot, "cannot assign a handler on an absent target"),
    }
    tracing::debug!(target: "webclient::dispatch", slot = %slot, "handler assigned");
    callback.bind_slot(&target.to_host(), &slot)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::{Element, ElementOps, EventTargetOps, HtmlElement};
    use crate::events::{MouseEvent, MouseEventOps, MouseEventType};
    use crate::host::memory::MemoryHost;

    #[test]
    fn handlers_decode_the_event_and_the_source() {
        let host = MemoryHost::new();
        let ctx = Context::new(host.clone());
        let seen = Rc::new(RefCell::new(None));
        let log = seen.clone();
        let handler = make_handler(&ctx, move |event: MouseEvent, source: Option<Element>| {
            *log.borrow_mut() = Some((event.client_x(), source.tag_name()));
        });

        let button = host.element("button");
        let raw = host.event("click", &[("clientX", Value::from(4)), ("target", button)]);
        handler.value().invoke(&[raw]);
        assert_eq!(*seen.borrow(), Some((4.0, "BUTTON".to_string())));
    }

    #[test]
    fn a_missing_event_skips_the_listener() {
        let host = MemoryHost::new();
        let ctx = Context::new(host.clone());
        let calls = Rc::new(RefCell::new(0));
        let count = calls.clone();
        let handler = make_handler(&ctx, move |_: MouseEvent, _: Option<Element>| *count.borrow_mut() += 1);
        assert!(handler.value().invoke(&[]).is_undefined());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn absent_targets_still_hand_out_a_token() {
        let host = MemoryHost::new();
        let ctx = Context::new(host.clone());
        let missing: Option<HtmlElement> = None;
        let callback = missing.add_event(&ctx, MouseEventType::Click, |_, _| {});
        assert!(callback.release());
        assert_eq!(host.live_functions(), 0);
    }
}
