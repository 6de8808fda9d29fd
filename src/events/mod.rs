//! Event categories.
//!
//! [`Event`] is a thin view with lazy accessors. Every other category decodes
//! its own field set eagerly, in one pass over [`EventCategory::FIELDS`],
//! which already contains the fields of its ancestors (a [`WheelEvent`] reads
//! the mouse, modifier and UI fields itself rather than going through a
//! [`MouseEvent`]).
//!
//! Which category a listener receives is fixed by the event name it was
//! registered for, see [`EventType`].

use crate::dom::{host_wrapper, EventTarget, FromHost, HostWrapper};
use crate::host::Value;

mod page;
mod types;
mod ui;

pub use page::{BeforeUnloadEvent, HashChangeEvent, PageTransitionEvent};
pub use types::{
    BeforeUnloadEventType, FocusEventType, FullscreenEventType, GenericEventType, HashChangeEventType,
    InputEventType, KeyboardEventType, MouseEventType, PageTransitionEventType, PointerEventType,
    UiEventType, WheelEventType,
};
pub use ui::{
    FocusEvent, InputEvent, KeyboardEvent, ModifierKeys, Modifiers, MouseEvent, MouseEventOps, MouseFields,
    PointerEvent, UiEvent, UiEventOps, WheelEvent,
};

host_wrapper!(
    /// Any event, with its properties read on demand.
    Event
);

/// A decoded event shape.
pub trait EventCategory: FromHost + 'static {
    const NAME: &'static str;
    /// Host properties read by the decoder, in read order.
    const FIELDS: &'static [&'static str];
}

/// An event name bound to the category its listeners receive.
pub trait EventType {
    type Event: EventCategory;

    fn name(&self) -> &str;
}

/// Free-form names dispatch as generic events.
impl EventType for &str {
    type Event = Event;

    fn name(&self) -> &str {
        self
    }
}

pub trait EventOps: HostWrapper {
    fn event_type(&self) -> String {
        self.prop("type").as_string()
    }

    fn target(&self) -> Option<EventTarget>
    where
        Self: Sized,
    {
        self.prop_as("target")
    }

    fn current_target(&self) -> Option<EventTarget>
    where
        Self: Sized,
    {
        self.prop_as("currentTarget")
    }

    fn bubbles(&self) -> bool {
        self.prop("bubbles").as_bool()
    }

    fn cancelable(&self) -> bool {
        self.prop("cancelable").as_bool()
    }

    fn default_prevented(&self) -> bool {
        self.prop("defaultPrevented").as_bool()
    }

    fn is_trusted(&self) -> bool {
        self.prop("isTrusted").as_bool()
    }

    fn time_stamp(&self) -> f64 {
        self.prop("timeStamp").as_f64()
    }

    fn prevent_default(&self) {
        self.call_method("preventDefault", &[]);
    }

    fn stop_propagation(&self) {
        self.call_method("stopPropagation", &[]);
    }

    fn stop_immediate_propagation(&self) {
        self.call_method("stopImmediatePropagation", &[]);
    }
}

impl EventOps for Event {}

impl<T: EventOps> EventOps for Option<T> {}

impl EventCategory for Event {
    const NAME: &'static str = "Event";
    const FIELDS: &'static [&'static str] = &[];
}

/// Wires a decoded category to the underlying [`Event`] handle.
macro_rules! event_category {
    ($name:ident, $label:literal, $fields:expr) => {
        impl $crate::dom::HostWrapper for $name {
            fn handle(&self) -> Option<&$crate::host::Value> {
                $crate::dom::HostWrapper::handle(&self.event)
            }
        }

        impl $crate::events::EventOps for $name {}

        impl $crate::dom::FromHost for $name {
            fn from_host(value: $crate::host::Value) -> Option<Self> {
                <$crate::events::Event as $crate::dom::FromHost>::from_host(value).map(Self::decode)
            }
        }

        impl $crate::events::EventCategory for $name {
            const NAME: &'static str = $label;
            const FIELDS: &'static [&'static str] = $fields;
        }

        impl $name {
            /// The undecoded event.
            pub fn event(&self) -> &$crate::events::Event {
                &self.event
            }
        }

        impl From<&$name> for $crate::host::Value {
            fn from(event: &$name) -> Self {
                $crate::dom::HostWrapper::to_host(&event.event)
            }
        }
    };
}

pub(crate) use event_category;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FromHost;
    use crate::host::memory::MemoryHost;

    #[test]
    fn generic_events_read_lazily() {
        let host = MemoryHost::new();
        let raw = host.event("submit", &[]);
        let event = Event::from_host(raw.clone()).unwrap();
        assert!(MemoryHost::reads(&raw).is_empty());

        assert_eq!(event.event_type(), "submit");
        assert!(event.cancelable());
        event.prevent_default();
        assert!(event.default_prevented());
        assert!(event.target().is_none());
    }

    #[test]
    fn free_form_names_dispatch_as_generic_events() {
        assert_eq!("custom".name(), "custom");
        assert!(Event::FIELDS.is_empty());
    }
}
